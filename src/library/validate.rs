//! Song content checks for text coming from outside the editor.
//!
//! Accepted content has every non-blank line opening with a chord. Lines are
//! trimmed and blank lines are kept empty for spacing.

use crate::constants::library::MIN_CONTENT_CHARS;
use crate::error::{Error, Result};

/// Check raw song text and return it with each line trimmed.
pub fn clean_song_content(raw: &str) -> Result<String> {
    if !raw.contains('[') || !raw.contains(']') {
        return Err(Error::InvalidContent("content has no chord brackets".to_string()));
    }

    let mut lines = Vec::new();
    for line in raw.split('\n') {
        let line = line.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
        if !line.is_empty() && !line.starts_with('[') {
            return Err(Error::InvalidContent(format!(
                "line does not start with a chord: {line:?}"
            )));
        }
        lines.push(line);
    }

    let cleaned = lines.join("\n");
    if cleaned.chars().count() < MIN_CONTENT_CHARS {
        return Err(Error::InvalidContent("content is too short".to_string()));
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_lines_are_trimmed_and_blanks_kept() {
        let cleaned = clean_song_content("  [C]Row row  \r\n\n\t[G]row your boat").unwrap();
        assert_eq!(cleaned, "[C]Row row\n\n[G]row your boat");
    }

    #[test]
    fn test_missing_brackets() {
        assert!(matches!(
            clean_song_content("just some words here"),
            Err(Error::InvalidContent(_))
        ));
        assert!(clean_song_content("[C only an open bracket").is_err());
    }

    #[test]
    fn test_line_without_leading_chord() {
        match clean_song_content("[C]Row row\nyour boat") {
            Err(Error::InvalidContent(msg)) => assert!(msg.contains("your boat")),
            other => panic!("Expected InvalidContent, got {other:?}"),
        }
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(clean_song_content("[C]la\n"), Err(Error::InvalidContent(_))));
        assert!(clean_song_content("[C]la la la").is_ok());
    }

    #[test]
    fn test_byte_order_mark_is_trimmed() {
        let cleaned = clean_song_content("\u{FEFF}[Am]I was scared").unwrap();
        assert_eq!(cleaned, "[Am]I was scared");
    }
}
