//! Song content parser.
//!
//! Turns ChordPro-like song text into lines of typed blocks. Chords are
//! written inline in square brackets before the syllable they apply to,
//! and section labels sit on their own line wrapped in `[]`, `()` or `{}`:
//!
//! ```text
//! (Verse 1)
//! [C]Twinkle twinkle [F]little star
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Regex matching an inline `[chord]` token.
#[allow(clippy::expect_used)]
static RE_CHORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[^\]]+\]").expect("valid regex: RE_CHORD")
});

/// Delimiters that turn a whole line into an annotation, with the opening
/// character that must not appear inside them.
const ANNOTATION_DELIMITERS: [(char, char, char); 3] = [
    ('[', ']', '['),
    ('(', ')', '['),
    ('{', '}', '{'),
];

/// Kind of a [`ContentBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// A chord name, e.g. `Am7`.
    Chord,
    /// Sung text.
    Lyric,
    /// A whole-line label such as a section marker.
    Annotation,
}

impl BlockKind {
    /// Lowercase name, as used in the JSON form.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Chord => "chord",
            Self::Lyric => "lyric",
            Self::Annotation => "annotation",
        }
    }
}

/// The atomic classified unit of a parsed line.
///
/// Serializes as `{"type": "chord", "content": "C"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum ContentBlock {
    /// Chord name with brackets stripped.
    Chord(String),
    /// Trimmed lyric text.
    Lyric(String),
    /// Annotation text with its delimiters stripped.
    Annotation(String),
}

impl ContentBlock {
    /// The block's kind.
    pub const fn kind(&self) -> BlockKind {
        match self {
            Self::Chord(_) => BlockKind::Chord,
            Self::Lyric(_) => BlockKind::Lyric,
            Self::Annotation(_) => BlockKind::Annotation,
        }
    }

    /// The extracted text.
    pub fn text(&self) -> &str {
        match self {
            Self::Chord(t) | Self::Lyric(t) | Self::Annotation(t) => t,
        }
    }

    /// True for chord blocks.
    pub const fn is_chord(&self) -> bool {
        matches!(self, Self::Chord(_))
    }

    /// True for lyric blocks.
    pub const fn is_lyric(&self) -> bool {
        matches!(self, Self::Lyric(_))
    }
}

/// One visual line of a song.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParsedLine {
    blocks: Vec<ContentBlock>,
}

impl ParsedLine {
    /// Build a line from blocks.
    pub const fn new(blocks: Vec<ContentBlock>) -> Self {
        Self { blocks }
    }

    /// Blocks in source order.
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True if the line has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The annotation text if this is a whole-line annotation.
    pub fn annotation(&self) -> Option<&str> {
        match self.blocks.as_slice() {
            [ContentBlock::Annotation(text)] => Some(text),
            _ => None,
        }
    }

    /// Iterate the blocks.
    pub fn iter(&self) -> std::slice::Iter<'_, ContentBlock> {
        self.blocks.iter()
    }
}

impl<'a> IntoIterator for &'a ParsedLine {
    type Item = &'a ContentBlock;
    type IntoIter = std::slice::Iter<'a, ContentBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// A whole parsed song: one line per non-blank input line, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParsedSong {
    lines: Vec<ParsedLine>,
}

impl ParsedSong {
    /// Build a song from lines.
    pub const fn new(lines: Vec<ParsedLine>) -> Self {
        Self { lines }
    }

    /// Lines in source order.
    pub fn lines(&self) -> &[ParsedLine] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True if no line survived parsing.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate the lines.
    pub fn iter(&self) -> std::slice::Iter<'_, ParsedLine> {
        self.lines.iter()
    }

    /// Every block of every line, in order.
    pub fn blocks(&self) -> impl Iterator<Item = &ContentBlock> {
        self.lines.iter().flat_map(ParsedLine::iter)
    }
}

impl<'a> IntoIterator for &'a ParsedSong {
    type Item = &'a ParsedLine;
    type IntoIter = std::slice::Iter<'a, ParsedLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Parse song text into lines of chord, lyric and annotation blocks.
///
/// Returns `None` when there is no content at all (absent or empty input),
/// which callers treat as "render nothing". Never fails: malformed brackets
/// are kept as lyric text.
pub fn parse_song_content(song: Option<&str>) -> Option<ParsedSong> {
    let song = song.filter(|s| !s.is_empty())?;

    let lines = song
        .split('\n')
        .map(trim_text)
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect();

    Some(ParsedSong::new(lines))
}

/// Trim whitespace and byte order marks.
fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Classify and tokenize one trimmed, non-empty line.
fn parse_line(line: &str) -> ParsedLine {
    if let Some(text) = annotation_text(line) {
        return ParsedLine::new(vec![ContentBlock::Annotation(text.to_string())]);
    }
    ParsedLine::new(tokenize_chords_and_lyrics(line))
}

/// Inner text if the line is wrapped whole in an annotation delimiter pair.
///
/// `[C]` on its own line qualifies; `[C][F]` does not because of the nested `[`.
fn annotation_text(line: &str) -> Option<&str> {
    ANNOTATION_DELIMITERS.iter().find_map(|&(open, close, nested)| {
        let inner = line.strip_prefix(open)?.strip_suffix(close)?;
        (!inner.contains(nested) && !trim_text(inner).is_empty()).then_some(inner)
    })
}

/// Split a line around `[chord]` tokens, dropping empty segments.
fn tokenize_chords_and_lyrics(line: &str) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    let mut last = 0;

    for token in RE_CHORD.find_iter(line) {
        push_segment(&mut blocks, &line[last..token.start()]);
        push_segment(&mut blocks, token.as_str());
        last = token.end();
    }
    push_segment(&mut blocks, &line[last..]);

    blocks
}

/// Classify one trimmed segment. Anything wrapped in `[...]` is a chord,
/// kept with its inner spacing; blank chords and lyrics are dropped.
fn push_segment(blocks: &mut Vec<ContentBlock>, segment: &str) {
    let part = trim_text(segment);
    let block = match part.strip_prefix('[').and_then(|p| p.strip_suffix(']')) {
        Some(inner) => {
            (!trim_text(inner).is_empty()).then(|| ContentBlock::Chord(inner.to_string()))
        }
        None => (!part.is_empty()).then(|| ContentBlock::Lyric(part.to_string())),
    };
    blocks.extend(block);
}
