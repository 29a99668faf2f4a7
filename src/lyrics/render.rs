//! Chord-over-lyric text layout.
//!
//! Each chord sits above the lyric block that follows it on the same line.
//! Columns are padded by display width so multi-byte lyrics stay aligned.

use unicode_width::UnicodeWidthStr;

use crate::constants::render::DEFAULT_COLUMN_GAP;
use crate::lyrics::chords::{chord_diagram, unique_chords};
use crate::lyrics::parser::{ContentBlock, ParsedLine, ParsedSong};

/// Layout options for [`render_song`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces between columns.
    pub column_gap: usize,
    /// Omit the chord row of lines that have no chords.
    pub compact: bool,
    /// Append diagrams of the song's chords.
    pub diagrams: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            column_gap: DEFAULT_COLUMN_GAP,
            compact: false,
            diagrams: true,
        }
    }
}

/// A chord paired with the lyric under it. Either side may be blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column<'a> {
    /// Chord shown on the top row.
    pub chord: Option<&'a str>,
    /// Lyric shown on the bottom row.
    pub lyric: Option<&'a str>,
}

impl Column<'_> {
    fn width(&self) -> usize {
        self.chord
            .map_or(0, UnicodeWidthStr::width)
            .max(self.lyric.map_or(0, UnicodeWidthStr::width))
    }
}

/// Pair each chord with the lyric block immediately after it.
pub fn columns(line: &ParsedLine) -> Vec<Column<'_>> {
    let blocks = line.blocks();
    let mut out = Vec::with_capacity(blocks.len());
    let mut i = 0;

    while i < blocks.len() {
        match &blocks[i] {
            ContentBlock::Chord(chord) => {
                let lyric = match blocks.get(i + 1) {
                    Some(next) if next.is_lyric() => {
                        i += 1;
                        Some(next.text())
                    }
                    _ => None,
                };
                out.push(Column { chord: Some(chord.as_str()), lyric });
            }
            ContentBlock::Lyric(text) | ContentBlock::Annotation(text) => {
                out.push(Column { chord: None, lyric: Some(text.as_str()) });
            }
        }
        i += 1;
    }

    out
}

/// Render one chord/lyric line into its chord row and lyric row.
fn render_columns(columns: &[Column<'_>], gap: usize) -> (String, String) {
    let separator = " ".repeat(gap);
    let mut top = Vec::with_capacity(columns.len());
    let mut bottom = Vec::with_capacity(columns.len());

    for column in columns {
        let width = column.width();
        top.push(pad(column.chord.unwrap_or_default(), width));
        bottom.push(pad(column.lyric.unwrap_or_default(), width));
    }

    (
        top.join(separator.as_str()).trim_end().to_string(),
        bottom.join(separator.as_str()).trim_end().to_string(),
    )
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

/// Lay out a parsed song as plain text.
pub fn render_song(song: &ParsedSong, options: &RenderOptions) -> String {
    let mut rows: Vec<String> = Vec::new();

    for line in song {
        if let Some(text) = line.annotation() {
            if !rows.is_empty() {
                rows.push(String::new());
            }
            rows.push(text.to_string());
            continue;
        }

        let (top, bottom) = render_columns(&columns(line), options.column_gap);
        if !(options.compact && top.is_empty()) {
            rows.push(top);
        }
        rows.push(bottom);
    }

    if options.diagrams {
        for chord in unique_chords(song) {
            if let Some(diagram) = chord_diagram(chord) {
                rows.push(String::new());
                rows.push(diagram);
            }
        }
    }

    let mut out = rows.join("\n");
    out.push('\n');
    out
}
