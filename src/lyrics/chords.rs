//! Chord enumeration and ukulele chord shapes.
//!
//! Shapes use standard GCEA tuning. Fret `0` is an open string; finger
//! labels are `1`-`4`, or empty when the string is open.

use std::collections::HashSet;

use crate::constants::diagram::{FRET_COUNT, STRING_COUNT, STRING_NAMES};
use crate::lyrics::parser::{ContentBlock, ParsedSong};

/// Fingering of one chord on a four-string ukulele.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordShape {
    /// Fret per string, G C E A.
    pub frets: [u8; STRING_COUNT],
    /// Finger label per string.
    pub fingers: [&'static str; STRING_COUNT],
}

const fn shape(frets: [u8; 4], fingers: [&'static str; 4]) -> ChordShape {
    ChordShape { frets, fingers }
}

/// Known ukulele chords. Sharp and flat spellings share a shape.
static UKULELE_CHORDS: &[(&str, ChordShape)] = &[
    // Major
    ("A", shape([2, 1, 0, 0], ["2", "1", "", ""])),
    ("B", shape([4, 3, 2, 2], ["4", "3", "2", "1"])),
    ("C", shape([0, 0, 0, 3], ["", "", "", "3"])),
    ("D", shape([2, 2, 2, 0], ["1", "2", "3", ""])),
    ("E", shape([1, 4, 0, 2], ["1", "4", "", "2"])),
    ("F", shape([2, 0, 1, 0], ["2", "", "1", ""])),
    ("G", shape([0, 2, 3, 2], ["", "1", "3", "2"])),
    ("A#", shape([3, 2, 1, 1], ["3", "2", "1", "1"])),
    ("Bb", shape([3, 2, 1, 1], ["3", "2", "1", "1"])),
    ("C#", shape([1, 1, 1, 4], ["1", "1", "1", "4"])),
    ("Db", shape([1, 1, 1, 4], ["1", "1", "1", "4"])),
    ("D#", shape([3, 3, 3, 1], ["3", "3", "3", "1"])),
    ("Eb", shape([3, 3, 3, 1], ["3", "3", "3", "1"])),
    ("F#", shape([3, 1, 2, 1], ["3", "1", "2", "1"])),
    ("Gb", shape([3, 1, 2, 1], ["3", "1", "2", "1"])),
    ("G#", shape([1, 3, 4, 3], ["1", "3", "4", "2"])),
    ("Ab", shape([1, 3, 4, 3], ["1", "3", "4", "2"])),
    // Minor
    ("Am", shape([2, 0, 0, 0], ["1", "", "", ""])),
    ("Bm", shape([4, 2, 2, 2], ["4", "1", "2", "3"])),
    ("Cm", shape([0, 3, 3, 3], ["", "1", "2", "3"])),
    ("Dm", shape([2, 2, 1, 0], ["2", "3", "1", ""])),
    ("Em", shape([0, 4, 3, 2], ["", "4", "3", "2"])),
    ("Fm", shape([1, 0, 1, 3], ["1", "", "2", "3"])),
    ("Gm", shape([0, 2, 3, 1], ["", "2", "3", "1"])),
    ("A#m", shape([3, 1, 1, 1], ["3", "1", "1", "1"])),
    ("Bbm", shape([3, 1, 1, 1], ["3", "1", "1", "1"])),
    ("C#m", shape([1, 2, 2, 4], ["1", "2", "2", "4"])),
    ("Dbm", shape([1, 2, 2, 4], ["1", "2", "2", "4"])),
    ("D#m", shape([3, 3, 2, 1], ["3", "4", "2", "1"])),
    ("Ebm", shape([3, 3, 2, 1], ["3", "4", "2", "1"])),
    ("F#m", shape([2, 1, 2, 0], ["2", "1", "3", ""])),
    ("Gbm", shape([2, 1, 2, 0], ["2", "1", "3", ""])),
    ("G#m", shape([1, 3, 4, 2], ["1", "3", "4", "2"])),
    ("Abm", shape([1, 3, 4, 2], ["1", "3", "4", "2"])),
    // Dominant 7th
    ("A7", shape([0, 1, 0, 0], ["", "1", "", ""])),
    ("B7", shape([2, 3, 2, 2], ["1", "4", "2", "3"])),
    ("C7", shape([0, 0, 0, 1], ["", "", "", "1"])),
    ("D7", shape([2, 2, 2, 3], ["1", "2", "3", "4"])),
    ("E7", shape([1, 2, 0, 2], ["1", "3", "", "2"])),
    ("F7", shape([2, 3, 1, 0], ["2", "4", "1", ""])),
    ("G7", shape([0, 2, 1, 2], ["", "2", "1", "3"])),
    ("A#7", shape([1, 2, 1, 1], ["1", "3", "2", "2"])),
    ("Bb7", shape([1, 2, 1, 1], ["1", "3", "2", "2"])),
    ("C#7", shape([1, 1, 1, 2], ["1", "1", "1", "2"])),
    ("Db7", shape([1, 1, 1, 2], ["1", "1", "1", "2"])),
    ("D#7", shape([1, 3, 1, 1], ["1", "3", "1", "1"])),
    ("Eb7", shape([1, 3, 1, 1], ["1", "3", "1", "1"])),
    ("F#7", shape([1, 1, 2, 1], ["1", "1", "3", "1"])),
    ("Gb7", shape([1, 1, 2, 1], ["1", "1", "3", "1"])),
    ("G#7", shape([1, 3, 2, 3], ["1", "3", "2", "4"])),
    ("Ab7", shape([1, 3, 2, 3], ["1", "3", "2", "4"])),
    // Minor 7th
    ("Am7", shape([0, 0, 0, 0], ["", "", "", ""])),
    ("Bm7", shape([2, 2, 2, 2], ["1", "1", "1", "1"])),
    ("Cm7", shape([0, 3, 3, 3], ["", "1", "1", "1"])),
    ("Dm7", shape([2, 2, 1, 3], ["2", "3", "1", "4"])),
    ("Em7", shape([0, 2, 0, 2], ["", "1", "", "3"])),
    ("Fm7", shape([1, 1, 1, 3], ["1", "1", "1", "3"])),
    ("Gm7", shape([0, 2, 1, 1], ["", "2", "1", "1"])),
];

/// Look up a ukulele shape by exact chord name.
pub fn ukulele_shape(name: &str) -> Option<&'static ChordShape> {
    UKULELE_CHORDS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, shape)| shape)
}

impl ChordShape {
    /// Draw the shape as a text diagram with the chord name underneath.
    ///
    /// ```text
    /// G C E A
    /// =======
    /// | | | |
    /// -------
    /// ```
    pub fn diagram(&self, name: &str) -> String {
        let width = STRING_COUNT * 2 - 1;
        let mut out = String::new();

        out.push_str(&STRING_NAMES.join(" "));
        out.push('\n');
        out.push_str(&"=".repeat(width));
        out.push('\n');

        for fret in 1..=FRET_COUNT {
            let row: Vec<&str> = self
                .frets
                .iter()
                .zip(self.fingers)
                .map(|(&f, finger)| match (f == fret, finger.is_empty()) {
                    (true, true) => "o",
                    (true, false) => finger,
                    (false, _) => "|",
                })
                .collect();
            out.push_str(&row.join(" "));
            out.push('\n');
            out.push_str(&"-".repeat(width));
            out.push('\n');
        }

        out.push_str(name);
        out
    }
}

/// Distinct chord names of a song, in order of first appearance.
pub fn unique_chords(song: &ParsedSong) -> Vec<&str> {
    let mut seen = HashSet::new();
    song.blocks()
        .filter(|block| block.is_chord())
        .map(ContentBlock::text)
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Diagram for a chord name, if its shape is known.
pub fn chord_diagram(name: &str) -> Option<String> {
    ukulele_shape(name).map(|shape| shape.diagram(name))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::lyrics::parser::parse_song_content;

    #[test]
    fn test_unique_chords_first_appearance_order() {
        let song = parse_song_content(Some(
            "(Verse)\n[G]One [C]two [G]three\n[D7]four [C]five",
        ))
        .unwrap();
        assert_eq!(unique_chords(&song), vec!["G", "C", "D7"]);
    }

    #[test]
    fn test_unique_chords_ignores_annotations() {
        let song = parse_song_content(Some("[C]\nla la")).unwrap();
        assert!(unique_chords(&song).is_empty());
    }

    #[test]
    fn test_shape_lookup() {
        let c = ukulele_shape("C").unwrap();
        assert_eq!(c.frets, [0, 0, 0, 3]);
        assert_eq!(ukulele_shape("Bb"), ukulele_shape("A#"));
        assert!(ukulele_shape("c").is_none());
        assert!(ukulele_shape("Cmaj9").is_none());
    }

    #[test]
    fn test_table_size() {
        assert_eq!(UKULELE_CHORDS.len(), 58);
    }

    #[test]
    fn test_c_diagram() {
        let diagram = chord_diagram("C").unwrap();
        let lines: Vec<&str> = diagram.lines().collect();
        assert_eq!(lines[0], "G C E A");
        assert_eq!(lines[1], "=======");
        assert_eq!(lines[2], "| | | |");
        assert_eq!(lines[6], "| | | 3");
        assert_eq!(lines.last(), Some(&"C"));
    }

    #[test]
    fn test_open_chord_diagram_has_no_fingers() {
        let diagram = chord_diagram("Am7").unwrap();
        let grid: Vec<&str> = diagram.lines().skip(2).take(8).collect();
        assert!(grid.iter().all(|row| !row.chars().any(|c| c.is_ascii_digit() || c == 'o')));
    }

    #[test]
    fn test_unknown_chord_has_no_diagram() {
        assert!(chord_diagram("H7").is_none());
    }
}
