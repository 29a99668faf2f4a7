//! Song sheet processing.
//!
//! - `parser`: tokenizes ChordPro-like text into chord, lyric and annotation blocks
//! - `chords`: distinct chords of a song and ukulele chord diagrams
//! - `render`: chord-over-lyric plain text layout

pub mod chords;
pub mod parser;
pub mod render;

pub use chords::{chord_diagram, ukulele_shape, unique_chords, ChordShape};
pub use parser::{parse_song_content, BlockKind, ContentBlock, ParsedLine, ParsedSong};
pub use render::{render_song, RenderOptions};
