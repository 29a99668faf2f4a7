//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Song sheet rendering constants.
pub mod render {
    /// Default spaces between chord/lyric columns.
    pub const DEFAULT_COLUMN_GAP: usize = 2;

    /// Largest column gap accepted from configuration.
    pub const MAX_COLUMN_GAP: usize = 16;
}

/// Chord diagram constants.
pub mod diagram {
    /// Strings on a ukulele, in G C E A order.
    pub const STRING_COUNT: usize = 4;

    /// Frets drawn in a diagram.
    pub const FRET_COUNT: u8 = 4;

    /// String names, low to high as drawn left to right.
    pub const STRING_NAMES: [&str; 4] = ["G", "C", "E", "A"];
}

/// Library constants.
pub mod library {
    /// Name given to a library created on demand for a new owner.
    pub const DEFAULT_LIBRARY_NAME: &str = "Library";

    /// Owner used when none is configured.
    pub const DEFAULT_OWNER: &str = "local";

    /// Extension of song files in a library directory.
    pub const SONG_EXTENSION: &str = "txt";

    /// Default library directory under the home directory.
    pub const DEFAULT_LIBRARY_DIR: &str = "Documents/CamelChords";

    /// Shortest accepted song text, in characters, after cleaning.
    pub const MIN_CONTENT_CHARS: usize = 10;
}

/// Search constants.
pub mod search {
    /// Maximum number of search results to display.
    pub const MAX_SEARCH_RESULTS: usize = 20;

    /// Minimum fuzzy score for a title match.
    pub const MIN_FUZZY_SCORE: i64 = 50;
}
