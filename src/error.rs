//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.
//! The song parser itself is total and never produces these.

use thiserror::Error;

use crate::types::{LibraryId, SongId};

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Library directory error
    #[error("Library error: {0}")]
    Library(String),

    /// No song with this id
    #[error("Song not found: {0}")]
    SongNotFound(SongId),

    /// No library with this id
    #[error("Library not found: {0}")]
    LibraryNotFound(LibraryId),

    /// Song names are unique within a library
    #[error("Song name {name:?} already exists in library {library}. Please change it.")]
    DuplicateSong {
        /// The conflicting song name.
        name: String,
        /// Library that already holds a song with this name.
        library: LibraryId,
    },

    /// Song text rejected by the content check
    #[error("Invalid song content: {0}")]
    InvalidContent(String),

    /// The caller does not own the library the song lives in
    #[error("Unauthorized")]
    Unauthorized,

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a duplicate song error
    pub fn duplicate(name: impl Into<String>, library: LibraryId) -> Self {
        Self::DuplicateSong { name: name.into(), library }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Msg(format!("JSON error: {e}"))
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn duplicate_song_message_names_the_song() {
        let err = Error::duplicate("Riptide", LibraryId(2));
        let msg = err.to_string();
        assert!(msg.contains("Riptide"));
        assert!(msg.contains("library 2"));
    }

    #[test]
    fn config_error_includes_hint() {
        let err = Error::config("Bad column gap", "Set CAMELCHORDS_COLUMN_GAP to a small number");
        match err {
            Error::Config { hint, .. } => assert!(hint.contains("CAMELCHORDS_COLUMN_GAP")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn io_error_keeps_path() {
        let src = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::io(src, std::path::PathBuf::from("/songs/a.txt"));
        assert!(err.to_string().contains("/songs/a.txt"));
    }
}
