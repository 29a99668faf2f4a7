//! Core type definitions for compile-time safety.
//!
//! Newtype wrappers around numeric identifiers so song and library ids
//! cannot be mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Song identifier, unique across the whole library store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(pub u32);

impl SongId {
    /// Create a new `SongId`.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the inner numeric value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SongId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Library identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LibraryId(pub u32);

impl LibraryId {
    /// Create a new `LibraryId`.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for LibraryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for LibraryId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_ids_serialize_as_numbers() {
        assert_eq!(serde_json::to_string(&SongId(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&LibraryId(3)).unwrap(), "3");
    }

    #[test]
    fn test_display() {
        assert_eq!(SongId::new(5).to_string(), "5");
        assert_eq!(LibraryId::new(9).to_string(), "9");
    }
}
