//! `CamelChords` - ukulele song sheets.
//!
//! Parses ChordPro-like song text into chord, lyric and annotation blocks,
//! lays songs out chord-over-lyric, draws ukulele chord diagrams and keeps
//! songs in owner-scoped libraries.


// Re-export public modules for use in integration tests and as a library
pub mod config;
pub mod constants;
pub mod error;
pub mod library;
pub mod lyrics;
pub mod services;
pub mod types;
