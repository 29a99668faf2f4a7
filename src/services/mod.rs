//! Service modules built on top of the song library.

pub mod search;
