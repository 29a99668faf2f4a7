//! Song library store.
//!
//! Holds libraries and their songs in memory. Every library has an owner;
//! only the owner may change the songs in it. Song names are unique within
//! a library.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::library::DEFAULT_LIBRARY_NAME;
use crate::error::{Error, Result};
use crate::lyrics::{parse_song_content, ParsedSong};
use crate::types::{LibraryId, SongId};

mod loader;
mod validate;

pub use validate::clean_song_content;

/// A named collection of songs belonging to one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    /// Library id.
    pub id: LibraryId,
    /// Display name.
    pub name: String,
    /// Owner name.
    pub owner: String,
    /// When the library was created.
    pub created_at: DateTime<Utc>,
    /// Last change to the library itself.
    pub updated_at: DateTime<Utc>,
}

/// A song sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Song id.
    pub id: SongId,
    /// Title, unique within its library.
    pub name: String,
    /// Raw ChordPro-like text.
    pub content: String,
    /// Listed on the public song page.
    pub is_public: bool,
    /// When the song was created.
    pub created_at: DateTime<Utc>,
    /// Last edit.
    pub updated_at: DateTime<Utc>,
    /// Library holding the song.
    pub library_id: LibraryId,
}

impl Song {
    /// Parse the song's content.
    pub fn parsed(&self) -> Option<ParsedSong> {
        parse_song_content(Some(&self.content))
    }
}

/// Input for [`SongLibrary::create_song`].
#[derive(Debug, Clone, Default)]
pub struct NewSong {
    /// Title.
    pub name: String,
    /// Raw song text.
    pub content: String,
    /// Target library; the owner's default library when absent.
    pub library_id: Option<LibraryId>,
}

impl NewSong {
    /// A song for the owner's default library.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            library_id: None,
        }
    }

    /// Put the song in a specific library.
    #[must_use]
    pub fn in_library(mut self, library_id: LibraryId) -> Self {
        self.library_id = Some(library_id);
        self
    }
}

/// In-memory store of libraries and songs.
#[derive(Debug, Default)]
pub struct SongLibrary {
    libraries: BTreeMap<LibraryId, Library>,
    songs: BTreeMap<SongId, Song>,
    next_library_id: u32,
    next_song_id: u32,
}

impl SongLibrary {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a library for `owner`.
    pub fn create_library(&mut self, owner: &str, name: &str) -> LibraryId {
        self.next_library_id += 1;
        let id = LibraryId::new(self.next_library_id);
        let now = Utc::now();
        self.libraries.insert(
            id,
            Library {
                id,
                name: name.to_string(),
                owner: owner.to_string(),
                created_at: now,
                updated_at: now,
            },
        );
        tracing::debug!("Created library {id} ({name:?}) for {owner}");
        id
    }

    /// The owner's first library, created as `Library` if they have none.
    pub fn get_or_create_library(&mut self, owner: &str) -> LibraryId {
        let existing = self.libraries_of(owner).next().map(|l| l.id);
        match existing {
            Some(id) => id,
            None => self.create_library(owner, DEFAULT_LIBRARY_NAME),
        }
    }

    /// Rename a library.
    pub fn update_library(
        &mut self,
        owner: &str,
        id: LibraryId,
        name: impl Into<String>,
    ) -> Result<&Library> {
        self.owned_library(owner, id)?;
        let library = self.libraries.get_mut(&id).ok_or(Error::LibraryNotFound(id))?;
        library.name = name.into();
        library.updated_at = Utc::now();
        Ok(&*library)
    }

    /// Look up a library.
    pub fn library(&self, id: LibraryId) -> Option<&Library> {
        self.libraries.get(&id)
    }

    /// Libraries owned by `owner`, oldest first.
    pub fn libraries_of<'a>(&'a self, owner: &'a str) -> impl Iterator<Item = &'a Library> + 'a {
        self.libraries.values().filter(move |l| l.owner == owner)
    }

    /// Look up a song.
    pub fn song(&self, id: SongId) -> Option<&Song> {
        self.songs.get(&id)
    }

    /// Every song, in id order.
    pub fn songs(&self) -> impl Iterator<Item = &Song> {
        self.songs.values()
    }

    /// Songs in one library, in id order.
    pub fn songs_in(&self, library_id: LibraryId) -> impl Iterator<Item = &Song> {
        self.songs.values().filter(move |s| s.library_id == library_id)
    }

    /// Songs marked public, across all libraries.
    pub fn public_songs(&self) -> impl Iterator<Item = &Song> {
        self.songs.values().filter(|s| s.is_public)
    }

    /// Number of songs in the store.
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// True if the store holds no songs.
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Add a song on behalf of `owner`.
    ///
    /// Without a library id the song goes to the owner's default library.
    pub fn create_song(&mut self, owner: &str, new: NewSong) -> Result<&Song> {
        let library_id = match new.library_id {
            Some(id) => self.owned_library(owner, id)?,
            None => self.get_or_create_library(owner),
        };
        let now = Utc::now();
        let id = self.insert_song(library_id, new.name, new.content, now, now)?;
        self.song(id).ok_or(Error::SongNotFound(id))
    }

    /// Replace a song's name and content.
    pub fn update_song(
        &mut self,
        owner: &str,
        id: SongId,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<&Song> {
        let library_id = self.owning_library(owner, id)?;
        let name = name.into();
        if self.name_taken(library_id, &name, Some(id)) {
            return Err(Error::duplicate(name, library_id));
        }

        let song = self.songs.get_mut(&id).ok_or(Error::SongNotFound(id))?;
        song.name = name;
        song.content = content.into();
        song.updated_at = Utc::now();
        Ok(&*song)
    }

    /// Show or hide a song on the public page.
    pub fn set_public(&mut self, owner: &str, id: SongId, is_public: bool) -> Result<&Song> {
        self.owning_library(owner, id)?;
        let song = self.songs.get_mut(&id).ok_or(Error::SongNotFound(id))?;
        song.is_public = is_public;
        song.updated_at = Utc::now();
        Ok(&*song)
    }

    /// Remove a song, returning it.
    pub fn delete_song(&mut self, owner: &str, id: SongId) -> Result<Song> {
        self.owning_library(owner, id)?;
        self.songs.remove(&id).ok_or(Error::SongNotFound(id))
    }

    /// Remove a library and every song in it. Returns the number of songs removed.
    pub fn delete_library(&mut self, owner: &str, id: LibraryId) -> Result<usize> {
        self.owned_library(owner, id)?;
        self.libraries.remove(&id);
        let before = self.songs.len();
        self.songs.retain(|_, s| s.library_id != id);
        Ok(before - self.songs.len())
    }

    /// Insert a song with explicit timestamps after the duplicate-name check.
    fn insert_song(
        &mut self,
        library_id: LibraryId,
        name: String,
        content: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<SongId> {
        if !self.libraries.contains_key(&library_id) {
            return Err(Error::LibraryNotFound(library_id));
        }
        if self.name_taken(library_id, &name, None) {
            return Err(Error::duplicate(name, library_id));
        }

        self.next_song_id += 1;
        let id = SongId::new(self.next_song_id);
        self.songs.insert(
            id,
            Song {
                id,
                name,
                content,
                is_public: false,
                created_at,
                updated_at,
                library_id,
            },
        );
        Ok(id)
    }

    fn name_taken(&self, library_id: LibraryId, name: &str, except: Option<SongId>) -> bool {
        self.songs_in(library_id)
            .any(|s| s.name == name && Some(s.id) != except)
    }

    /// Check `owner` owns library `id`.
    fn owned_library(&self, owner: &str, id: LibraryId) -> Result<LibraryId> {
        let library = self.library(id).ok_or(Error::LibraryNotFound(id))?;
        if library.owner != owner {
            return Err(Error::Unauthorized);
        }
        Ok(id)
    }

    /// Check `owner` owns the library song `id` lives in.
    fn owning_library(&self, owner: &str, id: SongId) -> Result<LibraryId> {
        let song = self.song(id).ok_or(Error::SongNotFound(id))?;
        self.owned_library(owner, song.library_id)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_default_library_created_once() {
        let mut store = SongLibrary::new();
        let first = store.get_or_create_library("ana");
        let second = store.get_or_create_library("ana");
        assert_eq!(first, second);
        assert_eq!(store.library(first).unwrap().name, "Library");
        assert_ne!(store.get_or_create_library("ben"), first);
    }

    #[test]
    fn test_create_song_in_default_library() {
        let mut store = SongLibrary::new();
        let song = store.create_song("ana", NewSong::new("Riptide", "[Am]I was scared")).unwrap();
        assert_eq!(song.name, "Riptide");
        assert!(!song.is_public);
        let library_id = song.library_id;
        assert_eq!(store.library(library_id).unwrap().owner, "ana");
        assert_eq!(store.songs_in(library_id).count(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected_within_library() {
        let mut store = SongLibrary::new();
        store.create_song("ana", NewSong::new("Riptide", "a")).unwrap();
        match store.create_song("ana", NewSong::new("Riptide", "b")) {
            Err(Error::DuplicateSong { name, .. }) => assert_eq!(name, "Riptide"),
            other => panic!("Expected DuplicateSong, got {other:?}"),
        }
    }

    #[test]
    fn test_same_name_allowed_in_other_library() {
        let mut store = SongLibrary::new();
        store.create_song("ana", NewSong::new("Riptide", "a")).unwrap();
        let other = store.create_library("ana", "Campfire");
        let song = store
            .create_song("ana", NewSong::new("Riptide", "b").in_library(other))
            .unwrap();
        assert_eq!(song.library_id, other);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_create_in_unknown_or_foreign_library() {
        let mut store = SongLibrary::new();
        assert!(matches!(
            store.create_song("ana", NewSong::new("x", "y").in_library(LibraryId(99))),
            Err(Error::LibraryNotFound(LibraryId(99)))
        ));
        let bens = store.get_or_create_library("ben");
        assert!(matches!(
            store.create_song("ana", NewSong::new("x", "y").in_library(bens)),
            Err(Error::Unauthorized)
        ));
    }

    #[test]
    fn test_update_song() {
        let mut store = SongLibrary::new();
        let id = store.create_song("ana", NewSong::new("Draft", "la")).unwrap().id;
        let song = store.update_song("ana", id, "Final", "[C]la").unwrap();
        assert_eq!(song.name, "Final");
        assert_eq!(song.content, "[C]la");
        assert!(song.updated_at >= song.created_at);
    }

    #[test]
    fn test_update_rules() {
        let mut store = SongLibrary::new();
        let a = store.create_song("ana", NewSong::new("A", "")).unwrap().id;
        store.create_song("ana", NewSong::new("B", "")).unwrap();

        assert!(matches!(store.update_song("ben", a, "A", ""), Err(Error::Unauthorized)));
        assert!(matches!(
            store.update_song("ana", SongId(404), "A", ""),
            Err(Error::SongNotFound(SongId(404)))
        ));
        assert!(matches!(
            store.update_song("ana", a, "B", ""),
            Err(Error::DuplicateSong { .. })
        ));
        // Keeping its own name is fine
        assert!(store.update_song("ana", a, "A", "new").is_ok());
    }

    #[test]
    fn test_update_library() {
        let mut store = SongLibrary::new();
        let id = store.get_or_create_library("ana");
        let library = store.update_library("ana", id, "Campfire").unwrap();
        assert_eq!(library.name, "Campfire");
        assert!(library.updated_at >= library.created_at);
        assert_eq!(store.libraries_of("ana").count(), 1);
    }

    #[test]
    fn test_update_library_rules() {
        let mut store = SongLibrary::new();
        let id = store.get_or_create_library("ana");
        assert!(matches!(store.update_library("ben", id, "Mine"), Err(Error::Unauthorized)));
        assert!(matches!(
            store.update_library("ana", LibraryId(404), "Gone"),
            Err(Error::LibraryNotFound(LibraryId(404)))
        ));
        assert_eq!(store.library(id).unwrap().name, "Library");
    }

    #[test]
    fn test_public_songs() {
        let mut store = SongLibrary::new();
        let a = store.create_song("ana", NewSong::new("A", "")).unwrap().id;
        store.create_song("ana", NewSong::new("B", "")).unwrap();
        store.set_public("ana", a, true).unwrap();
        let public: Vec<_> = store.public_songs().map(|s| s.id).collect();
        assert_eq!(public, vec![a]);
        assert!(store.set_public("ben", a, false).is_err());
    }

    #[test]
    fn test_delete_song_and_library() {
        let mut store = SongLibrary::new();
        let a = store.create_song("ana", NewSong::new("A", "")).unwrap();
        let (a, library) = (a.id, a.library_id);
        store.create_song("ana", NewSong::new("B", "")).unwrap();

        assert!(store.delete_song("ben", a).is_err());
        assert_eq!(store.delete_song("ana", a).unwrap().name, "A");
        assert!(store.song(a).is_none());

        assert!(matches!(store.delete_library("ben", library), Err(Error::Unauthorized)));
        assert_eq!(store.delete_library("ana", library).unwrap(), 1);
        assert!(store.is_empty());
        assert!(store.library(library).is_none());
    }

    #[test]
    fn test_song_parsed() {
        let mut store = SongLibrary::new();
        let song = store
            .create_song("ana", NewSong::new("Row", "(Verse)\n[C]Row row"))
            .unwrap();
        assert_eq!(song.parsed().unwrap().len(), 2);
    }
}
