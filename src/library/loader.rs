//! Load a library from a directory of song `.txt` files.
//!
//! Each file is one song named after its file stem. Subdirectories are
//! walked too; a stem seen twice keeps the first file in name order.

use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use walkdir::WalkDir;

use super::SongLibrary;
use crate::constants::library::{DEFAULT_LIBRARY_NAME, SONG_EXTENSION};
use crate::error::{Error, Result};
use crate::lyrics::{parse_song_content, ukulele_shape, unique_chords};
use crate::types::LibraryId;

/// A song file read from disk, not yet in the store.
struct SongFile {
    path: PathBuf,
    name: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SongLibrary {
    /// Read every song file under `dir` into a new library owned by `owner`.
    ///
    /// The library is named after the directory. Unreadable files are skipped.
    pub fn load_dir(&mut self, dir: &Path, owner: &str) -> Result<LibraryId> {
        if !dir.is_dir() {
            return Err(Error::Library(format!(
                "Library path does not exist or is not a directory: {}",
                dir.display()
            )));
        }

        let start = Instant::now();
        let files: Vec<SongFile> = WalkDir::new(dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == SONG_EXTENSION))
            .filter_map(|entry| match read_song_file(entry.path()) {
                Ok(file) => Some(file),
                Err(e) => {
                    tracing::warn!("Skipping {}: {e}", entry.path().display());
                    None
                }
            })
            .collect();

        report_missing_diagrams(&files);

        let name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(DEFAULT_LIBRARY_NAME);
        let library_id = self.create_library(owner, name);

        let mut loaded = 0usize;
        for file in files {
            let inserted = self.insert_song(
                library_id,
                file.name,
                file.content,
                file.created_at,
                file.updated_at,
            );
            match inserted {
                Ok(_) => loaded += 1,
                Err(e) => tracing::warn!("Skipping {}: {e}", file.path.display()),
            }
        }

        let elapsed = start.elapsed();
        tracing::info!("Loaded {loaded} songs from {} in {elapsed:?}", dir.display());
        Ok(library_id)
    }
}

fn read_song_file(path: &Path) -> Result<SongFile> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::Library(format!("No song name in {}", path.display())))?
        .to_string();

    let content = std::fs::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    let meta = fs_err::metadata(path)?;
    let updated_at = meta.modified().map_or_else(|_| Utc::now(), to_utc);
    let created_at = meta.created().map_or(updated_at, to_utc);

    Ok(SongFile {
        path: path.to_path_buf(),
        name,
        content,
        created_at,
        updated_at,
    })
}

fn to_utc(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}

/// Log, at debug level, songs that parse to nothing and songs using chords
/// without a ukulele diagram.
fn report_missing_diagrams(files: &[SongFile]) {
    let findings: Vec<(&str, Vec<String>)> = files
        .par_iter()
        .filter_map(|file| {
            let parsed = parse_song_content(Some(&file.content));
            let Some(song) = parsed.filter(|s| !s.is_empty()) else {
                tracing::debug!("Song {:?} has no content", file.name);
                return None;
            };
            let unknown: Vec<String> = unique_chords(&song)
                .into_iter()
                .filter(|chord| ukulele_shape(chord).is_none())
                .map(String::from)
                .collect();
            (!unknown.is_empty()).then_some((file.name.as_str(), unknown))
        })
        .collect();

    for (name, chords) in findings {
        tracing::debug!(
            "Song {name:?} uses chords without diagrams: {}",
            chords.join(", ")
        );
    }
}
