//! Search strategies for song titles.
//!
//! Strategies can be combined so exact title hits rank above fuzzy ones.

use std::collections::HashSet;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::constants::search::MIN_FUZZY_SCORE;
use crate::library::Song;

/// Trait for song search strategies.
pub trait SearchStrategy: Send + Sync {
    /// Find songs matching a query string.
    ///
    /// # Arguments
    /// * `query` - The search query (a full or partial title)
    /// * `songs` - The songs to search
    /// * `limit` - Maximum number of results to return
    ///
    /// # Returns
    /// Matching songs, most relevant first.
    fn find_matches<'a>(&self, query: &str, songs: &[&'a Song], limit: usize) -> Vec<&'a Song>;

    /// Get the name of this search strategy (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// Case-insensitive substring match in either direction.
#[derive(Debug, Default)]
pub struct ExactSearch;

impl SearchStrategy for ExactSearch {
    fn find_matches<'a>(&self, query: &str, songs: &[&'a Song], limit: usize) -> Vec<&'a Song> {
        let query_lower = query.trim().to_lowercase();
        if query_lower.is_empty() {
            return Vec::new();
        }

        songs
            .iter()
            .copied()
            .filter(|song| {
                let name_lower = song.name.to_lowercase();
                name_lower.contains(&query_lower) || query_lower.contains(&name_lower)
            })
            .take(limit)
            .collect()
    }

    fn name(&self) -> &'static str {
        "ExactSearch"
    }
}

/// Fuzzy string matching search strategy.
pub struct FuzzySearch {
    /// Minimum score threshold.
    pub min_score: i64,
}

impl Default for FuzzySearch {
    fn default() -> Self {
        Self { min_score: MIN_FUZZY_SCORE }
    }
}

impl SearchStrategy for FuzzySearch {
    fn find_matches<'a>(&self, query: &str, songs: &[&'a Song], limit: usize) -> Vec<&'a Song> {
        let matcher = SkimMatcherV2::default();
        let query_lower = query.to_lowercase();

        let mut scored: Vec<_> = songs
            .iter()
            .copied()
            .filter_map(|song| {
                let score = matcher
                    .fuzzy_match(&song.name.to_lowercase(), &query_lower)
                    .unwrap_or(0);
                (score >= self.min_score).then_some((song, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().take(limit).map(|(s, _)| s).collect()
    }

    fn name(&self) -> &'static str {
        "FuzzySearch"
    }
}

/// Composite search that tries multiple strategies.
pub struct CompositeSearch {
    strategies: Vec<Box<dyn SearchStrategy>>,
}

impl CompositeSearch {
    /// Create a new composite search with the given strategies.
    pub fn new(strategies: Vec<Box<dyn SearchStrategy>>) -> Self {
        Self { strategies }
    }

    /// Create with default strategies (exact + fuzzy).
    pub fn with_defaults() -> Self {
        Self::new(vec![Box::new(ExactSearch), Box::new(FuzzySearch::default())])
    }
}

impl SearchStrategy for CompositeSearch {
    fn find_matches<'a>(&self, query: &str, songs: &[&'a Song], limit: usize) -> Vec<&'a Song> {
        let mut results = Vec::new();
        let mut seen = HashSet::new();

        for strategy in &self.strategies {
            let found = strategy.find_matches(query, songs, limit);
            tracing::debug!("{} matched {} songs for {query:?}", strategy.name(), found.len());
            for song in found {
                if seen.insert(song.id) {
                    results.push(song);
                    if results.len() >= limit {
                        return results;
                    }
                }
            }
        }

        results
    }

    fn name(&self) -> &'static str {
        "CompositeSearch"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::library::{NewSong, SongLibrary};

    fn store(names: &[&str]) -> SongLibrary {
        let mut store = SongLibrary::new();
        for name in names {
            store.create_song("ana", NewSong::new(*name, "")).unwrap();
        }
        store
    }

    #[test]
    fn test_exact_search() {
        let store = store(&["Riptide", "Somewhere Over the Rainbow", "I'm Yours"]);
        let songs: Vec<&Song> = store.songs().collect();
        let results = ExactSearch.find_matches("rainbow", &songs, 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Somewhere Over the Rainbow");
        assert!(ExactSearch.find_matches("  ", &songs, 10).is_empty());
    }

    #[test]
    fn test_fuzzy_search() {
        let store = store(&["Riptide", "Hallelujah", "Stand By Me"]);
        let songs: Vec<&Song> = store.songs().collect();
        let results = FuzzySearch::default().find_matches("halelujah", &songs, 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Hallelujah");
    }

    #[test]
    fn test_composite_dedups_and_limits() {
        let store = store(&["Riptide", "Ripple", "Tide Is High"]);
        let songs: Vec<&Song> = store.songs().collect();
        let search = CompositeSearch::with_defaults();

        let results = search.find_matches("riptide", &songs, 10);
        assert_eq!(results[0].name, "Riptide");
        let ids: HashSet<_> = results.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), results.len());

        assert_eq!(search.find_matches("ri", &songs, 1).len(), 1);
    }
}
