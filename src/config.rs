//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::{library, render};
use crate::error::{Error, Result};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Directory of song `.txt` files
    pub library_path: Option<PathBuf>,
    /// Owner name recorded on libraries loaded from disk
    pub owner: String,
    /// Spaces between chord/lyric columns when rendering
    pub column_gap: usize,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            library_path: None,
            owner: library::DEFAULT_OWNER.to_string(),
            column_gap: render::DEFAULT_COLUMN_GAP,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        // Library path: env var override, or default ~/Documents/CamelChords/
        config.library_path = env::var("CAMELCHORDS_LIBRARY").ok().map_or_else(
            || {
                dirs::home_dir()
                    .map(|h| h.join(library::DEFAULT_LIBRARY_DIR))
                    .filter(|p| p.is_dir())
            },
            |path| Some(expand_path(&path)),
        );

        if let Ok(owner) = env::var("CAMELCHORDS_OWNER") {
            if !owner.trim().is_empty() {
                config.owner = owner.trim().to_string();
            }
        }

        if let Ok(gap) = env::var("CAMELCHORDS_COLUMN_GAP") {
            config.column_gap = parse_column_gap(&gap)?;
        }

        Ok(config)
    }

    /// Library directory, or a config error explaining how to set one
    pub fn require_library_path(&self) -> Result<&PathBuf> {
        self.library_path.as_ref().ok_or_else(|| {
            Error::config(
                "No song library directory found",
                "Set CAMELCHORDS_LIBRARY or create ~/Documents/CamelChords",
            )
        })
    }
}

/// Expand `~` in a user-supplied path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

/// Parse and bound-check a column gap value.
pub fn parse_column_gap(value: &str) -> Result<usize> {
    let gap = value.trim().parse::<usize>().map_err(|_| {
        Error::config(
            format!("Invalid column gap {value:?}"),
            "CAMELCHORDS_COLUMN_GAP must be a whole number",
        )
    })?;
    if gap > render::MAX_COLUMN_GAP {
        return Err(Error::config(
            format!("Column gap {gap} is too large"),
            "CAMELCHORDS_COLUMN_GAP must be 16 or less",
        ));
    }
    Ok(gap)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.app_name(), "camelchords");
        assert_eq!(config.owner, "local");
        assert_eq!(config.column_gap, 2);
        assert!(config.library_path.is_none());
    }

    #[test]
    fn test_parse_column_gap() {
        assert_eq!(parse_column_gap(" 4 ").unwrap(), 4);
        assert_eq!(parse_column_gap("0").unwrap(), 0);
        assert!(parse_column_gap("wide").is_err());
        assert!(parse_column_gap("99").is_err());
    }

    #[test]
    fn test_require_library_path_without_path() {
        let config = Config::default();
        match config.require_library_path() {
            Err(Error::Config { hint, .. }) => assert!(hint.contains("CAMELCHORDS_LIBRARY")),
            other => panic!("Expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_expand_path_plain() {
        assert_eq!(expand_path("/tmp/songs"), PathBuf::from("/tmp/songs"));
    }
}
