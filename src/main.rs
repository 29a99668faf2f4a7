//! `CamelChords` - ukulele song sheet tool.
//!
//! Usage:
//!   `camelchords <song.txt>`               render chords over lyrics
//!   `camelchords --json <song.txt>`        print the parsed song as JSON
//!   `camelchords --chords <song.txt>`      list the song's chords with diagrams
//!   `camelchords --check <song.txt>`       check the file and print it cleaned
//!   `camelchords --search <query> [dir]`   search a song library directory

use std::path::PathBuf;
use std::process::ExitCode;

use camelchords::config::{expand_path, parse_column_gap, Config};
use camelchords::constants::search::MAX_SEARCH_RESULTS;
use camelchords::error::{Error, Result};
use camelchords::library::{clean_song_content, Song, SongLibrary};
use camelchords::lyrics::{
    chord_diagram, parse_song_content, render_song, unique_chords, RenderOptions,
};
use camelchords::services::search::{CompositeSearch, SearchStrategy};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: camelchords [OPTIONS] <song.txt>
       camelchords --search <query> [library-dir]

Options:
  --json          Print the parsed song as JSON
  --chords        List the song's chords with diagrams
  --check         Check every line opens with a chord and print the cleaned text
  --compact       Skip chord rows on lines without chords
  --no-diagrams   Do not append chord diagrams
  --gap <N>       Spaces between chord columns
  --search <Q>    Search song titles in the library directory
  -h, --help      Show this help";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Render,
    Json,
    Chords,
    Check,
    Search(String),
    Help,
}

#[derive(Debug)]
struct Args {
    mode: Mode,
    path: Option<PathBuf>,
    compact: bool,
    diagrams: bool,
    gap: Option<usize>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args {
        mode: Mode::Render,
        path: None,
        compact: false,
        diagrams: true,
        gap: None,
    };
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => parsed.mode = Mode::Help,
            "--json" => parsed.mode = Mode::Json,
            "--chords" => parsed.mode = Mode::Chords,
            "--check" => parsed.mode = Mode::Check,
            "--compact" => parsed.compact = true,
            "--no-diagrams" => parsed.diagrams = false,
            "--gap" => {
                let value = args.next().ok_or("--gap needs a number")?;
                parsed.gap = Some(parse_column_gap(&value)?);
            }
            "--search" => {
                let query = args.next().ok_or("--search needs a query")?;
                parsed.mode = Mode::Search(query);
            }
            flag if flag.starts_with("--") => {
                return Err(Error::Msg(format!("Unknown option {flag}\n\n{USAGE}")));
            }
            path => {
                if parsed.path.is_some() {
                    return Err(Error::Msg(format!("Unexpected argument {path}\n\n{USAGE}")));
                }
                parsed.path = Some(expand_path(path));
            }
        }
    }

    Ok(parsed)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = Config::load()?;
    tracing::debug!("{} {}", config.app_name(), config.app_version());

    match &args.mode {
        Mode::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Mode::Search(query) => search(&config, &args, query),
        Mode::Check => {
            let path = args.path.as_ref().ok_or_else(|| Error::Msg(USAGE.to_string()))?;
            let content = fs_err::read_to_string(path)?;
            println!("{}", clean_song_content(&content)?);
            Ok(())
        }
        Mode::Render | Mode::Json | Mode::Chords => {
            let path = args.path.as_ref().ok_or_else(|| Error::Msg(USAGE.to_string()))?;
            let content = fs_err::read_to_string(path)?;
            print_song(&config, &args, &content)
        }
    }
}

fn print_song(config: &Config, args: &Args, content: &str) -> Result<()> {
    let Some(song) = parse_song_content(Some(content)) else {
        tracing::warn!("Song file is empty");
        return Ok(());
    };

    match args.mode {
        Mode::Json => println!("{}", serde_json::to_string_pretty(&song)?),
        Mode::Chords => {
            for chord in unique_chords(&song) {
                match chord_diagram(chord) {
                    Some(diagram) if args.diagrams => println!("{diagram}\n"),
                    Some(_) => println!("{chord}"),
                    None => println!("{chord} (no diagram)"),
                }
            }
        }
        _ => {
            let options = RenderOptions {
                column_gap: args.gap.unwrap_or(config.column_gap),
                compact: args.compact,
                diagrams: args.diagrams,
            };
            print!("{}", render_song(&song, &options));
        }
    }
    Ok(())
}

fn search(config: &Config, args: &Args, query: &str) -> Result<()> {
    let dir = match &args.path {
        Some(path) => path.clone(),
        None => config.require_library_path()?.clone(),
    };

    let mut store = SongLibrary::new();
    let library_id = store.load_dir(&dir, &config.owner)?;
    let songs: Vec<&Song> = store.songs_in(library_id).collect();

    let results =
        CompositeSearch::with_defaults().find_matches(query, &songs, MAX_SEARCH_RESULTS);
    if results.is_empty() {
        println!("No songs match {query:?}");
    }
    for song in results {
        let chords = song
            .parsed()
            .map(|parsed| unique_chords(&parsed).join(" "))
            .unwrap_or_default();
        println!("{:>3}. {}  [{chords}]", song.id.get(), song.name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(ToString::to_string))
    }

    #[test]
    fn test_default_is_render() {
        let parsed = args(&["song.txt"]).unwrap();
        assert_eq!(parsed.mode, Mode::Render);
        assert_eq!(parsed.path, Some(PathBuf::from("song.txt")));
        assert!(parsed.diagrams);
    }

    #[test]
    fn test_flags() {
        let parsed = args(&["--compact", "--no-diagrams", "--gap", "4", "song.txt"]).unwrap();
        assert!(parsed.compact);
        assert!(!parsed.diagrams);
        assert_eq!(parsed.gap, Some(4));
    }

    #[test]
    fn test_check_mode() {
        let parsed = args(&["--check", "song.txt"]).unwrap();
        assert_eq!(parsed.mode, Mode::Check);
        assert_eq!(parsed.path, Some(PathBuf::from("song.txt")));
    }

    #[test]
    fn test_search_mode() {
        let parsed = args(&["--search", "riptide"]).unwrap();
        assert_eq!(parsed.mode, Mode::Search("riptide".to_string()));
        assert!(parsed.path.is_none());
    }

    #[test]
    fn test_bad_arguments() {
        assert!(args(&["--gap"]).is_err());
        assert!(args(&["--gap", "x", "a.txt"]).is_err());
        assert!(args(&["--bogus"]).is_err());
        assert!(args(&["a.txt", "b.txt"]).is_err());
    }
}
