//! Debug tool to dump the parse tree of a song file.
//!
//! Usage:
//!   `cargo run --bin dump_song -- <song.txt>`
//!   `cargo run --bin dump_song -- <song.txt> --json`
//!
//! Shows every line and block the parser produced, for debugging songs
//! that render oddly.

// Development/debug binary - allow expect/unwrap for simpler error handling
#![allow(clippy::expect_used, clippy::unwrap_used)]

use camelchords::lyrics::{chord_diagram, parse_song_content, unique_chords, ParsedSong};
use std::env;
use std::path::Path;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <song.txt>", args[0]);
        eprintln!("       {} <song.txt> --json", args[0]);
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let song = load_song(path);

    if args.contains(&"--json".to_string()) {
        match serde_json::to_string_pretty(&song) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    } else {
        dump_song(path, &song);
    }
}

fn load_song(path: &Path) -> ParsedSong {
    let text = fs_err::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });

    parse_song_content(Some(&text)).unwrap_or_else(|| {
        eprintln!("{} is empty", path.display());
        std::process::exit(1);
    })
}

fn dump_song(path: &Path, song: &ParsedSong) {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    let name = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
    println!("║ Song: {name}");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    println!("📄 LINES ({} total)", song.len());
    for (i, line) in song.lines().iter().enumerate() {
        let is_last = i == song.len() - 1;
        let prefix = if is_last { "└" } else { "├" };
        let child_prefix = if is_last { " " } else { "│" };

        println!("{prefix}─ Line {i} ({} blocks)", line.len());
        for (j, block) in line.blocks().iter().enumerate() {
            let block_prefix = if j == line.len() - 1 { "└" } else { "├" };
            let kind = block.kind().name();
            println!("{child_prefix}  {block_prefix}─ {kind:<10} {:?}", block.text());
        }
    }
    println!();

    let chords = unique_chords(song);
    println!("🎸 CHORDS ({} distinct)", chords.len());
    for (i, chord) in chords.iter().enumerate() {
        let prefix = if i == chords.len() - 1 { "└" } else { "├" };
        let status = if chord_diagram(chord).is_some() { "diagram" } else { "no diagram" };
        println!("{prefix}─ {chord} ({status})");
    }
}
