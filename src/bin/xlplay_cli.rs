//! CLI tool for xlplay - validates dataset files and simulates playback
//!
//! Usage:
//!   xlplay_cli <input.{json,csv,tsv}>            # Dump validated dataset JSON
//!   xlplay_cli <input.{json,csv,tsv}> --simulate <frames>
//!                                                # Headless playback trace

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use xlplay::importer::{self, Delimiter};
use xlplay::player::SurfaceId;
use xlplay::types::Dataset;
use xlplay::XlPlay;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: xlplay_cli <input.{{json,csv,tsv}}> [--simulate <frames>]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let simulate_frames: Option<u32> = if args.len() > 3 && args[2] == "--simulate" {
        args[3].parse().ok()
    } else {
        None
    };

    // Read input file
    let data = match fs::read(input_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    // Decode dataset by extension
    let dataset = match decode(input_path, &data) {
        Ok(ds) => ds,
        Err(e) => {
            eprintln!("Error importing {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    match simulate_frames {
        Some(frames) => simulate(dataset, frames),
        None => {
            let json = match serde_json::to_string_pretty(&dataset) {
                Ok(j) => j,
                Err(e) => {
                    eprintln!("Error serializing JSON: {}", e);
                    std::process::exit(1);
                }
            };
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}

fn decode(path: &str, data: &[u8]) -> xlplay::error::Result<Dataset> {
    if path.ends_with(".tsv") {
        importer::from_delimited(path, data, Delimiter::Tab)
    } else if path.ends_with(".csv") {
        importer::from_delimited(path, data, Delimiter::Comma)
    } else {
        importer::from_json(path, &String::from_utf8_lossy(data))
    }
}

/// Run the playback engine headlessly and trace offsets to stdout.
fn simulate(dataset: Dataset, frames: u32) {
    const VIEWPORT_HEIGHT: f32 = 200.0;

    let mut play = XlPlay::new_headless();
    play.set_dataset(Some(dataset));
    play.play(VIEWPORT_HEIGHT);

    if !play
        .player()
        .surface(SurfaceId::Preview)
        .map(|s| s.engine().is_playing())
        .unwrap_or(false)
    {
        eprintln!("Dataset has no rows; nothing to play");
        std::process::exit(1);
    }

    for frame in 1..=frames {
        let offset = play.step(1);
        println!("frame {:>5}  offset {:>10.2}", frame, offset);
    }
}
