//! Serato library dumper
//!
//! Reads the Serato library under a directory (default: the current one) and
//! prints every track and the crate tree.

mod config;
mod display;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use serato_core::{Library, LibraryLayout};

use config::{Config, Sections};

#[derive(Parser)]
#[command(name = "serato-print")]
#[command(about = "Print the tracks and crates of a Serato library")]
#[command(version)]
struct Cli {
    /// Library root containing the _Serato_ directory
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Print the library as JSON
    #[arg(long)]
    json: bool,

    /// Only print the track list
    #[arg(long, conflicts_with = "crates_only")]
    tracks_only: bool,

    /// Only print the crate tree
    #[arg(long)]
    crates_only: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            root: self.path,
            layout: LibraryLayout::default(),
            json: self.json,
            sections: Sections {
                tracks: !self.crates_only,
                crates: !self.tracks_only,
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays a clean dump
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.into_config();
    debug!("Config: {:?}", config);

    let library = Library::load_with_layout(&config.root, &config.layout)
        .with_context(|| format!("Failed to read Serato library at {:?}", config.root))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if config.json {
        serde_json::to_writer_pretty(&mut out, &library)?;
        writeln!(out)?;
    } else {
        display::write_library(&mut out, &library, config.sections)?;
    }
    out.flush()?;

    Ok(())
}
