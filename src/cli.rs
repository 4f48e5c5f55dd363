//! Command-line interface for strictly_chess.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Chess - turn-based chess matches between humans and machines
#[derive(Parser, Debug)]
#[command(name = "strictly_chess")]
#[command(about = "Turn-based chess match engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match, feeding scripted input frames then idling machines
    Play {
        /// Path to the match configuration (TOML). Without it, match.toml in
        /// the working directory is used if present, otherwise human vs.
        /// human with the default layout
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// JSON file holding an array of frames, each an array of input events
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Frames to run after the script while waiting for machines
        #[arg(long, default_value = "500")]
        max_frames: u64,

        /// Starting position as a FEN piece placement field
        #[arg(long)]
        position: Option<String>,
    },

    /// Print the screen regions used for click routing
    Layout {
        /// Path to the match configuration (TOML), see `play`
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
