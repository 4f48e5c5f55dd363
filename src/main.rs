//! Strictly Chess - Unified CLI
//!
//! Runs chess matches through the turn state machine.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::{Path, PathBuf};
use strictly_chess::{
    FrameLoop, InputEvent, Match, MatchConfig, Overlay, PieceKind, StandardBoard,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            script,
            max_frames,
            position,
        } => run_play(config, script, max_frames, position),
        Command::Layout { config } => run_layout(config),
    }
}

/// Loads the given config, or discovers one in the working directory.
#[instrument]
fn load_config(path: Option<&Path>) -> Result<MatchConfig> {
    let config = match path {
        Some(path) => MatchConfig::from_file(path)?,
        None => MatchConfig::discover(".")?,
    };
    Ok(config)
}

/// Play a match.
#[instrument]
fn run_play(
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    max_frames: u64,
    position: Option<String>,
) -> Result<()> {
    let config = load_config(config.as_deref())?;

    let board = match position {
        Some(placement) => StandardBoard::from_placement(&placement)
            .with_context(|| format!("Invalid position '{}'", placement))?,
        None => StandardBoard::new(),
    };

    let frames: Vec<Vec<InputEvent>> = match script {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read script {}", path.display()))?;
            serde_json::from_str(&text).context("Failed to parse input script")?
        }
        None => Vec::new(),
    };

    let mut frame_loop = FrameLoop::new(Match::from_config(board, &config));
    info!(scripted = frames.len(), max_frames, "Running match");

    for events in &frames {
        frame_loop.tick(events);
    }
    let view = frame_loop.run_until_over(max_frames);

    let game = frame_loop.game();
    for line in game.log().moves() {
        println!("{}", line);
    }
    for line in game.log().console_lines() {
        println!("{}", line);
    }
    println!("{}", game.board().display());
    match view.overlay {
        Overlay::Board => println!("{} to move after {} turns", view.turn, view.move_count),
        Overlay::PromotionSelector => {
            let options: Vec<String> = PieceKind::PROMOTION_TARGETS
                .iter()
                .map(ToString::to_string)
                .collect();
            println!("{} to promote: {}", view.turn, options.join(", "));
        }
        Overlay::GameOver(outcome) => println!("{}", outcome),
    }
    Ok(())
}

/// Print click regions.
#[instrument]
fn run_layout(config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config.as_deref())?;
    let layout = config.layout();
    println!("board: {}", layout.board_rect());
    let selector = layout.selector();
    println!("promotion selector: {}", selector.rect());
    for kind in PieceKind::PROMOTION_TARGETS {
        if let Some(rect) = selector.option_rect(kind) {
            println!("  {}: {}", kind, rect);
        }
    }
    Ok(())
}
