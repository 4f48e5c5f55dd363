//! Strictly Chess library - turn-based chess matches
//!
//! A match is a small state machine fed by batches of input events. Each
//! cycle it checks for checkmate or stalemate, lets the side to move act
//! (a human through clicks, a machine on its own), tracks pawn promotion
//! as a sub-state of the turn, and writes a numbered move ledger.
//!
//! # Architecture
//!
//! - **Board**: legality oracle ([`Board`]) with a standard implementation
//! - **Players**: human and machine move sources behind [`Player`]
//! - **Match**: the turn state machine ([`Match`]) and its [`Phase`]
//! - **Frame loop**: per-frame driver ([`FrameLoop`])
//! - **Config**: TOML match configuration ([`MatchConfig`])
//!
//! # Example
//!
//! ```
//! use strictly_chess::{FrameLoop, Match, MatchConfig, PlayerKind, StandardBoard};
//!
//! let config = MatchConfig::new(PlayerKind::First, PlayerKind::Greedy);
//! let mut frame_loop = FrameLoop::new(Match::from_config(StandardBoard::new(), &config));
//! frame_loop.run_until_over(4);
//! assert_eq!(frame_loop.game().move_count(), 4);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;

// Crate-level exports - Configuration
pub use config::{ConfigError, MatchConfig};

// Crate-level exports - Chess
pub use games::chess::{
    Board, Cell, ChessMove, CycleReport, DEBUG_TOGGLE, FrameLoop, FrameView, HumanPlayer,
    InputEvent, Invariant, InvariantSet, InvariantViolation, KingStatus, Layout, MachinePlayer,
    Match, MatchInvariants, MoveError, MoveLog, Outcome, Overlay, PendingPromotionInvariant,
    Phase, Piece, PieceKind, Pixel, Player, PlayerKind, PlayerType, PromotionSelector, Rect,
    Seats, Side, StandardBoard, Strategy, TurnParityInvariant, assert_invariants,
};

// Crate-level exports - Rules
pub use games::chess::rules;
