mod action;
mod board;
mod frame_loop;
mod geometry;
mod input;
mod invariants;
mod log;
mod phases;
mod players;
pub mod rules;
mod turn;
mod types;

pub use action::{ChessMove, MoveError};
pub use board::{Board, KingStatus, StandardBoard};
pub use frame_loop::FrameLoop;
pub use geometry::{Layout, Pixel, PromotionSelector, Rect};
pub use input::{DEBUG_TOGGLE, InputEvent};
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, MatchInvariants, PendingPromotionInvariant,
    TurnParityInvariant, assert_invariants,
};
pub use log::MoveLog;
pub use phases::{FrameView, Outcome, Overlay, Phase};
pub use players::{HumanPlayer, MachinePlayer, Player, PlayerKind, PlayerType, Strategy};
pub use turn::{CycleReport, Match, Seats};
pub use types::{Cell, Piece, PieceKind, Side};
