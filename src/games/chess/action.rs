//! First-class action types for chess.
//!
//! A move is a domain event: it records who moved what where, and it can
//! be validated against the board before it is applied.

use super::{Cell, Piece, PieceKind};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A completed (or proposed) move of one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChessMove {
    /// The piece being moved.
    pub piece: Piece,
    /// Origin square.
    pub from: Cell,
    /// Destination square.
    pub to: Cell,
    /// Piece captured on the destination square, if any.
    pub captured: Option<PieceKind>,
}

impl ChessMove {
    /// Creates a new move.
    #[instrument]
    pub fn new(piece: Piece, from: Cell, to: Cell, captured: Option<PieceKind>) -> Self {
        Self {
            piece,
            from,
            to,
            captured,
        }
    }

    /// Returns true if this move takes an opposing piece.
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl std::fmt::Display for ChessMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(
            f,
            "{}{}{}{}",
            self.piece.kind.letter(),
            self.from,
            sep,
            self.to
        )
    }
}

/// Error raised when the board refuses a mutation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// No piece stands on the origin square.
    #[display("No piece on {}", _0)]
    EmptySquare(Cell),

    /// The move is not in the legal move set.
    #[display("Illegal move {}", _0)]
    Illegal(ChessMove),

    /// The square does not hold a pawn awaiting promotion.
    #[display("No pawn awaiting promotion on {}", _0)]
    NoPromotion(Cell),

    /// The requested promotion piece is not allowed.
    #[display("Cannot promote to {}", _0)]
    InvalidPromotion(PieceKind),
}

impl std::error::Error for MoveError {}
