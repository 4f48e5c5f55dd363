//! Match phases and the views derived from them.

use super::{Cell, Side};
use serde::{Deserialize, Serialize};

/// Phase of a match.
///
/// A pending promotion lives inside [`Phase::Promoting`], so a match can
/// never be promoting without a pawn, nor promoting after it has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Normal turn-taking.
    Idle,
    /// The side to move must pick a piece for the pawn on `pawn`.
    Promoting {
        /// Square of the pawn awaiting promotion.
        pawn: Cell,
    },
    /// Terminal: no further transitions.
    GameOver(Outcome),
}

impl Phase {
    /// Returns true while a promotion is pending.
    pub fn is_promoting(&self) -> bool {
        matches!(self, Phase::Promoting { .. })
    }

    /// Returns true once the match has ended.
    pub fn is_game_over(&self) -> bool {
        matches!(self, Phase::GameOver(_))
    }

    /// The pawn awaiting promotion, if any.
    pub fn pending_promotion(&self) -> Option<Cell> {
        match self {
            Phase::Promoting { pawn } => Some(*pawn),
            _ => None,
        }
    }

    /// The outcome, once the match has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Phase::GameOver(outcome) => Some(*outcome),
            _ => None,
        }
    }
}

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The side to move was checked with no legal moves.
    Checkmate {
        /// The side that delivered mate.
        winner: Side,
    },
    /// The side to move was not checked but had no legal moves.
    Stalemate,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::Checkmate { winner } => Some(*winner),
            Outcome::Stalemate => None,
        }
    }

    /// Returns true if the game was drawn.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Stalemate)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "Checkmate, {} wins", winner),
            Outcome::Stalemate => write!(f, "Stalemate, draw"),
        }
    }
}

/// Overlay the renderer should draw on top of the board this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overlay {
    /// Plain board.
    Board,
    /// Promotion selector for a human side.
    PromotionSelector,
    /// Game-over panel.
    GameOver(Outcome),
}

/// Everything the renderer needs to know for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameView {
    /// Overlay to draw.
    pub overlay: Overlay,
    /// Whether the debug grid is on.
    pub debug_grid: bool,
    /// Side to move.
    pub turn: Side,
    /// Completed turns so far.
    pub move_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_views() {
        let pawn = Cell::parse("b8").unwrap();
        let promoting = Phase::Promoting { pawn };
        assert!(promoting.is_promoting());
        assert!(!promoting.is_game_over());
        assert_eq!(promoting.pending_promotion(), Some(pawn));

        let over = Phase::GameOver(Outcome::Stalemate);
        assert!(over.is_game_over());
        assert_eq!(over.pending_promotion(), None);
        assert_eq!(Phase::Idle.outcome(), None);
    }

    #[test]
    fn test_outcome_display() {
        let mate = Outcome::Checkmate { winner: Side::Black };
        assert_eq!(mate.to_string(), "Checkmate, black wins");
        assert_eq!(mate.winner(), Some(Side::Black));
        assert!(Outcome::Stalemate.is_draw());
    }
}
