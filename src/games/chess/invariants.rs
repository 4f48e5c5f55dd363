//! Invariants of a running match.
//!
//! Checked after every cycle in debug builds.

use super::turn::Match;
use super::{Board, Side};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Invariant violated: {}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: White moves on even move counts, Black on odd.
///
/// The turn only flips together with a move-count increment.
pub struct TurnParityInvariant;

impl<B: Board> Invariant<Match<B>> for TurnParityInvariant {
    fn holds(game: &Match<B>) -> bool {
        let expected = if game.move_count() % 2 == 0 {
            Side::White
        } else {
            Side::Black
        };
        game.turn() == expected
    }

    fn description() -> &'static str {
        "Turn alternates with the move count (White on even)"
    }
}

/// Invariant: a pending promotion is the pawn the board reports for the
/// side to move.
pub struct PendingPromotionInvariant;

impl<B: Board> Invariant<Match<B>> for PendingPromotionInvariant {
    fn holds(game: &Match<B>) -> bool {
        match game.phase().pending_promotion() {
            Some(pawn) => game.board().promotions(game.turn()) == Some(pawn),
            None => true,
        }
    }

    fn description() -> &'static str {
        "Pending promotion belongs to the side to move"
    }
}

/// All match invariants as a composable set.
pub type MatchInvariants = (TurnParityInvariant, PendingPromotionInvariant);

/// Panics if any match invariant is violated.
pub fn assert_invariants<B: Board>(game: &Match<B>) {
    if let Err(violations) = MatchInvariants::check_all(game) {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        panic!("Match invariants violated: {}", descriptions);
    }
}
