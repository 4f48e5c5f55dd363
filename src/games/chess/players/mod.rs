//! Player trait and implementations.

mod human;
mod kind;
mod machine;

pub use human::HumanPlayer;
pub use kind::PlayerKind;
pub use machine::{MachinePlayer, Strategy};

use super::geometry::{Pixel, PromotionSelector};
use super::{Board, Cell, ChessMove, Side};
use serde::{Deserialize, Serialize};

/// How a player produces actions.
///
/// Humans act only when a click lands in the region of the eligible
/// action; machines act as soon as it is their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum PlayerType {
    /// Acts on translated pointer clicks.
    #[display("human")]
    Human,
    /// Acts unconditionally when it is its turn.
    #[display("machine")]
    Machine,
}

/// Trait for players that can move and promote.
pub trait Player {
    /// Whether this player needs clicks to act.
    fn kind(&self) -> PlayerType;

    /// The side this player controls.
    fn side(&self) -> Side;

    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// Attempts a move. `cell` is the clicked board cell for humans and
    /// `None` for machines. Returns the move once one was played.
    fn make_move(&mut self, board: &mut dyn Board, cell: Option<Cell>) -> Option<ChessMove>;

    /// Attempts to promote the pawn on `pawn`. `pos` is the click inside
    /// the selector for humans and `None` for machines. Returns true once
    /// the pawn was replaced.
    fn promote(
        &mut self,
        board: &mut dyn Board,
        pawn: Cell,
        selector: &PromotionSelector,
        pos: Option<Pixel>,
    ) -> bool;
}
