//! Human player driven by board clicks.

use super::{Player, PlayerType};
use crate::games::chess::geometry::{Pixel, PromotionSelector};
use crate::games::chess::{Board, Cell, ChessMove, Side};
use tracing::{debug, instrument};

/// Human player using two-click move entry: pick a piece, then a target.
#[derive(Debug, Clone)]
pub struct HumanPlayer {
    name: String,
    side: Side,
    selected: Option<Cell>,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, side: Side) -> Self {
        Self {
            name: name.into(),
            side,
            selected: None,
        }
    }

    /// The currently selected piece, waiting for a destination click.
    pub fn selected(&self) -> Option<Cell> {
        self.selected
    }

    fn owns(&self, board: &dyn Board, cell: Cell) -> bool {
        board.piece_at(cell).is_some_and(|p| p.side == self.side)
    }
}

impl Player for HumanPlayer {
    fn kind(&self) -> PlayerType {
        PlayerType::Human
    }

    fn side(&self) -> Side {
        self.side
    }

    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, board), fields(player = %self.name, selected = ?self.selected))]
    fn make_move(&mut self, board: &mut dyn Board, cell: Option<Cell>) -> Option<ChessMove> {
        let cell = cell?;

        let Some(from) = self.selected else {
            if self.owns(board, cell) {
                debug!(%cell, "Piece selected");
                self.selected = Some(cell);
            }
            return None;
        };

        let candidate = board
            .possible_moves(self.side)
            .into_iter()
            .find(|mv| mv.from == from && mv.to == cell);

        match candidate {
            Some(mv) => {
                self.selected = None;
                match board.apply_move(mv) {
                    Ok(()) => Some(mv),
                    Err(e) => {
                        debug!(error = %e, "Board refused move");
                        None
                    }
                }
            }
            None if self.owns(board, cell) => {
                debug!(%cell, "Selection changed");
                self.selected = Some(cell);
                None
            }
            None => {
                debug!(%cell, "Destination not reachable, selection cleared");
                self.selected = None;
                None
            }
        }
    }

    #[instrument(skip(self, board, selector), fields(player = %self.name))]
    fn promote(
        &mut self,
        board: &mut dyn Board,
        pawn: Cell,
        selector: &PromotionSelector,
        pos: Option<Pixel>,
    ) -> bool {
        let Some(kind) = pos.and_then(|p| selector.option_at(p)) else {
            debug!("Click outside promotion options");
            return false;
        };
        match board.promote(pawn, kind) {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "Board refused promotion");
                false
            }
        }
    }
}
