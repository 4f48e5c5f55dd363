//! Machine players that pick moves without input.

use super::{Player, PlayerType};
use crate::games::chess::geometry::{Pixel, PromotionSelector};
use crate::games::chess::{Board, Cell, ChessMove, PieceKind, Side};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// How a machine player chooses among legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Strategy {
    /// First legal move in generation order.
    #[display("first")]
    First,
    /// Most valuable capture, else the first legal move.
    #[display("greedy")]
    Greedy,
    /// Uniformly random legal move.
    #[display("random")]
    Random,
}

/// A machine player. Decides within a single call.
#[derive(Debug)]
pub struct MachinePlayer {
    name: String,
    side: Side,
    strategy: Strategy,
    rng: StdRng,
}

impl MachinePlayer {
    /// Creates a machine player with an entropy-seeded generator.
    pub fn new(name: impl Into<String>, side: Side, strategy: Strategy) -> Self {
        Self::with_rng(name, side, strategy, StdRng::from_entropy())
    }

    /// Creates a machine player with a fixed seed, for reproducible games.
    pub fn seeded(name: impl Into<String>, side: Side, strategy: Strategy, seed: u64) -> Self {
        Self::with_rng(name, side, strategy, StdRng::seed_from_u64(seed))
    }

    fn with_rng(name: impl Into<String>, side: Side, strategy: Strategy, rng: StdRng) -> Self {
        Self {
            name: name.into(),
            side,
            strategy,
            rng,
        }
    }

    /// The strategy in use.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    fn choose(&mut self, moves: &[ChessMove]) -> Option<ChessMove> {
        match self.strategy {
            Strategy::First => moves.first().copied(),
            Strategy::Greedy => moves
                .iter()
                .filter_map(|mv| mv.captured.map(|kind| (kind.value(), mv)))
                // max_by_key keeps the last maximum; reverse so ties favour generation order.
                .rev()
                .max_by_key(|(value, _)| *value)
                .map(|(_, mv)| *mv)
                .or_else(|| moves.first().copied()),
            Strategy::Random => moves.choose(&mut self.rng).copied(),
        }
    }
}

impl Player for MachinePlayer {
    fn kind(&self) -> PlayerType {
        PlayerType::Machine
    }

    fn side(&self) -> Side {
        self.side
    }

    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, board), fields(player = %self.name, strategy = %self.strategy))]
    fn make_move(&mut self, board: &mut dyn Board, _cell: Option<Cell>) -> Option<ChessMove> {
        let moves = board.possible_moves(self.side);
        let mv = self.choose(&moves)?;
        debug!(mv = %mv, candidates = moves.len(), "Machine chose move");
        match board.apply_move(mv) {
            Ok(()) => Some(mv),
            Err(e) => {
                debug!(error = %e, "Board refused machine move");
                None
            }
        }
    }

    #[instrument(skip(self, board, _selector), fields(player = %self.name))]
    fn promote(
        &mut self,
        board: &mut dyn Board,
        pawn: Cell,
        _selector: &PromotionSelector,
        _pos: Option<Pixel>,
    ) -> bool {
        let kind = match self.strategy {
            Strategy::Random => PieceKind::PROMOTION_TARGETS
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(PieceKind::Queen),
            Strategy::First | Strategy::Greedy => PieceKind::Queen,
        };
        match board.promote(pawn, kind) {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "Board refused machine promotion");
                false
            }
        }
    }
}
