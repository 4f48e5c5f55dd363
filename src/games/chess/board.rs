//! The board contract consumed by the turn state machine, and the
//! standard 8x8 implementation.

use super::action::{ChessMove, MoveError};
use super::rules::{self, Squares};
use super::{Cell, Piece, PieceKind, Side};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Where a king stands and whether it is attacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KingStatus {
    /// Square the king occupies.
    pub cell: Cell,
    /// Whether the king is in check.
    pub is_checked: bool,
}

/// Legality oracle and mutable position.
///
/// The turn state machine only queries it; players mutate it through
/// [`Board::apply_move`] and [`Board::promote`]. Every query must reflect
/// the most recent mutation.
pub trait Board {
    /// Legal moves for `side`. Empty means `side` cannot move.
    fn possible_moves(&self, side: Side) -> Vec<ChessMove>;

    /// Whether the king of `side` is attacked.
    fn is_king_checked(&self, side: Side) -> bool;

    /// The king of `side`, with a check flag consistent with
    /// [`Board::is_king_checked`].
    fn king(&self, side: Side) -> Option<KingStatus>;

    /// A pawn of `side` standing on its far rank, waiting to promote.
    fn promotions(&self, side: Side) -> Option<Cell>;

    /// The piece on `cell`, if any.
    fn piece_at(&self, cell: Cell) -> Option<Piece>;

    /// Plays a legal move.
    fn apply_move(&mut self, mv: ChessMove) -> Result<(), MoveError>;

    /// Replaces the pawn on `cell` with a piece of `kind`.
    fn promote(&mut self, cell: Cell, kind: PieceKind) -> Result<(), MoveError>;
}

/// Standard chess board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardBoard {
    squares: Squares,
}

impl StandardBoard {
    /// Standard starting position.
    pub const START: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    /// Creates a board in the starting position.
    #[instrument]
    pub fn new() -> Self {
        let mut squares: Squares = [None; 64];
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, kind) in back.into_iter().enumerate() {
            squares[file] = Some(Piece::new(Side::White, kind));
            squares[8 + file] = Some(Piece::new(Side::White, PieceKind::Pawn));
            squares[48 + file] = Some(Piece::new(Side::Black, PieceKind::Pawn));
            squares[56 + file] = Some(Piece::new(Side::Black, kind));
        }
        Self { squares }
    }

    /// Creates an empty board.
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    /// Parses the piece placement field of a FEN string
    /// (ranks 8 to 1, separated by `/`).
    #[instrument]
    pub fn from_placement(placement: &str) -> Option<Self> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return None;
        }
        let mut board = Self::empty();
        for (row, text) in ranks.iter().enumerate() {
            let rank = 7 - row as u8;
            let mut file = 0u8;
            for c in text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file = file.saturating_add(skip as u8);
                    continue;
                }
                let cell = Cell::new(file, rank)?;
                board.squares[cell.index()] = Some(Piece::from_fen(c)?);
                file += 1;
            }
            if file != 8 {
                return None;
            }
        }
        Some(board)
    }

    /// Renders the piece placement field of FEN.
    pub fn placement(&self) -> String {
        let mut out = String::new();
        for rank in (0..8u8).rev() {
            let mut gap = 0;
            for file in 0..8u8 {
                match Cell::new(file, rank).and_then(|c| self.squares[c.index()]) {
                    Some(piece) => {
                        if gap > 0 {
                            out.push_str(&gap.to_string());
                            gap = 0;
                        }
                        out.push(piece.fen());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                out.push_str(&gap.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }

    /// Puts `piece` on `cell` (or clears it).
    pub fn set(&mut self, cell: Cell, piece: Option<Piece>) {
        self.squares[cell.index()] = piece;
    }

    /// Formats the board as a human-readable string, rank 8 first.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for rank in (0..8u8).rev() {
            result.push_str(&format!("{} ", rank + 1));
            for file in 0..8u8 {
                let symbol = Cell::new(file, rank)
                    .and_then(|c| self.squares[c.index()])
                    .map(Piece::fen)
                    .unwrap_or('.');
                result.push(symbol);
            }
            result.push('\n');
        }
        result.push_str("  abcdefgh");
        result
    }
}

impl Default for StandardBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for StandardBoard {
    #[instrument(skip(self))]
    fn possible_moves(&self, side: Side) -> Vec<ChessMove> {
        rules::legal_moves(&self.squares, side)
    }

    #[instrument(skip(self))]
    fn is_king_checked(&self, side: Side) -> bool {
        rules::is_king_checked(&self.squares, side)
    }

    #[instrument(skip(self))]
    fn king(&self, side: Side) -> Option<KingStatus> {
        rules::king_cell(&self.squares, side).map(|cell| KingStatus {
            cell,
            is_checked: rules::is_attacked(&self.squares, cell, side.opponent()),
        })
    }

    #[instrument(skip(self))]
    fn promotions(&self, side: Side) -> Option<Cell> {
        (0..8u8)
            .filter_map(|file| Cell::new(file, side.promotion_rank()))
            .find(|cell| {
                self.squares[cell.index()] == Some(Piece::new(side, PieceKind::Pawn))
            })
    }

    fn piece_at(&self, cell: Cell) -> Option<Piece> {
        self.squares[cell.index()]
    }

    #[instrument(skip(self, mv), fields(mv = %mv))]
    fn apply_move(&mut self, mv: ChessMove) -> Result<(), MoveError> {
        let Some(piece) = self.piece_at(mv.from) else {
            return Err(MoveError::EmptySquare(mv.from));
        };
        let legal = self
            .possible_moves(piece.side)
            .into_iter()
            .find(|candidate| candidate.from == mv.from && candidate.to == mv.to)
            .ok_or(MoveError::Illegal(mv))?;
        self.squares = rules::apply(&self.squares, &legal);
        debug!(mv = %legal, "Move applied");
        Ok(())
    }

    #[instrument(skip(self))]
    fn promote(&mut self, cell: Cell, kind: PieceKind) -> Result<(), MoveError> {
        if !kind.is_promotion_target() {
            return Err(MoveError::InvalidPromotion(kind));
        }
        let piece = self
            .piece_at(cell)
            .filter(|p| p.kind == PieceKind::Pawn && cell.rank() == p.side.promotion_rank())
            .ok_or(MoveError::NoPromotion(cell))?;
        self.squares[cell.index()] = Some(Piece::new(piece.side, kind));
        debug!(%cell, %kind, "Pawn promoted");
        Ok(())
    }
}
