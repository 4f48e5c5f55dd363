//! Core domain types for chess.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the two match participants.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// White (moves first).
    #[display("white")]
    White,
    /// Black.
    #[display("black")]
    Black,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Rank index (0-7) a pawn of this side must reach to promote.
    pub fn promotion_rank(self) -> u8 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }

    /// Rank index pawns of this side start on.
    pub fn pawn_rank(self) -> u8 {
        match self {
            Side::White => 1,
            Side::Black => 6,
        }
    }

    /// Direction pawns of this side advance along the rank axis.
    pub fn forward(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }
}

/// Kind of chess piece.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    /// Pawn.
    #[display("pawn")]
    Pawn,
    /// Knight.
    #[display("knight")]
    Knight,
    /// Bishop.
    #[display("bishop")]
    Bishop,
    /// Rook.
    #[display("rook")]
    Rook,
    /// Queen.
    #[display("queen")]
    Queen,
    /// King.
    #[display("king")]
    King,
}

impl PieceKind {
    /// Pieces a pawn may promote to, in selector order.
    pub const PROMOTION_TARGETS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Conventional material value, used by machine strategies.
    pub fn value(self) -> u32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    /// Upper-case letter used in move notation (empty for pawns).
    pub fn letter(self) -> &'static str {
        match self {
            PieceKind::Pawn => "",
            PieceKind::Knight => "N",
            PieceKind::Bishop => "B",
            PieceKind::Rook => "R",
            PieceKind::Queen => "Q",
            PieceKind::King => "K",
        }
    }

    /// Returns true if a pawn may promote to this kind.
    pub fn is_promotion_target(self) -> bool {
        Self::PROMOTION_TARGETS.contains(&self)
    }
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Owner of the piece.
    pub side: Side,
    /// What kind of piece it is.
    pub kind: PieceKind,
}

impl Piece {
    /// Creates a new piece.
    pub fn new(side: Side, kind: PieceKind) -> Self {
        Self { side, kind }
    }

    /// Parses a FEN piece letter (upper case is White).
    #[instrument]
    pub fn from_fen(c: char) -> Option<Self> {
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(Self { side, kind })
    }

    /// FEN letter for this piece.
    pub fn fen(self) -> char {
        let c = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.side {
            Side::White => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }
}

/// A square on the 8x8 grid.
///
/// `file` 0-7 maps to a-h, `rank` 0-7 maps to 1-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    file: u8,
    rank: u8,
}

impl Cell {
    /// Creates a cell, returning `None` when off the board.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self { file, rank })
    }

    /// Parses algebraic coordinates such as `"e4"`.
    #[instrument]
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Self::new(file as u8 - b'a', rank as u8 - b'1')
    }

    /// File index (0 = a).
    pub fn file(self) -> u8 {
        self.file
    }

    /// Rank index (0 = rank 1).
    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Returns the cell offset by the given deltas, if still on the board.
    pub fn offset(self, dfile: i8, drank: i8) -> Option<Self> {
        let file = self.file as i8 + dfile;
        let rank = self.rank as i8 + drank;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// Index into a row-major 64-square array (a1 = 0, h8 = 63).
    pub fn index(self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    /// Iterates every cell from a1 to h8.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Cell { file, rank }))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}
