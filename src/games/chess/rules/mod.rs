//! Game rules for chess.
//!
//! Pure functions over a square array: move generation and check
//! detection. Board storage lives in [`StandardBoard`](super::StandardBoard);
//! keeping the rules separate lets them be tested on raw positions.

pub mod check;
pub mod movegen;

pub use check::{is_attacked, is_king_checked, king_cell};
pub use movegen::{apply, legal_moves, pseudo_moves};

use super::Piece;

/// Row-major square array, a1 = 0 through h8 = 63.
pub type Squares = [Option<Piece>; 64];
