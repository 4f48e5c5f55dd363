//! Attack and check detection.

use super::super::{Cell, PieceKind, Side};
use super::Squares;
use tracing::instrument;

pub(super) const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(super) const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub(super) const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(super) const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Finds the king of `side`.
#[instrument(skip(squares))]
pub fn king_cell(squares: &Squares, side: Side) -> Option<Cell> {
    Cell::all().find(|cell| {
        squares[cell.index()]
            .is_some_and(|p| p.side == side && p.kind == PieceKind::King)
    })
}

/// Returns true if any piece of `by` attacks `target`.
pub fn is_attacked(squares: &Squares, target: Cell, by: Side) -> bool {
    let holds = |cell: Option<Cell>, kinds: &[PieceKind]| {
        cell.and_then(|c| squares[c.index()])
            .is_some_and(|p| p.side == by && kinds.contains(&p.kind))
    };

    // Pawns attack diagonally forward, so look one rank "behind" the target.
    let back = -by.forward();
    if holds(target.offset(-1, back), &[PieceKind::Pawn])
        || holds(target.offset(1, back), &[PieceKind::Pawn])
    {
        return true;
    }

    if KNIGHT_JUMPS
        .iter()
        .any(|&(df, dr)| holds(target.offset(df, dr), &[PieceKind::Knight]))
    {
        return true;
    }

    if KING_STEPS
        .iter()
        .any(|&(df, dr)| holds(target.offset(df, dr), &[PieceKind::King]))
    {
        return true;
    }

    let slides = |dirs: &[(i8, i8)], kinds: &[PieceKind]| {
        dirs.iter().any(|&(df, dr)| {
            let mut cursor = target.offset(df, dr);
            while let Some(cell) = cursor {
                if let Some(piece) = squares[cell.index()] {
                    return piece.side == by && kinds.contains(&piece.kind);
                }
                cursor = cell.offset(df, dr);
            }
            false
        })
    };

    slides(&ORTHOGONAL, &[PieceKind::Rook, PieceKind::Queen])
        || slides(&DIAGONAL, &[PieceKind::Bishop, PieceKind::Queen])
}

/// Returns true if the king of `side` is attacked.
///
/// A side without a king is never in check.
#[instrument(skip(squares))]
pub fn is_king_checked(squares: &Squares, side: Side) -> bool {
    king_cell(squares, side).is_some_and(|king| is_attacked(squares, king, side.opponent()))
}
