//! Move generation.
//!
//! Castling and en passant are not generated. A pawn that reaches its
//! far rank stays a pawn until the board is told to promote it.

use super::super::{Cell, ChessMove, Piece, PieceKind, Side};
use super::Squares;
use super::check::{DIAGONAL, KING_STEPS, KNIGHT_JUMPS, ORTHOGONAL, is_king_checked};
use tracing::instrument;

/// Returns the squares after playing `mv` (no legality check).
pub fn apply(squares: &Squares, mv: &ChessMove) -> Squares {
    let mut next = *squares;
    next[mv.from.index()] = None;
    next[mv.to.index()] = Some(mv.piece);
    next
}

/// Generates moves for `side` that obey piece movement, ignoring check.
#[instrument(skip(squares))]
pub fn pseudo_moves(squares: &Squares, side: Side) -> Vec<ChessMove> {
    let mut moves = Vec::new();
    for from in Cell::all() {
        let Some(piece) = squares[from.index()] else {
            continue;
        };
        if piece.side != side {
            continue;
        }
        match piece.kind {
            PieceKind::Pawn => pawn_moves(squares, piece, from, &mut moves),
            PieceKind::Knight => step_moves(squares, piece, from, &KNIGHT_JUMPS, &mut moves),
            PieceKind::King => step_moves(squares, piece, from, &KING_STEPS, &mut moves),
            PieceKind::Bishop => slide_moves(squares, piece, from, &DIAGONAL, &mut moves),
            PieceKind::Rook => slide_moves(squares, piece, from, &ORTHOGONAL, &mut moves),
            PieceKind::Queen => {
                slide_moves(squares, piece, from, &ORTHOGONAL, &mut moves);
                slide_moves(squares, piece, from, &DIAGONAL, &mut moves);
            }
        }
    }
    moves
}

/// Generates the legal moves for `side`: pseudo moves that do not leave
/// its own king attacked.
#[instrument(skip(squares))]
pub fn legal_moves(squares: &Squares, side: Side) -> Vec<ChessMove> {
    pseudo_moves(squares, side)
        .into_iter()
        .filter(|mv| !is_king_checked(&apply(squares, mv), side))
        .collect()
}

fn target(squares: &Squares, piece: Piece, from: Cell, to: Cell) -> Option<ChessMove> {
    match squares[to.index()] {
        None => Some(ChessMove::new(piece, from, to, None)),
        Some(other) if other.side != piece.side => {
            Some(ChessMove::new(piece, from, to, Some(other.kind)))
        }
        Some(_) => None,
    }
}

fn pawn_moves(squares: &Squares, piece: Piece, from: Cell, moves: &mut Vec<ChessMove>) {
    let forward = piece.side.forward();

    if let Some(one) = from.offset(0, forward)
        && squares[one.index()].is_none()
    {
        moves.push(ChessMove::new(piece, from, one, None));
        if from.rank() == piece.side.pawn_rank()
            && let Some(two) = one.offset(0, forward)
            && squares[two.index()].is_none()
        {
            moves.push(ChessMove::new(piece, from, two, None));
        }
    }

    for dfile in [-1, 1] {
        if let Some(to) = from.offset(dfile, forward)
            && let Some(other) = squares[to.index()]
            && other.side != piece.side
        {
            moves.push(ChessMove::new(piece, from, to, Some(other.kind)));
        }
    }
}

fn step_moves(
    squares: &Squares,
    piece: Piece,
    from: Cell,
    steps: &[(i8, i8)],
    moves: &mut Vec<ChessMove>,
) {
    moves.extend(
        steps
            .iter()
            .filter_map(|&(df, dr)| from.offset(df, dr))
            .filter_map(|to| target(squares, piece, from, to)),
    );
}

fn slide_moves(
    squares: &Squares,
    piece: Piece,
    from: Cell,
    dirs: &[(i8, i8)],
    moves: &mut Vec<ChessMove>,
) {
    for &(df, dr) in dirs {
        let mut cursor = from.offset(df, dr);
        while let Some(to) = cursor {
            let Some(mv) = target(squares, piece, from, to) else {
                break;
            };
            let stop = mv.is_capture();
            moves.push(mv);
            if stop {
                break;
            }
            cursor = to.offset(df, dr);
        }
    }
}
