//! Property tests for the turn state machine against a scripted board.

use std::cell::RefCell;
use std::rc::Rc;
use strictly_chess::{
    Board, Cell, ChessMove, InputEvent, KingStatus, Layout, Match, MoveError, Outcome, Overlay,
    Phase, Piece, PieceKind, Pixel, Player, PlayerType, PromotionSelector, Side,
};

fn cell(s: &str) -> Cell {
    Cell::parse(s).unwrap()
}

fn idx(side: Side) -> usize {
    match side {
        Side::White => 0,
        Side::Black => 1,
    }
}

/// Board whose answers are set directly by the test.
#[derive(Debug, Default)]
struct ScriptedBoard {
    stuck: [bool; 2],
    checked: [bool; 2],
    pending: Option<(Side, Cell)>,
    applied: Vec<ChessMove>,
    promoted: Vec<(Cell, PieceKind)>,
}

impl ScriptedBoard {
    fn set_stuck(&mut self, side: Side, checked: bool) {
        self.stuck[idx(side)] = true;
        self.checked[idx(side)] = checked;
    }
}

impl Board for ScriptedBoard {
    fn possible_moves(&self, side: Side) -> Vec<ChessMove> {
        if self.stuck[idx(side)] {
            return Vec::new();
        }
        let (from, to) = match side {
            Side::White => (cell("e2"), cell("e4")),
            Side::Black => (cell("e7"), cell("e5")),
        };
        vec![ChessMove::new(Piece::new(side, PieceKind::Pawn), from, to, None)]
    }

    fn is_king_checked(&self, side: Side) -> bool {
        self.checked[idx(side)]
    }

    fn king(&self, side: Side) -> Option<KingStatus> {
        Some(KingStatus {
            cell: match side {
                Side::White => cell("e1"),
                Side::Black => cell("e8"),
            },
            is_checked: self.checked[idx(side)],
        })
    }

    fn promotions(&self, side: Side) -> Option<Cell> {
        self.pending.filter(|(s, _)| *s == side).map(|(_, c)| c)
    }

    fn piece_at(&self, _cell: Cell) -> Option<Piece> {
        None
    }

    fn apply_move(&mut self, mv: ChessMove) -> Result<(), MoveError> {
        if mv.piece.kind == PieceKind::Pawn && mv.to.rank() == mv.piece.side.promotion_rank() {
            self.pending = Some((mv.piece.side, mv.to));
        }
        self.applied.push(mv);
        Ok(())
    }

    fn promote(&mut self, cell: Cell, kind: PieceKind) -> Result<(), MoveError> {
        match self.pending {
            Some((_, pawn)) if pawn == cell => {
                self.pending = None;
                self.promoted.push((cell, kind));
                Ok(())
            }
            _ => Err(MoveError::NoPromotion(cell)),
        }
    }
}

type Calls = Rc<RefCell<Vec<(Side, &'static str)>>>;

/// Player that plays a fixed queue of moves and records every call.
struct ScriptedPlayer {
    side: Side,
    kind: PlayerType,
    moves: Vec<ChessMove>,
    promote_ok: bool,
    calls: Calls,
}

impl ScriptedPlayer {
    fn boxed(side: Side, kind: PlayerType, moves: Vec<ChessMove>, calls: &Calls) -> Box<dyn Player> {
        Box::new(Self {
            side,
            kind,
            moves,
            promote_ok: true,
            calls: Rc::clone(calls),
        })
    }
}

impl Player for ScriptedPlayer {
    fn kind(&self) -> PlayerType {
        self.kind
    }

    fn side(&self) -> Side {
        self.side
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn make_move(&mut self, board: &mut dyn Board, cell: Option<Cell>) -> Option<ChessMove> {
        self.calls.borrow_mut().push((self.side, "move"));
        if self.kind == PlayerType::Human && cell.is_none() {
            return None;
        }
        if self.moves.is_empty() {
            return None;
        }
        let mv = self.moves.remove(0);
        board.apply_move(mv).ok().map(|_| mv)
    }

    fn promote(
        &mut self,
        board: &mut dyn Board,
        pawn: Cell,
        selector: &PromotionSelector,
        pos: Option<Pixel>,
    ) -> bool {
        self.calls.borrow_mut().push((self.side, "promote"));
        if !self.promote_ok {
            return false;
        }
        if self.kind == PlayerType::Human && pos.and_then(|p| selector.option_at(p)).is_none() {
            return false;
        }
        board.promote(pawn, PieceKind::Queen).is_ok()
    }
}

fn pawn(side: Side, from: &str, to: &str) -> ChessMove {
    ChessMove::new(Piece::new(side, PieceKind::Pawn), cell(from), cell(to), None)
}

fn machine_match(
    white_moves: Vec<ChessMove>,
    black_moves: Vec<ChessMove>,
) -> (Match<ScriptedBoard>, Calls) {
    let calls: Calls = Rc::default();
    let game = Match::new(
        ScriptedBoard::default(),
        Layout::default(),
        ScriptedPlayer::boxed(Side::White, PlayerType::Machine, white_moves, &calls),
        ScriptedPlayer::boxed(Side::Black, PlayerType::Machine, black_moves, &calls),
    );
    (game, calls)
}

fn human_match(white_moves: Vec<ChessMove>) -> (Match<ScriptedBoard>, Calls) {
    let calls: Calls = Rc::default();
    let game = Match::new(
        ScriptedBoard::default(),
        Layout::default(),
        ScriptedPlayer::boxed(Side::White, PlayerType::Human, white_moves, &calls),
        ScriptedPlayer::boxed(Side::Black, PlayerType::Machine, vec![], &calls),
    );
    (game, calls)
}

fn board_click(layout: &Layout, at: &str) -> InputEvent {
    let r = layout.cell_rect(cell(at));
    InputEvent::click(r.x + 2, r.y + 2)
}

fn queen_click(layout: &Layout) -> InputEvent {
    let r = layout.selector().option_rect(PieceKind::Queen).unwrap();
    InputEvent::click(r.x + 2, r.y + 2)
}

#[test]
fn test_only_side_to_move_is_invoked() {
    let (mut game, calls) = machine_match(
        vec![pawn(Side::White, "a2", "a3"), pawn(Side::White, "b2", "b3")],
        vec![pawn(Side::Black, "a7", "a6")],
    );

    for _ in 0..3 {
        let turn = game.turn();
        let before = calls.borrow().len();
        let report = game.handle_events(&[]);
        let after = calls.borrow();
        assert_eq!(after.len(), before + 1);
        assert_eq!(after[before].0, turn);
        assert_eq!(report.acted, Some(turn));
    }
    assert_eq!(game.move_count(), 3);
}

#[test]
fn test_move_count_tracks_turn_advances_only() {
    // Black has nothing scripted, so its cycles resolve nothing.
    let (mut game, _calls) = machine_match(vec![pawn(Side::White, "a2", "a3")], vec![]);

    let report = game.handle_events(&[]);
    assert!(report.advanced);
    assert_eq!(game.move_count(), 1);

    for _ in 0..3 {
        let report = game.handle_events(&[]);
        assert_eq!(report.acted, Some(Side::Black));
        assert!(!report.resolved);
        assert!(!report.advanced);
    }
    assert_eq!(game.move_count(), 1);
    assert_eq!(game.turn(), Side::Black);
}

#[test]
fn test_pending_promotion_holds_the_turn() {
    let (mut game, calls) = machine_match(vec![pawn(Side::White, "a7", "a8")], vec![]);

    let report = game.handle_events(&[]);
    assert!(report.resolved);
    assert!(!report.advanced);
    assert_eq!(report.phase, Phase::Promoting { pawn: cell("a8") });
    assert_eq!(game.pending_promotion(), Some(cell("a8")));
    assert_eq!(game.turn(), Side::White);
    assert_eq!(game.move_count(), 0);
    assert!(game.log().moves().is_empty());

    let report = game.handle_events(&[]);
    assert!(report.advanced);
    assert_eq!(game.phase(), Phase::Idle);
    assert_eq!(game.pending_promotion(), None);
    assert_eq!(game.turn(), Side::Black);
    assert_eq!(game.move_count(), 1);
    assert_eq!(game.log().moves(), ["[001]", "a7-a8 promoting!", ""]);
    assert_eq!(game.board().promoted, vec![(cell("a8"), PieceKind::Queen)]);
    assert_eq!(
        *calls.borrow(),
        vec![(Side::White, "move"), (Side::White, "promote")]
    );
}

#[test]
fn test_failed_promotion_keeps_promoting_without_counting() {
    let calls: Calls = Rc::default();
    let stubborn = Box::new(ScriptedPlayer {
        side: Side::White,
        kind: PlayerType::Machine,
        moves: vec![pawn(Side::White, "a7", "a8")],
        promote_ok: false,
        calls: Rc::clone(&calls),
    });
    let mut game = Match::new(
        ScriptedBoard::default(),
        Layout::default(),
        stubborn,
        ScriptedPlayer::boxed(Side::Black, PlayerType::Machine, vec![], &calls),
    );

    game.handle_events(&[]);
    for _ in 0..3 {
        let report = game.handle_events(&[]);
        assert_eq!(report.acted, Some(Side::White));
        assert!(!report.resolved);
        assert!(game.is_promoting());
    }
    assert_eq!(game.move_count(), 0);
    assert_eq!(game.turn(), Side::White);
}

#[test]
fn test_checkmate_stops_play_before_dispatch() {
    let (mut game, calls) = machine_match(vec![pawn(Side::White, "a2", "a3")], vec![]);
    game.handle_events(&[]);
    assert_eq!(game.turn(), Side::Black);

    game.board_mut().set_stuck(Side::Black, true);
    let dispatched = calls.borrow().len();
    let report = game.handle_events(&[]);

    assert_eq!(report.acted, None);
    assert_eq!(calls.borrow().len(), dispatched);
    assert!(game.is_game_over());
    assert_eq!(
        game.outcome(),
        Some(Outcome::Checkmate { winner: Side::White })
    );
    assert_eq!(game.turn(), Side::Black);
    assert_eq!(game.move_count(), 1);
    assert_eq!(game.log().console_lines(), ["Checkmate, white wins!"]);
}

#[test]
fn test_stalemate_without_check_ends_without_dispatch() {
    let (mut game, calls) = machine_match(vec![pawn(Side::White, "a2", "a3")], vec![]);
    game.board_mut().set_stuck(Side::White, false);

    let report = game.handle_events(&[]);
    assert_eq!(report.acted, None);
    assert!(calls.borrow().is_empty());
    assert_eq!(game.outcome(), Some(Outcome::Stalemate));
    assert_eq!(game.frame().overlay, Overlay::GameOver(Outcome::Stalemate));
    assert!(game.board().applied.is_empty());
}

#[test]
fn test_game_over_is_terminal() {
    let (mut game, calls) = machine_match(
        vec![pawn(Side::White, "a2", "a3"), pawn(Side::White, "b2", "b3")],
        vec![pawn(Side::Black, "a7", "a6")],
    );
    game.board_mut().set_stuck(Side::White, true);
    game.handle_events(&[]);
    assert!(game.is_game_over());

    // Even if the board frees up again, nothing moves.
    game.board_mut().stuck = [false, false];
    let layout = *game.layout();
    for _ in 0..5 {
        let report = game.handle_events(&[board_click(&layout, "e2"), queen_click(&layout)]);
        assert_eq!(report.acted, None);
        assert!(!report.advanced);
    }
    assert!(calls.borrow().is_empty());
    assert_eq!(game.turn(), Side::White);
    assert_eq!(game.move_count(), 0);
    assert_eq!(game.pending_promotion(), None);
    assert_eq!(game.log().console_lines().len(), 1);
}

#[test]
fn test_mate_takes_priority_over_pending_promotion() {
    let (mut game, calls) = machine_match(vec![pawn(Side::White, "a7", "a8")], vec![]);
    game.handle_events(&[]);
    assert!(game.is_promoting());

    game.board_mut().set_stuck(Side::White, true);
    let report = game.handle_events(&[]);

    assert_eq!(report.acted, None);
    assert_eq!(*calls.borrow(), vec![(Side::White, "move")]);
    assert_eq!(
        game.outcome(),
        Some(Outcome::Checkmate { winner: Side::Black })
    );
    assert!(!game.is_promoting());
    assert_eq!(game.pending_promotion(), None);
    assert!(game.board().promoted.is_empty());
}

#[test]
fn test_stray_click_changes_nothing() {
    let (mut game, calls) = human_match(vec![pawn(Side::White, "e2", "e4")]);
    let before_phase = game.phase();

    let report = game.handle_events(&[InputEvent::click(5, 5), InputEvent::click(900, 40)]);

    assert_eq!(report.acted, None);
    assert!(calls.borrow().is_empty());
    assert_eq!(game.phase(), before_phase);
    assert_eq!(game.turn(), Side::White);
    assert_eq!(game.move_count(), 0);
    assert_eq!(game.last_move(), None);
    assert!(game.log().is_empty());
}

#[test]
fn test_human_waits_for_a_click() {
    let (mut game, calls) = human_match(vec![pawn(Side::White, "e2", "e4")]);

    for _ in 0..3 {
        let report = game.handle_events(&[]);
        assert_eq!(report.acted, None);
    }
    assert!(calls.borrow().is_empty());

    let layout = *game.layout();
    let report = game.handle_events(&[board_click(&layout, "e4")]);
    assert_eq!(report.acted, Some(Side::White));
    assert!(report.advanced);
    assert_eq!(game.log().moves(), ["[001]", "e2-e4", ""]);
}

#[test]
fn test_human_promotion_needs_selector_click() {
    let (mut game, calls) = human_match(vec![pawn(Side::White, "a7", "a8")]);
    let layout = *game.layout();

    game.handle_events(&[board_click(&layout, "a8")]);
    assert!(game.is_promoting());
    assert_eq!(game.frame().overlay, Overlay::PromotionSelector);

    // Board clicks outside the selector are the wrong sub-state: ignored.
    let report = game.handle_events(&[board_click(&layout, "a1")]);
    assert_eq!(report.acted, None);
    assert_eq!(calls.borrow().len(), 1);

    let report = game.handle_events(&[queen_click(&layout)]);
    assert!(report.advanced);
    assert_eq!(game.turn(), Side::Black);
    assert_eq!(game.move_count(), 1);
    assert_eq!(game.frame().overlay, Overlay::Board);
}

#[test]
fn test_check_suffix_looks_at_opponent() {
    let (mut game, _calls) = machine_match(vec![pawn(Side::White, "a2", "a3")], vec![]);
    game.board_mut().checked[1] = true;
    game.handle_events(&[]);
    assert_eq!(game.log().moves(), ["[001]", "a2-a3 check!", ""]);
}
