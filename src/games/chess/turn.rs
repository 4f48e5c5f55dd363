//! Turn state machine.
//!
//! A [`Match`] turns each batch of input events into at most one player
//! action, then decides whether the turn advances:
//!
//! 1. A side to move with no legal moves ends the match (checkmate if its
//!    king is attacked, stalemate otherwise). This runs first, every cycle.
//! 2. While idle the eligible action is a move; while promoting it is the
//!    promotion. Humans need a click in the matching screen region,
//!    machines act unconditionally.
//! 3. After the action, the board is asked again for a pawn waiting to
//!    promote. If one is found the same side keeps the turn.
//! 4. Otherwise, if a move or promotion resolved, the move count goes up,
//!    the ledger is written, and the turn passes to the opponent.

use super::geometry::{Layout, Pixel};
use super::input::{DEBUG_TOGGLE, InputEvent};
#[cfg(debug_assertions)]
use super::invariants::assert_invariants;
use super::log::MoveLog;
use super::phases::{FrameView, Outcome, Overlay, Phase};
use super::players::{Player, PlayerType};
use super::{Board, Cell, ChessMove, Side};
use crate::config::MatchConfig;
use tracing::{debug, info, instrument};

/// The two players of a match, one per side.
pub struct Seats {
    white: Box<dyn Player>,
    black: Box<dyn Player>,
}

impl Seats {
    /// Seats the given players.
    pub fn new(white: Box<dyn Player>, black: Box<dyn Player>) -> Self {
        Self { white, black }
    }

    /// The player for `side`.
    pub fn get(&self, side: Side) -> &dyn Player {
        match side {
            Side::White => self.white.as_ref(),
            Side::Black => self.black.as_ref(),
        }
    }

    fn get_mut(&mut self, side: Side) -> &mut dyn Player {
        match side {
            Side::White => self.white.as_mut(),
            Side::Black => self.black.as_mut(),
        }
    }
}

impl std::fmt::Debug for Seats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seats")
            .field("white", &self.white.name())
            .field("black", &self.black.name())
            .finish()
    }
}

/// What happened during one call to [`Match::handle_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Side whose player was asked to act, if any.
    pub acted: Option<Side>,
    /// Whether the action produced a move or a promotion.
    pub resolved: bool,
    /// Whether the turn passed to the other side.
    pub advanced: bool,
    /// Phase after the cycle.
    pub phase: Phase,
}

impl CycleReport {
    fn idle(phase: Phase) -> Self {
        Self {
            acted: None,
            resolved: false,
            advanced: false,
            phase,
        }
    }
}

/// Result of the single action attempted in a cycle.
enum Action {
    None,
    Moved(Option<ChessMove>),
    Promoted(bool),
}

/// A running match: the board, both players, and turn bookkeeping.
#[derive(Debug)]
pub struct Match<B: Board> {
    board: B,
    layout: Layout,
    players: Seats,
    turn: Side,
    move_count: u32,
    phase: Phase,
    last_move: Option<ChessMove>,
    log: MoveLog,
    debug_grid: bool,
}

impl<B: Board> Match<B> {
    /// Starts a match with White to move.
    #[instrument(skip_all, fields(white = %white.name(), black = %black.name()))]
    pub fn new(board: B, layout: Layout, white: Box<dyn Player>, black: Box<dyn Player>) -> Self {
        info!("Starting match");
        Self {
            board,
            layout,
            players: Seats::new(white, black),
            turn: Side::White,
            move_count: 0,
            phase: Phase::Idle,
            last_move: None,
            log: MoveLog::new(),
            debug_grid: false,
        }
    }

    /// Starts a match with the players and layout named in `config`.
    #[instrument(skip_all)]
    pub fn from_config(board: B, config: &MatchConfig) -> Self {
        let white = config.player(Side::White).build(Side::White, *config.seed());
        let black = config
            .player(Side::Black)
            .build(Side::Black, config.seed().map(|s| s.wrapping_add(1)));
        Self::new(board, *config.layout(), white, black)
    }

    /// Processes one batch of input events.
    #[instrument(skip(self, events), fields(turn = %self.turn, moves = self.move_count, events = events.len()))]
    pub fn handle_events(&mut self, events: &[InputEvent]) -> CycleReport {
        let (board_click, selector_click) = self.route_clicks(events);

        if self.phase.is_game_over() {
            return CycleReport::idle(self.phase);
        }

        if let Some(outcome) = self.detect_end() {
            info!(%outcome, "Match over");
            self.log.console(format!("{}!", outcome));
            self.phase = Phase::GameOver(outcome);
            return CycleReport::idle(self.phase);
        }

        let action = self.dispatch(board_click, selector_click);
        let acted = (!matches!(action, Action::None)).then_some(self.turn);

        // A promotion always leaves the sub-state; the board query below
        // puts us back if the pawn is still waiting.
        if self.phase.is_promoting() && matches!(action, Action::Promoted(_)) {
            self.phase = Phase::Idle;
        }
        if let Some(pawn) = self.board.promotions(self.turn) {
            if !self.phase.is_promoting() {
                info!(side = %self.turn, %pawn, "Promotion pending");
            }
            self.phase = Phase::Promoting { pawn };
        }

        let (moved, promoted) = match action {
            Action::Moved(mv) => (mv, false),
            Action::Promoted(done) => (None, done),
            Action::None => (None, false),
        };
        if moved.is_some() {
            self.last_move = moved;
        }

        let resolved = moved.is_some() || promoted;
        let advanced = resolved && !self.phase.is_promoting();
        if advanced {
            self.advance(promoted);
        }

        #[cfg(debug_assertions)]
        assert_invariants(self);

        CycleReport {
            acted,
            resolved,
            advanced,
            phase: self.phase,
        }
    }

    /// Per-frame view for the renderer.
    pub fn frame(&self) -> FrameView {
        let overlay = match self.phase {
            Phase::GameOver(outcome) => Overlay::GameOver(outcome),
            Phase::Promoting { .. } if self.current_player().kind() == PlayerType::Human => {
                Overlay::PromotionSelector
            }
            _ => Overlay::Board,
        };
        FrameView {
            overlay,
            debug_grid: self.debug_grid,
            turn: self.turn,
            move_count: self.move_count,
        }
    }

    /// The board.
    pub fn board(&self) -> &B {
        &self.board
    }

    /// Mutable access to the board, for drivers that set up positions.
    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// Screen layout used for click routing.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Side to move.
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Completed turns so far.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns true while a promotion is pending.
    pub fn is_promoting(&self) -> bool {
        self.phase.is_promoting()
    }

    /// Returns true once the match has ended.
    pub fn is_game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    /// The pawn awaiting promotion, if any.
    pub fn pending_promotion(&self) -> Option<Cell> {
        self.phase.pending_promotion()
    }

    /// How the match ended, if it has.
    pub fn outcome(&self) -> Option<Outcome> {
        self.phase.outcome()
    }

    /// The most recent completed move.
    pub fn last_move(&self) -> Option<ChessMove> {
        self.last_move
    }

    /// Move ledger and console.
    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    /// Both players.
    pub fn players(&self) -> &Seats {
        &self.players
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> &dyn Player {
        self.players.get(self.turn)
    }

    /// Whether the debug grid is on.
    pub fn debug_grid(&self) -> bool {
        self.debug_grid
    }

    /// Handles keys and keeps the last click that landed in the region of
    /// the currently eligible action. Other clicks are dropped.
    fn route_clicks(&mut self, events: &[InputEvent]) -> (Option<Pixel>, Option<Pixel>) {
        let selector = self.layout.selector();
        let board_rect = self.layout.board_rect();
        let mut board_click = None;
        let mut selector_click = None;

        for event in events {
            match *event {
                InputEvent::Key(DEBUG_TOGGLE) => {
                    self.debug_grid = !self.debug_grid;
                    debug!(debug_grid = self.debug_grid, "Debug grid toggled");
                }
                InputEvent::Key(_) => {}
                InputEvent::Pointer(p) if self.phase.is_promoting() && selector.rect().contains(p) => {
                    selector_click = Some(p);
                }
                InputEvent::Pointer(p) if !self.phase.is_promoting() && board_rect.contains(p) => {
                    board_click = Some(p);
                }
                InputEvent::Pointer(p) => {
                    debug!(x = p.x, y = p.y, "Click outside eligible region ignored");
                }
            }
        }
        (board_click, selector_click)
    }

    fn detect_end(&self) -> Option<Outcome> {
        if !self.board.possible_moves(self.turn).is_empty() {
            return None;
        }
        if self.board.is_king_checked(self.turn) {
            Some(Outcome::Checkmate {
                winner: self.turn.opponent(),
            })
        } else {
            Some(Outcome::Stalemate)
        }
    }

    fn dispatch(&mut self, board_click: Option<Pixel>, selector_click: Option<Pixel>) -> Action {
        let turn = self.turn;
        let is_machine = self.players.get(turn).kind() == PlayerType::Machine;

        match self.phase {
            Phase::Idle if board_click.is_some() || is_machine => {
                let cell = board_click.and_then(|p| self.layout.px_to_grid(p));
                if !is_machine && cell.is_none() {
                    return Action::None;
                }
                let player = self.players.get_mut(turn);
                let mv = player.make_move(&mut self.board, cell);
                debug!(player = %player.name(), ?cell, mv = ?mv, "Move dispatched");
                Action::Moved(mv)
            }
            Phase::Promoting { pawn } if selector_click.is_some() || is_machine => {
                let selector = self.layout.selector();
                let player = self.players.get_mut(turn);
                let done = player.promote(&mut self.board, pawn, &selector, selector_click);
                debug!(player = %player.name(), %pawn, done, "Promotion dispatched");
                Action::Promoted(done)
            }
            _ => Action::None,
        }
    }

    fn advance(&mut self, promoted: bool) {
        self.move_count += 1;
        let check = self.board.is_king_checked(self.turn.opponent());
        let description = self
            .last_move
            .map(|mv| mv.to_string())
            .unwrap_or_else(|| "--".to_string());
        self.log
            .record_turn(self.move_count, &description, promoted, check);
        if promoted {
            self.log
                .console(format!("[DEBUG] {} has promoted a pawn!", self.turn));
        }
        info!(side = %self.turn, number = self.move_count, mv = %description, check, "Turn complete");
        self.turn = self.turn.opponent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::chess::StandardBoard;
    use crate::games::chess::players::PlayerKind;

    fn machines(board: StandardBoard) -> Match<StandardBoard> {
        Match::new(
            board,
            Layout::default(),
            PlayerKind::First.build(Side::White, None),
            PlayerKind::First.build(Side::Black, None),
        )
    }

    #[test]
    fn test_machine_turns_alternate() {
        let mut game = machines(StandardBoard::new());
        let report = game.handle_events(&[]);
        assert_eq!(report.acted, Some(Side::White));
        assert!(report.advanced);
        assert_eq!(game.turn(), Side::Black);

        let report = game.handle_events(&[]);
        assert_eq!(report.acted, Some(Side::Black));
        assert_eq!(game.move_count(), 2);
        assert_eq!(game.log().moves().len(), 6);
    }

    #[test]
    fn test_debug_key_toggles_in_any_phase() {
        // White to move and stalemated: the first cycle ends the match.
        let mut game = machines(StandardBoard::from_placement("K7/2k5/1q6/8/8/8/8/8").unwrap());
        game.handle_events(&[InputEvent::Key(DEBUG_TOGGLE)]);
        assert!(game.is_game_over());
        assert!(game.debug_grid());
        assert!(game.frame().debug_grid);
        game.handle_events(&[InputEvent::Key('x'), InputEvent::Key(DEBUG_TOGGLE)]);
        assert!(!game.debug_grid());
    }

    #[test]
    fn test_machine_promotion_takes_two_cycles_one_turn() {
        let mut game = machines(StandardBoard::from_placement("2K5/P7/8/8/8/8/8/7k").unwrap());

        let report = game.handle_events(&[]);
        assert!(report.resolved);
        assert!(!report.advanced);
        assert!(game.is_promoting());
        assert_eq!(game.turn(), Side::White);
        assert_eq!(game.move_count(), 0);
        // Machines never see the selector.
        assert_eq!(game.frame().overlay, Overlay::Board);

        let report = game.handle_events(&[]);
        assert!(report.advanced);
        assert!(!game.is_promoting());
        assert_eq!(game.move_count(), 1);
        assert_eq!(game.turn(), Side::Black);
        assert_eq!(game.log().moves(), ["[001]", "a7-a8 promoting! check!", ""]);
        assert_eq!(
            game.log().console_lines(),
            ["[DEBUG] white has promoted a pawn!"]
        );
    }
}
