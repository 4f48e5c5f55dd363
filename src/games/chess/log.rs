//! Append-only move ledger and console stream.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Text log kept alongside a match.
///
/// `moves` is the numbered ledger: per completed turn a `[NNN]` line, the
/// move description with optional suffixes, and a blank separator.
/// `console` holds free-text diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLog {
    moves: Vec<String>,
    console: Vec<String>,
}

impl MoveLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the entries for a completed turn. `description` is the
    /// textual form of the move that completed it.
    #[instrument(skip(self))]
    pub fn record_turn(&mut self, number: u32, description: &str, promoted: bool, check: bool) {
        let mut line = description.to_string();
        if promoted {
            line.push_str(" promoting!");
        }
        if check {
            line.push_str(" check!");
        }
        self.push_move(format!("[{number:03}]"));
        self.push_move(line);
        self.push_move(String::new());
    }

    /// Appends a diagnostic line to the console stream.
    pub fn console(&mut self, line: impl Into<String>) {
        let line = line.into();
        debug!(%line, "console");
        self.console.push(line);
    }

    /// The move ledger, oldest first.
    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    /// The console stream, oldest first.
    pub fn console_lines(&self) -> &[String] {
        &self.console
    }

    /// Returns true if neither stream holds anything.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.console.is_empty()
    }

    fn push_move(&mut self, line: String) {
        debug!(%line, "ledger");
        self.moves.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::chess::{Cell, ChessMove, Piece, PieceKind, Side};

    fn pawn_push() -> String {
        ChessMove::new(
            Piece::new(Side::White, PieceKind::Pawn),
            Cell::parse("e2").unwrap(),
            Cell::parse("e4").unwrap(),
            None,
        )
        .to_string()
    }

    #[test]
    fn test_turn_entry_layout() {
        let mut log = MoveLog::new();
        log.record_turn(1, &pawn_push(), false, false);
        assert_eq!(log.moves(), ["[001]", "e2-e4", ""]);
        assert!(log.console_lines().is_empty());
    }

    #[test]
    fn test_suffix_order() {
        let mut log = MoveLog::new();
        log.record_turn(12, &pawn_push(), true, true);
        assert_eq!(log.moves(), ["[012]", "e2-e4 promoting! check!", ""]);
    }

    #[test]
    fn test_wide_numbers_are_not_truncated() {
        let mut log = MoveLog::new();
        log.record_turn(1234, &pawn_push(), false, true);
        assert_eq!(log.moves()[0], "[1234]");
        assert_eq!(log.moves()[1], "e2-e4 check!");
    }
}
