//! Frame loop driver.
//!
//! Each iteration hands one batch of events to the match, then asks it for
//! the frame to draw. No call blocks; a human side simply produces no-op
//! frames until a useful click arrives.

use super::input::InputEvent;
use super::phases::FrameView;
use super::turn::{CycleReport, Match};
use super::Board;
use tracing::{debug, info, instrument};

/// Drives a [`Match`] one frame at a time.
#[derive(Debug)]
pub struct FrameLoop<B: Board> {
    game: Match<B>,
    frames: u64,
}

impl<B: Board> FrameLoop<B> {
    /// Wraps a match.
    pub fn new(game: Match<B>) -> Self {
        Self { game, frames: 0 }
    }

    /// Runs one iteration: event handling, then the render view.
    #[instrument(skip(self, events), fields(frame = self.frames))]
    pub fn tick(&mut self, events: &[InputEvent]) -> (CycleReport, FrameView) {
        self.frames += 1;
        let report = self.game.handle_events(events);
        let view = self.game.frame();
        debug!(?report, ?view, "Frame complete");
        (report, view)
    }

    /// Feeds empty batches until the match ends or `max_frames` frames
    /// have run. Useful when both sides are machines.
    #[instrument(skip(self))]
    pub fn run_until_over(&mut self, max_frames: u64) -> FrameView {
        let mut view = self.game.frame();
        for _ in 0..max_frames {
            if self.game.is_game_over() {
                break;
            }
            view = self.tick(&[]).1;
        }
        info!(
            frames = self.frames,
            moves = self.game.move_count(),
            over = self.game.is_game_over(),
            "Frame loop stopped"
        );
        view
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The driven match.
    pub fn game(&self) -> &Match<B> {
        &self.game
    }

    /// Consumes the loop, returning the match.
    pub fn into_game(self) -> Match<B> {
        self.game
    }
}
