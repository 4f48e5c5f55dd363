//! Input events consumed by a match, already decoded from the platform.

use super::geometry::Pixel;
use serde::{Deserialize, Serialize};

/// Key that toggles the debug grid.
pub const DEBUG_TOGGLE: char = 'd';

/// A discrete input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputEvent {
    /// A key press. Only [`DEBUG_TOGGLE`] is acted on.
    Key(char),
    /// A pointer button was released at this screen position.
    Pointer(Pixel),
}

impl InputEvent {
    /// Shorthand for a pointer release at `(x, y)`.
    pub fn click(x: i32, y: i32) -> Self {
        InputEvent::Pointer(Pixel::new(x, y))
    }
}
