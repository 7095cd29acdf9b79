//! Discrete player input events
//!
//! Held directions are edge triggered (set on press, cleared on release).
//! Jumping is a one-shot request consumed by the next tick.

use serde::{Deserialize, Serialize};

/// Key code for the left arrow
pub const KEY_LEFT: u32 = 37;
/// Key code for the right arrow
pub const KEY_RIGHT: u32 = 39;
/// Key code for the space bar
pub const KEY_SPACE: u32 = 32;

/// Input commands delivered between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    MoveLeftStart,
    MoveLeftEnd,
    MoveRightStart,
    MoveRightEnd,
    JumpRequested,
}

impl InputEvent {
    /// Map a raw key code and press state to an event.
    ///
    /// Releasing space does nothing; unknown keys are ignored.
    pub fn from_key_code(code: u32, pressed: bool) -> Option<Self> {
        match (code, pressed) {
            (KEY_LEFT, true) => Some(InputEvent::MoveLeftStart),
            (KEY_LEFT, false) => Some(InputEvent::MoveLeftEnd),
            (KEY_RIGHT, true) => Some(InputEvent::MoveRightStart),
            (KEY_RIGHT, false) => Some(InputEvent::MoveRightEnd),
            (KEY_SPACE, true) => Some(InputEvent::JumpRequested),
            _ => None,
        }
    }
}
