//! Keyboard and touch-control mapping
//!
//! Raw device events are translated into three intents. Movement is level
//! triggered (held flags); drop is edge triggered and rate-limited by the
//! cooldown flag.

use serde::{Deserialize, Serialize};

/// What a key or control asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Left,
    Right,
    Drop,
}

impl Intent {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Intent::Left),
            "ArrowRight" | "d" | "D" => Some(Intent::Right),
            "ArrowDown" | "ArrowUp" | "s" | "S" | "w" | "W" => Some(Intent::Drop),
            _ => None,
        }
    }
}

/// On-screen touch buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchControl {
    Left,
    Right,
    Drop,
}

impl TouchControl {
    pub const ALL: [TouchControl; 3] = [TouchControl::Left, TouchControl::Right, TouchControl::Drop];

    /// DOM element id of the button
    pub fn element_id(&self) -> &'static str {
        match self {
            TouchControl::Left => "leftBtn",
            TouchControl::Right => "rightBtn",
            TouchControl::Drop => "dropBtn",
        }
    }

    pub fn intent(&self) -> Intent {
        match self {
            TouchControl::Left => Intent::Left,
            TouchControl::Right => Intent::Right,
            TouchControl::Drop => Intent::Drop,
        }
    }
}

/// Held movement flags and the drop gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
    /// False while the drop cooldown runs
    pub can_drop: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            move_left: false,
            move_right: false,
            can_drop: true,
        }
    }
}

impl InputState {
    /// Set or clear a movement flag (drop is not a held intent)
    pub fn set_held(&mut self, intent: Intent, held: bool) {
        match intent {
            Intent::Left => self.move_left = held,
            Intent::Right => self.move_right = held,
            Intent::Drop => {}
        }
    }
}
