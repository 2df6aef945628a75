//! Per-frame input state.
//!
//! The platform layer writes into [`InputState`] between frames; systems read
//! it during update. Edge queries (`just_pressed`, `just_released`) are
//! relative to the previous frame and reset by [`InputState::end_frame`],
//! which the world calls after every update.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Platform key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key(pub u32);

/// What the mouse did this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseAction {
    #[default]
    None,
    Move,
    Press,
    Release,
}

/// Mouse cursor state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Mouse {
    pub x: f32,
    pub y: f32,
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub action: MouseAction,
}

/// Keyboard and mouse state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    pub mouse: Mouse,
    down: HashSet<Key>,
    pressed: HashSet<Key>,
    released: HashSet<Key>,
}

impl InputState {
    /// Create an empty input state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition.
    pub fn set_key(&mut self, key: Key, down: bool) {
        if down {
            if self.down.insert(key) {
                self.pressed.insert(key);
            }
        } else if self.down.remove(&key) {
            self.released.insert(key);
        }
    }

    /// Returns `true` while `key` is held.
    #[must_use]
    pub fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    /// Returns `true` if `key` went down since the last frame.
    #[must_use]
    pub fn just_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Returns `true` if `key` went up since the last frame.
    #[must_use]
    pub fn just_released(&self, key: Key) -> bool {
        self.released.contains(&key)
    }

    /// Clear per-frame edges and the mouse action.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
        self.mouse.action = MouseAction::None;
        self.mouse.scroll_x = 0.0;
        self.mouse.scroll_y = 0.0;
    }
}
