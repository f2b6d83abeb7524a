//! Keyboard modifier state tracking.

use super::events::Key;

/// Keyboard modifier state.
///
/// Tracks which modifier keys (Shift, Ctrl, Alt) are currently pressed.
/// Shift locks the aspect ratio and Alt anchors the box at its center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Shift key pressed
    pub shift: bool,
    /// Ctrl key pressed
    pub ctrl: bool,
    /// Alt key pressed
    pub alt: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the aspect-lock modifier is held.
    pub fn aspect_lock(&self) -> bool {
        self.shift
    }

    /// Whether the center-anchor modifier is held.
    pub fn center_anchor(&self) -> bool {
        self.alt
    }

    /// Updates the flag for a modifier key; returns true if `key` is a modifier.
    pub fn set(&mut self, key: Key, pressed: bool) -> bool {
        match key {
            Key::Shift => self.shift = pressed,
            Key::Ctrl => self.ctrl = pressed,
            Key::Alt => self.alt = pressed,
            _ => return false,
        }
        true
    }
}
