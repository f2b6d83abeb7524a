//! Generic input event types delivered by the host.

use super::modifiers::Modifiers;
use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Generic key representation for cross-host compatibility.
///
/// Hosts map their native key codes to these values before dispatching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key (cancels the gesture in progress)
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Tab key
    Tab,
    /// Space bar
    Space,
    /// Shift modifier (aspect-lock)
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Alt modifier (center-anchor)
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Parses a key name as written in keybindings and gesture scripts.
    ///
    /// Single characters map to [`Key::Char`]; names are case-insensitive.
    pub fn from_name(name: &str) -> Key {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Key::Char(c);
        }
        match name.to_lowercase().as_str() {
            "escape" | "esc" => Key::Escape,
            "return" | "enter" => Key::Return,
            "backspace" => Key::Backspace,
            "delete" => Key::Delete,
            "tab" => Key::Tab,
            "space" => Key::Space,
            "shift" => Key::Shift,
            "ctrl" | "control" => Key::Ctrl,
            "alt" => Key::Alt,
            _ => Key::Unknown,
        }
    }

    /// Name used to look the key up in the keybinding map.
    ///
    /// Modifier keys and unknown keys have no binding name.
    pub fn binding_name(&self) -> Option<String> {
        let name = match self {
            Key::Char(c) => return Some(c.to_string()),
            Key::Escape => "Escape",
            Key::Return => "Return",
            Key::Backspace => "Backspace",
            Key::Delete => "Delete",
            Key::Tab => "Tab",
            Key::Space => "Space",
            Key::Shift | Key::Ctrl | Key::Alt | Key::Unknown => return None,
        };
        Some(name.to_string())
    }
}

/// Pointer button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    /// Primary button (left mouse, pen tip, touch)
    #[default]
    Primary,
    /// Secondary button (cancels the gesture in progress)
    Secondary,
    /// Middle button (ignored by box tools)
    Middle,
}

/// An input event routed to a box tool.
///
/// Coordinates are already in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolEvent {
    PointerDown {
        point: Point,
        button: PointerButton,
        modifiers: Modifiers,
    },
    PointerMove {
        point: Point,
        modifiers: Modifiers,
    },
    PointerUp {
        point: Point,
        button: PointerButton,
    },
    /// Modifier state changed without pointer motion
    ModifiersChanged(Modifiers),
    KeyDown(Key),
    /// The host lost pointer capture (device gone, window switch)
    PointerCaptureLost,
    /// The canvas lost keyboard focus
    FocusLost,
    /// Animation-frame tick; coalesced pointer moves are applied here
    Frame,
}

impl ToolEvent {
    /// Tags the event with the tool generation observed when it was queued.
    pub fn stamped(self, generation: u64) -> StampedEvent {
        StampedEvent {
            event: self,
            stamp: Some(generation),
        }
    }
}

/// An event with the optional generation stamp used to drop stale input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampedEvent {
    pub event: ToolEvent,
    pub stamp: Option<u64>,
}

impl From<ToolEvent> for StampedEvent {
    fn from(event: ToolEvent) -> Self {
        Self { event, stamp: None }
    }
}
