//! Keybinding configuration types and parsing.
//!
//! Maps keyboard shortcuts to editor actions: activating a tool, cancelling
//! the gesture in progress, undoing the last commit, and toggling tool lock.

use crate::input::tool::ToolId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors produced while parsing keybindings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeybindingError {
    #[error("empty keybinding string")]
    Empty,
    #[error("no key specified in: {0}")]
    MissingKey(String),
    #[error("duplicate keybinding '{binding}' assigned to both {first:?} and {second:?}")]
    Duplicate {
        binding: String,
        first: Action,
        second: Action,
    },
}

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Abort the gesture in progress
    Cancel,
    /// Remove the most recently committed shape
    Undo,
    /// Keep the current box tool active after each commit
    ToggleToolLock,

    // Tool activation
    SelectTool,
    RectangleTool,
    EllipseTool,
    PolygonTool,
    FrameTool,
    ImageTool,
}

impl Action {
    /// Returns the tool this action activates, if any.
    pub fn tool(&self) -> Option<ToolId> {
        match self {
            Action::SelectTool => Some(ToolId::Select),
            Action::RectangleTool => Some(ToolId::Rectangle),
            Action::EllipseTool => Some(ToolId::Ellipse),
            Action::PolygonTool => Some(ToolId::Polygon),
            Action::FrameTool => Some(ToolId::Frame),
            Action::ImageTool => Some(ToolId::Image),
            Action::Cancel | Action::Undo | Action::ToggleToolLock => None,
        }
    }
}

/// A single keybinding: a key with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+Z" or "Escape".
    /// Modifiers can appear in any order and spaces around '+' are accepted.
    pub fn parse(s: &str) -> Result<Self, KeybindingError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeybindingError::Empty);
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(KeybindingError::MissingKey(s.to_string()));
        }

        // "Ctrl++" splits into trailing empty parts; the key itself is '+'
        let key = key_parts.join("+");
        let key = if key.is_empty() { "+".to_string() } else { key };

        // Keys are matched case-insensitively, so normalize for hashing
        Ok(Self {
            key: key.to_lowercase(),
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings:
/// ```toml
/// [keybindings]
/// cancel = ["Escape"]
/// polygon_tool = ["G"]
/// undo = ["Ctrl+Z"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_cancel")]
    pub cancel: Vec<String>,

    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_toggle_tool_lock")]
    pub toggle_tool_lock: Vec<String>,

    #[serde(default = "default_select_tool")]
    pub select_tool: Vec<String>,

    #[serde(default = "default_rectangle_tool")]
    pub rectangle_tool: Vec<String>,

    #[serde(default = "default_ellipse_tool")]
    pub ellipse_tool: Vec<String>,

    #[serde(default = "default_polygon_tool")]
    pub polygon_tool: Vec<String>,

    #[serde(default = "default_frame_tool")]
    pub frame_tool: Vec<String>,

    #[serde(default = "default_image_tool")]
    pub image_tool: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            cancel: default_cancel(),
            undo: default_undo(),
            toggle_tool_lock: default_toggle_tool_lock(),
            select_tool: default_select_tool(),
            rectangle_tool: default_rectangle_tool(),
            ellipse_tool: default_ellipse_tool(),
            polygon_tool: default_polygon_tool(),
            frame_tool: default_frame_tool(),
            image_tool: default_image_tool(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, KeybindingError> {
        let mut map = HashMap::new();

        let groups: [(&[String], Action); 9] = [
            (self.cancel.as_slice(), Action::Cancel),
            (self.undo.as_slice(), Action::Undo),
            (self.toggle_tool_lock.as_slice(), Action::ToggleToolLock),
            (self.select_tool.as_slice(), Action::SelectTool),
            (self.rectangle_tool.as_slice(), Action::RectangleTool),
            (self.ellipse_tool.as_slice(), Action::EllipseTool),
            (self.polygon_tool.as_slice(), Action::PolygonTool),
            (self.frame_tool.as_slice(), Action::FrameTool),
            (self.image_tool.as_slice(), Action::ImageTool),
        ];

        for (bindings, action) in groups {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(first) = map.insert(binding, action) {
                    return Err(KeybindingError::Duplicate {
                        binding: binding_str.clone(),
                        first,
                        second: action,
                    });
                }
            }
        }

        Ok(map)
    }

    /// Bindings that activate `tool`.
    pub fn tool_bindings(&self, tool: ToolId) -> &[String] {
        match tool {
            ToolId::Select => &self.select_tool,
            ToolId::Rectangle => &self.rectangle_tool,
            ToolId::Ellipse => &self.ellipse_tool,
            ToolId::Polygon => &self.polygon_tool,
            ToolId::Frame => &self.frame_tool,
            ToolId::Image => &self.image_tool,
        }
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_cancel() -> Vec<String> {
    vec!["Escape".to_string()]
}

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Z".to_string()]
}

fn default_toggle_tool_lock() -> Vec<String> {
    vec!["Q".to_string()]
}

fn default_select_tool() -> Vec<String> {
    vec!["V".to_string()]
}

fn default_rectangle_tool() -> Vec<String> {
    vec!["R".to_string()]
}

fn default_ellipse_tool() -> Vec<String> {
    vec!["O".to_string()]
}

fn default_polygon_tool() -> Vec<String> {
    vec!["G".to_string()]
}

fn default_frame_tool() -> Vec<String> {
    vec!["F".to_string()]
}

fn default_image_tool() -> Vec<String> {
    vec!["I".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let binding = KeyBinding::parse("Escape").unwrap();
        assert_eq!(binding.key, "escape");
        assert!(!binding.ctrl);
        assert!(!binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_ctrl_key() {
        let binding = KeyBinding::parse("Ctrl+Z").unwrap();
        assert_eq!(binding.key, "z");
        assert!(binding.ctrl);
        assert!(!binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_with_spaces_and_any_order() {
        let a = KeyBinding::parse("Ctrl + Shift + W").unwrap();
        let b = KeyBinding::parse("shift+ctrl+w").unwrap();
        assert_eq!(a, b);
        assert!(a.ctrl && a.shift && !a.alt);
    }

    #[test]
    fn test_parse_plus_key() {
        let binding = KeyBinding::parse("Ctrl++").unwrap();
        assert_eq!(binding.key, "+");
        assert!(binding.ctrl);
    }

    #[test]
    fn test_parse_rejects_modifier_only() {
        assert_eq!(
            KeyBinding::parse("Ctrl+Shift"),
            Err(KeybindingError::MissingKey("Ctrl+Shift".to_string()))
        );
        assert_eq!(KeyBinding::parse("   "), Err(KeybindingError::Empty));
    }

    #[test]
    fn test_matches() {
        let binding = KeyBinding::parse("Ctrl+Shift+W").unwrap();
        assert!(binding.matches("W", true, true, false));
        assert!(binding.matches("w", true, true, false));
        assert!(!binding.matches("W", false, true, false));
        assert!(!binding.matches("A", true, true, false));
    }

    #[test]
    fn test_build_action_map_defaults() {
        let map = KeybindingsConfig::default().build_action_map().unwrap();

        let escape = KeyBinding::parse("Escape").unwrap();
        assert_eq!(map.get(&escape), Some(&Action::Cancel));

        let g = KeyBinding::parse("g").unwrap();
        assert_eq!(map.get(&g), Some(&Action::PolygonTool));
        assert_eq!(Action::PolygonTool.tool(), Some(ToolId::Polygon));
    }

    #[test]
    fn test_duplicate_keybinding_detection() {
        let mut config = KeybindingsConfig::default();
        config.cancel = vec!["Ctrl+Z".to_string()];

        let err = config.build_action_map().unwrap_err();
        assert!(err.to_string().contains("duplicate keybinding"));
        assert!(err.to_string().contains("Ctrl+Z"));
    }

    #[test]
    fn test_duplicate_with_different_case() {
        let mut config = KeybindingsConfig::default();
        config.frame_tool = vec!["g".to_string()];
        assert!(matches!(
            config.build_action_map(),
            Err(KeybindingError::Duplicate { .. })
        ));
    }
}
