//! Scripted gestures for replaying input through an [`Editor`].
//!
//! A script is a TOML file with one `[[event]]` table per input event:
//!
//! ```toml
//! tool = "polygon"
//!
//! [[event]]
//! kind = "down"
//! x = 10.0
//! y = 10.0
//!
//! [[event]]
//! kind = "move"
//! x = 110.0
//! y = 60.0
//! shift = true
//!
//! [[event]]
//! kind = "up"
//! x = 110.0
//! y = 60.0
//! ```

use crate::draw::Document;
use crate::editor::Editor;
use crate::geometry::Point;
use crate::input::{Key, Modifiers, PointerButton, SessionOutcome, ToolEvent, ToolId, ToolPhase};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One scripted input event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScriptEvent {
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        alt: bool,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        alt: bool,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },
    /// Key press, by name ("g", "Escape", "Shift", ...)
    Key { key: String },
    /// Key release, by name
    Release { key: String },
    CaptureLost,
    FocusLost,
    Frame,
}

/// A gesture script.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GestureScript {
    /// Tool to activate before the first event
    #[serde(default)]
    pub tool: Option<ToolId>,

    #[serde(default, rename = "event")]
    pub events: Vec<ScriptEvent>,
}

impl GestureScript {
    /// Parses a script from TOML source.
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse gesture script")
    }

    /// Loads a script from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_toml(&source).with_context(|| format!("Invalid script {}", path.display()))
    }

    /// Replays every event through `editor`, in order.
    pub fn run(&self, editor: &mut Editor) {
        if let Some(tool) = self.tool {
            editor.activate(tool);
        }
        for (index, event) in self.events.iter().enumerate() {
            log::trace!("Script event {index}: {event:?}");
            replay(editor, event);
        }
    }
}

fn replay(editor: &mut Editor, event: &ScriptEvent) {
    match event {
        ScriptEvent::Down {
            x,
            y,
            button,
            shift,
            alt,
        } => editor.dispatch(ToolEvent::PointerDown {
            point: Point::new(*x, *y),
            button: *button,
            modifiers: with_flags(editor.modifiers(), *shift, *alt),
        }),
        ScriptEvent::Move { x, y, shift, alt } => editor.dispatch(ToolEvent::PointerMove {
            point: Point::new(*x, *y),
            modifiers: with_flags(editor.modifiers(), *shift, *alt),
        }),
        ScriptEvent::Up { x, y, button } => editor.on_pointer_up(*button, Point::new(*x, *y)),
        ScriptEvent::Key { key } => editor.on_key_press(Key::from_name(key)),
        ScriptEvent::Release { key } => editor.on_key_release(Key::from_name(key)),
        ScriptEvent::CaptureLost => editor.on_pointer_capture_lost(),
        ScriptEvent::FocusLost => editor.on_focus_lost(),
        ScriptEvent::Frame => editor.on_frame(),
    }
}

fn with_flags(held: Modifiers, shift: bool, alt: bool) -> Modifiers {
    Modifiers {
        shift: held.shift || shift,
        alt: held.alt || alt,
        ..held
    }
}

/// Editor state after a replay, as printed by the CLI.
#[derive(Debug, Serialize)]
pub struct ReplayReport<'a> {
    pub active_tool: ToolId,
    pub phase: ToolPhase,
    /// Outcome of the last session of each tool that ran one
    pub outcomes: Vec<(ToolId, SessionOutcome)>,
    pub document: &'a Document,
}

impl<'a> ReplayReport<'a> {
    pub fn new(editor: &Editor, document: &'a Document) -> Self {
        let outcomes = ToolId::BOX_TOOLS
            .into_iter()
            .filter_map(|id| Some((id, editor.tool(id)?.last_outcome()?)))
            .collect();
        Self {
            active_tool: editor.active_tool(),
            phase: editor.phase(),
            outcomes,
            document,
        }
    }
}
