//! Tool dispatcher for one canvas.
//!
//! The editor owns the shared document, one [`BoxTool`] per variant, the
//! keybinding map and the active tool. Hosts feed it raw pointer and keyboard
//! events; it routes them to the active tool and performs the tool switches
//! the tools request.

use crate::config::{Action, Config, KeyBinding, KeybindingError};
use crate::draw::{DirtyTracker, Document, SharedDocument};
use crate::geometry::{Point, Rect};
use crate::input::{
    BoxTool, HostRequest, Key, Modifiers, PointerButton, StampedEvent, ToolEvent, ToolId,
    ToolPhase, ToolVariant,
};
use std::collections::HashMap;

/// Padding around shapes removed by undo.
const UNDO_DAMAGE_PADDING: f64 = 4.0;

/// Routes input to the active tool of one canvas.
pub struct Editor {
    document: SharedDocument,
    tools: Vec<BoxTool<SharedDocument>>,
    active: ToolId,
    /// Current modifier key state
    modifiers: Modifiers,
    /// Keybinding action map for efficient lookup
    action_map: HashMap<KeyBinding, Action>,
    /// Damage not owned by any tool (undo)
    dirty_tracker: DirtyTracker,
}

impl Editor {
    /// Builds an editor with every built-in box tool and the select tool active.
    ///
    /// Fails when the configured keybindings are invalid or conflict.
    pub fn new(config: &Config) -> Result<Self, KeybindingError> {
        let action_map = config.keybindings.build_action_map()?;
        let document = Document::with_shape_limit(config.document.max_shapes).into_shared();
        let tools = ToolId::BOX_TOOLS
            .into_iter()
            .filter_map(|id| ToolVariant::from_config(id, config))
            .map(|variant| BoxTool::new(variant, document.clone()))
            .collect();

        Ok(Self {
            document,
            tools,
            active: ToolId::Select,
            modifiers: Modifiers::new(),
            action_map,
            dirty_tracker: DirtyTracker::new(),
        })
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    pub fn active_tool(&self) -> ToolId {
        self.active
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn tool(&self, id: ToolId) -> Option<&BoxTool<SharedDocument>> {
        self.tools.iter().find(|tool| tool.id() == id)
    }

    pub fn tool_mut(&mut self, id: ToolId) -> Option<&mut BoxTool<SharedDocument>> {
        self.tools.iter_mut().find(|tool| tool.id() == id)
    }

    /// Phase of the active tool; the select tool is always idle.
    pub fn phase(&self) -> ToolPhase {
        self.tool(self.active).map_or(ToolPhase::Idle, |tool| tool.phase())
    }

    /// Generation of the active tool, for stamping queued events.
    pub fn generation(&self) -> u64 {
        self.tool(self.active).map_or(0, |tool| tool.generation())
    }

    /// Switches the active tool, cancelling any drag in progress.
    pub fn activate(&mut self, id: ToolId) {
        if id == self.active {
            return;
        }
        self.cancel();
        log::info!("Active tool: {} -> {}", self.active, id);
        self.active = id;
    }

    /// Cancels the active tool's drag, if any.
    pub fn cancel(&mut self) {
        if let Some(tool) = self.tool_mut(self.active) {
            tool.cancel();
        }
    }

    /// Routes an event to the active tool and applies the tool switch it requests.
    pub fn dispatch(&mut self, event: impl Into<StampedEvent>) {
        let active = self.active;
        let Some(tool) = self.tool_mut(active) else {
            log::trace!("No box tool active; ignoring event");
            return;
        };
        tool.handle(event);
        if let Some(HostRequest::ActivateTool(id)) = tool.take_host_request() {
            self.activate(id);
        }
    }

    pub fn on_pointer_down(&mut self, button: PointerButton, point: Point) {
        let modifiers = self.modifiers;
        self.dispatch(ToolEvent::PointerDown {
            point,
            button,
            modifiers,
        });
    }

    pub fn on_pointer_move(&mut self, point: Point) {
        let modifiers = self.modifiers;
        self.dispatch(ToolEvent::PointerMove { point, modifiers });
    }

    pub fn on_pointer_up(&mut self, button: PointerButton, point: Point) {
        self.dispatch(ToolEvent::PointerUp { point, button });
    }

    pub fn on_pointer_capture_lost(&mut self) {
        self.dispatch(ToolEvent::PointerCaptureLost);
    }

    /// Focus loss cancels any drag and releases held modifiers.
    pub fn on_focus_lost(&mut self) {
        self.modifiers = Modifiers::new();
        self.dispatch(ToolEvent::FocusLost);
    }

    pub fn on_frame(&mut self) {
        self.dispatch(ToolEvent::Frame);
    }

    /// Processes a key press.
    ///
    /// Modifier keys update the live drag constraints. Other keys are looked
    /// up in the keybinding map; unbound keys go to the active tool.
    pub fn on_key_press(&mut self, key: Key) {
        if self.modifiers.set(key, true) {
            let modifiers = self.modifiers;
            self.dispatch(ToolEvent::ModifiersChanged(modifiers));
            return;
        }

        if let Some(action) = key
            .binding_name()
            .and_then(|name| self.find_action(&name))
        {
            self.handle_action(action);
            return;
        }

        self.dispatch(ToolEvent::KeyDown(key));
    }

    pub fn on_key_release(&mut self, key: Key) {
        if self.modifiers.set(key, false) {
            let modifiers = self.modifiers;
            self.dispatch(ToolEvent::ModifiersChanged(modifiers));
        }
    }

    fn find_action(&self, key_str: &str) -> Option<Action> {
        for (binding, action) in &self.action_map {
            if binding.matches(
                key_str,
                self.modifiers.ctrl,
                self.modifiers.shift,
                self.modifiers.alt,
            ) {
                return Some(*action);
            }
        }
        None
    }

    /// Runs a keybinding action.
    pub fn handle_action(&mut self, action: Action) {
        log::debug!("Action: {action:?}");
        if let Some(tool) = action.tool() {
            self.activate(tool);
            return;
        }

        match action {
            Action::Cancel => self.cancel(),
            Action::Undo => {
                self.cancel();
                let removed = self.document.borrow_mut().undo();
                if let Some(shape) = removed {
                    self.dirty_tracker.mark_shape(&shape, UNDO_DAMAGE_PADDING);
                }
            }
            Action::ToggleToolLock => {
                let active = self.active;
                match self.tool_mut(active) {
                    Some(tool) => {
                        let persistent = !tool.config().persistent_tool;
                        tool.set_persistent(persistent);
                        log::info!("Tool lock for {active}: {persistent}");
                    }
                    None => log::debug!("Tool lock has no effect on the {active} tool"),
                }
            }
            // Tool activations are handled above
            Action::SelectTool
            | Action::RectangleTool
            | Action::EllipseTool
            | Action::PolygonTool
            | Action::FrameTool
            | Action::ImageTool => {}
        }
    }

    /// Whether any tool or the editor itself has pending damage.
    pub fn needs_redraw(&self) -> bool {
        self.tools.iter().any(|tool| tool.needs_redraw) || !self.dirty_tracker.is_empty()
    }

    /// Drains repaint regions from every tool and from undo.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        let mut regions: Vec<Rect> = self
            .tools
            .iter_mut()
            .flat_map(|tool| tool.take_dirty_regions())
            .collect();
        regions.extend(self.dirty_tracker.take_regions());
        regions
    }
}
