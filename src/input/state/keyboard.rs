use crate::draw::DocumentStore;
use crate::input::events::{Key, ToolEvent};

use super::BoxTool;

impl<S: DocumentStore> BoxTool<S> {
    /// Processes a key press routed to the tool.
    ///
    /// Escape cancels the session. Shift and Alt update the live constraints
    /// of the box being dragged. Other keys are ignored.
    pub fn on_key_press(&mut self, key: Key) {
        self.on_key(key, true);
    }

    /// Processes a key release. Only modifier keys matter here.
    pub fn on_key_release(&mut self, key: Key) {
        self.on_key(key, false);
    }

    /// The canvas lost keyboard focus.
    pub fn on_focus_lost(&mut self) {
        self.handle(ToolEvent::FocusLost);
    }

    fn on_key(&mut self, key: Key, pressed: bool) {
        if let Some(session) = self.session() {
            let mut modifiers = session.modifiers;
            if modifiers.set(key, pressed) {
                self.handle(ToolEvent::ModifiersChanged(modifiers));
                return;
            }
        }
        if pressed {
            self.handle(ToolEvent::KeyDown(key));
        }
    }
}
