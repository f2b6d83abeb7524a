use crate::draw::DocumentStore;
use crate::geometry::Point;
use crate::input::events::{PointerButton, ToolEvent};
use crate::input::modifiers::Modifiers;

use super::BoxTool;

impl<S: DocumentStore> BoxTool<S> {
    /// Processes a pointer button press.
    ///
    /// # Behavior
    /// - Primary press while Idle: inserts a zero-size provisional shape at
    ///   `point` and enters Pointing
    /// - Secondary press during a session: cancels it
    /// - Any other press during a session: ignored or cancels, per the
    ///   variant's second-pointer policy
    pub fn on_pointer_down(&mut self, button: PointerButton, point: Point, modifiers: Modifiers) {
        self.handle(ToolEvent::PointerDown {
            point,
            button,
            modifiers,
        });
    }

    /// Processes pointer motion.
    ///
    /// Past the drag threshold the provisional shape follows the pointer. With
    /// move coalescing enabled the recompute waits for [`Self::on_frame`].
    pub fn on_pointer_move(&mut self, point: Point, modifiers: Modifiers) {
        self.handle(ToolEvent::PointerMove { point, modifiers });
    }

    /// Processes a pointer button release.
    ///
    /// # Behavior
    /// - Release while Pointing: commits a default-size shape (click-to-create)
    /// - Release while Creating: settles the box and commits the shape
    /// - Non-primary releases are ignored
    pub fn on_pointer_up(&mut self, button: PointerButton, point: Point) {
        self.handle(ToolEvent::PointerUp { point, button });
    }

    /// The host lost pointer capture; treated exactly like a cancel.
    pub fn on_pointer_capture_lost(&mut self) {
        self.handle(ToolEvent::PointerCaptureLost);
    }

    /// Animation-frame tick. Applies the newest coalesced pointer sample.
    pub fn on_frame(&mut self) {
        self.handle(ToolEvent::Frame);
    }
}
