//! Input handling and the box tool state machine.
//!
//! This module turns host pointer and keyboard events into document edits.
//! It defines the generic event types, the tool identities and variants, and
//! the drag-to-create state machine shared by every box tool.

pub mod events;
pub mod modifiers;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{Key, PointerButton, StampedEvent, ToolEvent};
pub use modifiers::Modifiers;
pub use state::{BoxTool, CancelReason, HostRequest, SessionOutcome, ToolPhase, ToolState};
pub use tool::{ToolId, ToolVariant};
