mod core;
mod keyboard;
mod pointer;
mod transition;
#[cfg(test)]
mod tests;

pub use self::core::{
    BoxTool, CancelReason, DragSession, Effect, HostRequest, SessionOutcome, ToolPhase, ToolState,
};
pub use transition::{Transition, cancel_active, constraints_for, transition};
