//! Pure state transitions of the box tool.
//!
//! `transition` maps (current state, event) to (next state, effect list)
//! without touching the document. [`super::BoxTool`] applies the effects.

use super::core::{CancelReason, DragSession, Effect, SessionOutcome, ToolState};
use crate::config::SecondPointerPolicy;
use crate::draw::{FactoryError, ShapeId};
use crate::geometry::{self, BoxConstraints, Point, Rect};
use crate::input::events::{Key, PointerButton, ToolEvent};
use crate::input::modifiers::Modifiers;
use crate::input::tool::{ToolId, ToolVariant};

/// Result of feeding one event to the state machine.
#[derive(Debug)]
pub struct Transition {
    /// State after the event
    pub state: ToolState,
    /// Document and host effects, in application order
    pub effects: Vec<Effect>,
    /// Generation after the event (bumped whenever a session starts or ends)
    pub generation: u64,
    /// Set when a session ended with this event
    pub outcome: Option<SessionOutcome>,
    /// Factory error that forced a cancel
    pub failure: Option<FactoryError>,
}

impl Transition {
    fn stay(state: ToolState, generation: u64) -> Self {
        Self {
            state,
            effects: Vec::new(),
            generation,
            outcome: None,
            failure: None,
        }
    }
}

/// Computes the next state for `event`.
pub fn transition(
    state: ToolState,
    event: ToolEvent,
    variant: &ToolVariant,
    generation: u64,
) -> Transition {
    match (state, event) {
        (
            ToolState::Idle,
            ToolEvent::PointerDown {
                point,
                button: PointerButton::Primary,
                modifiers,
            },
        ) => begin(point, modifiers, variant, generation),

        (ToolState::Idle, _) => Transition::stay(ToolState::Idle, generation),

        (
            ToolState::Pointing(session) | ToolState::Creating(session),
            ToolEvent::PointerDown { button, .. },
        ) if button == PointerButton::Secondary
            || variant.config.second_pointer == SecondPointerPolicy::Cancel =>
        {
            let reason = if button == PointerButton::Secondary {
                CancelReason::Requested
            } else {
                CancelReason::SecondPointer
            };
            cancel(session, reason, generation)
        }

        (
            state @ (ToolState::Pointing(_) | ToolState::Creating(_)),
            ToolEvent::PointerDown { .. },
        ) => {
            log::debug!("Ignoring pointer-down during an active drag");
            Transition::stay(state, generation)
        }

        (ToolState::Pointing(mut session), ToolEvent::PointerMove { point, modifiers }) => {
            session.current = point;
            session.modifiers = modifiers;
            if session.press.distance_to(point) > variant.config.drag_threshold {
                log::trace!("Drag threshold exceeded; creating {}", variant.id);
                let effects = track(&mut session, variant);
                Transition {
                    effects,
                    ..Transition::stay(ToolState::Creating(session), generation)
                }
            } else {
                Transition::stay(ToolState::Pointing(session), generation)
            }
        }

        (ToolState::Creating(mut session), ToolEvent::PointerMove { point, modifiers }) => {
            session.current = point;
            session.modifiers = modifiers;
            let effects = track(&mut session, variant);
            Transition {
                effects,
                ..Transition::stay(ToolState::Creating(session), generation)
            }
        }

        (ToolState::Pointing(mut session), ToolEvent::ModifiersChanged(modifiers)) => {
            session.modifiers = modifiers;
            Transition::stay(ToolState::Pointing(session), generation)
        }

        (ToolState::Creating(mut session), ToolEvent::ModifiersChanged(modifiers)) => {
            session.modifiers = modifiers;
            let effects = track(&mut session, variant);
            Transition {
                effects,
                ..Transition::stay(ToolState::Creating(session), generation)
            }
        }

        (ToolState::Creating(mut session), ToolEvent::Frame) => {
            let effects = if session.pending {
                flush(&mut session, variant)
            } else {
                Vec::new()
            };
            Transition {
                effects,
                ..Transition::stay(ToolState::Creating(session), generation)
            }
        }

        (
            ToolState::Pointing(session),
            ToolEvent::PointerUp {
                button: PointerButton::Primary,
                ..
            },
        ) => {
            let size = (
                variant.config.default_size[0],
                variant.config.default_size[1],
            );
            let mut bounds =
                geometry::click_box(session.origin, size, session.modifiers.center_anchor());
            if let Some(grid) = variant.config.grid_size {
                bounds = Rect::from_corners(bounds.min().snapped(grid), bounds.max().snapped(grid));
            }
            log::debug!("Click without drag; placing default-size {}", variant.id);
            commit(session, bounds, variant, generation)
        }

        (
            ToolState::Creating(mut session),
            ToolEvent::PointerUp {
                point,
                button: PointerButton::Primary,
            },
        ) => {
            session.current = point;
            let bounds = box_for(&session, variant);
            commit(session, bounds, variant, generation)
        }

        (
            ToolState::Pointing(session) | ToolState::Creating(session),
            ToolEvent::KeyDown(Key::Escape),
        ) => cancel(session, CancelReason::Requested, generation),

        (
            ToolState::Pointing(session) | ToolState::Creating(session),
            ToolEvent::PointerCaptureLost,
        ) => cancel(session, CancelReason::CaptureLost, generation),

        (ToolState::Pointing(session) | ToolState::Creating(session), ToolEvent::FocusLost) => {
            cancel(session, CancelReason::FocusLost, generation)
        }

        (state, _) => Transition::stay(state, generation),
    }
}

/// Cancels the active session, if any. Used by the host's `cancel()` entry point.
pub fn cancel_active(state: ToolState, reason: CancelReason, generation: u64) -> Transition {
    match state {
        ToolState::Pointing(session) | ToolState::Creating(session) => {
            cancel(session, reason, generation)
        }
        ToolState::Idle => Transition::stay(ToolState::Idle, generation),
    }
}

/// Constraints for the session's live modifier state.
pub fn constraints_for(modifiers: &Modifiers, variant: &ToolVariant) -> BoxConstraints {
    let config = &variant.config;
    BoxConstraints {
        aspect_ratio: (config.default_aspect_lock || modifiers.aspect_lock())
            .then_some(config.aspect_ratio),
        center_anchor: modifiers.center_anchor(),
        grid_size: config.grid_size,
    }
}

fn box_for(session: &DragSession, variant: &ToolVariant) -> Rect {
    geometry::compute_box(
        session.origin,
        session.current,
        &constraints_for(&session.modifiers, variant),
    )
}

fn begin(
    point: Point,
    modifiers: Modifiers,
    variant: &ToolVariant,
    generation: u64,
) -> Transition {
    let origin = match variant.config.grid_size {
        Some(grid) => point.snapped(grid),
        None => point,
    };
    let generation = generation + 1;
    let shape = variant.factory.create(ShapeId::new(), Rect::at(origin));
    log::debug!(
        "Starting {} session {generation} at ({:.1}, {:.1})",
        variant.id,
        origin.x,
        origin.y
    );

    let session = DragSession {
        generation,
        press: point,
        origin,
        current: origin,
        modifiers,
        shape: shape.clone(),
        pending: false,
    };

    Transition {
        effects: vec![Effect::InsertProvisional(shape)],
        ..Transition::stay(ToolState::Pointing(session), generation)
    }
}

/// Records a new pointer sample; applies it now unless moves are coalesced.
fn track(session: &mut DragSession, variant: &ToolVariant) -> Vec<Effect> {
    if variant.config.coalesce_pointer_moves {
        session.pending = true;
        Vec::new()
    } else {
        flush(session, variant)
    }
}

/// Recomputes the provisional shape from the latest sample.
fn flush(session: &mut DragSession, variant: &ToolVariant) -> Vec<Effect> {
    session.pending = false;
    let bounds = box_for(session, variant);
    if bounds == session.shape.bounds {
        return Vec::new();
    }
    session.shape = variant.factory.create(session.shape.id, bounds);
    vec![Effect::UpdateProvisional {
        id: session.shape.id,
        bounds,
    }]
}

fn commit(
    session: DragSession,
    bounds: Rect,
    variant: &ToolVariant,
    generation: u64,
) -> Transition {
    let generation = generation + 1;
    let bounds = geometry::enforce_min_size(
        bounds,
        variant.config.min_size,
        session.origin,
        session.modifiers.center_anchor(),
    );
    let id = session.shape.id;

    match variant.factory.finalize(bounds, session.shape) {
        Ok(finalized) => {
            let mut effects = vec![Effect::Commit(finalized), Effect::Select(vec![id])];
            if !variant.config.persistent_tool {
                effects.push(Effect::Activate(ToolId::Select));
            }
            log::debug!("Committed {} {id}", variant.id);
            Transition {
                state: ToolState::Idle,
                effects,
                generation,
                outcome: Some(SessionOutcome::Committed(id)),
                failure: None,
            }
        }
        Err(err) => {
            log::warn!("Failed to finalize {} {id}: {err}", variant.id);
            Transition {
                state: ToolState::Idle,
                effects: vec![Effect::Discard(id)],
                generation,
                outcome: Some(SessionOutcome::Cancelled(CancelReason::FactoryFailed)),
                failure: Some(err),
            }
        }
    }
}

fn cancel(session: DragSession, reason: CancelReason, generation: u64) -> Transition {
    log::debug!("Cancelling session {} ({reason:?})", session.generation);
    Transition {
        state: ToolState::Idle,
        effects: vec![Effect::Discard(session.shape.id)],
        generation: generation + 1,
        outcome: Some(SessionOutcome::Cancelled(reason)),
        failure: None,
    }
}
