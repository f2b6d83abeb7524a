//! Box tool state machine and session state.

use super::transition::{self, Transition};
use crate::config::ToolConfig;
use crate::draw::{DirtyTracker, DocumentStore, FactoryError, ShapeId, ShapeRecord, StoreError};
use crate::geometry::{Point, Rect};
use crate::input::events::StampedEvent;
use crate::input::modifiers::Modifiers;
use crate::input::tool::{ToolId, ToolVariant};
use serde::Serialize;

/// Padding added around provisional shapes when marking repaint regions.
const DAMAGE_PADDING: f64 = 4.0;

/// Coarse interaction phase, for cursor and UI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolPhase {
    /// Waiting for a pointer-down
    Idle,
    /// Pointer is down but has not moved past the drag threshold
    Pointing,
    /// Dragging out a box
    Creating,
}

/// State of one pointer-down-to-pointer-up gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Tool generation at which this session started
    pub generation: u64,
    /// Raw pointer-down position; the drag threshold is measured from here
    pub press: Point,
    /// Box anchor (the press position, grid-snapped when a grid is set)
    pub origin: Point,
    /// Latest pointer sample
    pub current: Point,
    /// Live modifier state
    pub modifiers: Modifiers,
    /// Provisional record as last written to the store
    pub shape: ShapeRecord,
    /// A sample arrived that has not been applied yet (frame coalescing)
    pub pending: bool,
}

/// Box tool state machine.
///
/// `Committed` and `Cancelled` are not states of their own: they are reported
/// through [`SessionOutcome`] and the tool is back in `Idle` immediately.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ToolState {
    #[default]
    Idle,
    Pointing(DragSession),
    Creating(DragSession),
}

impl ToolState {
    pub fn phase(&self) -> ToolPhase {
        match self {
            ToolState::Idle => ToolPhase::Idle,
            ToolState::Pointing(_) => ToolPhase::Pointing,
            ToolState::Creating(_) => ToolPhase::Creating,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            ToolState::Idle => None,
            ToolState::Pointing(session) | ToolState::Creating(session) => Some(session),
        }
    }
}

/// Why a session ended without a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CancelReason {
    /// Escape, secondary button or the host's `cancel()`
    Requested,
    /// Another pointer went down under [`crate::config::SecondPointerPolicy::Cancel`]
    SecondPointer,
    CaptureLost,
    FocusLost,
    /// The shape factory rejected the settled box
    FactoryFailed,
    /// The document store refused a write (e.g. shape limit reached)
    StoreRejected,
}

/// How the last session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "result", content = "detail")]
pub enum SessionOutcome {
    Committed(ShapeId),
    Cancelled(CancelReason),
}

/// Side effect produced by a transition, applied in order by [`BoxTool`].
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    InsertProvisional(ShapeRecord),
    UpdateProvisional { id: ShapeId, bounds: Rect },
    Commit(ShapeRecord),
    Discard(ShapeId),
    Select(Vec<ShapeId>),
    Activate(ToolId),
}

/// Requests the tool makes of its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    /// Switch the active tool
    ActivateTool(ToolId),
}

/// Generic drag-to-create tool bound to one variant and one document store.
///
/// Every handler runs synchronously: the event is mapped to a [`Transition`]
/// by [`transition::transition`] and the resulting effects are written to the
/// store before the handler returns.
#[derive(Debug)]
pub struct BoxTool<S: DocumentStore> {
    variant: ToolVariant,
    store: S,
    state: ToolState,
    /// Bumped every time a session starts or ends
    generation: u64,
    /// Generation at which the last session ended
    settled_at: u64,
    last_outcome: Option<SessionOutcome>,
    last_failure: Option<FactoryError>,
    pending_request: Option<HostRequest>,
    /// Tracks dirty regions between renders
    dirty_tracker: DirtyTracker,
    /// Bounds of the provisional shape as last painted
    last_provisional_bounds: Option<Rect>,
    /// Whether the canvas needs to be redrawn
    pub needs_redraw: bool,
}

impl<S: DocumentStore> BoxTool<S> {
    /// Creates an idle tool writing to `store`.
    pub fn new(variant: ToolVariant, store: S) -> Self {
        Self {
            variant,
            store,
            state: ToolState::Idle,
            generation: 0,
            settled_at: 0,
            last_outcome: None,
            last_failure: None,
            pending_request: None,
            dirty_tracker: DirtyTracker::new(),
            last_provisional_bounds: None,
            needs_redraw: false,
        }
    }

    pub fn id(&self) -> ToolId {
        self.variant.id
    }

    pub fn variant(&self) -> &ToolVariant {
        &self.variant
    }

    pub fn config(&self) -> &ToolConfig {
        &self.variant.config
    }

    /// Keeps the tool active after each commit instead of returning to select.
    pub fn set_persistent(&mut self, persistent: bool) {
        self.variant.config.persistent_tool = persistent;
    }

    pub fn phase(&self) -> ToolPhase {
        self.state.phase()
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.state.session()
    }

    /// Current generation, for stamping queued events.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_outcome(&self) -> Option<SessionOutcome> {
        self.last_outcome
    }

    /// Factory error behind the last `FactoryFailed` cancel, if any.
    pub fn last_failure(&self) -> Option<&FactoryError> {
        self.last_failure.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Takes the host request raised by the last commit, if any.
    pub fn take_host_request(&mut self) -> Option<HostRequest> {
        self.pending_request.take()
    }

    /// Drains the regions to repaint.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        self.needs_redraw = false;
        self.dirty_tracker.take_regions()
    }

    /// Feeds one event through the state machine.
    ///
    /// Events stamped with a generation older than the end of the last
    /// session were queued before that session was committed or cancelled
    /// and are dropped.
    pub fn handle(&mut self, event: impl Into<StampedEvent>) {
        let StampedEvent { event, stamp } = event.into();
        if stamp.is_some_and(|stamp| stamp < self.settled_at) {
            log::trace!(
                "Dropping stale {:?} (stamp {:?}, generation {})",
                event,
                stamp,
                self.generation
            );
            return;
        }

        let state = std::mem::take(&mut self.state);
        let next = transition::transition(state, event, &self.variant, self.generation);
        self.apply(next);
    }

    /// Aborts the active session, discarding its provisional shape.
    ///
    /// The host calls this on focus loss or tool switches. Does nothing when idle.
    pub fn cancel(&mut self) {
        let state = std::mem::take(&mut self.state);
        let next = transition::cancel_active(state, CancelReason::Requested, self.generation);
        self.apply(next);
    }

    fn apply(&mut self, transition: Transition) {
        let Transition {
            state,
            effects,
            generation,
            outcome,
            failure,
        } = transition;
        self.state = state;
        self.generation = generation;
        if outcome.is_some() {
            self.settled_at = generation;
            self.last_outcome = outcome;
            self.last_failure = failure;
        }

        for effect in effects {
            let shape_id = effect_shape(&effect);
            if let Err(err) = self.apply_effect(effect) {
                self.abort(shape_id, err);
                return;
            }
        }
    }

    fn apply_effect(&mut self, effect: Effect) -> Result<(), StoreError> {
        match effect {
            Effect::InsertProvisional(shape) => {
                self.store.insert_provisional(shape.clone())?;
                self.mark_provisional(shape.bounds);
            }
            Effect::UpdateProvisional { id, bounds } => {
                self.store.update_provisional(id, bounds)?;
                self.mark_provisional(bounds);
            }
            Effect::Commit(shape) => {
                self.store.commit(shape.id, shape.clone())?;
                self.clear_provisional();
                self.dirty_tracker.mark_shape(&shape, DAMAGE_PADDING);
                self.needs_redraw = true;
            }
            Effect::Discard(id) => {
                self.store.discard(id)?;
                self.clear_provisional();
            }
            Effect::Select(ids) => self.store.select(&ids),
            Effect::Activate(tool) => {
                self.pending_request = Some(HostRequest::ActivateTool(tool));
            }
        }
        Ok(())
    }

    /// Ends the session after the store refused a write.
    fn abort(&mut self, shape_id: Option<ShapeId>, err: StoreError) {
        log::warn!("Document rejected {} shape: {err}", self.variant.id);
        if let Some(id) = shape_id {
            if let Err(discard_err) = self.store.discard(id) {
                log::debug!("Nothing to discard for {id}: {discard_err}");
            }
        }
        if !matches!(self.state, ToolState::Idle) {
            self.state = ToolState::Idle;
            self.generation += 1;
        }
        self.settled_at = self.generation;
        self.clear_provisional();
        self.pending_request = None;
        self.last_outcome = Some(SessionOutcome::Cancelled(CancelReason::StoreRejected));
        self.last_failure = None;
    }

    /// Marks both the previous and the new provisional bounds dirty.
    fn mark_provisional(&mut self, bounds: Rect) {
        if let Some(previous) = self.last_provisional_bounds.replace(bounds) {
            self.dirty_tracker.mark_rect(previous.inflate(DAMAGE_PADDING));
        }
        self.dirty_tracker.mark_rect(bounds.inflate(DAMAGE_PADDING));
        self.needs_redraw = true;
    }

    fn clear_provisional(&mut self) {
        if let Some(previous) = self.last_provisional_bounds.take() {
            self.dirty_tracker.mark_rect(previous.inflate(DAMAGE_PADDING));
            self.needs_redraw = true;
        }
    }
}

fn effect_shape(effect: &Effect) -> Option<ShapeId> {
    match effect {
        Effect::InsertProvisional(shape) | Effect::Commit(shape) => Some(shape.id),
        Effect::UpdateProvisional { id, .. } | Effect::Discard(id) => Some(*id),
        Effect::Select(_) | Effect::Activate(_) => None,
    }
}
