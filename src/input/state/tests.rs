use super::*;
use crate::config::{Config, SecondPointerPolicy, ToolConfig};
use crate::draw::{Document, FactoryError, PolygonFactory, ShapeKind, ShapeStatus, SharedDocument};
use crate::geometry::{Point, Rect};
use crate::input::events::{Key, PointerButton, ToolEvent};
use crate::input::modifiers::Modifiers;
use crate::input::tool::{ToolId, ToolVariant};

fn create_test_tool_with(
    id: ToolId,
    document: Document,
    configure: impl FnOnce(&mut ToolConfig),
) -> (BoxTool<SharedDocument>, SharedDocument) {
    let mut variant = ToolVariant::from_config(id, &Config::default()).unwrap();
    configure(&mut variant.config);
    let document = document.into_shared();
    (BoxTool::new(variant, document.clone()), document)
}

fn create_test_tool(
    configure: impl FnOnce(&mut ToolConfig),
) -> (BoxTool<SharedDocument>, SharedDocument) {
    create_test_tool_with(ToolId::Rectangle, Document::new(), configure)
}

fn immediate(config: &mut ToolConfig) {
    config.coalesce_pointer_moves = false;
}

fn shift() -> Modifiers {
    Modifiers {
        shift: true,
        ..Modifiers::default()
    }
}

fn alt() -> Modifiers {
    Modifiers {
        alt: true,
        ..Modifiers::default()
    }
}

fn drag(tool: &mut BoxTool<SharedDocument>, from: Point, to: Point, modifiers: Modifiers) {
    tool.on_pointer_down(PointerButton::Primary, from, modifiers);
    tool.on_pointer_move(to, modifiers);
    tool.on_pointer_up(PointerButton::Primary, to);
}

fn only_committed(document: &SharedDocument) -> crate::draw::ShapeRecord {
    let doc = document.borrow();
    let committed: Vec<_> = doc.committed().cloned().collect();
    assert_eq!(committed.len(), 1, "expected exactly one committed shape");
    assert_eq!(doc.shapes().len(), 1, "no provisional shape may remain");
    committed[0].clone()
}

#[test]
fn test_drag_commits_normalized_box() {
    let (mut tool, document) = create_test_tool(|_| {});

    drag(
        &mut tool,
        Point::new(10.0, 10.0),
        Point::new(110.0, 60.0),
        Modifiers::new(),
    );

    let shape = only_committed(&document);
    assert_eq!(shape.bounds, Rect::new(10.0, 10.0, 100.0, 50.0));
    assert_eq!(tool.phase(), ToolPhase::Idle);
    assert_eq!(tool.last_outcome(), Some(SessionOutcome::Committed(shape.id)));
    assert_eq!(document.borrow().selection(), &[shape.id]);
}

#[test]
fn test_aspect_lock_longer_delta_wins() {
    let (mut tool, document) = create_test_tool(|_| {});

    drag(&mut tool, Point::new(0.0, 0.0), Point::new(40.0, 10.0), shift());

    let shape = only_committed(&document);
    assert_eq!(shape.bounds, Rect::new(0.0, 0.0, 40.0, 40.0));
}

#[test]
fn test_default_aspect_lock_without_modifier() {
    let (mut tool, document) = create_test_tool(|config| {
        config.default_aspect_lock = true;
        config.aspect_ratio = 2.0;
    });

    drag(
        &mut tool,
        Point::new(0.0, 0.0),
        Point::new(-20.0, -30.0),
        Modifiers::new(),
    );

    // Height drives: 30 * 2 = 60 wide, growing up-left
    let shape = only_committed(&document);
    assert_eq!(shape.bounds, Rect::new(-60.0, -30.0, 60.0, 30.0));
}

#[test]
fn test_click_below_threshold_uses_default_size() {
    let (mut tool, document) = create_test_tool(|_| {});

    drag(
        &mut tool,
        Point::new(50.0, 50.0),
        Point::new(52.0, 50.0),
        Modifiers::new(),
    );

    let shape = only_committed(&document);
    assert_eq!(shape.bounds, Rect::new(50.0, 50.0, 100.0, 100.0));
}

#[test]
fn test_click_with_center_anchor_centers_default_box() {
    let (mut tool, document) = create_test_tool(|config| config.default_size = [80.0, 40.0]);

    tool.on_pointer_down(PointerButton::Primary, Point::new(50.0, 50.0), alt());
    tool.on_pointer_up(PointerButton::Primary, Point::new(50.0, 50.0));

    let shape = only_committed(&document);
    assert_eq!(shape.bounds, Rect::new(10.0, 30.0, 80.0, 40.0));
}

#[test]
fn test_escape_discards_provisional_shape() {
    let (mut tool, document) = create_test_tool(immediate);

    tool.on_pointer_down(PointerButton::Primary, Point::new(0.0, 0.0), Modifiers::new());
    tool.on_pointer_move(Point::new(200.0, 150.0), Modifiers::new());
    assert_eq!(document.borrow().shapes().len(), 1);

    tool.on_key_press(Key::Escape);

    assert!(document.borrow().shapes().is_empty());
    assert_eq!(tool.phase(), ToolPhase::Idle);
    assert_eq!(
        tool.last_outcome(),
        Some(SessionOutcome::Cancelled(CancelReason::Requested))
    );
    // Cancelled sessions leave nothing to undo
    assert!(document.borrow_mut().undo().is_none());
}

#[test]
fn test_state_path_through_a_drag() {
    let (mut tool, document) = create_test_tool(immediate);
    assert_eq!(tool.phase(), ToolPhase::Idle);

    tool.on_pointer_down(PointerButton::Primary, Point::new(0.0, 0.0), Modifiers::new());
    assert_eq!(tool.phase(), ToolPhase::Pointing);
    {
        let doc = document.borrow();
        let stored = &doc.shapes()[0];
        assert_eq!(stored.status, ShapeStatus::Provisional);
        assert_eq!(stored.record.bounds, Rect::at(Point::new(0.0, 0.0)));
        assert!(doc.selection().is_empty());
    }

    tool.on_pointer_move(Point::new(3.0, 0.0), Modifiers::new());
    assert_eq!(tool.phase(), ToolPhase::Pointing);

    tool.on_pointer_move(Point::new(30.0, 20.0), Modifiers::new());
    assert_eq!(tool.phase(), ToolPhase::Creating);
    assert_eq!(
        document.borrow().shapes()[0].record.bounds,
        Rect::new(0.0, 0.0, 30.0, 20.0)
    );

    tool.on_pointer_up(PointerButton::Primary, Point::new(30.0, 20.0));
    assert_eq!(tool.phase(), ToolPhase::Idle);
    assert_eq!(document.borrow().shapes()[0].status, ShapeStatus::Committed);
}

#[test]
fn test_commit_requests_select_tool() {
    let (mut tool, _document) = create_test_tool(|_| {});

    drag(
        &mut tool,
        Point::new(0.0, 0.0),
        Point::new(50.0, 50.0),
        Modifiers::new(),
    );

    assert_eq!(
        tool.take_host_request(),
        Some(HostRequest::ActivateTool(ToolId::Select))
    );
    assert_eq!(tool.take_host_request(), None);
}

#[test]
fn test_persistent_tool_stays_active() {
    let (mut tool, document) = create_test_tool(|_| {});
    tool.set_persistent(true);

    drag(
        &mut tool,
        Point::new(0.0, 0.0),
        Point::new(50.0, 50.0),
        Modifiers::new(),
    );
    drag(
        &mut tool,
        Point::new(100.0, 0.0),
        Point::new(150.0, 50.0),
        Modifiers::new(),
    );

    assert_eq!(tool.take_host_request(), None);
    assert_eq!(document.borrow().committed_count(), 2);
}

#[test]
fn test_straight_line_drag_gets_min_size() {
    let (mut tool, document) = create_test_tool(|config| config.min_size = 12.0);

    drag(
        &mut tool,
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Modifiers::new(),
    );

    let shape = only_committed(&document);
    assert_eq!(shape.bounds, Rect::new(0.0, 0.0, 100.0, 12.0));
}

#[test]
fn test_grid_snaps_origin_and_corners() {
    let (mut tool, document) = create_test_tool(|config| config.grid_size = Some(10.0));

    drag(
        &mut tool,
        Point::new(3.0, 4.0),
        Point::new(47.0, 22.0),
        Modifiers::new(),
    );

    let shape = only_committed(&document);
    assert_eq!(shape.bounds, Rect::new(0.0, 0.0, 50.0, 20.0));
}

#[test]
fn test_click_jitter_on_grid_uses_default_size() {
    let (mut tool, document) = create_test_tool(|config| config.grid_size = Some(10.0));

    // (4, 4) snaps to (0, 0); the 1px jitter is measured from the press itself
    tool.on_pointer_down(PointerButton::Primary, Point::new(4.0, 4.0), Modifiers::new());
    tool.on_pointer_move(Point::new(5.0, 4.0), Modifiers::new());
    assert_eq!(tool.phase(), ToolPhase::Pointing);
    tool.on_pointer_up(PointerButton::Primary, Point::new(5.0, 4.0));

    let shape = only_committed(&document);
    assert_eq!(shape.bounds, Rect::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn test_degenerate_center_anchor_drag_stays_centered() {
    let (mut tool, document) = create_test_tool(|config| config.min_size = 20.0);

    drag(&mut tool, Point::new(50.0, 50.0), Point::new(50.0, 70.0), alt());

    let shape = only_committed(&document);
    assert_eq!(shape.bounds, Rect::new(40.0, 30.0, 20.0, 40.0));
    assert_eq!(shape.bounds.center(), Point::new(50.0, 50.0));
}

#[test]
fn test_thin_drag_up_left_grows_toward_pointer() {
    let (mut tool, document) = create_test_tool(|config| config.min_size = 12.0);

    drag(
        &mut tool,
        Point::new(100.0, 100.0),
        Point::new(40.0, 97.0),
        Modifiers::new(),
    );

    // The bottom edge stays on the origin
    let shape = only_committed(&document);
    assert_eq!(shape.bounds, Rect::new(40.0, 88.0, 60.0, 12.0));
}

#[test]
fn test_aspect_lock_yields_to_min_size() {
    let (mut tool, document) = create_test_tool(|config| {
        config.min_size = 20.0;
        config.aspect_ratio = 2.0;
    });

    // 30 wide locks to 15 high, which the minimum size then raises to 20
    drag(&mut tool, Point::new(0.0, 0.0), Point::new(30.0, 0.0), shift());

    let shape = only_committed(&document);
    assert_eq!(shape.bounds, Rect::new(0.0, 0.0, 30.0, 20.0));
}

#[test]
fn test_center_anchor_grows_from_origin() {
    let (mut tool, document) = create_test_tool(|_| {});

    drag(&mut tool, Point::new(50.0, 50.0), Point::new(70.0, 60.0), alt());

    let shape = only_committed(&document);
    assert_eq!(shape.bounds, Rect::new(30.0, 40.0, 40.0, 20.0));
}

#[test]
fn test_modifier_press_mid_drag_updates_box() {
    let (mut tool, document) = create_test_tool(immediate);

    tool.on_pointer_down(PointerButton::Primary, Point::new(0.0, 0.0), Modifiers::new());
    tool.on_pointer_move(Point::new(40.0, 10.0), Modifiers::new());
    assert_eq!(
        document.borrow().shapes()[0].record.bounds,
        Rect::new(0.0, 0.0, 40.0, 10.0)
    );

    tool.on_key_press(Key::Shift);
    assert_eq!(
        document.borrow().shapes()[0].record.bounds,
        Rect::new(0.0, 0.0, 40.0, 40.0)
    );

    tool.on_key_release(Key::Shift);
    assert_eq!(
        document.borrow().shapes()[0].record.bounds,
        Rect::new(0.0, 0.0, 40.0, 10.0)
    );
}

#[test]
fn test_coalesced_moves_apply_on_frame() {
    let (mut tool, document) = create_test_tool(|config| config.coalesce_pointer_moves = true);

    tool.on_pointer_down(PointerButton::Primary, Point::new(0.0, 0.0), Modifiers::new());
    tool.on_pointer_move(Point::new(20.0, 20.0), Modifiers::new());
    tool.on_pointer_move(Point::new(40.0, 30.0), Modifiers::new());
    tool.on_pointer_move(Point::new(60.0, 50.0), Modifiers::new());
    assert_eq!(tool.phase(), ToolPhase::Creating);

    let revision = document.borrow().revision();
    assert_eq!(
        document.borrow().shapes()[0].record.bounds,
        Rect::at(Point::new(0.0, 0.0))
    );

    tool.on_frame();
    assert_eq!(document.borrow().revision(), revision + 1);
    assert_eq!(
        document.borrow().shapes()[0].record.bounds,
        Rect::new(0.0, 0.0, 60.0, 50.0)
    );

    // Nothing new to apply
    tool.on_frame();
    assert_eq!(document.borrow().revision(), revision + 1);
}

#[test]
fn test_repeated_move_to_same_point_is_idempotent() {
    let (mut tool, document) = create_test_tool(immediate);

    tool.on_pointer_down(PointerButton::Primary, Point::new(0.0, 0.0), Modifiers::new());
    tool.on_pointer_move(Point::new(30.0, 30.0), Modifiers::new());
    let snapshot = document.borrow().clone();

    tool.on_pointer_move(Point::new(30.0, 30.0), Modifiers::new());

    let doc = document.borrow();
    assert_eq!(doc.revision(), snapshot.revision());
    assert_eq!(doc.shapes(), snapshot.shapes());
}

#[test]
fn test_second_pointer_ignored_by_default() {
    let (mut tool, document) = create_test_tool(|_| {});

    tool.on_pointer_down(PointerButton::Primary, Point::new(0.0, 0.0), Modifiers::new());
    let generation = tool.generation();
    tool.on_pointer_down(PointerButton::Primary, Point::new(90.0, 90.0), Modifiers::new());

    assert_eq!(tool.phase(), ToolPhase::Pointing);
    assert_eq!(tool.generation(), generation);
    assert_eq!(document.borrow().shapes().len(), 1);
    assert_eq!(tool.session().unwrap().origin, Point::new(0.0, 0.0));
}

#[test]
fn test_second_pointer_cancels_when_configured() {
    let (mut tool, document) =
        create_test_tool(|config| config.second_pointer = SecondPointerPolicy::Cancel);

    tool.on_pointer_down(PointerButton::Primary, Point::new(0.0, 0.0), Modifiers::new());
    tool.on_pointer_down(PointerButton::Primary, Point::new(90.0, 90.0), Modifiers::new());

    assert_eq!(tool.phase(), ToolPhase::Idle);
    assert!(document.borrow().shapes().is_empty());
    assert_eq!(
        tool.last_outcome(),
        Some(SessionOutcome::Cancelled(CancelReason::SecondPointer))
    );
}

#[test]
fn test_secondary_button_cancels() {
    let (mut tool, document) = create_test_tool(|_| {});

    tool.on_pointer_down(PointerButton::Primary, Point::new(0.0, 0.0), Modifiers::new());
    tool.on_pointer_move(Point::new(50.0, 50.0), Modifiers::new());
    tool.on_pointer_down(PointerButton::Secondary, Point::new(50.0, 50.0), Modifiers::new());

    assert_eq!(tool.phase(), ToolPhase::Idle);
    assert!(document.borrow().shapes().is_empty());
}

#[test]
fn test_capture_and_focus_loss_cancel() {
    let (mut tool, document) = create_test_tool(|_| {});

    tool.on_pointer_down(PointerButton::Primary, Point::new(0.0, 0.0), Modifiers::new());
    tool.on_pointer_capture_lost();
    assert!(document.borrow().shapes().is_empty());
    assert_eq!(
        tool.last_outcome(),
        Some(SessionOutcome::Cancelled(CancelReason::CaptureLost))
    );

    tool.on_pointer_down(PointerButton::Primary, Point::new(0.0, 0.0), Modifiers::new());
    tool.on_pointer_move(Point::new(50.0, 50.0), Modifiers::new());
    tool.on_focus_lost();
    assert!(document.borrow().shapes().is_empty());
    assert_eq!(
        tool.last_outcome(),
        Some(SessionOutcome::Cancelled(CancelReason::FocusLost))
    );
    assert_eq!(tool.phase(), ToolPhase::Idle);
}

#[test]
fn test_host_cancel_from_pointing_and_creating() {
    let (mut tool, document) = create_test_tool(|_| {});

    tool.on_pointer_down(PointerButton::Primary, Point::new(0.0, 0.0), Modifiers::new());
    tool.cancel();
    assert_eq!(tool.phase(), ToolPhase::Idle);
    assert!(document.borrow().shapes().is_empty());

    tool.on_pointer_down(PointerButton::Primary, Point::new(0.0, 0.0), Modifiers::new());
    tool.on_pointer_move(Point::new(80.0, 80.0), Modifiers::new());
    tool.cancel();
    assert_eq!(tool.phase(), ToolPhase::Idle);
    assert!(document.borrow().shapes().is_empty());

    // Idle cancel is a no-op
    let generation = tool.generation();
    tool.cancel();
    assert_eq!(tool.generation(), generation);
}

#[test]
fn test_out_of_order_events_are_ignored() {
    let (mut tool, document) = create_test_tool(|_| {});

    tool.on_pointer_move(Point::new(10.0, 10.0), Modifiers::new());
    tool.on_pointer_up(PointerButton::Primary, Point::new(10.0, 10.0));
    tool.on_key_press(Key::Escape);
    tool.on_frame();

    assert_eq!(tool.phase(), ToolPhase::Idle);
    assert_eq!(tool.generation(), 0);
    assert_eq!(tool.last_outcome(), None);
    assert!(document.borrow().shapes().is_empty());
}

#[test]
fn test_stale_events_are_dropped() {
    let (mut tool, document) = create_test_tool(immediate);
    let queued_at = tool.generation();

    // Events queued before the down are still part of its session
    tool.handle(
        ToolEvent::PointerDown {
            point: Point::new(0.0, 0.0),
            button: PointerButton::Primary,
            modifiers: Modifiers::new(),
        }
        .stamped(queued_at),
    );
    tool.handle(
        ToolEvent::PointerMove {
            point: Point::new(40.0, 40.0),
            modifiers: Modifiers::new(),
        }
        .stamped(queued_at),
    );
    assert_eq!(tool.phase(), ToolPhase::Creating);

    tool.on_key_press(Key::Escape);
    assert_eq!(tool.phase(), ToolPhase::Idle);

    // A move and release queued before the cancel must not resurrect anything
    tool.handle(
        ToolEvent::PointerMove {
            point: Point::new(90.0, 90.0),
            modifiers: Modifiers::new(),
        }
        .stamped(queued_at),
    );
    tool.handle(
        ToolEvent::PointerDown {
            point: Point::new(90.0, 90.0),
            button: PointerButton::Primary,
            modifiers: Modifiers::new(),
        }
        .stamped(queued_at),
    );
    assert_eq!(tool.phase(), ToolPhase::Idle);
    assert!(document.borrow().shapes().is_empty());

    // Fresh stamps go through
    tool.handle(
        ToolEvent::PointerDown {
            point: Point::new(5.0, 5.0),
            button: PointerButton::Primary,
            modifiers: Modifiers::new(),
        }
        .stamped(tool.generation()),
    );
    assert_eq!(tool.phase(), ToolPhase::Pointing);
}

#[test]
fn test_factory_failure_cancels_session() {
    let variant = ToolVariant::new(
        ToolId::Polygon,
        ToolConfig::default(),
        Box::new(PolygonFactory { sides: 2 }),
    );
    let document = Document::new().into_shared();
    let mut tool = BoxTool::new(variant, document.clone());

    drag(
        &mut tool,
        Point::new(0.0, 0.0),
        Point::new(60.0, 60.0),
        Modifiers::new(),
    );

    assert!(document.borrow().shapes().is_empty());
    assert_eq!(tool.phase(), ToolPhase::Idle);
    assert_eq!(
        tool.last_outcome(),
        Some(SessionOutcome::Cancelled(CancelReason::FactoryFailed))
    );
    assert_eq!(tool.last_failure(), Some(&FactoryError::TooFewSides(2)));
    assert_eq!(tool.take_host_request(), None);
}

#[test]
fn test_shape_limit_rejects_commit() {
    let (mut tool, document) =
        create_test_tool_with(ToolId::Ellipse, Document::with_shape_limit(1), |_| {});

    drag(
        &mut tool,
        Point::new(0.0, 0.0),
        Point::new(50.0, 50.0),
        Modifiers::new(),
    );
    assert!(tool.take_host_request().is_some());

    drag(
        &mut tool,
        Point::new(100.0, 0.0),
        Point::new(150.0, 50.0),
        Modifiers::new(),
    );

    assert_eq!(
        tool.last_outcome(),
        Some(SessionOutcome::Cancelled(CancelReason::StoreRejected))
    );
    assert_eq!(tool.phase(), ToolPhase::Idle);
    assert_eq!(tool.take_host_request(), None);
    let doc = document.borrow();
    assert_eq!(doc.committed_count(), 1);
    assert_eq!(doc.shapes().len(), 1);
}

#[test]
fn test_polygon_commit_fills_vertices() {
    let (mut tool, document) = create_test_tool_with(ToolId::Polygon, Document::new(), |_| {});

    drag(
        &mut tool,
        Point::new(0.0, 0.0),
        Point::new(90.0, 60.0),
        Modifiers::new(),
    );

    let shape = only_committed(&document);
    match shape.kind {
        ShapeKind::Polygon { sides, vertices } => {
            assert_eq!(sides, 3);
            assert_eq!(vertices.len(), 3);
            assert_eq!(vertices[0], Point::new(45.0, 0.0));
        }
        other => panic!("expected polygon, got {other:?}"),
    }
}

#[test]
fn test_undo_removes_committed_shape() {
    let (mut tool, document) = create_test_tool(|_| {});

    drag(
        &mut tool,
        Point::new(0.0, 0.0),
        Point::new(50.0, 50.0),
        Modifiers::new(),
    );

    let shape = only_committed(&document);
    let undone = document.borrow_mut().undo().unwrap();
    assert_eq!(undone.id, shape.id);
    assert!(document.borrow().shapes().is_empty());
}

#[test]
fn test_dirty_regions_cover_old_and_new_bounds() {
    let (mut tool, _document) = create_test_tool(immediate);

    tool.on_pointer_down(PointerButton::Primary, Point::new(0.0, 0.0), Modifiers::new());
    tool.take_dirty_regions();

    tool.on_pointer_move(Point::new(40.0, 40.0), Modifiers::new());
    tool.on_pointer_move(Point::new(20.0, 20.0), Modifiers::new());
    assert!(tool.needs_redraw);

    let regions = tool.take_dirty_regions();
    assert!(!tool.needs_redraw);
    let damage = regions
        .iter()
        .copied()
        .reduce(Rect::union)
        .unwrap();
    assert!(damage.contains(Point::new(40.0, 40.0)));
    assert!(damage.contains(Point::new(0.0, 0.0)));
}

#[test]
fn test_pure_transition_emits_insert_on_down() {
    let variant = ToolVariant::from_config(ToolId::Frame, &Config::default()).unwrap();

    let next = transition(
        ToolState::Idle,
        ToolEvent::PointerDown {
            point: Point::new(1.0, 2.0),
            button: PointerButton::Primary,
            modifiers: Modifiers::new(),
        },
        &variant,
        7,
    );

    assert_eq!(next.generation, 8);
    assert_eq!(next.outcome, None);
    assert!(matches!(next.state, ToolState::Pointing(ref s) if s.generation == 8));
    match next.effects.as_slice() {
        [Effect::InsertProvisional(shape)] => {
            assert_eq!(shape.bounds, Rect::at(Point::new(1.0, 2.0)));
        }
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn test_pure_transition_commit_effect_order() {
    let variant = ToolVariant::from_config(ToolId::Image, &Config::default()).unwrap();
    let down = transition(
        ToolState::Idle,
        ToolEvent::PointerDown {
            point: Point::new(0.0, 0.0),
            button: PointerButton::Primary,
            modifiers: Modifiers::new(),
        },
        &variant,
        0,
    );
    let moved = transition(
        down.state,
        ToolEvent::PointerMove {
            point: Point::new(160.0, 90.0),
            modifiers: Modifiers::new(),
        },
        &variant,
        down.generation,
    );
    let up = transition(
        moved.state,
        ToolEvent::PointerUp {
            point: Point::new(160.0, 90.0),
            button: PointerButton::Primary,
        },
        &variant,
        moved.generation,
    );

    assert_eq!(up.state, ToolState::Idle);
    assert_eq!(up.generation, 2);
    match up.effects.as_slice() {
        [
            Effect::Commit(shape),
            Effect::Select(ids),
            Effect::Activate(ToolId::Select),
        ] => {
            assert_eq!(ids, &vec![shape.id]);
            assert_eq!(
                shape.kind,
                ShapeKind::Image {
                    aspect_ratio: 160.0 / 90.0
                }
            );
        }
        other => panic!("unexpected effects {other:?}"),
    }
}
