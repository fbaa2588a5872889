//! End-to-end scenarios driven through the gesture event protocol.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use swipeview_core::{GestureEvent, GestureSample, PanelExtents, SwipeSide};
use swipeview_runtime::{
    OffsetOwner, Phase, PreviewStage, RenderSlots, SwipeCallbacks, SwipeConfig, SwipeRow,
};

const FRAME: Duration = Duration::from_millis(16);

fn step(row: &mut SwipeRow<String>, frames: u32) {
    for _ in 0..frames {
        row.advance(FRAME);
    }
}

fn slots() -> RenderSlots<String> {
    RenderSlots::new()
        .visible(|s| format!("content@{}", s.offset))
        .left(|_| "archive".to_string())
        .right(|_| "delete".to_string())
}

#[test]
fn commit_fires_toward_left_open_value() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let e = Rc::clone(&events);
    let mut row = SwipeRow::builder()
        .config(SwipeConfig {
            left_open_value: 80.0,
            ..SwipeConfig::default()
        })
        .callbacks(SwipeCallbacks::default().on_swiped_right(move || e.borrow_mut().push("swiped_right")))
        .slots(slots())
        .build()
        .expect("valid row");

    row.handle_event(GestureEvent::Start);
    row.handle_event(GestureEvent::Move(GestureSample::horizontal(10.0)));
    assert_eq!(row.offset(), 10.0);
    assert_eq!(row.render().hidden.as_deref(), Some("archive"));

    row.handle_event(GestureEvent::Move(GestureSample::horizontal(35.0)));
    assert!(matches!(
        row.phase(),
        Phase::Committing { target, .. } if target == 80.0
    ));

    step(&mut row, 8);
    assert!(row.offset() > 35.0, "commit animates toward 80");
    step(&mut row, 10);
    assert_eq!(*events.borrow(), vec!["swiped_right"]);
    assert_eq!(row.offset(), 0.0);

    row.handle_event(GestureEvent::Release(GestureSample::horizontal(35.0)));
    assert!(row.is_settled());
}

#[test]
fn preview_then_gesture_takeover() {
    let mut row = SwipeRow::builder()
        .config(SwipeConfig {
            preview_swipe_demo: true,
            ..SwipeConfig::default()
        })
        .slots(slots())
        .build()
        .expect("valid row");

    let frame = row.render();
    assert!(!frame.measured);
    assert_eq!(frame.hidden_extents, PanelExtents::ZERO);

    row.on_layout(PanelExtents::new(360.0, 56.0));
    assert!(row.render().measured);

    // Inside the open delay nothing moves.
    step(&mut row, 20);
    assert_eq!(row.offset(), 0.0);

    // Open phase under way.
    step(&mut row, 10);
    let inflight = row.offset();
    assert!(inflight < 0.0 && inflight > -60.0);
    assert_eq!(row.render().hidden.as_deref(), Some("delete"));

    row.handle_event(GestureEvent::Start);
    row.handle_event(GestureEvent::Move(GestureSample::horizontal(-4.0)));
    assert_eq!(row.gesture_state().initial_offset, Some(inflight));
    assert_eq!(row.owner(), OffsetOwner::Gesture);
    assert_eq!(row.preview().stage(), PreviewStage::Abandoned);

    row.handle_event(GestureEvent::Release(GestureSample::horizontal(-4.0)));
    step(&mut row, 20);
    assert_eq!(row.offset(), 0.0);
    assert!(row.is_settled());
}

#[test]
fn full_percent_threshold() {
    let build = || {
        SwipeRow::builder()
            .config(SwipeConfig {
                left_open_value: 80.0,
                swipe_to_open_percent: 100.0,
                ..SwipeConfig::default()
            })
            .slots(slots())
            .build()
            .expect("valid row")
    };

    let mut row = build();
    row.on_gesture_move(79.0, 0.0);
    assert!(matches!(row.phase(), Phase::Dragging { .. }));

    let mut row = build();
    row.on_gesture_move(81.0, 0.0);
    assert!(matches!(row.phase(), Phase::Committing { .. }));
}

#[test]
fn preview_skipped_when_layout_arrives_mid_drag() {
    let mut row = SwipeRow::builder()
        .config(SwipeConfig {
            preview_swipe_demo: true,
            ..SwipeConfig::default()
        })
        .slots(slots())
        .build()
        .expect("valid row");
    row.on_gesture_move(15.0, 0.0);
    row.on_layout(PanelExtents::new(360.0, 56.0));
    assert_eq!(row.preview().stage(), PreviewStage::Abandoned);
    assert!(row.preview().has_run());
    assert_eq!(row.offset(), 15.0);
}

#[test]
fn side_survives_exact_zero() {
    let mut row = SwipeRow::builder()
        .config(SwipeConfig {
            disable_swipe_to_left: true,
            ..SwipeConfig::default()
        })
        .slots(slots())
        .build()
        .expect("valid row");
    row.on_gesture_move(-20.0, 0.0);
    assert_eq!(row.side(), SwipeSide::Right);
    row.on_gesture_move(20.0, 0.0);
    assert_eq!(row.offset(), 0.0);
    assert_eq!(row.side(), SwipeSide::Right);
}
