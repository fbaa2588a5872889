#![forbid(unsafe_code)]

//! Deterministic replay of a [`Scenario`] on a virtual clock.
//!
//! Each frame: apply every step due at or before the frame time (in file
//! order), record the row, then advance animations by one frame. The same
//! scenario and frame size always produce the same trace.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;
use swipeview_core::SwipeSide;
use swipeview_runtime::{
    OffsetOwner, PreviewStage, RenderSlots, SwipeCallbacks, SwipeError, SwipeRow,
};
use thiserror::Error;
use tracing::{debug, info_span};

use crate::scenario::{Scenario, ScenarioEvent};

/// Upper bound on recorded frames per replay.
pub const MAX_FRAMES: u64 = 1_000_000;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("frame size must be > 0 ms")]
    ZeroFrame,
    #[error("replay of {end_ms} ms at {frame_ms} ms per frame exceeds {MAX_FRAMES} frames")]
    TooLong { end_ms: u64, frame_ms: u64 },
    #[error("failed to build row: {0}")]
    Row(#[from] SwipeError),
}

/// One line of replay output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceRecord {
    pub t_ms: u64,
    pub offset: f64,
    pub side: SwipeSide,
    pub phase: &'static str,
    pub owner: &'static str,
    pub preview: &'static str,
    /// Hidden panel view shown this frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<String>,
    /// Callbacks fired since the previous record.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub callbacks: Vec<&'static str>,
}

fn owner_name(owner: OffsetOwner) -> &'static str {
    match owner {
        OffsetOwner::Rest => "rest",
        OffsetOwner::Preview => "preview",
        OffsetOwner::Gesture => "gesture",
        OffsetOwner::Controller => "controller",
    }
}

fn preview_name(stage: PreviewStage) -> &'static str {
    match stage {
        PreviewStage::Pending => "pending",
        PreviewStage::Opening => "opening",
        PreviewStage::Closing => "closing",
        PreviewStage::Finished => "finished",
        PreviewStage::Abandoned => "abandoned",
    }
}

/// Replay `scenario` with `frame_ms` frames and return the trace.
pub fn replay(scenario: &Scenario, frame_ms: u64) -> Result<Vec<TraceRecord>, ReplayError> {
    if frame_ms == 0 {
        return Err(ReplayError::ZeroFrame);
    }
    let end_ms = scenario.last_step_ms().saturating_add(scenario.tail_ms);
    if end_ms / frame_ms >= MAX_FRAMES {
        return Err(ReplayError::TooLong { end_ms, frame_ms });
    }
    let _span = info_span!("swipeview.replay", steps = scenario.steps.len(), frame_ms).entered();

    let fired: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
    let (l, r, b) = (Rc::clone(&fired), Rc::clone(&fired), Rc::clone(&fired));
    let callbacks = SwipeCallbacks::default()
        .on_swiped_left(move || l.borrow_mut().push("swiped_left"))
        .on_swiped_right(move || r.borrow_mut().push("swiped_right"))
        .on_swipe_gesture_began(move || b.borrow_mut().push("gesture_began"));

    let mut row: SwipeRow<String> = SwipeRow::builder()
        .config(scenario.config.clone())
        .callbacks(callbacks)
        .slots(
            RenderSlots::new()
                .visible(|s| format!("content@{:.1}", s.offset))
                .left(|_| "left".to_string())
                .right(|_| "right".to_string()),
        )
        .build()?;

    let frame = Duration::from_millis(frame_ms);
    let mut steps = scenario.steps.iter().peekable();
    let mut trace = Vec::new();
    let mut t_ms = 0u64;

    while t_ms <= end_ms {
        while let Some(step) = steps.next_if(|s| s.at_ms <= t_ms) {
            debug!(t_ms, event = ?step.event, "apply");
            apply(&mut row, step.event);
        }

        let frame_out = row.render();
        trace.push(TraceRecord {
            t_ms,
            offset: frame_out.translate_x,
            side: row.side(),
            phase: row.phase().name(),
            owner: owner_name(row.owner()),
            preview: preview_name(row.preview().stage()),
            hidden: frame_out.hidden,
            callbacks: std::mem::take(&mut *fired.borrow_mut()),
        });

        row.advance(frame);
        match t_ms.checked_add(frame_ms) {
            Some(next) => t_ms = next,
            None => break,
        }
    }

    Ok(trace)
}

fn apply(row: &mut SwipeRow<String>, event: ScenarioEvent) {
    if let Some(gesture) = event.as_gesture() {
        row.handle_event(gesture);
        return;
    }
    match event {
        ScenarioEvent::Layout(extents) => row.on_layout(extents),
        ScenarioEvent::Open { side } => {
            if !row.open(side) {
                debug!(%side, "programmatic open refused");
            }
        }
        ScenarioEvent::Close => row.close(),
        ScenarioEvent::Start
        | ScenarioEvent::Move(_)
        | ScenarioEvent::Release(_)
        | ScenarioEvent::Terminate => {}
    }
}
