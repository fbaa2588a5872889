#![forbid(unsafe_code)]

//! swipeview public facade.
//!
//! A swipeable row: content that can be dragged horizontally to reveal a
//! hidden left or right panel, commits open once a threshold is crossed, and
//! can run a one-shot preview animation after first layout.
//!
//! ```rust,ignore
//! use swipeview::prelude::*;
//!
//! let mut row = SwipeRow::builder()
//!     .config(SwipeConfig { left_open_value: 80.0, ..SwipeConfig::default() })
//!     .slots(RenderSlots::new().visible(|_| "row"))
//!     .build()?;
//!
//! row.handle_event(GestureEvent::Start);
//! row.handle_event(GestureEvent::Move(GestureSample::horizontal(35.0)));
//! row.advance(std::time::Duration::from_millis(16));
//! ```

pub use swipeview_core as core;
pub use swipeview_runtime as runtime;

pub use swipeview_core::{
    AnimatedScalar, GestureEvent, GestureSample, PanelExtents, PanelLayout, SwipeSide,
};
pub use swipeview_runtime::{
    ConfigError, GestureState, Phase, RenderSlots, RowFrame, RowSnapshot, SwipeCallbacks,
    SwipeConfig, SwipeError, SwipeRow,
};

/// Glob-importable set of the types most callers need.
pub mod prelude {
    pub use crate::{
        GestureEvent, GestureSample, PanelExtents, Phase, RenderSlots, RowFrame, RowSnapshot,
        SwipeCallbacks, SwipeConfig, SwipeError, SwipeRow, SwipeSide,
    };
}
