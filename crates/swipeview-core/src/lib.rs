#![forbid(unsafe_code)]

//! Core: leaf primitives for swipeable rows.
//!
//! # Role in swipeview
//! `swipeview-core` holds the collaborators the swipe state machine reads
//! from and drives: the interruptible [`AnimatedScalar`] that carries the
//! horizontal offset, the gesture stream types, the hidden panel measurement
//! lifecycle, and an [`Observable`] for pushing state to the render layer.
//!
//! # How it fits in the system
//! `swipeview-runtime` owns the state machine and consumes these types. The
//! core has no notion of commits or previews; it only knows how values move.

pub mod animation;
pub mod geometry;
pub mod gesture;
pub mod observable;

pub use animation::{AnimatedScalar, EasingFn, MotionId, Timing};
pub use geometry::{LayoutChange, PanelExtents, PanelLayout};
pub use gesture::{GestureEvent, GestureSample, SwipeSide};
pub use observable::{Observable, Subscription};
