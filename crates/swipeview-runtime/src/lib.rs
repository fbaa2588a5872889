#![forbid(unsafe_code)]

//! Runtime: the swipe row state machine.
//!
//! # Role in swipeview
//! `swipeview-runtime` turns a noisy stream of gesture samples into a
//! deterministic decision (ignore, drag, commit open, roll back) and drives
//! the row's [`AnimatedScalar`](swipeview_core::AnimatedScalar) accordingly.
//!
//! # Primary responsibilities
//! - **SwipeDecisionEngine**: dead zone, clamp, side classification, and the
//!   open threshold.
//! - **SwipeRow**: phase machine, commit/rollback protocol, one-shot preview,
//!   panel measurement, render slots.
//! - **SwipeConfig**: thresholds and durations, optionally loaded from files.

pub mod config;
pub mod engine;
pub mod error;
pub mod row;
pub mod slots;

pub use config::{SwipeCallbacks, SwipeConfig};
pub use engine::{CommitRequest, MoveDecision, SwipeDecisionEngine};
pub use error::{ConfigError, Result, SwipeError};
pub use row::{
    GestureState, OffsetOwner, Phase, PreviewScheduler, PreviewStage, SwipeRow, SwipeRowBuilder,
};
pub use slots::{RenderSlots, RowFrame, RowSnapshot, SlotFn};
