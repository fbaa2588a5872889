#![forbid(unsafe_code)]

//! Scenario replay harness for swipeview rows.
//!
//! Loads a JSON [`Scenario`](scenario::Scenario), replays it against a
//! [`SwipeRow`](swipeview_runtime::SwipeRow) on a virtual clock, and yields
//! a per-frame trace suitable for golden comparison.

pub mod replay;
pub mod scenario;

pub use replay::{ReplayError, TraceRecord, replay};
pub use scenario::{Scenario, ScenarioError, ScenarioEvent, Step};
