#![forbid(unsafe_code)]

//! Scenario files: a config plus a timed list of row inputs.
//!
//! ```json
//! {
//!   "config": { "left_open_value": 80.0 },
//!   "steps": [
//!     { "at_ms": 0,   "event": { "kind": "layout", "width": 360, "height": 56 } },
//!     { "at_ms": 100, "event": { "kind": "start" } },
//!     { "at_ms": 116, "event": { "kind": "move", "dx": 10, "dy": 0 } },
//!     { "at_ms": 132, "event": { "kind": "move", "dx": 35, "dy": 0 } },
//!     { "at_ms": 500, "event": { "kind": "release", "dx": 35, "dy": 0 } }
//!   ]
//! }
//! ```
//!
//! Steps must be sorted by `at_ms`; [`Scenario::validate`] enforces it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use swipeview_core::{GestureEvent, GestureSample, PanelExtents, SwipeSide};
use swipeview_runtime::SwipeConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scenario validation failed: {0}")]
    Validation(String),
}

/// One input to the row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioEvent {
    Start,
    Move(GestureSample),
    Release(GestureSample),
    Terminate,
    Layout(PanelExtents),
    Open { side: SwipeSide },
    Close,
}

impl ScenarioEvent {
    /// Gesture-source part of the event, if any.
    #[must_use]
    pub fn as_gesture(&self) -> Option<GestureEvent> {
        match *self {
            Self::Start => Some(GestureEvent::Start),
            Self::Move(s) => Some(GestureEvent::Move(s)),
            Self::Release(s) => Some(GestureEvent::Release(s)),
            Self::Terminate => Some(GestureEvent::Terminate),
            Self::Layout(_) | Self::Open { .. } | Self::Close => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub at_ms: u64,
    pub event: ScenarioEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: SwipeConfig,
    pub steps: Vec<Step>,
    /// Extra time to run after the last step so animations can finish.
    #[serde(default = "default_tail_ms")]
    pub tail_ms: u64,
}

fn default_tail_ms() -> u64 {
    1_000
}

impl Scenario {
    pub fn from_json_str(s: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = serde_json::from_str(s)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if let Some(w) = self.steps.windows(2).find(|w| w[1].at_ms < w[0].at_ms) {
            return Err(ScenarioError::Validation(format!(
                "steps out of order: {}ms after {}ms",
                w[1].at_ms, w[0].at_ms
            )));
        }
        let errors = self.config.validate();
        if !errors.is_empty() {
            return Err(ScenarioError::Validation(errors.join("; ")));
        }
        Ok(())
    }

    /// Time of the last step.
    #[must_use]
    pub fn last_step_ms(&self) -> u64 {
        self.steps.last().map_or(0, |s| s.at_ms)
    }
}
