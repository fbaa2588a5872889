#![forbid(unsafe_code)]

//! Policy-as-data configuration for a swipe row.
//!
//! [`SwipeConfig`] captures every tunable threshold and duration. With the
//! `config-file` feature it can be loaded from TOML or JSON:
//!
//! ```toml
//! left_open_value = 80.0
//! right_open_value = -80.0
//! swipe_to_open_percent = 35.0
//! preview_swipe_demo = true
//! ```
//!
//! ```rust,ignore
//! let config = SwipeConfig::from_toml_file("row.toml")?;
//! ```
//!
//! # Defaults
//!
//! `SwipeConfig::default()` leaves both open values at 0, which disables
//! committing in either direction until a value is set.
//!
//! Callbacks are not data and live in [`SwipeCallbacks`].

#[cfg(feature = "config-file")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

use swipeview_core::SwipeSide;

use crate::error::ConfigError;

/// Immutable per-row configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct SwipeConfig {
    /// Terminal offset of a rightward commit (positive; 0 disables).
    pub left_open_value: f64,
    /// Terminal offset of a leftward commit (negative; 0 disables).
    pub right_open_value: f64,
    /// Duration of commit and drag-back animations.
    pub swipe_duration_ms: u64,
    /// Percent of the open value that must be crossed to commit.
    pub swipe_to_open_percent: f64,
    /// Clamp any positive offset to 0.
    pub disable_swipe_to_left: bool,
    /// Clamp any negative offset to 0.
    pub disable_swipe_to_right: bool,
    /// Run the one-shot attract animation after first layout.
    pub preview_swipe_demo: bool,
    pub preview_duration_ms: u64,
    pub preview_open_value: f64,
    pub preview_open_delay_ms: u64,
    pub preview_close_delay_ms: u64,
    /// Initial cached side: true caches the right panel.
    pub swiping_left: bool,
    /// Re-measure panel extents on every layout pass.
    pub recalculate_hidden_layout: bool,
    /// Dead zone, in layout units, before a move counts as a swipe.
    pub directional_distance_change_threshold: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            left_open_value: 0.0,
            right_open_value: 0.0,
            swipe_duration_ms: 250,
            swipe_to_open_percent: 35.0,
            disable_swipe_to_left: false,
            disable_swipe_to_right: false,
            preview_swipe_demo: false,
            preview_duration_ms: 300,
            preview_open_value: -60.0,
            preview_open_delay_ms: 350,
            preview_close_delay_ms: 300,
            swiping_left: true,
            recalculate_hidden_layout: false,
            directional_distance_change_threshold: 2.0,
        }
    }
}

impl SwipeConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.checked()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Return `self` if [`validate`](Self::validate) finds nothing.
    pub fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Validate parameters.
    ///
    /// Permissive: out-of-range percentages and open values with the
    /// "wrong" sign are accepted and simply never (or always) commit. Only
    /// non-finite numbers are rejected. An empty list means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let finite = [
            ("left_open_value", self.left_open_value),
            ("right_open_value", self.right_open_value),
            ("swipe_to_open_percent", self.swipe_to_open_percent),
            ("preview_open_value", self.preview_open_value),
            (
                "directional_distance_change_threshold",
                self.directional_distance_change_threshold,
            ),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                errors.push(format!("{name} must be finite, got {value}"));
            }
        }
        errors
    }

    #[must_use]
    pub fn swipe_duration(&self) -> Duration {
        Duration::from_millis(self.swipe_duration_ms)
    }

    #[must_use]
    pub fn preview_duration(&self) -> Duration {
        Duration::from_millis(self.preview_duration_ms)
    }

    #[must_use]
    pub fn preview_open_delay(&self) -> Duration {
        Duration::from_millis(self.preview_open_delay_ms)
    }

    #[must_use]
    pub fn preview_close_delay(&self) -> Duration {
        Duration::from_millis(self.preview_close_delay_ms)
    }

    /// Side cached before any offset has been observed.
    #[must_use]
    pub fn initial_side(&self) -> SwipeSide {
        SwipeSide::from_swiping_left(self.swiping_left)
    }

    /// Open value for the panel on `side`.
    #[must_use]
    pub fn open_value(&self, side: SwipeSide) -> f64 {
        match side {
            SwipeSide::Left => self.left_open_value,
            SwipeSide::Right => self.right_open_value,
        }
    }
}

/// User callbacks fired by the row.
#[derive(Default)]
pub struct SwipeCallbacks {
    /// Fired once a leftward commit has finished animating.
    pub on_swiped_left: Option<Box<dyn FnMut()>>,
    /// Fired once a rightward commit has finished animating.
    pub on_swiped_right: Option<Box<dyn FnMut()>>,
    /// Fired once per interaction when the dead zone is first crossed.
    pub on_swipe_gesture_began: Option<Box<dyn FnMut()>>,
}

impl SwipeCallbacks {
    #[must_use]
    pub fn on_swiped_left(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_swiped_left = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_swiped_right(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_swiped_right = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_swipe_gesture_began(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_swipe_gesture_began = Some(Box::new(f));
        self
    }

    /// Callback for a commit that revealed the panel on `side`.
    ///
    /// Revealing the left panel means the content was swiped right.
    pub(crate) fn swiped(&mut self, side: SwipeSide) -> Option<&mut Box<dyn FnMut()>> {
        match side {
            SwipeSide::Left => self.on_swiped_right.as_mut(),
            SwipeSide::Right => self.on_swiped_left.as_mut(),
        }
    }
}

impl std::fmt::Debug for SwipeCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeCallbacks")
            .field("on_swiped_left", &self.on_swiped_left.is_some())
            .field("on_swiped_right", &self.on_swiped_right.is_some())
            .field(
                "on_swipe_gesture_began",
                &self.on_swipe_gesture_began.is_some(),
            )
            .finish()
    }
}
