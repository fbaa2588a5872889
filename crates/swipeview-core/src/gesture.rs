#![forbid(unsafe_code)]

//! Gesture stream types delivered by the pointer source.
//!
//! A single interaction is one [`GestureEvent::Start`], any number of
//! [`GestureEvent::Move`] samples, and exactly one terminal event
//! ([`GestureEvent::Release`] or [`GestureEvent::Terminate`]). Displacements
//! are cumulative from the start of the interaction, not per-sample deltas.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cumulative displacement since the gesture started, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GestureSample {
    pub dx: f64,
    pub dy: f64,
}

impl GestureSample {
    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Horizontal displacement only.
    #[must_use]
    pub const fn horizontal(dx: f64) -> Self {
        Self { dx, dy: 0.0 }
    }
}

/// One event from the gesture source.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum GestureEvent {
    /// Pointer went down.
    Start,
    /// Pointer moved; carries cumulative displacement.
    Move(GestureSample),
    /// Pointer lifted.
    Release(GestureSample),
    /// Another recognizer took the pointer stream.
    Terminate,
}

impl GestureEvent {
    /// Whether this event ends the interaction.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Release(_) | Self::Terminate)
    }
}

/// Which hidden panel is relevant.
///
/// A rightward drag (positive offset) reveals the left panel; a leftward
/// drag (negative offset) reveals the right panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SwipeSide {
    Left,
    Right,
}

impl SwipeSide {
    /// Side implied by `offset`. Exactly zero keeps `previous`.
    #[must_use]
    pub fn from_offset(offset: f64, previous: Self) -> Self {
        if offset > 0.0 {
            Self::Left
        } else if offset < 0.0 {
            Self::Right
        } else {
            previous
        }
    }

    /// Side cached from a `swiping_left` flag.
    #[must_use]
    pub const fn from_swiping_left(swiping_left: bool) -> Self {
        if swiping_left { Self::Right } else { Self::Left }
    }

    /// True when the content is being swiped toward the left edge.
    #[must_use]
    pub const fn swiping_left(self) -> bool {
        matches!(self, Self::Right)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl std::fmt::Display for SwipeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
