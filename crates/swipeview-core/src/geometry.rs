#![forbid(unsafe_code)]

//! Hidden panel extents and their measurement lifecycle.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Measured size of the hidden panel area, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelExtents {
    pub width: f64,
    pub height: f64,
}

impl PanelExtents {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Zero-sized extents used before the first measurement.
    pub const ZERO: Self = Self::new(0.0, 0.0);
}

/// Measurement state of the hidden panel.
///
/// `Unmeasured -> Measured`, with `Measured` re-entering itself only when
/// recalculation on every layout pass is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanelLayout {
    #[default]
    Unmeasured,
    Measured(PanelExtents),
}

/// Outcome of feeding a layout pass into [`PanelLayout::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutChange {
    /// First measurement; the row is now laid out.
    FirstMeasure,
    /// A later measurement replaced the stored extents.
    Remeasured,
    /// Extents are frozen; the pass was ignored.
    Ignored,
}

impl PanelLayout {
    /// Record a layout pass.
    pub fn apply(&mut self, extents: PanelExtents, recalculate: bool) -> LayoutChange {
        match self {
            Self::Unmeasured => {
                *self = Self::Measured(extents);
                LayoutChange::FirstMeasure
            }
            Self::Measured(current) if recalculate => {
                *current = extents;
                LayoutChange::Remeasured
            }
            Self::Measured(_) => LayoutChange::Ignored,
        }
    }

    /// Extents to give the hidden panel; zero until measured.
    #[must_use]
    pub fn extents(&self) -> PanelExtents {
        match self {
            Self::Unmeasured => PanelExtents::ZERO,
            Self::Measured(e) => *e,
        }
    }

    #[must_use]
    pub fn is_measured(&self) -> bool {
        matches!(self, Self::Measured(_))
    }
}
