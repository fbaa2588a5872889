#![forbid(unsafe_code)]

//! Render slots and the per-frame output of a row.
//!
//! The row does not render anything itself. It hands a [`RowSnapshot`] to
//! caller-supplied producers and packages the results with the current
//! translation into a [`RowFrame`].

use swipeview_core::{PanelExtents, PanelLayout, SwipeSide};

use crate::error::{Result, SwipeError};
use crate::row::{GestureState, OffsetOwner, Phase};

/// Producer of a view from the row's current state.
pub type SlotFn<V> = Box<dyn Fn(&RowSnapshot) -> V>;

/// Read-only state handed to slot producers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSnapshot {
    pub offset: f64,
    pub side: SwipeSide,
    pub phase: Phase,
    pub gesture: GestureState,
    pub owner: OffsetOwner,
    pub layout: PanelLayout,
}

/// Render slots supplied by the application.
///
/// `visible` is required; `left` and `right` are optional hidden panels.
pub struct RenderSlots<V> {
    visible: Option<SlotFn<V>>,
    left: Option<SlotFn<V>>,
    right: Option<SlotFn<V>>,
}

impl<V> Default for RenderSlots<V> {
    fn default() -> Self {
        Self {
            visible: None,
            left: None,
            right: None,
        }
    }
}

impl<V> RenderSlots<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the visible content producer (builder pattern).
    #[must_use]
    pub fn visible(mut self, f: impl Fn(&RowSnapshot) -> V + 'static) -> Self {
        self.visible = Some(Box::new(f));
        self
    }

    /// Set the left hidden panel producer (builder pattern).
    #[must_use]
    pub fn left(mut self, f: impl Fn(&RowSnapshot) -> V + 'static) -> Self {
        self.left = Some(Box::new(f));
        self
    }

    /// Set the right hidden panel producer (builder pattern).
    #[must_use]
    pub fn right(mut self, f: impl Fn(&RowSnapshot) -> V + 'static) -> Self {
        self.right = Some(Box::new(f));
        self
    }

    pub(crate) fn bind(self) -> Result<BoundSlots<V>> {
        let visible = self.visible.ok_or(SwipeError::MissingVisibleContent)?;
        Ok(BoundSlots {
            visible,
            left: self.left,
            right: self.right,
        })
    }
}

impl<V> std::fmt::Debug for RenderSlots<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderSlots")
            .field("visible", &self.visible.is_some())
            .field("left", &self.left.is_some())
            .field("right", &self.right.is_some())
            .finish()
    }
}

/// Slots after validation; the visible producer is guaranteed present.
pub(crate) struct BoundSlots<V> {
    visible: SlotFn<V>,
    left: Option<SlotFn<V>>,
    right: Option<SlotFn<V>>,
}

impl<V> BoundSlots<V> {
    pub(crate) fn render(&self, snapshot: &RowSnapshot) -> RowFrame<V> {
        // A leftward swipe uncovers the right panel.
        let hidden_slot = if snapshot.side.swiping_left() {
            self.right.as_ref()
        } else {
            self.left.as_ref()
        };
        RowFrame {
            translate_x: snapshot.offset,
            hidden_extents: snapshot.layout.extents(),
            hidden_side: snapshot.side,
            hidden: hidden_slot.map(|f| f(snapshot)),
            visible: (self.visible)(snapshot),
            measured: snapshot.layout.is_measured(),
        }
    }
}

/// One frame of row output for the render layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFrame<V> {
    /// Horizontal translation of the visible content.
    pub translate_x: f64,
    /// Size of the hidden panel area; zero until measured.
    pub hidden_extents: PanelExtents,
    /// Panel the hidden view belongs to.
    pub hidden_side: SwipeSide,
    /// Hidden panel view, if that side has a slot.
    pub hidden: Option<V>,
    pub visible: V,
    /// False until the first layout measurement; the render layer keeps
    /// reporting layout passes while this is false.
    pub measured: bool,
}
