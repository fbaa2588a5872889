#![forbid(unsafe_code)]

//! Swipe row: the gesture-to-animation state machine.
//!
//! [`SwipeRow`] owns the horizontal offset and serializes three writers onto
//! it: live drag tracking, the commit/rollback controller, and the one-shot
//! preview. Everything runs on the caller's event loop; time advances only
//! through [`SwipeRow::advance`].
//!
//! # State Machine
//!
//! ```text
//!            move past dead zone            threshold crossed
//!   Idle ─────────────────────────▶ Dragging ─────────────────▶ Committing
//!    ▲  ▲                              │                            │
//!    │  │ settle done       release    ▼                            │ done:
//!    │  └───────────────────────── Settling                         │ callback
//!    │                                                              ▼
//!    └──────────────────────────────────────────────────────── SnappingClosed
//!                         forced zero-duration snap done
//! ```
//!
//! The preview runs beside this machine in [`PreviewScheduler`] and never
//! touches gesture bookkeeping. Which writer may move the offset is tracked by
//! [`OffsetOwner`].
//!
//! # Invariants
//!
//! 1. Only one commit is in flight; moves and releases are ignored while
//!    `Committing` (the commit's completion owns the final snap).
//! 2. After a commit fires or a close is requested, later move samples of
//!    the same interaction are dropped, even once the motion has finished.
//!    The "gesture began" notification fires at most once per interaction.
//! 3. A commit's completion runs, in order: user callback, close request
//!    (a forced snap because the row was just committed), bookkeeping reset.
//! 4. `initial_offset` is only present while `Dragging`, or `Committing` out
//!    of a drag. A programmatic open from rest carries none.
//! 5. The cached side changes only on a non-zero offset.
//! 6. The preview runs at most once per row.
//!
//! # Failure Modes
//!
//! - A gesture claiming the offset mid-preview inherits the in-flight preview
//!   value as its initial offset and the remaining preview stages are dropped.
//! - A first layout that arrives while a gesture or the controller owns the
//!   offset latches the preview without running it.

use std::time::Duration;

use swipeview_core::{
    AnimatedScalar, GestureEvent, GestureSample, LayoutChange, MotionId, Observable,
    PanelExtents, PanelLayout, Subscription, SwipeSide, Timing,
};
use tracing::{debug, debug_span, trace};

use crate::config::{SwipeCallbacks, SwipeConfig};
use crate::engine::{CommitRequest, SwipeDecisionEngine};
use crate::error::{Result, SwipeError};
use crate::slots::{BoundSlots, RenderSlots, RowFrame, RowSnapshot};

// ---------------------------------------------------------------------------
// Public state types
// ---------------------------------------------------------------------------

/// Phase of the gesture/commit machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Phase {
    /// At rest, no interaction owns the offset.
    #[default]
    Idle,
    /// Finger tracking; offset = clamp(initial_offset + dx).
    Dragging { initial_offset: f64 },
    /// Animating fully open toward `target`. `initial_offset` is set only
    /// when the commit came out of a drag.
    Committing {
        side: SwipeSide,
        target: f64,
        initial_offset: Option<f64>,
    },
    /// Commit finished; forced zero-duration snap back to 0 pending.
    SnappingClosed,
    /// Animated drag-back to 0 after a release that did not commit.
    Settling,
}

impl Phase {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging { .. } => "dragging",
            Self::Committing { .. } => "committing",
            Self::SnappingClosed => "snapping_closed",
            Self::Settling => "settling",
        }
    }
}

/// Flag view of the current interaction, derived from [`Phase`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    pub initial_offset: Option<f64>,
    pub began: bool,
    pub ended: bool,
    pub just_committed: bool,
}

impl From<Phase> for GestureState {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Idle | Phase::Settling => Self::default(),
            Phase::Dragging { initial_offset } => Self {
                initial_offset: Some(initial_offset),
                began: true,
                ..Self::default()
            },
            Phase::Committing { initial_offset, .. } => Self {
                initial_offset,
                began: initial_offset.is_some(),
                ended: true,
                just_committed: false,
            },
            Phase::SnappingClosed => Self {
                just_committed: true,
                ..Self::default()
            },
        }
    }
}

/// Which writer currently holds the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetOwner {
    /// Nobody; the offset is at rest.
    #[default]
    Rest,
    /// The one-shot preview animation.
    Preview,
    /// A live drag writing 1:1 finger positions.
    Gesture,
    /// Commit, snap, or settle animation.
    Controller,
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

/// Stage of the one-shot attract animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewStage {
    /// Not yet laid out (or disabled).
    #[default]
    Pending,
    Opening,
    Closing,
    Finished,
    /// Latched without completing: skipped at layout or taken over by a
    /// gesture.
    Abandoned,
}

/// Runs the preview at most once, gated by config and a latch.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewScheduler {
    ran: bool,
    stage: PreviewStage,
}

impl PreviewScheduler {
    #[must_use]
    pub fn stage(&self) -> PreviewStage {
        self.stage
    }

    #[must_use]
    pub fn has_run(&self) -> bool {
        self.ran
    }

    fn is_active(&self) -> bool {
        matches!(self.stage, PreviewStage::Opening | PreviewStage::Closing)
    }

    /// Claim the one allowed run. Returns false if already latched.
    fn latch(&mut self) -> bool {
        !std::mem::replace(&mut self.ran, true)
    }

    fn abandon(&mut self) {
        if self.is_active() {
            self.stage = PreviewStage::Abandoned;
        }
    }
}

// ---------------------------------------------------------------------------
// Internal bookkeeping
// ---------------------------------------------------------------------------

/// What a running motion is for.
#[derive(Debug, Clone, Copy, PartialEq)]
enum MotionPurpose {
    Commit(SwipeSide),
    ForcedSnap,
    Settle,
    PreviewOpen,
    PreviewClose,
}

/// Pointer interaction scope (start to release).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Interaction {
    #[default]
    None,
    /// Started but not yet claimed as a horizontal swipe.
    Pending,
    /// Claimed as a horizontal swipe; samples drive the offset.
    Claimed,
    /// A commit or close took the offset; samples are dropped until release.
    Spent,
}

// ---------------------------------------------------------------------------
// SwipeRow
// ---------------------------------------------------------------------------

/// A swipeable row: one offset, one gesture stream.
pub struct SwipeRow<V> {
    config: SwipeConfig,
    engine: SwipeDecisionEngine,
    callbacks: SwipeCallbacks,
    slots: BoundSlots<V>,
    offset: AnimatedScalar,
    active: Option<(MotionId, MotionPurpose)>,
    phase: Observable<Phase>,
    side: Observable<SwipeSide>,
    owner: OffsetOwner,
    interaction: Interaction,
    layout: PanelLayout,
    preview: PreviewScheduler,
}

impl<V> std::fmt::Debug for SwipeRow<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeRow")
            .field("offset", &self.offset.current_value())
            .field("phase", &self.phase.get())
            .field("side", &self.side.get())
            .field("owner", &self.owner)
            .field("layout", &self.layout)
            .field("preview", &self.preview)
            .finish_non_exhaustive()
    }
}

/// Builder for [`SwipeRow`].
pub struct SwipeRowBuilder<V> {
    config: SwipeConfig,
    callbacks: SwipeCallbacks,
    slots: RenderSlots<V>,
}

impl<V> SwipeRowBuilder<V> {
    #[must_use]
    pub fn config(mut self, config: SwipeConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn callbacks(mut self, callbacks: SwipeCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    #[must_use]
    pub fn slots(mut self, slots: RenderSlots<V>) -> Self {
        self.slots = slots;
        self
    }

    /// Validate configuration and slots and build the row.
    pub fn build(self) -> Result<SwipeRow<V>> {
        let errors = self.config.validate();
        if !errors.is_empty() {
            return Err(SwipeError::InvalidConfig(errors));
        }
        let slots = self.slots.bind()?;
        let side = self.config.initial_side();
        Ok(SwipeRow {
            engine: SwipeDecisionEngine::new(&self.config),
            config: self.config,
            callbacks: self.callbacks,
            slots,
            offset: AnimatedScalar::new(0.0),
            active: None,
            phase: Observable::new(Phase::Idle),
            side: Observable::new(side),
            owner: OffsetOwner::Rest,
            interaction: Interaction::None,
            layout: PanelLayout::Unmeasured,
            preview: PreviewScheduler::default(),
        })
    }
}

impl<V> SwipeRow<V> {
    #[must_use]
    pub fn builder() -> SwipeRowBuilder<V> {
        SwipeRowBuilder {
            config: SwipeConfig::default(),
            callbacks: SwipeCallbacks::default(),
            slots: RenderSlots::new(),
        }
    }

    // -- accessors ----------------------------------------------------------

    /// Current horizontal offset, including any in-flight animation.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset.current_value()
    }

    /// Cached hidden-panel side.
    #[must_use]
    pub fn side(&self) -> SwipeSide {
        self.side.get()
    }

    /// Whether the right panel is the relevant one.
    #[must_use]
    pub fn swiping_left(&self) -> bool {
        self.side().swiping_left()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.phase().into()
    }

    #[must_use]
    pub fn owner(&self) -> OffsetOwner {
        self.owner
    }

    #[must_use]
    pub fn layout(&self) -> PanelLayout {
        self.layout
    }

    #[must_use]
    pub fn preview(&self) -> PreviewScheduler {
        self.preview
    }

    #[must_use]
    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// At rest: idle, nothing animating, nobody owns the offset.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.phase() == Phase::Idle && !self.offset.is_animating() && self.owner == OffsetOwner::Rest
    }

    /// Observe changes of the cached side.
    pub fn subscribe_side(&self, f: impl Fn(&SwipeSide) + 'static) -> Subscription {
        self.side.subscribe(f)
    }

    /// Observe phase transitions.
    pub fn subscribe_phase(&self, f: impl Fn(&Phase) + 'static) -> Subscription {
        self.phase.subscribe(f)
    }

    #[must_use]
    pub fn snapshot(&self) -> RowSnapshot {
        let phase = self.phase();
        RowSnapshot {
            offset: self.offset(),
            side: self.side(),
            phase,
            gesture: phase.into(),
            owner: self.owner,
            layout: self.layout,
        }
    }

    /// Produce the frame the render layer should draw.
    #[must_use]
    pub fn render(&self) -> RowFrame<V> {
        self.slots.render(&self.snapshot())
    }

    // -- gesture protocol ---------------------------------------------------

    /// Whether this interaction should be claimed as a horizontal swipe.
    #[must_use]
    pub fn on_gesture_move_candidate(&self, dx: f64, dy: f64) -> bool {
        self.engine.claims(GestureSample::new(dx, dy))
    }

    /// Pointer went down: a new interaction starts.
    pub fn on_gesture_start(&mut self) {
        trace!("gesture start");
        self.interaction = Interaction::Pending;
    }

    /// Apply one move sample of a claimed interaction.
    pub fn on_gesture_move(&mut self, dx: f64, dy: f64) {
        match self.interaction {
            Interaction::Spent => {
                trace!(dx, "move dropped: interaction spent");
                return;
            }
            Interaction::None | Interaction::Pending => self.interaction = Interaction::Claimed,
            Interaction::Claimed => {}
        }
        let initial_offset = match self.phase() {
            Phase::Committing { .. } | Phase::SnappingClosed => {
                trace!(dx, "move dropped: commit in flight");
                return;
            }
            Phase::Dragging { initial_offset } => initial_offset,
            Phase::Idle | Phase::Settling => {
                if self.engine.in_dead_zone(dx) {
                    return;
                }
                self.begin_drag()
            }
        };

        let sample = GestureSample::new(dx, dy);
        let Some(decision) = self.engine.evaluate(initial_offset, sample, self.side()) else {
            return;
        };
        self.offset.set_immediate(decision.offset);
        self.side.set(decision.side);
        trace!(dx, offset = decision.offset, side = %decision.side, "drag");

        if let Some(request) = decision.commit {
            self.commit(request);
        }
        self.drain();
    }

    /// Pointer released or stolen.
    pub fn on_gesture_end(&mut self) {
        let spent = self.interaction == Interaction::Spent;
        self.interaction = Interaction::None;
        match self.phase() {
            Phase::Committing { .. } | Phase::SnappingClosed => {
                trace!("release during commit: completion owns the snap");
            }
            _ if spent => {}
            _ => self.request_close(),
        }
        self.drain();
    }

    /// Route one event from the gesture source through the full protocol.
    pub fn handle_event(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Start => self.on_gesture_start(),
            GestureEvent::Move(sample) => {
                if !matches!(self.interaction, Interaction::Claimed | Interaction::Spent) {
                    if !self.engine.claims(sample) {
                        return;
                    }
                    debug!(dx = sample.dx, "horizontal swipe claimed");
                    self.interaction = Interaction::Claimed;
                }
                self.on_gesture_move(sample.dx, sample.dy);
            }
            GestureEvent::Release(_) | GestureEvent::Terminate => {
                if matches!(self.interaction, Interaction::Claimed | Interaction::Spent) {
                    self.on_gesture_end();
                } else {
                    self.interaction = Interaction::None;
                }
            }
        }
    }

    // -- programmatic control -----------------------------------------------

    /// Run the commit protocol toward `side`'s open value.
    ///
    /// Returns false if a commit is already in flight or that side's open
    /// value is 0.
    pub fn open(&mut self, side: SwipeSide) -> bool {
        if matches!(
            self.phase(),
            Phase::Committing { .. } | Phase::SnappingClosed
        ) {
            return false;
        }
        let to_value = self.config.open_value(side);
        if to_value == 0.0 {
            return false;
        }
        self.side.set(side);
        self.commit(CommitRequest { side, to_value });
        self.drain();
        true
    }

    /// Return the row to rest, as a release would.
    ///
    /// A claimed interaction still in progress stops driving the offset; its
    /// remaining samples are dropped until release.
    pub fn close(&mut self) {
        self.spend_interaction();
        self.request_close();
        self.drain();
    }

    // -- layout -------------------------------------------------------------

    /// Layout pass from the measurement collaborator.
    pub fn on_layout(&mut self, extents: PanelExtents) {
        let change = self
            .layout
            .apply(extents, self.config.recalculate_hidden_layout);
        match change {
            LayoutChange::Ignored => return,
            LayoutChange::Remeasured => {
                trace!(width = extents.width, height = extents.height, "panel remeasured");
                return;
            }
            LayoutChange::FirstMeasure => {
                debug!(width = extents.width, height = extents.height, "panel measured");
            }
        }
        if self.config.preview_swipe_demo && self.preview.latch() {
            self.start_preview();
            self.drain();
        }
    }

    // -- time ---------------------------------------------------------------

    /// Advance animations by `dt` and dispatch any completions.
    pub fn advance(&mut self, dt: Duration) {
        let mut step = dt;
        while let Some(id) = self.offset.tick(step) {
            self.on_motion_finished(id);
            step = Duration::ZERO;
        }
    }

    /// Settle zero-length motions started by the current operation.
    fn drain(&mut self) {
        self.advance(Duration::ZERO);
    }

    // -- internals ----------------------------------------------------------

    fn set_phase(&mut self, phase: Phase) {
        let prev = self.phase.get();
        if prev.name() != phase.name() {
            debug!(from = prev.name(), to = phase.name(), "phase");
        }
        self.phase.set(phase);
    }

    /// Samples still arriving for a claimed interaction must not fight the
    /// controller.
    fn spend_interaction(&mut self) {
        if self.interaction == Interaction::Claimed {
            self.interaction = Interaction::Spent;
        }
    }

    fn take_offset(&mut self, owner: OffsetOwner) {
        if self.owner == OffsetOwner::Preview && owner != OffsetOwner::Preview {
            debug!(?owner, "preview taken over");
            self.preview.abandon();
        }
        self.owner = owner;
    }

    /// First sample past the dead zone: capture the offset and notify.
    fn begin_drag(&mut self) -> f64 {
        let initial_offset = self.offset.current_value();
        self.take_offset(OffsetOwner::Gesture);
        self.active = None;
        self.set_phase(Phase::Dragging { initial_offset });
        debug!(initial_offset, "swipe gesture began");
        if let Some(cb) = self.callbacks.on_swipe_gesture_began.as_mut() {
            cb();
        }
        initial_offset
    }

    fn commit(&mut self, request: CommitRequest) {
        let _span = debug_span!("swipeview.commit", side = %request.side, to = request.to_value)
            .entered();
        let initial_offset = match self.phase() {
            Phase::Dragging { initial_offset } => Some(initial_offset),
            _ => None,
        };
        self.spend_interaction();
        self.take_offset(OffsetOwner::Controller);
        self.set_phase(Phase::Committing {
            side: request.side,
            target: request.to_value,
            initial_offset,
        });
        let id = self
            .offset
            .animate_to(request.to_value, Timing::new(self.config.swipe_duration()));
        self.active = Some((id, MotionPurpose::Commit(request.side)));
    }

    /// Close request: forced snap right after a commit, animated otherwise.
    fn request_close(&mut self) {
        match self.phase() {
            Phase::Committing { .. } => {}
            Phase::SnappingClosed => {
                let id = self.offset.animate_to(0.0, Timing::instant());
                self.take_offset(OffsetOwner::Controller);
                self.active = Some((id, MotionPurpose::ForcedSnap));
                trace!("forced snap to rest");
            }
            Phase::Idle
                if self.owner == OffsetOwner::Preview || self.offset.current_value() == 0.0 => {}
            Phase::Idle | Phase::Dragging { .. } | Phase::Settling => {
                let id = self
                    .offset
                    .animate_to(0.0, Timing::new(self.config.swipe_duration()));
                self.take_offset(OffsetOwner::Controller);
                self.active = Some((id, MotionPurpose::Settle));
                self.set_phase(Phase::Settling);
            }
        }
    }

    fn start_preview(&mut self) {
        if self.owner != OffsetOwner::Rest || self.phase() != Phase::Idle {
            debug!(owner = ?self.owner, "preview skipped: offset busy");
            self.preview.stage = PreviewStage::Abandoned;
            return;
        }
        let timing = Timing::new(self.config.preview_duration()).delay(self.config.preview_open_delay());
        let id = self.offset.animate_to(self.config.preview_open_value, timing);
        self.owner = OffsetOwner::Preview;
        self.active = Some((id, MotionPurpose::PreviewOpen));
        self.preview.stage = PreviewStage::Opening;
        debug!(to = self.config.preview_open_value, "preview opening");
    }

    fn on_motion_finished(&mut self, id: MotionId) {
        let purpose = match self.active {
            Some((active, purpose)) if active == id => purpose,
            _ => {
                trace!(motion = id.get(), "stale motion completion ignored");
                return;
            }
        };
        self.active = None;
        match purpose {
            MotionPurpose::Commit(side) => {
                debug!(%side, "commit finished");
                self.set_phase(Phase::SnappingClosed);
                if let Some(cb) = self.callbacks.swiped(side) {
                    cb();
                }
                self.request_close();
            }
            MotionPurpose::ForcedSnap | MotionPurpose::Settle => {
                self.owner = OffsetOwner::Rest;
                self.set_phase(Phase::Idle);
            }
            MotionPurpose::PreviewOpen => {
                let timing = Timing::new(self.config.preview_duration())
                    .delay(self.config.preview_close_delay());
                let id = self.offset.animate_to(0.0, timing);
                self.active = Some((id, MotionPurpose::PreviewClose));
                self.preview.stage = PreviewStage::Closing;
                debug!("preview closing");
            }
            MotionPurpose::PreviewClose => {
                self.owner = OffsetOwner::Rest;
                self.preview.stage = PreviewStage::Finished;
                debug!("preview finished");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
