#![forbid(unsafe_code)]

//! Swipe decision engine: displacement in, decision out.
//!
//! [`SwipeDecisionEngine`] turns one cumulative displacement sample into a
//! [`MoveDecision`]: the clamped offset to write, the side to cache, and
//! whether the open threshold was crossed. It holds no per-interaction
//! state; [`SwipeRow`](crate::row::SwipeRow) owns that and applies the
//! decision.
//!
//! # Evaluation order
//!
//! Per sample: dead zone, then clamp, then classify, then threshold. The
//! side must be classified before the threshold check because the render
//! layer consults it on the same sample.
//!
//! # Invariants
//!
//! 1. `|dx| <= threshold` never produces a decision.
//! 2. With a direction disabled, the offset never has that sign.
//! 3. An offset of exactly 0 keeps the previous side.
//! 4. The left threshold is checked before the right one and at most one
//!    commit is returned.
//! 5. An open value of 0 disables committing toward that side.

use swipeview_core::{GestureSample, SwipeSide};

use crate::config::SwipeConfig;

/// A commit-open request produced by a move sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommitRequest {
    /// Panel being revealed.
    pub side: SwipeSide,
    /// Terminal offset to animate to.
    pub to_value: f64,
}

/// Result of evaluating one move sample outside the dead zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveDecision {
    pub offset: f64,
    pub side: SwipeSide,
    pub commit: Option<CommitRequest>,
}

/// Thresholds and clamp policy extracted from a [`SwipeConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeDecisionEngine {
    threshold: f64,
    left_open_value: f64,
    right_open_value: f64,
    open_fraction: f64,
    disable_swipe_to_left: bool,
    disable_swipe_to_right: bool,
}

impl SwipeDecisionEngine {
    #[must_use]
    pub fn new(config: &SwipeConfig) -> Self {
        Self {
            threshold: config.directional_distance_change_threshold,
            left_open_value: config.left_open_value,
            right_open_value: config.right_open_value,
            open_fraction: config.swipe_to_open_percent / 100.0,
            disable_swipe_to_left: config.disable_swipe_to_left,
            disable_swipe_to_right: config.disable_swipe_to_right,
        }
    }

    /// Whether an interaction should be claimed as a horizontal swipe.
    ///
    /// `false` releases the pointer stream to a competing recognizer.
    #[must_use]
    pub fn claims(&self, sample: GestureSample) -> bool {
        sample.dx.abs() > self.threshold
    }

    /// Whether `dx` is still inside the dead zone.
    #[must_use]
    pub fn in_dead_zone(&self, dx: f64) -> bool {
        dx.abs() <= self.threshold
    }

    /// Apply the disabled-direction clamp. Clamps to exactly 0.
    #[must_use]
    pub fn clamp(&self, proposed: f64) -> f64 {
        if self.disable_swipe_to_left && proposed > 0.0 {
            return 0.0;
        }
        if self.disable_swipe_to_right && proposed < 0.0 {
            return 0.0;
        }
        proposed
    }

    /// Commit request implied by `offset`, if a threshold is crossed.
    #[must_use]
    pub fn commit_for(&self, offset: f64) -> Option<CommitRequest> {
        if offset >= 0.0 {
            let crossed = self.left_open_value != 0.0
                && offset > self.left_open_value * self.open_fraction;
            return crossed.then_some(CommitRequest {
                side: SwipeSide::Left,
                to_value: self.left_open_value,
            });
        }
        let crossed =
            self.right_open_value != 0.0 && offset < self.right_open_value * self.open_fraction;
        crossed.then_some(CommitRequest {
            side: SwipeSide::Right,
            to_value: self.right_open_value,
        })
    }

    /// Evaluate a move sample against the offset captured at gesture begin.
    ///
    /// Returns `None` inside the dead zone.
    #[must_use]
    pub fn evaluate(
        &self,
        initial_offset: f64,
        sample: GestureSample,
        previous_side: SwipeSide,
    ) -> Option<MoveDecision> {
        if self.in_dead_zone(sample.dx) {
            return None;
        }
        let offset = self.clamp(initial_offset + sample.dx);
        let side = SwipeSide::from_offset(offset, previous_side);
        let commit = self.commit_for(offset);
        Some(MoveDecision {
            offset,
            side,
            commit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(f: impl FnOnce(&mut SwipeConfig)) -> SwipeDecisionEngine {
        let mut c = SwipeConfig::default();
        f(&mut c);
        SwipeDecisionEngine::new(&c)
    }

    #[test]
    fn claims_only_outside_dead_zone() {
        let e = engine(|_| {});
        assert!(!e.claims(GestureSample::new(2.0, 40.0)));
        assert!(!e.claims(GestureSample::new(-2.0, 0.0)));
        assert!(e.claims(GestureSample::new(2.5, 0.0)));
        assert!(e.claims(GestureSample::new(-3.0, 100.0)));
    }

    #[test]
    fn dead_zone_yields_nothing() {
        let e = engine(|c| c.left_open_value = 80.0);
        assert_eq!(
            e.evaluate(0.0, GestureSample::horizontal(2.0), SwipeSide::Right),
            None
        );
    }

    #[test]
    fn drag_then_commit_past_threshold() {
        let e = engine(|c| c.left_open_value = 80.0);
        let d = e
            .evaluate(0.0, GestureSample::horizontal(10.0), SwipeSide::Right)
            .expect("outside dead zone");
        assert_eq!(d.offset, 10.0);
        assert_eq!(d.side, SwipeSide::Left);
        assert_eq!(d.commit, None);

        let d = e
            .evaluate(0.0, GestureSample::horizontal(35.0), SwipeSide::Left)
            .expect("outside dead zone");
        assert_eq!(d.offset, 35.0);
        assert_eq!(
            d.commit,
            Some(CommitRequest {
                side: SwipeSide::Left,
                to_value: 80.0
            })
        );
    }

    #[test]
    fn disabled_direction_clamps_to_zero() {
        let e = engine(|c| {
            c.disable_swipe_to_right = true;
            c.right_open_value = -80.0;
        });
        let d = e
            .evaluate(0.0, GestureSample::horizontal(-50.0), SwipeSide::Left)
            .expect("outside dead zone");
        assert_eq!(d.offset, 0.0);
        assert_eq!(d.side, SwipeSide::Left);
        assert_eq!(d.commit, None);
    }

    #[test]
    fn disable_left_clamps_positive() {
        let e = engine(|c| c.disable_swipe_to_left = true);
        assert_eq!(e.clamp(12.0), 0.0);
        assert_eq!(e.clamp(-12.0), -12.0);
    }

    #[test]
    fn full_percent_threshold_needs_full_open_value() {
        let e = engine(|c| {
            c.left_open_value = 80.0;
            c.swipe_to_open_percent = 100.0;
        });
        assert_eq!(e.commit_for(79.0), None);
        assert_eq!(e.commit_for(80.0), None);
        assert!(e.commit_for(81.0).is_some());
    }

    #[test]
    fn right_commit_uses_negative_threshold() {
        let e = engine(|c| c.right_open_value = -100.0);
        assert_eq!(e.commit_for(-35.0), None);
        assert_eq!(
            e.commit_for(-35.5),
            Some(CommitRequest {
                side: SwipeSide::Right,
                to_value: -100.0
            })
        );
    }

    #[test]
    fn zero_open_value_never_commits() {
        let e = engine(|_| {});
        assert_eq!(e.commit_for(500.0), None);
        assert_eq!(e.commit_for(-500.0), None);
    }

    #[test]
    fn drag_continues_from_initial_offset() {
        let e = engine(|_| {});
        let d = e
            .evaluate(-40.0, GestureSample::horizontal(15.0), SwipeSide::Right)
            .expect("outside dead zone");
        assert_eq!(d.offset, -25.0);
        assert_eq!(d.side, SwipeSide::Right);
    }
}
