#![forbid(unsafe_code)]

//! Animated scalar: a single interruptible timed value.
//!
//! [`AnimatedScalar`] is the one piece of mutable motion state a swipe row
//! owns. It can be set immediately (1:1 finger tracking) or driven toward a
//! target over a duration, optionally after a delay. Time only moves when the
//! caller invokes [`tick`](AnimatedScalar::tick), so the scalar is fully
//! deterministic under a virtual clock.
//!
//! # Invariants
//!
//! 1. At most one motion runs at a time. Starting a motion, or calling
//!    [`set_immediate`](AnimatedScalar::set_immediate), replaces the running
//!    one (last writer wins).
//! 2. A replaced motion never reports completion.
//! 3. While a delay elapses the value does not move; the interpolation start
//!    value is captured when the delay ends.
//! 4. `tick()` reports a finished motion exactly once, and the value equals
//!    the motion's target at that point.
//! 5. A motion with zero delay and zero duration finishes on the next tick,
//!    including a tick with `dt == 0`.
//!
//! # Failure Modes
//!
//! - Non-finite targets are stored as-is; callers validate configuration
//!   before it reaches the scalar.
//! - Leftover time in a tick that finishes a motion is discarded; it is not
//!   carried into a motion started from a completion handler.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// Easing curve mapping linear progress `t ∈ [0, 1]` to eased progress.
pub type EasingFn = fn(f64) -> f64;

/// Identity easing.
#[must_use]
pub fn linear(t: f64) -> f64 {
    t
}

/// Quadratic ease-in.
#[must_use]
pub fn ease_in(t: f64) -> f64 {
    t * t
}

/// Quadratic ease-out.
#[must_use]
pub fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Cubic ease-in-out. Default curve for timed motions.
#[must_use]
pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

// ---------------------------------------------------------------------------
// Motion
// ---------------------------------------------------------------------------

/// Identifier of a motion started with [`AnimatedScalar::animate_to`].
///
/// Ids are unique per scalar and increase monotonically, so a stale id can
/// always be told apart from the currently running motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MotionId(u64);

impl MotionId {
    /// Raw sequence number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Timing parameters for one motion.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    pub duration: Duration,
    pub delay: Duration,
    pub easing: EasingFn,
}

impl Timing {
    /// Timing with the default ease-in-out curve and no delay.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            delay: Duration::ZERO,
            easing: ease_in_out,
        }
    }

    /// Zero-length timing: the motion lands on its target at the next tick.
    #[must_use]
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Set the delay before the motion starts (builder pattern).
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct Motion {
    id: MotionId,
    /// Captured when the delay has elapsed.
    from: Option<f64>,
    to: f64,
    timing: Timing,
    /// Time spent in the delay phase.
    waited: Duration,
    /// Time spent interpolating.
    elapsed: Duration,
}

impl Motion {
    fn progress(&self) -> f64 {
        if self.timing.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.timing.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// AnimatedScalar
// ---------------------------------------------------------------------------

/// A numeric value that can be set immediately or animated toward a target.
#[derive(Debug, Clone)]
pub struct AnimatedScalar {
    value: f64,
    motion: Option<Motion>,
    next_id: u64,
}

impl AnimatedScalar {
    /// Create a scalar at rest at `value`.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            motion: None,
            next_id: 1,
        }
    }

    /// The instantaneous value, including any in-flight interpolation.
    #[must_use]
    pub fn current_value(&self) -> f64 {
        self.value
    }

    /// Target of the running motion, or the current value when at rest.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.motion.map_or(self.value, |m| m.to)
    }

    /// Whether a motion (including its delay phase) is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.motion.is_some()
    }

    /// Id of the running motion, if any.
    #[must_use]
    pub fn running(&self) -> Option<MotionId> {
        self.motion.map(|m| m.id)
    }

    /// Jump to `value`, cancelling any running motion without completion.
    pub fn set_immediate(&mut self, value: f64) {
        if let Some(m) = self.motion.take() {
            tracing::trace!(motion = m.id.0, "motion preempted by immediate set");
        }
        self.value = value;
    }

    /// Start a motion toward `to`. Any running motion is replaced.
    pub fn animate_to(&mut self, to: f64, timing: Timing) -> MotionId {
        let id = MotionId(self.next_id);
        self.next_id += 1;
        if let Some(prev) = self.motion.take() {
            tracing::trace!(
                motion = prev.id.0,
                replaced_by = id.0,
                "motion preempted by new target"
            );
        }
        self.motion = Some(Motion {
            id,
            from: None,
            to,
            timing,
            waited: Duration::ZERO,
            elapsed: Duration::ZERO,
        });
        id
    }

    /// Advance the running motion by `dt`.
    ///
    /// Returns the id of the motion that finished during this tick.
    pub fn tick(&mut self, dt: Duration) -> Option<MotionId> {
        let mut motion = self.motion?;

        let mut remaining = dt;
        if motion.waited < motion.timing.delay {
            let left = motion.timing.delay - motion.waited;
            if remaining < left {
                motion.waited += remaining;
                self.motion = Some(motion);
                return None;
            }
            motion.waited = motion.timing.delay;
            remaining -= left;
        }

        let from = *motion.from.get_or_insert(self.value);
        motion.elapsed = motion.elapsed.saturating_add(remaining);
        let t = motion.progress();

        if t >= 1.0 {
            self.value = motion.to;
            self.motion = None;
            return Some(motion.id);
        }

        let eased = (motion.timing.easing)(t);
        self.value = from + (motion.to - from) * eased;
        self.motion = Some(motion);
        None
    }
}

impl Default for AnimatedScalar {
    fn default() -> Self {
        Self::new(0.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn set_immediate_moves_value() {
        let mut s = AnimatedScalar::new(0.0);
        s.set_immediate(42.0);
        assert_eq!(s.current_value(), 42.0);
        assert!(!s.is_animating());
    }

    #[test]
    fn linear_motion_interpolates() {
        let mut s = AnimatedScalar::new(0.0);
        s.animate_to(100.0, Timing::new(ms(100)).easing(linear));
        assert_eq!(s.tick(ms(25)), None);
        assert!((s.current_value() - 25.0).abs() < 1e-9);
        assert_eq!(s.tick(ms(25)), None);
        assert!((s.current_value() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn motion_reports_completion_once() {
        let mut s = AnimatedScalar::new(10.0);
        let id = s.animate_to(-60.0, Timing::new(ms(100)));
        assert_eq!(s.tick(ms(200)), Some(id));
        assert_eq!(s.current_value(), -60.0);
        assert_eq!(s.tick(ms(16)), None);
    }

    #[test]
    fn zero_length_motion_finishes_on_zero_tick() {
        let mut s = AnimatedScalar::new(80.0);
        let id = s.animate_to(0.0, Timing::instant());
        assert_eq!(s.tick(Duration::ZERO), Some(id));
        assert_eq!(s.current_value(), 0.0);
    }

    #[test]
    fn delay_holds_value() {
        let mut s = AnimatedScalar::new(0.0);
        s.animate_to(-60.0, Timing::new(ms(300)).delay(ms(350)));
        for _ in 0..21 {
            assert_eq!(s.tick(MS_16), None);
        }
        // 336ms elapsed, still inside the delay.
        assert_eq!(s.current_value(), 0.0);
        s.tick(ms(30));
        assert!(s.current_value() < 0.0);
    }

    #[test]
    fn start_value_captured_after_delay() {
        let mut s = AnimatedScalar::new(0.0);
        s.animate_to(100.0, Timing::new(ms(100)).delay(ms(50)).easing(linear));
        s.tick(ms(50));
        assert_eq!(s.current_value(), 0.0);
        s.tick(ms(50));
        assert!((s.current_value() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn new_target_preempts_running_motion() {
        let mut s = AnimatedScalar::new(0.0);
        let first = s.animate_to(100.0, Timing::new(ms(100)).easing(linear));
        s.tick(ms(50));
        let second = s.animate_to(0.0, Timing::new(ms(100)).easing(linear));
        assert_ne!(first, second);
        assert_eq!(s.running(), Some(second));
        // Restarts from the in-flight value, never reports the first id.
        assert_eq!(s.tick(ms(200)), Some(second));
        assert_eq!(s.current_value(), 0.0);
    }

    #[test]
    fn set_immediate_cancels_without_completion() {
        let mut s = AnimatedScalar::new(0.0);
        s.animate_to(100.0, Timing::new(ms(100)));
        s.set_immediate(7.0);
        assert_eq!(s.tick(ms(500)), None);
        assert_eq!(s.current_value(), 7.0);
    }

    #[test]
    fn easing_endpoints() {
        for easing in [linear, ease_in, ease_out, ease_in_out] {
            assert!(easing(0.0).abs() < 1e-12);
            assert!((easing(1.0) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn easing_functions_are_monotonic() {
        for easing in [linear, ease_in, ease_out, ease_in_out] {
            let mut prev = 0.0f64;
            for i in 0..=100 {
                let t = f64::from(i) / 100.0;
                let v = easing(t);
                assert!(v >= prev - 1e-9, "easing should be monotonic at t={t}");
                prev = v;
            }
        }
    }
}
