//! Interruptible tweens for the animated screen regions.
//!
//! Every animated visual channel (panel offset, button stagger, toggle
//! colors, icon rotation) is one [`Tween`]. Flipping the menu flag retargets
//! the tween from whatever value it currently shows, so rapid toggling never
//! snaps or replays from the original start.

pub mod ease;

pub use ease::Ease;

use palette::Srgba;
use std::time::{Duration, Instant};

/// Values a [`Tween`] can interpolate.
pub trait Lerp: Copy + PartialEq {
    fn lerp(from: Self, to: Self, f: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(from: Self, to: Self, f: f64) -> Self {
        from + (to - from) * f
    }
}

impl Lerp for Srgba<f64> {
    fn lerp(from: Self, to: Self, f: f64) -> Self {
        Srgba::new(
            f64::lerp(from.red, to.red, f),
            f64::lerp(from.green, to.green, f),
            f64::lerp(from.blue, to.blue, f),
            f64::lerp(from.alpha, to.alpha, f),
        )
    }
}

/// A fixed-duration eased interpolation toward a target value.
///
/// The tween is the source of truth for its channel: callers sample it every
/// frame and retarget it on state changes.
#[derive(Debug, Clone, Copy)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    started: Instant,
    duration: Duration,
    ease: Ease,
}

impl<T: Lerp> Tween<T> {
    /// A tween already at rest on `value`.
    pub fn settled(value: T, duration: Duration, ease: Ease, now: Instant) -> Self {
        Self {
            from: value,
            to: value,
            started: now,
            duration,
            ease,
        }
    }

    pub fn target(&self) -> T {
        self.to
    }

    /// Raw time fraction in [0, 1], before easing.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now: Instant) -> T {
        let f = self.progress(now);
        if f >= 1.0 {
            return self.to;
        }
        T::lerp(self.from, self.to, self.ease.map(f))
    }

    pub fn is_settled(&self, now: Instant) -> bool {
        self.from == self.to || self.progress(now) >= 1.0
    }

    /// Redirect the tween toward `to`, continuing from the currently sampled
    /// value. Retargeting to the current target is a no-op, so an in-flight
    /// transition is never restarted by redundant state writes.
    pub fn retarget(&mut self, to: T, now: Instant) {
        if to == self.to {
            return;
        }
        self.from = self.sample(now);
        self.to = to;
        self.started = now;
    }

    /// Jump straight to `to` with no transition.
    pub fn snap(&mut self, to: T, now: Instant) {
        self.from = to;
        self.to = to;
        self.started = now;
    }

    /// Change duration and ease without disturbing the current motion target.
    pub fn reconfigure(&mut self, duration: Duration, ease: Ease, now: Instant) {
        self.from = self.sample(now);
        self.started = now;
        self.duration = duration;
        self.ease = ease;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tween(from: f64, to: f64, ms: u64, now: Instant) -> Tween<f64> {
        let mut t = Tween::settled(from, Duration::from_millis(ms), Ease::Linear, now);
        t.retarget(to, now);
        t
    }

    #[test]
    fn settled_tween_holds_value() {
        let now = Instant::now();
        let t = Tween::settled(250.0, Duration::from_millis(1000), Ease::FastOutSlowIn, now);
        assert!(t.is_settled(now));
        assert_eq!(t.sample(now), 250.0);
        assert_eq!(t.sample(now + Duration::from_secs(5)), 250.0);
    }

    #[test]
    fn reaches_target_exactly_at_duration() {
        let now = Instant::now();
        let t = tween(250.0, 0.0, 1000, now);
        assert!(!t.is_settled(now + Duration::from_millis(999)));
        assert_eq!(t.sample(now + Duration::from_millis(1000)), 0.0);
        assert!(t.is_settled(now + Duration::from_millis(1000)));
    }

    #[test]
    fn linear_midpoint() {
        let now = Instant::now();
        let t = tween(0.0, 100.0, 1000, now);
        let v = t.sample(now + Duration::from_millis(500));
        assert!((v - 50.0).abs() < 1e-9);
    }

    #[test]
    fn sample_stays_within_endpoint_bounds() {
        let now = Instant::now();
        let mut t = Tween::settled(450.0, Duration::from_millis(1000), Ease::FastOutSlowIn, now);
        t.retarget(0.0, now);
        for ms in (0..=1500).step_by(16) {
            let v = t.sample(now + Duration::from_millis(ms));
            assert!((0.0..=450.0).contains(&v), "overshoot at {ms}ms: {v}");
        }
    }

    #[test]
    fn retarget_continues_from_current_value() {
        let now = Instant::now();
        let mut t = tween(250.0, 0.0, 1000, now);

        // Flip back halfway through; motion must continue from ~125, not 250.
        let half = now + Duration::from_millis(500);
        let at_flip = t.sample(half);
        t.retarget(250.0, half);
        assert_eq!(t.sample(half), at_flip);

        let v = t.sample(half + Duration::from_millis(1));
        assert!((v - at_flip).abs() < 1.0, "snap after retarget: {at_flip} -> {v}");
        assert_eq!(t.sample(half + Duration::from_millis(1000)), 250.0);
    }

    #[test]
    fn retarget_to_same_target_is_noop() {
        let now = Instant::now();
        let mut t = tween(250.0, 0.0, 1000, now);
        let later = now + Duration::from_millis(400);
        let before = t.sample(later);
        t.retarget(0.0, later);
        // Start time unchanged, so the sample is unchanged too.
        assert_eq!(t.sample(later), before);
        assert!(t.is_settled(now + Duration::from_millis(1000)));
    }

    #[test]
    fn snap_lands_settled() {
        let now = Instant::now();
        let mut t = tween(250.0, 0.0, 1000, now);
        let mid = now + Duration::from_millis(500);
        t.snap(300.0, mid);
        assert!(t.is_settled(mid));
        assert_eq!(t.sample(mid), 300.0);
        assert_eq!(t.sample(mid + Duration::from_millis(100)), 300.0);
    }

    #[test]
    fn color_lerp_endpoints() {
        let now = Instant::now();
        let red = Srgba::new(1.0, 0.22, 0.255, 1.0);
        let gray = Srgba::new(0.918, 0.918, 0.918, 1.0);
        let mut t = Tween::settled(red, Duration::from_millis(1000), Ease::Linear, now);
        t.retarget(gray, now);
        assert_eq!(t.sample(now), red);
        assert_eq!(t.sample(now + Duration::from_millis(1000)), gray);
        let mid = t.sample(now + Duration::from_millis(500));
        assert!(mid.red < red.red && mid.red > gray.red - 1e-9);
    }
}
