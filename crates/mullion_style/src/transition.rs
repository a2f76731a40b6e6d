//! Per-slot transitions and their easing functions.

use std::time::Duration;

/// Easing function for a transition's velocity curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Remaps normalized time progress through the easing curve.
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => -(t - 1.0) * (t - 1.0) + 1.0,
            Easing::EaseInOut => -2.0 * t * t * (t - 1.5),
        }
    }

    /// Interpolates between `from` and `to` at eased progress `t`.
    pub fn interpolate(self, from: f32, to: f32, t: f32) -> f32 {
        let t = self.apply(t);
        from + t * (to - from)
    }
}

/// The animated path of one property slot: from a starting value to a target
/// value over an absolute time window.
///
/// Timestamps are durations on the compositor's monotonic clock. A
/// freshly-initialized transition has zero duration and zero values, which
/// makes plain property sets resolve instantly once stepped.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transition {
    pub from: f32,
    pub to: f32,
    pub begin: Duration,
    pub end: Duration,
    pub easing: Easing,
}

impl Transition {
    /// Whether the transition still has time left at `when`.
    pub fn is_active(&self, when: Duration) -> bool {
        when < self.end
    }

    /// The displayed value at `when`.
    ///
    /// Zero-duration transitions snap to `to` unconditionally; the progress
    /// division is never reached for them, even when `when` precedes the
    /// window.
    pub fn sample(&self, when: Duration) -> f32 {
        if when >= self.end || self.end == self.begin {
            return self.to;
        }
        let span = (self.end - self.begin).as_secs_f32();
        let elapsed = when.saturating_sub(self.begin).as_secs_f32();
        self.easing.interpolate(self.from, self.to, elapsed / span)
    }
}
