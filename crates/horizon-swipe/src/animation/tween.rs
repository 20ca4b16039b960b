//! Time-driven interpolation of a single value.
//!
//! Animations are advanced explicitly with the elapsed frame time rather
//! than reading a clock, so the host's frame loop decides when time passes.

use std::time::Duration;

use super::easing::{Easing, lerp_eased};

/// Result of advancing an animation by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationStep {
    /// Still running; carries the current value.
    Running(f32),
    /// Reached the end; carries the final value.
    Finished(f32),
}

impl AnimationStep {
    /// The value for this frame.
    pub fn value(self) -> f32 {
        match self {
            Self::Running(v) | Self::Finished(v) => v,
        }
    }

    /// Whether the animation completed on this frame.
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

/// Animates a value from `from` to `to` over `duration`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
    finished: bool,
}

impl Tween {
    /// Create a new tween. A zero duration finishes on the first advance.
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
            finished: false,
        }
    }

    /// Start value.
    #[inline]
    pub fn from(&self) -> f32 {
        self.from
    }

    /// Target value.
    #[inline]
    pub fn to(&self) -> f32 {
        self.to
    }

    /// Linear progress from 0.0 to 1.0.
    pub fn progress(&self) -> f32 {
        if self.finished {
            1.0
        } else if self.duration.is_zero() {
            0.0
        } else {
            (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        }
    }

    /// Current eased value.
    pub fn value(&self) -> f32 {
        if self.finished {
            self.to
        } else {
            lerp_eased(self.easing, self.from, self.to, self.progress())
        }
    }

    /// Whether the tween has reached its end.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance by `dt` and return the new value.
    pub fn advance(&mut self, dt: Duration) -> AnimationStep {
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.finished = true;
            AnimationStep::Finished(self.to)
        } else {
            AnimationStep::Running(self.value())
        }
    }

    /// Redirect the tween toward a new target from its current value.
    pub fn retarget(&mut self, to: f32) {
        self.from = self.value();
        self.to = to;
        self.elapsed = Duration::ZERO;
        self.finished = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_runs_to_target() {
        let mut tween = Tween::new(0.0, -120.0, Duration::from_millis(300), Easing::Linear);
        assert_eq!(tween.value(), 0.0);

        let step = tween.advance(Duration::from_millis(150));
        assert!(!step.is_finished());
        assert!((step.value() + 60.0).abs() < 1e-3);

        let step = tween.advance(Duration::from_millis(200));
        assert_eq!(step, AnimationStep::Finished(-120.0));
        assert!(tween.is_finished());
        assert_eq!(tween.value(), -120.0);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut tween = Tween::new(10.0, 0.0, Duration::ZERO, Easing::EaseOutCubic);
        assert!(!tween.is_finished());
        assert_eq!(tween.advance(Duration::ZERO), AnimationStep::Finished(0.0));
    }

    #[test]
    fn test_retarget_starts_from_current_value() {
        let mut tween = Tween::new(0.0, 100.0, Duration::from_millis(100), Easing::Linear);
        tween.advance(Duration::from_millis(50));
        tween.retarget(0.0);
        assert!((tween.from() - 50.0).abs() < 1e-3);
        assert_eq!(tween.to(), 0.0);
        assert_eq!(tween.progress(), 0.0);
    }
}
