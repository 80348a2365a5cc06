//! Molecular layer: eased interpolation of a float from A to B
//!
//! Combines easing functions and timing utilities. The owner calls
//! [`Tween::advance`] each frame and applies the returned value.

use std::time::Duration;

use super::timing::{lerp, progress};
use crate::easing::EasingType;

/// Result of advancing a tween by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenStep {
    /// Interpolated value for this frame
    pub value: f32,
    /// The tween reached its end on this frame (or earlier)
    pub finished: bool,
}

/// Active interpolation state
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    easing: EasingType,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: Duration, easing: EasingType) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Advance by `dt` and return the value for this frame.
    ///
    /// Once finished the value is exactly `to`, never an eased approximation.
    pub fn advance(&mut self, dt: Duration) -> TweenStep {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        if self.is_finished() {
            return TweenStep {
                value: self.to,
                finished: true,
            };
        }
        TweenStep {
            value: self.value(),
            finished: false,
        }
    }

    /// Current interpolated value without advancing
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let t = progress(self.elapsed, self.duration);
        lerp(self.from, self.to, self.easing.apply(t))
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn start(&self) -> f32 {
        self.from
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn easing(&self) -> EasingType {
        self.easing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_tween_progresses() {
        let mut tween = Tween::new(0.0, 100.0, Duration::from_millis(100), EasingType::Linear);
        let step = tween.advance(Duration::from_millis(25));
        assert!((step.value - 25.0).abs() < 0.001);
        assert!(!step.finished);

        let step = tween.advance(Duration::from_millis(50));
        assert!((step.value - 75.0).abs() < 0.001);
    }

    #[test]
    fn test_tween_snaps_to_target_on_finish() {
        let mut tween = Tween::new(10.0, 300.0, Duration::from_millis(320), EasingType::OutElastic);
        let step = tween.advance(Duration::from_millis(1000));
        assert!(step.finished);
        assert_eq!(step.value, 300.0);
        assert_eq!(tween.value(), 300.0);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut tween = Tween::new(0.0, 5.0, Duration::ZERO, EasingType::Linear);
        assert!(tween.is_finished());
        let step = tween.advance(Duration::ZERO);
        assert!(step.finished);
        assert_eq!(step.value, 5.0);
    }

    #[test]
    fn test_eased_tween_uses_curve() {
        let mut tween = Tween::new(0.0, 100.0, Duration::from_millis(100), EasingType::OutCubic);
        let step = tween.advance(Duration::from_millis(50));
        // 1 - 0.5^3 = 0.875
        assert!((step.value - 87.5).abs() < 0.001);
    }
}
