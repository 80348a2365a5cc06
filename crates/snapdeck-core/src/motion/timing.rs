//! Atomic layer: time calculation utilities for animations
//!
//! Provides pure functions for calculating animation progress and interpolation.

use std::time::Duration;

/// Tolerance used when comparing offsets in host units
pub const OFFSET_EPSILON: f32 = 0.01;

/// Calculate animation progress (0.0 to 1.0) from elapsed time and duration
///
/// # Returns
/// Progress value clamped to [0.0, 1.0]; a zero duration is always complete
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Linear interpolation between two values
///
/// # Arguments
/// * `from` - Start value
/// * `to` - End value
/// * `t` - Interpolation factor; values outside [0, 1] extrapolate
#[inline]
pub fn lerp(from: f32, to: f32, t: f64) -> f32 {
    (from as f64 + (to as f64 - from as f64) * t) as f32
}

/// Compare two offsets within [`OFFSET_EPSILON`]
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= OFFSET_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
        assert!((lerp(100.0, 0.0, 0.25) - 75.0).abs() < 0.001);
    }

    #[test]
    fn test_progress() {
        let duration = Duration::from_millis(200);
        assert!((progress(Duration::ZERO, duration) - 0.0).abs() < 0.001);
        assert!((progress(Duration::from_millis(50), duration) - 0.25).abs() < 0.001);
        assert!((progress(Duration::from_millis(900), duration) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_zero_duration() {
        assert!((progress(Duration::ZERO, Duration::ZERO) - 1.0).abs() < 0.001);
    }
}
