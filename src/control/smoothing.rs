//! Exponential smoothing of joint angles.
//!
//! `smoothed = lerp(before, target, 1 - exp(-lerp_speed * dt))` is a
//! first-order low-pass filter with time constant `1 / lerp_speed`. The
//! blend factor depends on elapsed time, not on tick count, so convergence
//! in wall-clock time is the same at 30 Hz and 240 Hz.

use crate::options::StabilizerOptions;

/// Blend factor for one tick of length `dt` seconds, in `[0, 1)`.
///
/// Negative inputs are treated as zero, so `dt == 0` yields exactly `0`.
#[inline]
#[must_use]
pub fn smoothing_factor(lerp_speed: f64, dt: f64) -> f64 {
    1.0 - (-lerp_speed.max(0.0) * dt.max(0.0)).exp()
}

/// Linear interpolation between two scalars.
#[inline]
#[must_use]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Per-joint blend of `before` toward `target`.
#[must_use]
pub fn blend_angles(before: &[f64], target: &[f64], t: f64) -> Vec<f64> {
    before
        .iter()
        .zip(target)
        .map(|(&b, &a)| lerp(b, a, t))
        .collect()
}

/// Smoothing configuration of the stabilization loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothing {
    /// When false, IK solutions are applied as-is.
    pub enabled: bool,
    /// Inverse time constant (1/s).
    pub lerp_speed: f64,
}

impl Smoothing {
    /// Apply solutions directly.
    pub const OFF: Self = Self {
        enabled: false,
        lerp_speed: 0.0,
    };

    /// Enabled smoothing with the given speed.
    #[must_use]
    pub fn with_speed(lerp_speed: f64) -> Self {
        Self {
            enabled: true,
            lerp_speed,
        }
    }

    /// Angles to apply this tick.
    #[must_use]
    pub fn apply(&self, before: &[f64], target: &[f64], dt: f64) -> Vec<f64> {
        if self.enabled {
            blend_angles(before, target, smoothing_factor(self.lerp_speed, dt))
        } else {
            target.to_vec()
        }
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Self::from(&StabilizerOptions::default())
    }
}

impl From<&StabilizerOptions> for Smoothing {
    fn from(options: &StabilizerOptions) -> Self {
        Self {
            enabled: options.smooth,
            lerp_speed: options.lerp_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_second_at_speed_five() {
        let t = smoothing_factor(5.0, 1.0);
        let smoothed = lerp(0.0, 100.0, t);
        assert!((smoothed - 99.326).abs() < 1e-3, "got {smoothed}");
    }

    #[test]
    fn zero_dt_keeps_before_exactly() {
        assert_eq!(smoothing_factor(5.0, 0.0), 0.0);
        let before = [0.3, -1.25, 2.0];
        let target = [1.0, 1.0, 1.0];
        let out = Smoothing::with_speed(5.0).apply(&before, &target, 0.0);
        assert_eq!(out, before.to_vec());
    }

    #[test]
    fn framerate_independent() {
        // 60 ticks of 1/60 s converge as far as one tick of 1 s
        let speed = 3.0;
        let mut value = 0.0;
        for _ in 0..60 {
            value = lerp(value, 1.0, smoothing_factor(speed, 1.0 / 60.0));
        }
        let single = lerp(0.0, 1.0, smoothing_factor(speed, 1.0));
        assert!((value - single).abs() < 1e-12);
    }

    #[test]
    fn disabled_snaps_to_target() {
        let out = Smoothing::OFF.apply(&[0.0, 0.0], &[1.0, -2.0], 0.016);
        assert_eq!(out, vec![1.0, -2.0]);
    }

    #[test]
    fn negative_inputs_do_not_overshoot() {
        assert_eq!(smoothing_factor(-2.0, 1.0), 0.0);
        assert_eq!(smoothing_factor(2.0, -1.0), 0.0);
    }

    #[test]
    fn from_options() {
        let smoothing = Smoothing::from(&StabilizerOptions {
            smooth: false,
            lerp_speed: 2.0,
        });
        assert!(!smoothing.enabled);
        assert_eq!(smoothing.lerp_speed, 2.0);
    }
}
