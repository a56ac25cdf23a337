//! Tolerance-aware scalar helpers shared by the joint model and the
//! carousel animators.

use std::f32::consts::TAU;

/// Tolerance used for every "at limit" / "at zero" comparison.
pub const EPSILON: f32 = 0.001;

/// `true` when `a` and `b` differ by at most `tolerance` (inclusive).
#[inline]
#[must_use]
pub fn float_equal(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}

/// `true` when `value` sits within [`EPSILON`] of `min` or `max`.
#[inline]
#[must_use]
pub fn is_clamped(value: f32, min: f32, max: f32) -> bool {
    float_equal(value, min, EPSILON) || float_equal(value, max, EPSILON)
}

/// Wrap an angle into `[0, 2π)`.
#[inline]
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_equal_is_inclusive() {
        assert!(float_equal(1.0, 1.0005, EPSILON));
        assert!(float_equal(1.0, 1.0, 0.0));
        assert!(!float_equal(1.0, 1.002, EPSILON));
    }

    #[test]
    fn is_clamped_checks_both_bounds() {
        assert!(is_clamped(2.5, 2.5, 18.0));
        assert!(is_clamped(17.9995, 2.5, 18.0));
        assert!(!is_clamped(10.0, 2.5, 18.0));
    }

    #[test]
    fn wrap_angle_stays_in_range() {
        assert!((wrap_angle(-0.5) - (TAU - 0.5)).abs() < 1e-5);
        assert!((wrap_angle(TAU + 0.25) - 0.25).abs() < 1e-5);
        assert_eq!(wrap_angle(0.0), 0.0);
        let tiny = wrap_angle(-1e-9);
        assert!((0.0..TAU).contains(&tiny));
    }
}
