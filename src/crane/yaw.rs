//! Cabin yaw: an angle wrapped to `[0, 2π)` with a homing mode.

use std::f32::consts::{PI, TAU};

use crate::util::math::{wrap_angle, EPSILON};

/// Cabin rotation about the tower axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CabinYaw {
    angle: f32,
}

impl CabinYaw {
    /// Yaw at `angle` radians, wrapped into `[0, 2π)`.
    #[must_use]
    pub fn new(angle: f32) -> Self {
        Self {
            angle: wrap_angle(angle),
        }
    }

    /// Current angle in `[0, 2π)`.
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Angular distance to zero along the shorter way round.
    #[must_use]
    pub fn distance_to_zero(&self) -> f32 {
        self.angle.min(TAU - self.angle)
    }

    /// Whether the cabin faces its home direction (within tolerance).
    #[must_use]
    pub fn is_home(&self) -> bool {
        self.distance_to_zero() <= EPSILON
    }

    /// Rotate by `delta` radians.
    ///
    /// Free mode wraps `φ + delta` into `[0, 2π)` and reports whether the
    /// result faces home. Lock mode homes the cabin: it reports done
    /// without moving when already home, snaps to exactly zero when a step
    /// of `|delta|` would reach or pass zero along the shorter way round,
    /// and otherwise rotates `|delta|` that way and reports not done.
    pub fn update(&mut self, delta: f32, lock_to_zero: bool) -> bool {
        if !lock_to_zero {
            self.angle = wrap_angle(self.angle + delta);
            return self.is_home();
        }

        if self.is_home() {
            return true;
        }

        let step = delta.abs();
        if step >= self.distance_to_zero() {
            self.angle = 0.0;
            return true;
        }

        let signed = if self.angle < PI { -step } else { step };
        self.angle = wrap_angle(self.angle + signed);
        false
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn free_mode_wraps() {
        let mut yaw = CabinYaw::new(6.0);
        assert!(!yaw.update(1.0, false));
        assert!((yaw.angle() - (7.0 - TAU)).abs() < 1e-5);

        let mut yaw = CabinYaw::new(0.05);
        assert!(!yaw.update(-0.1, false));
        assert!((yaw.angle() - (TAU - 0.05)).abs() < 1e-5);
    }

    #[test]
    fn lock_snaps_when_step_would_overshoot() {
        let mut yaw = CabinYaw::new(0.1);
        assert!(yaw.update(6.0, true));
        assert_eq!(yaw.angle(), 0.0);
    }

    #[test]
    fn lock_at_zero_is_done_without_moving() {
        let mut yaw = CabinYaw::new(0.0);
        assert!(yaw.update(0.5, true));
        assert_eq!(yaw.angle(), 0.0);

        let mut yaw = CabinYaw::new(0.0005);
        assert!(yaw.update(0.5, true));
        assert_eq!(yaw.angle(), 0.0005);
    }

    #[test]
    fn lock_snaps_when_crossing_the_wrap_boundary() {
        let mut yaw = CabinYaw::new(TAU - 0.2);
        assert!(!yaw.update(0.15, true));
        assert!((yaw.angle() - (TAU - 0.05)).abs() < 1e-5);
        assert!(yaw.update(0.15, true));
        assert_eq!(yaw.angle(), 0.0);
    }

    #[test]
    fn lock_takes_the_shorter_way() {
        let mut yaw = CabinYaw::new(1.0);
        assert!(!yaw.update(0.25, true));
        assert!((yaw.angle() - 0.75).abs() < 1e-6);

        let mut yaw = CabinYaw::new(4.0);
        assert!(!yaw.update(0.25, true));
        assert!((yaw.angle() - 4.25).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_angle_stays_wrapped(
            start in -20.0f32..20.0,
            deltas in prop::collection::vec(-7.0f32..7.0, 0..64),
            lock in any::<bool>()
        ) {
            let mut yaw = CabinYaw::new(start);
            for delta in deltas {
                let _ = yaw.update(delta, lock);
                prop_assert!((0.0..TAU).contains(&yaw.angle()));
            }
        }

        #[test]
        fn prop_lock_mode_reaches_home(start in 0.0f32..TAU, rate in 0.01f32..0.5) {
            let mut yaw = CabinYaw::new(start);
            let mut done = false;
            for _ in 0..1000 {
                if yaw.update(rate, true) {
                    done = true;
                    break;
                }
            }
            prop_assert!(done);
            prop_assert!(yaw.is_home());
        }
    }
}
