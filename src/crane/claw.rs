//! Four-finger claw driven by a single clamped angle.

use glam::Quat;

use super::joint::{Joint, JointRange};

/// Claw finger angle joint. `0` is fully open; the range maximum (π/4 by
/// default) is fully closed.
///
/// The four fingers hang from the claw block's corners on the x and z
/// axes. Fingers 1 and 3 rotate by `+θ`, their mirrors 0 and 2 by `−θ`,
/// so the claw always opens and closes symmetrically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Claw {
    joint: Joint,
}

impl Claw {
    /// Claw at angle `initial`, clamped into `range`.
    #[must_use]
    pub fn new(range: JointRange, initial: f32) -> Self {
        Self {
            joint: Joint::new(range, initial),
        }
    }

    /// Driving finger angle θ.
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.joint.value()
    }

    /// Underlying joint (read-only).
    #[must_use]
    pub fn joint(&self) -> &Joint {
        &self.joint
    }

    /// Close (`delta > 0`) or open (`delta < 0`) the claw. Returns whether
    /// the driving finger sits at either bound.
    pub fn update(&mut self, delta: f32) -> bool {
        self.joint.update(delta)
    }

    /// Move at most `step` toward angle `target`; `true` once reached.
    pub fn drive_toward(&mut self, target: f32, step: f32) -> bool {
        self.joint.drive_toward(target, step)
    }

    /// Local rotation of each finger, in finger order: `−θ` and `+θ`
    /// about z for the x-axis pair, `−θ` and `+θ` about x for the z-axis
    /// pair.
    #[must_use]
    pub fn finger_rotations(&self) -> [Quat; 4] {
        let theta = self.angle();
        [
            Quat::from_rotation_z(-theta),
            Quat::from_rotation_z(theta),
            Quat::from_rotation_x(-theta),
            Quat::from_rotation_x(theta),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_4;

    use super::*;

    fn claw() -> Claw {
        Claw::new(JointRange::new(0.0, FRAC_PI_4), 0.0)
    }

    #[test]
    fn closes_to_upper_bound() {
        let mut claw = claw();
        assert!(!claw.update(0.5));
        assert!(claw.update(0.5));
        assert_eq!(claw.angle(), FRAC_PI_4);
    }

    #[test]
    fn mirrored_fingers_are_symmetric() {
        let mut claw = claw();
        let _ = claw.update(0.3);
        let [a, b, c, d] = claw.finger_rotations();
        let (axis_a, angle_a) = a.to_axis_angle();
        let (axis_b, angle_b) = b.to_axis_angle();
        assert!((angle_a - angle_b).abs() < 1e-5);
        assert!((axis_a + axis_b).length() < 1e-5);
        assert!(c.angle_between(d) > 0.59);
    }
}
