//! Rigid-body frames of the crane, derived from joint values.
//!
//! The crane is a fixed hierarchy: base and tower on the ground, a cabin
//! that yaws on top of the tower carrying the jib, counterweight, apex and
//! tie cables, a trolley that slides along the jib, a hoist cable hanging
//! from the trolley, and the claw block with four fingers at its end.

use glam::{Mat4, Quat, Vec3};

use super::CraneRig;

/// Base box center.
pub const BASE_CENTER: Vec3 = Vec3::new(0.0, 1.0, 0.0);
/// Base box size.
pub const BASE_SIZE: Vec3 = Vec3::new(5.0, 2.0, 5.0);
/// Tower box center.
pub const TOWER_CENTER: Vec3 = Vec3::new(0.0, 12.0, 0.0);
/// Tower box size.
pub const TOWER_SIZE: Vec3 = Vec3::new(2.0, 20.0, 2.0);
/// Cabin pivot on top of the tower.
pub const CABIN_PIVOT: Vec3 = Vec3::new(0.0, 23.5, 0.0);
/// Cabin box size.
pub const CABIN_SIZE: Vec3 = Vec3::new(3.0, 3.0, 3.0);
/// Jib center, cabin-local.
pub const JIB_CENTER: Vec3 = Vec3::new(6.5, 2.5, 0.0);
/// Jib box size.
pub const JIB_SIZE: Vec3 = Vec3::new(30.0, 2.0, 2.0);
/// Counterweight center, cabin-local.
pub const COUNTERWEIGHT_CENTER: Vec3 = Vec3::new(-6.5, 0.5, 0.0);
/// Counterweight box size.
pub const COUNTERWEIGHT_SIZE: Vec3 = Vec3::new(3.0, 2.0, 2.0);
/// Apex cone center, cabin-local.
pub const APEX_CENTER: Vec3 = Vec3::new(0.0, 4.5, 0.0);
/// Apex cone height.
pub const APEX_HEIGHT: f32 = 3.0;
/// Tie cables from the apex to the jib ends, cabin-local (x, y) pairs.
pub const TIE_CABLES: [([f32; 2], [f32; 2]); 2] =
    [([-8.0, 3.4], [0.0, 5.9]), ([0.0, 5.9], [16.0, 3.4])];
/// Trolley height above the cabin pivot.
pub const TROLLEY_HEIGHT: f32 = 0.5;
/// Trolley box size.
pub const TROLLEY_SIZE: Vec3 = Vec3::new(2.0, 2.0, 2.0);
/// Gap between the trolley center and the top of the hoist cable.
pub const CABLE_TOP_OFFSET: f32 = 1.0;
/// Hoist cable radius.
pub const CABLE_RADIUS: f32 = 0.05;
/// Distance from the cable end to the claw block center.
pub const BLOCK_OFFSET: f32 = 1.5;
/// Claw block size.
pub const BLOCK_SIZE: Vec3 = Vec3::new(2.0, 1.0, 2.0);
/// Finger hinge points, block-local, in finger order.
pub const FINGER_HINGES: [Vec3; 4] = [
    Vec3::new(1.0, -0.5, 0.0),
    Vec3::new(-1.0, -0.5, 0.0),
    Vec3::new(0.0, -0.5, -1.0),
    Vec3::new(0.0, -0.5, 1.0),
];
/// Finger length (hinge to tip).
pub const FINGER_LENGTH: f32 = 1.5;

/// World transforms of every moving crane part for one pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CraneFrames {
    /// Cabin frame (pivot + yaw).
    pub cabin: Mat4,
    /// Trolley frame.
    pub trolley: Mat4,
    /// Hoist cable frame: origin at the cable's top end, cable along −y,
    /// y scaled by the cable length.
    pub cable: Mat4,
    /// Claw block frame.
    pub block: Mat4,
    /// Finger frames, hinge at the origin, finger along −y.
    pub fingers: [Mat4; 4],
}

impl CraneFrames {
    /// Compose the frames for the rig's current joint values.
    #[must_use]
    pub fn from_rig(rig: &CraneRig) -> Self {
        let cabin = Mat4::from_translation(CABIN_PIVOT)
            * Mat4::from_rotation_y(rig.yaw().angle());
        let trolley = cabin
            * Mat4::from_translation(Vec3::new(
                rig.trolley().value(),
                TROLLEY_HEIGHT,
                0.0,
            ));

        let length = rig.cable().value();
        let cable = trolley
            * Mat4::from_scale_rotation_translation(
                Vec3::new(1.0, length.max(f32::EPSILON), 1.0),
                Quat::IDENTITY,
                Vec3::new(0.0, -CABLE_TOP_OFFSET, 0.0),
            );
        let block = trolley
            * Mat4::from_translation(Vec3::new(
                0.0,
                -(length + BLOCK_OFFSET),
                0.0,
            ));

        let rotations = rig.claw().finger_rotations();
        let fingers = std::array::from_fn(|i| {
            block * Mat4::from_rotation_translation(rotations[i], FINGER_HINGES[i])
        });

        Self {
            cabin,
            trolley,
            cable,
            block,
            fingers,
        }
    }

    /// World-space center of the claw block.
    #[must_use]
    pub fn claw_position(&self) -> Vec3 {
        self.block.transform_point3(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::options::CraneOptions;

    #[test]
    fn claw_hangs_below_trolley() {
        let rig = CraneRig::new(&CraneOptions::default());
        let claw = CraneFrames::from_rig(&rig).claw_position();
        // trolley 18, cable 5: 23.5 + 0.5 - 5 - 1.5
        assert!((claw - Vec3::new(18.0, 17.5, 0.0)).length() < 1e-4);
    }

    #[test]
    fn cabin_yaw_swings_the_claw() {
        let mut rig = CraneRig::new(&CraneOptions::default());
        let _ = rig.yaw_mut().update(FRAC_PI_2, false);
        let claw = CraneFrames::from_rig(&rig).claw_position();
        // Yawing +90° about y carries +x onto −z.
        assert!(claw.x.abs() < 1e-3);
        assert!((claw.z + 18.0).abs() < 1e-3);
    }

    #[test]
    fn closed_fingers_tip_inward() {
        let mut rig = CraneRig::new(&CraneOptions::default());
        let _ = rig.claw_mut().update(1.0);
        let frames = CraneFrames::from_rig(&rig);
        let block = frames.claw_position();
        for (hinge, frame) in FINGER_HINGES.iter().zip(frames.fingers) {
            let tip = frame.transform_point3(Vec3::new(0.0, -FINGER_LENGTH, 0.0));
            let hinge_world = frames.block.transform_point3(*hinge);
            let hinge_offset = (hinge_world - block).with_y(0.0).length();
            let tip_offset = (tip - block).with_y(0.0).length();
            assert!(tip_offset < hinge_offset);
        }
    }
}
