//! Crane kinematic model.
//!
//! [`CraneRig`] owns the crane's four degrees of freedom: cabin yaw,
//! trolley position along the jib, hoist cable length, and claw finger
//! angle. Manual control moves them by per-second rates scaled with the
//! frame time; the recovery sequencer drives them toward
//! [`CraneRig::home`] values.

/// Four-finger claw driven by one angle.
pub mod claw;
/// Clamped scalar joints and their ranges.
pub mod joint;
/// Rigid-body frames derived from joint values.
pub mod pose;
/// Wrapped cabin yaw with a homing mode.
pub mod yaw;

pub use claw::Claw;
use glam::{Vec2, Vec3};
pub use joint::{Joint, JointRange};
pub use pose::CraneFrames;
pub use yaw::CabinYaw;

use crate::options::{CraneOptions, MotionRates};

/// Signed manual-control inputs for one frame, each in `[-1, 1]`.
///
/// Built from the held keys: `+1` for the positive action, `−1` for the
/// negative one, `0` for neither or both.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlAxes {
    /// `+` lowers the hook, `−` raises it.
    pub hoist: f32,
    /// `+` rotates the cabin toward positive yaw.
    pub yaw: f32,
    /// `+` moves the trolley out along the jib.
    pub trolley: f32,
    /// `+` closes the claw.
    pub claw: f32,
}

impl ControlAxes {
    /// Combine a positive and a negative held state into one axis value.
    #[must_use]
    pub fn axis(positive: bool, negative: bool) -> f32 {
        f32::from(u8::from(positive)) - f32::from(u8::from(negative))
    }

    /// Whether every axis is at rest.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.hoist == 0.0
            && self.yaw == 0.0
            && self.trolley == 0.0
            && self.claw == 0.0
    }
}

/// Joint values the crane parks at after a recovery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomePose {
    /// Trolley position (the inner end of its range).
    pub trolley: f32,
    /// Cable length (fully paid out).
    pub cable: f32,
    /// Claw angle (fully open).
    pub claw: f32,
    /// Cabin yaw.
    pub yaw: f32,
}

/// The crane's jointed degrees of freedom.
#[derive(Debug, Clone, PartialEq)]
pub struct CraneRig {
    trolley: Joint,
    cable: Joint,
    claw: Claw,
    yaw: CabinYaw,
    manual_rates: MotionRates,
}

impl CraneRig {
    /// Rig in the configured initial pose.
    #[must_use]
    pub fn new(options: &CraneOptions) -> Self {
        let initial = &options.initial;
        Self {
            trolley: Joint::new(options.trolley, initial.trolley),
            cable: Joint::new(options.cable, initial.cable),
            claw: Claw::new(options.claw, initial.claw),
            yaw: CabinYaw::new(initial.yaw),
            manual_rates: options.manual_rates,
        }
    }

    /// Trolley offset along the jib.
    #[must_use]
    pub fn trolley(&self) -> &Joint {
        &self.trolley
    }

    /// Hoist cable length.
    #[must_use]
    pub fn cable(&self) -> &Joint {
        &self.cable
    }

    /// Claw finger angle.
    #[must_use]
    pub fn claw(&self) -> &Claw {
        &self.claw
    }

    /// Cabin yaw.
    #[must_use]
    pub fn yaw(&self) -> &CabinYaw {
        &self.yaw
    }

    /// Mutable trolley joint.
    pub fn trolley_mut(&mut self) -> &mut Joint {
        &mut self.trolley
    }

    /// Mutable cable joint.
    pub fn cable_mut(&mut self) -> &mut Joint {
        &mut self.cable
    }

    /// Mutable claw.
    pub fn claw_mut(&mut self) -> &mut Claw {
        &mut self.claw
    }

    /// Mutable cabin yaw.
    pub fn yaw_mut(&mut self) -> &mut CabinYaw {
        &mut self.yaw
    }

    /// Where the recovery sequence parks the crane.
    #[must_use]
    pub fn home(&self) -> HomePose {
        HomePose {
            trolley: self.trolley.range().min,
            cable: self.cable.range().max,
            claw: self.claw.joint().range().min,
            yaw: 0.0,
        }
    }

    /// Whether every joint sits at its home value.
    #[must_use]
    pub fn is_home(&self) -> bool {
        let home = self.home();
        self.trolley.is_at(home.trolley)
            && self.cable.is_at(home.cable)
            && self.claw.joint().is_at(home.claw)
            && self.yaw.is_home()
    }

    /// Apply one frame of manual control.
    pub fn apply_controls(&mut self, axes: ControlAxes, dt: f32) {
        let rates = self.manual_rates;
        if axes.hoist != 0.0 {
            let _ = self.cable.update(axes.hoist * rates.cable * dt);
        }
        if axes.yaw != 0.0 {
            let _ = self.yaw.update(axes.yaw * rates.yaw * dt, false);
        }
        if axes.trolley != 0.0 {
            let _ = self.trolley.update(axes.trolley * rates.trolley * dt);
        }
        if axes.claw != 0.0 {
            let _ = self.claw.update(axes.claw * rates.claw * dt);
        }
    }

    /// World transforms of the moving parts.
    #[must_use]
    pub fn frames(&self) -> CraneFrames {
        CraneFrames::from_rig(self)
    }

    /// World-space position of the claw block.
    #[must_use]
    pub fn claw_position(&self) -> Vec3 {
        self.frames().claw_position()
    }

    /// Planar position the claw occupies once parked at home.
    #[must_use]
    pub fn home_claw_ground_position(options: &CraneOptions) -> Vec2 {
        Vec2::new(options.trolley.min, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_pose_matches_options() {
        let rig = CraneRig::new(&CraneOptions::default());
        assert_eq!(rig.trolley().value(), 18.0);
        assert_eq!(rig.cable().value(), 5.0);
        assert_eq!(rig.claw().angle(), 0.0);
        assert_eq!(rig.yaw().angle(), 0.0);
        assert!(!rig.is_home());
    }

    #[test]
    fn axis_combines_opposing_keys() {
        assert_eq!(ControlAxes::axis(true, false), 1.0);
        assert_eq!(ControlAxes::axis(false, true), -1.0);
        assert_eq!(ControlAxes::axis(true, true), 0.0);
        assert!(ControlAxes::default().is_idle());
    }

    #[test]
    fn manual_controls_scale_with_dt() {
        let options = CraneOptions::default();
        let mut rig = CraneRig::new(&options);
        let axes = ControlAxes {
            hoist: 1.0,
            trolley: -1.0,
            ..ControlAxes::default()
        };
        rig.apply_controls(axes, 0.1);
        let expected_cable = 5.0 + options.manual_rates.cable * 0.1;
        let expected_trolley = 18.0 - options.manual_rates.trolley * 0.1;
        assert!((rig.cable().value() - expected_cable).abs() < 1e-4);
        assert!((rig.trolley().value() - expected_trolley).abs() < 1e-4);
    }

    #[test]
    fn manual_controls_respect_ranges() {
        let mut rig = CraneRig::new(&CraneOptions::default());
        let axes = ControlAxes {
            hoist: 1.0,
            yaw: 1.0,
            trolley: 1.0,
            claw: 1.0,
        };
        for _ in 0..600 {
            rig.apply_controls(axes, 1.0 / 60.0);
        }
        assert_eq!(rig.cable().value(), 20.0);
        assert_eq!(rig.trolley().value(), 18.0);
        assert_eq!(rig.claw().angle(), std::f32::consts::FRAC_PI_4);
        assert!((0.0..std::f32::consts::TAU).contains(&rig.yaw().angle()));
    }
}
