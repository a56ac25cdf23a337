//! Automatic parking sequence run after a collision.
//!
//! While a sequence runs, manual input is disabled. Each frame the active
//! step drives one joint toward its home value; a step that reaches its
//! target hands over to the next one on the following frame. After the
//! claw has reopened the collision flag is cleared and input comes back.

use std::fmt;

use crate::collision::CollisionMonitor;
use crate::crane::CraneRig;
use crate::input::KeyTracker;
use crate::options::MotionRates;

/// Phase of the recovery sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryStep {
    /// No sequence running.
    #[default]
    Idle,
    /// Close the claw.
    CloseClaw,
    /// Wind the cable fully in.
    RaiseHoist,
    /// Pull the trolley to the inner end of the jib.
    RetractTrolley,
    /// Rotate the cabin back to zero yaw.
    AlignCabin,
    /// Pay the cable fully out.
    LowerHoist,
    /// Open the claw.
    OpenClaw,
}

impl RecoveryStep {
    /// The step that follows this one. `OpenClaw` wraps to `Idle`.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::CloseClaw => Self::RaiseHoist,
            Self::RaiseHoist => Self::RetractTrolley,
            Self::RetractTrolley => Self::AlignCabin,
            Self::AlignCabin => Self::LowerHoist,
            Self::LowerHoist => Self::OpenClaw,
            Self::OpenClaw => Self::Idle,
        }
    }
}

impl fmt::Display for RecoveryStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::CloseClaw => "closing claw",
            Self::RaiseHoist => "raising hoist",
            Self::RetractTrolley => "retracting trolley",
            Self::AlignCabin => "aligning cabin",
            Self::LowerHoist => "lowering hoist",
            Self::OpenClaw => "opening claw",
        };
        f.write_str(label)
    }
}

/// State machine that parks the crane at its home pose.
#[derive(Debug, Clone)]
pub struct RecoverySequencer {
    step: RecoveryStep,
    rates: MotionRates,
}

impl RecoverySequencer {
    /// Idle sequencer moving joints at `rates` (units per second).
    #[must_use]
    pub fn new(rates: MotionRates) -> Self {
        Self {
            step: RecoveryStep::Idle,
            rates,
        }
    }

    /// Current step.
    #[must_use]
    pub fn step(&self) -> RecoveryStep {
        self.step
    }

    /// Whether a sequence is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.step != RecoveryStep::Idle
    }

    /// Begin a sequence. Ignored if one is already running.
    pub fn start(&mut self) {
        if self.is_active() {
            return;
        }
        self.step = RecoveryStep::CloseClaw;
        log::debug!("recovery: {}", self.step);
    }

    /// Run one frame of the active step.
    ///
    /// Returns `true` on the frame the sequence completes. Completing
    /// clears the collision flag and re-enables the tracker.
    pub fn advance(
        &mut self,
        dt: f32,
        rig: &mut CraneRig,
        monitor: &mut CollisionMonitor,
        tracker: &mut KeyTracker,
    ) -> bool {
        let home = rig.home();
        let rates = self.rates;
        let done = match self.step {
            RecoveryStep::Idle => return false,
            RecoveryStep::CloseClaw => {
                let closed = rig.claw().joint().range().max;
                rig.claw_mut().drive_toward(closed, rates.claw * dt)
            }
            RecoveryStep::RaiseHoist => {
                let wound = rig.cable().range().min;
                rig.cable_mut().drive_toward(wound, rates.cable * dt)
            }
            RecoveryStep::RetractTrolley => rig
                .trolley_mut()
                .drive_toward(home.trolley, rates.trolley * dt),
            RecoveryStep::AlignCabin => {
                rig.yaw_mut().update(rates.yaw * dt, true)
            }
            RecoveryStep::LowerHoist => {
                rig.cable_mut().drive_toward(home.cable, rates.cable * dt)
            }
            RecoveryStep::OpenClaw => {
                rig.claw_mut().drive_toward(home.claw, rates.claw * dt)
            }
        };

        if !done {
            return false;
        }

        self.step = self.step.next();
        if self.step != RecoveryStep::Idle {
            log::debug!("recovery: {}", self.step);
            return false;
        }

        monitor.clear();
        tracker.enable();
        log::info!("recovery complete; crane parked, input restored");
        true
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_4, PI, TAU};

    use glam::{Vec2, Vec3Swizzles};
    use proptest::prelude::*;

    use super::*;
    use crate::collision::CargoMarker;
    use crate::crane::ControlAxes;
    use crate::options::{CraneOptions, InitialPose};

    const DT: f32 = 1.0 / 60.0;

    fn collided() -> (CraneRig, CollisionMonitor, KeyTracker) {
        let mut rig = CraneRig::new(&CraneOptions::default());
        rig.apply_controls(
            ControlAxes {
                hoist: 1.0,
                yaw: 1.0,
                trolley: -1.0,
                claw: 1.0,
            },
            0.4,
        );
        let mut monitor = CollisionMonitor::new();
        let marker = CargoMarker::new(rig.claw_position().xz(), 1.5);
        assert!(monitor.check(rig.claw_position(), &[marker], 1.5, 1.5));
        let mut tracker = KeyTracker::new();
        tracker.disable();
        (rig, monitor, tracker)
    }

    #[test]
    fn steps_run_in_order() {
        let mut step = RecoveryStep::CloseClaw;
        let mut seen = vec![step];
        while step != RecoveryStep::Idle {
            step = step.next();
            seen.push(step);
        }
        assert_eq!(
            seen,
            [
                RecoveryStep::CloseClaw,
                RecoveryStep::RaiseHoist,
                RecoveryStep::RetractTrolley,
                RecoveryStep::AlignCabin,
                RecoveryStep::LowerHoist,
                RecoveryStep::OpenClaw,
                RecoveryStep::Idle,
            ]
        );
    }

    #[test]
    fn idle_sequencer_does_nothing() {
        let (mut rig, mut monitor, mut tracker) = collided();
        let before = rig.clone();
        let mut seq = RecoverySequencer::new(MotionRates::RECOVERY);
        assert!(!seq.advance(DT, &mut rig, &mut monitor, &mut tracker));
        assert_eq!(rig, before);
        assert!(monitor.is_colliding());
    }

    #[test]
    fn sequence_parks_the_crane_and_restores_input() {
        let (mut rig, mut monitor, mut tracker) = collided();
        let mut seq = RecoverySequencer::new(MotionRates::RECOVERY);
        seq.start();
        assert!(seq.is_active());

        let mut finished = false;
        for _ in 0..10_000 {
            assert!(tracker.is_disabled());
            if seq.advance(DT, &mut rig, &mut monitor, &mut tracker) {
                finished = true;
                break;
            }
        }

        assert!(finished);
        assert_eq!(seq.step(), RecoveryStep::Idle);
        assert!(!monitor.is_colliding());
        assert!(!tracker.is_disabled());
        assert!(rig.is_home());
        let parked = rig.claw_position().xz();
        assert!(parked.distance(Vec2::new(2.5, 0.0)) < 1e-3);
    }

    #[test]
    fn one_step_advances_per_frame() {
        let (mut rig, mut monitor, mut tracker) = collided();
        let mut seq = RecoverySequencer::new(MotionRates::RECOVERY);
        seq.start();
        // A huge frame finishes the first step but only moves one step on.
        let _ = seq.advance(100.0, &mut rig, &mut monitor, &mut tracker);
        assert_eq!(seq.step(), RecoveryStep::RaiseHoist);
        assert_eq!(rig.claw().angle(), FRAC_PI_4);
    }

    #[test]
    fn start_while_running_keeps_the_current_step() {
        let (mut rig, mut monitor, mut tracker) = collided();
        let mut seq = RecoverySequencer::new(MotionRates::RECOVERY);
        seq.start();
        let _ = seq.advance(100.0, &mut rig, &mut monitor, &mut tracker);
        seq.start();
        assert_eq!(seq.step(), RecoveryStep::RaiseHoist);
    }

    fn joint_value(min: f32, max: f32) -> impl Strategy<Value = f32> {
        prop_oneof![Just(min), Just(max), min..=max]
    }

    proptest! {
        #[test]
        fn prop_any_pose_parks_at_home(
            trolley in joint_value(2.5, 18.0),
            cable in joint_value(0.0, 20.0),
            claw in joint_value(0.0, FRAC_PI_4),
            yaw in prop_oneof![Just(0.0f32), Just(PI), Just(4.5f32), 0.0f32..TAU],
        ) {
            let options = CraneOptions {
                initial: InitialPose { trolley, cable, claw, yaw },
                ..CraneOptions::default()
            };
            let mut rig = CraneRig::new(&options);
            let mut monitor = CollisionMonitor::new();
            let marker = CargoMarker::new(rig.claw_position().xz(), 1.0);
            prop_assert!(monitor.check(rig.claw_position(), &[marker], 1.0, 1.0));
            let mut tracker = KeyTracker::new();
            tracker.disable();

            let mut seq = RecoverySequencer::new(MotionRates::RECOVERY);
            seq.start();
            let mut ticks = 0;
            while !seq.advance(DT, &mut rig, &mut monitor, &mut tracker) {
                ticks += 1;
                prop_assert!(ticks < 5_000, "stuck at {}", seq.step());
            }

            prop_assert_eq!(seq.step(), RecoveryStep::Idle);
            prop_assert!(rig.is_home());
            prop_assert!(!monitor.is_colliding());
            prop_assert!(!tracker.is_disabled());
        }
    }
}
