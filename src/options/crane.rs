use std::f32::consts::FRAC_PI_4;

use serde::{Deserialize, Serialize};

use crate::crane::JointRange;
use crate::error::ConfigError;

/// Per-second speeds for each crane joint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionRates {
    /// Trolley speed in units per second.
    pub trolley: f32,
    /// Cable pay-out/reel-in speed in units per second.
    pub cable: f32,
    /// Claw finger speed in radians per second.
    pub claw: f32,
    /// Cabin yaw speed in radians per second.
    pub yaw: f32,
}

impl MotionRates {
    /// Manual-control defaults (60 Hz equivalents of 0.2, 0.3, 0.05 and
    /// 0.07 per frame).
    pub const MANUAL: Self = Self {
        trolley: 12.0,
        cable: 18.0,
        claw: 3.0,
        yaw: 4.2,
    };

    /// Recovery-sequence defaults.
    pub const RECOVERY: Self = Self {
        trolley: 5.0,
        cable: 8.0,
        claw: 2.0,
        yaw: 1.0,
    };

    fn validate(&self, section: Section) -> Result<(), ConfigError> {
        let fields = match section {
            Section::Manual => [
                ("crane.manual_rates.trolley", self.trolley),
                ("crane.manual_rates.cable", self.cable),
                ("crane.manual_rates.claw", self.claw),
                ("crane.manual_rates.yaw", self.yaw),
            ],
            Section::Recovery => [
                ("crane.recovery_rates.trolley", self.trolley),
                ("crane.recovery_rates.cable", self.cable),
                ("crane.recovery_rates.claw", self.claw),
                ("crane.recovery_rates.yaw", self.yaw),
            ],
        };
        super::check_positive(&fields)
    }
}

impl Default for MotionRates {
    fn default() -> Self {
        Self::MANUAL
    }
}

#[derive(Clone, Copy)]
enum Section {
    Manual,
    Recovery,
}

/// Joint values the crane starts in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InitialPose {
    /// Trolley offset along the jib.
    pub trolley: f32,
    /// Hoist cable length.
    pub cable: f32,
    /// Claw angle (0 = open).
    pub claw: f32,
    /// Cabin yaw in radians.
    pub yaw: f32,
}

impl Default for InitialPose {
    fn default() -> Self {
        Self {
            trolley: 18.0,
            cable: 5.0,
            claw: 0.0,
            yaw: 0.0,
        }
    }
}

/// Crane joint ranges, starting pose and motion rates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CraneOptions {
    /// Trolley travel along the jib.
    pub trolley: JointRange,
    /// Hoist cable length.
    pub cable: JointRange,
    /// Claw finger angle (min = open, max = closed).
    pub claw: JointRange,
    /// Starting joint values (clamped into the ranges).
    pub initial: InitialPose,
    /// Speeds used while the operator drives the crane.
    pub manual_rates: MotionRates,
    /// Speeds used by the recovery sequence.
    pub recovery_rates: MotionRates,
}

impl Default for CraneOptions {
    fn default() -> Self {
        Self {
            trolley: JointRange::new(2.5, 18.0),
            cable: JointRange::new(0.0, 20.0),
            claw: JointRange::new(0.0, FRAC_PI_4),
            initial: InitialPose::default(),
            manual_rates: MotionRates::MANUAL,
            recovery_rates: MotionRates::RECOVERY,
        }
    }
}

impl CraneOptions {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.trolley.validate("trolley")?;
        self.cable.validate("cable")?;
        self.claw.validate("claw")?;
        super::check_finite(&[
            ("crane.initial.trolley", self.initial.trolley),
            ("crane.initial.cable", self.initial.cable),
            ("crane.initial.claw", self.initial.claw),
            ("crane.initial.yaw", self.initial.yaw),
        ])?;
        self.manual_rates.validate(Section::Manual)?;
        self.recovery_rates.validate(Section::Recovery)
    }
}
