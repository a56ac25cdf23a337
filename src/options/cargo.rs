use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How the static cargo markers are scattered around the crane.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CargoOptions {
    /// Number of markers.
    pub count: usize,
    /// Markers are placed in `[-spread, spread]` on both ground axes.
    pub spread: f32,
    /// Per-marker radius used for marker-to-marker separation.
    pub separation_radius: f32,
    /// Radius kept clear around the crane base (doubled like a pair of
    /// touching circles).
    pub base_clearance: f32,
    /// Random draws before placement gives up.
    pub max_attempts: usize,
    /// Fixed RNG seed for a reproducible layout; random when unset.
    pub seed: Option<u64>,
}

impl Default for CargoOptions {
    fn default() -> Self {
        Self {
            count: 20,
            spread: 10.0,
            separation_radius: 3.0_f32.sqrt() / 2.0,
            base_clearance: 2.0,
            max_attempts: 10_000,
            seed: None,
        }
    }
}

impl CargoOptions {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::EmptyCargo);
        }
        super::check_positive(&[
            ("cargo.spread", self.spread),
            ("cargo.separation_radius", self.separation_radius),
            ("cargo.base_clearance", self.base_clearance),
        ])
    }
}

/// Effective radii for the claw/cargo proximity test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CollisionOptions {
    /// Radius around the claw block.
    pub claw_radius: f32,
    /// Radius around each cargo marker.
    pub cargo_radius: f32,
}

impl Default for CollisionOptions {
    fn default() -> Self {
        Self {
            claw_radius: 1.5,
            cargo_radius: 1.5,
        }
    }
}

impl CollisionOptions {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        super::check_positive(&[
            ("collision.claw_radius", self.claw_radius),
            ("collision.cargo_radius", self.cargo_radius),
        ])
    }
}
