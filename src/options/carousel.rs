use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Carousel animation speeds and ring travel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CarouselOptions {
    /// Ring lift speed in units per second while its key is held.
    pub ring_speed: f32,
    /// Lowest ring height.
    pub ring_min_height: f32,
    /// Highest ring height.
    pub ring_max_height: f32,
    /// Spin speed of each parametric surface in radians per second.
    pub surface_spin: f32,
    /// Spin speed of the central column in radians per second.
    pub column_spin: f32,
    /// Fixed RNG seed for surface placement; random when unset.
    pub seed: Option<u64>,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            ring_speed: 6.0,
            ring_min_height: 1.0,
            ring_max_height: 5.0,
            surface_spin: 0.5,
            column_spin: 0.1,
            seed: None,
        }
    }
}

impl CarouselOptions {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        super::check_positive(&[
            ("carousel.ring_speed", self.ring_speed),
            (
                "carousel.ring_max_height",
                self.ring_max_height - self.ring_min_height,
            ),
        ])
    }
}
