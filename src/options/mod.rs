//! Centralized scene options with TOML file support.
//!
//! Every tweakable constant of both demos (joint ranges and rates, cargo
//! layout, collision radii, cameras, key bindings, carousel speeds) lives
//! here. The defaults are the demos' built-in values; a TOML file may
//! override any subset of them.

mod camera;
mod cargo;
mod carousel;
mod crane;
mod keybindings;

use std::path::Path;

pub use camera::CameraOptions;
pub use cargo::{CargoOptions, CollisionOptions};
pub use carousel::CarouselOptions;
pub use crane::{CraneOptions, InitialPose, MotionRates};
pub use keybindings::KeybindingOptions;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, DerrickError};

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[cargo]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Crane joint ranges, initial pose and rates.
    pub crane: CraneOptions,
    /// Cargo marker layout.
    pub cargo: CargoOptions,
    /// Claw/cargo proximity radii.
    pub collision: CollisionOptions,
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
    /// Carousel animation parameters.
    pub carousel: CarouselOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors, malformed TOML, or values rejected by
    /// [`validate`](Self::validate).
    pub fn load(path: &Path) -> Result<Self, DerrickError> {
        let content = std::fs::read_to_string(path).map_err(DerrickError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| DerrickError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Fails on serialization or I/O errors.
    pub fn save(&self, path: &Path) -> Result<(), DerrickError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DerrickError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(DerrickError::Io)?;
        }
        std::fs::write(path, content).map_err(DerrickError::Io)
    }

    /// Reject configurations the demos cannot run with.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.crane.validate()?;
        self.cargo.validate()?;
        self.collision.validate()?;
        self.camera.validate()?;
        self.carousel.validate()
    }
}

fn check_finite(fields: &[(&'static str, f32)]) -> Result<(), ConfigError> {
    for &(field, value) in fields {
        if !value.is_finite() {
            return Err(ConfigError::NonFinite { field, value });
        }
    }
    Ok(())
}

fn check_positive(fields: &[(&'static str, f32)]) -> Result<(), ConfigError> {
    for &(field, value) in fields {
        if !(value.is_finite() && value > 0.0) {
            return Err(ConfigError::NonPositive { field, value });
        }
    }
    Ok(())
}
