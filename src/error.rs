//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// A configuration that cannot produce a working scene. Detected once, at
/// session construction, never during the frame loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A joint range is inverted or not finite.
    InvalidRange {
        /// Joint name (`"trolley"`, `"cable"`, `"claw"`).
        joint: &'static str,
        /// Configured lower bound.
        min: f32,
        /// Configured upper bound.
        max: f32,
    },
    /// The cargo set is empty.
    EmptyCargo,
    /// A length, radius or rate that must be positive is not.
    NonPositive {
        /// Dotted option path, e.g. `"collision.claw_radius"`.
        field: &'static str,
        /// Offending value.
        value: f32,
    },
    /// A value that must be a finite number is not.
    NonFinite {
        /// Dotted option path, e.g. `"crane.initial.yaw"`.
        field: &'static str,
        /// Offending value.
        value: f32,
    },
    /// Cargo markers could not be scattered under the separation rules.
    CargoPlacement {
        /// Markers placed before giving up.
        placed: usize,
        /// Markers requested.
        requested: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { joint, min, max } => {
                write!(f, "invalid {joint} range [{min}, {max}]")
            }
            Self::EmptyCargo => write!(f, "cargo count must be at least 1"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::NonFinite { field, value } => {
                write!(f, "{field} must be a finite number, got {value}")
            }
            Self::CargoPlacement { placed, requested } => write!(
                f,
                "could only place {placed} of {requested} cargo markers"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors produced by the derrick crate.
#[derive(Debug)]
pub enum DerrickError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Scene configuration rejected at construction.
    Config(ConfigError),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for DerrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for DerrickError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::OptionsParse(_) | Self::Viewer(_) => None,
        }
    }
}

impl From<RenderContextError> for DerrickError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for DerrickError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ConfigError> for DerrickError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
