//! Cameras for 3D scene viewing.
//!
//! Provides look-at cameras with perspective or orthographic projection
//! and zoom, and the crane demo's set of preset cameras.

/// Core camera struct and GPU uniform types.
pub mod core;
/// Preset camera set with selection, nudging and zoom.
pub mod rig;

pub use self::core::{Camera, CameraUniform, Projection};
pub use rig::CameraRig;
