use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera projection and control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees (perspective cameras).
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Half the visible height of the orthographic camera at zoom 1.
    pub ortho_half_height: f32,
    /// Largest wheel step applied per event.
    pub zoom_step: f32,
    /// Zoom factor lower bound.
    pub min_zoom: f32,
    /// Zoom factor upper bound.
    pub max_zoom: f32,
    /// Distance an arrow key moves the camera per frame.
    pub nudge_step: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 70.0,
            znear: 1.0,
            zfar: 1000.0,
            ortho_half_height: 40.0,
            zoom_step: 0.1,
            min_zoom: 0.1,
            max_zoom: 10.0,
            nudge_step: 1.0,
        }
    }
}

impl CameraOptions {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        super::check_positive(&[
            ("camera.fovy", self.fovy),
            ("camera.znear", self.znear),
            ("camera.zfar", self.zfar - self.znear),
            ("camera.ortho_half_height", self.ortho_half_height),
            ("camera.min_zoom", self.min_zoom),
            ("camera.max_zoom", self.max_zoom - self.min_zoom),
            ("camera.zoom_step", self.zoom_step),
            ("camera.nudge_step", self.nudge_step),
        ])
    }
}
