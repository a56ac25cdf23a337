use glam::Vec3;

use super::core::{Camera, Projection};
use crate::options::CameraOptions;

/// Number of preset cameras.
pub const CAMERA_COUNT: usize = 5;

/// The crane demo's five fixed cameras, all aimed at the origin, and the
/// index of the one currently rendering.
///
/// Presets, in selection order: front (+x), side (+z), top, orthographic
/// isometric, perspective isometric. The perspective isometric camera is
/// active at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    cameras: [Camera; CAMERA_COUNT],
    current: usize,
    zoom_step: f32,
    min_zoom: f32,
    max_zoom: f32,
}

impl CameraRig {
    /// The preset cameras for a viewport of the given aspect ratio.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        let perspective = Projection::Perspective {
            fovy: options.fovy,
        };
        let ortho = Projection::Orthographic {
            half_height: options.ortho_half_height,
        };
        let preset = |eye: Vec3, projection| {
            Camera::new(
                eye,
                Vec3::ZERO,
                projection,
                options.znear,
                options.zfar,
            )
        };

        let mut cameras = [
            preset(Vec3::new(50.0, 50.0, 0.0), perspective),
            preset(Vec3::new(0.0, 50.0, 50.0), perspective),
            // Looking straight down: +Y up would be parallel to the view.
            preset(Vec3::new(0.0, 50.0, 0.0), perspective)
                .with_up(Vec3::NEG_Z),
            preset(Vec3::splat(50.0), ortho),
            preset(Vec3::splat(50.0), perspective),
        ];
        for camera in &mut cameras {
            camera.aspect = aspect;
        }

        Self {
            cameras,
            current: CAMERA_COUNT - 1,
            zoom_step: options.zoom_step,
            min_zoom: options.min_zoom,
            max_zoom: options.max_zoom,
        }
    }

    /// Camera currently rendering.
    #[must_use]
    pub fn current(&self) -> &Camera {
        &self.cameras[self.current]
    }

    /// Zero-based index of the current camera.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Switch to camera `index` (zero-based). Out-of-range indices are
    /// ignored.
    pub fn select(&mut self, index: usize) {
        if index < CAMERA_COUNT && index != self.current {
            self.current = index;
            log::debug!("camera {} selected", index + 1);
        }
    }

    /// Translate the current camera.
    pub fn nudge(&mut self, offset: Vec3) {
        self.cameras[self.current].translate(offset);
    }

    /// Apply a mouse-wheel delta to the current camera's zoom. Scrolling
    /// down (positive delta) zooms out.
    pub fn zoom(&mut self, wheel_delta: f32) {
        let step = wheel_delta.clamp(-self.zoom_step, self.zoom_step);
        let camera = &mut self.cameras[self.current];
        camera.zoom = (camera.zoom - step).clamp(self.min_zoom, self.max_zoom);
    }

    /// Update every camera's aspect ratio after a viewport resize.
    /// Zero-sized viewports are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let aspect = width as f32 / height as f32;
        for camera in &mut self.cameras {
            camera.aspect = aspect;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> CameraRig {
        CameraRig::new(&CameraOptions::default(), 1.5)
    }

    #[test]
    fn starts_on_perspective_isometric() {
        let rig = rig();
        assert_eq!(rig.current_index(), 4);
        assert_eq!(rig.current().eye, Vec3::splat(50.0));
        assert!(matches!(
            rig.current().projection,
            Projection::Perspective { .. }
        ));
    }

    #[test]
    fn select_ignores_out_of_range() {
        let mut rig = rig();
        rig.select(3);
        assert!(matches!(
            rig.current().projection,
            Projection::Orthographic { .. }
        ));
        rig.select(9);
        assert_eq!(rig.current_index(), 3);
    }

    #[test]
    fn top_camera_has_a_usable_view() {
        let mut rig = rig();
        rig.select(2);
        assert!(rig.current().build_view().is_finite());
    }

    #[test]
    fn zoom_clamps_delta_and_range() {
        let mut rig = rig();
        rig.zoom(-5.0);
        assert!((rig.current().zoom - 1.1).abs() < 1e-6);
        for _ in 0..200 {
            rig.zoom(3.0);
        }
        assert_eq!(rig.current().zoom, 0.1);
    }

    #[test]
    fn nudge_and_zoom_only_touch_the_current_camera() {
        let mut rig = rig();
        rig.nudge(Vec3::X);
        rig.zoom(-0.1);
        rig.select(0);
        assert_eq!(rig.current().eye, Vec3::new(50.0, 50.0, 0.0));
        assert_eq!(rig.current().zoom, 1.0);
    }

    #[test]
    fn resize_updates_every_camera() {
        let mut rig = rig();
        rig.resize(800, 400);
        for index in 0..CAMERA_COUNT {
            rig.select(index);
            assert_eq!(rig.current().aspect, 2.0);
        }
        rig.resize(0, 400);
        assert_eq!(rig.current().aspect, 2.0);
    }
}
