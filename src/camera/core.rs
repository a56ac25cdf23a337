use glam::{Mat4, Vec3};

/// How a camera maps view space to clip space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Perspective projection with a vertical field of view in degrees.
    Perspective {
        /// Vertical field of view in degrees at zoom 1.
        fovy: f32,
    },
    /// Orthographic projection showing `2 * half_height` world units
    /// vertically at zoom 1.
    Orthographic {
        /// Half the visible height in world units.
        half_height: f32,
    },
}

/// Camera defined by eye position, target, projection and zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Projection kind and its size parameter.
    pub projection: Projection,
    /// Magnification factor; larger values show less of the scene.
    pub zoom: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and eye position.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
}

impl Camera {
    /// Camera at `eye` looking at `target` with +Y up and zoom 1.
    #[must_use]
    pub fn new(
        eye: Vec3,
        target: Vec3,
        projection: Projection,
        znear: f32,
        zfar: f32,
    ) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            aspect: 1.0,
            projection,
            zoom: 1.0,
            znear,
            zfar,
        }
    }

    /// Replace the up vector.
    #[must_use]
    pub fn with_up(mut self, up: Vec3) -> Self {
        self.up = up;
        self
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// View-to-clip matrix, zoom applied.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        // *_rh already use the [0,1] depth range (wgpu/Vulkan convention)
        match self.projection {
            Projection::Perspective { fovy } => {
                let half = (fovy.to_radians() * 0.5).tan() / self.zoom;
                Mat4::perspective_rh(
                    2.0 * half.atan(),
                    self.aspect,
                    self.znear,
                    self.zfar,
                )
            }
            Projection::Orthographic { half_height } => {
                let h = half_height / self.zoom;
                let w = h * self.aspect;
                Mat4::orthographic_rh(-w, w, -h, h, self.znear, self.zfar)
            }
        }
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// Move eye and target together, keeping the view direction.
    pub fn translate(&mut self, offset: Vec3) {
        self.eye += offset;
        self.target += offset;
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.eye.to_array();
        self.aspect = camera.aspect;
    }
}
