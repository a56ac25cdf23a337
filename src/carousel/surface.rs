//! Placement and spin of the parametric surfaces riding on the rings.

use glam::{Mat4, Quat, Vec3};
use rand::Rng;

use super::parametric::SurfaceFn;
use crate::util::math::wrap_angle;

/// Axis a surface spins about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinAxis {
    /// Local x.
    X,
    /// Local y.
    Y,
    /// Local z.
    Z,
}

impl SpinAxis {
    /// Uniformly random axis.
    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.random_range(0..3) {
            0 => Self::X,
            1 => Self::Y,
            _ => Self::Z,
        }
    }
}

/// A constant-rate rotation about one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spinner {
    axis: SpinAxis,
    angle: f32,
}

impl Spinner {
    /// Spinner at angle zero.
    #[must_use]
    pub fn new(axis: SpinAxis) -> Self {
        Self { axis, angle: 0.0 }
    }

    /// Spin axis.
    #[must_use]
    pub fn axis(&self) -> SpinAxis {
        self.axis
    }

    /// Accumulated angle, wrapped to `[0, 2π)`.
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Rotate by `delta` radians.
    pub fn advance(&mut self, delta: f32) {
        self.angle = wrap_angle(self.angle + delta);
    }

    /// Current rotation.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        match self.axis {
            SpinAxis::X => Quat::from_rotation_x(self.angle),
            SpinAxis::Y => Quat::from_rotation_y(self.angle),
            SpinAxis::Z => Quat::from_rotation_z(self.angle),
        }
    }
}

/// One parametric surface mounted on a ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePlacement {
    /// Ring index (0 is innermost).
    pub ring: usize,
    /// Height function of the surface.
    pub function: SurfaceFn,
    /// Angle around the column, measured from +z toward +x.
    pub angle: f32,
    /// Uniform scale.
    pub scale: f32,
    /// Self-rotation.
    pub spinner: Spinner,
}

impl SurfacePlacement {
    /// Mount point relative to the ring's frame.
    #[must_use]
    pub fn mount(&self, radius: f32, lift: f32) -> Vec3 {
        Vec3::new(
            radius * self.angle.sin(),
            lift,
            radius * self.angle.cos(),
        )
    }

    /// Transform from surface space to the ring's frame.
    #[must_use]
    pub fn local_transform(&self, radius: f32, lift: f32) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.spinner.rotation(),
            self.mount(radius, lift),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn spinner_wraps() {
        let mut spinner = Spinner::new(SpinAxis::Y);
        for _ in 0..5 {
            spinner.advance(FRAC_PI_2);
        }
        assert!((spinner.angle() - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn mount_angle_starts_on_positive_z() {
        let placement = SurfacePlacement {
            ring: 0,
            function: SurfaceFn::Plane,
            angle: 0.0,
            scale: 0.3,
            spinner: Spinner::new(SpinAxis::X),
        };
        assert_eq!(placement.mount(2.0, 1.0), Vec3::new(0.0, 1.0, 2.0));
        let m = placement.local_transform(2.0, 1.0);
        let p = m.transform_point3(Vec3::X);
        assert!((p - Vec3::new(0.3, 1.0, 2.0)).length() < 1e-5);
    }
}
