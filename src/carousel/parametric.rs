//! The height functions used for the carousel's parametric surfaces.

use glam::Vec3;

/// Half-extent of the sampled `x`/`z` domain.
pub const DOMAIN_HALF_EXTENT: f32 = 2.0;
/// Heights are clamped to `[-HEIGHT_LIMIT, HEIGHT_LIMIT]`.
pub const HEIGHT_LIMIT: f32 = 3.0;

/// A height field `y = f(x, z)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceFn {
    /// `sin(x + z)`
    SinSum,
    /// `cos(x + z)`
    CosSum,
    /// `x² + z²`
    Paraboloid,
    /// `√|3 − x² − z²|`
    Cap,
    /// `√(x² + z²)`
    Cone,
    /// `√|x + z|`
    RootRidge,
    /// `e^(x + z)`
    Exponential,
    /// `x + z`
    Plane,
}

impl SurfaceFn {
    /// Every function, in placement order.
    pub const ALL: [Self; 8] = [
        Self::SinSum,
        Self::CosSum,
        Self::Paraboloid,
        Self::Cap,
        Self::Cone,
        Self::RootRidge,
        Self::Exponential,
        Self::Plane,
    ];

    /// Position of the function in [`ALL`](Self::ALL).
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Unclamped height at `(x, z)`.
    #[must_use]
    pub fn eval(self, x: f32, z: f32) -> f32 {
        let r2 = x * x + z * z;
        match self {
            Self::SinSum => (x + z).sin(),
            Self::CosSum => (x + z).cos(),
            Self::Paraboloid => r2,
            Self::Cap => (3.0 - r2).abs().sqrt(),
            Self::Cone => r2.sqrt(),
            Self::RootRidge => (x + z).abs().sqrt(),
            Self::Exponential => (x + z).exp(),
            Self::Plane => x + z,
        }
    }

    /// Surface point for parameters `(u, v)` in `[0, 1]²`.
    #[must_use]
    pub fn point(self, u: f32, v: f32) -> Vec3 {
        let x = (u - 0.5) * 2.0 * DOMAIN_HALF_EXTENT;
        let z = (v - 0.5) * 2.0 * DOMAIN_HALF_EXTENT;
        let y = self.eval(x, z).clamp(-HEIGHT_LIMIT, HEIGHT_LIMIT);
        Vec3::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_placement_order() {
        for (i, f) in SurfaceFn::ALL.into_iter().enumerate() {
            assert_eq!(f.index(), i);
        }
    }

    #[test]
    fn domain_spans_four_units() {
        let corner = SurfaceFn::Plane.point(0.0, 1.0);
        assert_eq!(corner, Vec3::new(-2.0, 0.0, 2.0));
    }

    #[test]
    fn heights_are_clamped() {
        for f in SurfaceFn::ALL {
            for (u, v) in [(0.0, 0.0), (1.0, 1.0), (0.5, 0.5), (1.0, 0.0)] {
                let p = f.point(u, v);
                assert!(p.y.abs() <= HEIGHT_LIMIT, "{f:?} at ({u}, {v})");
            }
        }
        assert_eq!(SurfaceFn::Exponential.point(1.0, 1.0).y, 3.0);
        assert_eq!(SurfaceFn::Paraboloid.point(0.0, 0.0).y, 3.0);
    }
}
