use glam::{Vec2, Vec3};
use rand::Rng;

use crate::error::ConfigError;
use crate::options::CargoOptions;

/// A static cargo marker on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CargoMarker {
    ground: Vec2,
    radius: f32,
}

impl CargoMarker {
    /// Marker at ground position `(x, z)`.
    #[must_use]
    pub fn new(ground: Vec2, radius: f32) -> Self {
        Self { ground, radius }
    }

    /// Ground-plane position as `(x, z)`.
    #[must_use]
    pub fn ground(&self) -> Vec2 {
        self.ground
    }

    /// Separation radius used when the marker was placed.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// World-space position (on the ground, `y = 0`).
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.ground.x, 0.0, self.ground.y)
    }
}

/// Scatter `options.count` markers uniformly over the square of
/// half-width `options.spread`.
///
/// A candidate is rejected when it overlaps an existing marker (both
/// circles of `separation_radius`), the crane base (two circles of
/// `base_clearance` at the origin), or the parked claw at `keep_clear`
/// (circle of `keep_clear_radius`).
///
/// # Errors
///
/// [`ConfigError::EmptyCargo`] for a zero count, and
/// [`ConfigError::CargoPlacement`] when `max_attempts` draws were not
/// enough to place every marker.
pub fn scatter_cargo(
    options: &CargoOptions,
    keep_clear: Vec2,
    keep_clear_radius: f32,
    rng: &mut impl Rng,
) -> Result<Vec<CargoMarker>, ConfigError> {
    if options.count == 0 {
        return Err(ConfigError::EmptyCargo);
    }

    let radius = options.separation_radius;
    let mut markers: Vec<CargoMarker> = Vec::with_capacity(options.count);
    let mut attempts = 0;

    while markers.len() < options.count {
        if attempts >= options.max_attempts {
            return Err(ConfigError::CargoPlacement {
                placed: markers.len(),
                requested: options.count,
            });
        }
        attempts += 1;

        let candidate = Vec2::new(
            rng.random_range(-options.spread..options.spread),
            rng.random_range(-options.spread..options.spread),
        );

        let overlaps_marker = markers
            .iter()
            .any(|m| m.ground.distance(candidate) < radius + m.radius);
        let near_base =
            candidate.length() < 2.0 * options.base_clearance;
        let near_home =
            candidate.distance(keep_clear) < keep_clear_radius;

        if !(overlaps_marker || near_base || near_home) {
            markers.push(CargoMarker::new(candidate, radius));
        }
    }

    log::debug!(
        "placed {} cargo markers in {attempts} draws",
        markers.len()
    );
    Ok(markers)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn default_layout_respects_separation() {
        let options = CargoOptions::default();
        let mut rng = StdRng::seed_from_u64(7);
        let home = Vec2::new(2.5, 0.0);
        let cargo = scatter_cargo(&options, home, 3.0, &mut rng).unwrap();

        assert_eq!(cargo.len(), options.count);
        for (i, a) in cargo.iter().enumerate() {
            assert!(a.ground().length() >= 2.0 * options.base_clearance);
            assert!(a.ground().distance(home) >= 3.0);
            assert!(a.ground().x.abs() <= options.spread);
            assert!(a.ground().y.abs() <= options.spread);
            for b in &cargo[i + 1..] {
                assert!(
                    a.ground().distance(b.ground())
                        >= 2.0 * options.separation_radius
                );
            }
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let options = CargoOptions::default();
        let a = scatter_cargo(
            &options,
            Vec2::ZERO,
            1.0,
            &mut StdRng::seed_from_u64(99),
        )
        .unwrap();
        let b = scatter_cargo(
            &options,
            Vec2::ZERO,
            1.0,
            &mut StdRng::seed_from_u64(99),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn impossible_layout_fails_instead_of_looping() {
        let options = CargoOptions {
            count: 500,
            spread: 5.0,
            max_attempts: 2_000,
            ..CargoOptions::default()
        };
        let result = scatter_cargo(
            &options,
            Vec2::ZERO,
            1.0,
            &mut StdRng::seed_from_u64(1),
        );
        assert!(matches!(
            result,
            Err(ConfigError::CargoPlacement { requested: 500, .. })
        ));
    }

    #[test]
    fn zero_count_is_rejected() {
        let options = CargoOptions {
            count: 0,
            ..CargoOptions::default()
        };
        let result = scatter_cargo(
            &options,
            Vec2::ZERO,
            1.0,
            &mut StdRng::seed_from_u64(1),
        );
        assert_eq!(result, Err(ConfigError::EmptyCargo));
    }
}
