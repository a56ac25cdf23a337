//! Claw/cargo proximity detection.
//!
//! Cargo markers are static ground-plane circles scattered once per
//! session. Each frame the [`CollisionMonitor`] compares the claw's
//! ground-projected position against every marker; the first overlap sets
//! the collision flag and hands control to the recovery sequence. Further
//! checks are no-ops until the sequence clears the flag.

/// Marker type and the seeded scatter routine.
pub mod cargo;

pub use cargo::{scatter_cargo, CargoMarker};
use glam::{Vec3, Vec3Swizzles};

/// Owner of the session's collision flag.
#[derive(Debug, Default)]
pub struct CollisionMonitor {
    colliding: bool,
    collisions: u32,
}

impl CollisionMonitor {
    /// Monitor with the flag cleared.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a collision is being handled.
    #[must_use]
    pub fn is_colliding(&self) -> bool {
        self.colliding
    }

    /// Collisions detected this session.
    #[must_use]
    pub fn collision_count(&self) -> u32 {
        self.collisions
    }

    /// Test the claw against every marker.
    ///
    /// Returns `true` only for a newly detected overlap: the planar
    /// distance between claw and marker is below
    /// `claw_radius + cargo_radius`. Does nothing and returns `false`
    /// while the flag is already set.
    pub fn check(
        &mut self,
        claw: Vec3,
        cargo: &[CargoMarker],
        claw_radius: f32,
        cargo_radius: f32,
    ) -> bool {
        if self.colliding {
            return false;
        }

        let claw_ground = claw.xz();
        let reach = claw_radius + cargo_radius;
        let Some(hit) = cargo
            .iter()
            .find(|marker| claw_ground.distance(marker.ground()) < reach)
        else {
            return false;
        };

        self.colliding = true;
        self.collisions += 1;
        log::warn!(
            "collision: claw at ({:.2}, {:.2}) hit cargo at ({:.2}, {:.2}); \
             input stopped until the crane is parked",
            claw_ground.x,
            claw_ground.y,
            hit.ground().x,
            hit.ground().y,
        );
        true
    }

    /// Clear the flag once recovery has finished.
    pub fn clear(&mut self) {
        self.colliding = false;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    fn marker(x: f32, z: f32) -> CargoMarker {
        CargoMarker::new(Vec2::new(x, z), 1.5)
    }

    #[test]
    fn overlap_sets_flag_once() {
        let mut monitor = CollisionMonitor::new();
        let cargo = [marker(2.0, 0.0)];

        assert!(monitor.check(Vec3::ZERO, &cargo, 1.5, 1.5));
        assert!(monitor.is_colliding());

        // Flag already set: no-op.
        assert!(!monitor.check(Vec3::ZERO, &cargo, 1.5, 1.5));
        assert!(monitor.is_colliding());
        assert_eq!(monitor.collision_count(), 1);
    }

    #[test]
    fn touching_circles_do_not_collide() {
        let mut monitor = CollisionMonitor::new();
        assert!(!monitor.check(Vec3::ZERO, &[marker(3.0, 0.0)], 1.5, 1.5));
        assert!(!monitor.is_colliding());
    }

    #[test]
    fn height_is_ignored() {
        let mut monitor = CollisionMonitor::new();
        let claw = Vec3::new(0.0, 30.0, 0.0);
        assert!(monitor.check(claw, &[marker(0.0, 2.9)], 1.5, 1.5));
    }

    #[test]
    fn clear_rearms_the_monitor() {
        let mut monitor = CollisionMonitor::new();
        let cargo = [marker(1.0, 1.0)];
        assert!(monitor.check(Vec3::ZERO, &cargo, 1.5, 1.5));
        monitor.clear();
        assert!(!monitor.is_colliding());
        assert!(monitor.check(Vec3::ZERO, &cargo, 1.5, 1.5));
        assert_eq!(monitor.collision_count(), 2);
    }

    #[test]
    fn empty_cargo_never_collides() {
        let mut monitor = CollisionMonitor::new();
        assert!(!monitor.check(Vec3::ZERO, &[], 1.5, 1.5));
    }
}
