//! The carousel demo: three concentric rings on a spinning column, each
//! carrying eight spinning parametric surfaces, under a Möbius strip ringed
//! by point lights.
//!
//! Holding a ring key lifts that ring, bouncing between two heights. The
//! light and shading keys are edge-triggered toggles.

/// Parametric height functions.
pub mod parametric;
/// Ring lift with bounce.
pub mod ring;
/// Surface placement and spin.
pub mod surface;

use std::f32::consts::TAU;
use std::fmt;

use glam::{Mat4, Vec3};
pub use parametric::SurfaceFn;
use rand::Rng;
pub use ring::RingLift;
pub use surface::{SpinAxis, Spinner, SurfacePlacement};

use crate::camera::{Camera, Projection};
use crate::error::DerrickError;
use crate::input::{CarouselAction, InputEvent, KeyTracker};
use crate::options::{CarouselOptions, KeybindingOptions, Options};
use crate::scene::ShadingMode;
use crate::util::math::wrap_angle;
use crate::util::rng::scene_rng;

/// Number of rings.
pub const RING_COUNT: usize = 3;
/// Radial width of each ring.
pub const RING_WIDTH: f32 = 4.0;
/// Ring extrusion depth (downward from the ring's height).
pub const RING_DEPTH: f32 = 1.0;
/// Column radius.
pub const COLUMN_RADIUS: f32 = 1.0;
/// Column height.
pub const COLUMN_HEIGHT: f32 = 5.0;
/// Height of the Möbius strip above the column base.
pub const MOBIUS_HEIGHT: f32 = 10.0;
/// Möbius strip centerline radius.
pub const MOBIUS_RADIUS: f32 = 1.5;
/// Radius of the light circle around the Möbius strip.
pub const MOBIUS_LIGHT_RADIUS: f32 = 5.0;
/// Number of lights around the Möbius strip.
pub const MOBIUS_LIGHT_COUNT: usize = 8;
/// Height of surface mounts above their ring.
pub const SURFACE_LIFT: f32 = 1.0;
/// Height of each surface's spot light above the surface mount.
pub const SPOT_LIGHT_LIFT: f32 = 1.0;
/// Skydome radius.
pub const SKYDOME_RADIUS: f32 = 30.0;
/// Fixed camera position.
pub const CAMERA_EYE: Vec3 = Vec3::new(15.0, 15.0, 15.0);

/// Inner and outer radius of ring `index`.
#[must_use]
pub fn ring_radii(index: usize) -> (f32, f32) {
    let inner = index as f32 * RING_WIDTH + 1.0;
    (inner, inner + RING_WIDTH)
}

/// Radius of the circle the surfaces of ring `index` are mounted on.
#[must_use]
pub fn surface_radius(index: usize) -> f32 {
    2.0 + index as f32 * RING_WIDTH
}

/// State of a running carousel demo.
#[derive(Debug)]
pub struct CarouselSession {
    options: CarouselOptions,
    bindings: KeybindingOptions,
    tracker: KeyTracker,
    rings: [RingLift; RING_COUNT],
    surfaces: Vec<SurfacePlacement>,
    column_angle: f32,
    directional_light: bool,
    spot_lights: bool,
    shading: ShadingMode,
    camera: Camera,
}

impl CarouselSession {
    /// Validate `options` and lay out the rings and surfaces.
    ///
    /// # Errors
    ///
    /// [`DerrickError::Config`] when the options are rejected.
    pub fn new(options: &Options) -> Result<Self, DerrickError> {
        options.validate()?;
        let mut rng = scene_rng(options.carousel.seed);
        let eighth = TAU / SurfaceFn::ALL.len() as f32;

        let mut surfaces = Vec::with_capacity(RING_COUNT * SurfaceFn::ALL.len());
        for ring in 0..RING_COUNT {
            let start = rng.random_range(0.0..7.0) * eighth;
            for (slot, function) in SurfaceFn::ALL.into_iter().enumerate() {
                surfaces.push(SurfacePlacement {
                    ring,
                    function,
                    angle: wrap_angle(start + slot as f32 * eighth),
                    scale: rng.random_range(0.2..0.4),
                    spinner: Spinner::new(SpinAxis::random(&mut rng)),
                });
            }
        }

        let camera = Camera::new(
            CAMERA_EYE,
            Vec3::ZERO,
            Projection::Perspective {
                fovy: options.camera.fovy,
            },
            options.camera.znear,
            options.camera.zfar,
        );

        log::info!("carousel session started");
        Ok(Self {
            options: options.carousel.clone(),
            bindings: options.keybindings.clone(),
            tracker: KeyTracker::new(),
            rings: std::array::from_fn(|i| RingLift::new(2.0 - i as f32)),
            surfaces,
            column_angle: 0.0,
            directional_light: true,
            spot_lights: true,
            shading: ShadingMode::Normal,
            camera,
        })
    }

    /// Buffer a key event for the next tick. Wheel events are ignored.
    pub fn handle_input(&mut self, event: &InputEvent) {
        self.tracker.queue(event);
    }

    /// Advance the demo by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.tracker.sample();

        let step = self.options.ring_speed * dt;
        for (ring, action) in self.rings.iter_mut().zip(CarouselAction::RINGS)
        {
            let held = self
                .bindings
                .carousel_key(action)
                .is_some_and(|key| self.tracker.is_held(key));
            if held {
                ring.update(
                    step,
                    self.options.ring_min_height,
                    self.options.ring_max_height,
                );
            }
        }

        if self.just_pressed(CarouselAction::ToggleDirectionalLight) {
            self.directional_light = !self.directional_light;
            log::debug!("directional light {}", self.directional_light);
        }
        if self.just_pressed(CarouselAction::SpotLightsOn) {
            self.spot_lights = true;
        }
        if self.just_pressed(CarouselAction::SpotLightsOff) {
            self.spot_lights = false;
        }
        for (action, mode) in [
            (CarouselAction::ShadeLambert, ShadingMode::Lambert),
            (CarouselAction::ShadePhong, ShadingMode::Phong),
            (CarouselAction::ShadeToon, ShadingMode::Toon),
            (CarouselAction::ShadeNormal, ShadingMode::Normal),
            (CarouselAction::ShadeBasic, ShadingMode::Basic),
        ] {
            if self.just_pressed(action) {
                self.shading = mode;
                log::debug!("shading {mode}");
            }
        }

        let spin = self.options.surface_spin * dt;
        for surface in &mut self.surfaces {
            surface.spinner.advance(spin);
        }
        self.column_angle =
            wrap_angle(self.column_angle + self.options.column_spin * dt);
    }

    fn just_pressed(&mut self, action: CarouselAction) -> bool {
        self.bindings
            .carousel_key(action)
            .is_some_and(|key| self.tracker.is_just_pressed(key))
    }

    /// Update the camera aspect ratio after a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Column frame: rotation about the vertical axis.
    #[must_use]
    pub fn column_transform(&self) -> Mat4 {
        Mat4::from_rotation_y(self.column_angle)
    }

    /// Frame of ring `index`, riding on the column.
    #[must_use]
    pub fn ring_transform(&self, index: usize) -> Mat4 {
        let height = self.rings.get(index).map_or(0.0, RingLift::height);
        self.column_transform()
            * Mat4::from_translation(Vec3::new(0.0, height, 0.0))
    }

    /// Frame of the Möbius strip and its light circle.
    #[must_use]
    pub fn mobius_transform(&self) -> Mat4 {
        self.column_transform()
            * Mat4::from_translation(Vec3::new(0.0, MOBIUS_HEIGHT, 0.0))
    }

    /// World transform of every surface, in placement order.
    #[must_use]
    pub fn surface_transforms(&self) -> Vec<(SurfaceFn, Mat4)> {
        self.surfaces
            .iter()
            .map(|s| {
                let local =
                    s.local_transform(surface_radius(s.ring), SURFACE_LIFT);
                (s.function, self.ring_transform(s.ring) * local)
            })
            .collect()
    }

    /// World positions of the eight lights around the Möbius strip.
    #[must_use]
    pub fn mobius_light_positions(&self) -> Vec<Vec3> {
        let frame = self.mobius_transform();
        (0..MOBIUS_LIGHT_COUNT)
            .map(|i| {
                let angle = i as f32 * TAU / MOBIUS_LIGHT_COUNT as f32;
                frame.transform_point3(Vec3::new(
                    MOBIUS_LIGHT_RADIUS * angle.sin(),
                    0.0,
                    MOBIUS_LIGHT_RADIUS * angle.cos(),
                ))
            })
            .collect()
    }

    /// World positions of the per-surface spot lights.
    #[must_use]
    pub fn spot_light_positions(&self) -> Vec<Vec3> {
        self.surfaces
            .iter()
            .map(|s| {
                let mount = s.mount(
                    surface_radius(s.ring),
                    SURFACE_LIFT + SPOT_LIGHT_LIFT,
                );
                self.ring_transform(s.ring).transform_point3(mount)
            })
            .collect()
    }

    /// Ring lift states.
    #[must_use]
    pub fn rings(&self) -> &[RingLift; RING_COUNT] {
        &self.rings
    }

    /// Surface placements.
    #[must_use]
    pub fn surfaces(&self) -> &[SurfacePlacement] {
        &self.surfaces
    }

    /// Column rotation in radians.
    #[must_use]
    pub fn column_angle(&self) -> f32 {
        self.column_angle
    }

    /// Whether the directional light is on.
    #[must_use]
    pub fn directional_light(&self) -> bool {
        self.directional_light
    }

    /// Whether the surface spot lights are on.
    #[must_use]
    pub fn spot_lights(&self) -> bool {
        self.spot_lights
    }

    /// Active shading mode.
    #[must_use]
    pub fn shading(&self) -> ShadingMode {
        self.shading
    }

    /// The fixed camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Status line for the window title.
    #[must_use]
    pub fn status(&self) -> CarouselStatus {
        CarouselStatus {
            shading: self.shading,
            directional_light: self.directional_light,
            spot_lights: self.spot_lights,
        }
    }
}

/// Carousel toggles shown in the window title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselStatus {
    /// Active shading mode.
    pub shading: ShadingMode,
    /// Directional light on.
    pub directional_light: bool,
    /// Spot lights on.
    pub spot_lights: bool,
}

impl fmt::Display for CarouselStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_off = |on| if on { "on" } else { "off" };
        write!(
            f,
            "shading {} | directional {} | spots {}",
            self.shading,
            on_off(self.directional_light),
            on_off(self.spot_lights)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> CarouselSession {
        let mut options = Options::default();
        options.carousel.seed = Some(3);
        CarouselSession::new(&options).unwrap()
    }

    fn tap(session: &mut CarouselSession, code: &str) {
        session.handle_input(&InputEvent::key(code, true));
        session.tick(0.0);
        session.handle_input(&InputEvent::key(code, false));
        session.tick(0.0);
    }

    #[test]
    fn layout_has_eight_surfaces_per_ring() {
        let session = session();
        assert_eq!(session.surfaces().len(), 24);
        for (i, s) in session.surfaces().iter().enumerate() {
            assert_eq!(s.ring, i / 8);
            assert_eq!(s.function, SurfaceFn::ALL[i % 8]);
            assert!((0.2..0.4).contains(&s.scale));
        }
        let heights: Vec<f32> =
            session.rings().iter().map(RingLift::height).collect();
        assert_eq!(heights, [2.0, 1.0, 0.0]);
    }

    #[test]
    fn ring_radii_follow_ring_index() {
        assert_eq!(ring_radii(0), (1.0, 5.0));
        assert_eq!(ring_radii(2), (9.0, 13.0));
        assert_eq!(surface_radius(1), 6.0);
    }

    #[test]
    fn holding_a_ring_key_lifts_only_that_ring() {
        let mut session = session();
        session.handle_input(&InputEvent::key("Digit1", true));
        for _ in 0..10 {
            session.tick(1.0 / 60.0);
        }
        assert!((session.rings()[0].height() - 3.0).abs() < 1e-4);
        assert_eq!(session.rings()[1].height(), 1.0);
    }

    #[test]
    fn toggles_are_edge_triggered() {
        let mut session = session();
        assert!(session.directional_light());
        tap(&mut session, "KeyD");
        assert!(!session.directional_light());

        tap(&mut session, "KeyS");
        assert!(!session.spot_lights());
        tap(&mut session, "KeyP");
        assert!(session.spot_lights());

        tap(&mut session, "KeyE");
        assert_eq!(session.shading(), ShadingMode::Toon);
        assert_eq!(
            session.status().to_string(),
            "shading toon | directional off | spots on"
        );
    }

    #[test]
    fn column_carries_rings_and_lights() {
        let mut session = session();
        let before = session.mobius_light_positions();
        session.tick(1.0);
        assert!((session.column_angle() - 0.1).abs() < 1e-6);
        let after = session.mobius_light_positions();
        assert_eq!(after.len(), MOBIUS_LIGHT_COUNT);
        for (a, b) in before.iter().zip(&after) {
            assert!((a.y - MOBIUS_HEIGHT).abs() < 1e-5);
            assert!((a.length() - b.length()).abs() < 1e-4);
            assert!(a.distance(*b) > 0.1);
        }
        assert_eq!(session.spot_light_positions().len(), 24);
        assert_eq!(session.surface_transforms().len(), 24);
    }
}
