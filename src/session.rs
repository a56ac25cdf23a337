//! The crane demo's per-frame state and tick.
//!
//! [`CraneSession`] owns everything the demo mutates: key tracker, crane
//! rig, cargo, collision flag, recovery sequencer, cameras and the
//! wireframe toggle. The viewer feeds it input events and calls
//! [`CraneSession::tick`] once per redraw.

use std::fmt;

use glam::Vec3;

use crate::camera::CameraRig;
use crate::collision::{scatter_cargo, CargoMarker, CollisionMonitor};
use crate::crane::{ControlAxes, CraneRig};
use crate::error::{ConfigError, DerrickError};
use crate::input::{CraneAction, InputEvent, KeyTracker};
use crate::options::{KeybindingOptions, Options};
use crate::recovery::{RecoveryStep, RecoverySequencer};
use crate::util::rng::scene_rng;

/// What the heads-up display shows for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudSnapshot {
    /// Labels of the held crane-control keys, in display order.
    pub held: Vec<String>,
    /// One-based number of the active camera.
    pub camera: usize,
    /// Whether crane parts draw as wireframe.
    pub wireframe: bool,
    /// Whether a collision is being handled.
    pub colliding: bool,
    /// Active recovery step.
    pub step: RecoveryStep,
}

impl fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "camera {} | wireframe {}",
            self.camera,
            if self.wireframe { "on" } else { "off" }
        )?;
        if !self.held.is_empty() {
            write!(f, " | keys {}", self.held.join(" "))?;
        }
        if self.colliding {
            write!(f, " | collision: {}", self.step)?;
        }
        Ok(())
    }
}

/// State of a running crane demo.
#[derive(Debug)]
pub struct CraneSession {
    options: Options,
    tracker: KeyTracker,
    rig: CraneRig,
    cargo: Vec<CargoMarker>,
    monitor: CollisionMonitor,
    sequencer: RecoverySequencer,
    cameras: CameraRig,
    wireframe: bool,
}

impl CraneSession {
    /// Validate `options` and build a session with freshly scattered
    /// cargo.
    ///
    /// # Errors
    ///
    /// [`DerrickError::Config`] when the options are rejected or the cargo
    /// cannot be placed.
    pub fn new(options: &Options) -> Result<Self, DerrickError> {
        options.validate()?;
        let keep_clear = CraneRig::home_claw_ground_position(&options.crane);
        let reach =
            options.collision.claw_radius + options.collision.cargo_radius;
        let cargo = scatter_cargo(
            &options.cargo,
            keep_clear,
            reach,
            &mut scene_rng(options.cargo.seed),
        )?;
        Self::with_cargo(options, cargo)
    }

    /// Validate `options` and build a session around a given cargo set.
    ///
    /// # Errors
    ///
    /// [`DerrickError::Config`] when the options are rejected or `cargo`
    /// is empty.
    pub fn with_cargo(
        options: &Options,
        cargo: Vec<CargoMarker>,
    ) -> Result<Self, DerrickError> {
        options.validate()?;
        if cargo.is_empty() {
            return Err(ConfigError::EmptyCargo.into());
        }

        log::info!("crane session started with {} cargo markers", cargo.len());
        Ok(Self {
            tracker: KeyTracker::new(),
            rig: CraneRig::new(&options.crane),
            cargo,
            monitor: CollisionMonitor::new(),
            sequencer: RecoverySequencer::new(options.crane.recovery_rates),
            cameras: CameraRig::new(&options.camera, 1.0),
            wireframe: true,
            options: options.clone(),
        })
    }

    /// Buffer a key event for the next tick, or apply a wheel zoom.
    pub fn handle_input(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Key { .. } => self.tracker.queue(event),
            InputEvent::Scroll { delta } => self.cameras.zoom(*delta),
        }
    }

    /// Advance the demo by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.tracker.sample();

        if self.sequencer.is_active() {
            let _ = self.sequencer.advance(
                dt,
                &mut self.rig,
                &mut self.monitor,
                &mut self.tracker,
            );
        } else {
            let axes = self.control_axes();
            self.rig.apply_controls(axes, dt);
        }
        self.update_view();

        let collision = &self.options.collision;
        if self.monitor.check(
            self.rig.claw_position(),
            &self.cargo,
            collision.claw_radius,
            collision.cargo_radius,
        ) {
            self.tracker.disable();
            self.sequencer.start();
        }
    }

    fn held(&self, action: CraneAction) -> bool {
        self.options
            .keybindings
            .crane_key(action)
            .is_some_and(|key| self.tracker.is_held(key))
    }

    fn control_axes(&self) -> ControlAxes {
        let axis = |pos, neg| {
            ControlAxes::axis(self.held(pos), self.held(neg))
        };
        ControlAxes {
            hoist: axis(CraneAction::LowerHoist, CraneAction::RaiseHoist),
            yaw: axis(
                CraneAction::RotateCabinLeft,
                CraneAction::RotateCabinRight,
            ),
            trolley: axis(CraneAction::TrolleyOut, CraneAction::TrolleyIn),
            claw: axis(CraneAction::CloseClaw, CraneAction::OpenClaw),
        }
    }

    fn update_view(&mut self) {
        let bindings = &self.options.keybindings;
        for (index, action) in CraneAction::CAMERAS.into_iter().enumerate() {
            if just_pressed(bindings, &mut self.tracker, action) {
                self.cameras.select(index);
            }
        }

        let step = self.options.camera.nudge_step;
        let nudges = [
            (CraneAction::NudgeCameraDown, Vec3::NEG_Y),
            (CraneAction::NudgeCameraUp, Vec3::Y),
            (CraneAction::NudgeCameraPosX, Vec3::X),
            (CraneAction::NudgeCameraNegX, Vec3::NEG_X),
        ];
        for (action, direction) in nudges {
            if self.held(action) {
                self.cameras.nudge(direction * step);
            }
        }

        if just_pressed(
            &self.options.keybindings,
            &mut self.tracker,
            CraneAction::ToggleWireframe,
        ) {
            self.wireframe = !self.wireframe;
            log::debug!("wireframe {}", self.wireframe);
        }
    }

    /// Update camera aspect ratios after a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.cameras.resize(width, height);
    }

    /// HUD contents for the current frame.
    #[must_use]
    pub fn hud(&self) -> HudSnapshot {
        let bindings = &self.options.keybindings;
        let held = CraneAction::HUD
            .into_iter()
            .filter(|action| self.held(*action))
            .filter_map(|action| bindings.crane_label(action))
            .map(str::to_owned)
            .collect();
        HudSnapshot {
            held,
            camera: self.cameras.current_index() + 1,
            wireframe: self.wireframe,
            colliding: self.monitor.is_colliding(),
            step: self.sequencer.step(),
        }
    }

    /// The crane's joints.
    #[must_use]
    pub fn rig(&self) -> &CraneRig {
        &self.rig
    }

    /// Cargo markers.
    #[must_use]
    pub fn cargo(&self) -> &[CargoMarker] {
        &self.cargo
    }

    /// Preset cameras.
    #[must_use]
    pub fn cameras(&self) -> &CameraRig {
        &self.cameras
    }

    /// Collision flag owner.
    #[must_use]
    pub fn monitor(&self) -> &CollisionMonitor {
        &self.monitor
    }

    /// Recovery state machine.
    #[must_use]
    pub fn sequencer(&self) -> &RecoverySequencer {
        &self.sequencer
    }

    /// Whether crane parts draw as wireframe.
    #[must_use]
    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    /// Key tracker (read-only).
    #[must_use]
    pub fn tracker(&self) -> &KeyTracker {
        &self.tracker
    }
}

fn just_pressed(
    bindings: &KeybindingOptions,
    tracker: &mut KeyTracker,
    action: CraneAction,
) -> bool {
    bindings
        .crane_key(action)
        .is_some_and(|key| tracker.is_just_pressed(key))
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::options::CargoOptions;

    const DT: f32 = 1.0 / 60.0;

    fn far_cargo() -> Vec<CargoMarker> {
        vec![CargoMarker::new(Vec2::new(-9.0, -9.0), 0.866)]
    }

    fn session() -> CraneSession {
        CraneSession::with_cargo(&Options::default(), far_cargo()).unwrap()
    }

    fn press(session: &mut CraneSession, code: &str) {
        session.handle_input(&InputEvent::key(code, true));
    }

    fn release(session: &mut CraneSession, code: &str) {
        session.handle_input(&InputEvent::key(code, false));
    }

    #[test]
    fn seeded_sessions_share_a_layout() {
        let mut options = Options::default();
        options.cargo.seed = Some(11);
        let a = CraneSession::new(&options).unwrap();
        let b = CraneSession::new(&options).unwrap();
        assert_eq!(a.cargo().len(), 20);
        assert_eq!(a.cargo(), b.cargo());
    }

    #[test]
    fn invalid_options_are_rejected_up_front() {
        let mut options = Options::default();
        options.cargo = CargoOptions {
            count: 0,
            ..CargoOptions::default()
        };
        assert!(matches!(
            CraneSession::new(&options),
            Err(DerrickError::Config(_))
        ));
        assert!(CraneSession::with_cargo(&Options::default(), vec![]).is_err());
    }

    #[test]
    fn held_key_drives_joint_until_released() {
        let mut session = session();
        press(&mut session, "KeyE");
        session.tick(0.1);
        let lowered = session.rig().cable().value();
        assert!(lowered > 5.0);

        release(&mut session, "KeyE");
        session.tick(0.1);
        assert_eq!(session.rig().cable().value(), lowered);
    }

    #[test]
    fn camera_keys_fire_once_per_press() {
        let mut session = session();
        assert_eq!(session.hud().camera, 5);
        press(&mut session, "Digit1");
        session.tick(DT);
        assert_eq!(session.hud().camera, 1);

        assert!(session.wireframe());
        press(&mut session, "Digit7");
        session.tick(DT);
        session.tick(DT);
        assert!(!session.wireframe());
    }

    #[test]
    fn arrows_nudge_and_wheel_zooms() {
        let mut session = session();
        press(&mut session, "ArrowUp");
        session.tick(DT);
        session.tick(DT);
        assert_eq!(session.cameras().current().eye, Vec3::new(50.0, 48.0, 50.0));

        session.handle_input(&InputEvent::Scroll { delta: -3.0 });
        assert!((session.cameras().current().zoom - 1.1).abs() < 1e-6);
    }

    #[test]
    fn hud_lists_held_controls_in_display_order() {
        let mut session = session();
        press(&mut session, "KeyE");
        press(&mut session, "KeyQ");
        press(&mut session, "Digit2");
        session.tick(DT);
        let hud = session.hud();
        assert_eq!(hud.held, ["Q", "E"]);
        assert_eq!(hud.camera, 2);
        assert!(!hud.colliding);
        assert_eq!(hud.to_string(), "camera 2 | wireframe on | keys Q E");
    }

    #[test]
    fn collision_locks_input_until_parked() {
        // Cargo right under the claw's starting position.
        let cargo = vec![CargoMarker::new(Vec2::new(18.0, 0.0), 0.866)];
        let mut session =
            CraneSession::with_cargo(&Options::default(), cargo).unwrap();

        session.tick(DT);
        assert!(session.monitor().is_colliding());
        assert!(session.sequencer().is_active());
        assert!(session.tracker().is_disabled());

        // Manual input is ignored while recovering.
        press(&mut session, "KeyS");
        let mut ticks = 0;
        while session.sequencer().is_active() {
            session.tick(DT);
            ticks += 1;
            assert!(ticks < 10_000, "recovery did not finish");
        }

        assert!(!session.monitor().is_colliding());
        assert!(!session.tracker().is_disabled());
        assert!(session.rig().is_home());
        assert_eq!(session.monitor().collision_count(), 1);

        // Input works again after recovery.
        press(&mut session, "KeyS");
        session.tick(DT);
        assert!(session.rig().trolley().value() > 2.5);
    }
}
