//! Keyboard input: platform-agnostic events, the edge/level key tracker,
//! and the bindable actions of both demos.

/// Platform-agnostic input events.
pub mod event;
/// Edge-triggered / level-triggered key state with a disable gate.
pub mod tracker;

pub use event::InputEvent;
use serde::{Deserialize, Serialize};
pub use tracker::KeyTracker;

/// Crane demo actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML options stay readable:
/// ```toml
/// [keybindings.crane]
/// lower_hoist = "KeyE"
/// toggle_wireframe = "Digit7"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CraneAction {
    /// Pay out hoist cable (held).
    LowerHoist,
    /// Reel in hoist cable (held).
    RaiseHoist,
    /// Rotate the cabin in the positive yaw direction (held).
    RotateCabinLeft,
    /// Rotate the cabin in the negative yaw direction (held).
    RotateCabinRight,
    /// Move the trolley out along the jib (held).
    TrolleyOut,
    /// Move the trolley in toward the tower (held).
    TrolleyIn,
    /// Close the claw fingers (held).
    CloseClaw,
    /// Open the claw fingers (held).
    OpenClaw,
    /// Select camera 1 (pressed).
    Camera1,
    /// Select camera 2 (pressed).
    Camera2,
    /// Select camera 3 (pressed).
    Camera3,
    /// Select camera 4 (pressed).
    Camera4,
    /// Select camera 5 (pressed).
    Camera5,
    /// Move the current camera down (held).
    NudgeCameraDown,
    /// Move the current camera up (held).
    NudgeCameraUp,
    /// Move the current camera toward +x (held).
    NudgeCameraPosX,
    /// Move the current camera toward -x (held).
    NudgeCameraNegX,
    /// Toggle wireframe on every crane material (pressed).
    ToggleWireframe,
}

impl CraneAction {
    /// Camera selection actions in camera order.
    pub const CAMERAS: [Self; 5] = [
        Self::Camera1,
        Self::Camera2,
        Self::Camera3,
        Self::Camera4,
        Self::Camera5,
    ];

    /// Manual crane controls, in the order the HUD lists them.
    pub const HUD: [Self; 8] = [
        Self::RotateCabinRight,
        Self::RotateCabinLeft,
        Self::TrolleyIn,
        Self::TrolleyOut,
        Self::LowerHoist,
        Self::RaiseHoist,
        Self::OpenClaw,
        Self::CloseClaw,
    ];
}

/// Carousel demo actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarouselAction {
    /// Lift the inner ring (held).
    LiftRing1,
    /// Lift the middle ring (held).
    LiftRing2,
    /// Lift the outer ring (held).
    LiftRing3,
    /// Toggle the directional light (pressed).
    ToggleDirectionalLight,
    /// Switch every spot light on (pressed).
    SpotLightsOn,
    /// Switch every spot light off (pressed).
    SpotLightsOff,
    /// Lambert shading (pressed).
    ShadeLambert,
    /// Phong shading (pressed).
    ShadePhong,
    /// Cel shading (pressed).
    ShadeToon,
    /// Normal-vector shading (pressed).
    ShadeNormal,
    /// Unlit shading (pressed).
    ShadeBasic,
}

impl CarouselAction {
    /// Ring lift actions, innermost first.
    pub const RINGS: [Self; 3] =
        [Self::LiftRing1, Self::LiftRing2, Self::LiftRing3];
}
