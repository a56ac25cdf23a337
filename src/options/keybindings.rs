use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::{CarouselAction, CraneAction};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping each demo's actions to key codes.
pub struct KeybindingOptions {
    /// Crane action → key string (e.g. `LowerHoist` → `"KeyE"`).
    pub crane: HashMap<CraneAction, String>,
    /// Carousel action → key string (e.g. `LiftRing1` → `"Digit1"`).
    pub carousel: HashMap<CarouselAction, String>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let crane = HashMap::from([
            (CraneAction::LowerHoist, "KeyE".into()),
            (CraneAction::RaiseHoist, "KeyD".into()),
            (CraneAction::RotateCabinLeft, "KeyA".into()),
            (CraneAction::RotateCabinRight, "KeyQ".into()),
            (CraneAction::TrolleyOut, "KeyS".into()),
            (CraneAction::TrolleyIn, "KeyW".into()),
            (CraneAction::CloseClaw, "KeyF".into()),
            (CraneAction::OpenClaw, "KeyR".into()),
            (CraneAction::Camera1, "Digit1".into()),
            (CraneAction::Camera2, "Digit2".into()),
            (CraneAction::Camera3, "Digit3".into()),
            (CraneAction::Camera4, "Digit4".into()),
            (CraneAction::Camera5, "Digit5".into()),
            (CraneAction::NudgeCameraDown, "ArrowUp".into()),
            (CraneAction::NudgeCameraUp, "ArrowDown".into()),
            (CraneAction::NudgeCameraPosX, "ArrowLeft".into()),
            (CraneAction::NudgeCameraNegX, "ArrowRight".into()),
            (CraneAction::ToggleWireframe, "Digit7".into()),
        ]);
        let carousel = HashMap::from([
            (CarouselAction::LiftRing1, "Digit1".into()),
            (CarouselAction::LiftRing2, "Digit2".into()),
            (CarouselAction::LiftRing3, "Digit3".into()),
            (CarouselAction::ToggleDirectionalLight, "KeyD".into()),
            (CarouselAction::SpotLightsOn, "KeyP".into()),
            (CarouselAction::SpotLightsOff, "KeyS".into()),
            (CarouselAction::ShadeLambert, "KeyQ".into()),
            (CarouselAction::ShadePhong, "KeyW".into()),
            (CarouselAction::ShadeToon, "KeyE".into()),
            (CarouselAction::ShadeNormal, "KeyR".into()),
            (CarouselAction::ShadeBasic, "KeyT".into()),
        ]);
        Self { crane, carousel }
    }
}

impl KeybindingOptions {
    /// Key code bound to a crane action.
    #[must_use]
    pub fn crane_key(&self, action: CraneAction) -> Option<&str> {
        self.crane.get(&action).map(String::as_str)
    }

    /// Key code bound to a carousel action.
    #[must_use]
    pub fn carousel_key(&self, action: CarouselAction) -> Option<&str> {
        self.carousel.get(&action).map(String::as_str)
    }

    /// HUD label for a crane action: the bound key without its `Key`
    /// prefix (`"KeyQ"` → `"Q"`).
    #[must_use]
    pub fn crane_label(&self, action: CraneAction) -> Option<&str> {
        self.crane_key(action)
            .map(|key| key.strip_prefix("Key").unwrap_or(key))
    }
}
