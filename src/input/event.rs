/// Platform-agnostic input events.
///
/// The viewer converts window events into these and queues them on the
/// session; they are applied at the next input-sampling step of the frame.
///
/// # Example
///
/// ```
/// use derrick::input::InputEvent;
///
/// let event = InputEvent::key("KeyE", true);
/// assert_eq!(
///     event,
///     InputEvent::Key { code: "KeyE".into(), pressed: true }
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A physical key changed state.
    Key {
        /// Stable key code in the `winit::keyboard::KeyCode` debug format
        /// (`"KeyQ"`, `"Digit1"`, `"ArrowUp"`).
        code: String,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel movement (positive = toward the user).
    Scroll {
        /// Raw wheel delta; consumers clamp it.
        delta: f32,
    },
}

impl InputEvent {
    /// Shorthand for a [`InputEvent::Key`] event.
    #[must_use]
    pub fn key(code: impl Into<String>, pressed: bool) -> Self {
        Self::Key {
            code: code.into(),
            pressed,
        }
    }
}

#[cfg(feature = "viewer")]
impl InputEvent {
    /// Convert a winit keyboard event. Returns `None` for keys without a
    /// physical code and for OS auto-repeat presses.
    #[must_use]
    pub fn from_winit_key(event: &winit::event::KeyEvent) -> Option<Self> {
        use winit::keyboard::PhysicalKey;

        if event.repeat {
            return None;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };
        Some(Self::key(
            format!("{code:?}"),
            event.state == winit::event::ElementState::Pressed,
        ))
    }
}
