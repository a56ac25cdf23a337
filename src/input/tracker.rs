//! Edge- and level-triggered keyboard state.
//!
//! The tracker keeps two values per key code: the current "down" state and
//! the value it held before the last write. A key is *held* while its
//! current value is `true`; it is *just pressed* on the first poll after a
//! false/unknown → true transition. Polling a just-pressed key consumes
//! the edge, so a key held across frames is reported once.
//!
//! Raw events may arrive at any time; [`KeyTracker::queue`] buffers them
//! and [`KeyTracker::sample`] applies them at the start of a frame.

use rustc_hash::FxHashMap;

use super::event::InputEvent;

/// Keyboard state tracker with a disable gate.
#[derive(Debug, Default)]
pub struct KeyTracker {
    current: FxHashMap<String, bool>,
    previous: FxHashMap<String, bool>,
    pending: Vec<(String, bool)>,
    disabled: bool,
}

impl KeyTracker {
    /// Empty, enabled tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer a raw event until the next [`sample`](Self::sample).
    /// Non-key events are ignored.
    pub fn queue(&mut self, event: &InputEvent) {
        if let InputEvent::Key { code, pressed } = event {
            self.pending.push((code.clone(), *pressed));
        }
    }

    /// Apply every buffered event in arrival order.
    pub fn sample(&mut self) {
        for (code, pressed) in std::mem::take(&mut self.pending) {
            if pressed {
                self.record_down(&code);
            } else {
                self.record_up(&code);
            }
        }
    }

    /// Record a key-down for `code`.
    pub fn record_down(&mut self, code: &str) {
        self.record(code, true);
    }

    /// Record a key-up for `code`.
    pub fn record_up(&mut self, code: &str) {
        self.record(code, false);
    }

    fn record(&mut self, code: &str, down: bool) {
        let before = self.current.insert(code.to_owned(), down);
        match before {
            Some(was) => {
                let _ = self.previous.insert(code.to_owned(), was);
            }
            None => {
                let _ = self.previous.remove(code);
            }
        }
    }

    /// Whether `code` is currently down. Always `false` while disabled.
    #[must_use]
    pub fn is_held(&self, code: &str) -> bool {
        !self.disabled && self.current.get(code) == Some(&true)
    }

    /// Whether `code` went down since it was last reported.
    ///
    /// Returns `true` once per press and marks the key as seen; while
    /// disabled it returns `false` without touching any state.
    pub fn is_just_pressed(&mut self, code: &str) -> bool {
        if self.disabled {
            return false;
        }
        let down = self.current.get(code) == Some(&true);
        let was_down = self.previous.get(code) == Some(&true);
        let pressed = down && !was_down;
        if pressed {
            self.record_down(code);
        }
        pressed
    }

    /// Gate all queries off and forget every stored key state, so nothing
    /// held before the gate closes fires after it reopens.
    pub fn disable(&mut self) {
        self.disabled = true;
        self.current.clear();
        self.previous.clear();
    }

    /// Reopen the gate. Previously cleared state is not restored.
    pub fn enable(&mut self) {
        self.disabled = false;
    }

    /// Whether queries are currently gated off.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Codes currently held, sorted. Empty while disabled.
    #[must_use]
    pub fn held_keys(&self) -> Vec<&str> {
        if self.disabled {
            return Vec::new();
        }
        let mut keys: Vec<&str> = self
            .current
            .iter()
            .filter(|(_, down)| **down)
            .map(|(code, _)| code.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }
}
