//! Clamped scalar degrees of freedom.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::util::math::{float_equal, is_clamped, EPSILON};

/// Closed `[min, max]` interval a joint value is confined to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointRange {
    /// Lower bound (inclusive).
    pub min: f32,
    /// Upper bound (inclusive).
    pub max: f32,
}

impl JointRange {
    /// Range from explicit bounds.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp `value` into the range.
    #[must_use]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Whether `value` is within tolerance of either bound.
    #[must_use]
    pub fn is_at_limit(&self, value: f32) -> bool {
        is_clamped(value, self.min, self.max)
    }

    /// Reject inverted or non-finite bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRange`] naming `joint`.
    pub fn validate(&self, joint: &'static str) -> Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min < self.max
        {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange {
                joint,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// A scalar joint whose value never leaves its range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    range: JointRange,
    value: f32,
}

impl Joint {
    /// Joint at `initial`, clamped into `range`.
    #[must_use]
    pub fn new(range: JointRange, initial: f32) -> Self {
        Self {
            range,
            value: range.clamp(initial),
        }
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Valid range.
    #[must_use]
    pub fn range(&self) -> JointRange {
        self.range
    }

    /// Move by `delta`, clamping to the range. Returns whether the new
    /// value sits at either bound.
    pub fn update(&mut self, delta: f32) -> bool {
        self.value = self.range.clamp(self.value + delta);
        self.is_at_limit()
    }

    /// Whether the value sits within tolerance of either bound.
    #[must_use]
    pub fn is_at_limit(&self) -> bool {
        self.range.is_at_limit(self.value)
    }

    /// Whether the value is within tolerance of `target`.
    #[must_use]
    pub fn is_at(&self, target: f32) -> bool {
        float_equal(self.value, target, EPSILON)
    }

    /// Move at most `step` toward `target` without passing it, then report
    /// whether the target has been reached.
    pub fn drive_toward(&mut self, target: f32, step: f32) -> bool {
        let target = self.range.clamp(target);
        let step = step.abs();
        let next = if self.value < target {
            (self.value + step).min(target)
        } else {
            (self.value - step).max(target)
        };
        self.value = self.range.clamp(next);
        self.is_at(target)
    }
}
