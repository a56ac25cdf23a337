//! Ring lift with bounce between two heights.

/// Vertical state of one carousel ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingLift {
    height: f32,
    rising: bool,
}

impl RingLift {
    /// Ring at `height`, initially moving up.
    #[must_use]
    pub fn new(height: f32) -> Self {
        Self {
            height,
            rising: true,
        }
    }

    /// Current height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Whether the next move goes up.
    #[must_use]
    pub fn is_rising(&self) -> bool {
        self.rising
    }

    /// Move `step` in the current direction. Reaching or passing a bound
    /// snaps to it and reverses direction.
    pub fn update(&mut self, step: f32, min: f32, max: f32) {
        let signed = if self.rising { step } else { -step };
        self.height += signed;
        if self.height >= max {
            self.height = max;
            self.rising = false;
        } else if self.height <= min {
            self.height = min;
            self.rising = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounces_between_bounds() {
        let mut ring = RingLift::new(4.5);
        ring.update(1.0, 1.0, 5.0);
        assert_eq!(ring.height(), 5.0);
        assert!(!ring.is_rising());

        ring.update(3.0, 1.0, 5.0);
        assert_eq!(ring.height(), 2.0);
        ring.update(3.0, 1.0, 5.0);
        assert_eq!(ring.height(), 1.0);
        assert!(ring.is_rising());
    }

    #[test]
    fn ring_below_range_snaps_up() {
        let mut ring = RingLift::new(0.0);
        ring.update(0.1, 1.0, 5.0);
        assert_eq!(ring.height(), 1.0);
        assert!(ring.is_rising());
    }
}
