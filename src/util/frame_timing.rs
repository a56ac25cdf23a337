use web_time::{Duration, Instant};

/// Longest step handed to the simulation after a stall (window drag,
/// debugger pause). Larger gaps are treated as this many seconds.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// Per-frame clock: hands out the elapsed time since the previous frame
/// and keeps a smoothed FPS estimate for the HUD.
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Start the clock now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Mark the start of a frame and return the seconds elapsed since the
    /// previous one, capped at [`MAX_FRAME_DELTA`].
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }

        elapsed.min(MAX_FRAME_DELTA).as_secs_f32()
    }

    /// Current FPS (smoothed).
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_is_capped_after_a_stall() {
        let mut timing = FrameTiming::new();
        timing.last_frame = Instant::now()
            .checked_sub(Duration::from_secs(5))
            .unwrap_or_else(Instant::now);
        let dt = timing.tick();
        assert!(dt <= MAX_FRAME_DELTA.as_secs_f32() + f32::EPSILON);
    }

    #[test]
    fn fps_starts_at_sixty() {
        assert_eq!(FrameTiming::new().fps(), 60.0);
    }
}
