use web_time::Instant;

/// Frame delta measurement with a smoothed FPS readout.
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    /// Upper bound on a single reported delta, in seconds
    max_delta: f32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Create a new frame timer starting now.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
            max_delta: 0.25,
        }
    }

    /// Mark the end of a frame and return the elapsed seconds since the
    /// previous one.
    ///
    /// The delta is clamped so a stalled window (drag, minimise) does not
    /// fast-forward animations.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if elapsed > 0.0 {
            let instant_fps = 1.0 / elapsed;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        elapsed.min(self.max_delta)
    }

    /// Restart timing from now, discarding the time spent idle.
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
    }

    /// Get the current FPS (smoothed)
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_is_clamped_and_non_negative() {
        let mut timing = FrameTiming::new();
        let dt = timing.tick();
        assert!(dt >= 0.0);
        assert!(dt <= 0.25);
    }
}
