//! Frame timing with smoothed FPS calculation.

use std::time::Instant;

/// Tracks frame durations and exposes an exponentially smoothed FPS.
pub struct FrameTiming {
    /// Last frame timestamp.
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average.
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0).
    smoothing: f32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Create a new frame timer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    /* 5% new value, 95% old value for smooth
                                 * display */
        }
    }

    /// Call after rendering to update timing.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            // Exponential moving average for smooth display
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_starts_at_default_and_stays_finite() {
        let mut timing = FrameTiming::new();
        assert_eq!(timing.fps(), 60.0);

        for _ in 0..5 {
            std::thread::sleep(std::time::Duration::from_millis(2));
            timing.end_frame();
        }
        assert!(timing.fps().is_finite());
        assert!(timing.fps() > 0.0);
    }

    #[test]
    fn smoothing_moves_gradually_toward_instant_rate() {
        let mut timing = FrameTiming::new();
        // A single frame moves the smoothed value at most 5% toward the
        // instantaneous rate, so it stays near the 60 FPS starting point.
        std::thread::sleep(std::time::Duration::from_millis(10));
        timing.end_frame();
        assert!(timing.fps() > 55.0);
        assert!(timing.fps() < 70.0);
    }
}
