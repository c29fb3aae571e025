use web_time::{Duration, Instant};

/// Frame timing with FPS calculation and optional frame limiting.
pub struct FrameTiming {
    /// Target FPS (0 = unlimited).
    target_fps: u32,
    /// Minimum frame duration derived from the target FPS.
    min_frame_duration: Duration,
    /// Timestamp of the previous frame.
    last_frame: Instant,
    /// Smoothed FPS using an exponential moving average.
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother).
    smoothing: f32,
}

impl FrameTiming {
    /// Create a frame timer with the given FPS target (0 = unlimited).
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Call at the start of each frame. Returns true if enough time has
    /// passed to render.
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Call after rendering to update timing.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Current smoothed FPS.
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Current smoothed frame time in milliseconds.
    pub fn frame_time_ms(&self) -> f32 {
        if self.smoothed_fps > 0.0 {
            1000.0 / self.smoothed_fps
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_always_renders() {
        let timing = FrameTiming::new(0);
        assert!(timing.should_render());
    }

    #[test]
    fn capped_timer_waits_for_frame_budget() {
        let timing = FrameTiming::new(1);
        // A 1 FPS cap means a freshly started frame is not due yet.
        assert!(!timing.should_render());
    }

    #[test]
    fn frame_time_is_fps_reciprocal() {
        let timing = FrameTiming::new(0);
        // Starts at the 60 FPS seed, so 1000/60 ms.
        assert!((timing.frame_time_ms() - 1000.0 / 60.0).abs() < 1e-3);
    }
}
