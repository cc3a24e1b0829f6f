//! Frame timing

use std::time::{Duration, Instant};

use crate::consts::MAX_FRAME_DT;

/// Convert a frame duration to seconds, capped at `MAX_FRAME_DT`
pub fn frame_dt(elapsed: Duration) -> f32 {
    elapsed.as_secs_f32().min(MAX_FRAME_DT)
}

/// Wall-clock frame timer with optional pacing and an FPS readout
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
    budget: Option<Duration>,
    // FPS tracking
    frame_times: [Option<Instant>; 60],
    frame_index: usize,
    fps: u32,
}

impl FrameClock {
    /// `target_fps` of 0 disables pacing
    pub fn new(target_fps: u32) -> Self {
        let budget = (target_fps > 0).then(|| Duration::from_secs_f64(1.0 / target_fps as f64));
        Self {
            last: Instant::now(),
            budget,
            frame_times: [None; 60],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Seconds since the previous tick (capped)
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = frame_dt(now.duration_since(self.last));
        self.last = now;

        // FPS over the last 60 frames
        let oldest = self.frame_times[self.frame_index];
        self.frame_times[self.frame_index] = Some(now);
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();
        if let Some(oldest) = oldest {
            let elapsed = now.duration_since(oldest).as_secs_f64();
            if elapsed > 0.0 {
                self.fps = (self.frame_times.len() as f64 / elapsed).round() as u32;
            }
        }

        dt
    }

    /// Sleep off whatever is left of this frame's budget
    pub fn pace(&self) {
        if let Some(budget) = self.budget {
            let spent = self.last.elapsed();
            if spent < budget {
                std::thread::sleep(budget - spent);
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_dt_is_capped() {
        assert!((frame_dt(Duration::from_millis(16)) - 0.016).abs() < 0.0001);
        assert_eq!(frame_dt(Duration::from_secs(3)), MAX_FRAME_DT);
    }

    #[test]
    fn test_tick_never_exceeds_cap() {
        let mut clock = FrameClock::new(0);
        std::thread::sleep(Duration::from_millis(2));
        let dt = clock.tick();
        assert!(dt > 0.0 && dt <= MAX_FRAME_DT);
    }

    #[test]
    fn test_pace_waits_for_budget() {
        let mut clock = FrameClock::new(100);
        clock.tick();
        let start = Instant::now();
        clock.pace();
        clock.tick();
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_fps_needs_a_full_window() {
        let mut clock = FrameClock::new(200);
        for _ in 0..60 {
            clock.tick();
            clock.pace();
        }
        assert_eq!(clock.fps(), 0);

        clock.tick();
        // Paced at 5 ms per frame, so never above the target
        assert!(clock.fps() > 0 && clock.fps() <= 200);
    }
}
