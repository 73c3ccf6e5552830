use std::time::Duration;

/// Counts ticks within an episode and decides when it ends.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeClock {
    frames_taken: u64,
    fps: f64,
    duration_s: f64,
}

impl EpisodeClock {
    pub fn new(fps: f64, duration_s: f64) -> Self {
        Self {
            frames_taken: 0,
            fps,
            duration_s,
        }
    }

    pub fn frames_taken(&self) -> u64 {
        self.frames_taken
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }

    pub fn elapsed_s(&self) -> f64 {
        self.frames_taken as f64 / self.fps
    }

    /// Simulated time covered by one tick.
    pub fn delta_t(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps)
    }

    pub fn tick(&mut self) {
        self.frames_taken += 1;
    }

    pub fn reset(&mut self) {
        self.frames_taken = 0;
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_s() >= self.duration_s
    }
}
