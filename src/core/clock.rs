use std::time::{Duration, Instant};

/// Wall clock delta tracking for the interactive loop
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    /// Seconds since the previous tick; advances the clock
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta
    }

    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns elapsed time into whole animation steps of a fixed interval
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: f32,
    accumulated: f32,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.as_secs_f32().max(f32::EPSILON),
            accumulated: 0.0,
        }
    }

    /// Number of steps that elapsed during `delta` seconds
    pub fn advance(&mut self, delta: f32) -> u64 {
        self.accumulated += delta.max(0.0);
        let steps = (self.accumulated / self.interval).floor();
        self.accumulated -= steps * self.interval;
        steps as u64
    }
}
