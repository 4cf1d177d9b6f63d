//! Step clock: turns elapsed wall time into pattern ticks.
//!
//! Fractional steps accumulate between calls; every whole step crossed yields
//! one tick time, measured in seconds from the clock's start.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct StepClock {
    steps_per_second: f64,
    /// Fractional step accumulator (advanced by elapsed time)
    accumulator: f64,
    /// Steps emitted so far
    step: u64,
}

impl StepClock {
    pub fn new(bpm: f64, steps_per_beat: f64) -> Self {
        Self {
            steps_per_second: (bpm / 60.0) * steps_per_beat,
            accumulator: 0.0,
            step: 0,
        }
    }

    pub fn step_duration_secs(&self) -> f64 {
        if self.steps_per_second > 0.0 {
            1.0 / self.steps_per_second
        } else {
            0.0
        }
    }

    /// Start the accumulator one full step in, so the first call ticks at time 0.
    pub fn primed(mut self) -> Self {
        self.accumulator = 1.0;
        self
    }

    /// Advance by `elapsed` and return the time of each step boundary crossed.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<f64> {
        self.accumulator += elapsed.as_secs_f64() * self.steps_per_second;
        let step_duration = self.step_duration_secs();
        let mut times = Vec::new();
        while self.accumulator >= 1.0 {
            self.accumulator -= 1.0;
            times.push(self.step as f64 * step_duration);
            self.step += 1;
        }
        times
    }

    pub fn steps(&self) -> u64 {
        self.step
    }
}
