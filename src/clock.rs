//! Fixed-step pacing
//!
//! Converts wall-clock frame time into whole simulation ticks at
//! [`TICKS_PER_SECOND`], carrying the remainder between frames.

use crate::consts::{MAX_SUBSTEPS, TICKS_PER_SECOND};

#[derive(Debug, Clone)]
pub struct FixedStep {
    /// Milliseconds per tick
    step_ms: f64,
    accumulator: f64,
    max_substeps: u32,
    /// Simulation clock handed to the session
    now_ms: u64,
    ticks: u64,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(TICKS_PER_SECOND, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(ticks_per_second: u32, max_substeps: u32) -> Self {
        Self {
            step_ms: 1000.0 / ticks_per_second.max(1) as f64,
            accumulator: 0.0,
            max_substeps: max_substeps.max(1),
            now_ms: 0,
            ticks: 0,
        }
    }

    /// Feed elapsed frame time; returns how many ticks to run now
    pub fn accumulate(&mut self, elapsed_ms: f64) -> u32 {
        self.accumulator += elapsed_ms.max(0.0);
        let mut substeps = 0;
        while self.accumulator >= self.step_ms && substeps < self.max_substeps {
            self.accumulator -= self.step_ms;
            substeps += 1;
        }
        // Drop backlog beyond the cap instead of spiralling
        if substeps == self.max_substeps && self.accumulator >= self.step_ms {
            log::debug!("Dropping {:.1} ms of simulation backlog", self.accumulator);
            self.accumulator %= self.step_ms;
        }
        substeps
    }

    /// Mark one tick as run and return its timestamp
    pub fn next_tick(&mut self) -> u64 {
        self.ticks += 1;
        self.now_ms = (self.ticks as f64 * self.step_ms) as u64;
        self.now_ms
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
