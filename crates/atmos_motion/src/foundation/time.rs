//! Time management utilities
//!
//! The host engine owns the real clock. Everything here is fed the elapsed
//! time explicitly, so a scripted or replayed run advances exactly like a
//! live one.

/// Frame timing accumulated from externally supplied deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl FrameClock {
    /// Create a new clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one frame
    pub fn advance(&mut self, delta_time: f32) {
        let delta_time = if delta_time.is_finite() { delta_time.max(0.0) } else { 0.0 };
        self.delta_time = delta_time;
        self.total_time += delta_time;
        self.frame_count += 1;
    }

    /// Get the time of the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since the clock started
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

/// Converts variable frame time into a whole number of constant physics steps
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    max_steps: u32,
    accumulator: f32,
    dropped_time: f32,
}

/// Step length used when a caller passes a non-positive or non-finite step
pub const DEFAULT_FIXED_STEP: f32 = 0.02;

impl FixedTimestep {
    /// Create an accumulator with the given step length and per-frame step cap
    pub fn new(step: f32, max_steps: u32) -> Self {
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            log::warn!(
                "Invalid fixed step {}, falling back to {}s",
                step,
                DEFAULT_FIXED_STEP
            );
            DEFAULT_FIXED_STEP
        };

        Self {
            step,
            max_steps: max_steps.max(1),
            accumulator: 0.0,
            dropped_time: 0.0,
        }
    }

    /// Length of one fixed step in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Feed one frame of elapsed time and return how many fixed steps to run.
    ///
    /// Time beyond `max_steps` worth of steps is discarded so a long stall
    /// cannot snowball into ever longer catch-up frames.
    pub fn accumulate(&mut self, delta_time: f32) -> u32 {
        if delta_time.is_finite() && delta_time > 0.0 {
            self.accumulator += delta_time;
        }

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }

        if self.accumulator >= self.step {
            let surplus = self.accumulator - self.accumulator % self.step;
            self.dropped_time += surplus;
            self.accumulator -= surplus;
            log::warn!(
                "Fixed timestep fell behind, dropping {:.3}s after {} steps",
                surplus,
                steps
            );
        }

        steps
    }

    /// Fraction of a step left over in the accumulator, in `[0, 1)`
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    /// Total simulated time thrown away by the step cap
    pub fn dropped_time(&self) -> f32 {
        self.dropped_time
    }

    /// Clear the accumulator
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(DEFAULT_FIXED_STEP, 8)
    }
}
