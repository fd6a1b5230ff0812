//! Fixed-timestep accumulator
//!
//! Variable frame times are banked and spent in whole `dt` steps. The
//! accumulator is kept in integer nanoseconds so tick counts are exact.

use std::time::Duration;

use crate::consts::{MAX_FRAME_TIME, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedClock {
    dt: Duration,
    max_frame: Duration,
    accumulator: Duration,
    /// Total simulated time
    time: Duration,
    ticks: u64,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(Duration::from_secs_f64(SIM_DT), Duration::from_secs_f64(MAX_FRAME_TIME))
    }
}

impl FixedClock {
    pub fn new(dt: Duration, max_frame: Duration) -> Self {
        assert!(!dt.is_zero(), "Fixed timestep must be positive");
        Self {
            dt,
            max_frame,
            accumulator: Duration::ZERO,
            time: Duration::ZERO,
            ticks: 0,
        }
    }

    /// Bank a frame's elapsed time (clamped) and run one `step` per whole
    /// `dt` available. Returns the number of steps taken.
    pub fn advance<F>(&mut self, frame_time: Duration, mut step: F) -> u32
    where
        F: FnMut(Duration),
    {
        self.accumulator += frame_time.min(self.max_frame);

        let mut steps = 0;
        while self.accumulator >= self.dt {
            step(self.dt);
            self.accumulator -= self.dt;
            self.time += self.dt;
            self.ticks += 1;
            steps += 1;
        }
        steps
    }

    /// Fraction of a step left over, in `[0, 1)`
    pub fn alpha(&self) -> f64 {
        self.accumulator.as_secs_f64() / self.dt.as_secs_f64()
    }

    pub fn dt(&self) -> Duration {
        self.dt
    }

    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    pub fn time(&self) -> Duration {
        self.time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
