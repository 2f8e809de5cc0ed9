//! Fixed-interval tick timer
//!
//! The host reports elapsed wall time; the timer turns it into whole ticks.
//! Leftover time carries over to the next advance.

use std::time::Duration;

use crate::consts::MAX_CATCH_UP_TICKS;

/// Accumulating timer that fires once per full interval
#[derive(Debug, Clone)]
pub struct TickTimer {
    interval: Duration,
    accumulator: Duration,
    max_catch_up: u32,
    running: bool,
    fired: u64,
}

impl TickTimer {
    /// Start a timer with the given interval (zero is clamped to 1 ms)
    pub fn every(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            accumulator: Duration::ZERO,
            max_catch_up: MAX_CATCH_UP_TICKS,
            running: true,
            fired: 0,
        }
    }

    /// Limit how many ticks a single advance may fire
    pub fn with_max_catch_up(mut self, max: u32) -> Self {
        self.max_catch_up = max.max(1);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Total ticks fired since start
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Time until the next tick fires
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.accumulator)
    }

    /// Feed elapsed time, returning the number of ticks due
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulator = self.accumulator.saturating_add(elapsed);

        let mut ticks = 0;
        while self.accumulator >= self.interval && ticks < self.max_catch_up {
            self.accumulator -= self.interval;
            ticks += 1;
        }

        if self.accumulator >= self.interval {
            let dropped = self.accumulator.as_nanos() / self.interval.as_nanos();
            log::warn!("Tick timer fell behind, dropping {} ticks", dropped);
            self.accumulator = Duration::from_nanos(
                (self.accumulator.as_nanos() % self.interval.as_nanos()) as u64,
            );
        }

        self.fired += u64::from(ticks);
        ticks
    }

    /// Stop the timer; later advances fire nothing
    pub fn cancel(&mut self) {
        if self.running {
            log::debug!("Tick timer cancelled after {} ticks", self.fired);
        }
        self.running = false;
        self.accumulator = Duration::ZERO;
    }
}
