//! Fixed-rate tick clock with explicit start and stop.
//!
//! The host feeds elapsed wall-clock time in and gets back how many
//! simulation ticks are due. A stopped clock never yields ticks and drops
//! any partial frame, so nothing runs between a game over and the next start.
//! The first sample after a start is discarded: it measures time spent idle.

use std::time::Duration;

/// Upper bound on ticks returned by one [`TickLoop::advance`], so a stalled
/// terminal does not replay seconds of simulation at once.
pub const MAX_CATCH_UP_TICKS: u32 = 5;

#[derive(Debug, Clone)]
pub struct TickLoop {
    interval: Duration,
    /// Sub-tick time accumulator.
    accumulated: Duration,
    running: bool,
    /// Set by `start` until the first `advance` arrives.
    fresh: bool,
    /// Total ticks yielded since the last start.
    pub tick_count: u64,
}

impl TickLoop {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
            running: false,
            fresh: false,
            tick_count: 0,
        }
    }

    pub fn from_millis(interval_ms: u64) -> Self {
        Self::new(Duration::from_millis(interval_ms.max(1)))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
        self.fresh = true;
        self.accumulated = Duration::ZERO;
        self.tick_count = 0;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.fresh = false;
        self.accumulated = Duration::ZERO;
    }

    /// Add `elapsed` and return the number of whole ticks now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        if self.fresh {
            self.fresh = false;
            return 0;
        }

        self.accumulated += elapsed;
        let mut due = 0;
        while self.accumulated >= self.interval && due < MAX_CATCH_UP_TICKS {
            self.accumulated -= self.interval;
            due += 1;
        }
        // Capped: forget the backlog, keep a legitimate partial frame
        if self.accumulated >= self.interval {
            self.accumulated = Duration::ZERO;
        }
        self.tick_count += due as u64;
        due
    }

    /// Time until the next tick is due, used as the input poll timeout.
    pub fn until_next(&self) -> Duration {
        self.interval.saturating_sub(self.accumulated)
    }
}
