//! Time source for the monitor loop.
//!
//! The loop reads monotonic time for cadence, wall time for report
//! headers, and sleeps between ticks, all through [`Clock`]. Tests drive it
//! with [`ManualClock`], whose `sleep` just advances time.

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Time source used by `EscMonitor`.
pub trait Clock {
    /// Monotonic time since an arbitrary fixed origin.
    fn monotonic(&self) -> Duration;

    /// Current local wall-clock time.
    fn wall(&self) -> DateTime<Local>;

    /// Wait for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Real time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock whose monotonic origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn monotonic(&self) -> Duration {
        self.origin.elapsed()
    }

    fn wall(&self) -> DateTime<Local> {
        Local::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Simulated time that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    start: DateTime<Local>,
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    /// Clock at monotonic zero, showing `start` as wall time.
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            start,
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        *self.elapsed.lock() += by;
    }
}

impl Clock for ManualClock {
    fn monotonic(&self) -> Duration {
        *self.elapsed.lock()
    }

    fn wall(&self) -> DateTime<Local> {
        let elapsed = self.monotonic();
        chrono::Duration::from_std(elapsed)
            .ok()
            .and_then(|delta| self.start.checked_add_signed(delta))
            .unwrap_or(self.start)
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}
