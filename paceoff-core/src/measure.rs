//! Monotonic Timing
//!
//! Thin wrapper over `std::time::Instant`, which is monotonic on every
//! supported platform. Kept as its own type so the timed section stays
//! minimal and the call sites read uniformly.

use std::time::{Duration, Instant};

/// Timer for measuring a single variant invocation.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Stop the timer and return elapsed nanoseconds.
    #[inline(always)]
    pub fn stop(&self) -> u64 {
        let elapsed = self.start.elapsed();
        elapsed.as_nanos() as u64
    }

    /// Elapsed time as a `Duration`.
    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
