//! Time sources for limiters.
//!
//! Limiters never read the wall clock directly. They take a [`Clock`] at
//! construction, which keeps every pacing decision deterministic under test:
//! swap in a [`ManualClock`] and drive time by hand.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

/// A monotonic time source, measured in seconds.
///
/// `now` must never decrease between calls on the same clock or any of
/// its clones.
pub trait Clock: Clone {
    /// Current time in seconds from an arbitrary fixed origin.
    fn now(&self) -> f64;
}

/// The default clock, backed by [`std::time::Instant`].
///
/// Seconds are measured from the moment the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    /// Create a clock whose origin is now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// A hand-advanced clock for deterministic tests.
///
/// Clones share the same underlying time, so a test can keep one handle
/// and move a clone into the limiter under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<f64>>,
}

impl ManualClock {
    /// Create a clock frozen at `start` seconds.
    pub fn new(start: f64) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Jump the clock to an absolute time.
    pub fn set(&self, now: f64) {
        *self.now.lock() = now;
    }

    /// Advance the clock by `secs` seconds.
    pub fn advance(&self, secs: f64) {
        *self.now.lock() += secs;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        *self.now.lock()
    }
}
