//! Leaky-bucket limiter.

use crate::clock::{Clock, MonotonicClock};
use crate::error::Result;

use super::contract::Limiter;
use super::{check_burst, check_margin, check_rate};

/// A bucket that fills by one unit per request and drains continuously at
/// `rate` units per second, holding at most `burst` units.
///
/// The level is never stored directly. It is derived lazily from the level
/// at the last mutation and the time elapsed since, so `wait_time` stays a
/// pure read.
///
/// The `margin` scales both `rate` and `burst` down by `(1 - margin)`.
#[derive(Debug, Clone)]
pub struct LeakyBucket<C: Clock = MonotonicClock> {
    rate: f64,
    burst: f64,
    last_v: f64,
    last_t: f64,
    clock: C,
}

impl LeakyBucket {
    /// Create a bucket draining `rate` units per second with capacity
    /// `burst`, tightened by `margin` in `[0, 1)`.
    pub fn new(rate: f64, burst: f64, margin: f64) -> Result<Self> {
        Self::with_clock(rate, burst, margin, MonotonicClock::new())
    }
}

impl<C: Clock> LeakyBucket<C> {
    /// Like [`LeakyBucket::new`], with an explicit time source.
    pub fn with_clock(rate: f64, burst: f64, margin: f64, clock: C) -> Result<Self> {
        check_rate(rate)?;
        check_burst(burst)?;
        check_margin(margin)?;

        let mut limiter = Self {
            rate: rate * (1.0 - margin),
            burst: burst * (1.0 - margin),
            last_v: 0.0,
            last_t: 0.0,
            clock,
        };
        limiter.reset();
        Ok(limiter)
    }

    /// Bucket level at `now`, decayed from the last recorded level.
    fn current(&self, now: f64) -> f64 {
        (self.last_v - self.rate * (now - self.last_t)).max(0.0)
    }
}

impl<C: Clock> Limiter for LeakyBucket<C> {
    fn reset(&mut self) {
        self.last_v = 0.0;
        self.last_t = self.clock.now();
    }

    fn wait_time(&self) -> Option<f64> {
        let now = self.clock.now();
        let over = self.current(now) + 1.0 - self.burst;
        (over > 0.0).then(|| over / self.rate)
    }

    fn record(&mut self) {
        let now = self.clock.now();
        // Clamp at capacity so greedy callers cannot build a backlog
        // deeper than the bucket itself.
        self.last_v = (self.current(now) + 1.0).min(self.burst);
        self.last_t = now;
    }
}
