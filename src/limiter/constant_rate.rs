//! Minimum-spacing limiter.

use crate::clock::{Clock, MonotonicClock};
use crate::error::Result;

use super::contract::Limiter;
use super::{check_margin, check_rate};

/// Enforces a minimum spacing of `1/rate` seconds between requests.
///
/// The `margin` widens that spacing to `(1 + margin) / rate`, trading a
/// little throughput for safety against clock and network jitter relative
/// to the provider's true limit.
#[derive(Debug, Clone)]
pub struct ConstantRate<C: Clock = MonotonicClock> {
    delay: f64,
    last_t: f64,
    clock: C,
}

impl ConstantRate {
    /// Create a limiter allowing `rate` requests per second, tightened by
    /// `margin` in `[0, 1)`.
    pub fn new(rate: f64, margin: f64) -> Result<Self> {
        Self::with_clock(rate, margin, MonotonicClock::new())
    }
}

impl<C: Clock> ConstantRate<C> {
    /// Like [`ConstantRate::new`], with an explicit time source.
    pub fn with_clock(rate: f64, margin: f64, clock: C) -> Result<Self> {
        check_rate(rate)?;
        check_margin(margin)?;

        let mut limiter = Self {
            delay: (1.0 + margin) / rate,
            last_t: 0.0,
            clock,
        };
        limiter.reset();
        Ok(limiter)
    }
}

impl<C: Clock> Limiter for ConstantRate<C> {
    fn reset(&mut self) {
        // Backdate the last grant so the next request is immediate.
        self.last_t = self.clock.now() - self.delay;
    }

    fn wait_time(&self) -> Option<f64> {
        let wait = self.last_t + self.delay - self.clock.now();
        (wait > 0.0).then_some(wait)
    }

    fn record(&mut self) {
        self.last_t = self.clock.now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_fresh_limiter_is_immediately_available() {
        let clock = ManualClock::new(100.0);
        let limiter = ConstantRate::with_clock(2.0, 0.0, clock).unwrap();
        assert_eq!(limiter.wait_time(), None);
    }

    #[test]
    fn test_spacing_between_requests() {
        let clock = ManualClock::new(0.0);
        let mut limiter = ConstantRate::with_clock(2.0, 0.0, clock.clone()).unwrap();

        // rate 2/s means a 0.5s delay between grants
        limiter.record();

        clock.set(0.4);
        let wait = limiter.wait_time().unwrap();
        assert!((wait - 0.1).abs() < EPSILON);

        clock.set(0.5);
        assert_eq!(limiter.wait_time(), None);
    }

    #[test]
    fn test_wait_time_does_not_mutate() {
        let clock = ManualClock::new(0.0);
        let mut limiter = ConstantRate::with_clock(2.0, 0.0, clock.clone()).unwrap();
        limiter.record();

        clock.set(0.2);
        let first = limiter.wait_time();
        let second = limiter.wait_time();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reset_makes_limiter_fresh() {
        let clock = ManualClock::new(0.0);
        let mut limiter = ConstantRate::with_clock(2.0, 0.0, clock.clone()).unwrap();

        limiter.record();
        clock.set(0.1);
        assert!(limiter.wait_time().is_some());

        limiter.reset();
        assert_eq!(limiter.wait_time(), None);
    }

    #[test]
    fn test_greedy_records_do_not_accumulate_backlog() {
        let clock = ManualClock::new(0.0);
        let mut limiter = ConstantRate::with_clock(2.0, 0.0, clock).unwrap();

        // Only the last record matters, so the wait never exceeds one delay.
        for _ in 0..100 {
            limiter.record();
        }
        let wait = limiter.wait_time().unwrap();
        assert!(wait <= 0.5 + EPSILON);
    }

    #[test]
    fn test_margin_never_shortens_the_wait() {
        let clock = ManualClock::new(0.0);
        let mut plain = ConstantRate::with_clock(2.0, 0.0, clock.clone()).unwrap();
        let mut margined = ConstantRate::with_clock(2.0, 0.05, clock.clone()).unwrap();

        plain.record();
        margined.record();

        clock.set(0.5);
        assert_eq!(plain.wait_time(), None);
        // delay is 1.05 / 2 = 0.525s, so 0.025s remain
        let wait = margined.wait_time().unwrap();
        assert!((wait - 0.025).abs() < EPSILON);
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(ConstantRate::new(0.0, 0.0).is_err());
        assert!(ConstantRate::new(-1.0, 0.0).is_err());
        assert!(ConstantRate::new(f64::NAN, 0.0).is_err());
        assert!(ConstantRate::new(2.0, 1.0).is_err());
        assert!(ConstantRate::new(2.0, -0.1).is_err());
    }
}
