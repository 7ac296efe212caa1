//! Fixed-window counting limiter.

use crate::clock::{Clock, MonotonicClock};
use crate::error::Result;

use super::contract::Limiter;
use super::{check_margin, check_max, check_window};

/// At most `max` requests per window of `window` seconds.
///
/// Windows open lazily: the first request at or after the previous
/// window's end starts a new one. There is no background timer; expiry is
/// observed on the next call.
///
/// The `margin` stretches the window to `window * (1 + margin)`.
#[derive(Debug, Clone)]
pub struct Windowed<C: Clock = MonotonicClock> {
    max: u32,
    window: f64,
    window_end: f64,
    window_count: u32,
    clock: C,
}

impl Windowed {
    /// Create a limiter allowing `max` requests per `window` seconds,
    /// tightened by `margin` in `[0, 1)`.
    pub fn new(max: u32, window: f64, margin: f64) -> Result<Self> {
        Self::with_clock(max, window, margin, MonotonicClock::new())
    }
}

impl<C: Clock> Windowed<C> {
    /// Like [`Windowed::new`], with an explicit time source.
    pub fn with_clock(max: u32, window: f64, margin: f64, clock: C) -> Result<Self> {
        check_max(max)?;
        check_window(window)?;
        check_margin(margin)?;

        let mut limiter = Self {
            max,
            window: window * (1.0 + margin),
            window_end: 0.0,
            window_count: 0,
            clock,
        };
        limiter.reset();
        Ok(limiter)
    }
}

impl<C: Clock> Limiter for Windowed<C> {
    fn reset(&mut self) {
        self.window_end = self.clock.now();
        self.window_count = 0;
    }

    fn wait_time(&self) -> Option<f64> {
        let wait = self.window_end - self.clock.now();
        (wait > 0.0 && self.window_count >= self.max).then_some(wait)
    }

    fn record(&mut self) {
        let now = self.clock.now();
        if now >= self.window_end {
            self.window_end = now + self.window;
            self.window_count = 1;
        } else {
            self.window_count += 1;
        }
    }
}
