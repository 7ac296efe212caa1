//! Limiter contract, strategies, and combinators.

mod any;
mod constant_rate;
mod contract;
mod leaky_bucket;
mod synced;
mod unlimited;
mod windowed;

pub use any::Any;
pub use constant_rate::ConstantRate;
pub use contract::{BoxedLimiter, Limiter, Pace, Ticks};
pub use leaky_bucket::LeakyBucket;
pub use synced::Synced;
pub use unlimited::Unlimited;
pub use windowed::Windowed;

use crate::error::{PacedError, Result};

fn check_rate(rate: f64) -> Result<()> {
    if rate.is_finite() && rate > 0.0 {
        Ok(())
    } else {
        Err(PacedError::InvalidRate(rate))
    }
}

fn check_burst(burst: f64) -> Result<()> {
    if burst.is_finite() && burst > 0.0 {
        Ok(())
    } else {
        Err(PacedError::InvalidBurst(burst))
    }
}

fn check_window(window: f64) -> Result<()> {
    if window.is_finite() && window > 0.0 {
        Ok(())
    } else {
        Err(PacedError::InvalidWindow(window))
    }
}

fn check_max(max: u32) -> Result<()> {
    if max >= 1 {
        Ok(())
    } else {
        Err(PacedError::InvalidMax(max))
    }
}

fn check_margin(margin: f64) -> Result<()> {
    if margin.is_finite() && (0.0..1.0).contains(&margin) {
        Ok(())
    } else {
        Err(PacedError::InvalidMargin(margin))
    }
}
