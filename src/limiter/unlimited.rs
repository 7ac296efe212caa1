//! The no-op limiter.

use super::contract::Limiter;

/// A limiter that imposes no limit.
///
/// Useful as a placeholder where a limiter is required but no pacing is
/// wanted, such as an empty pacing configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlimited;

impl Limiter for Unlimited {
    fn reset(&mut self) {}

    fn wait_time(&self) -> Option<f64> {
        None
    }

    fn record(&mut self) {}
}
