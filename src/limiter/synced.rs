//! Thread-safe limiter wrapper.

use std::sync::Arc;

use parking_lot::Mutex;

use super::contract::Limiter;

/// A clonable, thread-safe handle around a limiter.
///
/// `record` and `reset` are serialized behind a mutex, so concurrent
/// callers cannot lose updates to the inner counters. `wait_time` holds
/// the lock only for the duration of the read and is advisory: between a
/// caller's read and its `record`, another caller's `record` may land, so
/// concurrent use can briefly overshoot the quota. [`Limiter::limit`]
/// does not re-check after sleeping; the safety margin absorbs the
/// difference.
pub struct Synced<L> {
    inner: Arc<Mutex<L>>,
}

impl<L> Clone for Synced<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L: Limiter> Synced<L> {
    /// Wrap a limiter for shared use across threads.
    pub fn new(inner: L) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Already thread-safe; returns `self` unchanged.
    ///
    /// Shadows [`Limiter::synced`] so wrapping is idempotent.
    pub fn synced(self) -> Self {
        self
    }
}

impl<L: Limiter> Limiter for Synced<L> {
    fn reset(&mut self) {
        self.inner.lock().reset();
    }

    fn wait_time(&self) -> Option<f64> {
        self.inner.lock().wait_time()
    }

    fn record(&mut self) {
        self.inner.lock().record();
    }
}
