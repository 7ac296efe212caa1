//! The core limiter contract and its blocking facade.

use std::thread;
use std::time::Duration;

use tracing::trace;

use super::any::Any;
use super::synced::Synced;

/// A heap-allocated limiter that can cross thread boundaries.
pub type BoxedLimiter = Box<dyn Limiter + Send>;

/// A pacing strategy for outbound requests.
///
/// The contract has three required operations: a non-mutating
/// [`wait_time`](Limiter::wait_time) query, an unconditional
/// [`record`](Limiter::record) of one request made now, and a
/// [`reset`](Limiter::reset) back to a fresh state. Everything else is
/// derived.
///
/// `record` has no precondition: callers are expected, but not required,
/// to honor `wait_time` first. Implementations must keep greedy callers in
/// check: hammering `record` in a tight loop must not grow `wait_time`
/// beyond what a compliant caller would have accumulated after the same
/// number of requests.
pub trait Limiter {
    /// Clear all accumulated state, as if freshly constructed right now.
    fn reset(&mut self);

    /// Seconds until the next request is allowed, or `None` for
    /// immediately. Does not change observable state.
    fn wait_time(&self) -> Option<f64>;

    /// Account for one request being made now.
    fn record(&mut self);

    /// Block until the next request is allowed, then account for it.
    ///
    /// This is the one entry point the transport layer calls, immediately
    /// before each outbound request.
    fn limit(&mut self) {
        if let Some(wait) = self.wait_time() {
            if wait > 0.0 && wait.is_finite() {
                trace!(wait_secs = wait, "throttling before next request");
                thread::sleep(Duration::from_secs_f64(wait));
            }
        }
        self.record();
    }

    /// Adapt an iterator so each item is yielded at the limited rate.
    ///
    /// Lazy: the source is only pulled as the result is consumed, and an
    /// infinite source stays infinite.
    fn pace<I>(&mut self, items: I) -> Pace<'_, Self, I::IntoIter>
    where
        Self: Sized,
        I: IntoIterator,
    {
        Pace {
            limiter: self,
            items: items.into_iter(),
        }
    }

    /// An endless stream of pacing signals, one per allowed request.
    fn ticks(&mut self) -> Ticks<'_, Self>
    where
        Self: Sized,
    {
        Ticks { limiter: self }
    }

    /// OR-combine with another limiter: a request goes through when
    /// either side allows it, and waits take the shorter side.
    ///
    /// Nested [`Any`] values are flattened into a single child list.
    /// Flattening is static: an [`Any`] hidden behind a boxed limiter
    /// stays a single child. The combined behavior is the same either
    /// way, only [`Any::len`] differs.
    fn or<O>(self, other: O) -> Any
    where
        Self: Sized + Send + 'static,
        O: Limiter + Send + 'static,
    {
        let mut children = Box::new(self).into_children();
        children.extend(Box::new(other).into_children());
        Any::from_children(children)
    }

    /// Wrap this limiter for use from multiple threads.
    ///
    /// [`Synced`] shadows this with an inherent method returning `self`,
    /// so wrapping is idempotent.
    fn synced(self) -> Synced<Self>
    where
        Self: Sized,
    {
        Synced::new(self)
    }

    /// Decompose into children for OR-combination.
    ///
    /// [`Any`] overrides this to yield its child list; everything else is
    /// its own single child.
    fn into_children(self: Box<Self>) -> Vec<BoxedLimiter>
    where
        Self: Sized + Send + 'static,
    {
        vec![self]
    }
}

impl<L: Limiter + ?Sized> Limiter for Box<L> {
    fn reset(&mut self) {
        (**self).reset();
    }

    fn wait_time(&self) -> Option<f64> {
        (**self).wait_time()
    }

    fn record(&mut self) {
        (**self).record();
    }
}

/// Iterator adaptor returned by [`Limiter::pace`].
pub struct Pace<'a, L, I> {
    limiter: &'a mut L,
    items: I,
}

impl<L: Limiter, I: Iterator> Iterator for Pace<'_, L, I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let item = self.items.next()?;
        self.limiter.limit();
        Some(item)
    }
}

/// Infinite iterator of pacing signals returned by [`Limiter::ticks`].
pub struct Ticks<'a, L> {
    limiter: &'a mut L,
}

impl<L: Limiter> Iterator for Ticks<'_, L> {
    type Item = ();

    fn next(&mut self) -> Option<()> {
        self.limiter.limit();
        Some(())
    }
}
