//! Permissive OR-combination of limiters.

use super::contract::{BoxedLimiter, Limiter};

/// An ordered set of child limiters combined with OR semantics.
///
/// A request goes through as soon as any child allows it, and a required
/// wait is the minimum over the children. `record` and `reset` always hit
/// every child, whichever one "allowed" the request, so each child's
/// accounting stays consistent with actual traffic.
///
/// Note that the shortest child wait wins: once any one child frees up,
/// the combination is looser than its strictest child.
pub struct Any {
    children: Vec<BoxedLimiter>,
}

impl Any {
    /// Build a combination from already-boxed children.
    ///
    /// Children that are themselves [`Any`] should be flattened by the
    /// caller first; [`Limiter::or`] and [`Any::push`] do this.
    pub fn from_children(children: Vec<BoxedLimiter>) -> Self {
        Self { children }
    }

    /// Add a child, merging its children if it is itself an [`Any`].
    pub fn push<L>(&mut self, child: L)
    where
        L: Limiter + Send + 'static,
    {
        self.children.extend(Box::new(child).into_children());
    }

    /// Number of child limiters.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the combination has no children.
    ///
    /// An empty combination never waits.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Limiter for Any {
    fn reset(&mut self) {
        for child in &mut self.children {
            child.reset();
        }
    }

    fn wait_time(&self) -> Option<f64> {
        let mut wait: Option<f64> = None;
        for child in &self.children {
            match child.wait_time() {
                None => return None,
                Some(w) => wait = Some(wait.map_or(w, |best| best.min(w))),
            }
        }
        wait
    }

    fn record(&mut self) {
        for child in &mut self.children {
            child.record();
        }
    }

    fn into_children(self: Box<Self>) -> Vec<BoxedLimiter> {
        self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::limiter::ConstantRate;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Test limiter with a constant answer and a shared record counter.
    struct Stub {
        wait: Option<f64>,
        records: Arc<AtomicU32>,
    }

    impl Stub {
        fn new(wait: Option<f64>) -> Self {
            Self {
                wait,
                records: Arc::new(AtomicU32::new(0)),
            }
        }
    }

    impl Limiter for Stub {
        fn reset(&mut self) {}

        fn wait_time(&self) -> Option<f64> {
            self.wait
        }

        fn record(&mut self) {
            self.records.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_any_immediate_child_wins() {
        let combined = Stub::new(Some(5.0)).or(Stub::new(None));
        assert_eq!(combined.wait_time(), None);
    }

    #[test]
    fn test_any_minimum_wait_wins() {
        let combined = Stub::new(Some(3.0)).or(Stub::new(Some(7.0)));
        assert_eq!(combined.wait_time(), Some(3.0));
    }

    #[test]
    fn test_empty_any_is_immediate() {
        let combined = Any::from_children(Vec::new());
        assert!(combined.is_empty());
        assert_eq!(combined.wait_time(), None);
    }

    #[test]
    fn test_record_reaches_every_child() {
        let a = Stub::new(None);
        let b = Stub::new(Some(9.0));
        let a_records = a.records.clone();
        let b_records = b.records.clone();

        let mut combined = a.or(b);
        combined.record();
        combined.record();

        assert_eq!(a_records.load(Ordering::SeqCst), 2);
        assert_eq!(b_records.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_or_flattens_nested_combinations() {
        let left = Stub::new(None).or(Stub::new(None));
        let right = Stub::new(None).or(Stub::new(None));
        let combined = left.or(right);
        assert_eq!(combined.len(), 4);

        let combined = combined.or(Stub::new(None));
        assert_eq!(combined.len(), 5);
    }

    #[test]
    fn test_boxed_combination_stays_a_single_child() {
        // Flattening is static: a boxed combination is opaque, so it
        // counts as one child. Waits still combine the same way.
        let boxed: BoxedLimiter = Box::new(Stub::new(Some(3.0)).or(Stub::new(Some(7.0))));
        let combined = Stub::new(Some(5.0)).or(boxed);
        assert_eq!(combined.len(), 2);
        assert_eq!(combined.wait_time(), Some(3.0));
    }

    #[test]
    fn test_push_flattens_any_children() {
        let mut combined = Stub::new(None).or(Stub::new(None));
        combined.push(Stub::new(None).or(Stub::new(None)));
        assert_eq!(combined.len(), 4);
    }

    #[test]
    fn test_reset_resets_every_child() {
        let clock = ManualClock::new(0.0);
        let a = ConstantRate::with_clock(1.0, 0.0, clock.clone()).unwrap();
        let b = ConstantRate::with_clock(0.5, 0.0, clock.clone()).unwrap();

        let mut combined = a.or(b);
        combined.record();
        assert!(combined.wait_time().is_some());

        combined.reset();
        assert_eq!(combined.wait_time(), None);
    }
}
