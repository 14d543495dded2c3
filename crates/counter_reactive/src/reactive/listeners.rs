use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::trace;

pub(crate) type Callback = Arc<dyn Fn() + Send + Sync + 'static>;

/// Implemented by anything that caches state computed from a source.
pub(crate) trait Invalidate: Send + Sync {
    /// Drop any cached state, then collect the callbacks that must be told about it.
    fn invalidate(&self, pending: &mut Vec<Callback>);
}

/// Handle returned by [`crate::ValueExt::on_change`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// The dependents and subscribers of a reactive source.
///
/// Dependents (derived values) are held weakly and are always invalidated before any
/// subscriber is called, so a subscriber never observes a stale derived value.
#[derive(Default)]
pub struct Listeners {
    inner: Mutex<ListenersInner>,
}

#[derive(Default)]
struct ListenersInner {
    next_id: u64,
    dependents: Vec<Weak<dyn Invalidate>>,
    subscribers: Vec<(Subscription, Callback)>,
}

impl Listeners {
    pub(crate) fn subscribe(&self, callback: Callback) -> Subscription {
        let mut inner = self.inner.lock();
        let subscription = Subscription(inner.next_id);
        inner.next_id += 1;
        inner
            .subscribers
            .push((subscription, callback));
        subscription
    }

    pub(crate) fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.subscribers.len();
        inner
            .subscribers
            .retain(|(candidate, _)| *candidate != subscription);
        inner.subscribers.len() != before
    }

    pub(crate) fn add_dependent(&self, dependent: Weak<dyn Invalidate>) {
        self.inner
            .lock()
            .dependents
            .push(dependent);
    }

    /// The number of subscribers currently registered.
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }

    /// Invalidate all dependents, transitively, collecting every subscriber to call.
    ///
    /// No user callback is invoked here and no lock is held while dependents are visited.
    pub(crate) fn invalidate(&self, pending: &mut Vec<Callback>) {
        let dependents = {
            let mut inner = self.inner.lock();
            for (_subscription, callback) in inner.subscribers.iter() {
                push_unique(pending, callback);
            }

            // prune derived values that have been dropped
            inner
                .dependents
                .retain(|dependent| dependent.strong_count() > 0);
            inner
                .dependents
                .iter()
                .filter_map(Weak::upgrade)
                .collect::<Vec<_>>()
        };

        for dependent in dependents {
            dependent.invalidate(pending);
        }
    }

    /// Invalidate everything downstream, then call the subscribers, synchronously.
    pub(crate) fn notify(&self) {
        let mut pending = Vec::new();
        self.invalidate(&mut pending);

        trace!("notifying subscribers. count: {}", pending.len());
        for callback in pending {
            callback();
        }
    }
}

/// A subscriber reachable by more than one path (e.g. a diamond) is called once.
fn push_unique(pending: &mut Vec<Callback>, callback: &Callback) {
    if !pending
        .iter()
        .any(|existing| Arc::ptr_eq(existing, callback))
    {
        pending.push(callback.clone());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn unsubscribe_removes_only_the_given_subscription() {
        // given
        let listeners = Listeners::default();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = listeners.subscribe({
            let calls = calls.clone();
            Arc::new(move || {
                calls.fetch_add(1, Ordering::SeqCst);
            })
        });
        let _second = listeners.subscribe({
            let calls = calls.clone();
            Arc::new(move || {
                calls.fetch_add(10, Ordering::SeqCst);
            })
        });

        // when
        let removed = listeners.unsubscribe(first);
        let removed_again = listeners.unsubscribe(first);
        listeners.notify();

        // then
        assert!(removed);
        assert!(!removed_again);
        assert_eq!(listeners.subscriber_count(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn same_callback_is_only_collected_once() {
        let callback: Callback = Arc::new(|| {});
        let mut pending = Vec::new();

        push_unique(&mut pending, &callback);
        push_unique(&mut pending, &callback);

        assert_eq!(pending.len(), 1);
    }
}
