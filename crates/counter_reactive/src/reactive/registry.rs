use std::any::Any;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::{trace, warn};

/// A registry that keeps reactive values alive under a key.
///
/// Derived values are only weakly referenced by their dependencies; registering one here keeps it
/// (and its subscriptions) alive as long as the registry exists, and allows it to be found again by key.
#[derive(Default)]
pub struct SignalRegistry {
    signals: Mutex<IndexMap<String, Arc<dyn Any + Send + Sync>>>,
}

impl SignalRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            signals: Mutex::new(IndexMap::new()),
        }
    }

    /// Registers a signal with the registry.
    ///
    /// A key is expected to be registered once; registering it again replaces the previous signal.
    /// Returns `true` if a signal was replaced.
    pub fn register<S>(&self, key: impl Into<String>, signal: S) -> bool
    where
        S: Send + Sync + 'static,
    {
        let key = key.into();
        trace!("registering signal. key: {}", key);

        let previous = self
            .signals
            .lock()
            .insert(key.clone(), Arc::new(signal));

        if previous.is_some() {
            warn!("Duplicate signal key, replaced previous signal. key: {}", key);
        }
        previous.is_some()
    }

    /// Look up a signal by key.
    ///
    /// Returns `None` if the key is unknown or the signal registered under it is not an `S`.
    pub fn get<S>(&self, key: &str) -> Option<S>
    where
        S: Clone + 'static,
    {
        let signals = self.signals.lock();
        let signal = signals.get(key)?;
        signal
            .downcast_ref::<S>()
            .cloned()
    }

    /// Keys, in registration order.
    pub fn keys(&self) -> Vec<String> {
        self.signals
            .lock()
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.signals.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::reactive::{Derived, Value, ValueExt};

    #[test]
    fn test_registry_keeps_signals_alive() {
        // given
        let registry = SignalRegistry::new();
        let value = Value::new(42i64);
        let notifications = Arc::new(AtomicUsize::new(0));

        {
            let doubled = value.derive(|value| value * 2);
            let notifications = notifications.clone();
            doubled.on_change(move || {
                notifications.fetch_add(1, Ordering::SeqCst);
            });
            registry.register("doubled", doubled);
        }

        // when
        value.set(84);

        // then, the derived value survived the end of the scope above
        assert_eq!(notifications.load(Ordering::SeqCst), 1);
        let doubled = registry
            .get::<Derived<i64>>("doubled")
            .unwrap();
        assert_eq!(doubled.get(), 168);
    }

    #[test]
    fn lookup_by_key_and_type() {
        let registry = SignalRegistry::new();
        registry.register("count", Value::new(1i64));

        assert!(registry.get::<Value<i64>>("count").is_some());
        // wrong type
        assert!(registry.get::<Value<bool>>("count").is_none());
        // unknown key
        assert!(registry.get::<Value<i64>>("other").is_none());
    }

    #[test]
    fn duplicate_key_replaces_previous_signal() {
        let registry = SignalRegistry::new();

        let replaced_first = registry.register("count", Value::new(1i64));
        let replaced_second = registry.register("count", Value::new(2i64));

        assert!(!replaced_first);
        assert!(replaced_second);
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry
                .get::<Value<i64>>("count")
                .unwrap()
                .get(),
            2
        );
    }

    #[test]
    fn keys_are_in_registration_order() {
        let registry = SignalRegistry::new();
        assert!(registry.is_empty());

        registry.register("b", Value::new(0i64));
        registry.register("a", Value::new(0i64));
        registry.register("c", Value::new(0i64));

        assert_eq!(registry.keys(), vec!["b", "a", "c"]);
    }
}
