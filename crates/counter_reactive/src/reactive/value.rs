use std::fmt::{self, Debug};
use std::sync::Arc;

use parking_lot::Mutex;

use super::derived::Derived;
use super::listeners::{Listeners, Subscription};

/// Common behaviour of every reactive source, i.e. [`Value`] and [`Derived`].
pub trait ValueExt {
    /// The dependents and subscribers of this source.
    fn listeners(&self) -> &Listeners;

    /// Register a callback that is called, synchronously, after every change.
    ///
    /// The callback carries no payload; re-read whatever is needed.
    fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.listeners()
            .subscribe(Arc::new(callback))
    }

    /// Returns `true` if the subscription was registered on this source.
    fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.listeners()
            .unsubscribe(subscription)
    }
}

/// A state cell.
///
/// Cloning a `Value` gives another handle to the same cell.
pub struct Value<T> {
    value: Arc<Mutex<T>>,
    listeners: Arc<Listeners>,
}

impl<T> Value<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(Mutex::new(value)),
            listeners: Arc::new(Listeners::default()),
        }
    }

    /// Read the current value by reference, without cloning it.
    ///
    /// The cell is locked while `f` runs and the lock is not reentrant: `f` must not read or
    /// write this same cell (or a value derived from it), or it deadlocks.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.lock())
    }

    /// Replace the value unconditionally.
    ///
    /// All derived values are invalidated and all subscribers have been called when this returns.
    pub fn set(&self, value: T) {
        *self.value.lock() = value;
        self.listeners.notify();
    }

    /// Modify the value in place, with the same notification as [`Value::set`].
    ///
    /// The cell is locked while `f` runs and the lock is not reentrant: `f` must not read or
    /// write this same cell (or a value derived from it), or it deadlocks. Subscribers are called
    /// after the lock is released, so they may read the cell.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.value.lock());
        self.listeners.notify();
    }
}

impl<T: Clone> Value<T> {
    pub fn get(&self) -> T {
        self.value.lock().clone()
    }
}

impl<T: Send + 'static> Value<T> {
    /// Create a derived value whose only dependency is this cell.
    pub fn derive<U, F>(&self, f: F) -> Derived<U>
    where
        U: Clone + Send + 'static,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        let source = self.clone();
        Derived::new(&[self.clone()], move || source.with(&f))
    }
}

impl<T> ValueExt for Value<T> {
    fn listeners(&self) -> &Listeners {
        &self.listeners
    }
}

impl<T> Clone for Value<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            listeners: self.listeners.clone(),
        }
    }
}

impl<T: Default> Default for Value<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Debug> Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("value", &*self.value.lock())
            .field("subscribers", &self.listeners.subscriber_count())
            .finish()
    }
}
