use std::fmt::{self, Debug};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::listeners::{Callback, Invalidate, Listeners};
use super::value::ValueExt;

/// A value computed from one or more reactive sources.
///
/// A write to any dependency marks the derived value dirty straight away; the compute function
/// only runs on the next [`Derived::get`], and the result is cached until the next write.
pub struct Derived<T> {
    inner: Arc<DerivedInner<T>>,
}

struct DerivedInner<T> {
    state: Mutex<DerivedState<T>>,
    compute: Box<dyn Fn() -> T + Send + Sync>,
    listeners: Listeners,
}

struct DerivedState<T> {
    cached: Option<T>,
    /// Bumped on every invalidation, so a result computed across a write is not cached.
    generation: u64,
}

impl<T: Clone + Send + 'static> Derived<T> {
    /// Creates a derived value.
    ///
    /// `dependencies` are the sources `compute` reads; each of them will invalidate this value
    /// when written. The dependencies only hold a weak reference to the derived value.
    pub fn new<D, F>(dependencies: &[D], compute: F) -> Self
    where
        D: ValueExt,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let inner = Arc::new(DerivedInner {
            state: Mutex::new(DerivedState {
                cached: None,
                generation: 0,
            }),
            compute: Box::new(compute),
            listeners: Listeners::default(),
        });

        for dependency in dependencies {
            let dependent: Weak<dyn Invalidate> = Arc::downgrade(&inner) as Weak<dyn Invalidate>;
            dependency
                .listeners()
                .add_dependent(dependent);
        }

        Self {
            inner,
        }
    }

    /// Returns the cached value, recomputing it first if a dependency changed since the last read.
    pub fn get(&self) -> T {
        let generation = {
            let state = self.inner.state.lock();
            if let Some(cached) = &state.cached {
                return cached.clone();
            }
            state.generation
        };

        let value = (self.inner.compute)();

        let mut state = self.inner.state.lock();
        if state.generation == generation {
            state.cached = Some(value.clone());
        }
        value
    }

    /// `true` if the next [`Derived::get`] will recompute.
    pub fn is_dirty(&self) -> bool {
        self.inner
            .state
            .lock()
            .cached
            .is_none()
    }
}

impl<T: Send> Invalidate for DerivedInner<T> {
    fn invalidate(&self, pending: &mut Vec<Callback>) {
        {
            let mut state = self.state.lock();
            state.cached = None;
            state.generation += 1;
        }
        self.listeners.invalidate(pending);
    }
}

impl<T> ValueExt for Derived<T> {
    fn listeners(&self) -> &Listeners {
        &self.inner.listeners
    }
}

impl<T> Clone for Derived<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Debug> Debug for Derived<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Derived")
            .field("cached", &state.cached)
            .field("generation", &state.generation)
            .finish()
    }
}
