//! Core reactive system components.
//!
//! This module provides the fundamental building blocks for reactive state management:
//!
//! - `Value<T>`: A container for state that notifies its dependents and subscribers on write
//! - `Derived<T>`: Computed values that are invalidated when dependencies change
//! - `SignalRegistry`: Registry that keeps reactive values alive under a key
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use counter_reactive::{SignalRegistry, Value, ValueExt};
//!
//! let registry = SignalRegistry::new();
//!
//! let count = Value::new(0i64);
//! registry.register("count", count.clone());
//!
//! let is_even = count.derive(|count| count % 2 == 0);
//! registry.register("is_even", is_even.clone());
//!
//! let notifications = Arc::new(AtomicUsize::new(0));
//! let notifications_for_callback = notifications.clone();
//! is_even.on_change(move || {
//!     notifications_for_callback.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! // Update values using set() to ensure proper change notification
//! count.set(5);
//!
//! // notification is synchronous
//! assert_eq!(notifications.load(Ordering::SeqCst), 1);
//! assert!(!is_even.get());
//! ```

mod derived;
mod listeners;
mod registry;
mod value;

pub use derived::Derived;
pub use listeners::{Listeners, Subscription};
pub use registry::SignalRegistry;
pub use value::{Value, ValueExt};
