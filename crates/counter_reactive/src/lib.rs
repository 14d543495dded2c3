//! A small reactive state management core.
//!
//! This crate provides a reactive programming model where derived values stay in step with
//! the state they are computed from, and where consumers are told when something changed.
//!
//! # Key Features
//!
//! - State cells ([`Value`]) that notify subscribers synchronously on every write
//! - Derived values ([`Derived`]) that are invalidated eagerly and recomputed lazily
//! - Explicit dependency edges, given when a derived value is constructed
//! - A keyed [`SignalRegistry`] that keeps signals alive and lets them be looked up by name
//!
//! # Example
//!
//! ```rust
//! use counter_reactive::{Derived, Value};
//!
//! let count = Value::new(0i64);
//! let count_for_compute = count.clone();
//!
//! // the dependency on `count` is explicit
//! let doubled = Derived::new(&[count.clone()], move || count_for_compute.get() * 2);
//!
//! count.set(5);
//!
//! assert_eq!(doubled.get(), 10);
//! ```

pub mod reactive;

pub use reactive::{Derived, SignalRegistry, Subscription, Value, ValueExt};
