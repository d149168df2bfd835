#![forbid(unsafe_code)]

//! Reactive state primitives for inklet.
//!
//! This crate provides the change-notification core the rest of the
//! workspace builds on:
//!
//! - [`Store`]: a shared, version-tracked value cell with synchronous
//!   change notification via subscriber callbacks.
//! - [`Subscription`]: RAII guard that automatically unsubscribes on drop.
//! - [`Derived`]: a read-only store recomputed eagerly from one or more
//!   `Store` dependencies.
//!
//! # Architecture
//!
//! `Store<T>` uses `Rc<RefCell<..>>` for single-threaded shared ownership.
//! Subscribers are stored as `Weak` function pointers and cleaned up lazily
//! during notification; the `Subscription` guard owns the strong reference.
//!
//! Delivery is synchronous and ordered: `set` notifies every active
//! subscriber, in registration order, before it returns. There is no
//! buffering, batching, or debouncing, and no equality gating — replacing
//! a value with an equal one still notifies.

pub mod derived;
pub mod store;

pub use derived::Derived;
pub use store::{Store, Subscription};
