#![forbid(unsafe_code)]

//! The reactive value cell.
//!
//! # Design
//!
//! [`Store<T>`] wraps a current value in shared, reference-counted storage.
//! Subscribers are plain callbacks invoked synchronously: once at
//! registration with the current value, and again after every replacement,
//! in registration order. The registry holds `Weak` callback pointers; the
//! returned [`Subscription`] guard owns the strong reference and removes the
//! entry on drop. Dead entries are also swept lazily during notification.
//!
//! # Invariants
//!
//! 1. `set` replaces the value and delivers it to every active subscriber
//!    before returning. There is no equality gating: setting a value equal
//!    to the current one still notifies.
//! 2. Subscribers are notified in registration order.
//! 3. `subscribe` delivers the current value to the new callback before
//!    returning.
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.
//! 5. Version increments exactly once per `set` (and per `update`).
//!
//! # Re-entrancy
//!
//! Callbacks receive a snapshot of the value taken at the start of the
//! notification cycle, so a callback may call `set`, `update`, or
//! `subscribe` on the same store. Removals and additions made during a
//! cycle take effect from the next cycle.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::trace;

/// Registry entry: a weak handle to a subscriber callback.
struct Subscriber<T> {
    id: u64,
    callback: Weak<dyn Fn(&T)>,
}

/// Shared interior for [`Store<T>`].
struct StoreInner<T> {
    value: RefCell<T>,
    /// Monotonically increasing, bumped once per replacement.
    version: Cell<u64>,
    next_id: Cell<u64>,
    subscribers: RefCell<Vec<Subscriber<T>>>,
}

impl<T> StoreInner<T> {
    fn remove(&self, id: u64) {
        self.subscribers.borrow_mut().retain(|sub| sub.id != id);
    }
}

/// A single-threaded container holding a current value and notifying
/// registered subscribers synchronously whenever the value is replaced.
///
/// Cloning a `Store` creates a new handle to the **same** cell.
pub struct Store<T> {
    inner: Rc<StoreInner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("value", &self.inner.value.borrow())
            .field("version", &self.inner.version.get())
            .finish()
    }
}

impl<T: Clone + Default + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + 'static> Store<T> {
    /// Create a store holding `initial`. No validation is performed; any
    /// value of the type is accepted, including `None` for optional-holder
    /// cells.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                value: RefCell::new(initial),
                version: Cell::new(0),
                next_id: Cell::new(0),
                subscribers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Clone out the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Access the current value by reference without cloning.
    ///
    /// # Panics
    ///
    /// Panics if the closure calls `set` or `update` on the same store
    /// (re-entrant mutable borrow).
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Current version number. Starts at 0 and increments by 1 on each
    /// replacement.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .borrow()
            .iter()
            .filter(|sub| sub.callback.strong_count() > 0)
            .count()
    }

    /// Register `callback` and deliver the current value to it immediately.
    ///
    /// The callback fires again after every subsequent replacement, in
    /// registration order relative to other subscribers. Dropping the
    /// returned [`Subscription`] unsubscribes.
    #[must_use = "dropping the Subscription unsubscribes the callback"]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Rc<dyn Fn(&T)> = Rc::new(callback);
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.subscribers.borrow_mut().push(Subscriber {
            id,
            callback: Rc::downgrade(&callback),
        });

        // Initial synchronous delivery of the current value.
        let current = self.get();
        callback(&current);

        let registry = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = registry.upgrade() {
                inner.remove(id);
            }
            // The strong callback handle dies with this closure.
            drop(callback);
        })
    }

    /// Replace the current value and synchronously notify every active
    /// subscriber, in registration order, before returning.
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        self.inner.version.set(self.inner.version.get() + 1);
        self.notify();
    }

    /// Replace the current value with `f(&current)`. Equivalent to
    /// `set(f(&current))`, including the notification cycle.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.inner.value.borrow());
        self.set(next);
    }

    fn notify(&self) {
        // Snapshot live callbacks and sweep dead entries in one pass, then
        // release the registry borrow so callbacks can re-enter.
        let live: Vec<Rc<dyn Fn(&T)>> = {
            let mut subscribers = self.inner.subscribers.borrow_mut();
            subscribers.retain(|sub| sub.callback.strong_count() > 0);
            subscribers
                .iter()
                .filter_map(|sub| sub.callback.upgrade())
                .collect()
        };
        trace!(
            version = self.inner.version.get(),
            subscribers = live.len(),
            "store value replaced"
        );
        let current = self.get();
        for callback in live {
            callback(&current);
        }
    }
}

/// RAII guard for a registered subscriber callback.
///
/// Dropping the guard removes the callback; no notifications are delivered
/// to it afterwards.
#[must_use = "dropping the Subscription unsubscribes the callback"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(detach: impl FnOnce() + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// Explicitly unsubscribe. Equivalent to dropping the guard.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.detach.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
