#![forbid(unsafe_code)]

//! Read-only stores computed from other stores.
//!
//! # Design
//!
//! [`Derived<T>`] owns an output [`Store<T>`] and a subscription to each
//! source. When any source is replaced, the derived value is recomputed and
//! pushed into the output store inside the source's notification cycle, so
//! a `Derived` is itself subscribable with the same ordering guarantees as
//! a plain store. This is an eager push model; there is no dirty flag and
//! no deferred recomputation.
//!
//! # Invariants
//!
//! 1. After a source `set` returns, `get()` reflects the recomputed value.
//! 2. Subscribers of the derived store observe recomputed values in source
//!    replacement order.
//! 3. Dropping every handle to a `Derived` severs its source
//!    subscriptions; the sources stop paying for the recomputation.
//!
//! The compute function runs once per source replacement. At construction
//! it also runs once for the initial value and once per source for the
//! registration delivery.

use std::rc::Rc;

use crate::store::{Store, Subscription};

/// A value derived from one or more source stores, recomputed eagerly on
/// every source replacement.
///
/// Cloning a `Derived` creates a new handle to the **same** derived cell.
pub struct Derived<T> {
    output: Store<T>,
    /// Source subscription guards, shared across handles. Dropped with the
    /// last handle.
    _sources: Rc<Vec<Subscription>>,
}

impl<T> Clone for Derived<T> {
    fn clone(&self) -> Self {
        Self {
            output: self.output.clone(),
            _sources: Rc::clone(&self._sources),
        }
    }
}

impl<T: std::fmt::Debug + Clone + 'static> std::fmt::Debug for Derived<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Derived")
            .field("value", &self.output.get())
            .field("version", &self.output.version())
            .finish()
    }
}

impl<T: Clone + 'static> Derived<T> {
    /// Derive from a single source store.
    pub fn new<S: Clone + 'static>(source: &Store<S>, map: impl Fn(&S) -> T + 'static) -> Self {
        let output = Store::new(source.with(|value| map(value)));
        let out = output.clone();
        let sub = source.subscribe(move |value| out.set(map(value)));
        Self {
            output,
            _sources: Rc::new(vec![sub]),
        }
    }

    /// Derive from two source stores.
    pub fn from2<A, B>(
        a: &Store<A>,
        b: &Store<B>,
        zip: impl Fn(&A, &B) -> T + 'static,
    ) -> Self
    where
        A: Clone + 'static,
        B: Clone + 'static,
    {
        let output = Store::new(a.with(|av| b.with(|bv| zip(av, bv))));
        let recompute = {
            let a = a.clone();
            let b = b.clone();
            let out = output.clone();
            let zip = Rc::new(zip);
            move || out.set(a.with(|av| b.with(|bv| zip(av, bv))))
        };
        let sub_a = a.subscribe({
            let recompute = recompute.clone();
            move |_| recompute()
        });
        let sub_b = b.subscribe(move |_| recompute());
        Self {
            output,
            _sources: Rc::new(vec![sub_a, sub_b]),
        }
    }

    /// Clone out the current derived value.
    #[must_use]
    pub fn get(&self) -> T {
        self.output.get()
    }

    /// Access the current derived value by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.output.with(f)
    }

    /// Version of the derived cell. Increments once per recomputation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.output.version()
    }

    /// Subscribe to recomputed values. Delivers the current derived value
    /// immediately, like [`Store::subscribe`].
    #[must_use = "dropping the Subscription unsubscribes the callback"]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.output.subscribe(callback)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
