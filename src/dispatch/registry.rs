//! # Subscriber registry - copy-on-write consumer set.
//!
//! [`SubscriberRegistry`] keeps the current consumers as an immutable `Arc<Vec<_>>`
//! published through [`ArcSwap`]. Readers load the current vector without locking;
//! writers serialize on a small mutex, build a new vector and swap it in.
//!
//! ## Architecture
//! ```text
//! subscribe(c) / unsubscribe(c)            snapshot()
//!         │                                     │
//!         ▼                                     ▼
//!   lock(writer) ──► clone Vec ──► mutate ──► ArcSwap::store ◄── ArcSwap::load_full
//!                                               (atomic publish)     (lock-free read)
//! ```
//!
//! ## Rules
//! - Consumers are unique by identity ([`same_consumer`]).
//! - A snapshot never changes after it is taken; mutation builds a new one.
//! - Insertion order is preserved and is the delivery order for first-success dispatch.
//! - Writers never wait on readers; readers never wait at all.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;

use crate::consumers::{ConsumerRef, same_consumer};

/// Immutable, point-in-time view of registered consumers.
pub type Snapshot<T> = Arc<Vec<ConsumerRef<T>>>;

/// Thread-safe set of consumers with lock-free snapshots.
pub struct SubscriberRegistry<T> {
    writer: Mutex<()>,
    current: ArcSwap<Vec<ConsumerRef<T>>>,
}

impl<T: 'static> SubscriberRegistry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            writer: Mutex::new(()),
            current: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Adds `consumer` unless the same instance is already registered.
    ///
    /// Returns `true` if the set changed.
    pub fn subscribe(&self, consumer: ConsumerRef<T>) -> bool {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.current.load_full();
        if current.iter().any(|c| same_consumer(c, &consumer)) {
            return false;
        }

        let mut next = Vec::with_capacity(current.len() + 1);
        next.extend(current.iter().cloned());
        tracing::trace!(consumer = consumer.name(), total = next.len() + 1, "consumer subscribed");
        next.push(consumer);
        self.current.store(Arc::new(next));
        true
    }

    /// Removes `consumer` if registered.
    ///
    /// Returns `true` if the set changed; removing a non-member is a no-op.
    pub fn unsubscribe(&self, consumer: &ConsumerRef<T>) -> bool {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.current.load_full();
        let Some(pos) = current.iter().position(|c| same_consumer(c, consumer)) else {
            return false;
        };

        let mut next: Vec<ConsumerRef<T>> = current.as_ref().clone();
        next.remove(pos);
        tracing::trace!(consumer = consumer.name(), total = next.len(), "consumer unsubscribed");
        self.current.store(Arc::new(next));
        true
    }

    /// Returns the current consumers. Later mutations do not affect the returned view.
    #[inline]
    pub fn snapshot(&self) -> Snapshot<T> {
        self.current.load_full()
    }

    /// True if `consumer` is currently registered.
    pub fn contains(&self, consumer: &ConsumerRef<T>) -> bool {
        self.current.load().iter().any(|c| same_consumer(c, consumer))
    }

    /// Number of registered consumers.
    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    /// True if there are no consumers.
    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }
}

impl<T: 'static> Default for SubscriberRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for SubscriberRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_list()
            .entries(snapshot.iter().map(|c| c.name()))
            .finish()
    }
}
