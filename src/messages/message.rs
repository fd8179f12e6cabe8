//! # Message envelope.
//!
//! A [`Message`] pairs an opaque payload with [`MessageHeaders`]. The dispatcher never looks
//! inside either; they exist for consumers and for log correlation (`id`).
//!
//! ## Ordering
//! Each message gets a process-wide unique `id` that increases monotonically,
//! so ids can be used to restore creation order in logs.
//!
//! ## Example
//! ```rust
//! use courier::Message;
//!
//! let msg = Message::new("hello")
//!     .with_header("source", "demo")
//!     .with_header("priority", "high");
//!
//! assert_eq!(*msg.payload(), "hello");
//! assert_eq!(msg.headers().get("source"), Some("demo"));
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for message ids.
static MESSAGE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Header metadata attached to a [`Message`].
#[derive(Clone, Debug)]
pub struct MessageHeaders {
    id: u64,
    timestamp: SystemTime,
    attributes: BTreeMap<Arc<str>, Arc<str>>,
}

impl MessageHeaders {
    fn next() -> Self {
        Self {
            id: MESSAGE_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            timestamp: SystemTime::now(),
            attributes: BTreeMap::new(),
        }
    }

    /// Process-wide unique, monotonically increasing id.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Wall-clock creation time.
    #[inline]
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    /// Looks up a user attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(|v| v.as_ref())
    }

    /// Iterates user attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }

    /// Number of user attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// True if no user attributes are set.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Immutable envelope carrying a payload and header metadata.
///
/// Headers are set with the consuming `with_*` builders before the message is handed
/// to a dispatcher; after that the message is only ever shared by reference.
#[derive(Clone, Debug)]
pub struct Message<T> {
    headers: MessageHeaders,
    payload: T,
}

impl<T> Message<T> {
    /// Creates a message with a fresh id and the current timestamp.
    pub fn new(payload: T) -> Self {
        Self {
            headers: MessageHeaders::next(),
            payload,
        }
    }

    /// Attaches a header attribute, replacing any previous value for `key`.
    #[inline]
    pub fn with_header(mut self, key: impl Into<Arc<str>>, value: impl Into<Arc<str>>) -> Self {
        self.headers.attributes.insert(key.into(), value.into());
        self
    }

    #[inline]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    #[inline]
    pub fn headers(&self) -> &MessageHeaders {
        &self.headers
    }

    /// Shorthand for `headers().id()`.
    #[inline]
    pub fn id(&self) -> u64 {
        self.headers.id
    }

    pub fn into_payload(self) -> T {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase() {
        let a = Message::new(1);
        let b = Message::new(2);
        assert!(b.id() > a.id());
    }

    #[test]
    fn headers_replace_previous_value() {
        let msg = Message::new(())
            .with_header("k", "one")
            .with_header("k", "two")
            .with_header("a", "first");

        assert_eq!(msg.headers().get("k"), Some("two"));
        assert_eq!(msg.headers().len(), 2);
        let keys: Vec<&str> = msg.headers().iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "k"]);
    }

    #[test]
    fn clone_keeps_identity() {
        let msg = Message::new(String::from("payload"));
        let copy = msg.clone();
        assert_eq!(copy.id(), msg.id());
        assert_eq!(copy.into_payload(), "payload");
    }
}
