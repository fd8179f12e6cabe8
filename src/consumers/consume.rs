//! # Consumer trait.
//!
//! Provides [`Consume`] the extension point for plugging message handlers into a
//! [`Dispatcher`](crate::Dispatcher).
//!
//! ## Rules
//! - Returning [`Outcome::Declined`] is the normal "not for me" path; it is not an error.
//! - Returning `Err` (or panicking) marks a genuine failure. The dispatcher logs it and
//!   moves on to the next consumer; it never reaches the caller of `dispatch`.
//! - A consumer may be invoked from several threads at once (concurrent dispatches,
//!   pooled execution), hence `Send + Sync`.
//!
//! ## Identity
//! Consumers are registered as [`ConsumerRef`] (`Arc<dyn Consume<T>>`). Two handles are
//! the same consumer iff they point at the same allocation; see [`same_consumer`].
//!
//! ## Example
//! ```rust
//! use courier::{Consume, ConsumerError, Message, Outcome};
//!
//! struct EvenOnly;
//!
//! impl Consume<u64> for EvenOnly {
//!     fn accept(&self, message: &Message<u64>) -> Result<Outcome, ConsumerError> {
//!         if message.payload() % 2 == 0 {
//!             Ok(Outcome::Consumed)
//!         } else {
//!             Ok(Outcome::Declined)
//!         }
//!     }
//!
//!     fn name(&self) -> &str { "even-only" }
//! }
//! ```

use std::sync::Arc;

use crate::error::ConsumerError;
use crate::messages::Message;

/// Result of a consumer looking at a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The consumer handled the message.
    Consumed,
    /// The consumer chose not to handle the message.
    Declined,
}

impl Outcome {
    #[inline]
    pub fn is_consumed(self) -> bool {
        matches!(self, Outcome::Consumed)
    }
}

impl From<bool> for Outcome {
    fn from(consumed: bool) -> Self {
        if consumed {
            Outcome::Consumed
        } else {
            Outcome::Declined
        }
    }
}

/// Message consumer.
///
/// ### Implementation requirements
/// - Keep `accept` short or use a pooled executor; inline dispatch runs it on the caller's thread.
/// - Do not rely on being called exactly once per message across consumers: broadcast
///   reaches everyone, first-success stops at the first consumer that accepts.
pub trait Consume<T>: Send + Sync + 'static {
    /// Handles or declines one message.
    fn accept(&self, message: &Message<T>) -> Result<Outcome, ConsumerError>;

    /// Returns the consumer name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Shared handle to a registered consumer.
pub type ConsumerRef<T> = Arc<dyn Consume<T>>;

/// Identity comparison for consumer handles (same allocation, vtable ignored).
#[inline]
pub fn same_consumer<T>(a: &ConsumerRef<T>, b: &ConsumerRef<T>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nop;

    impl Consume<()> for Nop {
        fn accept(&self, _: &Message<()>) -> Result<Outcome, ConsumerError> {
            Ok(Outcome::Declined)
        }
    }

    #[test]
    fn identity_is_by_allocation() {
        let a: ConsumerRef<()> = Arc::new(Nop);
        let a2 = Arc::clone(&a);
        let b: ConsumerRef<()> = Arc::new(Nop);

        assert!(same_consumer(&a, &a2));
        assert!(!same_consumer(&a, &b));
    }

    #[test]
    fn default_name_is_type_name() {
        assert!(Nop.name().ends_with("Nop"));
    }

    #[test]
    fn outcome_from_bool() {
        assert_eq!(Outcome::from(true), Outcome::Consumed);
        assert!(!Outcome::from(false).is_consumed());
    }
}
