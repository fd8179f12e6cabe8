//! # Function-backed consumer (`ConsumerFn`)
//!
//! [`ConsumerFn`] wraps a closure `F: Fn(&Message<T>) -> Result<Outcome, ConsumerError>`.
//! If the closure needs shared state, capture an `Arc<...>` explicitly.
//!
//! ## Example
//! ```rust
//! use courier::{ConsumerFn, ConsumerRef, Outcome};
//!
//! let c: ConsumerRef<String> = ConsumerFn::arc("printer", |msg: &courier::Message<String>| {
//!     println!("{}", msg.payload());
//!     Ok(Outcome::Consumed)
//! });
//!
//! assert_eq!(c.name(), "printer");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::consumers::{Consume, Outcome};
use crate::error::ConsumerError;
use crate::messages::Message;

/// Function-backed consumer implementation.
pub struct ConsumerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ConsumerFn<F> {
    /// Creates a new function-backed consumer.
    ///
    /// Prefer [`ConsumerFn::arc`] when you immediately need a [`ConsumerRef`](crate::ConsumerRef).
    pub fn new<T>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(&Message<T>) -> Result<Outcome, ConsumerError>,
    {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the consumer and returns it as a shared handle.
    pub fn arc<T>(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self>
    where
        F: Fn(&Message<T>) -> Result<Outcome, ConsumerError>,
    {
        Arc::new(Self::new(name, f))
    }
}

impl<F> fmt::Debug for ConsumerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsumerFn").field("name", &self.name).finish()
    }
}

impl<T, F> Consume<T> for ConsumerFn<F>
where
    F: Fn(&Message<T>) -> Result<Outcome, ConsumerError> + Send + Sync + 'static,
    T: 'static,
{
    fn accept(&self, message: &Message<T>) -> Result<Outcome, ConsumerError> {
        (self.f)(message)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConsumerRef;

    #[test]
    fn closure_decides_outcome() {
        let c: ConsumerRef<i32> = ConsumerFn::arc("positive", |m: &Message<i32>| {
            Ok(Outcome::from(*m.payload() > 0))
        });

        assert_eq!(c.accept(&Message::new(5)).unwrap(), Outcome::Consumed);
        assert_eq!(c.accept(&Message::new(-5)).unwrap(), Outcome::Declined);
        assert_eq!(c.name(), "positive");
    }

    #[test]
    fn closure_errors_pass_through() {
        let c = ConsumerFn::new("broken", |_: &Message<()>| Err(ConsumerError::fail("nope")));
        let err = c.accept(&Message::new(())).unwrap_err();
        assert_eq!(err.as_label(), "consumer_failed");
    }
}
