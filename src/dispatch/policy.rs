//! # Dispatch policies.
//!
//! [`DispatchPolicy`] decides how many consumers of a snapshot receive a message.
//!
//! ```text
//! Broadcast     → every consumer in the snapshot, in snapshot order
//! FirstSuccess  → consumers in snapshot order until one consumes the message
//! ```
//!
//! No `Default`: a dispatcher is always built with an explicit policy.

use std::fmt;

/// Delivery policy for a [`Dispatcher`](crate::Dispatcher).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchPolicy {
    /// Deliver to all subscribers; succeed if at least one consumed.
    Broadcast,
    /// Deliver in order until the first subscriber consumes.
    FirstSuccess,
}

impl DispatchPolicy {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchPolicy::Broadcast => "broadcast",
            DispatchPolicy::FirstSuccess => "first_success",
        }
    }
}

impl fmt::Display for DispatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}
