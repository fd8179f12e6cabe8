//! Error types used by consumers, executors and channels.
//!
//! This module defines three error enums:
//!
//! - [`ConsumerError`] - a consumer failed while handling a message (not a decline).
//! - [`SubmitError`] - an execution strategy refused or lost a unit of work.
//! - [`ChannelError`] - a [`QueueChannel`](crate::QueueChannel) could not accept a message.
//!
//! All types provide helper methods (`as_label`, `as_message`) for logging/metrics.
//! None of them ever escapes [`Dispatcher::dispatch`](crate::Dispatcher::dispatch):
//! the dispatcher logs them and folds them into its boolean result.

use std::time::Duration;
use thiserror::Error;

/// # Errors raised by a consumer while handling a message.
///
/// A consumer that simply does not want a message returns
/// [`Outcome::Declined`](crate::Outcome::Declined); this type is reserved
/// for genuine invocation failures.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConsumerError {
    /// Consumer reported a failure.
    #[error("consumer failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Consumer panicked; the panic was caught by the dispatcher.
    #[error("consumer panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },

    /// I/O failure inside the consumer (e.g. a broken output stream).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConsumerError {
    /// Shorthand for [`ConsumerError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        ConsumerError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use courier::ConsumerError;
    ///
    /// let err = ConsumerError::fail("boom");
    /// assert_eq!(err.as_label(), "consumer_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConsumerError::Fail { .. } => "consumer_failed",
            ConsumerError::Panicked { .. } => "consumer_panicked",
            ConsumerError::Io(_) => "consumer_io",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ConsumerError::Fail { error } => format!("error: {error}"),
            ConsumerError::Panicked { info } => format!("panic: {info}"),
            ConsumerError::Io(err) => format!("io: {err}"),
        }
    }
}

/// # Errors produced when submitting work to an execution strategy.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SubmitError {
    /// The executor was shut down and no longer accepts work.
    #[error("executor `{executor}` is shut down")]
    ShutDown {
        /// Name of the refusing executor.
        executor: &'static str,
    },

    /// No Tokio runtime is available to build a pool executor from.
    #[error("no tokio runtime available in the current context")]
    NoRuntime,

    /// The job was accepted but never reported back (runtime shutdown, cancelled join).
    #[error("job lost: {reason}")]
    Lost {
        /// Why the job result is unavailable.
        reason: String,
    },
}

impl SubmitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SubmitError::ShutDown { .. } => "submit_shut_down",
            SubmitError::NoRuntime => "submit_no_runtime",
            SubmitError::Lost { .. } => "submit_lost",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SubmitError::ShutDown { executor } => format!("shut down: {executor}"),
            SubmitError::NoRuntime => "no runtime".to_string(),
            SubmitError::Lost { reason } => format!("lost: {reason}"),
        }
    }
}

/// # Errors produced when sending into a [`QueueChannel`](crate::QueueChannel).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The queue is at capacity and the send was non-blocking.
    #[error("channel full")]
    Full,

    /// The queue stayed full for the whole send timeout.
    #[error("send timed out after {timeout:?}")]
    Timeout {
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// All receiving ends are gone.
    #[error("channel disconnected")]
    Disconnected,
}

impl ChannelError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use courier::ChannelError;
    ///
    /// assert_eq!(ChannelError::Full.as_label(), "channel_full");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ChannelError::Full => "channel_full",
            ChannelError::Timeout { .. } => "channel_timeout",
            ChannelError::Disconnected => "channel_disconnected",
        }
    }

    /// Indicates whether retrying the send later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, ChannelError::Full | ChannelError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(ConsumerError::fail("x").as_label(), "consumer_failed");
        assert_eq!(
            ConsumerError::Panicked { info: "p".into() }.as_label(),
            "consumer_panicked"
        );
        assert_eq!(SubmitError::NoRuntime.as_label(), "submit_no_runtime");
        assert_eq!(
            ChannelError::Timeout {
                timeout: Duration::from_millis(5)
            }
            .as_label(),
            "channel_timeout"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let err: ConsumerError = io.into();
        assert_eq!(err.as_label(), "consumer_io");
        assert!(err.as_message().contains("pipe"));
    }

    #[test]
    fn only_capacity_errors_are_transient() {
        assert!(ChannelError::Full.is_transient());
        assert!(!ChannelError::Disconnected.is_transient());
    }
}
