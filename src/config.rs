//! # Poller configuration.
//!
//! Provides [`PollerConfig`] settings for a [`ChannelPoller`](crate::ChannelPoller).
//!
//! ## Sentinel values
//! - `max_messages_per_poll = 0` → drain until the source is empty
//! - `receive_timeout = 0s` → non-blocking receive
//! - `interval = 0s` → polls run back to back when spawned

use std::time::Duration;

/// Configuration for a polling loop.
///
/// ## Field semantics
/// - `max_messages_per_poll`: upper bound of messages handled by one `run()` (`0` = unlimited)
/// - `receive_timeout`: how long each receive may wait for a message (`0s` = don't wait)
/// - `interval`: pause between two `run()` calls of a spawned poller
///
/// ## Notes
/// All fields are public. Prefer the helper accessors over sprinkling sentinel
/// checks (`0`) across the codebase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollerConfig {
    /// Maximum messages received per poll.
    ///
    /// - `0` = keep receiving until the source yields nothing
    /// - `n > 0` = stop after `n` messages even if more are queued
    pub max_messages_per_poll: usize,

    /// Per-receive wait.
    ///
    /// A poll ends early as soon as one receive comes back empty.
    pub receive_timeout: Duration,

    /// Delay between polls for [`ChannelPoller::spawn`](crate::ChannelPoller::spawn).
    pub interval: Duration,
}

impl PollerConfig {
    /// Returns the per-poll message limit as an `Option`.
    ///
    /// - `None` → unlimited
    /// - `Some(n)` → at most `n` messages
    #[inline]
    pub fn message_limit(&self) -> Option<usize> {
        if self.max_messages_per_poll == 0 {
            None
        } else {
            Some(self.max_messages_per_poll)
        }
    }

    /// Returns the poll interval as an `Option`.
    ///
    /// - `None` → back to back
    /// - `Some(d)` → sleep `d` between polls
    #[inline]
    pub fn poll_interval(&self) -> Option<Duration> {
        if self.interval.is_zero() {
            None
        } else {
            Some(self.interval)
        }
    }

    #[must_use]
    pub fn with_max_messages_per_poll(mut self, n: usize) -> Self {
        self.max_messages_per_poll = n;
        self
    }

    #[must_use]
    pub fn with_receive_timeout(mut self, timeout: Duration) -> Self {
        self.receive_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

impl Default for PollerConfig {
    /// Default configuration:
    ///
    /// - `max_messages_per_poll = 1` (one message per poll)
    /// - `receive_timeout = 1s`
    /// - `interval = 1s`
    fn default() -> Self {
        Self {
            max_messages_per_poll: 1,
            receive_timeout: Duration::from_secs(1),
            interval: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_map_to_none() {
        let cfg = PollerConfig::default()
            .with_max_messages_per_poll(0)
            .with_interval(Duration::ZERO);
        assert_eq!(cfg.message_limit(), None);
        assert_eq!(cfg.poll_interval(), None);
    }

    #[test]
    fn defaults() {
        let cfg = PollerConfig::default();
        assert_eq!(cfg.message_limit(), Some(1));
        assert_eq!(cfg.receive_timeout, Duration::from_secs(1));
        assert_eq!(cfg.poll_interval(), Some(Duration::from_secs(1)));
    }
}
