use std::time::Duration;

use super::Message;

/// Poll-for-message-or-timeout source drained by a [`ChannelPoller`](crate::ChannelPoller).
///
/// `Duration::ZERO` means "do not wait": return whatever is immediately available.
pub trait MessageSource<T>: Send + Sync + 'static {
    /// Returns the next message, or `None` if nothing arrived within `timeout`.
    fn receive(&self, timeout: Duration) -> Option<Message<T>>;
}
