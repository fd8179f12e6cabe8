//! # In-memory message queue.
//!
//! [`QueueChannel`] is a thin wrapper around a `flume` MPMC channel that implements
//! [`MessageSource`]. Any number of producers may `send`; any number of pollers may
//! `receive`, each message going to exactly one receiver.
//!
//! ## Rules
//! - `capacity = 0` → unbounded queue.
//! - `timeout = 0s` → non-blocking send/receive.
//! - The channel owns both ends, so it never reports `Disconnected` while alive.

use std::fmt;
use std::time::Duration;

use flume::{Receiver, RecvTimeoutError, SendTimeoutError, Sender, TrySendError};

use crate::error::ChannelError;
use crate::messages::{Message, MessageSource};

/// Cloneable FIFO queue of messages.
pub struct QueueChannel<T> {
    tx: Sender<Message<T>>,
    rx: Receiver<Message<T>>,
    capacity: usize,
}

impl<T> QueueChannel<T> {
    /// Creates a queue holding at most `capacity` messages (`0` = unbounded).
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = if capacity == 0 {
            flume::unbounded()
        } else {
            flume::bounded(capacity)
        };
        Self { tx, rx, capacity }
    }

    /// Creates an unbounded queue.
    pub fn unbounded() -> Self {
        Self::new(0)
    }

    /// Enqueues a message, waiting up to `timeout` for free space.
    ///
    /// - `Duration::ZERO` never blocks and yields [`ChannelError::Full`] on a full queue.
    /// - A positive timeout yields [`ChannelError::Timeout`] if no space frees up in time.
    pub fn send(&self, message: Message<T>, timeout: Duration) -> Result<(), ChannelError> {
        if timeout.is_zero() {
            return self.tx.try_send(message).map_err(|e| match e {
                TrySendError::Full(_) => ChannelError::Full,
                TrySendError::Disconnected(_) => ChannelError::Disconnected,
            });
        }
        self.tx.send_timeout(message, timeout).map_err(|e| match e {
            SendTimeoutError::Timeout(_) => ChannelError::Timeout { timeout },
            SendTimeoutError::Disconnected(_) => ChannelError::Disconnected,
        })
    }

    /// Enqueues a message without waiting.
    pub fn try_send(&self, message: Message<T>) -> Result<(), ChannelError> {
        self.send(message, Duration::ZERO)
    }

    /// Number of queued messages.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Configured capacity as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(n)` → at most `n` queued messages
    pub fn capacity(&self) -> Option<usize> {
        if self.capacity == 0 {
            None
        } else {
            Some(self.capacity)
        }
    }
}

impl<T> Clone for QueueChannel<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            rx: self.rx.clone(),
            capacity: self.capacity,
        }
    }
}

impl<T> fmt::Debug for QueueChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueChannel")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish()
    }
}

impl<T: Send + 'static> MessageSource<T> for QueueChannel<T> {
    fn receive(&self, timeout: Duration) -> Option<Message<T>> {
        if timeout.is_zero() {
            return self.rx.try_recv().ok();
        }
        match self.rx.recv_timeout(timeout) {
            Ok(message) => Some(message),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let ch = QueueChannel::new(4);
        ch.try_send(Message::new("foo")).unwrap();
        ch.try_send(Message::new("bar")).unwrap();

        assert_eq!(ch.len(), 2);
        assert_eq!(*ch.receive(Duration::ZERO).unwrap().payload(), "foo");
        assert_eq!(*ch.receive(Duration::ZERO).unwrap().payload(), "bar");
        assert!(ch.receive(Duration::ZERO).is_none());
    }

    #[test]
    fn full_queue_rejects_without_blocking() {
        let ch = QueueChannel::new(1);
        ch.try_send(Message::new(1)).unwrap();
        assert_eq!(ch.try_send(Message::new(2)), Err(ChannelError::Full));
    }

    #[test]
    fn full_queue_times_out() {
        let ch = QueueChannel::new(1);
        ch.try_send(Message::new(1)).unwrap();
        let err = ch
            .send(Message::new(2), Duration::from_millis(10))
            .unwrap_err();
        assert_eq!(
            err,
            ChannelError::Timeout {
                timeout: Duration::from_millis(10)
            }
        );
    }

    #[test]
    fn receive_waits_for_timeout_then_gives_up() {
        let ch: QueueChannel<u8> = QueueChannel::unbounded();
        assert!(ch.capacity().is_none());
        assert!(ch.receive(Duration::from_millis(5)).is_none());
    }

    #[test]
    fn clones_share_the_queue() {
        let producer = QueueChannel::new(8);
        let consumer = producer.clone();
        producer.try_send(Message::new(7u32)).unwrap();
        assert_eq!(consumer.receive(Duration::ZERO).map(Message::into_payload), Some(7));
        assert!(producer.is_empty());
    }
}
