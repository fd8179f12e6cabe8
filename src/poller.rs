//! # Channel poller - drains a message source into a dispatcher.
//!
//! [`ChannelPoller`] is the glue between a [`MessageSource`] and a [`Dispatcher`]:
//! every `run()` receives a batch of messages and dispatches each of them.
//!
//! ## Lifecycle
//! ```text
//! run():
//!   loop {
//!     ├─► limit reached (max_messages_per_poll)?  ─► exit
//!     ├─► source.receive(receive_timeout)
//!     │       └─ None ─► exit (source empty)
//!     └─► dispatcher.dispatch(msg)
//!             └─ false ─► debug log, message dropped
//!   }
//!
//! spawn(token):
//!   loop { spawn_blocking(run) ─► sleep(interval) }   until token cancelled
//! ```
//!
//! ## Rules
//! - Messages nobody consumed are dropped; there is no redelivery.
//! - Cancellation is observed between polls; a poll in progress finishes on its own.

use std::fmt;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::PollerConfig;
use crate::consumers::ConsumerRef;
use crate::dispatch::Dispatcher;
use crate::messages::MessageSource;

/// Polls a message source and dispatches what it receives.
pub struct ChannelPoller<T> {
    source: Arc<dyn MessageSource<T>>,
    dispatcher: Arc<Dispatcher<T>>,
    config: PollerConfig,
}

impl<T> ChannelPoller<T>
where
    T: Send + Sync + 'static,
{
    pub fn new(
        source: impl MessageSource<T>,
        dispatcher: Arc<Dispatcher<T>>,
        config: PollerConfig,
    ) -> Self {
        Self {
            source: Arc::new(source),
            dispatcher,
            config,
        }
    }

    /// Registers a consumer on the underlying dispatcher.
    pub fn subscribe(&self, consumer: ConsumerRef<T>) -> bool {
        self.dispatcher.subscribe(consumer)
    }

    /// Removes a consumer from the underlying dispatcher.
    pub fn unsubscribe(&self, consumer: &ConsumerRef<T>) -> bool {
        self.dispatcher.unsubscribe(consumer)
    }

    #[inline]
    pub fn dispatcher(&self) -> &Arc<Dispatcher<T>> {
        &self.dispatcher
    }

    #[inline]
    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Runs one poll and returns the number of messages received.
    ///
    /// Blocks for up to `receive_timeout` per receive.
    pub fn run(&self) -> usize {
        let limit = self.config.message_limit();
        let mut received = 0;

        while limit.map_or(true, |n| received < n) {
            let Some(message) = self.source.receive(self.config.receive_timeout) else {
                break;
            };
            received += 1;

            let message_id = message.id();
            if !self.dispatcher.dispatch(message) {
                tracing::debug!(message_id, "message not consumed; dropped");
            }
        }

        tracing::trace!(received, "poll finished");
        received
    }

    /// Spawns a Tokio task that calls [`run`](Self::run) every `interval` until `token`
    /// is cancelled.
    ///
    /// Must be called from within a Tokio runtime. Each poll runs on the blocking pool.
    pub fn spawn(self: Arc<Self>, token: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let me = Arc::clone(&self);
                let polled = tokio::select! {
                    _ = token.cancelled() => break,
                    res = tokio::task::spawn_blocking(move || me.run()) => res,
                };
                if let Err(err) = polled {
                    tracing::error!(error = %err, "poll task failed");
                }

                match self.config.poll_interval() {
                    Some(delay) => tokio::select! {
                        _ = token.cancelled() => break,
                        _ = tokio::time::sleep(delay) => {}
                    },
                    None => tokio::task::yield_now().await,
                }
            }
            tracing::debug!("poller stopped");
        })
    }
}

impl<T: 'static> fmt::Debug for ChannelPoller<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelPoller")
            .field("dispatcher", &self.dispatcher)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(all(test, feature = "stream"))]
mod tests {
    use super::*;
    use crate::{DispatchPolicy, Message, QueueChannel, StreamTarget};
    use std::fmt::Display;
    use std::io::{self, Write};
    use std::sync::Mutex;
    use std::time::Duration;

    /// `io::Write` whose contents stay readable after the target is shared.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct TestObject(&'static str);

    impl Display for TestObject {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.0)
        }
    }

    fn setup<T: Send + Sync + 'static>(
        max_per_poll: usize,
    ) -> (QueueChannel<T>, ChannelPoller<T>) {
        let channel = QueueChannel::new(10);
        let dispatcher = Arc::new(Dispatcher::new(DispatchPolicy::Broadcast));
        let config = PollerConfig::default()
            .with_max_messages_per_poll(max_per_poll)
            .with_receive_timeout(Duration::ZERO)
            .with_interval(Duration::ZERO);
        let poller = ChannelPoller::new(channel.clone(), dispatcher, config);
        (channel, poller)
    }

    #[test]
    fn one_message_per_poll_without_newlines() {
        let (channel, poller) = setup::<&'static str>(1);
        let buf = SharedBuf::default();
        poller.subscribe(Arc::new(StreamTarget::new(buf.clone())));

        channel.try_send(Message::new("foo")).unwrap();
        channel.try_send(Message::new("bar")).unwrap();

        assert_eq!(poller.run(), 1);
        assert_eq!(buf.text(), "foo");
        assert_eq!(poller.run(), 1);
        assert_eq!(buf.text(), "foobar");
    }

    #[test]
    fn one_message_per_poll_with_newlines() {
        let (channel, poller) = setup::<&'static str>(1);
        let buf = SharedBuf::default();
        poller.subscribe(Arc::new(StreamTarget::new(buf.clone()).with_newline(true)));

        channel.try_send(Message::new("foo")).unwrap();
        channel.try_send(Message::new("bar")).unwrap();

        poller.run();
        assert_eq!(buf.text(), "foo\n");
        poller.run();
        assert_eq!(buf.text(), "foo\nbar\n");
    }

    #[test]
    fn batch_equal_to_message_count() {
        let (channel, poller) = setup::<&'static str>(2);
        let buf = SharedBuf::default();
        poller.subscribe(Arc::new(StreamTarget::new(buf.clone())));

        channel.try_send(Message::new("foo")).unwrap();
        channel.try_send(Message::new("bar")).unwrap();

        assert_eq!(poller.run(), 2);
        assert_eq!(buf.text(), "foobar");
    }

    #[test]
    fn batch_larger_than_queue_stops_when_empty() {
        let (channel, poller) = setup::<&'static str>(10);
        let buf = SharedBuf::default();
        let target = Arc::new(StreamTarget::new(buf.clone()));
        poller.subscribe(Arc::clone(&target) as ConsumerRef<&'static str>);
        target.set_append_newline(true);

        channel.try_send(Message::new("foo")).unwrap();
        channel.try_send(Message::new("bar")).unwrap();

        assert_eq!(poller.run(), 2);
        assert_eq!(buf.text(), "foo\nbar\n");
        assert_eq!(poller.run(), 0);
    }

    #[test]
    fn non_string_payloads() {
        let (channel, poller) = setup::<TestObject>(2);
        let buf = SharedBuf::default();
        poller.subscribe(Arc::new(StreamTarget::new(buf.clone())));

        channel.try_send(Message::new(TestObject("foo"))).unwrap();
        channel.try_send(Message::new(TestObject("bar"))).unwrap();

        poller.run();
        assert_eq!(buf.text(), "foobar");
    }

    #[test]
    fn unconsumed_messages_are_dropped() {
        let (channel, poller) = setup::<&'static str>(0);
        assert_eq!(poller.config().message_limit(), None);
        assert!(poller.dispatcher().subscribers().is_empty());

        channel.try_send(Message::new("lost")).unwrap();
        assert_eq!(poller.run(), 1);
        assert!(channel.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn spawned_poller_drains_until_cancelled() {
        let (channel, poller) = setup::<&'static str>(0);
        let buf = SharedBuf::default();
        poller.subscribe(Arc::new(StreamTarget::new(buf.clone())));

        let token = CancellationToken::new();
        let handle = Arc::new(poller).spawn(token.clone());

        channel.try_send(Message::new("a")).unwrap();
        channel.try_send(Message::new("b")).unwrap();

        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while buf.text() != "ab" && tokio::time::Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(buf.text(), "ab");

        token.cancel();
        handle.await.unwrap();
    }
}
