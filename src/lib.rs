//! # courier
//!
//! **Courier** is a lightweight in-process message dispatcher for Rust.
//!
//! It delivers messages from an upstream source to a dynamic set of consumers,
//! optionally running each delivery on a worker pool instead of the calling thread.
//! Consumers may subscribe or unsubscribe at any time, including while a dispatch is
//! in flight; every dispatch works on a consistent snapshot of subscribers.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   producers                                   ┌───────────────────────────────┐
//!   ──► QueueChannel ──► ChannelPoller::run() ─►│ Dispatcher                    │
//!       (MessageSource)   (batch, timeout)      │  - DispatchPolicy             │
//!                                               │  - SubscriberRegistry         │
//!   or call Dispatcher::dispatch(msg) directly ►│  - Execute (inline / pool)    │
//!                                               └──────────────┬────────────────┘
//!                                                              ▼
//!                                                 snapshot (Arc<Vec<ConsumerRef>>)
//!                                                ┌─────────────┼─────────────┐
//!                                                ▼             ▼             ▼
//!                                              job 1         job 2         job N
//!                                                ▼             ▼             ▼
//!                                        executor.submit executor.submit executor.submit
//!                                                ▼             ▼             ▼
//!                                          c1.accept()   c2.accept()   cN.accept()
//! ```
//!
//! ### Dispatch
//! ```text
//! dispatch(msg)
//!   ├─► snapshot = registry.snapshot()        (lock-free)
//!   ├─► for consumer in snapshot:
//!   │       submission = executor.submit(job(consumer, msg))
//!   │       ├─ Completed(Consumed)  ─► FirstSuccess: stop
//!   │       ├─ Completed(Declined)  ─► next
//!   │       ├─ Completed(Failed)    ─► logged, next
//!   │       ├─ Submitted            ─► FirstSuccess: stop (handed off)
//!   │       └─ Rejected             ─► logged, next
//!   └─► true iff something was consumed or handed off
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                          |
//! |-------------------|---------------------------------------------------------------|---------------------------------------------|
//! | **Consumers**     | Handle or decline messages.                                   | [`Consume`], [`ConsumerFn`], [`Outcome`]    |
//! | **Dispatch**      | Broadcast or first-success delivery to a snapshot.            | [`Dispatcher`], [`DispatchPolicy`]          |
//! | **Registry**      | Copy-on-write subscriber set with lock-free snapshots.        | [`SubscriberRegistry`]                      |
//! | **Execution**     | Inline or worker-pool delivery.                               | [`Execute`], [`InlineExecutor`], [`PoolExecutor`] |
//! | **Sources**       | Queue and poller feeding a dispatcher.                        | [`QueueChannel`], [`ChannelPoller`]         |
//! | **Errors**        | Typed errors for consumers, executors and channels.           | [`ConsumerError`], [`SubmitError`], [`ChannelError`] |
//!
//! ## Optional features
//! - `stream` (default): exports [`StreamTarget`], a consumer writing payloads to an `io::Write`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use courier::{ConsumerFn, ConsumerRef, DispatchPolicy, Dispatcher, Message, Outcome};
//!
//! let dispatcher = Dispatcher::new(DispatchPolicy::Broadcast);
//!
//! let audit: ConsumerRef<String> = ConsumerFn::arc("audit", |m: &Message<String>| {
//!     println!("audit: {}", m.payload());
//!     Ok(Outcome::Consumed)
//! });
//! dispatcher.subscribe(Arc::clone(&audit));
//!
//! assert!(dispatcher.dispatch(Message::new("hello".to_string())));
//!
//! dispatcher.unsubscribe(&audit);
//! assert!(!dispatcher.dispatch(Message::new("nobody listens".to_string())));
//! ```
mod config;
mod consumers;
mod dispatch;
mod error;
mod executors;
mod messages;
mod poller;

// ---- Public re-exports ----

pub use config::PollerConfig;
pub use consumers::{Consume, ConsumerFn, ConsumerRef, Outcome, same_consumer};
pub use dispatch::{
    DispatchOutcome, DispatchPolicy, DispatchReport, Dispatcher, DispatcherBuilder, Snapshot,
    SubscriberRegistry,
};
pub use error::{ChannelError, ConsumerError, SubmitError};
pub use executors::{Delivery, Execute, InlineExecutor, Job, PoolExecutor, PoolMode, Submission};
pub use messages::{Message, MessageHeaders, MessageSource, QueueChannel};
pub use poller::ChannelPoller;

// Optional: expose the built-in stream writer consumer.
// Disable with: `--no-default-features`
#[cfg(feature = "stream")]
pub use consumers::StreamTarget;
