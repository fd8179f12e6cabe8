//! Message envelope and message sources.
//!
//! ## Contents
//! - [`Message`], [`MessageHeaders`] immutable envelope delivered by the dispatcher
//! - [`MessageSource`] poll-or-timeout interface consumed by the poller
//! - [`QueueChannel`] bounded/unbounded in-memory source backed by `flume`

mod channel;
mod message;
mod source;

pub use channel::QueueChannel;
pub use message::{Message, MessageHeaders};
pub use source::MessageSource;
