//! # Message consumers.
//!
//! This module provides the [`Consume`] trait and built-in implementations
//! that a [`Dispatcher`](crate::Dispatcher) delivers messages to.
//!
//! ## Architecture
//! ```text
//! Dispatcher::dispatch(msg) ──► snapshot ──► Consume::accept(&Message)
//!                                                │
//!                                        ┌───────┼──────────┬─────────┐
//!                                        ▼       ▼          ▼         ▼
//!                                  ConsumerFn  StreamTarget  Custom   ...
//! ```
//!
//! ## Consumer types
//! - **Closures** - wrap any `Fn(&Message<T>)` with [`ConsumerFn`]
//! - **Writers** - [`StreamTarget`] prints payloads (feature `stream`)
//! - **Custom** - implement [`Consume`] directly

mod consume;
mod consumer_fn;
#[cfg(feature = "stream")]
mod stream;

pub use consume::{Consume, ConsumerRef, Outcome, same_consumer};
pub use consumer_fn::ConsumerFn;
#[cfg(feature = "stream")]
pub use stream::StreamTarget;
