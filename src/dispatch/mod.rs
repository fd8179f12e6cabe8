//! Dispatcher core: subscriber registry, policies and delivery.
//!
//! ## Contents
//! - [`SubscriberRegistry`] copy-on-write consumer set with lock-free [`Snapshot`]s
//! - [`DispatchPolicy`] broadcast vs. first-success
//! - [`Dispatcher`], [`DispatcherBuilder`] deliver one message to a snapshot
//! - [`DispatchReport`], [`DispatchOutcome`] what happened during one dispatch

mod dispatcher;
mod policy;
mod registry;
mod report;

pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use policy::DispatchPolicy;
pub use registry::{Snapshot, SubscriberRegistry};
pub use report::{DispatchOutcome, DispatchReport};
