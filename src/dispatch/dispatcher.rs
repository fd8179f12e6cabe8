//! # Message dispatcher.
//!
//! [`Dispatcher`] delivers one message at a time to a snapshot of its subscribers, using a
//! [`DispatchPolicy`] to decide how far to go and an [`Execute`] strategy to decide where
//! each consumer runs.
//!
//! ## Architecture
//! ```text
//! dispatch(msg)
//!     │
//!     ├─► registry.snapshot()                 (lock-free, frozen for this call)
//!     │
//!     └─► for consumer in snapshot (in order):
//!             job = || invoke(consumer, msg)   (catches errors + panics, logs them)
//!             submission = executor.submit(job)
//!             report.record(submission)
//!             FirstSuccess && (Consumed | Submitted) ─► stop
//! ```
//!
//! ## Rules
//! - Consumers added after the snapshot may miss the message; consumers removed after
//!   it may still get it.
//! - A failing or panicking consumer never stops delivery to the others and never
//!   surfaces as an error from `dispatch`.
//! - Broadcast submits jobs in snapshot order; completion order depends on the executor.
//! - The dispatcher keeps no per-message state between calls.
//!
//! ## Example
//! ```rust
//! use courier::{ConsumerFn, ConsumerRef, DispatchPolicy, Dispatcher, Message, Outcome};
//!
//! let dispatcher = Dispatcher::new(DispatchPolicy::FirstSuccess);
//!
//! let picky: ConsumerRef<&str> = ConsumerFn::arc("picky", |m: &Message<&str>| {
//!     Ok(Outcome::from(m.payload().starts_with('x')))
//! });
//! let fallback: ConsumerRef<&str> = ConsumerFn::arc("fallback", |_: &Message<&str>| {
//!     Ok(Outcome::Consumed)
//! });
//!
//! dispatcher.subscribe(picky);
//! dispatcher.subscribe(fallback);
//! assert!(dispatcher.dispatch(Message::new("hello")));
//! ```

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::consumers::{Consume, ConsumerRef, Outcome};
use crate::dispatch::{DispatchPolicy, DispatchReport, Snapshot, SubscriberRegistry};
use crate::error::ConsumerError;
use crate::executors::{Delivery, Execute, InlineExecutor, Job, Submission};
use crate::messages::Message;

/// Delivers messages to a dynamic set of consumers.
pub struct Dispatcher<T> {
    policy: DispatchPolicy,
    registry: SubscriberRegistry<T>,
    executor: Arc<dyn Execute>,
}

impl<T> Dispatcher<T>
where
    T: Send + Sync + 'static,
{
    /// Creates a dispatcher that runs consumers inline on the caller's thread.
    pub fn new(policy: DispatchPolicy) -> Self {
        Self::builder(policy).build()
    }

    /// Starts building a dispatcher with the given policy.
    pub fn builder(policy: DispatchPolicy) -> DispatcherBuilder<T> {
        DispatcherBuilder::new(policy)
    }

    #[inline]
    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Name of the configured execution strategy.
    #[inline]
    pub fn executor_name(&self) -> &'static str {
        self.executor.name()
    }

    /// Registers a consumer. Returns `true` if it was not registered yet.
    pub fn subscribe(&self, consumer: ConsumerRef<T>) -> bool {
        self.registry.subscribe(consumer)
    }

    /// Removes a consumer. Returns `true` if it was registered.
    pub fn unsubscribe(&self, consumer: &ConsumerRef<T>) -> bool {
        self.registry.unsubscribe(consumer)
    }

    /// Current subscribers as an immutable snapshot.
    pub fn subscribers(&self) -> Snapshot<T> {
        self.registry.snapshot()
    }

    /// Delivers `message` according to the policy.
    ///
    /// Returns `false` when nobody consumed it, including when there are no subscribers.
    /// Use [`dispatch_report`](Self::dispatch_report) to tell those cases apart.
    pub fn dispatch(&self, message: impl Into<Arc<Message<T>>>) -> bool {
        self.dispatch_report(message).is_delivered()
    }

    /// Delivers `message` and returns per-outcome counters.
    pub fn dispatch_report(&self, message: impl Into<Arc<Message<T>>>) -> DispatchReport {
        let message = message.into();
        let snapshot = self.registry.snapshot();
        let mut report = DispatchReport::default();

        for consumer in snapshot.iter() {
            let submission = self
                .executor
                .submit(delivery_job(Arc::clone(consumer), Arc::clone(&message)));

            if let Submission::Rejected(err) = &submission {
                tracing::warn!(
                    consumer = consumer.name(),
                    message_id = message.id(),
                    executor = self.executor.name(),
                    label = err.as_label(),
                    error = err.as_message(),
                    "delivery rejected by executor"
                );
            }
            report.record(&submission);

            if self.policy == DispatchPolicy::FirstSuccess && stops_first_success(&submission) {
                break;
            }
        }

        tracing::debug!(
            message_id = message.id(),
            policy = %self.policy,
            subscribers = snapshot.len(),
            attempted = report.attempted,
            consumed = report.consumed,
            submitted = report.submitted,
            failed = report.failed,
            "dispatch finished"
        );
        report
    }
}

impl<T: 'static> fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("policy", &self.policy)
            .field("executor", &self.executor.name())
            .field("subscribers", &self.registry)
            .finish()
    }
}

/// Builder for [`Dispatcher`].
pub struct DispatcherBuilder<T> {
    policy: DispatchPolicy,
    executor: Option<Arc<dyn Execute>>,
    subscribers: Vec<ConsumerRef<T>>,
}

impl<T> DispatcherBuilder<T>
where
    T: Send + Sync + 'static,
{
    pub fn new(policy: DispatchPolicy) -> Self {
        Self {
            policy,
            executor: None,
            subscribers: Vec::new(),
        }
    }

    /// Runs consumer invocations through `executor` instead of inline.
    pub fn with_executor(self, executor: impl Execute) -> Self {
        self.with_shared_executor(Arc::new(executor))
    }

    /// Like [`with_executor`](Self::with_executor), for an executor shared between dispatchers.
    pub fn with_shared_executor(mut self, executor: Arc<dyn Execute>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Initial subscribers (duplicates by identity are dropped).
    pub fn with_subscribers(mut self, subscribers: Vec<ConsumerRef<T>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    pub fn build(self) -> Dispatcher<T> {
        let registry = SubscriberRegistry::new();
        for consumer in self.subscribers {
            registry.subscribe(consumer);
        }
        Dispatcher {
            policy: self.policy,
            registry,
            executor: self.executor.unwrap_or_else(|| Arc::new(InlineExecutor)),
        }
    }
}

fn stops_first_success(submission: &Submission) -> bool {
    match submission {
        Submission::Completed(delivery) => delivery.is_consumed(),
        Submission::Submitted => true,
        Submission::Rejected(_) => false,
    }
}

fn delivery_job<T>(consumer: ConsumerRef<T>, message: Arc<Message<T>>) -> Job
where
    T: Send + Sync + 'static,
{
    Box::new(move || invoke(consumer.as_ref(), &message))
}

/// Runs one consumer, turning errors and panics into [`Delivery::Failed`].
fn invoke<T: 'static>(consumer: &dyn Consume<T>, message: &Message<T>) -> Delivery {
    match panic::catch_unwind(AssertUnwindSafe(|| consumer.accept(message))) {
        Ok(Ok(Outcome::Consumed)) => Delivery::Consumed,
        Ok(Ok(Outcome::Declined)) => Delivery::Declined,
        Ok(Err(err)) => {
            tracing::warn!(
                consumer = consumer.name(),
                message_id = message.id(),
                error = %err,
                label = err.as_label(),
                "consumer failed"
            );
            Delivery::Failed(err)
        }
        Err(payload) => {
            let err = ConsumerError::Panicked {
                info: panic_info(payload.as_ref()),
            };
            tracing::error!(
                consumer = consumer.name(),
                message_id = message.id(),
                error = %err,
                "consumer panicked"
            );
            Delivery::Failed(err)
        }
    }
}

fn panic_info(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
