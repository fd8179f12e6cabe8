//! # Execution strategy trait.
//!
//! The dispatcher turns every (consumer, message) pair into a [`Job`] and hands it to an
//! [`Execute`] implementation. That single `submit` call is the only thing the dispatcher
//! knows about how work actually runs:
//!
//! ```text
//! Dispatcher ── submit(job) ──► InlineExecutor ── job() ──► Submission::Completed(delivery)
//!            └─ submit(job) ──► PoolExecutor   ── spawn ──► Submission::Submitted
//!                                              (await mode) ► Submission::Completed(delivery)
//! ```

use crate::error::{ConsumerError, SubmitError};

/// Result of running one consumer against one message.
#[derive(Debug)]
pub enum Delivery {
    /// Consumer accepted the message.
    Consumed,
    /// Consumer declined the message.
    Declined,
    /// Consumer failed (error returned or panic caught).
    Failed(ConsumerError),
}

impl Delivery {
    #[inline]
    pub fn is_consumed(&self) -> bool {
        matches!(self, Delivery::Consumed)
    }
}

/// A zero-argument unit of work producing a [`Delivery`].
pub type Job = Box<dyn FnOnce() -> Delivery + Send + 'static>;

/// What an executor did with a submitted [`Job`].
#[derive(Debug)]
pub enum Submission {
    /// The job ran to completion before `submit` returned.
    Completed(Delivery),
    /// The job was handed off and will run later; its result is not observed.
    Submitted,
    /// The job was not run (or its result was lost).
    Rejected(SubmitError),
}

/// Pluggable execution strategy.
///
/// ### Implementation requirements
/// - `submit` must not panic; report refusal through [`Submission::Rejected`].
/// - Jobs already catch consumer panics; executors don't need to.
pub trait Execute: Send + Sync + 'static {
    /// Runs or schedules one job.
    fn submit(&self, job: Job) -> Submission;

    /// Returns the executor name used in logs.
    fn name(&self) -> &'static str;
}
