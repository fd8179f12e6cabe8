//! # Per-dispatch outcome counters.
//!
//! [`DispatchReport`] is what [`Dispatcher::dispatch_report`](crate::Dispatcher::dispatch_report)
//! returns. `Dispatcher::dispatch` collapses it to [`DispatchReport::is_delivered`].
//!
//! ## Counters
//! - `attempted`: jobs submitted to the executor (≤ snapshot size)
//! - `consumed` / `declined` / `failed`: outcomes observed synchronously
//! - `submitted`: jobs handed off to a detached executor (outcome unknown)
//! - `rejected`: jobs the executor refused or lost

use crate::executors::{Delivery, Submission};

/// Coarse classification of a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The snapshot was empty.
    NoSubscribers,
    /// At least one consumer consumed the message, or a delivery was handed off.
    Delivered,
    /// Every attempted consumer declined, failed, or was rejected.
    Declined,
}

/// Counters for a single dispatch call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub attempted: usize,
    pub consumed: usize,
    pub declined: usize,
    pub failed: usize,
    pub submitted: usize,
    pub rejected: usize,
}

impl DispatchReport {
    pub(crate) fn record(&mut self, submission: &Submission) {
        self.attempted += 1;
        match submission {
            Submission::Completed(Delivery::Consumed) => self.consumed += 1,
            Submission::Completed(Delivery::Declined) => self.declined += 1,
            Submission::Completed(Delivery::Failed(_)) => self.failed += 1,
            Submission::Submitted => self.submitted += 1,
            Submission::Rejected(_) => self.rejected += 1,
        }
    }

    /// True if a consumer consumed the message or a delivery was handed off.
    #[inline]
    pub fn is_delivered(&self) -> bool {
        self.consumed > 0 || self.submitted > 0
    }

    pub fn outcome(&self) -> DispatchOutcome {
        if self.attempted == 0 {
            DispatchOutcome::NoSubscribers
        } else if self.is_delivered() {
            DispatchOutcome::Delivered
        } else {
            DispatchOutcome::Declined
        }
    }
}
