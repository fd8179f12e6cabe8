//! # Worker-pool executor.
//!
//! [`PoolExecutor`] runs each job on Tokio's blocking thread pool. Consumers are synchronous
//! and may block, so jobs go through `spawn_blocking` rather than onto async workers.
//!
//! ## Modes
//! - [`PoolMode::Detached`] (default): `submit` returns as soon as the job is spawned.
//!   No ordering between jobs; the dispatcher only learns that the work was handed off.
//!   A job the runtime refuses (it is shutting down or gone) is reported as
//!   [`SubmitError::Lost`] instead.
//! - [`PoolMode::AwaitCompletion`]: `submit` spawns the job and then blocks the caller until
//!   it finishes, so `dispatch` again reflects consumer outcomes.
//!
//! ## Shutdown
//! [`PoolExecutor::shutdown`] makes later submissions fail with
//! [`SubmitError::ShutDown`]; jobs already spawned keep running.
//!
//! **Warning**: `AwaitCompletion` parks the calling thread until the job is done. The job
//! itself runs on the separate blocking pool, but an async task that dispatches in this
//! mode holds its worker for that whole time. From a `multi_thread` runtime, wrap the
//! dispatch in `tokio::task::block_in_place`.

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use super::{Execute, Job, Submission};
use crate::error::SubmitError;

/// How [`PoolExecutor::submit`] treats a spawned job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PoolMode {
    /// Fire-and-forget.
    #[default]
    Detached,
    /// Wait for the job and report its delivery.
    AwaitCompletion,
}

/// Delegates jobs to the Tokio blocking pool.
#[derive(Debug, Clone)]
pub struct PoolExecutor {
    handle: Handle,
    mode: PoolMode,
    token: CancellationToken,
}

impl PoolExecutor {
    /// Creates a detached pool executor on the given runtime.
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            mode: PoolMode::default(),
            token: CancellationToken::new(),
        }
    }

    /// Creates a detached pool executor on the runtime of the current context.
    pub fn try_current() -> Result<Self, SubmitError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| SubmitError::NoRuntime)
    }

    #[must_use]
    pub fn with_mode(mut self, mode: PoolMode) -> Self {
        self.mode = mode;
        self
    }

    #[inline]
    pub fn mode(&self) -> PoolMode {
        self.mode
    }

    /// Stops accepting new jobs. Clones of this executor are shut down too.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    #[inline]
    pub fn is_shut_down(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Execute for PoolExecutor {
    fn submit(&self, job: Job) -> Submission {
        if self.is_shut_down() {
            return Submission::Rejected(SubmitError::ShutDown {
                executor: self.name(),
            });
        }

        let join = self.handle.spawn_blocking(job);
        match self.mode() {
            // A runtime that is shutting down cancels the job on the spot; a job that
            // already finished fine stays a plain hand-off.
            PoolMode::Detached if !join.is_finished() => Submission::Submitted,
            PoolMode::Detached => match futures::executor::block_on(join) {
                Ok(_) => Submission::Submitted,
                Err(join_err) => lost(join_err),
            },
            PoolMode::AwaitCompletion => match futures::executor::block_on(join) {
                Ok(delivery) => Submission::Completed(delivery),
                Err(join_err) => lost(join_err),
            },
        }
    }

    fn name(&self) -> &'static str {
        match self.mode() {
            PoolMode::Detached => "pool",
            PoolMode::AwaitCompletion => "pool-await",
        }
    }
}

fn lost(join_err: tokio::task::JoinError) -> Submission {
    Submission::Rejected(SubmitError::Lost {
        reason: join_err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executors::Delivery;
    use std::thread;
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn detached_jobs_run_off_thread() {
        let pool = PoolExecutor::try_current().unwrap();
        let (tx, rx) = flume::unbounded();
        let caller = thread::current().id();

        for i in 0..4 {
            let tx = tx.clone();
            let sub = pool.submit(Box::new(move || {
                let _ = tx.send((i, thread::current().id()));
                Delivery::Consumed
            }));
            assert!(matches!(sub, Submission::Submitted));
        }

        let mut seen = Vec::new();
        for _ in 0..4 {
            let (i, id) = rx.recv_async().await.unwrap();
            assert_ne!(id, caller);
            seen.push(i);
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn await_mode_reports_delivery() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let pool = PoolExecutor::new(rt.handle().clone()).with_mode(PoolMode::AwaitCompletion);

        let sub = pool.submit(Box::new(|| {
            thread::sleep(Duration::from_millis(10));
            Delivery::Declined
        }));
        assert!(matches!(sub, Submission::Completed(Delivery::Declined)));
        assert_eq!(pool.name(), "pool-await");
    }

    #[test]
    fn shut_down_pool_rejects() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let pool = PoolExecutor::new(rt.handle().clone());
        let clone = pool.clone();
        clone.shutdown();

        assert!(pool.is_shut_down());
        let sub = pool.submit(Box::new(|| Delivery::Consumed));
        match sub {
            Submission::Rejected(err) => assert_eq!(err.as_label(), "submit_shut_down"),
            other => panic!("unexpected submission: {other:?}"),
        }
    }

    #[test]
    fn dropped_runtime_loses_detached_jobs() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let pool = PoolExecutor::new(rt.handle().clone());
        drop(rt);

        assert_eq!(pool.mode(), PoolMode::Detached);
        assert!(!pool.is_shut_down());
        let sub = pool.submit(Box::new(|| Delivery::Consumed));
        match sub {
            Submission::Rejected(err) => {
                assert_eq!(err.as_label(), "submit_lost");
                assert!(err.as_message().starts_with("lost: "));
            }
            other => panic!("unexpected submission: {other:?}"),
        }
    }

    #[test]
    fn no_runtime_outside_tokio() {
        assert!(matches!(
            PoolExecutor::try_current(),
            Err(SubmitError::NoRuntime)
        ));
    }
}
