//! Execution strategies.
//!
//! This module groups the knobs that control **where** a consumer invocation runs.
//!
//! ## Contents
//! - [`Execute`] the single `submit(job)` operation every strategy implements
//! - [`InlineExecutor`] run on the caller's thread (default)
//! - [`PoolExecutor`] run on the Tokio blocking pool, detached or awaited ([`PoolMode`])
//!
//! ## Quick wiring
//! ```text
//! Dispatcher::builder(policy).with_executor(Arc<dyn Execute>)
//!      └─► every consumer invocation becomes one Job ─► executor.submit(job)
//! ```

mod execute;
mod inline;
mod pool;

pub use execute::{Delivery, Execute, Job, Submission};
pub use inline::InlineExecutor;
pub use pool::{PoolExecutor, PoolMode};
