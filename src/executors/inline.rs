use super::{Execute, Job, Submission};

/// Runs every job on the calling thread before `submit` returns.
///
/// This is the dispatcher default: `dispatch` reflects the synchronous outcome of each consumer.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineExecutor;

impl Execute for InlineExecutor {
    #[inline]
    fn submit(&self, job: Job) -> Submission {
        Submission::Completed(job())
    }

    fn name(&self) -> &'static str {
        "inline"
    }
}
