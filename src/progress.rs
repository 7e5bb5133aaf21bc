//! Progress reporting for changelog runs

use crate::types::{CommitLogEntry, PrCommit};
use async_trait::async_trait;

/// Receives progress updates while a run executes
///
/// The CLI renders these to the terminal; tests and library callers can use
/// [`NoopProgress`].
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// A commit is about to be summarized (`index` is zero-based)
    async fn on_commit_started(&self, _commit: &PrCommit, _index: usize, _total: usize) {}

    /// An entry was generated and appended to the log
    async fn on_entry_generated(&self, _entry: &CommitLogEntry) {}

    /// Free-form status message
    async fn on_message(&self, message: &str);
}

/// Progress callback that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_message(&self, _message: &str) {}
}
