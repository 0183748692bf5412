//! Repository port for the task activity log.

use super::TaskRepositoryResult;
use crate::task::domain::{ActivityEntry, TaskId};
use async_trait::async_trait;

/// Append-only activity log contract.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Appends entries in the given order.
    ///
    /// # Errors
    ///
    /// Returns persistence errors from the underlying store.
    async fn record(&self, entries: &[ActivityEntry]) -> TaskRepositoryResult<()>;

    /// Returns the entries recorded for a task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns persistence errors from the underlying store.
    async fn list_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<ActivityEntry>>;
}
