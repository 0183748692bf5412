//! In-memory activity log.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{ActivityEntry, TaskId},
    ports::{ActivityRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory activity log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityRepository {
    entries: Arc<RwLock<Vec<ActivityEntry>>>,
}

impl InMemoryActivityRepository {
    /// Creates an empty activity log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn record(&self, entries: &[ActivityEntry]) -> TaskRepositoryResult<()> {
        let mut log = self.entries.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        log.extend_from_slice(entries);
        Ok(())
    }

    async fn list_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<ActivityEntry>> {
        let log = self.entries.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(log
            .iter()
            .filter(|entry| entry.task_id() == task_id)
            .cloned()
            .collect())
    }
}
