//! User-facing notices emitted by the coordinator.

use crate::task::domain::{TaskId, TaskStatus};
use serde::{Deserialize, Serialize};

/// Transient notice that a status change was rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionNotice {
    task_id: TaskId,
    attempted: TaskStatus,
    restored: TaskStatus,
    reason: String,
}

impl TransitionNotice {
    /// Creates a rollback notice.
    #[must_use]
    pub fn reverted(
        task_id: TaskId,
        attempted: TaskStatus,
        restored: TaskStatus,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            task_id,
            attempted,
            restored,
            reason: reason.into(),
        }
    }

    /// Returns the affected task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the status that could not be saved.
    #[must_use]
    pub const fn attempted(&self) -> TaskStatus {
        self.attempted
    }

    /// Returns the status the card shows again.
    #[must_use]
    pub const fn restored(&self) -> TaskStatus {
        self.restored
    }

    /// Returns the underlying failure description.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Renders a short message for display.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Could not move task to {}; it is back in {}.",
            self.attempted, self.restored
        )
    }
}
