//! Activity log entries recorded for task changes.

use super::{ActivityId, Task, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task attribute named by an activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskField {
    /// Task title.
    Title,
    /// Task description.
    Description,
    /// Workflow status.
    Status,
    /// Priority.
    Priority,
    /// Assignee.
    Assignee,
    /// Due date.
    DueDate,
}

impl TaskField {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Assignee => "assignee",
            Self::DueDate => "due_date",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single attribute change produced by a task mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    field: TaskField,
    old_value: Option<String>,
    new_value: Option<String>,
}

impl FieldChange {
    /// Creates a field change.
    #[must_use]
    pub const fn new(field: TaskField, old_value: Option<String>, new_value: Option<String>) -> Self {
        Self {
            field,
            old_value,
            new_value,
        }
    }

    /// Returns the changed field.
    #[must_use]
    pub const fn field(&self) -> TaskField {
        self.field
    }

    /// Returns the previous value in string form.
    #[must_use]
    pub fn old_value(&self) -> Option<&str> {
        self.old_value.as_deref()
    }

    /// Returns the new value in string form.
    #[must_use]
    pub fn new_value(&self) -> Option<&str> {
        self.new_value.as_deref()
    }
}

/// Kind of activity recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    /// The task was created.
    Created,
    /// A non-status attribute changed.
    Updated,
    /// The workflow status changed.
    StatusChanged,
}

/// Audit record of a change to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    id: ActivityId,
    task_id: TaskId,
    action: ActivityAction,
    field: Option<TaskField>,
    old_value: Option<String>,
    new_value: Option<String>,
    created_at: DateTime<Utc>,
}

impl ActivityEntry {
    /// Records the creation of `task`.
    #[must_use]
    pub fn created(task: &Task, clock: &impl Clock) -> Self {
        Self {
            id: ActivityId::new(),
            task_id: task.id(),
            action: ActivityAction::Created,
            field: None,
            old_value: None,
            new_value: Some(task.title().as_str().to_owned()),
            created_at: clock.utc(),
        }
    }

    /// Records a field change on `task_id`.
    #[must_use]
    pub fn from_change(task_id: TaskId, change: FieldChange, clock: &impl Clock) -> Self {
        let action = match change.field {
            TaskField::Status => ActivityAction::StatusChanged,
            _ => ActivityAction::Updated,
        };
        Self {
            id: ActivityId::new(),
            task_id,
            action,
            field: Some(change.field),
            old_value: change.old_value,
            new_value: change.new_value,
            created_at: clock.utc(),
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> ActivityId {
        self.id
    }

    /// Returns the task the entry belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the recorded action.
    #[must_use]
    pub const fn action(&self) -> ActivityAction {
        self.action
    }

    /// Returns the changed field, if the action concerns one.
    #[must_use]
    pub const fn field(&self) -> Option<TaskField> {
        self.field
    }

    /// Returns the previous value in string form.
    #[must_use]
    pub fn old_value(&self) -> Option<&str> {
        self.old_value.as_deref()
    }

    /// Returns the new value in string form.
    #[must_use]
    pub fn new_value(&self) -> Option<&str> {
        self.new_value.as_deref()
    }

    /// Returns when the entry was recorded.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
