//! Task aggregate root and its validated title.

use super::{FieldChange, ProjectId, TaskDomainError, TaskField, TaskId, TaskPriority, TaskStatus, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task title, trimmed and bounded in length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Maximum title length in characters.
    pub const MAX_LENGTH: usize = 200;

    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank or
    /// [`TaskDomainError::TitleTooLong`] when it exceeds
    /// [`Self::MAX_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(TaskDomainError::TitleTooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    assignee: Option<UserId>,
    due_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted assignee, if any.
    pub assignee: Option<UserId>,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `todo` task with medium priority in `project_id`.
    #[must_use]
    pub fn new(project_id: ProjectId, title: TaskTitle, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            project_id,
            title,
            description: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            assignee: None,
            due_date: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            assignee: data.assignee,
            due_date: data.due_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Sets the initial status of a task that has not been stored yet.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the initial priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the initial description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the initial due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task to `target`.
    ///
    /// Returns the recorded change, or `None` when the task already has the
    /// requested status (the timestamp is left untouched in that case).
    pub fn transition_to(&mut self, target: TaskStatus, clock: &impl Clock) -> Option<FieldChange> {
        if !self.status.can_transition_to(target) {
            return None;
        }
        let previous = replace_if_changed(&mut self.status, target)?;
        self.touch(clock);
        Some(FieldChange::new(
            TaskField::Status,
            Some(previous.as_str().to_owned()),
            Some(target.as_str().to_owned()),
        ))
    }

    /// Replaces the title.
    pub fn rename(&mut self, title: TaskTitle, clock: &impl Clock) -> Option<FieldChange> {
        let new_value = title.as_str().to_owned();
        let previous = replace_if_changed(&mut self.title, title)?;
        self.touch(clock);
        Some(FieldChange::new(
            TaskField::Title,
            Some(previous.as_str().to_owned()),
            Some(new_value),
        ))
    }

    /// Replaces or clears the description.
    pub fn set_description(
        &mut self,
        description: Option<String>,
        clock: &impl Clock,
    ) -> Option<FieldChange> {
        let new_value = description.clone();
        let previous = replace_if_changed(&mut self.description, description)?;
        self.touch(clock);
        Some(FieldChange::new(TaskField::Description, previous, new_value))
    }

    /// Replaces the priority.
    pub fn set_priority(&mut self, priority: TaskPriority, clock: &impl Clock) -> Option<FieldChange> {
        let previous = replace_if_changed(&mut self.priority, priority)?;
        self.touch(clock);
        Some(FieldChange::new(
            TaskField::Priority,
            Some(previous.as_str().to_owned()),
            Some(priority.as_str().to_owned()),
        ))
    }

    /// Assigns or unassigns the task.
    pub fn assign(&mut self, assignee: Option<UserId>, clock: &impl Clock) -> Option<FieldChange> {
        let previous = replace_if_changed(&mut self.assignee, assignee)?;
        self.touch(clock);
        Some(FieldChange::new(
            TaskField::Assignee,
            previous.map(|user| user.to_string()),
            assignee.map(|user| user.to_string()),
        ))
    }

    /// Replaces or clears the due date.
    pub fn set_due_date(
        &mut self,
        due_date: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) -> Option<FieldChange> {
        let previous = replace_if_changed(&mut self.due_date, due_date)?;
        self.touch(clock);
        Some(FieldChange::new(
            TaskField::DueDate,
            previous.map(|date| date.to_rfc3339()),
            due_date.map(|date| date.to_rfc3339()),
        ))
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Writes `new_value` into `slot` when it differs, returning the old value.
fn replace_if_changed<T: PartialEq>(slot: &mut T, new_value: T) -> Option<T> {
    if *slot == new_value {
        return None;
    }
    Some(std::mem::replace(slot, new_value))
}
