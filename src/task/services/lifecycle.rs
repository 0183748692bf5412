//! Service layer for task creation, editing, and status transitions.

use crate::task::{
    domain::{
        ActivityEntry, FieldChange, ParseTaskStatusError, ProjectId, Task, TaskDomainError,
        TaskId, TaskPriority, TaskStatus, TaskTitle, UserId,
    },
    ports::{
        ActivityRepository, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
        TaskStatusWriter,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for creating a task in a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    description: Option<String>,
    status: Option<String>,
    priority: TaskPriority,
    assignee: Option<UserId>,
    due_date: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: None,
            status: None,
            priority: TaskPriority::default(),
            assignee: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status by name; defaults to `todo`.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Request payload for editing task attributes.
///
/// Only fields that were set are applied. Nullable attributes use a nested
/// `Option` so callers can distinguish "leave unchanged" from "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<Option<String>>,
    priority: Option<TaskPriority>,
    assignee: Option<Option<UserId>>,
    due_date: Option<Option<DateTime<Utc>>>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces or clears the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: Option<UserId>) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Replaces or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Request payload for moving a task to another workflow status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTaskRequest {
    task_id: TaskId,
    target_status: String,
}

impl TransitionTaskRequest {
    /// Creates a transition request from a status name.
    #[must_use]
    pub fn new(task_id: TaskId, target_status: impl Into<String>) -> Self {
        Self {
            task_id,
            target_status: target_status.into(),
        }
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The requested status is not a workflow status.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, A, C>
where
    R: TaskRepository,
    A: ActivityRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    activity: Arc<A>,
    clock: Arc<C>,
}

impl<R, A, C> TaskLifecycleService<R, A, C>
where
    R: TaskRepository,
    A: ActivityRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, activity: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            repository,
            activity,
            clock,
        }
    }

    async fn find_task_or_error(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }

    /// Creates a task in its project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the title or initial status is
    /// invalid or the repository rejects persistence.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let status = match request.status {
            Some(name) => TaskStatus::try_from(name.as_str())?,
            None => TaskStatus::default(),
        };

        let mut task = Task::new(request.project_id, title, &*self.clock)
            .with_status(status)
            .with_priority(request.priority);
        if let Some(description) = request.description {
            task = task.with_description(description);
        }
        if let Some(assignee) = request.assignee {
            task = task.with_assignee(assignee);
        }
        if let Some(due_date) = request.due_date {
            task = task.with_due_date(due_date);
        }

        self.repository.store(&task).await?;
        self.activity
            .record(&[ActivityEntry::created(&task, &*self.clock)])
            .await?;
        debug!(task_id = %task.id(), project_id = %task.project_id(), "task created");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// or [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.find_task_or_error(task_id).await
    }

    /// Lists the tasks of a project in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_project_tasks(&self, project_id: ProjectId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list_by_project(project_id).await?)
    }

    /// Applies attribute edits and records one activity entry per changed
    /// field.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the task does not exist, a new
    /// title is invalid, or persistence fails.
    pub async fn update_task(
        &self,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        let clock = &*self.clock;

        let mut changes: Vec<FieldChange> = Vec::new();
        if let Some(title) = request.title {
            changes.extend(task.rename(TaskTitle::new(title)?, clock));
        }
        if let Some(description) = request.description {
            changes.extend(task.set_description(description, clock));
        }
        if let Some(priority) = request.priority {
            changes.extend(task.set_priority(priority, clock));
        }
        if let Some(assignee) = request.assignee {
            changes.extend(task.assign(assignee, clock));
        }
        if let Some(due_date) = request.due_date {
            changes.extend(task.set_due_date(due_date, clock));
        }

        if changes.is_empty() {
            return Ok(task);
        }
        self.persist_changes(&task, changes).await?;
        Ok(task)
    }

    /// Moves a task to the named workflow status.
    ///
    /// Transitioning to the current status succeeds without writing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidStatus`] when the status name is
    /// not a workflow status, [`TaskLifecycleError::NotFound`] when the task
    /// does not exist, or repository errors.
    pub async fn transition_task(
        &self,
        request: TransitionTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(request.task_id).await?;
        let target = task.status().apply_transition(&request.target_status)?;
        let Some(change) = task.transition_to(target, &*self.clock) else {
            return Ok(task);
        };
        self.persist_changes(&task, vec![change]).await?;
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// Dependency edges touching the task are owned by the dependency
    /// service and must be detached there.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// or repository errors.
    pub async fn delete_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let task = self.find_task_or_error(task_id).await?;
        self.repository.delete(task_id).await?;
        debug!(task_id = %task_id, "task deleted");
        Ok(task)
    }

    /// Returns the activity log of a task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn activity(&self, task_id: TaskId) -> TaskLifecycleResult<Vec<ActivityEntry>> {
        Ok(self.activity.list_for_task(task_id).await?)
    }

    async fn persist_changes(
        &self,
        task: &Task,
        changes: Vec<FieldChange>,
    ) -> TaskLifecycleResult<()> {
        self.repository.update(task).await?;
        let entries: Vec<ActivityEntry> = changes
            .into_iter()
            .map(|change| ActivityEntry::from_change(task.id(), change, &*self.clock))
            .collect();
        debug!(task_id = %task.id(), changes = entries.len(), "task updated");
        self.activity.record(&entries).await?;
        Ok(())
    }
}

#[async_trait]
impl<R, A, C> TaskStatusWriter for TaskLifecycleService<R, A, C>
where
    R: TaskRepository,
    A: ActivityRepository,
    C: Clock + Send + Sync,
{
    async fn save_task_status(
        &self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<()> {
        let mut task = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskRepositoryError::NotFound(task_id))?;
        let Some(change) = task.transition_to(status, &*self.clock) else {
            return Ok(());
        };
        self.repository.update(&task).await?;
        self.activity
            .record(&[ActivityEntry::from_change(task_id, change, &*self.clock)])
            .await?;
        debug!(task_id = %task_id, status = %status, "task status saved");
        Ok(())
    }
}
