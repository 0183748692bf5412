//! Dependency edge entity.

use super::DependencyId;
use crate::task::domain::{ProjectId, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// "`task_id` depends on `depends_on_task_id`" within one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    id: DependencyId,
    project_id: ProjectId,
    task_id: TaskId,
    depends_on_task_id: TaskId,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDependencyData {
    /// Persisted edge identifier.
    pub id: DependencyId,
    /// Project owning both endpoints.
    pub project_id: ProjectId,
    /// Dependent task.
    pub task_id: TaskId,
    /// Prerequisite task.
    pub depends_on_task_id: TaskId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl DependencyEdge {
    /// Creates a new edge with a fresh identifier.
    ///
    /// The edge is not validated here; run it past
    /// [`CycleGuard`](super::CycleGuard) before storing it.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        task_id: TaskId,
        depends_on_task_id: TaskId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: DependencyId::new(),
            project_id,
            task_id,
            depends_on_task_id,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs an edge from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedDependencyData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            task_id: data.task_id,
            depends_on_task_id: data.depends_on_task_id,
            created_at: data.created_at,
        }
    }

    /// Replaces the identifier with the one assigned by storage.
    #[must_use]
    pub const fn with_id(mut self, id: DependencyId) -> Self {
        self.id = id;
        self
    }

    /// Returns the edge identifier.
    #[must_use]
    pub const fn id(&self) -> DependencyId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the dependent task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the prerequisite task.
    #[must_use]
    pub const fn depends_on_task_id(&self) -> TaskId {
        self.depends_on_task_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether either endpoint is `task_id`.
    #[must_use]
    pub fn touches(&self, task_id: TaskId) -> bool {
        self.task_id == task_id || self.depends_on_task_id == task_id
    }
}
