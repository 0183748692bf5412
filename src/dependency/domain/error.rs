//! Errors raised when editing the dependency graph.

use super::DependencyId;
use crate::task::domain::TaskId;
use thiserror::Error;

/// Rejections produced by the graph store and the cycle guard.
///
/// These are caller-correctable input errors and are surfaced verbatim.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DependencyError {
    /// A task was asked to depend on itself.
    #[error("task {0} cannot depend on itself")]
    SelfDependency(TaskId),

    /// The ordered pair is already present.
    #[error("task {task_id} already depends on {depends_on}")]
    DuplicateEdge {
        /// Dependent task.
        task_id: TaskId,
        /// Prerequisite task.
        depends_on: TaskId,
    },

    /// The prerequisite already depends, transitively, on the dependent.
    #[error("adding {task_id} -> {depends_on} would create a dependency cycle")]
    CyclicDependency {
        /// Dependent task.
        task_id: TaskId,
        /// Prerequisite task.
        depends_on: TaskId,
    },

    /// No edge exists with the given identifier.
    #[error("dependency {0} not found")]
    EdgeNotFound(DependencyId),
}
