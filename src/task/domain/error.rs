//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the storage limit.
    #[error("task title exceeds {max} characters (got {actual})")]
    TitleTooLong {
        /// Maximum permitted length in characters.
        max: usize,
        /// Length of the rejected title in characters.
        actual: usize,
    },
}

/// Error returned when a status name is not one of the workflow states.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned when a priority name is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
