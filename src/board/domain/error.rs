//! Board coordinator failures.

use crate::task::{domain::TaskId, ports::TaskRepositoryError};
use std::time::Duration;
use thiserror::Error;

/// Why a speculative status change could not be persisted.
#[derive(Debug, Clone, Error)]
pub enum PersistenceFailure {
    /// The status writer returned an error.
    #[error("status write rejected: {0}")]
    Rejected(#[source] TaskRepositoryError),
    /// The status writer did not answer in time.
    #[error("status write timed out after {0:?}")]
    TimedOut(Duration),
}

/// Errors returned by the board coordinator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    /// The task is not on the board.
    #[error("task {0} is not on the board")]
    TaskNotFound(TaskId),
    /// The task already has an unresolved transition.
    #[error("task {0} already has a transition in progress")]
    TransitionPending(TaskId),
    /// No drag was started for the task.
    #[error("task {0} has no transition in progress")]
    NoPendingTransition(TaskId),
    /// The board state lock was poisoned.
    #[error("board state unavailable: {0}")]
    State(String),
}
