//! Workflow state machine for task statuses and priorities.
//!
//! Every status may move to every other status. The board has no terminal
//! column: finished work can be reopened by dragging it back.

use super::{ParseTaskPriorityError, ParseTaskStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a task, one per board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    Todo,
    /// Work is underway.
    InProgress,
    /// Work is awaiting review.
    Review,
    /// Work is complete.
    Done,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const ALL: [Self; 4] = [Self::Todo, Self::InProgress, Self::Review, Self::Done];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Done => "done",
        }
    }

    /// Returns whether moving from this status to `target` is allowed.
    ///
    /// The workflow is deliberately permissive: no pair of statuses is
    /// forbidden, including `done -> todo`.
    #[must_use]
    pub const fn can_transition_to(self, _target: Self) -> bool {
        matches!(self, Self::Todo | Self::InProgress | Self::Review | Self::Done)
    }

    /// Applies a requested transition given as a status name.
    ///
    /// # Errors
    ///
    /// Returns [`ParseTaskStatusError`] when `requested` does not name a
    /// workflow status.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskgraph::task::domain::TaskStatus;
    ///
    /// let next = TaskStatus::Done.apply_transition("todo");
    /// assert_eq!(next, Ok(TaskStatus::Todo));
    /// assert!(TaskStatus::Todo.apply_transition("archived").is_err());
    /// ```
    pub fn apply_transition(self, requested: &str) -> Result<Self, ParseTaskStatusError> {
        let target = Self::try_from(requested)?;
        debug_assert!(self.can_transition_to(target));
        Ok(target)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal priority.
    #[default]
    Medium,
    /// Should be picked up soon.
    High,
    /// Blocks other work.
    Critical,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}
