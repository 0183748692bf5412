//! Pending transition state machine.

use super::PersistenceFailure;
use crate::task::domain::{TaskId, TaskStatus};
use serde::{Deserialize, Serialize};

/// Where a dragged card was released or is hovering.
///
/// Column targets carry the column's status; card targets name the card
/// underneath the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DropTarget {
    /// A column, identified by its status.
    Column(TaskStatus),
    /// Another card; resolves to that card's visible status.
    Task(TaskId),
}

/// Lifecycle of a pending transition.
///
/// `Speculative` moves to exactly one of `Committed` or `Reverted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPhase {
    /// Visible status may differ from the stored one.
    Speculative,
    /// The visible status was persisted.
    Committed,
    /// The visible status was restored to the original.
    Reverted,
}

/// An unresolved status change for one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransition {
    task_id: TaskId,
    original_status: TaskStatus,
    visible_status: TaskStatus,
    phase: TransitionPhase,
}

impl PendingTransition {
    /// Starts a transition for a card currently showing `original_status`.
    #[must_use]
    pub const fn begin(task_id: TaskId, original_status: TaskStatus) -> Self {
        Self {
            task_id,
            original_status,
            visible_status: original_status,
            phase: TransitionPhase::Speculative,
        }
    }

    /// Shows `status` while the transition is still speculative.
    ///
    /// Has no effect once the transition is resolved.
    pub const fn speculate(&mut self, status: TaskStatus) {
        if matches!(self.phase, TransitionPhase::Speculative) {
            self.visible_status = status;
        }
    }

    /// Marks the visible status as persisted.
    #[must_use]
    pub const fn commit(mut self) -> Self {
        if matches!(self.phase, TransitionPhase::Speculative) {
            self.phase = TransitionPhase::Committed;
        }
        self
    }

    /// Restores the original status.
    #[must_use]
    pub const fn revert(mut self) -> Self {
        if matches!(self.phase, TransitionPhase::Speculative) {
            self.visible_status = self.original_status;
            self.phase = TransitionPhase::Reverted;
        }
        self
    }

    /// Returns the card being moved.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the status the card had when the drag started.
    #[must_use]
    pub const fn original_status(&self) -> TaskStatus {
        self.original_status
    }

    /// Returns the status currently shown.
    #[must_use]
    pub const fn visible_status(&self) -> TaskStatus {
        self.visible_status
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> TransitionPhase {
        self.phase
    }
}

/// Result of finishing a drag or an explicit transition.
#[derive(Debug, Clone)]
pub enum TransitionOutcome {
    /// No target resolved; the card shows its original status again.
    Cancelled,
    /// The target was the original status; nothing was persisted.
    Unchanged,
    /// The new status was persisted.
    Committed(PendingTransition),
    /// Persistence failed and the card was restored.
    Reverted {
        /// The reverted transition.
        transition: PendingTransition,
        /// Why persistence failed.
        failure: PersistenceFailure,
    },
}

impl TransitionOutcome {
    /// Returns whether a new status was persisted.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}
