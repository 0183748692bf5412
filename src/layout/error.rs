//! Layout failures.

use crate::task::domain::TaskId;
use thiserror::Error;

/// Errors returned by the layout engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The edge set contains a cycle, so no ranking exists.
    ///
    /// The cycle guard should make this impossible; seeing it means an edge
    /// bypassed the guard.
    #[error("dependency graph contains a cycle through {} task(s)", .unresolved.len())]
    CycleDetected {
        /// Tasks that could not be ranked, in input order.
        unresolved: Vec<TaskId>,
    },
}
