//! Admission check for new dependency edges.

use super::{DependencyError, DependencyGraph};
use crate::task::domain::TaskId;
use std::collections::VecDeque;

/// Decides whether a proposed edge keeps the graph a duplicate-free DAG.
///
/// The guard never mutates the graph. Callers must hold exclusive access to
/// the graph between [`CycleGuard::check`] and
/// [`DependencyGraph::add_edge`] so that no other edge slips in between.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleGuard;

impl CycleGuard {
    /// Checks whether `task_id -> depends_on` may be added.
    ///
    /// # Errors
    ///
    /// Returns, in order of precedence:
    /// - [`DependencyError::SelfDependency`] when both ends are the same task;
    /// - [`DependencyError::DuplicateEdge`] when the pair already exists;
    /// - [`DependencyError::CyclicDependency`] when `depends_on` already
    ///   depends, directly or transitively, on `task_id`.
    pub fn check(
        graph: &DependencyGraph,
        task_id: TaskId,
        depends_on: TaskId,
    ) -> Result<(), DependencyError> {
        if task_id == depends_on {
            return Err(DependencyError::SelfDependency(task_id));
        }
        if graph.contains(task_id, depends_on) {
            return Err(DependencyError::DuplicateEdge {
                task_id,
                depends_on,
            });
        }
        if Self::depends_transitively(graph, depends_on, task_id) {
            return Err(DependencyError::CyclicDependency {
                task_id,
                depends_on,
            });
        }
        Ok(())
    }

    /// Returns whether `start` reaches `target` by following depends-on
    /// edges.
    ///
    /// Breadth-first over interned slots with a seen-set, so every task is
    /// expanded at most once regardless of how many paths converge on it.
    #[must_use]
    pub fn depends_transitively(graph: &DependencyGraph, start: TaskId, target: TaskId) -> bool {
        let (Some(start_slot), Some(target_slot)) = (graph.slot(start), graph.slot(target)) else {
            return false;
        };

        let mut seen = vec![false; graph.slot_count()];
        let mut queue = VecDeque::from([start_slot]);
        if let Some(flag) = seen.get_mut(start_slot) {
            *flag = true;
        }

        while let Some(slot) = queue.pop_front() {
            if slot == target_slot {
                return true;
            }
            for &next in graph.prerequisite_slots(slot) {
                if let Some(flag) = seen.get_mut(next) {
                    if !*flag {
                        *flag = true;
                        queue.push_back(next);
                    }
                }
            }
        }
        false
    }
}
