//! In-memory graph store for one project's dependency edges.
//!
//! Design:
//! - Tasks are interned into integer slots; adjacency lists hold slots, so
//!   traversals never chase pointers or hash on every step.
//! - `outgoing[slot]`: slots this task depends on (prerequisites).
//! - `incoming[slot]`: slots that depend on this task (dependents).
//! - Invariant: `outgoing`, `incoming`, `pairs`, and `edges` describe the
//!   same edge set.

use super::{DependencyEdge, DependencyError, DependencyId};
use crate::task::domain::TaskId;
use std::collections::HashMap;

/// Dependency edges of a single project, indexed for adjacency queries.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    slots: HashMap<TaskId, usize>,
    tasks: Vec<TaskId>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
    pairs: HashMap<(TaskId, TaskId), DependencyId>,
    edges: HashMap<DependencyId, DependencyEdge>,
    order: Vec<DependencyId>,
}

impl DependencyGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from previously stored edges.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyError::DuplicateEdge`] when two edges share the
    /// same ordered pair.
    pub fn from_edges(
        edges: impl IntoIterator<Item = DependencyEdge>,
    ) -> Result<Self, DependencyError> {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }

    /// Inserts an edge.
    ///
    /// Only uniqueness is checked here; cycle and self-dependency checks
    /// belong to [`CycleGuard`](super::CycleGuard).
    ///
    /// # Errors
    ///
    /// Returns [`DependencyError::DuplicateEdge`] when the ordered pair is
    /// already present.
    pub fn add_edge(&mut self, edge: DependencyEdge) -> Result<(), DependencyError> {
        let task_id = edge.task_id();
        let depends_on = edge.depends_on_task_id();
        if self.contains(task_id, depends_on) {
            return Err(DependencyError::DuplicateEdge {
                task_id,
                depends_on,
            });
        }

        let from = self.intern(task_id);
        let to = self.intern(depends_on);
        if let Some(list) = self.outgoing.get_mut(from) {
            list.push(to);
        }
        if let Some(list) = self.incoming.get_mut(to) {
            list.push(from);
        }
        self.pairs.insert((task_id, depends_on), edge.id());
        self.order.push(edge.id());
        self.edges.insert(edge.id(), edge);
        Ok(())
    }

    /// Removes an edge by identifier and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyError::EdgeNotFound`] when no such edge exists.
    pub fn remove_edge(&mut self, edge_id: DependencyId) -> Result<DependencyEdge, DependencyError> {
        let edge = self
            .edges
            .remove(&edge_id)
            .ok_or(DependencyError::EdgeNotFound(edge_id))?;
        self.unlink(&edge);
        Ok(edge)
    }

    /// Removes every edge touching `task_id`, returning them in insertion
    /// order.
    pub fn detach_task(&mut self, task_id: TaskId) -> Vec<DependencyEdge> {
        let touching: Vec<DependencyId> = self
            .edges()
            .filter(|edge| edge.touches(task_id))
            .map(DependencyEdge::id)
            .collect();
        let mut removed = Vec::with_capacity(touching.len());
        for edge_id in touching {
            if let Some(edge) = self.edges.remove(&edge_id) {
                self.unlink(&edge);
                removed.push(edge);
            }
        }
        removed
    }

    /// Returns the prerequisites of `task_id` ("what this task depends on")
    /// in insertion order.
    #[must_use]
    pub fn outgoing_dependencies(&self, task_id: TaskId) -> Vec<TaskId> {
        self.neighbours(&self.outgoing, task_id)
    }

    /// Returns the tasks that depend on `task_id` in insertion order.
    #[must_use]
    pub fn incoming_dependents(&self, task_id: TaskId) -> Vec<TaskId> {
        self.neighbours(&self.incoming, task_id)
    }

    /// Returns whether `task_id` already depends directly on `depends_on`.
    #[must_use]
    pub fn contains(&self, task_id: TaskId, depends_on: TaskId) -> bool {
        self.pairs.contains_key(&(task_id, depends_on))
    }

    /// Looks up an edge by identifier.
    #[must_use]
    pub fn edge(&self, edge_id: DependencyId) -> Option<&DependencyEdge> {
        self.edges.get(&edge_id)
    }

    /// Iterates over all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.order.iter().filter_map(|edge_id| self.edges.get(edge_id))
    }

    /// Returns the edges whose dependent is `task_id`.
    #[must_use]
    pub fn edges_for_task(&self, task_id: TaskId) -> Vec<&DependencyEdge> {
        self.edges()
            .filter(|edge| edge.task_id() == task_id)
            .collect()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether the graph holds no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the slot assigned to `task_id`, if the task has ever had an
    /// edge in this graph.
    pub(crate) fn slot(&self, task_id: TaskId) -> Option<usize> {
        self.slots.get(&task_id).copied()
    }

    /// Returns the prerequisite slots of `slot`.
    pub(crate) fn prerequisite_slots(&self, slot: usize) -> &[usize] {
        self.outgoing.get(slot).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the number of interned slots.
    pub(crate) fn slot_count(&self) -> usize {
        self.tasks.len()
    }

    fn intern(&mut self, task_id: TaskId) -> usize {
        if let Some(slot) = self.slots.get(&task_id) {
            return *slot;
        }
        let slot = self.tasks.len();
        self.slots.insert(task_id, slot);
        self.tasks.push(task_id);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        slot
    }

    fn unlink(&mut self, edge: &DependencyEdge) {
        self.pairs
            .remove(&(edge.task_id(), edge.depends_on_task_id()));
        self.order.retain(|edge_id| *edge_id != edge.id());
        let (Some(from), Some(to)) = (
            self.slot(edge.task_id()),
            self.slot(edge.depends_on_task_id()),
        ) else {
            return;
        };
        if let Some(list) = self.outgoing.get_mut(from) {
            remove_first(list, to);
        }
        if let Some(list) = self.incoming.get_mut(to) {
            remove_first(list, from);
        }
    }

    fn neighbours(&self, adjacency: &[Vec<usize>], task_id: TaskId) -> Vec<TaskId> {
        let Some(slot) = self.slot(task_id) else {
            return Vec::new();
        };
        adjacency
            .get(slot)
            .map(|list| {
                list.iter()
                    .filter_map(|neighbour| self.tasks.get(*neighbour).copied())
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn remove_first(list: &mut Vec<usize>, value: usize) {
    if let Some(position) = list.iter().position(|entry| *entry == value) {
        list.remove(position);
    }
}
