//! Layered placement of the dependency graph.

use super::{
    LayoutConfig, LayoutDirection, LayoutError,
    ordering::{Adjacency, order_layers},
    rank::longest_path_ranks,
};
use crate::dependency::domain::DependencyEdge;
use crate::task::domain::TaskId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, error};

/// Placement of one task in the layered drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPosition {
    /// Task being placed.
    #[serde(rename = "nodeId")]
    pub task_id: TaskId,
    /// Layer index; prerequisites always sit in lower ranks than dependents.
    pub rank: usize,
    /// Position within the rank, starting at zero.
    pub order: usize,
    /// Horizontal coordinate.
    pub x: u64,
    /// Vertical coordinate.
    pub y: u64,
}

/// Result of laying out a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLayout {
    positions: Vec<LayoutPosition>,
    rank_count: usize,
}

impl GraphLayout {
    /// Returns one position per input node, in input order.
    #[must_use]
    pub fn positions(&self) -> &[LayoutPosition] {
        &self.positions
    }

    /// Returns the position of `task_id`, if it was part of the input.
    #[must_use]
    pub fn position(&self, task_id: TaskId) -> Option<&LayoutPosition> {
        self.positions
            .iter()
            .find(|position| position.task_id == task_id)
    }

    /// Returns the number of ranks used.
    #[must_use]
    pub const fn rank_count(&self) -> usize {
        self.rank_count
    }

    /// Returns task identifiers grouped by rank, each rank in drawing order.
    #[must_use]
    pub fn ranks(&self) -> Vec<Vec<TaskId>> {
        let mut ranks: Vec<Vec<LayoutPosition>> = vec![Vec::new(); self.rank_count];
        for position in &self.positions {
            if let Some(rank) = ranks.get_mut(position.rank) {
                rank.push(*position);
            }
        }
        ranks
            .into_iter()
            .map(|mut rank| {
                rank.sort_by_key(|position| position.order);
                rank.into_iter().map(|position| position.task_id).collect()
            })
            .collect()
    }
}

/// Computes deterministic layered layouts.
///
/// The same nodes and edges always produce the same layout, so results may
/// be cached by callers keyed on their input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub const fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out `nodes` connected by `edges`.
    ///
    /// Repeated node identifiers keep their first occurrence. Edges naming a
    /// task outside `nodes` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::CycleDetected`] when the edges contain a cycle.
    pub fn layout<'a, I>(&self, nodes: &[TaskId], edges: I) -> Result<GraphLayout, LayoutError>
    where
        I: IntoIterator<Item = &'a DependencyEdge>,
    {
        let mut index: HashMap<TaskId, usize> = HashMap::with_capacity(nodes.len());
        let mut order: Vec<TaskId> = Vec::with_capacity(nodes.len());
        for &task_id in nodes {
            if !index.contains_key(&task_id) {
                index.insert(task_id, order.len());
                order.push(task_id);
            }
        }

        let mut prerequisites: Vec<Vec<usize>> = vec![Vec::new(); order.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); order.len()];
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        for edge in edges {
            let (Some(&dependent), Some(&prerequisite)) = (
                index.get(&edge.task_id()),
                index.get(&edge.depends_on_task_id()),
            ) else {
                debug!(edge_id = %edge.id(), "skipping edge outside the laid-out node set");
                continue;
            };
            if !seen.insert((prerequisite, dependent)) {
                continue;
            }
            if let Some(list) = prerequisites.get_mut(dependent) {
                list.push(prerequisite);
            }
            if let Some(list) = dependents.get_mut(prerequisite) {
                list.push(dependent);
            }
        }

        let ranks = longest_path_ranks(&prerequisites, &dependents).map_err(|stuck| {
            let unresolved: Vec<TaskId> = stuck
                .into_iter()
                .filter_map(|node| order.get(node).copied())
                .collect();
            error!(
                unresolved = unresolved.len(),
                "layout found a dependency cycle; an edge bypassed the cycle guard"
            );
            LayoutError::CycleDetected { unresolved }
        })?;

        let adjacency = Adjacency {
            ranks: &ranks,
            prerequisites: &prerequisites,
            dependents: &dependents,
        };
        let layers = order_layers(&adjacency, self.config.ordering_passes);

        let mut positions: Vec<Option<LayoutPosition>> = vec![None; order.len()];
        for (rank, layer) in layers.iter().enumerate() {
            for (slot, &node) in layer.iter().enumerate() {
                let Some(&task_id) = order.get(node) else {
                    continue;
                };
                let (x, y) = self.coordinates(rank, slot);
                if let Some(entry) = positions.get_mut(node) {
                    *entry = Some(LayoutPosition {
                        task_id,
                        rank,
                        order: slot,
                        x,
                        y,
                    });
                }
            }
        }

        let layout = GraphLayout {
            positions: positions.into_iter().flatten().collect(),
            rank_count: layers.len(),
        };
        debug!(
            nodes = layout.positions.len(),
            ranks = layout.rank_count,
            "dependency graph laid out"
        );
        Ok(layout)
    }

    fn coordinates(&self, rank: usize, order: usize) -> (u64, u64) {
        let along_rank = scale(rank, self.config.rank_spacing);
        let across_rank = scale(order, self.config.node_spacing);
        match self.config.direction {
            LayoutDirection::TopToBottom => (across_rank, along_rank),
            LayoutDirection::LeftToRight => (along_rank, across_rank),
        }
    }
}

fn scale(step: usize, spacing: u32) -> u64 {
    u64::try_from(step)
        .unwrap_or(u64::MAX)
        .saturating_mul(u64::from(spacing))
}
