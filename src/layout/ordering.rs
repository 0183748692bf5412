//! Crossing reduction within ranks.
//!
//! Barycenter heuristic: each node is placed at the mean position of its
//! neighbours in the opposite direction of the sweep. Means are compared as
//! fractions so the ordering never depends on floating-point rounding.

use std::cmp::Ordering;

/// Adjacency of the ranked graph, indexed by node.
pub(super) struct Adjacency<'a> {
    pub(super) ranks: &'a [usize],
    pub(super) prerequisites: &'a [Vec<usize>],
    pub(super) dependents: &'a [Vec<usize>],
}

/// Groups nodes into layers and reorders them over `passes` alternating
/// sweeps, keeping the layering with the fewest crossings seen.
///
/// Initial order within a layer is node index order, which is input order.
pub(super) fn order_layers(adjacency: &Adjacency<'_>, passes: usize) -> Vec<Vec<usize>> {
    let layer_count = adjacency.ranks.iter().max().map_or(0, |max| max + 1);
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); layer_count];
    for (node, rank) in adjacency.ranks.iter().enumerate() {
        if let Some(layer) = layers.get_mut(*rank) {
            layer.push(node);
        }
    }

    let mut positions = vec![0_usize; adjacency.ranks.len()];
    for layer in &layers {
        record_positions(layer, &mut positions);
    }

    let mut best = layers.clone();
    let mut best_crossings = count_crossings(adjacency, &layers, &positions);

    let mut downward = true;
    for _ in 0..passes {
        if best_crossings == 0 {
            break;
        }
        if downward {
            for rank in 1..layers.len() {
                reorder_layer(&mut layers, rank, adjacency.prerequisites, &mut positions);
            }
        } else {
            for rank in (0..layers.len().saturating_sub(1)).rev() {
                reorder_layer(&mut layers, rank, adjacency.dependents, &mut positions);
            }
        }
        downward = !downward;

        let crossings = count_crossings(adjacency, &layers, &positions);
        if crossings < best_crossings {
            best_crossings = crossings;
            best.clone_from(&layers);
        }
    }
    best
}

fn reorder_layer(
    layers: &mut [Vec<usize>],
    rank: usize,
    neighbours: &[Vec<usize>],
    positions: &mut [usize],
) {
    let Some(layer) = layers.get_mut(rank) else {
        return;
    };
    let mut keyed: Vec<(usize, Barycenter)> = layer
        .iter()
        .map(|&node| (node, Barycenter::of(node, neighbours, positions)))
        .collect();
    keyed.sort_by(|left, right| left.1.cmp_fraction(&right.1));
    layer.clear();
    layer.extend(keyed.into_iter().map(|(node, _)| node));
    record_positions(layer, positions);
}

fn record_positions(layer: &[usize], positions: &mut [usize]) {
    for (order, &node) in layer.iter().enumerate() {
        if let Some(slot) = positions.get_mut(node) {
            *slot = order;
        }
    }
}

/// Mean neighbour position kept as `sum / count`.
#[derive(Debug, Clone, Copy)]
struct Barycenter {
    sum: usize,
    count: usize,
}

impl Barycenter {
    /// Nodes without neighbours keep their current position.
    fn of(node: usize, neighbours: &[Vec<usize>], positions: &[usize]) -> Self {
        let linked = neighbours.get(node).map(Vec::as_slice).unwrap_or_default();
        if linked.is_empty() {
            return Self {
                sum: positions.get(node).copied().unwrap_or_default(),
                count: 1,
            };
        }
        Self {
            sum: linked
                .iter()
                .map(|other| positions.get(*other).copied().unwrap_or_default())
                .sum(),
            count: linked.len(),
        }
    }

    fn cmp_fraction(&self, other: &Self) -> Ordering {
        let left = self.sum.saturating_mul(other.count);
        let right = other.sum.saturating_mul(self.count);
        left.cmp(&right)
    }
}

/// Counts crossings between edges joining adjacent layers.
///
/// Edges spanning more than one rank are not counted.
pub(super) fn count_crossings(
    adjacency: &Adjacency<'_>,
    layers: &[Vec<usize>],
    positions: &[usize],
) -> usize {
    let position = |node: usize| positions.get(node).copied().unwrap_or_default();
    let rank = |node: usize| adjacency.ranks.get(node).copied().unwrap_or_default();

    let mut total = 0;
    for upper in layers {
        let mut segments: Vec<(usize, usize)> = Vec::new();
        for &node in upper {
            for &dependent in adjacency
                .dependents
                .get(node)
                .map(Vec::as_slice)
                .unwrap_or_default()
            {
                if rank(dependent) == rank(node) + 1 {
                    segments.push((position(node), position(dependent)));
                }
            }
        }
        for (index, first) in segments.iter().enumerate() {
            total += segments
                .iter()
                .skip(index + 1)
                .filter(|second| {
                    (first.0 < second.0 && first.1 > second.1)
                        || (first.0 > second.0 && first.1 < second.1)
                })
                .count();
        }
    }
    total
}
