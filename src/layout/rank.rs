//! Longest-path ranking.

use std::collections::VecDeque;

/// Assigns each node the length of the longest path reaching it from a
/// source.
///
/// Nodes are processed Kahn-style, so each one is dequeued at most once and
/// the loop ends after at most `n` iterations even when the input is cyclic.
/// On a cycle, returns the indices that never became ready.
pub(super) fn longest_path_ranks(
    prerequisites: &[Vec<usize>],
    dependents: &[Vec<usize>],
) -> Result<Vec<usize>, Vec<usize>> {
    let node_count = prerequisites.len();
    let mut waiting: Vec<usize> = prerequisites.iter().map(Vec::len).collect();
    let mut ranks = vec![0_usize; node_count];
    let mut ready: VecDeque<usize> = waiting
        .iter()
        .enumerate()
        .filter(|(_, count)| **count == 0)
        .map(|(node, _)| node)
        .collect();
    let mut ranked = 0_usize;

    while let Some(node) = ready.pop_front() {
        ranked += 1;
        let next_rank = ranks.get(node).copied().unwrap_or_default() + 1;
        for &dependent in dependents.get(node).map(Vec::as_slice).unwrap_or_default() {
            if let Some(rank) = ranks.get_mut(dependent) {
                *rank = (*rank).max(next_rank);
            }
            if let Some(count) = waiting.get_mut(dependent) {
                *count -= 1;
                if *count == 0 {
                    ready.push_back(dependent);
                }
            }
        }
    }

    if ranked == node_count {
        Ok(ranks)
    } else {
        Err(waiting
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(node, _)| node)
            .collect())
    }
}
