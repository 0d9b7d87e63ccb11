//! Single-threaded traversal pieces.
//!
//! [`bfs`] is the plain FIFO breadth-first search used for graphs too small or
//! sparse to pay for a worker pool. [`drain_frontier`] is the one-vertex-at-a-time
//! drain loop; the scheduler runs it on the calling thread for small levels, and
//! every pool worker runs the same loop against the shared frontier.

use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::collections::VecDeque;

use super::expander::{ExpandContext, Expander};
use crate::graph::Frontier;
use crate::GhostToken;

/// Result of a serial traversal.
pub(crate) struct SerialOutcome {
    pub(crate) reached: Vec<bool>,
    pub(crate) levels: usize,
}

/// Breadth-first search from `start` with plain markers and a FIFO queue.
///
/// Increments `counter` once per discovered vertex, `start` included.
///
/// **Time complexity**: \(O(n + m)\)
/// **Space complexity**: \(O(n)\) for markers and queue
pub(crate) fn bfs(adjacency: &[Vec<usize>], start: usize, counter: &AtomicUsize) -> SerialOutcome {
    let mut reached = vec![false; adjacency.len()];
    let mut queue = VecDeque::with_capacity(64);

    reached[start] = true;
    counter.fetch_add(1, Ordering::Relaxed);
    queue.push_back(start);

    let mut levels = 0;
    while !queue.is_empty() {
        levels += 1;
        for _ in 0..queue.len() {
            let Some(u) = queue.pop_front() else { break };
            for &v in &adjacency[u] {
                if !reached[v] {
                    reached[v] = true;
                    counter.fetch_add(1, Ordering::Relaxed);
                    queue.push_back(v);
                }
            }
        }
    }

    SerialOutcome { reached, levels }
}

/// Pops vertices from `current` and expands each into `next` until `current` is empty.
///
/// Stops early once `cancel` is raised. Returns the number of vertices expanded.
pub(crate) fn drain_frontier<'brand, E: Expander>(
    token: &GhostToken<'brand>,
    expander: &E,
    ctx: &ExpandContext<'_, 'brand>,
    current: &Frontier<'brand>,
    next: &Frontier<'brand>,
    cancel: Option<&AtomicBool>,
) -> usize {
    let mut expanded = 0;
    while cancel.map_or(true, |c| !c.load(Ordering::Relaxed)) {
        let Some(vertex) = current.pop(token) else { break };
        expander.expand(token, ctx, vertex, next);
        expanded += 1;
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VisitedFlags;
    use crate::traversal::AtomicClaim;

    #[test]
    fn bfs_counts_reachable_vertices_and_levels() {
        // 0 -> 1, 2 ; 1 -> 3 ; 2 -> 3 ; 3 -> 4 ; 5 isolated
        let adjacency = vec![vec![1, 2], vec![3], vec![3], vec![4], vec![], vec![]];
        let counter = AtomicUsize::new(0);
        let outcome = bfs(&adjacency, 0, &counter);

        assert_eq!(counter.load(Ordering::Relaxed), 5);
        assert_eq!(outcome.reached, vec![true, true, true, true, true, false]);
        assert_eq!(outcome.levels, 4);
    }

    #[test]
    fn bfs_handles_cycles_and_self_loops() {
        let adjacency = vec![vec![0, 1], vec![2], vec![0]];
        let counter = AtomicUsize::new(0);
        let outcome = bfs(&adjacency, 1, &counter);
        assert_eq!(counter.load(Ordering::Relaxed), 3);
        assert!(outcome.reached.iter().all(|&r| r));
    }

    #[test]
    fn drain_empties_current_and_fills_next() {
        GhostToken::new(|token| {
            let adjacency = vec![vec![2], vec![2, 3], vec![], vec![]];
            let visited = VisitedFlags::new(4);
            let counter = AtomicUsize::new(0);
            let ctx = ExpandContext::new(&adjacency, &visited, &counter);
            let current = Frontier::new();
            let next = Frontier::new();
            current.push(&token, 0);
            current.push(&token, 1);

            let expanded = drain_frontier(&token, &AtomicClaim, &ctx, &current, &next, None);

            assert_eq!(expanded, 2);
            assert!(current.is_empty());
            assert_eq!(next.len(), 2);
            assert_eq!(counter.load(Ordering::Relaxed), 2);
        });
    }

    #[test]
    fn drain_stops_when_cancelled() {
        GhostToken::new(|token| {
            let adjacency = vec![vec![], vec![]];
            let visited = VisitedFlags::new(2);
            let counter = AtomicUsize::new(0);
            let ctx = ExpandContext::new(&adjacency, &visited, &counter);
            let current = Frontier::new();
            let next = Frontier::new();
            current.push(&token, 0);
            current.push(&token, 1);
            let cancel = AtomicBool::new(true);

            let expanded =
                drain_frontier(&token, &AtomicClaim, &ctx, &current, &next, Some(&cancel));

            assert_eq!(expanded, 0);
            assert_eq!(current.len(), 2);
        });
    }
}
