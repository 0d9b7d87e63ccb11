//! The level scheduler.
//!
//! Runs one level at a time. A level whose frontier holds fewer than
//! `workers * threshold` vertices is drained on the calling thread; a larger one
//! is handed to the worker pool as `workers` drain tasks, and the scheduler waits
//! for all of them before touching the next level. No vertex of level `k + 1` is
//! expanded until level `k` is complete.
//!
//! Two frontiers alternate: the one drained during level `k` is empty afterwards
//! and receives the discoveries of level `k + 1`.

use core::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::trace;

use super::expander::{ExpandContext, Expander};
use super::serial::drain_frontier;
use crate::concurrency::pool::{LevelPool, LevelTask, Teardown};
use crate::graph::{Frontier, Graph, VisitedFlags};
use crate::GhostToken;

/// Parameters of one level-synchronized run. Validated by the caller.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LevelPlan {
    pub(crate) start: usize,
    pub(crate) workers: usize,
    pub(crate) threshold: usize,
    pub(crate) shutdown_timeout: Duration,
}

/// Result of a level-synchronized run.
pub(crate) struct LevelOutcome {
    pub(crate) reached: Vec<bool>,
    pub(crate) levels: usize,
    pub(crate) parallel_levels: usize,
    pub(crate) teardown: Teardown,
}

/// Runs the traversal described by `plan` under a fresh brand.
pub(crate) fn run<E: Expander>(expander: &E, graph: &Graph, plan: LevelPlan) -> LevelOutcome {
    GhostToken::new(|token| run_branded(&token, expander, graph, plan))
}

fn run_branded<'brand, E: Expander>(
    token: &GhostToken<'brand>,
    expander: &E,
    graph: &Graph,
    plan: LevelPlan,
) -> LevelOutcome {
    let visited = VisitedFlags::new(graph.vertex_count());
    let counter = graph.visited_counter();
    let ctx = ExpandContext::new(graph.adjacency(), &visited, counter);
    let frontiers: [Frontier<'brand>; 2] = [Frontier::new(), Frontier::new()];

    if visited.try_claim(plan.start, Ordering::Relaxed) {
        counter.fetch_add(1, Ordering::Relaxed);
        frontiers[0].push(token, plan.start);
    }

    let job = |token: &GhostToken<'brand>, task: &LevelTask, cancel: &AtomicBool| {
        let current = &frontiers[task.source];
        let next = &frontiers[task.source ^ 1];
        drain_frontier(token, expander, &ctx, current, next, Some(cancel));
    };

    let parallel_cutoff = plan.workers.saturating_mul(plan.threshold);

    let (levels, parallel_levels, teardown) = std::thread::scope(|scope| {
        let mut pool = LevelPool::spawn(scope, token, plan.workers, &job);
        let mut current = 0;
        let mut levels = 0;
        let mut parallel_levels = 0;

        loop {
            let frontier_len = frontiers[current].len();
            if frontier_len == 0 {
                break;
            }
            if frontier_len < parallel_cutoff {
                trace!(level = levels, frontier = frontier_len, "expanding level serially");
                drain_frontier(
                    token,
                    expander,
                    &ctx,
                    &frontiers[current],
                    &frontiers[current ^ 1],
                    None,
                );
            } else {
                trace!(
                    level = levels,
                    frontier = frontier_len,
                    workers = pool.workers(),
                    "expanding level in parallel"
                );
                pool.run_level(current);
                parallel_levels += 1;
            }
            current ^= 1;
            levels += 1;
        }

        (levels, parallel_levels, pool.shutdown(plan.shutdown_timeout))
    });

    LevelOutcome {
        reached: visited.snapshot(),
        levels,
        parallel_levels,
        teardown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::AtomicClaim;

    fn plan(start: usize, workers: usize, threshold: usize) -> LevelPlan {
        LevelPlan {
            start,
            workers,
            threshold,
            shutdown_timeout: Duration::from_secs(5),
        }
    }

    // A binary tree of depth 10: level `d` has 2^d vertices.
    fn binary_tree() -> Graph {
        let n = (1 << 11) - 1;
        Graph::from_edges(n, (1..n).map(|v| ((v - 1) / 2, v))).unwrap()
    }

    #[test]
    fn zero_threshold_runs_every_level_on_the_pool() {
        let graph = binary_tree();
        let outcome = run(&AtomicClaim, &graph, plan(0, 3, 0));
        assert_eq!(outcome.levels, 11);
        assert_eq!(outcome.parallel_levels, 11);
        assert_eq!(outcome.teardown, Teardown::Graceful);
        assert_eq!(graph.visited_count(), graph.vertex_count());
        assert!(outcome.reached.iter().all(|&r| r));
    }

    #[test]
    fn large_threshold_keeps_every_level_serial() {
        let graph = binary_tree();
        let outcome = run(&AtomicClaim, &graph, plan(0, 2, usize::MAX));
        assert_eq!(outcome.levels, 11);
        assert_eq!(outcome.parallel_levels, 0);
        assert_eq!(graph.visited_count(), graph.vertex_count());
    }

    #[test]
    fn only_wide_levels_go_parallel() {
        // workers * threshold = 4 * 16 = 64 = 2^6, so levels 6..=10 are parallel.
        let graph = binary_tree();
        let outcome = run(&AtomicClaim, &graph, plan(0, 4, 16));
        assert_eq!(outcome.parallel_levels, 5);
        assert_eq!(graph.visited_count(), graph.vertex_count());
    }

    #[test]
    fn start_without_out_edges_is_a_single_level() {
        let graph = Graph::new(3);
        let outcome = run(&AtomicClaim, &graph, plan(2, 2, 10));
        assert_eq!(outcome.levels, 1);
        assert_eq!(outcome.reached, vec![false, false, true]);
        assert_eq!(graph.visited_count(), 1);
    }
}
