//! Traversal entry points.
//!
//! Every entry point validates its arguments before touching the graph, resets
//! the graph's visited counter, and returns a [`TraversalReport`].
//!
//! | Entry point | Mode |
//! |-------------|------|
//! | [`Graph::traverse`] | serial or parallel, chosen by [`DispatchHeuristic`] |
//! | [`Graph::traverse_with_workers`] | parallel with an explicit worker count |
//! | [`Graph::traverse_custom`] | parallel with explicit workers, threshold and expander |
//! | [`Graph::traverse_broken`] | parallel with the racy [`CheckThenSet`] expander |
//! | [`Graph::traverse_serial`] | serial fallback |
//! | [`Graph::traverse_with`] | driven by a [`TraversalConfig`] |
//!
//! [`DispatchHeuristic`]: crate::DispatchHeuristic

pub mod expander;
pub(crate) mod scheduler;
pub(crate) mod serial;

pub use expander::{AtomicClaim, CheckThenSet, ExpandContext, Expander, ExpanderKind};

use serde::Serialize;
use tracing::{debug, info};

use crate::concurrency::pool::Teardown;
use crate::config::{TraversalConfig, DEFAULT_PARALLELISM_THRESHOLD};
use crate::error::{BfsError, Result};
use crate::graph::Graph;
use scheduler::LevelPlan;

/// How a traversal was executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TraversalMode {
    /// Plain single-threaded BFS.
    Serial,
    /// Level-synchronized traversal on a worker pool.
    Parallel {
        /// Pool size.
        workers: usize,
        /// Per-level parallelism threshold.
        threshold: usize,
    },
}

/// Outcome of one traversal call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraversalReport {
    /// Start vertex.
    pub start: usize,
    /// Serial or parallel execution.
    pub mode: TraversalMode,
    /// Expander used by the level scheduler; `None` for the serial fallback.
    pub expander: Option<ExpanderKind>,
    /// Discovery events counted, equal to [`Graph::visited_count`] after the call.
    pub visited: usize,
    /// Number of non-empty levels expanded.
    pub levels: usize,
    /// Levels that were handed to the worker pool.
    pub parallel_levels: usize,
    /// How the worker pool stopped; `None` for the serial fallback.
    pub teardown: Option<Teardown>,
    #[serde(skip)]
    reached: Vec<bool>,
}

impl TraversalReport {
    /// Returns `true` if `vertex` was marked visited.
    pub fn is_reached(&self, vertex: usize) -> bool {
        self.reached.get(vertex).copied().unwrap_or(false)
    }

    /// Ids of all marked vertices, ascending.
    pub fn reached_vertices(&self) -> Vec<usize> {
        self.reached
            .iter()
            .enumerate()
            .filter_map(|(v, &r)| r.then_some(v))
            .collect()
    }

    /// Number of marked vertices.
    pub fn reached_count(&self) -> usize {
        self.reached.iter().filter(|&&r| r).count()
    }

    /// Returns `true` if some vertex was counted more than once.
    ///
    /// Never true for the serial fallback or [`ExpanderKind::AtomicClaim`].
    pub fn is_overcounted(&self) -> bool {
        self.visited != self.reached_count()
    }
}

impl Graph {
    /// Traverses from `start`, choosing serial or parallel execution by graph size.
    ///
    /// # Errors
    /// Returns [`BfsError::InvalidStartVertex`] if `start` is not a vertex.
    pub fn traverse(&mut self, start: usize) -> Result<TraversalReport> {
        self.traverse_with(start, &TraversalConfig::default())
    }

    /// Traverses from `start` on `workers` workers, bypassing the size heuristic.
    ///
    /// # Errors
    /// Returns [`BfsError::InvalidStartVertex`] or [`BfsError::InvalidWorkerCount`].
    pub fn traverse_with_workers(
        &mut self,
        start: usize,
        workers: usize,
    ) -> Result<TraversalReport> {
        self.traverse_custom(
            start,
            workers,
            DEFAULT_PARALLELISM_THRESHOLD,
            ExpanderKind::AtomicClaim,
        )
    }

    /// Traverses from `start` with full control over the level scheduler.
    ///
    /// # Errors
    /// Returns [`BfsError::InvalidStartVertex`] or [`BfsError::InvalidWorkerCount`].
    pub fn traverse_custom(
        &mut self,
        start: usize,
        workers: usize,
        threshold: usize,
        expander: ExpanderKind,
    ) -> Result<TraversalReport> {
        let config = TraversalConfig::default()
            .with_workers(workers)
            .with_threshold(threshold)
            .with_expander(expander);
        self.traverse_with(start, &config)
    }

    /// Traverses from `start` on `workers` workers with the check-then-set expander.
    ///
    /// The visited count may exceed the reachable set; see [`CheckThenSet`].
    ///
    /// # Errors
    /// Returns [`BfsError::InvalidStartVertex`] or [`BfsError::InvalidWorkerCount`].
    pub fn traverse_broken(&mut self, start: usize, workers: usize) -> Result<TraversalReport> {
        self.traverse_custom(
            start,
            workers,
            DEFAULT_PARALLELISM_THRESHOLD,
            ExpanderKind::CheckThenSet,
        )
    }

    /// Traverses from `start` with the single-threaded fallback.
    ///
    /// # Errors
    /// Returns [`BfsError::InvalidStartVertex`] if `start` is not a vertex.
    pub fn traverse_serial(&mut self, start: usize) -> Result<TraversalReport> {
        self.check_start(start)?;
        Ok(self.run_serial(start))
    }

    /// Traverses from `start` as described by `config`.
    ///
    /// # Errors
    /// Returns [`BfsError::InvalidStartVertex`] if `start` is not a vertex, and
    /// the errors of [`TraversalConfig::validate`].
    pub fn traverse_with(
        &mut self,
        start: usize,
        config: &TraversalConfig,
    ) -> Result<TraversalReport> {
        self.check_start(start)?;
        config.validate()?;

        info!(
            vertices = self.vertex_count(),
            edges = self.edge_count(),
            start,
            "starting traversal"
        );

        let workers = match config.workers {
            Some(workers) => workers,
            None if config
                .heuristic
                .prefers_serial(self.vertex_count(), self.edge_count()) =>
            {
                debug!(
                    vertices = self.vertex_count(),
                    edges = self.edge_count(),
                    "graph too small or sparse for workers, running serially"
                );
                return Ok(self.run_serial(start));
            }
            None => config.heuristic.auto_workers(),
        };

        let plan = LevelPlan {
            start,
            workers,
            threshold: config.parallelism_threshold,
            shutdown_timeout: config.shutdown_timeout(),
        };
        Ok(self.run_levels(plan, config.expander))
    }

    fn check_start(&self, start: usize) -> Result<()> {
        if start < self.vertex_count() {
            Ok(())
        } else {
            Err(BfsError::InvalidStartVertex {
                start,
                vertex_count: self.vertex_count(),
            })
        }
    }

    fn run_serial(&mut self, start: usize) -> TraversalReport {
        self.reset_visited_count();
        let outcome = serial::bfs(self.adjacency(), start, self.visited_counter());
        let report = TraversalReport {
            start,
            mode: TraversalMode::Serial,
            expander: None,
            visited: self.visited_count(),
            levels: outcome.levels,
            parallel_levels: 0,
            teardown: None,
            reached: outcome.reached,
        };
        debug!(visited = report.visited, levels = report.levels, "serial traversal finished");
        report
    }

    fn run_levels(&mut self, plan: LevelPlan, kind: ExpanderKind) -> TraversalReport {
        self.reset_visited_count();
        let graph = &*self;
        let outcome = match kind {
            ExpanderKind::AtomicClaim => scheduler::run(&AtomicClaim, graph, plan),
            ExpanderKind::CheckThenSet => scheduler::run(&CheckThenSet, graph, plan),
        };
        let report = TraversalReport {
            start: plan.start,
            mode: TraversalMode::Parallel {
                workers: plan.workers,
                threshold: plan.threshold,
            },
            expander: Some(kind),
            visited: graph.visited_count(),
            levels: outcome.levels,
            parallel_levels: outcome.parallel_levels,
            teardown: Some(outcome.teardown),
            reached: outcome.reached,
        };
        debug!(
            visited = report.visited,
            levels = report.levels,
            parallel_levels = report.parallel_levels,
            expander = ?kind,
            "level-synchronized traversal finished"
        );
        report
    }
}
