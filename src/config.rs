//! Traversal configuration.
//!
//! The size/density cut-offs and the per-level parallelism threshold are
//! tuning values, not invariants. They default to the values below and can be
//! overridden in code or loaded from JSON:
//!
//! ```rust
//! use parbfs::{ExpanderKind, TraversalConfig};
//!
//! let json = r#"{ "workers": 8, "parallelism_threshold": 4 }"#;
//! let config = TraversalConfig::from_json(json).unwrap();
//! assert_eq!(config.workers, Some(8));
//! assert_eq!(config.expander, ExpanderKind::AtomicClaim);
//! assert_eq!(config.heuristic.min_vertices, 1_000);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BfsError, Result};
use crate::traversal::ExpanderKind;

/// Default per-level threshold: a level runs in parallel only when its
/// frontier holds at least `workers * DEFAULT_PARALLELISM_THRESHOLD` vertices.
pub const DEFAULT_PARALLELISM_THRESHOLD: usize = 10;

/// Default bound on the pool teardown wait.
pub const DEFAULT_SHUTDOWN_TIMEOUT_MS: u64 = 5_000;

/// Size/density cut-offs for the automatic serial-or-parallel decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchHeuristic {
    /// Graphs with fewer vertices run serially.
    pub min_vertices: usize,
    /// Graphs with fewer than `min_edge_ratio * vertex_count` edges run serially.
    pub min_edge_ratio: usize,
    /// Upper bound on automatically chosen workers.
    pub max_workers: usize,
}

impl Default for DispatchHeuristic {
    fn default() -> Self {
        Self {
            min_vertices: 1_000,
            min_edge_ratio: 5,
            max_workers: 4,
        }
    }
}

impl DispatchHeuristic {
    /// Returns `true` if a graph of this size is judged too small or sparse for workers.
    pub fn prefers_serial(&self, vertex_count: usize, edge_count: usize) -> bool {
        vertex_count < self.min_vertices
            || edge_count < vertex_count.saturating_mul(self.min_edge_ratio)
    }

    /// Worker count for an automatically parallel traversal.
    pub fn auto_workers(&self) -> usize {
        let available = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
        available.min(self.max_workers).max(1)
    }
}

/// Options for [`Graph::traverse_with`](crate::Graph::traverse_with).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// `Some(n)` forces the level scheduler with `n` workers, bypassing the heuristic.
    pub workers: Option<usize>,
    /// Per-level frontier size factor below which a level is drained serially.
    pub parallelism_threshold: usize,
    /// Which vertex expander to run.
    pub expander: ExpanderKind,
    /// Cut-offs used when `workers` is `None`.
    pub heuristic: DispatchHeuristic,
    /// Bound on the pool teardown wait, in milliseconds.
    pub shutdown_timeout_ms: u64,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            workers: None,
            parallelism_threshold: DEFAULT_PARALLELISM_THRESHOLD,
            expander: ExpanderKind::default(),
            heuristic: DispatchHeuristic::default(),
            shutdown_timeout_ms: DEFAULT_SHUTDOWN_TIMEOUT_MS,
        }
    }
}

impl TraversalConfig {
    /// Parses and validates a JSON document. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`BfsError::ConfigParse`] for malformed JSON and the errors of
    /// [`validate`](Self::validate) for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Forces `workers` workers.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Sets the per-level parallelism threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallelism_threshold = threshold;
        self
    }

    /// Selects the vertex expander.
    #[must_use]
    pub fn with_expander(mut self, expander: ExpanderKind) -> Self {
        self.expander = expander;
        self
    }

    /// Sets the pool teardown bound.
    #[must_use]
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Pool teardown bound as a `Duration`.
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }

    /// Checks that the configuration can drive a traversal.
    ///
    /// # Errors
    /// - [`BfsError::InvalidWorkerCount`] if `workers` is `Some(0)`.
    /// - [`BfsError::InvalidConfig`] if `heuristic.max_workers` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(BfsError::InvalidWorkerCount(0));
        }
        if self.heuristic.max_workers == 0 {
            return Err(BfsError::InvalidConfig(
                "heuristic.max_workers must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}
