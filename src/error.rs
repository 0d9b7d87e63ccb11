//! Error types for parbfs
//!
//! Every error is raised synchronously, before a traversal touches any state:
//! - invalid arguments to a traversal entry point
//! - edge endpoints outside the graph
//! - configuration that cannot drive a traversal
//!
//! Worker cancellation during pool teardown is not an error; it is reported on
//! the [`TraversalReport`](crate::TraversalReport).

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, BfsError>;

/// Errors returned by graph construction and traversal entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BfsError {
    /// The start vertex is not a vertex of the graph.
    #[error("invalid start vertex {start}: graph has {vertex_count} vertices")]
    InvalidStartVertex {
        /// Requested start vertex.
        start: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },

    /// A traversal was requested with no workers.
    #[error("invalid number of workers: {0}")]
    InvalidWorkerCount(usize),

    /// An edge endpoint is outside `0..vertex_count`.
    #[error("edge {src} -> {dest} out of bounds for {vertex_count} vertices")]
    EdgeOutOfBounds {
        /// Source endpoint.
        src: usize,
        /// Destination endpoint.
        dest: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },

    /// A configuration value is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration document could not be parsed.
    #[error("failed to parse configuration: {message}")]
    ConfigParse {
        /// Parser message, including line and column.
        message: String,
    },
}

impl From<serde_json::Error> for BfsError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse {
            message: err.to_string(),
        }
    }
}
