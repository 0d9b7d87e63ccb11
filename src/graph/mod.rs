//! Graph storage and the per-traversal state built on top of it.
//!
//! - `store`: the adjacency-list [`Graph`] and its visited counter
//! - `visited`: branded per-vertex atomic markers
//! - `frontier`: branded lock-free level queues

pub mod frontier;
pub mod store;
pub mod visited;

pub use frontier::Frontier;
pub use store::Graph;
pub use visited::VisitedFlags;
