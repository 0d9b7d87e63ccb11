//! # `parbfs` - Level-Synchronized Parallel BFS
//!
//! Breadth-first traversal of a directed graph that expands each level either on
//! the calling thread or across a fixed worker pool, with a strict barrier between
//! levels.
//!
//! ## Safety Guarantees
//!
//! ### Visited protocol
//! - **Atomic claim**: a vertex is discovered by the one worker whose
//!   compare-and-set flips its marker from unvisited to visited. That worker alone
//!   counts it and enqueues it, so the visited counter ends equal to the size of
//!   the reachable set.
//! - **Per-vertex granularity**: markers are independent atomics; unrelated
//!   vertices never contend on a shared lock.
//! - **Check-then-set**: an alternate expander separates the marker read from the
//!   write. It stays memory-safe but may count a vertex more than once. It is
//!   reachable only when selected explicitly through [`ExpanderKind`].
//!
//! ### Scoping
//! - **Branded state**: visited markers and frontiers are created inside
//!   [`GhostToken::new`] for each call, so they cannot outlive the traversal.
//! - **Exclusive graph access**: traversals take `&mut Graph`; the adjacency lists
//!   cannot change while workers read them.
//!
//! ## Architecture
//!
//! 1. **Graph store** ([`Graph`]): adjacency lists plus the visited counter.
//! 2. **Expanders** ([`AtomicClaim`], [`CheckThenSet`]): expand one vertex.
//! 3. **Level pool** ([`concurrency::LevelPool`]): fixed worker pool, one drain
//!    task per worker per level, countdown latch as the level barrier.
//! 4. **Scheduler**: per level, drains small frontiers serially and large ones on
//!    the pool.
//! 5. **Serial fallback**: plain FIFO BFS for small or sparse graphs.
//!
//! ## Example
//!
//! ```rust
//! use parbfs::Graph;
//!
//! let mut graph = Graph::new(6);
//! for (src, dest) in [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)] {
//!     graph.add_edge(src, dest).unwrap();
//! }
//!
//! let report = graph.traverse(0).unwrap();
//! assert_eq!(graph.visited_count(), 5);
//! assert!(!report.is_reached(5));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod concurrency;
pub mod config;
pub mod error;
pub mod graph;
pub mod token;
pub mod traversal;

pub use concurrency::Teardown;
pub use config::{
    DispatchHeuristic, TraversalConfig, DEFAULT_PARALLELISM_THRESHOLD, DEFAULT_SHUTDOWN_TIMEOUT_MS,
};
pub use error::{BfsError, Result};
pub use graph::Graph;
pub use token::GhostToken;
pub use traversal::{
    AtomicClaim, CheckThenSet, ExpandContext, Expander, ExpanderKind, TraversalMode,
    TraversalReport,
};

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // Tokens are ZSTs.
    assert!(mem::size_of::<GhostToken<'static>>() == 0);

    // One byte per visited marker.
    assert!(
        mem::size_of::<concurrency::atomic::GhostAtomicBool<'static>>()
            == mem::size_of::<core::sync::atomic::AtomicBool>()
    );
};
