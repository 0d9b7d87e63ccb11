//! Concurrency building blocks for the level-synchronized traversal.
//!
//! Ghost brands scope shared state to one traversal; they do not synchronize
//! anything. Synchronization comes from the branded atomics, the frontier
//! queue, and the pool's countdown latches.

pub mod atomic;
pub mod latch;
pub mod pool;

pub use latch::CountdownLatch;
pub use pool::{LevelPool, LevelTask, Teardown};
