//! Branded, lock-free atomic primitives.
//!
//! These keep the *ghost/brand* aspect purely compile-time: the wrapper compiles
//! down to the underlying hardware atomic.

/// Branded `AtomicBool`.
pub mod bool;

pub use bool::GhostAtomicBool;
