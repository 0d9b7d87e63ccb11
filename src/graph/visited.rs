//! Branded visited sets for graph traversals.
//!
//! `VisitedFlags` keeps one atomic marker per vertex (`false` = unvisited,
//! `true` = visited). It offers both halves of the traversal's visited protocol:
//! - [`VisitedFlags::try_claim`]: the indivisible compare-and-set claim. Exactly one
//!   caller observes the `false -> true` transition of a given vertex.
//! - [`VisitedFlags::is_visited`] / [`VisitedFlags::mark`]: separate read and write,
//!   used only by the check-then-set expander. Nothing orders a read against
//!   another worker's write, so two callers may both see `false`.
//!
//! Markers are per-slot atomics rather than one lock, so claims on unrelated
//! vertices never serialize.

use core::sync::atomic::Ordering;

use crate::concurrency::atomic::GhostAtomicBool;

/// A per-vertex visited flag vector, branded to one traversal.
pub struct VisitedFlags<'brand> {
    flags: Box<[GhostAtomicBool<'brand>]>,
}

impl<'brand> VisitedFlags<'brand> {
    /// Creates `len` unvisited markers.
    pub fn new(len: usize) -> Self {
        let flags = (0..len).map(|_| GhostAtomicBool::new(false)).collect();
        Self { flags }
    }

    /// Number of markers.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns `true` if there are no markers.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Returns `true` iff this call flipped `idx` from unvisited to visited.
    ///
    /// # Panics
    /// Panics if `idx >= self.len()`.
    #[inline(always)]
    pub fn try_claim(&self, idx: usize, order: Ordering) -> bool {
        self.flags[idx].test_and_set(order)
    }

    /// Reads the marker of `idx`.
    #[inline(always)]
    pub fn is_visited(&self, idx: usize, order: Ordering) -> bool {
        self.flags[idx].load(order)
    }

    /// Writes the visited marker of `idx` unconditionally.
    #[inline(always)]
    pub fn mark(&self, idx: usize, order: Ordering) {
        self.flags[idx].store(true, order);
    }

    /// Copies the markers out of the brand.
    pub fn snapshot(&self) -> Vec<bool> {
        self.flags.iter().map(|f| f.load(Ordering::Acquire)).collect()
    }
}
