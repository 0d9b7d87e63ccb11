//! The frontier of one BFS level.
//!
//! A frontier holds "discovered, not yet expanded" vertex ids. It is an unordered
//! MPMC queue: any worker may push while expanding and any worker may pop its
//! next vertex, with no external locking. Duplicates are allowed; the correct
//! expander never produces them, the check-then-set expander may.
//!
//! Push and pop take `&GhostToken<'brand>` as proof that the caller belongs to the
//! traversal that owns the frontier.

use core::marker::PhantomData;

use crossbeam_deque::{Injector, Steal};
use crossbeam_utils::Backoff;

use crate::GhostToken;

/// A branded, lock-free multiset of vertex ids.
pub struct Frontier<'brand> {
    queue: Injector<usize>,
    _brand: PhantomData<&'brand mut ()>,
}

impl<'brand> Frontier<'brand> {
    /// Creates an empty frontier.
    pub fn new() -> Self {
        Self {
            queue: Injector::new(),
            _brand: PhantomData,
        }
    }

    /// Inserts `vertex`.
    #[inline]
    pub fn push(&self, _token: &GhostToken<'brand>, vertex: usize) {
        self.queue.push(vertex);
    }

    /// Removes some vertex, or returns `None` once the frontier is empty.
    #[inline]
    pub fn pop(&self, _token: &GhostToken<'brand>) -> Option<usize> {
        let backoff = Backoff::new();
        loop {
            match self.queue.steal() {
                Steal::Success(vertex) => return Some(vertex),
                Steal::Empty => return None,
                Steal::Retry => backoff.spin(),
            }
        }
    }

    /// Number of queued vertices (a snapshot under concurrent use).
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if no vertex is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for Frontier<'_> {
    fn default() -> Self {
        Self::new()
    }
}
