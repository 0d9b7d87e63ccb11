//! Vertex expanders: examine one vertex's neighbors and enqueue the new ones.
//!
//! Two implementations share the [`Expander`] interface and are selected by the
//! caller through [`ExpanderKind`]:
//! - [`AtomicClaim`] claims each neighbor with one compare-and-set. Only the
//!   worker that flips a marker counts and enqueues the vertex, so every vertex is
//!   counted exactly once per traversal regardless of interleaving.
//! - [`CheckThenSet`] reads the marker, then writes it in a separate step. Two
//!   workers can both read "unvisited" before either writes, and then both count
//!   and enqueue the vertex. This over-counting is the variant's contract; it
//!   exists to be observed by race tests and must keep its two-step shape.

use core::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use crate::graph::{Frontier, VisitedFlags};
use crate::GhostToken;

/// Selects the expander a traversal runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExpanderKind {
    /// Indivisible compare-and-set claim. Discovers each vertex exactly once.
    #[default]
    AtomicClaim,
    /// Separate check and set. May discover a vertex more than once.
    CheckThenSet,
}

/// Shared, read-only view of one traversal's state handed to expanders.
pub struct ExpandContext<'a, 'brand> {
    pub(crate) adjacency: &'a [Vec<usize>],
    pub(crate) visited: &'a VisitedFlags<'brand>,
    pub(crate) counter: &'a AtomicUsize,
}

impl<'a, 'brand> ExpandContext<'a, 'brand> {
    pub(crate) fn new(
        adjacency: &'a [Vec<usize>],
        visited: &'a VisitedFlags<'brand>,
        counter: &'a AtomicUsize,
    ) -> Self {
        Self {
            adjacency,
            visited,
            counter,
        }
    }
}

/// Expands one vertex into the next-level frontier.
pub trait Expander: Sync {
    /// Tag of this implementation.
    const KIND: ExpanderKind;

    /// Visits the out-neighbors of `vertex`, counting and pushing to `next` every
    /// neighbor this call discovers.
    fn expand<'brand>(
        &self,
        token: &GhostToken<'brand>,
        ctx: &ExpandContext<'_, 'brand>,
        vertex: usize,
        next: &Frontier<'brand>,
    );
}

/// The compare-and-set expander.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomicClaim;

impl Expander for AtomicClaim {
    const KIND: ExpanderKind = ExpanderKind::AtomicClaim;

    #[inline]
    fn expand<'brand>(
        &self,
        token: &GhostToken<'brand>,
        ctx: &ExpandContext<'_, 'brand>,
        vertex: usize,
        next: &Frontier<'brand>,
    ) {
        for &neighbor in &ctx.adjacency[vertex] {
            // The RMW total order on one flag admits a single winner.
            if ctx.visited.try_claim(neighbor, Ordering::Relaxed) {
                ctx.counter.fetch_add(1, Ordering::Relaxed);
                next.push(token, neighbor);
            }
        }
    }
}

/// The check-then-set expander. Racy on purpose.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckThenSet;

impl Expander for CheckThenSet {
    const KIND: ExpanderKind = ExpanderKind::CheckThenSet;

    #[inline]
    fn expand<'brand>(
        &self,
        token: &GhostToken<'brand>,
        ctx: &ExpandContext<'_, 'brand>,
        vertex: usize,
        next: &Frontier<'brand>,
    ) {
        for &neighbor in &ctx.adjacency[vertex] {
            // Other workers may mark `neighbor` between this load and the store.
            if !ctx.visited.is_visited(neighbor, Ordering::Relaxed) {
                ctx.visited.mark(neighbor, Ordering::Relaxed);
                ctx.counter.fetch_add(1, Ordering::Relaxed);
                next.push(token, neighbor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drained<'brand>(token: &GhostToken<'brand>, frontier: &Frontier<'brand>) -> Vec<usize> {
        let mut out = Vec::new();
        while let Some(v) = frontier.pop(token) {
            out.push(v);
        }
        out.sort_unstable();
        out
    }

    // 0 -> 1, 2 ; 1 -> 2, 3
    fn adjacency() -> Vec<Vec<usize>> {
        vec![vec![1, 2], vec![2, 3], vec![], vec![]]
    }

    #[test]
    fn atomic_claim_skips_visited_neighbors() {
        GhostToken::new(|token| {
            let adjacency = adjacency();
            let visited = VisitedFlags::new(4);
            let counter = AtomicUsize::new(0);
            let ctx = ExpandContext::new(&adjacency, &visited, &counter);
            let next = Frontier::new();

            AtomicClaim.expand(&token, &ctx, 0, &next);
            AtomicClaim.expand(&token, &ctx, 1, &next);

            assert_eq!(drained(&token, &next), vec![1, 2, 3]);
            assert_eq!(counter.load(Ordering::Relaxed), 3);
        });
    }

    #[test]
    fn check_then_set_matches_when_unshared() {
        GhostToken::new(|token| {
            let adjacency = adjacency();
            let visited = VisitedFlags::new(4);
            let counter = AtomicUsize::new(0);
            let ctx = ExpandContext::new(&adjacency, &visited, &counter);
            let next = Frontier::new();

            CheckThenSet.expand(&token, &ctx, 0, &next);
            CheckThenSet.expand(&token, &ctx, 1, &next);

            assert_eq!(drained(&token, &next), vec![1, 2, 3]);
            assert_eq!(counter.load(Ordering::Relaxed), 3);
            assert_eq!(visited.snapshot(), vec![false, true, true, true]);
        });
    }

    #[test]
    fn concurrent_atomic_claims_discover_each_vertex_once() {
        const FANOUT: usize = 2_048;
        GhostToken::new(|token| {
            // Eight hubs all pointing at the same targets.
            let mut adjacency = vec![(8..8 + FANOUT).collect::<Vec<_>>(); 8];
            adjacency.resize(8 + FANOUT, Vec::new());
            let visited = VisitedFlags::new(adjacency.len());
            let counter = AtomicUsize::new(0);
            let ctx = ExpandContext::new(&adjacency, &visited, &counter);
            let next = Frontier::new();

            std::thread::scope(|scope| {
                for hub in 0..8 {
                    let (token, ctx, next) = (&token, &ctx, &next);
                    scope.spawn(move || AtomicClaim.expand(token, ctx, hub, next));
                }
            });

            assert_eq!(counter.load(Ordering::Relaxed), FANOUT);
            assert_eq!(next.len(), FANOUT);
        });
    }

    #[test]
    fn kinds_are_tagged() {
        assert_eq!(AtomicClaim::KIND, ExpanderKind::AtomicClaim);
        assert_eq!(CheckThenSet::KIND, ExpanderKind::CheckThenSet);
        assert_eq!(ExpanderKind::default(), ExpanderKind::AtomicClaim);
    }
}
