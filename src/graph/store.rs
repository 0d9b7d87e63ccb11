//! A directed adjacency-list graph with a traversal visited counter.
//!
//! Edge insertion is idempotent: [`Graph::add_edge`] checks the source's list
//! before appending, so adjacency lists never hold duplicates.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `add_edge` | \(O(\text{out-degree})\) | Checks for existence first |
//! | `neighbors` | \(O(1)\) | Borrows the adjacency list |
//! | `visited_count` | \(O(1)\) | One atomic load |

use core::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_utils::CachePadded;

use crate::error::{BfsError, Result};

/// A directed graph over vertices `0..vertex_count`.
#[derive(Debug, Default)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
    // Every worker of a parallel level increments this; keep it on its own line.
    visited: CachePadded<AtomicUsize>,
}

impl Graph {
    /// Creates a graph with `vertex_count` vertices and zero edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            edge_count: 0,
            visited: CachePadded::new(AtomicUsize::new(0)),
        }
    }

    /// Creates a graph from an edge list, skipping duplicate edges.
    ///
    /// # Errors
    /// Returns [`BfsError::EdgeOutOfBounds`] for the first edge with an endpoint
    /// outside `0..vertex_count`.
    pub fn from_edges<I>(vertex_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::new(vertex_count);
        for (src, dest) in edges {
            graph.add_edge(src, dest)?;
        }
        Ok(graph)
    }

    /// Adds a directed edge `src -> dest` if it is not already present.
    ///
    /// Returns `true` if the edge was inserted, `false` if it already existed.
    ///
    /// # Errors
    /// Returns [`BfsError::EdgeOutOfBounds`] if either endpoint is not a vertex.
    pub fn add_edge(&mut self, src: usize, dest: usize) -> Result<bool> {
        let vertex_count = self.vertex_count();
        if src >= vertex_count || dest >= vertex_count {
            return Err(BfsError::EdgeOutOfBounds {
                src,
                dest,
                vertex_count,
            });
        }
        let nbrs = &mut self.adjacency[src];
        if nbrs.contains(&dest) {
            return Ok(false);
        }
        nbrs.push(dest);
        self.edge_count += 1;
        Ok(true)
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of distinct edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the out-neighbors of `vertex` in insertion order.
    ///
    /// # Panics
    /// Panics if `vertex` is out of bounds.
    #[inline]
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        assert!(vertex < self.vertex_count(), "vertex {vertex} out of bounds");
        &self.adjacency[vertex]
    }

    /// Returns the out-degree of `vertex`.
    ///
    /// # Panics
    /// Panics if `vertex` is out of bounds.
    pub fn out_degree(&self, vertex: usize) -> usize {
        self.neighbors(vertex).len()
    }

    /// Returns the number of discovery events counted by the last traversal.
    pub fn visited_count(&self) -> usize {
        self.visited.load(Ordering::Acquire)
    }

    pub(crate) fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    pub(crate) fn visited_counter(&self) -> &AtomicUsize {
        &self.visited
    }

    pub(crate) fn reset_visited_count(&mut self) {
        *self.visited.get_mut() = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_edges_are_ignored() {
        let mut graph = Graph::new(3);
        assert!(graph.add_edge(0, 1).unwrap());
        assert!(!graph.add_edge(0, 1).unwrap());
        assert!(graph.add_edge(0, 2).unwrap());
        assert_eq!(graph.neighbors(0), &[1, 2]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn out_of_range_endpoints_are_rejected() {
        let mut graph = Graph::new(2);
        assert_eq!(
            graph.add_edge(2, 0),
            Err(BfsError::EdgeOutOfBounds {
                src: 2,
                dest: 0,
                vertex_count: 2
            })
        );
        assert!(matches!(
            graph.add_edge(0, 5),
            Err(BfsError::EdgeOutOfBounds { dest: 5, .. })
        ));
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.neighbors(0).is_empty());
    }

    #[test]
    fn self_loops_are_edges() {
        let mut graph = Graph::new(1);
        assert!(graph.add_edge(0, 0).unwrap());
        assert_eq!(graph.out_degree(0), 1);
    }

    #[test]
    fn from_edges_counts_distinct_edges() {
        let graph = Graph::from_edges(4, [(0, 1), (1, 2), (0, 1), (2, 3)]).unwrap();
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.visited_count(), 0);
        assert!(Graph::from_edges(2, [(0, 1), (1, 2)]).is_err());
    }

    #[test]
    fn empty_graph() {
        let graph = Graph::new(0);
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }
}
