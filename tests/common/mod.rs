//! Deterministic graph generators shared by the integration tests and benches.

#![allow(dead_code)]

use parbfs::Graph;

/// SplitMix64: small, seedable, good enough to scatter edges.
pub struct SplitMix64(u64);

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform-ish value in `0..bound`. `bound` must be non-zero.
    pub fn below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

/// A graph whose every vertex is reachable from 0: a random spanning tree rooted
/// at 0, topped up with random edges until it holds `edges` distinct edges (or
/// the attempt budget runs out on very dense requests).
pub fn connected(vertices: usize, edges: usize, seed: u64) -> Graph {
    let mut rng = SplitMix64::new(seed);
    let mut graph = Graph::new(vertices);
    for v in 1..vertices {
        let parent = rng.below(v);
        graph.add_edge(parent, v).unwrap();
    }
    let mut attempts = edges.saturating_mul(4);
    while graph.edge_count() < edges && attempts > 0 {
        let src = rng.below(vertices);
        let dest = rng.below(vertices);
        graph.add_edge(src, dest).unwrap();
        attempts -= 1;
    }
    graph
}

/// A graph with `edges` random edge attempts and no connectivity guarantee.
pub fn random(vertices: usize, edges: usize, seed: u64) -> Graph {
    let mut rng = SplitMix64::new(seed);
    let mut graph = Graph::new(vertices);
    if vertices == 0 {
        return graph;
    }
    for _ in 0..edges {
        let src = rng.below(vertices);
        let dest = rng.below(vertices);
        graph.add_edge(src, dest).unwrap();
    }
    graph
}

/// Vertices reachable from `start`, computed with petgraph's `Bfs` as an oracle.
pub fn oracle_reachable(graph: &Graph, start: usize) -> Vec<usize> {
    use petgraph::graph::{DiGraph, NodeIndex};
    use petgraph::visit::Bfs;

    let mut pg = DiGraph::<(), ()>::with_capacity(graph.vertex_count(), graph.edge_count());
    for _ in 0..graph.vertex_count() {
        pg.add_node(());
    }
    for src in 0..graph.vertex_count() {
        for &dest in graph.neighbors(src) {
            pg.add_edge(NodeIndex::new(src), NodeIndex::new(dest), ());
        }
    }

    let mut bfs = Bfs::new(&pg, NodeIndex::new(start));
    let mut reached = Vec::new();
    while let Some(node) = bfs.next(&pg) {
        reached.push(node.index());
    }
    reached.sort_unstable();
    reached
}
