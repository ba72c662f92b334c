// ----------------------------
// Benchmark graph generators
// ----------------------------

use common::types::{EdgeRecord, Query};
use periodic_path_core::{PathSolver, PeriodicGraph, TimeExpandedDijkstra};

pub const RING_VERTICES: usize = 2_000;
pub const GRID_SIDE: usize = 60;
pub const PERIOD: usize = 4;
pub const NUM_QUERIES: usize = 50;

/// Phase-dependent weight cycle, varied by edge index so that no two
/// neighbouring edges share the same cheap phase.
fn weights_for(i: usize) -> Vec<u32> {
    (0..PERIOD)
        .map(|phase| 1 + ((i + phase * 7) % 13) as u32)
        .collect()
}

/// Directed ring `i -> i+1` with chords `i -> i+3` and self loops, which
/// gives the search several phases to choose from at every vertex.
pub fn generate_ring_edges(n: usize) -> Vec<EdgeRecord> {
    (0..n)
        .flat_map(|i| {
            [
                (i, (i + 1) % n, weights_for(i)),
                (i, (i + 3) % n, weights_for(i + 1)),
                (i, i, weights_for(i + 2)),
            ]
        })
        .collect()
}

/// `side x side` grid with right and down edges.
pub fn generate_grid_edges(side: usize) -> Vec<EdgeRecord> {
    let mut edges = Vec::with_capacity(2 * side * side);
    for row in 0..side {
        for col in 0..side {
            let v = row * side + col;
            if col + 1 < side {
                edges.push((v, v + 1, weights_for(v)));
            }
            if row + 1 < side {
                edges.push((v, v + side, weights_for(v + side)));
            }
        }
    }
    edges
}

pub fn build_graph(num_vertices: usize, edges: Vec<EdgeRecord>) -> PeriodicGraph {
    PeriodicGraph::from_edges(num_vertices, PERIOD, edges).expect("generated edges are valid")
}

/// Evenly spread queries so the checksum is stable between runs.
pub fn generate_queries(num_vertices: usize) -> Vec<Query> {
    (0..NUM_QUERIES)
        .map(|i| Query::new((i * 37) % num_vertices, (i * 7919 + num_vertices / 2) % num_vertices))
        .collect()
}

/// Runs every query and sums the distances found.
pub fn run_queries(graph: &PeriodicGraph, queries: &[Query]) -> u64 {
    TimeExpandedDijkstra
        .find_all(graph, queries)
        .into_iter()
        .filter_map(|result| result.ok().flatten())
        .map(|path| path.distance)
        .sum()
}
