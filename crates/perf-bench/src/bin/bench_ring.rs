use std::hint::black_box;
use std::time::Instant;

use perf_bench::*;

fn main() {
    let graph = build_graph(RING_VERTICES, generate_ring_edges(RING_VERTICES));
    let queries = generate_queries(RING_VERTICES);

    let start_time = Instant::now();
    let checksum = run_queries(&graph, &queries);
    let elapsed_time = start_time.elapsed();

    let final_checksum = black_box(checksum);

    println!(
        "--- Ring Benchmark Results ({} vertices, {} edges, period {}) ---",
        graph.num_vertices(),
        graph.num_edges(),
        graph.period()
    );
    println!("Queries: {}", queries.len());
    println!("Checksum: {}", final_checksum);
    println!("Elapsed Time: {:?}", elapsed_time);
}
