use std::hint::black_box;
use std::time::Instant;

use perf_bench::*;

fn main() {
    let num_vertices = GRID_SIDE * GRID_SIDE;
    let graph = build_graph(num_vertices, generate_grid_edges(GRID_SIDE));
    let queries = generate_queries(num_vertices);

    let start_time = Instant::now();
    let checksum = run_queries(&graph, &queries);
    let elapsed_time = start_time.elapsed();

    let final_checksum = black_box(checksum);

    println!(
        "--- Grid Benchmark Results ({}x{} grid, period {}) ---",
        GRID_SIDE, GRID_SIDE, PERIOD
    );
    println!("Queries: {}", queries.len());
    println!("Checksum: {}", final_checksum);
    println!("Elapsed Time: {:?}", elapsed_time);
}
