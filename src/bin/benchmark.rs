use std::time::{Duration, Instant};

use rand::prelude::*;
use rand::rngs::StdRng;

use map_route::graph::generators::generate_random_map;
use map_route::graph::{encode_map, Graph, GraphLoader};
use map_route::{Dijkstra, Query, RoadMap, ShortestPathAlgorithm};

// Random queries over the whole map
fn random_queries(map: &RoadMap, count: usize, seed: u64) -> Vec<Query> {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = map.vertex_count();
    (0..count)
        .map(|_| Query::new(rng.gen_range(0..n), rng.gen_range(0..n)))
        .collect()
}

fn run_sequential(solver: &Dijkstra, map: &RoadMap, queries: &[Query]) -> (Duration, usize) {
    let start = Instant::now();
    let mut settled = 0;
    for query in queries {
        if let Ok(result) = solver.solve(map, query.source, query.target) {
            settled += result.settled;
        }
    }
    (start.elapsed(), settled)
}

fn run_parallel(solver: &Dijkstra, map: &RoadMap, queries: &[Query]) -> Duration {
    let start = Instant::now();
    let results = solver.solve_many(map, queries);
    let failures = results.iter().filter(|r| r.is_err()).count();
    if failures > 0 {
        println!("  - {} queries failed", failures);
    }
    start.elapsed()
}

fn main() {
    env_logger::init();

    let map_sizes = vec![
        // Small maps
        1_000,
        10_000,
        // Medium maps
        100_000,
        // Large maps - if memory allows
        500_000,
    ];

    let arcs_per_node = 3;
    let queries_per_map = 64;

    println!("=====================================================");
    println!("Benchmark: sequential vs parallel Dijkstra queries");
    println!("{} random arcs per node, {} queries per map", arcs_per_node, queries_per_map);
    println!("=====================================================");

    let solver = Dijkstra::new();
    let loader = GraphLoader::new();
    let mut results = Vec::new();

    for &size in &map_sizes {
        println!("\nGenerating random map with {} nodes...", size);
        let generated = generate_random_map(size, arcs_per_node, 1_000_000, size as u64);

        let bytes = match encode_map(&generated) {
            Ok(bytes) => bytes,
            Err(e) => {
                println!("  - Failed to encode map: {}", e);
                continue;
            }
        };
        let load_start = Instant::now();
        let map = match loader.load_bytes(&bytes) {
            Ok(map) => map,
            Err(e) => {
                println!("  - Failed to reload map: {}", e);
                continue;
            }
        };
        let load_time = load_start.elapsed();
        println!(
            "Loaded {} nodes / {} arcs ({} bytes) in {:?}",
            map.vertex_count(),
            map.edge_count(),
            bytes.len(),
            load_time
        );

        let queries = random_queries(&map, queries_per_map, 7);
        let (sequential_time, settled) = run_sequential(&solver, &map, &queries);
        let parallel_time = run_parallel(&solver, &map, &queries);

        println!(
            "  - Sequential: {:?} ({} vertices settled), parallel: {:?}",
            sequential_time, settled, parallel_time
        );
        results.push((size, load_time, sequential_time, parallel_time));
    }

    println!("\n=====================================================");
    println!("Summary of Results");
    println!("=====================================================");
    println!(
        "{:<10} | {:<12} | {:<15} | {:<15} | {:<10}",
        "Nodes", "Load (ms)", "Sequential (ms)", "Parallel (ms)", "Speedup"
    );
    println!("-----------------------------------------------------");

    for (size, load_time, sequential_time, parallel_time) in &results {
        let speedup = sequential_time.as_secs_f64() / parallel_time.as_secs_f64().max(f64::EPSILON);
        println!(
            "{:<10} | {:<12} | {:<15} | {:<15} | {:<10.2}",
            size,
            load_time.as_millis(),
            sequential_time.as_millis(),
            parallel_time.as_millis(),
            speedup
        );
    }
}
