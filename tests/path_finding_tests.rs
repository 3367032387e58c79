use std::time::Duration;

use map_route::algorithm::reconstruct;
use map_route::graph::generators::{generate_grid_map, generate_random_map};
use map_route::graph::{Graph, GraphLoader, RoadMap, RoadMapBuilder};
use map_route::{Dijkstra, Error, ErrorKind, Query, ShortestPathAlgorithm};
use rand::prelude::*;
use rand::rngs::StdRng;

// Builds a map with `n` nodes at the origin and the given arcs
fn build_map(n: usize, arcs: &[(usize, usize, u32)]) -> RoadMap {
    let mut builder = RoadMapBuilder::new();
    for _ in 0..n {
        builder.add_node(0, 0);
    }
    for &(from, to, weight) in arcs {
        assert!(builder.add_arc(from, to, weight));
    }
    builder.build()
}

// Reference distances from a plain Bellman-Ford sweep
fn bellman_ford(map: &RoadMap, source: usize) -> Vec<Option<u64>> {
    let n = map.vertex_count();
    let mut dist = vec![None; n];
    dist[source] = Some(0u64);
    for _ in 0..n {
        let mut changed = false;
        for u in 0..n {
            let du = match dist[u] {
                Some(d) => d,
                None => continue,
            };
            for arc in map.outgoing_arcs(u) {
                let candidate = du + arc.weight as u64;
                if dist[arc.target].map_or(true, |d| candidate < d) {
                    dist[arc.target] = Some(candidate);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    dist
}

// Checks that the route is a walk over existing arcs whose lightest weights sum to the cost
fn assert_valid_route(map: &RoadMap, route: &[usize], source: usize, target: usize, cost: u64) {
    assert_eq!(route.first(), Some(&source), "Path should start at source");
    assert_eq!(route.last(), Some(&target), "Path should end at target");

    let mut total = 0u64;
    for pair in route.windows(2) {
        let weight = map
            .get_edge_weight(pair[0], pair[1])
            .unwrap_or_else(|| panic!("Path uses missing arc {} -> {}", pair[0], pair[1]));
        total += weight as u64;
    }
    assert_eq!(total, cost, "Route weights should sum to the reported cost");
}

#[test]
fn test_prefers_cheaper_indirect_route() {
    // 1->2 (1), 2->3 (2), 1->3 (5), 3->4 (1), ids shifted to 0-based
    let map = build_map(4, &[(0, 1, 1), (1, 2, 2), (0, 2, 5), (2, 3, 1)]);
    let dijkstra = Dijkstra::new();

    let result = dijkstra.solve(&map, 0, 3).unwrap();
    assert_eq!(result.cost, 4);
    assert_eq!(result.route().unwrap(), vec![0, 1, 2, 3]);
    let path = <Dijkstra as ShortestPathAlgorithm<RoadMap>>::get_path(&dijkstra, &result);
    assert_eq!(path.unwrap(), vec![0, 1, 2, 3]);
    assert_eq!(<Dijkstra as ShortestPathAlgorithm<RoadMap>>::name(&dijkstra), "Dijkstra");
}

#[test]
fn test_same_scenario_loaded_from_binary() {
    let mut bytes = vec![2u8];
    bytes.extend_from_slice(&4u32.to_be_bytes());
    bytes.extend_from_slice(&4u32.to_be_bytes());
    let arcs: [&[(u32, u32)]; 4] = [&[(2, 1), (3, 5)], &[(3, 2)], &[(4, 1)], &[]];
    for (i, node_arcs) in arcs.iter().enumerate() {
        bytes.extend_from_slice(&(i as u32 + 1).to_be_bytes());
        bytes.extend_from_slice(&0i32.to_be_bytes());
        bytes.extend_from_slice(&0i32.to_be_bytes());
        bytes.extend_from_slice(&(node_arcs.len() as u32).to_be_bytes());
        for (target, weight) in node_arcs.iter() {
            bytes.extend_from_slice(&target.to_be_bytes());
            bytes.extend_from_slice(&weight.to_be_bytes());
        }
    }

    let map = GraphLoader::new().load_bytes(&bytes).unwrap();
    let result = Dijkstra::new().solve(&map, 0, 3).unwrap();
    assert_eq!(result.cost, 4);
    assert_eq!(result.route().unwrap(), vec![0, 1, 2, 3]);
}

#[test]
fn test_self_path_costs_nothing() {
    let map = build_map(3, &[(0, 1, 4), (1, 0, 4), (1, 1, 0)]);
    for v in 0..3 {
        let result = Dijkstra::new().solve(&map, v, v).unwrap();
        assert_eq!(result.cost, 0);
        assert_eq!(result.route().unwrap(), vec![v]);
    }
}

#[test]
fn test_unreachable_target_is_reported() {
    // 2 can reach 0 but nothing reaches 2
    let map = build_map(3, &[(0, 1, 1), (1, 0, 1), (2, 0, 1)]);
    let err = Dijkstra::new().solve(&map, 0, 2).unwrap_err();
    assert!(matches!(err, Error::Unreachable { from: 0, to: 2 }));
    assert_eq!(err.kind(), ErrorKind::Unreachable);
    assert_eq!(err.to_string(), "No route from 0 to 2");

    // Isolated nodes
    let map = build_map(2, &[]);
    let err = Dijkstra::new().solve(&map, 1, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unreachable);
}

#[test]
fn test_out_of_range_vertices_are_rejected() {
    let map = build_map(2, &[(0, 1, 1)]);
    let err = Dijkstra::new().solve(&map, 2, 0).unwrap_err();
    assert!(matches!(err, Error::InvalidVertex(2)));
    let err = Dijkstra::new().solve(&map, 0, 5).unwrap_err();
    assert!(matches!(err, Error::InvalidVertex(5)));
    assert_eq!(err.kind(), ErrorKind::InvalidQuery);
}

#[test]
fn test_parallel_arcs_use_the_lightest() {
    let map = build_map(3, &[(0, 1, 9), (0, 1, 3), (0, 1, 7), (1, 2, 1), (0, 2, 5)]);
    let result = Dijkstra::new().solve(&map, 0, 2).unwrap();
    assert_eq!(result.cost, 4);
    assert_eq!(result.route().unwrap(), vec![0, 1, 2]);
}

#[test]
fn test_zero_weight_arcs() {
    let map = build_map(4, &[(0, 1, 0), (1, 2, 0), (2, 3, 0), (0, 3, 1)]);
    let result = Dijkstra::new().solve(&map, 0, 3).unwrap();
    assert_eq!(result.cost, 0);
    assert_eq!(result.route().unwrap(), vec![0, 1, 2, 3]);
}

#[test]
fn test_large_weights_do_not_overflow() {
    let map = build_map(3, &[(0, 1, u32::MAX), (1, 2, u32::MAX)]);
    let result = Dijkstra::new().solve(&map, 0, 2).unwrap();
    assert_eq!(result.cost, 2 * u32::MAX as u64);
}

#[test]
fn test_stops_once_target_is_settled() {
    // A long tail past the target must not be explored
    let mut arcs = vec![(0, 1, 1)];
    for v in 1..50 {
        arcs.push((v, v + 1, 10));
    }
    let map = build_map(51, &arcs);
    let result = Dijkstra::new().solve(&map, 0, 1).unwrap();
    assert_eq!(result.settled, 2);
    assert_eq!(result.distances[1], Some(1));
    assert!(result.distances[2..].iter().all(|d| d.is_none()));
}

#[test]
fn test_path_finding_simple_grid() {
    let map = generate_grid_map(10, 10, 1, 0, 0);
    let result = Dijkstra::new().solve(&map, 0, 99).unwrap();

    // Manhattan distance with unit spacing
    assert_eq!(result.cost, 18);
    let route = result.route().unwrap();
    assert_eq!(route.len(), 19);
    assert_valid_route(&map, &route, 0, 99, result.cost);
}

#[test]
fn test_matches_bellman_ford_on_random_maps() {
    let mut rng = StdRng::seed_from_u64(2024);
    let dijkstra = Dijkstra::new();

    for round in 0..20 {
        let n = rng.gen_range(2..120);
        let map = generate_random_map(n, rng.gen_range(0..5), 5_000, round);
        let source = rng.gen_range(0..n);
        let reference = bellman_ford(&map, source);

        for target in 0..n {
            let result = dijkstra.solve(&map, source, target).unwrap();
            assert_eq!(Some(result.cost), reference[target]);
            let route = result.route().unwrap();
            assert_valid_route(&map, &route, source, target, result.cost);

            // Every settled vertex carries its final distance
            for (v, d) in result.distances.iter().enumerate() {
                if let Some(d) = d {
                    assert_eq!(Some(*d), reference[v]);
                }
            }
        }
    }
}

#[test]
fn test_sparse_random_maps_with_unreachable_targets() {
    let mut rng = StdRng::seed_from_u64(77);
    let dijkstra = Dijkstra::new();

    for _ in 0..10 {
        let n = rng.gen_range(2..60);
        let mut builder = RoadMapBuilder::new();
        for _ in 0..n {
            builder.add_node(0, 0);
        }
        for _ in 0..n {
            builder.add_arc(rng.gen_range(0..n), rng.gen_range(0..n), rng.gen_range(0..20));
        }
        let map = builder.build();
        let source = rng.gen_range(0..n);
        let reference = bellman_ford(&map, source);

        for target in 0..n {
            match (dijkstra.solve(&map, source, target), reference[target]) {
                (Ok(result), Some(expected)) => assert_eq!(result.cost, expected),
                (Err(e), None) => assert_eq!(e.kind(), ErrorKind::Unreachable),
                (got, expected) => panic!(
                    "{} -> {}: got {:?}, expected {:?}",
                    source, target, got, expected
                ),
            }
        }
    }
}

#[test]
fn test_solve_many_matches_sequential() {
    let map = generate_grid_map(20, 15, 100, 30, 5);
    let dijkstra = Dijkstra::new();
    let queries: Vec<Query> = (0..40)
        .map(|i| Query::new((i * 37) % map.vertex_count(), (i * 101 + 13) % map.vertex_count()))
        .collect();

    let parallel = dijkstra.solve_many(&map, &queries);
    assert_eq!(parallel.len(), queries.len());
    for (query, result) in queries.iter().zip(parallel) {
        let expected = dijkstra.solve(&map, query.source, query.target).unwrap();
        assert_eq!(result.unwrap(), expected);
    }
}

#[test]
fn test_generous_deadline_does_not_change_results() {
    let map = generate_random_map(2_000, 3, 100_000, 11);
    let plain = Dijkstra::new().solve(&map, 3, 1_500).unwrap();
    let bounded = Dijkstra::new()
        .with_deadline(Duration::from_secs(60))
        .solve(&map, 3, 1_500)
        .unwrap();
    assert_eq!(plain, bounded);
}

#[test]
fn test_expired_deadline_aborts_long_queries() {
    let map = generate_grid_map(60, 60, 10, 0, 0);
    let err = Dijkstra::new()
        .with_deadline(Duration::ZERO)
        .solve(&map, 0, map.vertex_count() - 1)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(matches!(err, Error::DeadlineExceeded { settled: 256, .. }));
}

#[test]
fn test_reconstruct_rejects_broken_chains() {
    // Cycle between 1 and 2 that never reaches 0
    let err = reconstruct(&[None, Some(2), Some(1)], 0, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);

    // Missing link
    let err = reconstruct(&[None, None, Some(1)], 0, 2).unwrap_err();
    assert!(matches!(err, Error::BrokenPredecessorChain { vertex: 1, .. }));

    // Self-loop
    let err = reconstruct(&[None, Some(1)], 0, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);

    // Predecessor outside the table
    let err = reconstruct(&[None, Some(9)], 0, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);

    let err = reconstruct(&[None], 0, 3).unwrap_err();
    assert!(matches!(err, Error::InvalidVertex(3)));
}

#[test]
fn test_reconstruct_walks_back_to_source() {
    let predecessors = [Some(3), None, Some(1), Some(2)];
    assert_eq!(reconstruct(&predecessors, 1, 0).unwrap(), vec![1, 2, 3, 0]);
    assert_eq!(reconstruct(&predecessors, 1, 1).unwrap(), vec![1]);
}
