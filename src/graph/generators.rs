use rand::prelude::*;
use rand::rngs::StdRng;

use crate::graph::roadmap::{RoadMap, RoadMapBuilder};

/// Weight of an arc between two builder nodes: their rounded planar distance,
/// never below 1
fn planar_weight(builder: &RoadMapBuilder, from: usize, to: usize) -> u32 {
    match (builder.node(from), builder.node(to)) {
        (Some(a), Some(b)) => (a.squared_distance(b).sqrt().round() as u32).max(1),
        _ => 1,
    }
}

/// Generates a width x height grid road map with two-way streets between
/// 4-neighbours. Nodes are spaced `spacing` units apart and numbered row by row.
/// Each arc costs the planar distance plus a seeded random delay in `0..=jitter`.
pub fn generate_grid_map(
    width: usize,
    height: usize,
    spacing: i32,
    jitter: u32,
    seed: u64,
) -> RoadMap {
    assert!(width > 0 && height > 0, "grid must have at least one node");

    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = RoadMapBuilder::with_capacity(width * height);

    for y in 0..height {
        for x in 0..width {
            builder.add_node(x as i32 * spacing, y as i32 * spacing);
        }
    }

    let index = |x: usize, y: usize| y * width + x;
    for y in 0..height {
        for x in 0..width {
            let current = index(x, y);
            let mut neighbours = Vec::with_capacity(4);
            if x > 0 {
                neighbours.push(index(x - 1, y));
            }
            if x + 1 < width {
                neighbours.push(index(x + 1, y));
            }
            if y > 0 {
                neighbours.push(index(x, y - 1));
            }
            if y + 1 < height {
                neighbours.push(index(x, y + 1));
            }

            for neighbour in neighbours {
                let delay = if jitter > 0 { rng.gen_range(0..=jitter) } else { 0 };
                let weight = planar_weight(&builder, current, neighbour) + delay;
                builder.add_arc(current, neighbour, weight);
            }
        }
    }

    builder.build()
}

/// Generates a random road map with `n` nodes scattered over a square of side
/// `extent` and `arcs_per_node` outgoing arcs per node to random targets.
///
/// A directed ring through all nodes is added first so every node can reach
/// every other one. Self-loops and parallel arcs may occur.
pub fn generate_random_map(n: usize, arcs_per_node: usize, extent: i32, seed: u64) -> RoadMap {
    assert!(n > 0, "map must have at least one node");
    assert!(extent > 0, "extent must be positive");

    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = RoadMapBuilder::with_capacity(n);

    for _ in 0..n {
        let x = rng.gen_range(0..extent);
        let y = rng.gen_range(0..extent);
        builder.add_node(x, y);
    }

    for v in 0..n {
        let next = (v + 1) % n;
        let weight = planar_weight(&builder, v, next);
        builder.add_arc(v, next, weight);

        for _ in 0..arcs_per_node {
            let target = rng.gen_range(0..n);
            let weight = planar_weight(&builder, v, target);
            builder.add_arc(v, target, weight);
        }
    }

    builder.build()
}
