use std::time::{Duration, Instant};

use log::{debug, trace};
use rayon::prelude::*;

use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::{Distance, IndexedMinHeap};
use crate::graph::Graph;
use crate::query::Query;
use crate::{Error, Result};

/// How many extractions pass between deadline checks
const DEADLINE_CHECK_INTERVAL: usize = 256;

/// Dijkstra's algorithm over an indexed binary heap, stopping as soon as the
/// target is settled
#[derive(Debug, Default, Clone)]
pub struct Dijkstra {
    /// Optional wall-clock budget per query
    deadline: Option<Duration>,
}

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra { deadline: None }
    }

    /// Abort a query with [`Error::DeadlineExceeded`] once it has run longer than `deadline`
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Solves independent queries in parallel against the same graph.
    ///
    /// Results come back in query order.
    pub fn solve_many<G>(&self, graph: &G, queries: &[Query]) -> Vec<Result<ShortestPathResult>>
    where
        G: Graph + Sync,
    {
        queries
            .par_iter()
            .map(|query| self.solve(graph, query.source, query.target))
            .collect()
    }
}

impl<G> ShortestPathAlgorithm<G> for Dijkstra
where
    G: Graph,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn solve(&self, graph: &G, source: usize, target: usize) -> Result<ShortestPathResult> {
        if !graph.has_vertex(source) {
            return Err(Error::InvalidVertex(source));
        }
        if !graph.has_vertex(target) {
            return Err(Error::InvalidVertex(target));
        }

        let n = graph.vertex_count();
        let mut distances: Vec<Option<u64>> = vec![None; n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];

        if source == target {
            distances[source] = Some(0);
            return Ok(ShortestPathResult {
                source,
                target,
                cost: 0,
                distances,
                predecessors,
                settled: 1,
            });
        }

        let started = Instant::now();
        let mut heap = IndexedMinHeap::with_source(n, source);
        let mut settled = 0;

        while let Some(entry) = heap.extract_min() {
            // Everything left in the heap is unreachable
            let dist_u = match entry.distance {
                Distance::Finite(d) => d,
                Distance::Infinite => break,
            };
            let u = entry.vertex;

            distances[u] = Some(dist_u);
            predecessors[u] = entry.predecessor;
            settled += 1;

            if u == target {
                debug!(
                    "Route {} -> {}: cost {}, settled {} of {} vertices in {:?}",
                    source,
                    target,
                    dist_u,
                    settled,
                    n,
                    started.elapsed()
                );
                return Ok(ShortestPathResult {
                    source,
                    target,
                    cost: dist_u,
                    distances,
                    predecessors,
                    settled,
                });
            }

            if let Some(deadline) = self.deadline {
                if settled % DEADLINE_CHECK_INTERVAL == 0 && started.elapsed() > deadline {
                    return Err(Error::DeadlineExceeded {
                        settled,
                        elapsed: started.elapsed(),
                    });
                }
            }

            // Relax all outgoing arcs into vertices that are still queued
            for arc in graph.outgoing_arcs(u) {
                let new_dist = dist_u.saturating_add(arc.weight as u64);
                if heap.decrease_key(arc.target, new_dist, u) {
                    trace!("Relaxed {} -> {} to {}", u, arc.target, new_dist);
                }
            }
        }

        debug!(
            "No route {} -> {} after settling {} vertices",
            source, target, settled
        );
        Err(Error::Unreachable {
            from: source,
            to: target,
        })
    }
}
