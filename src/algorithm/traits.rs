use crate::algorithm::path;
use crate::graph::Graph;
use crate::Result;

/// Result of a single source-to-target query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPathResult {
    /// Source vertex ID
    pub source: usize,

    /// Target vertex ID
    pub target: usize,

    /// Final distance of the target
    pub cost: u64,

    /// Final distances of the vertices settled before the search stopped
    pub distances: Vec<Option<u64>>,

    /// Predecessor of each settled vertex in the shortest path tree
    pub predecessors: Vec<Option<usize>>,

    /// Number of vertices extracted from the heap
    pub settled: usize,
}

impl ShortestPathResult {
    /// The route from source to target, both inclusive
    pub fn route(&self) -> Result<Vec<usize>> {
        path::reconstruct(&self.predecessors, self.source, self.target)
    }
}

/// Trait for point-to-point shortest path algorithms
pub trait ShortestPathAlgorithm<G>
where
    G: Graph,
{
    /// Compute the shortest path from `source` to `target`
    fn solve(&self, graph: &G, source: usize, target: usize) -> Result<ShortestPathResult>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Get the shortest path of a result as a sequence of vertices
    fn get_path(&self, result: &ShortestPathResult) -> Result<Vec<usize>> {
        result.route()
    }
}
