use std::fmt::Debug;

use crate::graph::roadmap::Arc;

/// Trait representing a static weighted directed graph over dense vertex ids
pub trait Graph: Debug {
    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;

    /// Returns the number of arcs in the graph
    fn edge_count(&self) -> usize;

    /// Returns the outgoing arcs of a vertex in stored order (empty for unknown vertices)
    fn outgoing_arcs(&self, vertex: usize) -> &[Arc];

    /// Returns true if the vertex exists in the graph
    fn has_vertex(&self, vertex: usize) -> bool {
        vertex < self.vertex_count()
    }

    /// Returns true if there's at least one arc from `from` to `to`
    fn has_edge(&self, from: usize, to: usize) -> bool {
        self.outgoing_arcs(from).iter().any(|arc| arc.target == to)
    }

    /// Gets the lightest weight among parallel arcs from `from` to `to`
    fn get_edge_weight(&self, from: usize, to: usize) -> Option<u32> {
        self.outgoing_arcs(from)
            .iter()
            .filter(|arc| arc.target == to)
            .map(|arc| arc.weight)
            .min()
    }
}
