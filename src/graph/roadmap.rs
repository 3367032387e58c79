use crate::graph::loader::CURRENT_VERSION;
use crate::graph::traits::Graph;

/// A directed, weighted connection to another node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arc {
    /// 0-based id of the node this arc leads to
    pub target: usize,
    /// Non-negative travel cost
    pub weight: u32,
}

/// A road map node: its dense id, planar position and outgoing arcs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// 0-based id, equal to the node's index in the map
    pub id: usize,
    pub x: i32,
    pub y: i32,
    pub arcs: Vec<Arc>,
}

impl Node {
    /// Squared planar distance to another node.
    ///
    /// Computed in floating point so that coordinates spanning the whole
    /// `i32` range cannot overflow.
    pub fn squared_distance(&self, other: &Node) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        dx * dx + dy * dy
    }
}

/// An immutable road map: a contiguous node table indexed by node id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadMap {
    nodes: Vec<Node>,
    version: u8,
    /// Header arc count carried by version 2 files. Parsed but not interpreted.
    reserved_arc_count: Option<u32>,
}

impl RoadMap {
    pub(crate) fn from_parts(
        nodes: Vec<Node>,
        version: u8,
        reserved_arc_count: Option<u32>,
    ) -> Self {
        RoadMap {
            nodes,
            version,
            reserved_arc_count,
        }
    }

    /// All nodes, in id order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Format version the map was loaded with (or will be written with)
    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn reserved_arc_count(&self) -> Option<u32> {
        self.reserved_arc_count
    }

    /// Returns the same map tagged with another format version.
    ///
    /// Switching to version 1 drops the reserved header field.
    pub fn with_version(mut self, version: u8) -> Self {
        self.version = version;
        if version < 2 {
            self.reserved_arc_count = None;
        }
        self
    }
}

impl Graph for RoadMap {
    fn vertex_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.arcs.len()).sum()
    }

    fn outgoing_arcs(&self, vertex: usize) -> &[Arc] {
        match self.nodes.get(vertex) {
            Some(node) => &node.arcs,
            None => &[],
        }
    }
}

/// Incremental construction of a [`RoadMap`]
#[derive(Debug, Clone, Default)]
pub struct RoadMapBuilder {
    nodes: Vec<Node>,
}

impl RoadMapBuilder {
    pub fn new() -> Self {
        RoadMapBuilder { nodes: Vec::new() }
    }

    pub fn with_capacity(nodes: usize) -> Self {
        RoadMapBuilder {
            nodes: Vec::with_capacity(nodes),
        }
    }

    /// Adds a node at the given position and returns its id
    pub fn add_node(&mut self, x: i32, y: i32) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node {
            id,
            x,
            y,
            arcs: Vec::new(),
        });
        id
    }

    /// Adds a directed arc. Parallel arcs are kept as separate entries.
    ///
    /// Returns false if either endpoint does not exist.
    pub fn add_arc(&mut self, from: usize, to: usize, weight: u32) -> bool {
        if to >= self.nodes.len() {
            return false;
        }
        match self.nodes.get_mut(from) {
            Some(node) => {
                node.arcs.push(Arc { target: to, weight });
                true
            }
            None => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Freezes the map, tagged with the current format version
    pub fn build(self) -> RoadMap {
        RoadMap::from_parts(self.nodes, CURRENT_VERSION, None)
    }
}
