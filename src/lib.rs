//! Map Route - point-to-point shortest routes over binary road maps
//!
//! A road map is loaded once from a versioned, big-endian binary file into an
//! immutable adjacency structure. Each query then runs Dijkstra's algorithm on
//! top of an indexed binary min-heap with decrease-key, stopping as soon as the
//! target is settled, and walks the predecessor links back into a route.

pub mod algorithm;
pub mod data_structures;
pub mod graph;
pub mod query;

use std::time::Duration;

pub use algorithm::{dijkstra::Dijkstra, ShortestPathAlgorithm, ShortestPathResult};
pub use data_structures::{Distance, HeapEntry, IndexedMinHeap};
/// Re-export main types for convenient use
pub use graph::{Arc, Graph, GraphLoader, LoaderConfig, Node, RoadMap, RoadMapBuilder};
pub use query::{Query, QueryReader};

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unexpected end of file while reading {field} at byte {offset}")]
    UnexpectedEof { field: &'static str, offset: u64 },

    #[error("Short read of {field} at byte {offset}: expected {expected} bytes, got {got}")]
    ShortRead {
        field: &'static str,
        offset: u64,
        expected: usize,
        got: usize,
    },

    #[error("File version is {found}, {max} is the maximum version")]
    UnsupportedVersion { found: u8, max: u8 },

    #[error("No nodes to read")]
    EmptyMap,

    #[error("Node record {position} carries id {found}, expected {}", .position + 1)]
    NodeIdMismatch { position: usize, found: u32 },

    #[error("Arc from node {node} targets id {target}, outside 1..={node_count}")]
    ArcTargetOutOfRange {
        node: usize,
        target: u32,
        node_count: usize,
    },

    #[error("{what} count {count} exceeds the configured limit of {limit}")]
    CountExceedsLimit {
        what: &'static str,
        count: u64,
        limit: u64,
    },

    #[error("{what} {value} does not fit the 32-bit map format")]
    FieldOverflow { what: &'static str, value: u64 },

    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(usize),

    #[error("{role} node {id} is invalid")]
    InvalidQueryNode { role: &'static str, id: u64 },

    #[error("No route from {from} to {to}")]
    Unreachable { from: usize, to: usize },

    #[error("Deadline exceeded after settling {settled} vertices in {elapsed:?}")]
    DeadlineExceeded { settled: usize, elapsed: Duration },

    #[error("Broken predecessor chain at vertex {vertex}: {reason}")]
    BrokenPredecessorChain { vertex: usize, reason: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broad failure classes, used by callers to decide whether a failure is
/// fatal to a load, local to one query, or a defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed map stream; aborts the load
    Format,
    /// A count field implies an unreasonable allocation; aborts the load
    Allocation,
    /// Out-of-range source or target; local to one query
    InvalidQuery,
    /// The target cannot be reached from the source
    Unreachable,
    /// The solver deadline elapsed
    Timeout,
    /// Solver output violated its own invariants
    Internal,
    /// Underlying reader or writer failed
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnexpectedEof { .. }
            | Error::ShortRead { .. }
            | Error::UnsupportedVersion { .. }
            | Error::EmptyMap
            | Error::NodeIdMismatch { .. }
            | Error::ArcTargetOutOfRange { .. }
            | Error::FieldOverflow { .. } => ErrorKind::Format,
            Error::CountExceedsLimit { .. } => ErrorKind::Allocation,
            Error::InvalidVertex(_) | Error::InvalidQueryNode { .. } => ErrorKind::InvalidQuery,
            Error::Unreachable { .. } => ErrorKind::Unreachable,
            Error::DeadlineExceeded { .. } => ErrorKind::Timeout,
            Error::BrokenPredecessorChain { .. } => ErrorKind::Internal,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
