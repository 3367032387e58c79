pub mod traits;
pub mod dijkstra;
pub mod path;

pub use path::reconstruct;
pub use traits::{ShortestPathAlgorithm, ShortestPathResult};
