pub mod generators;
pub mod loader;
pub mod roadmap;
pub mod traits;
pub mod writer;

pub use loader::{load_map, GraphLoader, LoaderConfig, CURRENT_VERSION};
pub use roadmap::{Arc, Node, RoadMap, RoadMapBuilder};
pub use traits::Graph;
pub use writer::{encode_map, save_map, write_map};
