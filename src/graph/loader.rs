//! Binary road map deserializer.
//!
//! Layout, all integers big-endian:
//!
//! ```text
//! u8   version (1 or 2)
//! u32  node_count
//! u32  reserved_arc_count        version >= 2 only
//! node_count times:
//!   u32  node_id (1-based)
//!   i32  x
//!   i32  y
//!   u32  arc_count
//!   arc_count times:
//!     u32  target_id (1-based)
//!     u32  weight
//! ```

use std::fs::File;
use std::io::{BufReader, ErrorKind as IoErrorKind, Read};
use std::path::Path;

use log::{debug, info};

use crate::graph::roadmap::{Arc, Node, RoadMap};
use crate::graph::traits::Graph;
use crate::{Error, Result};

/// Highest format version this loader understands.
///
/// Only versions 1 through this one are accepted. Version 0 is refused as
/// [`Error::UnsupportedVersion`], although older C readers of this format let
/// it through and parsed it with the version 1 layout.
pub const CURRENT_VERSION: u8 = 2;

/// Smallest on-disk size of a node record (id, x, y, arc count)
pub const NODE_RECORD_SIZE: u64 = 16;

/// On-disk size of an arc record (target, weight)
pub const ARC_RECORD_SIZE: u64 = 8;

/// Pre-allocation cap used when the input length is unknown
const UNSIZED_PREALLOC: usize = 4096;

/// Limits applied to count fields before anything is allocated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    pub max_nodes: usize,
    pub max_arcs_per_node: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            max_nodes: 1 << 25,
            max_arcs_per_node: 1 << 16,
        }
    }
}

/// Reads road maps in the versioned binary format
#[derive(Debug, Clone, Default)]
pub struct GraphLoader {
    config: LoaderConfig,
}

impl GraphLoader {
    /// Create a loader with default limits
    pub fn new() -> Self {
        GraphLoader::default()
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        GraphLoader { config }
    }

    /// Set the largest node count accepted from a header
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.config.max_nodes = max_nodes;
        self
    }

    /// Set the largest arc count accepted for a single node
    pub fn with_max_arcs_per_node(mut self, max_arcs: usize) -> Self {
        self.config.max_arcs_per_node = max_arcs;
        self
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Loads a map from a stream of unknown length
    pub fn load<R: Read>(&self, reader: R) -> Result<RoadMap> {
        self.read_map(FieldReader::new(reader, None))
    }

    /// Loads a map from an in-memory buffer
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<RoadMap> {
        self.read_map(FieldReader::new(bytes, Some(bytes.len() as u64)))
    }

    /// Loads a map from a file on disk
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<RoadMap> {
        let file = File::open(path.as_ref())?;
        let length = file.metadata()?.len();
        debug!("Loading road map {} ({} bytes)", path.as_ref().display(), length);
        self.read_map(FieldReader::new(BufReader::new(file), Some(length)))
    }

    fn read_map<R: Read>(&self, mut input: FieldReader<R>) -> Result<RoadMap> {
        let version = input.read_u8("version")?;
        let node_count = input.read_u32("node count")?;
        let reserved_arc_count = if version > 1 {
            Some(input.read_u32("reserved arc count")?)
        } else {
            None
        };

        if version == 0 || version > CURRENT_VERSION {
            return Err(Error::UnsupportedVersion {
                found: version,
                max: CURRENT_VERSION,
            });
        }
        if node_count == 0 {
            return Err(Error::EmptyMap);
        }
        check_limit("node", node_count, self.config.max_nodes)?;
        debug!(
            "Map header: version {}, {} nodes, reserved arc count {:?}",
            version, node_count, reserved_arc_count
        );

        let node_count = node_count as usize;
        let mut nodes = Vec::with_capacity(input.capacity_hint(node_count, NODE_RECORD_SIZE));
        for position in 0..node_count {
            nodes.push(self.read_node(&mut input, position, node_count)?);
        }

        let map = RoadMap::from_parts(nodes, version, reserved_arc_count);
        info!("Loaded {} nodes with {} arcs", node_count, map.edge_count());
        Ok(map)
    }

    fn read_node<R: Read>(
        &self,
        input: &mut FieldReader<R>,
        position: usize,
        node_count: usize,
    ) -> Result<Node> {
        let raw_id = input.read_u32("node id")?;
        if raw_id as usize != position + 1 {
            return Err(Error::NodeIdMismatch {
                position,
                found: raw_id,
            });
        }
        let x = input.read_i32("x coordinate")?;
        let y = input.read_i32("y coordinate")?;
        let arc_count = input.read_u32("arc count")?;
        check_limit("arc", arc_count, self.config.max_arcs_per_node)?;

        let arc_count = arc_count as usize;
        let mut arcs = Vec::with_capacity(input.capacity_hint(arc_count, ARC_RECORD_SIZE));
        for _ in 0..arc_count {
            let target = input.read_u32("arc target")?;
            let weight = input.read_u32("arc weight")?;
            if target == 0 || target as usize > node_count {
                return Err(Error::ArcTargetOutOfRange {
                    node: position,
                    target,
                    node_count,
                });
            }
            arcs.push(Arc {
                target: target as usize - 1,
                weight,
            });
        }

        Ok(Node {
            id: position,
            x,
            y,
            arcs,
        })
    }
}

/// Loads a map from a file with default limits
pub fn load_map<P: AsRef<Path>>(path: P) -> Result<RoadMap> {
    GraphLoader::new().load_file(path)
}

fn check_limit(what: &'static str, count: u32, limit: usize) -> Result<()> {
    if count as u64 > limit as u64 {
        return Err(Error::CountExceedsLimit {
            what,
            count: count as u64,
            limit: limit as u64,
        });
    }
    Ok(())
}

/// Big-endian field reader that tracks its offset and, when known, the
/// number of bytes left in the input
struct FieldReader<R> {
    inner: R,
    offset: u64,
    length: Option<u64>,
}

impl<R: Read> FieldReader<R> {
    fn new(inner: R, length: Option<u64>) -> Self {
        FieldReader {
            inner,
            offset: 0,
            length,
        }
    }

    /// How many records of `record_size` bytes are worth reserving room for.
    ///
    /// Never more than the remaining input could hold, so a lying count field
    /// fails on the short read instead of on a huge allocation.
    fn capacity_hint(&self, count: usize, record_size: u64) -> usize {
        match self.length {
            Some(length) => {
                let remaining = length.saturating_sub(self.offset);
                count.min((remaining / record_size) as usize)
            }
            None => count.min(UNSIZED_PREALLOC),
        }
    }

    fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        let mut filled = 0;
        while filled < N {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == IoErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }

        let start = self.offset;
        self.offset += filled as u64;
        match filled {
            n if n == N => Ok(buf),
            0 => Err(Error::UnexpectedEof {
                field,
                offset: start,
            }),
            got => Err(Error::ShortRead {
                field,
                offset: start,
                expected: N,
                got,
            }),
        }
    }

    fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        let [byte] = self.read_array::<1>(field)?;
        Ok(byte)
    }

    fn read_u32(&mut self, field: &'static str) -> Result<u32> {
        self.read_array::<4>(field).map(u32::from_be_bytes)
    }

    fn read_i32(&mut self, field: &'static str) -> Result<i32> {
        self.read_array::<4>(field).map(i32::from_be_bytes)
    }
}
