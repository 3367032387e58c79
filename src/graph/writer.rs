use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::graph::roadmap::RoadMap;
use crate::graph::traits::Graph;
use crate::{Error, Result};

/// Writes a map in the binary format matching its [`RoadMap::version`].
///
/// Version 2 headers carry the map's reserved arc count when it has one,
/// otherwise the total number of arcs. Ids are written 1-based. Fails with
/// [`Error::FieldOverflow`] before writing a count or id that needs more than
/// 32 bits.
pub fn write_map<W: Write>(map: &RoadMap, mut writer: W) -> Result<()> {
    let version = map.version();
    writer.write_all(&[version])?;
    writer.write_all(&to_field("node count", map.vertex_count() as u64)?.to_be_bytes())?;
    if version > 1 {
        let reserved = match map.reserved_arc_count() {
            Some(reserved) => reserved,
            None => to_field("arc count", map.edge_count() as u64)?,
        };
        writer.write_all(&reserved.to_be_bytes())?;
    }

    for node in map.nodes() {
        writer.write_all(&to_field("node id", node.id as u64 + 1)?.to_be_bytes())?;
        writer.write_all(&node.x.to_be_bytes())?;
        writer.write_all(&node.y.to_be_bytes())?;
        writer.write_all(&to_field("arc count", node.arcs.len() as u64)?.to_be_bytes())?;
        for arc in &node.arcs {
            writer.write_all(&to_field("arc target", arc.target as u64 + 1)?.to_be_bytes())?;
            writer.write_all(&arc.weight.to_be_bytes())?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Serializes a map into a fresh buffer
pub fn encode_map(map: &RoadMap) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    write_map(map, &mut bytes)?;
    Ok(bytes)
}

fn to_field(what: &'static str, value: u64) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::FieldOverflow { what, value })
}

/// Writes a map to a file, replacing any existing content
pub fn save_map<P: AsRef<Path>>(map: &RoadMap, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_map(map, BufWriter::new(file))?;
    debug!(
        "Saved {} nodes to {}",
        map.vertex_count(),
        path.as_ref().display()
    );
    Ok(())
}
