//! Map frame decoder.

use crate::graph::{AttrValue, NodeId};
use crate::registry::{Decoder, VersionSet};
use crate::stream::{ObjectStream, ReadOptions};
use crate::util::{ClassId, Result};

pub static MAP_FRAME: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0xE6BDAA76,
        0x4D35,
        0x11D0,
        [0x98, 0xBE, 0x00, 0x80, 0x5F, 0x7C, 0xED, 0x21],
    ),
    class_name: "Map",
    versions: VersionSet::Of(&[1, 2]),
    decode: decode_map,
};

fn decode_map(s: &mut ObjectStream<'_>, node: NodeId, version: u16) -> Result<()> {
    let name = s.cursor().read_string("map name")?;
    s.set(node, "name", AttrValue::Str(name));

    if version >= 2 {
        let description = s.cursor().read_string("map description")?;
        s.set(node, "description", AttrValue::Str(description));
    }

    // Map units and distance units share one enumeration.
    let units = s.cursor().read_i32("map units")?;
    let reference_scale = s.cursor().read_f64("reference scale")?;
    s.set(node, "units", AttrValue::Int(units as i64));
    s.set(node, "reference_scale", AttrValue::Float(reference_scale));

    let count = s.cursor().read_u32("map layer count")?;
    let mut layers = Vec::with_capacity(count as usize);
    for _ in 0..count {
        layers.push(s.read_object("map layer", ReadOptions::default())?);
    }
    s.arena_mut().get_mut(node).children = layers;

    let exts = s.read_extensions("map extensions")?;
    s.arena_mut().get_mut(node).extensions = exts.nodes;
    Ok(())
}
