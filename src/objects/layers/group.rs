//! Group layer decoder.
//!
//! A group layer exclusively owns its child layers and carries the
//! trailing extension section, making it the canonical host of the
//! length-prefixed-skip recovery path.

use crate::graph::{AttrValue, NodeId};
use crate::registry::{Decoder, VersionSet};
use crate::stream::{ObjectStream, ReadOptions};
use crate::util::{ClassId, Result};

pub static GROUP_LAYER: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0xEDAD6645,
        0x1810,
        0x11D1,
        [0x86, 0x17, 0x00, 0x00, 0xF8, 0x75, 0x17, 0x20],
    ),
    class_name: "GroupLayer",
    versions: VersionSet::Of(&[1, 2]),
    decode: decode_group_layer,
};

fn decode_group_layer(s: &mut ObjectStream<'_>, node: NodeId, version: u16) -> Result<()> {
    super::read_layer_prefix(s, node)?;

    if version >= 2 {
        let expanded = s.cursor().read_bool("expanded")?;
        s.set(node, "expanded", AttrValue::Bool(expanded));
    }

    let count = s.cursor().read_u32("child layer count")?;
    let mut children = Vec::with_capacity(count as usize);
    for _ in 0..count {
        children.push(s.read_object("child layer", ReadOptions::default())?);
    }
    s.arena_mut().get_mut(node).children = children;

    if version >= 2 {
        let min_scale = s.cursor().read_f64("minimum scale")?;
        let max_scale = s.cursor().read_f64("maximum scale")?;
        s.set(node, "min_scale", AttrValue::Float(min_scale));
        s.set(node, "max_scale", AttrValue::Float(max_scale));
    }

    let exts = s.read_extensions("group layer extensions")?;
    s.arena_mut().get_mut(node).extensions = exts.nodes;
    Ok(())
}
