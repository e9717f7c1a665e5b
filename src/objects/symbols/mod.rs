//! Symbol decoders: line, marker, and fill families.
//!
//! Multi-layer symbols of all three families share one layout: a layer
//! count, the layer objects, a per-layer locked flag list, and a trailing
//! extension section. The shared shape lives in [`decode_layered`].

pub mod fill;
pub mod line;
pub mod marker;

use crate::graph::{AttrValue, NodeId};
use crate::stream::{ObjectStream, ReadOptions};
use crate::util::Result;

/// Shared body of the multi-layer symbol types.
pub(crate) fn decode_layered(s: &mut ObjectStream<'_>, node: NodeId, _version: u16) -> Result<()> {
    let count = s.cursor().read_u32("symbol layer count")?;

    let mut layers = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let layer = s.read_object("symbol layer", ReadOptions::default())?;
        layers.push(AttrValue::Object(layer));
    }
    s.set(node, "layers", AttrValue::List(layers));

    let mut locked = Vec::with_capacity(count as usize);
    for _ in 0..count {
        locked.push(AttrValue::Bool(s.cursor().read_bool("layer locked")?));
    }
    s.set(node, "locked", AttrValue::List(locked));

    let exts = s.read_extensions("symbol extensions")?;
    s.arena_mut().get_mut(node).extensions = exts.nodes;
    Ok(())
}
