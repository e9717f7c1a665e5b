//! Map layer decoders.

pub mod feature;
pub mod group;
pub mod raster;

use crate::graph::{AttrValue, NodeId};
use crate::stream::ObjectStream;
use crate::util::Result;

/// Shared leading fields of every layer kind: name and visibility.
pub(crate) fn read_layer_prefix(s: &mut ObjectStream<'_>, node: NodeId) -> Result<()> {
    let name = s.cursor().read_string("layer name")?;
    let visible = s.cursor().read_bool("layer visible")?;
    s.set(node, "name", AttrValue::Str(name));
    s.set(node, "visible", AttrValue::Bool(visible));
    Ok(())
}
