//! Legend class and group decoders.
//!
//! Renderers describe their drawable categories through legend classes;
//! groups bundle classes under a heading.

use crate::graph::{AttrValue, NodeId};
use crate::registry::{Decoder, VersionSet};
use crate::stream::{ObjectStream, ReadOptions};
use crate::util::{ClassId, Result};

pub static LEGEND_CLASS: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0x167C839B,
        0xCC1F,
        0x11D2,
        [0x9F, 0x90, 0x00, 0xC0, 0x4F, 0x6B, 0xC6, 0xA5],
    ),
    class_name: "LegendClass",
    versions: VersionSet::Of(&[1]),
    decode: decode_legend_class,
};

pub static LEGEND_GROUP: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0x167C839C,
        0xCC1F,
        0x11D2,
        [0x9F, 0x90, 0x00, 0xC0, 0x4F, 0x6B, 0xC6, 0xA5],
    ),
    class_name: "LegendGroup",
    versions: VersionSet::Of(&[1]),
    decode: decode_legend_group,
};

fn decode_legend_class(s: &mut ObjectStream<'_>, node: NodeId, _version: u16) -> Result<()> {
    let label = s.cursor().read_string("legend label")?;
    let description = s.cursor().read_string("legend description")?;
    s.set(node, "label", AttrValue::Str(label));
    s.set(node, "description", AttrValue::Str(description));

    let symbol = s.read_object_opt("legend symbol", ReadOptions::default())?;
    s.set(
        node,
        "symbol",
        symbol.map(AttrValue::Object).unwrap_or(AttrValue::Null),
    );
    Ok(())
}

fn decode_legend_group(s: &mut ObjectStream<'_>, node: NodeId, _version: u16) -> Result<()> {
    let heading = s.cursor().read_string("legend heading")?;
    let editable = s.cursor().read_bool("editable")?;
    s.set(node, "heading", AttrValue::Str(heading));
    s.set(node, "editable", AttrValue::Bool(editable));

    let count = s.cursor().read_u32("legend class count")?;
    let mut classes = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let class = s.read_object("legend class", ReadOptions::default())?;
        classes.push(AttrValue::Object(class));
    }
    s.set(node, "classes", AttrValue::List(classes));
    Ok(())
}
