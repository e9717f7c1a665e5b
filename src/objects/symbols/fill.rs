//! Fill symbol decoders.

use crate::graph::{AttrValue, NodeId};
use crate::registry::{Decoder, VersionSet};
use crate::stream::{ObjectStream, ReadOptions};
use crate::util::{ClassId, Error, Result};

pub static SIMPLE_FILL_SYMBOL: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0x7914E603,
        0xC892,
        0x11D0,
        [0x8B, 0xB6, 0x00, 0x80, 0xC7, 0xE0, 0x4F, 0xA9],
    ),
    class_name: "SimpleFillSymbol",
    versions: VersionSet::Of(&[1, 2]),
    decode: decode_simple_fill,
};

pub static LINE_FILL_SYMBOL: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0x7914E606,
        0xC892,
        0x11D0,
        [0x8B, 0xB6, 0x00, 0x80, 0xC7, 0xE0, 0x4F, 0xA9],
    ),
    class_name: "LineFillSymbol",
    versions: VersionSet::Of(&[1]),
    decode: decode_line_fill,
};

pub static MARKER_FILL_SYMBOL: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0x7914E608,
        0xC892,
        0x11D0,
        [0x8B, 0xB6, 0x00, 0x80, 0xC7, 0xE0, 0x4F, 0xA9],
    ),
    class_name: "MarkerFillSymbol",
    versions: VersionSet::Of(&[1]),
    decode: decode_marker_fill,
};

pub static MULTI_LAYER_FILL_SYMBOL: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0x7914E604,
        0xC892,
        0x11D0,
        [0x8B, 0xB6, 0x00, 0x80, 0xC7, 0xE0, 0x4F, 0xA9],
    ),
    class_name: "MultiLayerFillSymbol",
    versions: VersionSet::Of(&[1]),
    decode: super::decode_layered,
};

/// Fill pattern enumeration bounds (solid through diagonal cross).
const MAX_FILL_STYLE: i32 = 7;

fn decode_simple_fill(s: &mut ObjectStream<'_>, node: NodeId, version: u16) -> Result<()> {
    let color = s.read_object("fill color", ReadOptions::default())?;
    s.set(node, "color", AttrValue::Object(color));

    // Outline may be null, and is commonly a backreference to a line
    // symbol shared across fills.
    let outline = s.read_object_opt("fill outline", ReadOptions::default())?;
    s.set(
        node,
        "outline",
        outline.map(AttrValue::Object).unwrap_or(AttrValue::Null),
    );

    let style = s.cursor().read_i32("fill style")?;
    if !(0..=MAX_FILL_STYLE).contains(&style) {
        return Err(Error::UnreadableSymbol(format!("fill style {style} out of range")));
    }
    s.set(node, "style", AttrValue::Int(style as i64));

    // Version 2 appends a transparency percentage.
    if version >= 2 {
        let transparency = s.cursor().read_u8("transparency")?;
        if transparency > 100 {
            return Err(Error::UnreadableSymbol(format!(
                "transparency {transparency} exceeds 100%"
            )));
        }
        s.set(node, "transparency", AttrValue::Int(transparency as i64));
    }
    Ok(())
}

fn decode_line_fill(s: &mut ObjectStream<'_>, node: NodeId, _version: u16) -> Result<()> {
    let line = s.read_object("hatch line", ReadOptions::default())?;
    s.set(node, "line", AttrValue::Object(line));
    let angle = s.cursor().read_f64("hatch angle")?;
    let separation = s.cursor().read_f64("hatch separation")?;
    let offset = s.cursor().read_f64("hatch offset")?;
    s.set(node, "angle", AttrValue::Float(angle));
    s.set(node, "separation", AttrValue::Float(separation));
    s.set(node, "offset", AttrValue::Float(offset));

    let outline = s.read_object_opt("fill outline", ReadOptions::default())?;
    s.set(
        node,
        "outline",
        outline.map(AttrValue::Object).unwrap_or(AttrValue::Null),
    );
    Ok(())
}

fn decode_marker_fill(s: &mut ObjectStream<'_>, node: NodeId, _version: u16) -> Result<()> {
    let marker = s.read_object("fill marker", ReadOptions::default())?;
    s.set(node, "marker", AttrValue::Object(marker));
    let grid = s.cursor().read_bool("grid placement")?;
    let dx = s.cursor().read_f64("marker dx")?;
    let dy = s.cursor().read_f64("marker dy")?;
    s.set(node, "grid", AttrValue::Bool(grid));
    s.set(node, "dx", AttrValue::Float(dx));
    s.set(node, "dy", AttrValue::Float(dy));

    let outline = s.read_object_opt("fill outline", ReadOptions::default())?;
    s.set(
        node,
        "outline",
        outline.map(AttrValue::Object).unwrap_or(AttrValue::Null),
    );
    Ok(())
}
