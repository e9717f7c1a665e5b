//! Marker symbol decoders.

use crate::graph::{AttrValue, NodeId};
use crate::registry::{Decoder, VersionSet};
use crate::stream::{ObjectStream, ReadOptions};
use crate::util::{ClassId, Error, Result};

pub static SIMPLE_MARKER_SYMBOL: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0x7914E5E1,
        0xC892,
        0x11D0,
        [0x8B, 0xB6, 0x00, 0x80, 0xC7, 0xE0, 0x4F, 0xA9],
    ),
    class_name: "SimpleMarkerSymbol",
    versions: VersionSet::Of(&[1, 2, 3]),
    decode: decode_simple_marker,
};

pub static CHARACTER_MARKER_SYMBOL: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0x7914E5E2,
        0xC892,
        0x11D0,
        [0x8B, 0xB6, 0x00, 0x80, 0xC7, 0xE0, 0x4F, 0xA9],
    ),
    class_name: "CharacterMarkerSymbol",
    versions: VersionSet::Of(&[2, 3, 4]),
    decode: decode_character_marker,
};

pub static MULTI_LAYER_MARKER_SYMBOL: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0x7914E5E4,
        0xC892,
        0x11D0,
        [0x8B, 0xB6, 0x00, 0x80, 0xC7, 0xE0, 0x4F, 0xA9],
    ),
    class_name: "MultiLayerMarkerSymbol",
    versions: VersionSet::Of(&[1]),
    decode: super::decode_layered,
};

/// Marker shape enumeration bounds (circle through cross).
const MAX_MARKER_STYLE: i32 = 4;

fn decode_simple_marker(s: &mut ObjectStream<'_>, node: NodeId, version: u16) -> Result<()> {
    let color = s.read_object("marker color", ReadOptions::default())?;
    s.set(node, "color", AttrValue::Object(color));
    let size = s.cursor().read_f64("marker size")?;
    if size < 0.0 {
        return Err(Error::UnreadableSymbol(format!("negative marker size {size}")));
    }
    s.set(node, "size", AttrValue::Float(size));
    let style = s.cursor().read_i32("marker style")?;
    if !(0..=MAX_MARKER_STYLE).contains(&style) {
        return Err(Error::UnreadableSymbol(format!("marker style {style} out of range")));
    }
    s.set(node, "style", AttrValue::Int(style as i64));

    // Version 2 appends the outline section.
    if version >= 2 {
        let outlined = s.cursor().read_bool("outlined")?;
        s.set(node, "outlined", AttrValue::Bool(outlined));
        if outlined {
            let outline_color = s.read_object("outline color", ReadOptions::default())?;
            s.set(node, "outline_color", AttrValue::Object(outline_color));
            let outline_size = s.cursor().read_f64("outline size")?;
            s.set(node, "outline_size", AttrValue::Float(outline_size));
        }
    }
    // Version 3 appends the rotation angle.
    if version >= 3 {
        let angle = s.cursor().read_f64("marker angle")?;
        s.set(node, "angle", AttrValue::Float(angle));
    }
    Ok(())
}

fn decode_character_marker(s: &mut ObjectStream<'_>, node: NodeId, version: u16) -> Result<()> {
    let font = s.read_object("marker font", ReadOptions::default())?;
    s.set(node, "font", AttrValue::Object(font));
    let code_point = s.cursor().read_i32("character code")?;
    if code_point < 0 {
        return Err(Error::UnreadableSymbol(format!("negative character code {code_point}")));
    }
    s.set(node, "unicode", AttrValue::Int(code_point as i64));
    let color = s.read_object("marker color", ReadOptions::default())?;
    s.set(node, "color", AttrValue::Object(color));
    let size = s.cursor().read_f64("marker size")?;
    s.set(node, "size", AttrValue::Float(size));

    // Version 3 appends x/y offsets, version 4 the rotation angle.
    if version >= 3 {
        let x = s.cursor().read_f64("x offset")?;
        let y = s.cursor().read_f64("y offset")?;
        s.set(node, "x_offset", AttrValue::Float(x));
        s.set(node, "y_offset", AttrValue::Float(y));
    }
    if version >= 4 {
        let angle = s.cursor().read_f64("marker angle")?;
        s.set(node, "angle", AttrValue::Float(angle));
    }
    Ok(())
}
