//! Line symbol decoders.

use crate::graph::{AttrValue, NodeId};
use crate::registry::{Decoder, VersionSet};
use crate::stream::{ObjectStream, ReadOptions};
use crate::util::{ClassId, Error, Result};

pub static SIMPLE_LINE_SYMBOL: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0x7914E5A1,
        0xC892,
        0x11D0,
        [0x8B, 0xB6, 0x00, 0x80, 0xC7, 0xE0, 0x4F, 0xA9],
    ),
    class_name: "SimpleLineSymbol",
    versions: VersionSet::Of(&[1, 2]),
    decode: decode_simple_line,
};

pub static CARTOGRAPHIC_LINE_SYMBOL: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0x7914E5A2,
        0xC892,
        0x11D0,
        [0x8B, 0xB6, 0x00, 0x80, 0xC7, 0xE0, 0x4F, 0xA9],
    ),
    class_name: "CartographicLineSymbol",
    versions: VersionSet::Of(&[1, 2]),
    decode: decode_cartographic_line,
};

pub static MULTI_LAYER_LINE_SYMBOL: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0x7914E5A4,
        0xC892,
        0x11D0,
        [0x8B, 0xB6, 0x00, 0x80, 0xC7, 0xE0, 0x4F, 0xA9],
    ),
    class_name: "MultiLayerLineSymbol",
    versions: VersionSet::Of(&[1]),
    decode: super::decode_layered,
};

/// Line style enumeration bounds (solid through null).
const MAX_LINE_STYLE: i32 = 5;

fn read_line_style(s: &mut ObjectStream<'_>, node: NodeId) -> Result<()> {
    let style = s.cursor().read_i32("line style")?;
    if !(0..=MAX_LINE_STYLE).contains(&style) {
        return Err(Error::UnreadableSymbol(format!("line style {style} out of range")));
    }
    s.set(node, "style", AttrValue::Int(style as i64));
    Ok(())
}

fn decode_simple_line(s: &mut ObjectStream<'_>, node: NodeId, version: u16) -> Result<()> {
    let color = s.read_object("line color", ReadOptions::default())?;
    s.set(node, "color", AttrValue::Object(color));
    let width = s.cursor().read_f64("line width")?;
    s.set(node, "width", AttrValue::Float(width));
    read_line_style(s, node)?;

    // Version 2 appends a perpendicular offset.
    if version >= 2 {
        let offset = s.cursor().read_f64("line offset")?;
        s.set(node, "offset", AttrValue::Float(offset));
    }
    Ok(())
}

/// Indexed-property tags for cartographic lines.
const PROP_DASH_TEMPLATE: i32 = 1;
const PROP_DECORATION_ON_TOP: i32 = 2;

fn decode_cartographic_line(s: &mut ObjectStream<'_>, node: NodeId, version: u16) -> Result<()> {
    let color = s.read_object("line color", ReadOptions::default())?;
    s.set(node, "color", AttrValue::Object(color));
    let width = s.cursor().read_f64("line width")?;
    s.set(node, "width", AttrValue::Float(width));
    let cap = s.cursor().expect_u8("cap style", &[0, 1, 2])?;
    let join = s.cursor().expect_u8("join style", &[0, 1, 2])?;
    let miter = s.cursor().read_f64("miter limit")?;
    s.set(node, "cap", AttrValue::Int(cap as i64));
    s.set(node, "join", AttrValue::Int(join as i64));
    s.set(node, "miter_limit", AttrValue::Float(miter));

    // Dash template and decoration flags arrive as an indexed block.
    // Handlers must be exhaustive: an unknown tag here is a hard failure.
    s.read_indexed_properties("cartographic line properties", |s, tag| match tag {
        PROP_DASH_TEMPLATE => {
            let n = s.cursor().read_u32("dash mark count")?;
            let mut marks = Vec::with_capacity(n as usize);
            for _ in 0..n {
                marks.push(AttrValue::Float(s.cursor().read_f64("dash mark")?));
            }
            s.set(node, "dash_template", AttrValue::List(marks));
            Ok(true)
        }
        PROP_DECORATION_ON_TOP => {
            let on_top = s.cursor().read_bool("decoration on top")?;
            s.set(node, "decoration_on_top", AttrValue::Bool(on_top));
            Ok(true)
        }
        _ => Ok(false),
    })?;

    if version >= 2 {
        let offset = s.cursor().read_f64("line offset")?;
        s.set(node, "offset", AttrValue::Float(offset));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::color::RGB_COLOR;
    use crate::objects::test_util::{decode_single, inline_object, inline_slot};
    use crate::util::Error;

    fn simple_payload(style: i32, v2: bool) -> Vec<u8> {
        let mut p = Vec::new();
        inline_slot(&mut p, &RGB_COLOR, 1, &[0, 0, 0, 0, 0]);
        p.extend_from_slice(&1.5f64.to_le_bytes());
        p.extend_from_slice(&style.to_le_bytes());
        if v2 {
            p.extend_from_slice(&0.25f64.to_le_bytes());
        }
        p
    }

    #[test]
    fn test_simple_line_versions() {
        let json = decode_single(&inline_object(&SIMPLE_LINE_SYMBOL, 1, &simple_payload(0, false)))
            .unwrap();
        assert_eq!(json["width"], 1.5);
        assert!(json.get("offset").is_none());

        let json = decode_single(&inline_object(&SIMPLE_LINE_SYMBOL, 2, &simple_payload(0, true)))
            .unwrap();
        assert_eq!(json["offset"], 0.25);
    }

    #[test]
    fn test_bad_style() {
        let buf = inline_object(&SIMPLE_LINE_SYMBOL, 1, &simple_payload(42, false));
        assert!(matches!(decode_single(&buf), Err(Error::UnreadableSymbol(_))));
    }

    #[test]
    fn test_cartographic_dash_template() {
        let mut p = Vec::new();
        inline_slot(&mut p, &RGB_COLOR, 1, &[0, 0, 0, 0, 0]);
        p.extend_from_slice(&2.0f64.to_le_bytes());
        p.extend_from_slice(&[1, 1]); // cap, join
        p.extend_from_slice(&4.0f64.to_le_bytes());
        // One indexed property: dash template of 2 marks.
        p.extend_from_slice(&1u32.to_le_bytes());
        p.extend_from_slice(&PROP_DASH_TEMPLATE.to_le_bytes());
        p.extend_from_slice(&20u32.to_le_bytes()); // 4 + 2 * 8
        p.extend_from_slice(&2u32.to_le_bytes());
        p.extend_from_slice(&6.0f64.to_le_bytes());
        p.extend_from_slice(&3.0f64.to_le_bytes());

        let json = decode_single(&inline_object(&CARTOGRAPHIC_LINE_SYMBOL, 1, &p)).unwrap();
        assert_eq!(json["dash_template"][0], 6.0);
        assert_eq!(json["dash_template"][1], 3.0);
    }

    #[test]
    fn test_cartographic_unknown_tag_fails() {
        let mut p = Vec::new();
        inline_slot(&mut p, &RGB_COLOR, 1, &[0, 0, 0, 0, 0]);
        p.extend_from_slice(&2.0f64.to_le_bytes());
        p.extend_from_slice(&[0, 0]);
        p.extend_from_slice(&4.0f64.to_le_bytes());
        p.extend_from_slice(&1u32.to_le_bytes());
        p.extend_from_slice(&77i32.to_le_bytes());
        p.extend_from_slice(&0u32.to_le_bytes());

        let err = decode_single(&inline_object(&CARTOGRAPHIC_LINE_SYMBOL, 1, &p)).unwrap_err();
        assert!(matches!(err, Error::UnknownProperty { tag: 77 }));
    }
}
