//! Feature layer decoder.
//!
//! The widest version ladder of the layer kinds: versions 3 through 6,
//! each appending a section to the shared prefix.

use crate::graph::{AttrValue, NodeId};
use crate::registry::{Decoder, VersionSet};
use crate::stream::{ObjectStream, ReadOptions};
use crate::util::{ClassId, Result};

pub static FEATURE_LAYER: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0xE663A651,
        0x8AAD,
        0x11D0,
        [0xBE, 0xC7, 0x00, 0x80, 0x5F, 0x7C, 0x42, 0x68],
    ),
    class_name: "FeatureLayer",
    versions: VersionSet::Of(&[3, 4, 5, 6]),
    decode: decode_feature_layer,
};

fn decode_feature_layer(s: &mut ObjectStream<'_>, node: NodeId, version: u16) -> Result<()> {
    super::read_layer_prefix(s, node)?;

    let show_tips = s.cursor().read_bool("show map tips")?;
    let cached = s.cursor().read_bool("cached")?;
    let min_scale = s.cursor().read_f64("minimum scale")?;
    let max_scale = s.cursor().read_f64("maximum scale")?;
    s.set(node, "show_tips", AttrValue::Bool(show_tips));
    s.set(node, "cached", AttrValue::Bool(cached));
    s.set(node, "min_scale", AttrValue::Float(min_scale));
    s.set(node, "max_scale", AttrValue::Float(max_scale));

    let renderer = s.read_object_opt("layer renderer", ReadOptions::default())?;
    s.set(
        node,
        "renderer",
        renderer.map(AttrValue::Object).unwrap_or(AttrValue::Null),
    );

    // Version 4 appends the definition query.
    if version >= 4 {
        let expression = s.cursor().read_string("definition expression")?;
        s.set(node, "definition_expression", AttrValue::Str(expression));
    }
    // Version 5 appends selection state.
    if version >= 5 {
        let selectable = s.cursor().read_bool("selectable")?;
        s.set(node, "selectable", AttrValue::Bool(selectable));
        let selection_color = s.read_object_opt("selection color", ReadOptions::default())?;
        s.set(
            node,
            "selection_color",
            selection_color.map(AttrValue::Object).unwrap_or(AttrValue::Null),
        );
    }
    // Version 6 appends display adjustments.
    if version >= 6 {
        let transparency = s.cursor().read_i32("transparency")?;
        let brightness = s.cursor().read_i32("brightness")?;
        s.set(node, "transparency", AttrValue::Int(transparency as i64));
        s.set(node, "brightness", AttrValue::Int(brightness as i64));
    }

    let exts = s.read_extensions("layer extensions")?;
    s.arena_mut().get_mut(node).extensions = exts.nodes;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::test_util::{decode_single, inline_object, null_slot, push_string};

    fn payload(version: u16) -> Vec<u8> {
        let mut p = Vec::new();
        push_string(&mut p, "Parcels");
        p.extend_from_slice(&[1, 0, 0]); // visible, tips, cached
        p.extend_from_slice(&0.0f64.to_le_bytes());
        p.extend_from_slice(&0.0f64.to_le_bytes());
        null_slot(&mut p); // no renderer
        if version >= 4 {
            push_string(&mut p, "STATUS = 'CURRENT'");
        }
        if version >= 5 {
            p.push(1);
            null_slot(&mut p);
        }
        if version >= 6 {
            p.extend_from_slice(&30i32.to_le_bytes());
            p.extend_from_slice(&0i32.to_le_bytes());
        }
        p.extend_from_slice(&0u32.to_le_bytes()); // no extensions
        p
    }

    #[test]
    fn test_version_ladder() {
        let json = decode_single(&inline_object(&FEATURE_LAYER, 3, &payload(3))).unwrap();
        assert_eq!(json["name"], "Parcels");
        assert!(json.get("definition_expression").is_none());
        assert!(json.get("transparency").is_none());

        let json = decode_single(&inline_object(&FEATURE_LAYER, 6, &payload(6))).unwrap();
        assert_eq!(json["definition_expression"], "STATUS = 'CURRENT'");
        assert_eq!(json["selectable"], true);
        assert_eq!(json["transparency"], 30);
    }

    #[test]
    fn test_version_2_rejected() {
        let buf = inline_object(&FEATURE_LAYER, 2, &payload(3));
        assert!(matches!(
            decode_single(&buf),
            Err(crate::util::Error::UnsupportedVersion { version: 2, .. })
        ));
    }
}
