//! Page layout decoder.
//!
//! Layout elements use the extension record shape, so unknown element
//! kinds degrade to skips instead of failing the whole layout.

use crate::graph::{AttrValue, NodeId};
use crate::registry::{Decoder, VersionSet};
use crate::stream::ObjectStream;
use crate::util::{ClassId, Error, Result};

pub static PAGE_LAYOUT: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0xDD6F9043,
        0x5BFF,
        0x11D1,
        [0x84, 0x61, 0x00, 0x00, 0xF8, 0x75, 0x1B, 0xCB],
    ),
    class_name: "PageLayout",
    versions: VersionSet::Of(&[1]),
    decode: decode_page_layout,
};

fn decode_page_layout(s: &mut ObjectStream<'_>, node: NodeId, _version: u16) -> Result<()> {
    let width = s.cursor().read_f64("page width")?;
    let height = s.cursor().read_f64("page height")?;
    if width <= 0.0 || height <= 0.0 {
        return Err(Error::invalid(format!("Degenerate page size {width} x {height}")));
    }
    let units = s.cursor().read_i32("page units")?;
    s.set(node, "width", AttrValue::Float(width));
    s.set(node, "height", AttrValue::Float(height));
    s.set(node, "units", AttrValue::Int(units as i64));

    let elements = s.read_extensions("layout elements")?;
    s.set(node, "skipped_elements", AttrValue::Int(elements.skipped as i64));
    s.arena_mut().get_mut(node).extensions = elements.nodes;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::test_util::{decode_single, inline_object};
    use crate::util::ClassId;

    #[test]
    fn test_layout_skips_unknown_elements() {
        let bogus = ClassId::from_fields(0x11112222, 0x3333, 0x4444, [5; 8]);
        let mut p = Vec::new();
        p.extend_from_slice(&8.5f64.to_le_bytes());
        p.extend_from_slice(&11.0f64.to_le_bytes());
        p.extend_from_slice(&1i32.to_le_bytes());
        p.extend_from_slice(&1u32.to_le_bytes()); // one element
        p.extend_from_slice(&12u32.to_le_bytes());
        p.extend_from_slice(bogus.as_bytes());
        p.extend_from_slice(&[0u8; 12]);

        let json = decode_single(&inline_object(&PAGE_LAYOUT, 1, &p)).unwrap();
        assert_eq!(json["width"], 8.5);
        assert_eq!(json["skipped_elements"], 1);
        assert!(json.get("extensions").is_none());
    }
}
