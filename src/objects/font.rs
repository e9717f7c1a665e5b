//! Font descriptor decoder.

use crate::graph::{AttrValue, NodeId};
use crate::registry::{Decoder, VersionSet};
use crate::stream::ObjectStream;
use crate::util::{ClassId, Result};

pub static FONT_DESCRIPTOR: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0x0BE35203,
        0x8F91,
        0x11CE,
        [0x9D, 0xE3, 0x00, 0xAA, 0x00, 0x4B, 0xB8, 0x51],
    ),
    class_name: "FontDescriptor",
    versions: VersionSet::Of(&[1, 2]),
    decode: decode_font,
};

fn decode_font(s: &mut ObjectStream<'_>, node: NodeId, version: u16) -> Result<()> {
    let name = s.cursor().read_string("font name")?;
    let size = s.cursor().read_f64("font size")?;
    let bold = s.cursor().read_bool("bold")?;
    let italic = s.cursor().read_bool("italic")?;
    let underline = s.cursor().read_bool("underline")?;
    s.set(node, "name", AttrValue::Str(name));
    s.set(node, "size", AttrValue::Float(size));
    s.set(node, "bold", AttrValue::Bool(bold));
    s.set(node, "italic", AttrValue::Bool(italic));
    s.set(node, "underline", AttrValue::Bool(underline));

    // Version 2 appends the character set.
    if version >= 2 {
        let charset = s.cursor().read_i32("charset")?;
        s.set(node, "charset", AttrValue::Int(charset as i64));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::test_util::{decode_single, inline_object, push_string};

    fn payload(v2: bool) -> Vec<u8> {
        let mut p = Vec::new();
        push_string(&mut p, "Arial");
        p.extend_from_slice(&10.5f64.to_le_bytes());
        p.extend_from_slice(&[1, 0, 0]);
        if v2 {
            p.extend_from_slice(&0i32.to_le_bytes());
        }
        p
    }

    #[test]
    fn test_v1_stops_before_charset() {
        let buf = inline_object(&FONT_DESCRIPTOR, 1, &payload(false));
        let json = decode_single(&buf).unwrap();
        assert_eq!(json["name"], "Arial");
        assert_eq!(json["bold"], true);
        assert!(json.get("charset").is_none());
    }

    #[test]
    fn test_v2_reads_charset() {
        let buf = inline_object(&FONT_DESCRIPTOR, 2, &payload(true));
        let json = decode_single(&buf).unwrap();
        assert_eq!(json["charset"], 0);
    }
}
