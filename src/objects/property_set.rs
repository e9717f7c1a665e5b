//! Property set decoder.
//!
//! A flat string-keyed bag of variant values, used standalone by
//! connection files and embedded in document metadata streams.

use crate::graph::{AttrValue, NodeId};
use crate::registry::{Decoder, VersionSet};
use crate::stream::ObjectStream;
use crate::util::{ClassId, Result};

pub static PROPERTY_SET: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0x588E5A11,
        0xD09B,
        0x11D1,
        [0xAA, 0x7C, 0x00, 0xC0, 0x4F, 0xA3, 0x3A, 0x15],
    ),
    class_name: "PropertySet",
    versions: VersionSet::Any,
    decode: decode_property_set,
};

/// Variant type tags.
const VT_NULL: u8 = 0;
const VT_I32: u8 = 1;
const VT_F64: u8 = 2;
const VT_STRING: u8 = 3;
const VT_BOOL: u8 = 4;
const VT_DATE: u8 = 5;

fn decode_property_set(s: &mut ObjectStream<'_>, node: NodeId, _version: u16) -> Result<()> {
    let count = s.cursor().read_u32("property count")?;
    let mut pairs = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let key = s.cursor().read_string("property key")?;
        let tag = s
            .cursor()
            .expect_u8("variant type", &[VT_NULL, VT_I32, VT_F64, VT_STRING, VT_BOOL, VT_DATE])?;
        let value = match tag {
            VT_I32 => AttrValue::Int(s.cursor().read_i32("variant i32")? as i64),
            VT_F64 => AttrValue::Float(s.cursor().read_f64("variant f64")?),
            VT_STRING => AttrValue::Str(s.cursor().read_string("variant string")?),
            VT_BOOL => AttrValue::Bool(s.cursor().read_bool("variant bool")?),
            VT_DATE => {
                let (days, seconds) = s.cursor().read_date("variant date")?;
                AttrValue::Str(format!("days={days} seconds={seconds}"))
            }
            _ => AttrValue::Null,
        };
        pairs.push(AttrValue::List(vec![AttrValue::Str(key), value]));
    }
    s.set(node, "properties", AttrValue::List(pairs));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::test_util::{decode_single, inline_object, push_string};

    #[test]
    fn test_property_set() {
        let mut p = Vec::new();
        p.extend_from_slice(&3u32.to_le_bytes());
        push_string(&mut p, "SERVER");
        p.push(VT_STRING);
        push_string(&mut p, "gisprod01");
        push_string(&mut p, "INSTANCE");
        p.push(VT_I32);
        p.extend_from_slice(&5151i32.to_le_bytes());
        push_string(&mut p, "ENCRYPTED");
        p.push(VT_BOOL);
        p.push(1);

        let json = decode_single(&inline_object(&PROPERTY_SET, 1, &p)).unwrap();
        let props = json["properties"].as_array().unwrap();
        assert_eq!(props.len(), 3);
        assert_eq!(props[0][0], "SERVER");
        assert_eq!(props[0][1], "gisprod01");
        assert_eq!(props[1][1], 5151);
        assert_eq!(props[2][1], true);
    }

    #[test]
    fn test_bad_variant_tag() {
        let mut p = Vec::new();
        p.extend_from_slice(&1u32.to_le_bytes());
        push_string(&mut p, "KEY");
        p.push(9);
        assert!(matches!(
            decode_single(&inline_object(&PROPERTY_SET, 1, &p)),
            Err(crate::util::Error::FormatAssertion { .. })
        ));
    }
}
