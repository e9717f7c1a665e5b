//! Feature renderer decoders.

use crate::graph::{AttrValue, NodeId};
use crate::registry::{Decoder, VersionSet};
use crate::stream::{ObjectStream, ReadOptions};
use crate::util::{ClassId, Result};

pub static SIMPLE_RENDERER: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0xF3435801,
        0x5779,
        0x11D0,
        [0x98, 0xBF, 0x00, 0x80, 0x5F, 0x7C, 0xED, 0x21],
    ),
    class_name: "SimpleRenderer",
    versions: VersionSet::Of(&[1, 2]),
    decode: decode_simple_renderer,
};

pub static UNIQUE_VALUE_RENDERER: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0xF3435802,
        0x5779,
        0x11D0,
        [0x98, 0xBF, 0x00, 0x80, 0x5F, 0x7C, 0xED, 0x21],
    ),
    class_name: "UniqueValueRenderer",
    versions: VersionSet::Of(&[1, 2]),
    decode: decode_unique_value_renderer,
};

fn decode_simple_renderer(s: &mut ObjectStream<'_>, node: NodeId, version: u16) -> Result<()> {
    let symbol = s.read_object("renderer symbol", ReadOptions::default())?;
    s.set(node, "symbol", AttrValue::Object(symbol));
    let label = s.cursor().read_string("renderer label")?;
    s.set(node, "label", AttrValue::Str(label));

    if version >= 2 {
        let description = s.cursor().read_string("renderer description")?;
        s.set(node, "description", AttrValue::Str(description));
    }
    Ok(())
}

/// Indexed-property tags for unique-value renderers.
const PROP_VALUE_ENTRY: i32 = 1;
const PROP_LEGEND_HEADING: i32 = 2;

fn decode_unique_value_renderer(s: &mut ObjectStream<'_>, node: NodeId, version: u16) -> Result<()> {
    let field = s.cursor().read_string("value field")?;
    s.set(node, "field", AttrValue::Str(field));

    let default_symbol = s.read_object_opt("default symbol", ReadOptions::default())?;
    s.set(
        node,
        "default_symbol",
        default_symbol.map(AttrValue::Object).unwrap_or(AttrValue::Null),
    );

    // The value → symbol table arrives as an indexed block; every entry
    // tag must be understood, there is no per-entry skip here.
    let mut entries = Vec::new();
    s.read_indexed_properties("unique value entries", |s, tag| match tag {
        PROP_VALUE_ENTRY => {
            let value = s.cursor().read_string("entry value")?;
            let symbol = s.read_object("entry symbol", ReadOptions::default())?;
            entries.push(AttrValue::List(vec![
                AttrValue::Str(value),
                AttrValue::Object(symbol),
            ]));
            Ok(true)
        }
        PROP_LEGEND_HEADING => {
            let heading = s.cursor().read_string("legend heading")?;
            s.set(node, "legend_heading", AttrValue::Str(heading));
            Ok(true)
        }
        _ => Ok(false),
    })?;
    s.set(node, "values", AttrValue::List(entries));

    if version >= 2 {
        let use_default = s.cursor().read_bool("use default symbol")?;
        s.set(node, "use_default", AttrValue::Bool(use_default));
    }
    Ok(())
}
