//! Color ramp decoders.
//!
//! Ramps nest color objects; multi-part ramps nest other ramps. Colors in
//! ramps are reference-eligible (a start color is commonly shared with the
//! previous part's end color).

use crate::graph::{AttrValue, NodeId};
use crate::registry::{Decoder, VersionSet};
use crate::stream::{ObjectStream, ReadOptions};
use crate::util::{ClassId, Error, Result};

pub static ALGORITHMIC_COLOR_RAMP: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0xBEB87093,
        0xC0B4,
        0x11D0,
        [0x8B, 0xBB, 0x00, 0x80, 0xC7, 0xE0, 0x4F, 0xA9],
    ),
    class_name: "AlgorithmicColorRamp",
    versions: VersionSet::Of(&[1, 2]),
    decode: decode_algorithmic,
};

pub static PRESET_COLOR_RAMP: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0xBEB87094,
        0xC0B4,
        0x11D0,
        [0x8B, 0xBB, 0x00, 0x80, 0xC7, 0xE0, 0x4F, 0xA9],
    ),
    class_name: "PresetColorRamp",
    versions: VersionSet::Of(&[1]),
    decode: decode_preset,
};

pub static MULTI_PART_COLOR_RAMP: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0xBEB87095,
        0xC0B4,
        0x11D0,
        [0x8B, 0xBB, 0x00, 0x80, 0xC7, 0xE0, 0x4F, 0xA9],
    ),
    class_name: "MultiPartColorRamp",
    versions: VersionSet::Of(&[1, 2]),
    decode: decode_multi_part,
};

fn decode_algorithmic(s: &mut ObjectStream<'_>, node: NodeId, version: u16) -> Result<()> {
    let algorithm = s.cursor().read_i32("ramp algorithm")?;
    if !(0..=2).contains(&algorithm) {
        return Err(Error::invalid(format!("Unknown ramp algorithm {algorithm}")));
    }
    s.set(node, "algorithm", AttrValue::Int(algorithm as i64));

    let from = s.read_object("from color", ReadOptions::default())?;
    let to = s.read_object("to color", ReadOptions::default())?;
    s.set(node, "from", AttrValue::Object(from));
    s.set(node, "to", AttrValue::Object(to));

    if version >= 2 {
        let name = s.cursor().read_string("ramp name")?;
        s.set(node, "name", AttrValue::Str(name));
    }
    Ok(())
}

fn decode_preset(s: &mut ObjectStream<'_>, node: NodeId, _version: u16) -> Result<()> {
    let count = s.cursor().read_u32("preset color count")?;
    let mut colors = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let color = s.read_object("preset color", ReadOptions::default())?;
        colors.push(AttrValue::Object(color));
    }
    s.set(node, "colors", AttrValue::List(colors));
    Ok(())
}

fn decode_multi_part(s: &mut ObjectStream<'_>, node: NodeId, version: u16) -> Result<()> {
    let count = s.cursor().read_u32("ramp part count")?;
    let mut parts = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let part = s.read_object("ramp part", ReadOptions::default())?;
        parts.push(AttrValue::Object(part));
    }
    s.set(node, "parts", AttrValue::List(parts));

    // Version 2 appends one weight per part.
    if version >= 2 {
        let mut weights = Vec::with_capacity(count as usize);
        for _ in 0..count {
            weights.push(AttrValue::Float(s.cursor().read_f64("part weight")?));
        }
        s.set(node, "weights", AttrValue::List(weights));
    }
    Ok(())
}
