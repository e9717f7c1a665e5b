//! Color decoders.
//!
//! Colors are the leaf objects of nearly every symbol graph. All models
//! share the trailing dither / is-null flag pair; component layouts differ
//! per model. Components outside their model's range fail with
//! `InvalidColor` rather than a generic structure error, so a bad color
//! inside a length-bounded slot is reported precisely.

use crate::graph::{AttrValue, NodeId};
use crate::registry::{Decoder, VersionSet};
use crate::stream::ObjectStream;
use crate::util::{ClassId, Error, Result};

pub static RGB_COLOR: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0x7EE9C496,
        0xD123,
        0x11D0,
        [0x83, 0x83, 0x08, 0x00, 0x09, 0xB9, 0x96, 0xCC],
    ),
    class_name: "RgbColor",
    versions: VersionSet::Of(&[1]),
    decode: decode_rgb,
};

pub static CMYK_COLOR: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0x7EE9C497,
        0xD123,
        0x11D0,
        [0x83, 0x83, 0x08, 0x00, 0x09, 0xB9, 0x96, 0xCC],
    ),
    class_name: "CmykColor",
    versions: VersionSet::Of(&[1]),
    decode: decode_cmyk,
};

pub static HSV_COLOR: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0x7EE9C498,
        0xD123,
        0x11D0,
        [0x83, 0x83, 0x08, 0x00, 0x09, 0xB9, 0x96, 0xCC],
    ),
    class_name: "HsvColor",
    versions: VersionSet::Of(&[1]),
    decode: decode_hsv,
};

pub static HLS_COLOR: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0x7EE9C499,
        0xD123,
        0x11D0,
        [0x83, 0x83, 0x08, 0x00, 0x09, 0xB9, 0x96, 0xCC],
    ),
    class_name: "HlsColor",
    versions: VersionSet::Of(&[1]),
    decode: decode_hls,
};

pub static GRAY_COLOR: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0x7EE9C49A,
        0xD123,
        0x11D0,
        [0x83, 0x83, 0x08, 0x00, 0x09, 0xB9, 0x96, 0xCC],
    ),
    class_name: "GrayColor",
    versions: VersionSet::Of(&[1]),
    decode: decode_gray,
};

/// Shared trailing flags: dither, then is-null.
fn read_flags(s: &mut ObjectStream<'_>, node: NodeId) -> Result<()> {
    let dither = s.cursor().read_bool("dither")?;
    let is_null = s.cursor().read_bool("is_null")?;
    s.set(node, "dither", AttrValue::Bool(dither));
    s.set(node, "is_null", AttrValue::Bool(is_null));
    Ok(())
}

fn decode_rgb(s: &mut ObjectStream<'_>, node: NodeId, _version: u16) -> Result<()> {
    let r = s.cursor().read_u8("red")?;
    let g = s.cursor().read_u8("green")?;
    let b = s.cursor().read_u8("blue")?;
    s.set(node, "R", AttrValue::Int(r as i64));
    s.set(node, "G", AttrValue::Int(g as i64));
    s.set(node, "B", AttrValue::Int(b as i64));
    read_flags(s, node)
}

fn decode_cmyk(s: &mut ObjectStream<'_>, node: NodeId, _version: u16) -> Result<()> {
    for name in ["C", "M", "Y", "K"] {
        let v = s.cursor().read_u8("cmyk component")?;
        if v > 100 {
            return Err(Error::InvalidColor(format!("{name} component {v} exceeds 100%")));
        }
        s.set(node, name, AttrValue::Int(v as i64));
    }
    read_flags(s, node)
}

fn decode_hsv(s: &mut ObjectStream<'_>, node: NodeId, _version: u16) -> Result<()> {
    let h = s.cursor().read_u16("hue")?;
    if h >= 360 {
        return Err(Error::InvalidColor(format!("hue {h} outside [0, 360)")));
    }
    let sat = s.cursor().read_u8("saturation")?;
    let val = s.cursor().read_u8("value")?;
    if sat > 100 || val > 100 {
        return Err(Error::InvalidColor(format!("saturation/value {sat}/{val} exceeds 100%")));
    }
    s.set(node, "H", AttrValue::Int(h as i64));
    s.set(node, "S", AttrValue::Int(sat as i64));
    s.set(node, "V", AttrValue::Int(val as i64));
    read_flags(s, node)
}

fn decode_hls(s: &mut ObjectStream<'_>, node: NodeId, _version: u16) -> Result<()> {
    let h = s.cursor().read_u16("hue")?;
    if h >= 360 {
        return Err(Error::InvalidColor(format!("hue {h} outside [0, 360)")));
    }
    let l = s.cursor().read_u8("lightness")?;
    let sat = s.cursor().read_u8("saturation")?;
    if l > 100 || sat > 100 {
        return Err(Error::InvalidColor(format!("lightness/saturation {l}/{sat} exceeds 100%")));
    }
    s.set(node, "H", AttrValue::Int(h as i64));
    s.set(node, "L", AttrValue::Int(l as i64));
    s.set(node, "S", AttrValue::Int(sat as i64));
    read_flags(s, node)
}

fn decode_gray(s: &mut ObjectStream<'_>, node: NodeId, _version: u16) -> Result<()> {
    let level = s.cursor().read_u8("level")?;
    s.set(node, "level", AttrValue::Int(level as i64));
    read_flags(s, node)
}
