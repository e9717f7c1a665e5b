//! Raster layer decoder.
//!
//! Pixel data itself is out of scope; the embedded legend picture is
//! validated only as far as its container magic, and a malformed picture
//! fails with `UnreadablePicture` so an enclosing length-bounded slot can
//! report it precisely.

use crate::graph::{AttrValue, NodeId};
use crate::registry::{Decoder, VersionSet};
use crate::stream::ObjectStream;
use crate::util::{ClassId, Error, Result};

pub static RASTER_LAYER: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0xD02371C7,
        0x35F7,
        0x11D2,
        [0xB1, 0xF2, 0x00, 0xC0, 0x4F, 0x8E, 0xDE, 0xFF],
    ),
    class_name: "RasterLayer",
    versions: VersionSet::Of(&[1, 2]),
    decode: decode_raster_layer,
};

/// Device-independent bitmap magic.
const BITMAP_MAGIC: &[u8; 2] = b"BM";
/// Enhanced-metafile record-type prefix.
const METAFILE_MAGIC: &[u8; 2] = &[0x01, 0x00];

fn decode_raster_layer(s: &mut ObjectStream<'_>, node: NodeId, version: u16) -> Result<()> {
    super::read_layer_prefix(s, node)?;

    let source = s.cursor().read_string("raster source path")?;
    s.set(node, "source", AttrValue::Str(source));
    let show_resolution = s.cursor().read_bool("show resolution")?;
    s.set(node, "show_resolution", AttrValue::Bool(show_resolution));

    // Legend picture: length-prefixed blob, magic-checked only.
    let picture_len = s.cursor().read_u32("picture length")? as u64;
    if picture_len > 0 {
        if picture_len < 2 {
            return Err(Error::UnreadablePicture(format!(
                "picture blob of {picture_len} bytes is too short"
            )));
        }
        let magic = [
            s.cursor().read_u8("picture magic")?,
            s.cursor().read_u8("picture magic")?,
        ];
        if &magic != BITMAP_MAGIC && &magic != METAFILE_MAGIC {
            return Err(Error::UnreadablePicture(format!(
                "unrecognized picture container {magic:02X?}"
            )));
        }
        s.cursor().skip(picture_len - 2, "picture payload")?;
        s.set(node, "picture_bytes", AttrValue::Int(picture_len as i64));
    }

    if version >= 2 {
        let transparency = s.cursor().read_i32("transparency")?;
        s.set(node, "transparency", AttrValue::Int(transparency as i64));
    }

    let exts = s.read_extensions("raster layer extensions")?;
    s.arena_mut().get_mut(node).extensions = exts.nodes;
    Ok(())
}
