//! Special-case extension decoders.
//!
//! Two deliberate outliers of the decoder contract live here: the custom
//! behavior extension, whose payload is only partially understood but
//! whose partial decode is still worth attaching, and annotation layers,
//! whose identifier is recognized but whose layout is not implemented.
//! Both surface through the extension-slot recovery path.

use crate::graph::{AttrValue, NodeId};
use crate::registry::{Decoder, VersionSet};
use crate::stream::ObjectStream;
use crate::util::{ClassId, Error, Result};

pub static CUSTOM_BEHAVIOR_EXTENSION: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0xB90FCA2F,
        0x9D64,
        0x11D2,
        [0x9F, 0x5E, 0x00, 0xC0, 0x4F, 0x6B, 0xC6, 0xA5],
    ),
    class_name: "CustomBehaviorExtension",
    versions: VersionSet::Any,
    decode: decode_custom_behavior,
};

pub static ANNOTATION_LAYER: Decoder = Decoder {
    class_id: ClassId::from_fields(
        0xDBCA59AC,
        0x86EA,
        0x11D2,
        [0x9F, 0x93, 0x00, 0xC0, 0x4F, 0x6B, 0xC6, 0xA5],
    ),
    class_name: "AnnotationLayer",
    versions: VersionSet::Any,
    decode: decode_annotation_layer,
};

/// The leading name string decodes reliably; everything after it is an
/// opaque vendor payload. The partial node is attached to the caller's
/// extension list alongside the failure.
fn decode_custom_behavior(s: &mut ObjectStream<'_>, node: NodeId, _version: u16) -> Result<()> {
    let name = s.cursor().read_string("extension name")?;
    s.set(node, "name", AttrValue::Str(name));
    s.set(node, "partial", AttrValue::Bool(true));
    Err(Error::CustomExtension(node))
}

fn decode_annotation_layer(_s: &mut ObjectStream<'_>, _node: NodeId, _version: u16) -> Result<()> {
    Err(Error::NotImplemented { class_name: ANNOTATION_LAYER.class_name })
}
