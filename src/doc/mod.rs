//! Document readers: the library's entry points.
//!
//! Each reader validates the container signature, extracts the named
//! sub-streams its document type requires, and drives decode sessions in
//! a fixed, version-dependent order. All of them borrow a prebuilt
//! [`crate::registry::ObjectRegistry`]; independent documents may be
//! parsed concurrently against the same registry.

mod blob;
mod connection_file;
mod layer_file;
mod map_document;

pub use blob::{decode_symbol_blob, decode_symbol_records, BatchOutcome, SymbolRecord};
pub use connection_file::ConnectionFile;
pub use layer_file::LayerFile;
pub use map_document::MapDocument;

use crate::graph::{NodeId, ObjectArena, ObjectNode};
use crate::stream::Cursor;
use crate::util::Result;

/// Decode options shared by every document reader.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocOptions {
    /// Downgrade size-accounting mismatches to diagnostics.
    pub tolerant: bool,
    /// Emit a debug event per decoded object.
    pub trace: bool,
    /// Record extension class names without decoding their payloads.
    pub structure_only: bool,
}

/// A decoded object graph with its designated root.
#[derive(Debug)]
pub struct DecodedDocument {
    pub arena: ObjectArena,
    pub root: NodeId,
}

impl DecodedDocument {
    pub fn root_node(&self) -> &ObjectNode {
        self.arena.get(self.root)
    }

    /// Plain nested mapping of the whole graph from the root.
    pub fn project(&self) -> serde_json::Value {
        self.arena.project(self.root)
    }
}

/// Parse a "Version" sub-stream: a (major, minor) u16 pair.
pub(crate) fn read_version_stream(data: &[u8]) -> Result<(u16, u16)> {
    let mut cursor = Cursor::new(data);
    let major = cursor.read_u16("version major")?;
    let minor = cursor.read_u16("version minor")?;
    Ok((major, minor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_stream() {
        let mut data = Vec::new();
        data.extend_from_slice(&3u16.to_le_bytes());
        data.extend_from_slice(&1u16.to_le_bytes());
        assert_eq!(read_version_stream(&data).unwrap(), (3, 1));
        assert!(read_version_stream(&data[..2]).is_err());
    }
}
