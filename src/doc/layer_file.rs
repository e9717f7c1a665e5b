//! Layer file reader.
//!
//! A layer file is a compound container holding one root layer object in
//! its "Layer" stream, with an optional "Version" stream supplying the
//! root object's format version out of band.

use std::path::Path;

use tracing::debug;

use super::{read_version_stream, DecodedDocument, DocOptions};
use crate::compound::CompoundFile;
use crate::registry::ObjectRegistry;
use crate::stream::{ObjectStream, ReadOptions};
use crate::util::{Error, Result};

const LAYER_STREAM: &str = "Layer";
const VERSION_STREAM: &str = "Version";

#[derive(Debug)]
pub struct LayerFile {
    pub document: DecodedDocument,
    /// (major, minor) from the "Version" stream, when present.
    pub format_version: Option<(u16, u16)>,
}

impl LayerFile {
    pub fn open(
        path: impl AsRef<Path>,
        registry: &ObjectRegistry,
        opts: DocOptions,
    ) -> Result<Self> {
        let container = CompoundFile::open(path)?;
        Self::from_container(&container, registry, opts)
    }

    pub fn parse(data: &[u8], registry: &ObjectRegistry, opts: DocOptions) -> Result<Self> {
        let container = CompoundFile::parse(data)?;
        Self::from_container(&container, registry, opts)
    }

    fn from_container(
        container: &CompoundFile,
        registry: &ObjectRegistry,
        opts: DocOptions,
    ) -> Result<Self> {
        let format_version = match container.stream(VERSION_STREAM) {
            Some(data) => Some(read_version_stream(data)?),
            None => None,
        };
        let data = container
            .stream(LAYER_STREAM)
            .ok_or(Error::MissingStream(LAYER_STREAM))?;
        debug!(size = data.len(), ?format_version, "decoding layer stream");

        let mut session = ObjectStream::new(registry, data)
            .with_tolerant(opts.tolerant)
            .with_trace(opts.trace)
            .with_structure_only(opts.structure_only);
        if let Some((major, _)) = format_version {
            session.set_context_version(major);
        }
        let root = session.read_object("layer", ReadOptions::default())?;
        session.finish(LAYER_STREAM)?;

        Ok(Self {
            document: DecodedDocument { arena: session.into_arena(), root },
            format_version,
        })
    }

    /// Name of the root layer, when it has one.
    pub fn layer_name(&self) -> Option<&str> {
        match self.document.root_node().get("name") {
            Some(crate::graph::AttrValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}
