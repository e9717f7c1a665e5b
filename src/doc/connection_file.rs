//! Database-connection file reader.
//!
//! The smallest document type: a container whose "SDEConnProperties"
//! stream holds one property set.

use std::path::Path;

use super::{DecodedDocument, DocOptions};
use crate::compound::CompoundFile;
use crate::graph::AttrValue;
use crate::registry::ObjectRegistry;
use crate::stream::{ObjectStream, ReadOptions};
use crate::util::{Error, Result};

const CONNECTION_STREAM: &str = "SDEConnProperties";

#[derive(Debug)]
pub struct ConnectionFile {
    pub document: DecodedDocument,
}

impl ConnectionFile {
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
        let data = container
            .stream(CONNECTION_STREAM)
            .ok_or(Error::MissingStream(CONNECTION_STREAM))?;
        let mut session = ObjectStream::new(registry, data)
            .with_tolerant(opts.tolerant)
            .with_trace(opts.trace)
            .with_structure_only(opts.structure_only);
        let root = session.read_object("connection properties", ReadOptions::default())?;
        session.finish(CONNECTION_STREAM)?;
        Ok(Self { document: DecodedDocument { arena: session.into_arena(), root } })
    }

    /// Look up one connection property by key.
    pub fn property(&self, key: &str) -> Option<&AttrValue> {
        let node = self.document.root_node();
        let AttrValue::List(pairs) = node.get("properties")? else {
            return None;
        };
        for pair in pairs {
            if let AttrValue::List(kv) = pair {
                if let [AttrValue::Str(k), v] = kv.as_slice() {
                    if k == key {
                        return Some(v);
                    }
                }
            }
        }
        None
    }
}
