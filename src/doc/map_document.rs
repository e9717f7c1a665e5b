//! Map document reader.
//!
//! A map document holds the "Maps" stream (one or more map frames, each
//! length-prefixed so an undecodable map can be reported and skipped
//! without losing the rest), plus optional "Metadata", "Templates", and
//! "PageLayout" streams read in that fixed order.

use std::path::Path;

use tracing::{debug, warn};

use super::{read_version_stream, DecodedDocument, DocOptions};
use crate::compound::CompoundFile;
use crate::graph::{NodeId, ObjectArena};
use crate::registry::ObjectRegistry;
use crate::stream::{Cursor, ObjectStream, ReadOptions};
use crate::util::{Error, Result};

const MAPS_STREAM: &str = "Maps";
const VERSION_STREAM: &str = "Version";
const METADATA_STREAM: &str = "Metadata";
const TEMPLATES_STREAM: &str = "Templates";
const PAGE_LAYOUT_STREAM: &str = "PageLayout";

#[derive(Debug)]
pub struct MapDocument {
    /// Arena backing the decoded map frames.
    pub arena: ObjectArena,
    pub maps: Vec<NodeId>,
    /// Maps whose records could not be decoded and were skipped.
    pub skipped_maps: usize,
    pub metadata: Option<DecodedDocument>,
    pub templates: Vec<String>,
    pub page_layout: Option<DecodedDocument>,
    pub format_version: Option<(u16, u16)>,
}

impl MapDocument {
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

        let maps_data = container
            .stream(MAPS_STREAM)
            .ok_or(Error::MissingStream(MAPS_STREAM))?;
        let (arena, maps, skipped_maps) = Self::read_maps(maps_data, registry, opts)?;

        let metadata = match container.stream(METADATA_STREAM) {
            Some(data) => Some(Self::read_single_object(data, registry, opts, METADATA_STREAM)?),
            None => None,
        };
        let templates = match container.stream(TEMPLATES_STREAM) {
            Some(data) => Self::read_templates(data)?,
            None => Vec::new(),
        };
        let page_layout = match container.stream(PAGE_LAYOUT_STREAM) {
            Some(data) => Some(Self::read_single_object(data, registry, opts, PAGE_LAYOUT_STREAM)?),
            None => None,
        };

        Ok(Self {
            arena,
            maps,
            skipped_maps,
            metadata,
            templates,
            page_layout,
            format_version,
        })
    }

    /// u32 map count, then per map a u32 record length and the map object.
    /// A record failing with a recoverable kind is reported and skipped;
    /// the remaining records still decode.
    fn read_maps(
        data: &[u8],
        registry: &ObjectRegistry,
        opts: DocOptions,
    ) -> Result<(ObjectArena, Vec<NodeId>, usize)> {
        let mut session = ObjectStream::new(registry, data)
            .with_tolerant(opts.tolerant)
            .with_trace(opts.trace)
            .with_structure_only(opts.structure_only);

        let count = session.cursor().read_u32("map count")?;
        debug!(count, "decoding map frames");
        let mut maps = Vec::with_capacity(count as usize);
        let mut skipped = 0usize;
        for index in 0..count {
            let len = session.cursor().read_u32("map record length")? as u64;
            let start = session.pos();
            let target = start + len;
            match session.read_object("map", ReadOptions::sized(len)) {
                Ok(node) => maps.push(node),
                Err(e) if e.is_skippable() => {
                    warn!(index, error = %e, "skipping undecodable map record");
                    session.cursor().seek_to(target)?;
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        session.finish(MAPS_STREAM)?;
        Ok((session.into_arena(), maps, skipped))
    }

    fn read_single_object(
        data: &[u8],
        registry: &ObjectRegistry,
        opts: DocOptions,
        label: &'static str,
    ) -> Result<DecodedDocument> {
        let mut session = ObjectStream::new(registry, data)
            .with_tolerant(opts.tolerant)
            .with_trace(opts.trace)
            .with_structure_only(opts.structure_only);
        let root = session.read_object(label, ReadOptions::default())?;
        session.finish(label)?;
        Ok(DecodedDocument { arena: session.into_arena(), root })
    }

    /// u32 count, then length-prefixed template paths.
    fn read_templates(data: &[u8]) -> Result<Vec<String>> {
        let mut cursor = Cursor::new(data);
        let count = cursor.read_u32("template count")?;
        let mut templates = Vec::with_capacity(count as usize);
        for _ in 0..count {
            templates.push(cursor.read_string("template path")?);
        }
        Ok(templates)
    }

    /// Plain nested mapping of every decoded map frame.
    pub fn project_maps(&self) -> Vec<serde_json::Value> {
        self.maps.iter().map(|&m| self.arena.project(m)).collect()
    }
}
