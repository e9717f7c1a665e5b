//! Object-stream decode session.
//!
//! One [`ObjectStream`] drives a single top-to-bottom decode pass over one
//! sub-stream: header dispatch on the slot marker, class-identifier lookup,
//! reference-table management, version gating, and the length-prefixed-skip
//! recovery that lets the rest of a document survive unknown object kinds.

use tracing::{debug, warn};

use crate::graph::{AttrValue, NodeId, ObjectArena, ObjectNode};
use crate::registry::ObjectRegistry;
use crate::stream::{Cursor, ReferenceTable};
use crate::util::{ClassId, Error, Result};

/// Slot marker: the slot is empty.
pub const MARKER_NULL: u8 = 0x00;
/// Slot marker: a fresh object follows (class identifier, then payload).
pub const MARKER_INLINE: u8 = 0x01;
/// Slot marker: a backreference follows (u32 occurrence index).
pub const MARKER_REF: u8 = 0x02;

/// Per-slot options for [`ObjectStream::read_object`].
#[derive(Clone, Copy, Debug)]
pub struct ReadOptions {
    /// Slot carries a leading marker and may hold a backreference or null.
    /// When false the slot is a bare `[class id][payload]` inline object.
    pub allow_reference: bool,
    /// Declared slot size in bytes, measured from the start of the slot.
    /// Mismatch after decode is fatal in strict mode, a diagnostic in
    /// tolerant mode.
    pub expected_size: Option<u64>,
    /// Slot must resolve to an already-decoded instance.
    pub expect_existing: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { allow_reference: true, expected_size: None, expect_existing: false }
    }
}

impl ReadOptions {
    /// Bare inline slot: no marker, no backreference.
    pub fn inline() -> Self {
        Self { allow_reference: false, ..Self::default() }
    }

    pub fn sized(expected_size: u64) -> Self {
        Self { expected_size: Some(expected_size), ..Self::default() }
    }

    pub fn existing() -> Self {
        Self { expect_existing: true, ..Self::default() }
    }
}

/// Result of reading a trailing extension list.
#[derive(Debug, Default)]
pub struct ExtensionOutcome {
    /// Successfully (or partially, for custom extensions) decoded entries.
    pub nodes: Vec<NodeId>,
    /// Entries skipped over via their declared length.
    pub skipped: usize,
}

/// One decode session over one byte sub-stream.
pub struct ObjectStream<'a> {
    cursor: Cursor<'a>,
    registry: &'a ObjectRegistry,
    arena: ObjectArena,
    refs: ReferenceTable,
    tolerant: bool,
    trace: bool,
    structure_only: bool,
    context_version: Option<u16>,
}

impl<'a> ObjectStream<'a> {
    pub fn new(registry: &'a ObjectRegistry, data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
            registry,
            arena: ObjectArena::new(),
            refs: ReferenceTable::new(),
            tolerant: false,
            trace: false,
            structure_only: false,
            context_version: None,
        }
    }

    /// Tolerant mode: size-accounting mismatches become diagnostics.
    /// Unknown-type recovery is independent of this flag, and format
    /// assertions on known fields are never suppressed by it.
    pub fn with_tolerant(mut self, tolerant: bool) -> Self {
        self.tolerant = tolerant;
        self
    }

    /// Emit a debug event per decoded object.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Structure-only mode: extension lists record class names without
    /// decoding payloads. Inline objects are still fully decoded, since
    /// their extent is only known by reading them.
    pub fn with_structure_only(mut self, structure_only: bool) -> Self {
        self.structure_only = structure_only;
        self
    }

    /// Supply a format version for the next object read at this level;
    /// consumed by the first object that would otherwise read its own
    /// version field.
    pub fn set_context_version(&mut self, version: u16) {
        self.context_version = Some(version);
    }

    pub fn is_tolerant(&self) -> bool {
        self.tolerant
    }

    #[inline]
    pub fn cursor(&mut self) -> &mut Cursor<'a> {
        &mut self.cursor
    }

    #[inline]
    pub fn pos(&self) -> u64 {
        self.cursor.pos()
    }

    pub fn arena(&self) -> &ObjectArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut ObjectArena {
        &mut self.arena
    }

    /// Consume the session, keeping the decoded graph.
    pub fn into_arena(self) -> ObjectArena {
        self.arena
    }

    /// Attribute-setting shorthand for decoder field routines.
    pub fn set(&mut self, node: NodeId, name: &'static str, value: AttrValue) {
        self.arena.get_mut(node).set(name, value);
    }

    /// Read one object slot; a null slot is an error here.
    pub fn read_object(&mut self, label: &'static str, opts: ReadOptions) -> Result<NodeId> {
        self.read_object_opt(label, opts)?
            .ok_or_else(|| Error::invalid(format!("Null object in required slot '{label}'")))
    }

    /// Read one object slot, allowing a null marker.
    ///
    /// An unknown class identifier propagates to the caller; recovery by
    /// skipping a declared length is the caller's branch (see
    /// [`Self::read_extensions`] for the slot shape that supports it).
    pub fn read_object_opt(
        &mut self,
        label: &'static str,
        opts: ReadOptions,
    ) -> Result<Option<NodeId>> {
        let slot_start = self.cursor.pos();

        if !opts.allow_reference {
            let clsid = self.cursor.read_clsid(label)?;
            let node = self.decode_fresh(label, clsid, opts.expected_size, slot_start, false)?;
            return Ok(Some(node));
        }

        let marker = self.cursor.expect_u8(label, &[MARKER_NULL, MARKER_INLINE, MARKER_REF])?;
        match marker {
            MARKER_NULL => {
                if opts.expect_existing {
                    return Err(Error::FormatAssertion {
                        label,
                        found: MARKER_NULL as u64,
                        expected: "backreference marker".to_string(),
                    });
                }
                Ok(None)
            }
            MARKER_REF => {
                let index = self.cursor.read_u32(label)?;
                let node = self.refs.resolve(index)?;
                if self.trace {
                    debug!(label, index, "resolved backreference");
                }
                Ok(Some(node))
            }
            _ => {
                if opts.expect_existing {
                    return Err(Error::FormatAssertion {
                        label,
                        found: MARKER_INLINE as u64,
                        expected: "backreference marker".to_string(),
                    });
                }
                let clsid = self.cursor.read_clsid(label)?;
                let node = self.decode_fresh(label, clsid, opts.expected_size, slot_start, true)?;
                Ok(Some(node))
            }
        }
    }

    /// Decode a fresh object whose class identifier has been read.
    ///
    /// The new instance is registered in the reference table before its
    /// field routine runs, so forward and self references resolve.
    fn decode_fresh(
        &mut self,
        label: &'static str,
        clsid: ClassId,
        expected_size: Option<u64>,
        slot_start: u64,
        register: bool,
    ) -> Result<NodeId> {
        let decoder = self.registry.lookup(clsid)?;

        let version = match self.context_version.take() {
            Some(v) => v,
            None => self.cursor.read_u16("version")?,
        };
        if !decoder.versions.supports(version) {
            return Err(Error::UnsupportedVersion { class_name: decoder.class_name, version });
        }

        let node = self.arena.alloc(ObjectNode::new(decoder.class_name, clsid, version));
        if register {
            self.refs.register(node);
        }
        if self.trace {
            debug!(label, class = decoder.class_name, version, pos = self.cursor.pos(), "decoding");
        }

        (decoder.decode)(self, node, version)?;

        if let Some(declared) = expected_size {
            let consumed = self.cursor.pos() - slot_start;
            if consumed != declared {
                if self.tolerant {
                    warn!(label, consumed, declared, "declared size mismatch (tolerant)");
                } else {
                    return Err(Error::SizeMismatch { label, consumed, declared });
                }
            }
        }
        Ok(node)
    }

    /// Read a trailing extension list: u32 count, then per record a u32
    /// payload length, a class identifier, and the payload.
    ///
    /// This is the format's central resilience mechanism and the only
    /// place unknown or unimplemented object kinds are recovered from:
    /// each record is decoded independently and, on failure of a
    /// skippable kind, the cursor moves exactly past the declared payload
    /// length so the rest of the document stays in sync. A recognized
    /// custom extension with a usable partial payload is attached to the
    /// outcome despite its failure.
    pub fn read_extensions(&mut self, label: &'static str) -> Result<ExtensionOutcome> {
        let count = self.cursor.read_u32(label)?;
        let mut outcome = ExtensionOutcome::default();

        for _ in 0..count {
            let len = self.cursor.read_u32("extension length")? as u64;
            let clsid = self.cursor.read_clsid("extension class")?;
            let payload_start = self.cursor.pos();
            let target = payload_start + len;

            if self.structure_only {
                let class_name = self
                    .registry
                    .lookup(clsid)
                    .map(|d| d.class_name)
                    .unwrap_or("Unknown");
                let node = self.arena.alloc(ObjectNode::new(class_name, clsid, 0));
                self.cursor.seek_to(target)?;
                outcome.nodes.push(node);
                continue;
            }

            match self.decode_fresh(label, clsid, None, payload_start, false) {
                Ok(node) => {
                    let pos = self.cursor.pos();
                    if pos > target {
                        // Overran the declared region: already desynced.
                        return Err(Error::SizeMismatch {
                            label,
                            consumed: pos - payload_start,
                            declared: len,
                        });
                    }
                    if pos < target {
                        if !self.tolerant {
                            return Err(Error::SizeMismatch {
                                label,
                                consumed: pos - payload_start,
                                declared: len,
                            });
                        }
                        warn!(label, consumed = pos - payload_start, declared = len,
                            "extension underran declared length (tolerant)");
                        self.cursor.seek_to(target)?;
                    }
                    outcome.nodes.push(node);
                }
                Err(Error::CustomExtension(node)) => {
                    debug!(label, %clsid, "custom extension attached with partial payload");
                    self.cursor.seek_to(target)?;
                    outcome.nodes.push(node);
                }
                Err(e) if e.is_skippable() => {
                    warn!(label, %clsid, len, error = %e, "skipping extension record");
                    self.cursor.seek_to(target)?;
                    outcome.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(outcome)
    }

    /// Read an indexed-property block: u32 count, then per entry an i32
    /// property tag and a u32 byte length, dispatched to `handler`.
    ///
    /// The handler returns whether it recognized the tag and must consume
    /// exactly the declared length. Unlike extension records these entries
    /// are not independently skippable: an unhandled tag or an inexact
    /// handler is a hard failure in every mode.
    pub fn read_indexed_properties<F>(&mut self, label: &'static str, mut handler: F) -> Result<u32>
    where
        F: FnMut(&mut Self, i32) -> Result<bool>,
    {
        let count = self.cursor.read_u32(label)?;
        for _ in 0..count {
            let tag = self.cursor.read_i32("property tag")?;
            let len = self.cursor.read_u32("property length")? as u64;
            let start = self.cursor.pos();

            if !handler(self, tag)? {
                return Err(Error::UnknownProperty { tag });
            }

            let consumed = self.cursor.pos() - start;
            if consumed != len {
                return Err(Error::SizeMismatch { label, consumed, declared: len });
            }
        }
        Ok(count)
    }

    /// Strict-completeness check: the sub-stream must be fully consumed.
    pub fn finish(&mut self, label: &'static str) -> Result<()> {
        if self.cursor.at_end() {
            return Ok(());
        }
        let remaining = self.cursor.remaining();
        if self.tolerant {
            warn!(label, remaining, "trailing bytes after decode (tolerant)");
            Ok(())
        } else {
            Err(Error::TrailingBytes { label, remaining })
        }
    }
}
