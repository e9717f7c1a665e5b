//! Style-blob decoding boundary.
//!
//! Blobs are extracted from the external style database by a third-party
//! export utility; this module is agnostic to how a blob was produced and
//! consumes exactly one raw blob per decode call. A blob is a bare object
//! stream: one root symbol slot, no compound container around it.

use tracing::warn;

use super::{DecodedDocument, DocOptions};
use crate::registry::ObjectRegistry;
use crate::stream::{ObjectStream, ReadOptions};
use crate::util::{Error, Result};

/// One record produced by the external blob source.
#[derive(Clone, Debug)]
pub struct SymbolRecord {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub tags: Vec<String>,
    pub blob: Vec<u8>,
}

/// Decode a single symbol blob into an object graph.
pub fn decode_symbol_blob(
    registry: &ObjectRegistry,
    blob: &[u8],
    opts: DocOptions,
) -> Result<DecodedDocument> {
    let mut session = ObjectStream::new(registry, blob)
        .with_tolerant(opts.tolerant)
        .with_trace(opts.trace)
        .with_structure_only(opts.structure_only);
    let root = session.read_object("symbol", ReadOptions::default())?;
    session.finish("symbol blob")?;
    Ok(DecodedDocument { arena: session.into_arena(), root })
}

/// Batch result: decoded graphs plus per-record failures.
#[derive(Default)]
pub struct BatchOutcome {
    pub decoded: Vec<(String, DecodedDocument)>,
    pub failures: Vec<(String, Error)>,
}

/// Decode a batch of symbol records. A failing record is reported and
/// recorded; the remaining records are still processed.
pub fn decode_symbol_records(
    registry: &ObjectRegistry,
    records: &[SymbolRecord],
    opts: DocOptions,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for record in records {
        match decode_symbol_blob(registry, &record.blob, opts) {
            Ok(document) => outcome.decoded.push((record.name.clone(), document)),
            Err(e) => {
                warn!(name = %record.name, id = record.id, error = %e, "symbol blob failed");
                outcome.failures.push((record.name.clone(), e));
            }
        }
    }
    outcome
}
