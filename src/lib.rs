//! # arcdoc
//!
//! Read-only decoder for a family of legacy compound binary GIS documents:
//! style-database blobs, layer files, map documents, and database-connection
//! files. Raw bytes go in, a typed, introspectable object graph comes out.
//!
//! The format is undocumented and version-evolving; the decoder leans on
//! its two structural escape hatches — length-prefixed object slots and a
//! per-session reference table — to survive object kinds it does not
//! understand without desynchronizing the rest of the document.
//!
//! ## Modules
//!
//! - [`util`] - Class identifiers and errors
//! - [`compound`] - Compound-container reader (named byte sub-streams)
//! - [`stream`] - Cursor, reference table, and the decode session
//! - [`graph`] - Arena-based decoded object graph
//! - [`registry`] - Class identifier → decoder dispatch
//! - [`objects`] - Versioned decoders for each entity type
//! - [`doc`] - Document readers (layer file, map document, connection file,
//!   style blobs)
//!
//! ## Example
//!
//! ```ignore
//! use arcdoc::prelude::*;
//!
//! let registry = ObjectRegistry::with_known_types();
//! let layer = LayerFile::open("roads.lyr", &registry, DocOptions::default())?;
//! println!("{}", layer.document.project());
//! ```

pub mod compound;
pub mod doc;
pub mod graph;
pub mod objects;
pub mod registry;
pub mod stream;
pub mod util;

// Re-export commonly used types
pub use registry::ObjectRegistry;
pub use util::{ClassId, Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::compound::CompoundFile;
    pub use crate::doc::{
        decode_symbol_blob, decode_symbol_records, ConnectionFile, DocOptions, LayerFile,
        MapDocument, SymbolRecord,
    };
    pub use crate::graph::{AttrValue, NodeId, ObjectArena};
    pub use crate::registry::ObjectRegistry;
    pub use crate::stream::{ObjectStream, ReadOptions};
    pub use crate::util::{ClassId, Error, Result};
}
