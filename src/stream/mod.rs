//! Generic object-stream deserialization.
//!
//! - [`Cursor`] — forward-only primitive codec over one byte buffer
//! - [`ReferenceTable`] — occurrence-indexed backreference resolution
//! - [`ObjectStream`] — the decode session orchestrating dispatch,
//!   version gating, and length-prefixed skip recovery

mod cursor;
mod refs;
mod session;

pub use cursor::Cursor;
pub use refs::ReferenceTable;
pub use session::{
    ExtensionOutcome, ObjectStream, ReadOptions, MARKER_INLINE, MARKER_NULL, MARKER_REF,
};
