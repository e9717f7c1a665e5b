//! Error types for the arcdoc library.

use std::path::PathBuf;
use thiserror::Error;

use crate::graph::NodeId;
use crate::util::ClassId;

/// Main error type for document decoding.
#[derive(Error, Debug)]
pub enum Error {
    /// File does not exist or cannot be accessed
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Input does not carry the compound-container signature
    #[error("Not a compound document: missing container signature")]
    DocumentType,

    /// Structurally valid container with no named streams
    #[error("Compound document contains no streams")]
    EmptyDocument,

    /// A required named stream is missing from the container
    #[error("Required stream not found: {0}")]
    MissingStream(&'static str),

    /// Object version outside the decoder's supported set
    #[error("Unsupported version {version} for {class_name}")]
    UnsupportedVersion { class_name: &'static str, version: u16 },

    /// Class identifier not present in the registry
    #[error("Unknown class identifier {0}")]
    UnknownClassId(ClassId),

    /// Identifier recognized but its layout is not implemented
    #[error("Object layout not implemented: {class_name}")]
    NotImplemented { class_name: &'static str },

    /// Symbol payload could not be decoded
    #[error("Unreadable symbol: {0}")]
    UnreadableSymbol(String),

    /// Embedded picture payload could not be decoded
    #[error("Unreadable picture: {0}")]
    UnreadablePicture(String),

    /// Color payload outside its valid model range
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Recognized custom extension whose partial payload is still usable.
    /// Carries the arena node holding what was decoded before the failure.
    #[error("Custom extension payload only partially understood")]
    CustomExtension(NodeId),

    /// A labeled field did not hold its expected value.
    /// Never downgraded by tolerant mode.
    #[error("Format assertion failed at '{label}': found {found}, expected {expected}")]
    FormatAssertion {
        label: &'static str,
        found: u64,
        expected: String,
    },

    /// Object consumed a different number of bytes than its declared size
    #[error("Size mismatch at '{label}': consumed {consumed} bytes, declared {declared}")]
    SizeMismatch {
        label: &'static str,
        consumed: u64,
        declared: u64,
    },

    /// Stream not fully consumed by a strict-mode decode
    #[error("Trailing bytes in '{label}': {remaining} bytes unconsumed")]
    TrailingBytes { label: &'static str, remaining: u64 },

    /// Unknown tag in an indexed-property block (not independently skippable)
    #[error("Unknown indexed property tag {tag}")]
    UnknownProperty { tag: i32 },

    /// Buffer or sub-stream is truncated
    #[error("Unexpected end of data at position {0}")]
    UnexpectedEof(u64),

    /// Invalid data structure in file
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    /// Memory mapping failed
    #[error("Memory mapping failed: {0}")]
    MmapFailed(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an invalid structure error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidStructure(msg.into())
    }

    /// True for the failure kinds an enclosing length-bounded slot may
    /// recover from by skipping the declared length.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Self::UnknownClassId(_) | Self::NotImplemented { .. }
        )
    }
}

/// Result type alias for decoding operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::DocumentType;
        assert!(e.to_string().contains("signature"));

        let e = Error::SizeMismatch { label: "layer", consumed: 12, declared: 16 };
        assert!(e.to_string().contains("12"));
        assert!(e.to_string().contains("16"));
    }

    #[test]
    fn test_skippable() {
        assert!(Error::UnknownClassId(ClassId::NIL).is_skippable());
        assert!(Error::NotImplemented { class_name: "Foo" }.is_skippable());
        assert!(!Error::DocumentType.is_skippable());
        assert!(!Error::FormatAssertion { label: "x", found: 1, expected: "2".into() }
            .is_skippable());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
