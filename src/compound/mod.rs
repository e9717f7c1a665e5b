//! Compound-container parsing.
//!
//! The outer file format is a sectored compound document holding multiple
//! named byte sub-streams ("Layer", "Maps", "Version", ...). This module
//! turns raw bytes into those streams and nothing more; object decoding
//! happens in [`crate::stream`].

pub mod format;
mod reader;

pub use reader::CompoundFile;
