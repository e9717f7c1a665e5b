//! Basic shared types: class identifiers and errors.

mod clsid;
mod error;

pub use clsid::ClassId;
pub use error::{Error, Result};
