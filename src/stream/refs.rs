//! Per-session reference table.
//!
//! Reference-eligible objects are appended in occurrence order as they are
//! decoded; later backreference slots resolve an occurrence index back to
//! the already-decoded arena node. Append-only.

use crate::graph::NodeId;
use crate::util::{Error, Result};

#[derive(Default, Debug)]
pub struct ReferenceTable {
    entries: Vec<NodeId>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly-allocated object, returning its occurrence index.
    pub fn register(&mut self, node: NodeId) -> u32 {
        let index = self.entries.len() as u32;
        self.entries.push(node);
        index
    }

    /// Resolve an occurrence index to the existing instance.
    pub fn resolve(&self, index: u32) -> Result<NodeId> {
        self.entries.get(index as usize).copied().ok_or_else(|| {
            Error::invalid(format!(
                "Backreference {} out of range (table holds {})",
                index,
                self.entries.len()
            ))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
