//! Process-wide object registry.
//!
//! Maps 16-byte class identifiers to decoder descriptors. The registry is
//! built once, up front, from the fixed compile-time table in
//! [`crate::objects::ALL_DECODERS`] and is read-only afterwards, so a single
//! registry can back any number of concurrent independent decode sessions.

use std::collections::HashMap;

use crate::graph::NodeId;
use crate::stream::ObjectStream;
use crate::util::{ClassId, Error, Result};

/// The format versions one decoder understands.
#[derive(Clone, Copy, Debug)]
pub enum VersionSet {
    /// Decoder accepts any version (layout never changed).
    Any,
    /// Closed set of supported versions.
    Of(&'static [u16]),
}

impl VersionSet {
    pub fn supports(&self, version: u16) -> bool {
        match self {
            VersionSet::Any => true,
            VersionSet::Of(set) => set.contains(&version),
        }
    }
}

/// Field routine: populates `node`'s attributes by reading the session
/// cursor, branching strictly on `version`.
pub type DecodeFn = fn(&mut ObjectStream<'_>, NodeId, u16) -> Result<()>;

/// Descriptor for one entity type: identifier, supported versions, and the
/// field routine. Each decoder declares exactly one identifier.
pub struct Decoder {
    pub class_id: ClassId,
    pub class_name: &'static str,
    pub versions: VersionSet,
    pub decode: DecodeFn,
}

/// Identifier → decoder map. Immutable after construction.
pub struct ObjectRegistry {
    map: HashMap<ClassId, &'static Decoder>,
}

impl ObjectRegistry {
    /// Build a registry from an explicit decoder list.
    ///
    /// Each decoder declares exactly one identifier; a duplicate in the
    /// list is a programming error and panics.
    pub fn new(decoders: &[&'static Decoder]) -> Self {
        let mut map = HashMap::with_capacity(decoders.len());
        for decoder in decoders {
            let prev = map.insert(decoder.class_id, *decoder);
            assert!(
                prev.is_none(),
                "duplicate class identifier {} ({})",
                decoder.class_id,
                decoder.class_name
            );
        }
        Self { map }
    }

    /// Build the registry holding every known decoder.
    pub fn with_known_types() -> Self {
        Self::new(crate::objects::ALL_DECODERS)
    }

    /// Resolve a class identifier to its decoder.
    pub fn lookup(&self, id: ClassId) -> Result<&'static Decoder> {
        self.map.get(&id).copied().ok_or(Error::UnknownClassId(id))
    }

    pub fn contains(&self, id: ClassId) -> bool {
        self.map.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_set() {
        let set = VersionSet::Of(&[1, 2, 3]);
        assert!(set.supports(2));
        assert!(!set.supports(4));
        assert!(VersionSet::Any.supports(999));
    }

    #[test]
    fn test_lookup_unknown() {
        let registry = ObjectRegistry::with_known_types();
        assert!(!registry.is_empty());
        let bogus = ClassId::from_fields(0xDEADBEEF, 0, 0, [0; 8]);
        assert!(matches!(registry.lookup(bogus), Err(Error::UnknownClassId(_))));
    }

    #[test]
    #[should_panic(expected = "duplicate class identifier")]
    fn test_duplicate_identifier_rejected() {
        let color = &crate::objects::color::RGB_COLOR;
        let _ = ObjectRegistry::new(&[color, color]);
    }

    #[test]
    fn test_known_types_registered() {
        let registry = ObjectRegistry::with_known_types();
        for decoder in crate::objects::ALL_DECODERS {
            let found = registry.lookup(decoder.class_id).unwrap();
            assert_eq!(found.class_name, decoder.class_name);
        }
    }
}
