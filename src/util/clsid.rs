//! 16-byte class identifiers.
//!
//! Every serialized object in the format begins with (or is preceded by) a
//! GUID-shaped class identifier selecting its decoder. Identifiers are
//! stored on the wire in the container's mixed-endian field order:
//! u32 + u16 + u16 little-endian, followed by 8 raw bytes.

use std::fmt;
use std::str::FromStr;

use crate::util::Error;

/// A 16-byte class identifier, stored in wire (mixed-endian) byte order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(pub [u8; 16]);

impl ClassId {
    /// The all-zero identifier. Marks unoccupied directory entries; never
    /// registered as a decoder.
    pub const NIL: ClassId = ClassId([0u8; 16]);

    /// Build an identifier from its canonical textual fields.
    ///
    /// `from_fields(0x7EE9C496, 0xD123, 0x11D0, [0x83, 0x83, ...])` matches
    /// the braces form `{7EE9C496-D123-11D0-8383-...}`.
    pub const fn from_fields(a: u32, b: u16, c: u16, d: [u8; 8]) -> Self {
        let ab = a.to_le_bytes();
        let bb = b.to_le_bytes();
        let cb = c.to_le_bytes();
        ClassId([
            ab[0], ab[1], ab[2], ab[3],
            bb[0], bb[1],
            cb[0], cb[1],
            d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7],
        ])
    }

    /// Wire bytes of this identifier.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        self.0 == [0u8; 16]
    }

    fn fields(&self) -> (u32, u16, u16, &[u8]) {
        let a = u32::from_le_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]);
        let b = u16::from_le_bytes([self.0[4], self.0[5]]);
        let c = u16::from_le_bytes([self.0[6], self.0[7]]);
        (a, b, c, &self.0[8..16])
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b, c, d) = self.fields();
        write!(
            f,
            "{{{:08X}-{:04X}-{:04X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}}}",
            a, b, c, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
        )
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self)
    }
}

impl FromStr for ClassId {
    type Err = Error;

    /// Parse `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}` (braces optional).
    fn from_str(s: &str) -> Result<Self, Error> {
        let s = s.trim().trim_start_matches('{').trim_end_matches('}');
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 5
            || parts[0].len() != 8
            || parts[1].len() != 4
            || parts[2].len() != 4
            || parts[3].len() != 4
            || parts[4].len() != 12
        {
            return Err(Error::invalid(format!("Malformed class identifier: {s}")));
        }
        let bad = |_| Error::invalid(format!("Malformed class identifier: {s}"));
        let a = u32::from_str_radix(parts[0], 16).map_err(bad)?;
        let b = u16::from_str_radix(parts[1], 16).map_err(bad)?;
        let c = u16::from_str_radix(parts[2], 16).map_err(bad)?;
        let mut d = [0u8; 8];
        let tail = format!("{}{}", parts[3], parts[4]);
        for (i, chunk) in d.iter_mut().enumerate() {
            *chunk = u8::from_str_radix(&tail[i * 2..i * 2 + 2], 16).map_err(bad)?;
        }
        Ok(ClassId::from_fields(a, b, c, d))
    }
}
