//! Forward-only primitive codec over one byte buffer.
//!
//! Every read takes a diagnostic label naming the field being read; the
//! label surfaces in truncation and assertion errors so a failed decode
//! points at the exact field. The `expect_*` variants additionally check
//! the value against an allowed set — a mismatch there is a format
//! assertion and is never suppressed by tolerant mode, which only governs
//! unknown-type recovery in the session layer.

use byteorder::{LittleEndian, ReadBytesExt};

use crate::util::{ClassId, Error, Result};

/// Days between the variant-date epoch (1899-12-30) and 1970-01-01.
const VARIANT_EPOCH_TO_UNIX_DAYS: f64 = 25569.0;

/// Forward-only position over one byte buffer.
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current byte position.
    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos as u64
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> u64 {
        (self.data.len() - self.pos) as u64
    }

    /// True when every byte has been consumed.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos == self.data.len()
    }

    fn take(&mut self, n: usize, label: &'static str) -> Result<&'a [u8]> {
        if self.pos + n > self.data.len() {
            tracing::trace!(label, pos = self.pos, need = n, "truncated read");
            return Err(Error::UnexpectedEof(self.pos as u64));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Skip exactly `n` bytes (length-declared recovery or padding).
    pub fn skip(&mut self, n: u64, label: &'static str) -> Result<()> {
        self.take(n as usize, label)?;
        Ok(())
    }

    /// Move forward to an absolute position. Moving backwards would break
    /// the monotonic-position invariant and is an error.
    pub fn seek_to(&mut self, pos: u64) -> Result<()> {
        if pos < self.pos as u64 {
            return Err(Error::invalid(format!(
                "Cursor cannot move backwards: at {}, target {}",
                self.pos, pos
            )));
        }
        if pos > self.data.len() as u64 {
            return Err(Error::UnexpectedEof(pos));
        }
        self.pos = pos as usize;
        Ok(())
    }

    pub fn read_u8(&mut self, label: &'static str) -> Result<u8> {
        Ok(self.take(1, label)?[0])
    }

    pub fn read_u16(&mut self, label: &'static str) -> Result<u16> {
        let mut slice = self.take(2, label)?;
        Ok(slice.read_u16::<LittleEndian>()?)
    }

    pub fn read_i32(&mut self, label: &'static str) -> Result<i32> {
        let mut slice = self.take(4, label)?;
        Ok(slice.read_i32::<LittleEndian>()?)
    }

    pub fn read_u32(&mut self, label: &'static str) -> Result<u32> {
        let mut slice = self.take(4, label)?;
        Ok(slice.read_u32::<LittleEndian>()?)
    }

    pub fn read_f64(&mut self, label: &'static str) -> Result<f64> {
        let mut slice = self.take(8, label)?;
        Ok(slice.read_f64::<LittleEndian>()?)
    }

    /// Read a byte-valued flag; only 0 and 1 are accepted.
    pub fn read_bool(&mut self, label: &'static str) -> Result<bool> {
        let v = self.expect_u8(label, &[0, 1])?;
        Ok(v == 1)
    }

    /// Read a u8 that must be one of `allowed`.
    pub fn expect_u8(&mut self, label: &'static str, allowed: &[u8]) -> Result<u8> {
        let v = self.read_u8(label)?;
        if !allowed.contains(&v) {
            return Err(Error::FormatAssertion {
                label,
                found: v as u64,
                expected: format!("{allowed:?}"),
            });
        }
        Ok(v)
    }

    /// Read a u16 that must be one of `allowed`.
    pub fn expect_u16(&mut self, label: &'static str, allowed: &[u16]) -> Result<u16> {
        let v = self.read_u16(label)?;
        if !allowed.contains(&v) {
            return Err(Error::FormatAssertion {
                label,
                found: v as u64,
                expected: format!("{allowed:?}"),
            });
        }
        Ok(v)
    }

    /// Read an i32 that must equal `expected`.
    pub fn expect_i32(&mut self, label: &'static str, expected: i32) -> Result<i32> {
        let v = self.read_i32(label)?;
        if v != expected {
            return Err(Error::FormatAssertion {
                label,
                found: v as u64,
                expected: expected.to_string(),
            });
        }
        Ok(v)
    }

    /// Read a length-prefixed string: u32 byte length, then UTF-8 bytes.
    /// Invalid UTF-8 falls back to a single-byte Latin decode, which can
    /// represent any byte sequence.
    pub fn read_string(&mut self, label: &'static str) -> Result<String> {
        let len = self.read_u32(label)? as usize;
        let bytes = self.take(len, label)?;
        match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s.to_string()),
            Err(_) => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }

    /// Read a 16-byte class identifier in wire order.
    pub fn read_clsid(&mut self, label: &'static str) -> Result<ClassId> {
        let bytes = self.take(16, label)?;
        let mut id = [0u8; 16];
        id.copy_from_slice(bytes);
        Ok(ClassId(id))
    }

    /// Read a variant-encoded date: an f64 counting days since the
    /// automation epoch (1899-12-30), fractional part is time of day.
    /// Returned as `(unix_days, seconds_into_day)`.
    pub fn read_date(&mut self, label: &'static str) -> Result<(i64, u32)> {
        let raw = self.read_f64(label)?;
        if !raw.is_finite() {
            return Err(Error::FormatAssertion {
                label,
                found: 0,
                expected: "finite variant date".to_string(),
            });
        }
        let days = raw.trunc() - VARIANT_EPOCH_TO_UNIX_DAYS;
        // Time of day is stored as an absolute fraction, even for dates
        // before the epoch.
        let seconds = (raw.fract().abs() * 86400.0).round() as u32;
        Ok((days as i64, seconds.min(86399)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_reads() {
        let data = [0x01, 0x02, 0x00, 0xFE, 0xFF, 0xFF, 0xFF];
        let mut cur = Cursor::new(&data);
        assert_eq!(cur.read_u8("a").unwrap(), 1);
        assert_eq!(cur.read_u16("b").unwrap(), 2);
        assert_eq!(cur.read_i32("c").unwrap(), -2);
        assert!(cur.at_end());
    }

    #[test]
    fn test_truncation() {
        let mut cur = Cursor::new(&[0x01]);
        assert!(matches!(cur.read_u32("x"), Err(Error::UnexpectedEof(_))));
    }

    #[test]
    fn test_expect_mismatch() {
        let mut cur = Cursor::new(&[0x05]);
        let err = cur.expect_u8("flag", &[0, 1]).unwrap_err();
        match err {
            Error::FormatAssertion { label, found, .. } => {
                assert_eq!(label, "flag");
                assert_eq!(found, 5);
            }
            other => panic!("expected FormatAssertion, got {other:?}"),
        }
    }

    #[test]
    fn test_string_utf8_and_fallback() {
        let mut data = vec![5, 0, 0, 0];
        data.extend_from_slice(b"hello");
        let mut cur = Cursor::new(&data);
        assert_eq!(cur.read_string("s").unwrap(), "hello");

        // 0xE9 alone is invalid UTF-8; Latin fallback maps it to é.
        let data = [1, 0, 0, 0, 0xE9];
        let mut cur = Cursor::new(&data);
        assert_eq!(cur.read_string("s").unwrap(), "é");
    }

    #[test]
    fn test_seek_forward_only() {
        let data = [0u8; 16];
        let mut cur = Cursor::new(&data);
        cur.seek_to(8).unwrap();
        assert_eq!(cur.pos(), 8);
        assert!(cur.seek_to(4).is_err());
        assert!(cur.seek_to(32).is_err());
    }

    #[test]
    fn test_variant_date() {
        // 25569.5 = 1970-01-01 12:00:00.
        let data = 25569.5f64.to_le_bytes();
        let mut cur = Cursor::new(&data);
        let (days, secs) = cur.read_date("d").unwrap();
        assert_eq!(days, 0);
        assert_eq!(secs, 43200);
    }
}
