//! Compound-container format constants and structures.

/// Magic bytes at the start of a compound document.
///
/// Only the first four bytes gate document-type detection; the trailing
/// four are validated as part of the header.
pub const CONTAINER_MAGIC: &[u8; 4] = &[0xD0, 0xCF, 0x11, 0xE0];

/// Full 8-byte header signature.
pub const CONTAINER_SIGNATURE: &[u8; 8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Size of the container header in bytes.
pub const HEADER_SIZE: usize = 512;

/// Size of one directory entry in bytes.
pub const DIR_ENTRY_SIZE: usize = 128;

/// Number of allocation-table locators held directly in the header.
pub const HEADER_DIFAT_ENTRIES: usize = 109;

/// Offset of the major format version in the header.
pub const MAJOR_VERSION_OFFSET: usize = 26;

/// Offset of the sector shift in the header.
pub const SECTOR_SHIFT_OFFSET: usize = 30;

/// Offset of the mini sector shift in the header.
pub const MINI_SECTOR_SHIFT_OFFSET: usize = 32;

/// Offset of the allocation-table sector count.
pub const FAT_COUNT_OFFSET: usize = 44;

/// Offset of the first directory sector number.
pub const FIRST_DIR_SECTOR_OFFSET: usize = 48;

/// Offset of the mini-stream size cutoff.
pub const MINI_CUTOFF_OFFSET: usize = 56;

/// Offset of the first mini allocation-table sector number.
pub const FIRST_MINIFAT_SECTOR_OFFSET: usize = 60;

/// Offset of the first chained locator sector number.
pub const FIRST_DIFAT_SECTOR_OFFSET: usize = 68;

/// Offset of the in-header locator array.
pub const HEADER_DIFAT_OFFSET: usize = 76;

/// Sector-number sentinel: free sector.
pub const FREE_SECTOR: u32 = 0xFFFF_FFFF;

/// Sector-number sentinel: end of a sector chain.
pub const END_OF_CHAIN: u32 = 0xFFFF_FFFE;

/// Sector-number sentinel: sector holds allocation-table data.
pub const FAT_SECTOR: u32 = 0xFFFF_FFFD;

/// Sector-number sentinel: sector holds chained locator data.
pub const DIFAT_SECTOR: u32 = 0xFFFF_FFFC;

/// Directory entry kind: unused slot.
pub const ENTRY_EMPTY: u8 = 0;

/// Directory entry kind: storage (folder-like, no payload).
pub const ENTRY_STORAGE: u8 = 1;

/// Directory entry kind: stream (named byte payload).
pub const ENTRY_STREAM: u8 = 2;

/// Directory entry kind: root storage (owns the mini stream).
pub const ENTRY_ROOT: u8 = 5;

/// Check if a sector number addresses a real sector.
#[inline]
pub const fn is_regular_sector(sector: u32) -> bool {
    sector < DIFAT_SECTOR
}

/// Byte offset of a regular sector within the file.
#[inline]
pub const fn sector_offset(sector: u32, sector_size: usize) -> usize {
    HEADER_SIZE + sector as usize * sector_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic() {
        assert_eq!(&CONTAINER_SIGNATURE[..4], CONTAINER_MAGIC);
    }

    #[test]
    fn test_sector_math() {
        assert_eq!(sector_offset(0, 512), 512);
        assert_eq!(sector_offset(3, 512), 512 + 3 * 512);
        assert!(is_regular_sector(0));
        assert!(!is_regular_sector(END_OF_CHAIN));
        assert!(!is_regular_sector(FREE_SECTOR));
    }
}
