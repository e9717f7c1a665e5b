//! Compound-container reader.
//!
//! Parses the outer container into named byte sub-streams: signature check,
//! header, sector allocation chains, directory table, mini-stream handling
//! for payloads below the cutoff. The reader is pure: it is built once from
//! a byte buffer and discarded after the streams of interest are extracted.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use tracing::debug;

use super::format::*;
use crate::util::{Error, Result};

/// One named sub-stream extracted from the container.
#[derive(Debug)]
struct StreamEntry {
    name: String,
    data: Vec<u8>,
}

/// A read-only compound document: a set of uniquely-named byte sub-streams.
#[derive(Debug)]
pub struct CompoundFile {
    streams: Vec<StreamEntry>,
    by_name: HashMap<String, usize>,
}

/// Parsed header fields needed to walk the container.
struct Header {
    sector_size: usize,
    mini_sector_size: usize,
    fat_sector_count: u32,
    first_dir_sector: u32,
    mini_cutoff: u64,
    first_minifat_sector: u32,
    first_difat_sector: u32,
}

impl CompoundFile {
    /// Open a compound document from disk via memory mapping.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;
        // Safety: file is opened read-only.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| Error::MmapFailed(e.to_string()))?;
        Self::parse(&mmap)
    }

    /// Parse a compound document from a byte buffer.
    pub fn parse(data: &[u8]) -> Result<Self> {
        // Document-type gate comes before any structural parsing.
        if data.len() < 4 || &data[..4] != CONTAINER_MAGIC {
            return Err(Error::DocumentType);
        }
        if data.len() < HEADER_SIZE {
            return Err(Error::UnexpectedEof(data.len() as u64));
        }

        let header = Self::parse_header(data)?;
        let fat = Self::load_fat(data, &header)?;
        let dir = Self::load_chain(data, &fat, header.first_dir_sector, header.sector_size)?;

        let mut raw_entries = Vec::new();
        for chunk in dir.chunks_exact(DIR_ENTRY_SIZE) {
            raw_entries.push(RawDirEntry::parse(chunk)?);
        }

        // The root entry owns the mini stream that backs short payloads.
        let root = raw_entries
            .iter()
            .find(|e| e.kind == ENTRY_ROOT)
            .ok_or_else(|| Error::invalid("Directory has no root entry"))?;
        let mini_stream =
            Self::read_chain_bytes(data, &fat, root.start_sector, header.sector_size, root.size)?;
        let minifat =
            Self::load_sector_numbers(data, &fat, header.first_minifat_sector, header.sector_size)?;

        let mut streams = Vec::new();
        let mut by_name = HashMap::new();
        for entry in &raw_entries {
            if entry.kind != ENTRY_STREAM || entry.name.is_empty() {
                continue;
            }
            let payload = if entry.size < header.mini_cutoff {
                Self::read_mini_chain(
                    &mini_stream,
                    &minifat,
                    entry.start_sector,
                    header.mini_sector_size,
                    entry.size,
                )?
            } else {
                Self::read_chain_bytes(data, &fat, entry.start_sector, header.sector_size, entry.size)?
            };
            debug!(name = %entry.name, size = payload.len(), "extracted stream");
            by_name.insert(entry.name.clone(), streams.len());
            streams.push(StreamEntry { name: entry.name.clone(), data: payload });
        }

        if streams.is_empty() {
            return Err(Error::EmptyDocument);
        }

        Ok(Self { streams, by_name })
    }

    /// Look up a sub-stream by name.
    pub fn stream(&self, name: &str) -> Option<&[u8]> {
        self.by_name.get(name).map(|&i| self.streams[i].data.as_slice())
    }

    /// Names of all sub-streams, in directory order.
    pub fn stream_names(&self) -> impl Iterator<Item = &str> {
        self.streams.iter().map(|s| s.name.as_str())
    }

    /// Number of sub-streams.
    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    fn parse_header(data: &[u8]) -> Result<Header> {
        let u16_at = |off: usize| u16::from_le_bytes([data[off], data[off + 1]]);
        let u32_at =
            |off: usize| u32::from_le_bytes([data[off], data[off + 1], data[off + 2], data[off + 3]]);

        let major = u16_at(MAJOR_VERSION_OFFSET);
        if major != 3 && major != 4 {
            return Err(Error::invalid(format!("Unsupported container version: {major}")));
        }

        let sector_shift = u16_at(SECTOR_SHIFT_OFFSET);
        if !(9..=12).contains(&sector_shift) {
            return Err(Error::invalid(format!("Invalid sector shift: {sector_shift}")));
        }
        let mini_shift = u16_at(MINI_SECTOR_SHIFT_OFFSET);
        if mini_shift as u32 >= sector_shift as u32 {
            return Err(Error::invalid(format!("Invalid mini sector shift: {mini_shift}")));
        }

        Ok(Header {
            sector_size: 1usize << sector_shift,
            mini_sector_size: 1usize << mini_shift,
            fat_sector_count: u32_at(FAT_COUNT_OFFSET),
            first_dir_sector: u32_at(FIRST_DIR_SECTOR_OFFSET),
            mini_cutoff: u32_at(MINI_CUTOFF_OFFSET) as u64,
            first_minifat_sector: u32_at(FIRST_MINIFAT_SECTOR_OFFSET),
            first_difat_sector: u32_at(FIRST_DIFAT_SECTOR_OFFSET),
        })
    }

    /// Read one full regular sector.
    fn sector(data: &[u8], sector: u32, sector_size: usize) -> Result<&[u8]> {
        let start = sector_offset(sector, sector_size);
        let end = start + sector_size;
        if end > data.len() {
            return Err(Error::UnexpectedEof(end as u64));
        }
        Ok(&data[start..end])
    }

    /// Build the sector allocation table from the in-header locators plus
    /// any chained locator sectors.
    fn load_fat(data: &[u8], header: &Header) -> Result<Vec<u32>> {
        let mut fat_sectors = Vec::new();
        for i in 0..HEADER_DIFAT_ENTRIES {
            let off = HEADER_DIFAT_OFFSET + i * 4;
            let sector = u32::from_le_bytes([data[off], data[off + 1], data[off + 2], data[off + 3]]);
            if is_regular_sector(sector) {
                fat_sectors.push(sector);
            }
        }

        // Chained locator sectors; the last u32 of each links to the next.
        let entries_per_sector = header.sector_size / 4;
        let mut difat_sector = header.first_difat_sector;
        let mut difat_hops = 0usize;
        while is_regular_sector(difat_sector) {
            difat_hops += 1;
            if difat_hops > data.len() / header.sector_size + 1 {
                return Err(Error::invalid("Locator sector chain cycle"));
            }
            let sec = Self::sector(data, difat_sector, header.sector_size)?;
            for i in 0..entries_per_sector - 1 {
                let v = u32::from_le_bytes([sec[i * 4], sec[i * 4 + 1], sec[i * 4 + 2], sec[i * 4 + 3]]);
                if is_regular_sector(v) {
                    fat_sectors.push(v);
                }
            }
            let link = entries_per_sector - 1;
            difat_sector = u32::from_le_bytes([
                sec[link * 4],
                sec[link * 4 + 1],
                sec[link * 4 + 2],
                sec[link * 4 + 3],
            ]);
        }

        if (fat_sectors.len() as u32) < header.fat_sector_count {
            return Err(Error::invalid(format!(
                "Header declares {} allocation sectors, locators supply {}",
                header.fat_sector_count,
                fat_sectors.len()
            )));
        }

        let mut fat = Vec::with_capacity(fat_sectors.len() * entries_per_sector);
        for &fs in &fat_sectors {
            let sec = Self::sector(data, fs, header.sector_size)?;
            for chunk in sec.chunks_exact(4) {
                fat.push(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
            }
        }
        Ok(fat)
    }

    /// Follow a sector chain, concatenating whole sectors.
    fn load_chain(data: &[u8], fat: &[u32], start: u32, sector_size: usize) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut sector = start;
        let mut hops = 0usize;
        while is_regular_sector(sector) {
            hops += 1;
            if hops > fat.len() + 1 {
                return Err(Error::invalid("Sector chain cycle"));
            }
            out.extend_from_slice(Self::sector(data, sector, sector_size)?);
            sector = *fat
                .get(sector as usize)
                .ok_or_else(|| Error::invalid(format!("Sector {sector} outside allocation table")))?;
        }
        Ok(out)
    }

    /// Follow a sector chain and truncate to a declared byte size.
    fn read_chain_bytes(
        data: &[u8],
        fat: &[u32],
        start: u32,
        sector_size: usize,
        size: u64,
    ) -> Result<Vec<u8>> {
        if size == 0 {
            return Ok(Vec::new());
        }
        let mut bytes = Self::load_chain(data, fat, start, sector_size)?;
        if (bytes.len() as u64) < size {
            return Err(Error::UnexpectedEof(size));
        }
        bytes.truncate(size as usize);
        Ok(bytes)
    }

    /// Load a chain of sectors holding u32 sector numbers (the mini table).
    fn load_sector_numbers(
        data: &[u8],
        fat: &[u32],
        start: u32,
        sector_size: usize,
    ) -> Result<Vec<u32>> {
        let bytes = Self::load_chain(data, fat, start, sector_size)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    /// Follow a mini-sector chain within the root entry's mini stream.
    fn read_mini_chain(
        mini_stream: &[u8],
        minifat: &[u32],
        start: u32,
        mini_sector_size: usize,
        size: u64,
    ) -> Result<Vec<u8>> {
        if size == 0 {
            return Ok(Vec::new());
        }
        let mut out = Vec::with_capacity(size as usize);
        let mut sector = start;
        let mut hops = 0usize;
        while is_regular_sector(sector) {
            hops += 1;
            if hops > minifat.len() + 1 {
                return Err(Error::invalid("Mini sector chain cycle"));
            }
            let off = sector as usize * mini_sector_size;
            let end = off + mini_sector_size;
            if end > mini_stream.len() {
                return Err(Error::UnexpectedEof(end as u64));
            }
            out.extend_from_slice(&mini_stream[off..end]);
            sector = *minifat
                .get(sector as usize)
                .ok_or_else(|| Error::invalid(format!("Mini sector {sector} outside table")))?;
        }
        if (out.len() as u64) < size {
            return Err(Error::UnexpectedEof(size));
        }
        out.truncate(size as usize);
        Ok(out)
    }
}

/// Raw directory entry before stream extraction.
struct RawDirEntry {
    name: String,
    kind: u8,
    start_sector: u32,
    size: u64,
}

impl RawDirEntry {
    fn parse(entry: &[u8]) -> Result<Self> {
        debug_assert_eq!(entry.len(), DIR_ENTRY_SIZE);

        let name_len = u16::from_le_bytes([entry[64], entry[65]]) as usize;
        let kind = entry[66];

        let name = if kind == ENTRY_EMPTY || name_len < 2 || name_len > 64 {
            String::new()
        } else {
            // Name is UTF-16LE, length includes the trailing null.
            let units: Vec<u16> = entry[..name_len - 2]
                .chunks_exact(2)
                .map(|c| u16::from_le_bytes([c[0], c[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        };

        let start_sector = u32::from_le_bytes([entry[116], entry[117], entry[118], entry[119]]);
        let size = u64::from_le_bytes([
            entry[120], entry[121], entry[122], entry[123],
            entry[124], entry[125], entry[126], entry[127],
        ]);

        Ok(Self { name, kind, start_sector, size })
    }
}
