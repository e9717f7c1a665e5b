//! Shared fixture builders for the integration tests: a minimal compound
//! container writer and the wire helpers for object slots.

#![allow(dead_code)]

use arcdoc::compound::format::{
    CONTAINER_SIGNATURE, DIR_ENTRY_SIZE, END_OF_CHAIN, ENTRY_ROOT, ENTRY_STREAM, FAT_SECTOR,
    FREE_SECTOR, HEADER_DIFAT_ENTRIES, HEADER_DIFAT_OFFSET,
};
use arcdoc::registry::Decoder;
use arcdoc::stream::{MARKER_INLINE, MARKER_NULL, MARKER_REF};

const SECTOR: usize = 512;
const MINI_SECTOR: usize = 64;
const MINI_CUTOFF: u32 = 4096;

/// Build a compound container holding the given named streams.
///
/// Uses 512-byte sectors, one allocation sector, and the standard 4096-byte
/// mini cutoff: streams below the cutoff land in the root's mini stream,
/// larger ones get regular sector chains.
pub fn build_container(streams: &[(&str, &[u8])]) -> Vec<u8> {
    // Mini stream: concatenated small payloads, each padded to a mini sector.
    let mut mini_data = Vec::new();
    let mut minifat: Vec<u32> = Vec::new();
    let mut mini_starts = Vec::new();
    for (_, data) in streams {
        if data.len() as u32 >= MINI_CUTOFF || data.is_empty() {
            mini_starts.push(END_OF_CHAIN);
            continue;
        }
        let n = data.len().div_ceil(MINI_SECTOR);
        mini_starts.push(minifat.len() as u32);
        for i in 0..n {
            let next = if i + 1 == n { END_OF_CHAIN } else { minifat.len() as u32 + 1 };
            minifat.push(next);
        }
        mini_data.extend_from_slice(data);
        mini_data.resize(minifat.len() * MINI_SECTOR, 0);
    }

    let mut minifat_bytes: Vec<u8> = minifat.iter().flat_map(|v| v.to_le_bytes()).collect();
    while minifat_bytes.len() % SECTOR != 0 {
        minifat_bytes.extend_from_slice(&FREE_SECTOR.to_le_bytes());
    }

    // Sector plan: 0 = FAT, then directory, mini table, mini stream data,
    // then regular chains for large streams.
    let dir_sectors = (1 + streams.len()).div_ceil(SECTOR / DIR_ENTRY_SIZE);
    let minifat_sectors = minifat_bytes.len() / SECTOR;
    let mini_sectors = mini_data.len().div_ceil(SECTOR);

    let mut fat: Vec<u32> = vec![FAT_SECTOR];
    let chain = |fat: &mut Vec<u32>, count: usize| -> u32 {
        let start = fat.len() as u32;
        for i in 0..count {
            let next = if i + 1 == count { END_OF_CHAIN } else { fat.len() as u32 + 1 };
            fat.push(next);
        }
        if count == 0 {
            END_OF_CHAIN
        } else {
            start
        }
    };

    let first_dir_sector = chain(&mut fat, dir_sectors);
    let first_minifat_sector = chain(&mut fat, minifat_sectors);
    let mini_start_sector = chain(&mut fat, mini_sectors);
    let mut large_starts = Vec::new();
    for (_, data) in streams {
        if (data.len() as u32) < MINI_CUTOFF {
            large_starts.push(END_OF_CHAIN);
        } else {
            large_starts.push(chain(&mut fat, data.len().div_ceil(SECTOR)));
        }
    }
    let total_sectors = fat.len();
    assert!(fat.len() <= SECTOR / 4, "fixture exceeds one allocation sector");

    // Header.
    let mut out = vec![0u8; SECTOR];
    out[..8].copy_from_slice(CONTAINER_SIGNATURE);
    out[26..28].copy_from_slice(&3u16.to_le_bytes()); // major version
    out[28..30].copy_from_slice(&0xFFFEu16.to_le_bytes()); // byte order
    out[30..32].copy_from_slice(&9u16.to_le_bytes()); // sector shift
    out[32..34].copy_from_slice(&6u16.to_le_bytes()); // mini sector shift
    out[44..48].copy_from_slice(&1u32.to_le_bytes()); // one FAT sector
    out[48..52].copy_from_slice(&first_dir_sector.to_le_bytes());
    out[56..60].copy_from_slice(&MINI_CUTOFF.to_le_bytes());
    out[60..64].copy_from_slice(&first_minifat_sector.to_le_bytes());
    out[64..68].copy_from_slice(&(minifat_sectors as u32).to_le_bytes());
    out[68..72].copy_from_slice(&END_OF_CHAIN.to_le_bytes());
    for i in 0..HEADER_DIFAT_ENTRIES {
        let off = HEADER_DIFAT_OFFSET + i * 4;
        let v = if i == 0 { 0u32 } else { FREE_SECTOR };
        out[off..off + 4].copy_from_slice(&v.to_le_bytes());
    }

    // FAT sector.
    let mut fat_sector = vec![0u8; SECTOR];
    for (i, v) in fat.iter().enumerate() {
        fat_sector[i * 4..i * 4 + 4].copy_from_slice(&v.to_le_bytes());
    }
    for i in fat.len()..SECTOR / 4 {
        fat_sector[i * 4..i * 4 + 4].copy_from_slice(&FREE_SECTOR.to_le_bytes());
    }
    out.extend_from_slice(&fat_sector);

    // Directory sectors.
    let mut dir = Vec::new();
    dir.extend_from_slice(&dir_entry(
        "Root Entry",
        ENTRY_ROOT,
        if mini_sectors == 0 { END_OF_CHAIN } else { mini_start_sector },
        mini_data.len() as u64,
    ));
    for (i, (name, data)) in streams.iter().enumerate() {
        let start = if (data.len() as u32) < MINI_CUTOFF {
            mini_starts[i]
        } else {
            large_starts[i]
        };
        dir.extend_from_slice(&dir_entry(name, ENTRY_STREAM, start, data.len() as u64));
    }
    dir.resize(dir_sectors * SECTOR, 0);
    out.extend_from_slice(&dir);

    out.extend_from_slice(&minifat_bytes);

    let mut mini_padded = mini_data;
    mini_padded.resize(mini_sectors * SECTOR, 0);
    out.extend_from_slice(&mini_padded);

    for (_, data) in streams {
        if data.len() as u32 >= MINI_CUTOFF {
            let mut padded = data.to_vec();
            padded.resize(data.len().div_ceil(SECTOR) * SECTOR, 0);
            out.extend_from_slice(&padded);
        }
    }

    debug_assert_eq!(out.len(), SECTOR + total_sectors * SECTOR);
    out
}

fn dir_entry(name: &str, kind: u8, start_sector: u32, size: u64) -> [u8; DIR_ENTRY_SIZE] {
    let mut entry = [0u8; DIR_ENTRY_SIZE];
    let units: Vec<u16> = name.encode_utf16().collect();
    assert!(units.len() <= 31, "directory entry name too long");
    for (i, ch) in units.iter().enumerate() {
        entry[i * 2..i * 2 + 2].copy_from_slice(&ch.to_le_bytes());
    }
    entry[64..66].copy_from_slice(&(2 * (units.len() as u16 + 1)).to_le_bytes());
    entry[66] = kind;
    entry[116..120].copy_from_slice(&start_sector.to_le_bytes());
    entry[120..128].copy_from_slice(&size.to_le_bytes());
    entry
}

/// Append a length-prefixed string.
pub fn push_string(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u32).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

/// Append a null object slot.
pub fn null_slot(buf: &mut Vec<u8>) {
    buf.push(MARKER_NULL);
}

/// Append an inline object slot: marker, class identifier, version, payload.
pub fn inline_slot(buf: &mut Vec<u8>, decoder: &Decoder, version: u16, payload: &[u8]) {
    buf.push(MARKER_INLINE);
    buf.extend_from_slice(decoder.class_id.as_bytes());
    buf.extend_from_slice(&version.to_le_bytes());
    buf.extend_from_slice(payload);
}

/// Append an inline slot whose version is supplied out of band.
pub fn inline_slot_unversioned(buf: &mut Vec<u8>, decoder: &Decoder, payload: &[u8]) {
    buf.push(MARKER_INLINE);
    buf.extend_from_slice(decoder.class_id.as_bytes());
    buf.extend_from_slice(payload);
}

/// Append a backreference slot to an earlier occurrence.
pub fn ref_slot(buf: &mut Vec<u8>, index: u32) {
    buf.push(MARKER_REF);
    buf.extend_from_slice(&index.to_le_bytes());
}

/// Feature layer payload at version 3: name, flags, scale range, no
/// renderer, no extensions.
pub fn feature_layer_payload(name: &str) -> Vec<u8> {
    let mut p = Vec::new();
    push_string(&mut p, name);
    p.extend_from_slice(&[1, 0, 0]); // visible, show tips, cached
    p.extend_from_slice(&0.0f64.to_le_bytes());
    p.extend_from_slice(&0.0f64.to_le_bytes());
    null_slot(&mut p);
    p.extend_from_slice(&0u32.to_le_bytes());
    p
}
