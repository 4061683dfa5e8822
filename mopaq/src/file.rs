//! Reconstruction of a file's logical byte stream from its block table entry:
//! validates flags, loads the raw payload, splits multi-sector files, and
//! decompresses per-sector.

use bytes::Bytes;

use crate::compression::decompress_sector;
use crate::error::{Error, Result};
use crate::header::Header;
use crate::tables::block_table::{BlockEntry, BlockFlags};

/// Reconstruct the logical contents of `block`, or `None` if the entry is
/// not live or has no archived payload.
///
/// `force_decompress` mirrors the reference implementation's escape hatch
/// for payloads whose "compressed" flag lies about whether decompression is
/// actually needed.
pub fn read(
    buf: &Bytes,
    header: &Header,
    block: &BlockEntry,
    force_decompress: bool,
) -> Result<Option<Vec<u8>>> {
    if !block.exists() {
        return Ok(None);
    }
    if block.archived_size == 0 {
        return Ok(None);
    }
    if block.flags.intersects(BlockFlags::ENCRYPTED | BlockFlags::FIX_KEY) {
        return Err(Error::UnsupportedFeature("encrypted file".into()));
    }
    if block.flags.contains(BlockFlags::IMPLODE) {
        return Err(Error::UnsupportedFeature("imploded file".into()));
    }

    let payload_start = block.offset as usize + header.offset as usize;
    let payload_end = payload_start
        .checked_add(block.archived_size as usize)
        .ok_or_else(|| Error::CorruptPayload("file payload offset overflow".into()))?;
    if payload_end > buf.len() {
        return Err(Error::CorruptPayload(
            "file payload extends past end of archive".into(),
        ));
    }
    let payload = &buf[payload_start..payload_end];

    if block.flags.contains(BlockFlags::SINGLE_UNIT) {
        return read_single_unit(payload, block, force_decompress).map(Some);
    }

    read_sectors(payload, header, block, force_decompress).map(Some)
}

fn read_single_unit(
    payload: &[u8],
    block: &BlockEntry,
    force_decompress: bool,
) -> Result<Vec<u8>> {
    let should_decompress = block.flags.contains(BlockFlags::COMPRESS)
        && (force_decompress || block.size > block.archived_size);

    if should_decompress {
        decompress_sector(payload)
    } else {
        Ok(payload.to_vec())
    }
}

fn read_sectors(
    payload: &[u8],
    header: &Header,
    block: &BlockEntry,
    force_decompress: bool,
) -> Result<Vec<u8>> {
    let sector_size = header.sector_size();
    let mut num_sectors = block.size as usize / sector_size + 1;
    if block.flags.contains(BlockFlags::SECTOR_CRC) {
        num_sectors += 1;
    }

    let offsets_len = num_sectors + 1;
    let table_bytes = offsets_len
        .checked_mul(4)
        .ok_or_else(|| Error::CorruptPayload("sector offset table size overflow".into()))?;
    if table_bytes > payload.len() {
        return Err(Error::CorruptPayload(
            "sector offset table extends past payload".into(),
        ));
    }

    let positions: Vec<u32> = payload[..table_bytes]
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    let effective_sectors = positions.len()
        - if block.flags.contains(BlockFlags::SECTOR_CRC) {
            2
        } else {
            1
        };

    let mut result = Vec::with_capacity(block.size as usize);
    let mut remaining = block.size as usize;

    for i in 0..effective_sectors {
        let start = positions[i] as usize;
        let end = positions[i + 1] as usize;
        if start > end || end > payload.len() {
            return Err(Error::CorruptPayload(format!(
                "sector {i} offsets out of range: [{start}, {end}) in payload of {} bytes",
                payload.len()
            )));
        }
        let raw = &payload[start..end];

        let should_decompress = block.flags.contains(BlockFlags::COMPRESS)
            && (force_decompress || remaining > raw.len());

        let decoded = if should_decompress {
            decompress_sector(raw)?
        } else {
            raw.to_vec()
        };

        remaining = remaining
            .checked_sub(decoded.len())
            .ok_or_else(|| Error::CorruptPayload("sector overran remaining file size".into()))?;
        result.extend(decoded);
    }

    Ok(result)
}
