//! The block table: an ordered array of file metadata records.

use bitflags::bitflags;
use bytes::Bytes;

use crate::crypto::{decrypt, hash_string, hash_type};
use crate::error::{Error, Result};

bitflags! {
    /// Per-file flags stored in a [`BlockEntry`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BlockFlags: u32 {
        /// PKWARE-imploded payload. Not supported; requesting such a file fails.
        const IMPLODE = 0x0000_0100;
        /// Payload is compressed with a per-sector codec byte.
        const COMPRESS = 0x0000_0200;
        /// Payload is stream-encrypted. Reading such a file fails.
        const ENCRYPTED = 0x0001_0000;
        /// Decryption key is adjusted by block position. Rejected alongside `ENCRYPTED`.
        const FIX_KEY = 0x0002_0000;
        /// Payload has no sector table; it is one contiguous unit.
        const SINGLE_UNIT = 0x0100_0000;
        /// Entry is a tombstone marking a deleted file.
        const DELETE_MARKER = 0x0200_0000;
        /// An extra trailing sector-offset entry is present for per-sector CRCs.
        const SECTOR_CRC = 0x0400_0000;
        /// Entry is live and may be read.
        const EXISTS = 0x8000_0000;
    }
}

/// A single 16-byte block table record.
#[derive(Debug, Clone, Copy)]
pub struct BlockEntry {
    /// Offset of the file's payload, relative to the MPQ header.
    pub offset: u32,
    /// Size of the payload as stored on disk.
    pub archived_size: u32,
    /// Logical (decompressed) size of the file.
    pub size: u32,
    /// Flags describing how the payload is stored.
    pub flags: BlockFlags,
}

impl BlockEntry {
    fn from_be_bytes(record: &[u8]) -> Self {
        debug_assert_eq!(record.len(), 16);
        BlockEntry {
            offset: u32::from_be_bytes([record[0], record[1], record[2], record[3]]),
            archived_size: u32::from_be_bytes([record[4], record[5], record[6], record[7]]),
            size: u32::from_be_bytes([record[8], record[9], record[10], record[11]]),
            flags: BlockFlags::from_bits_retain(u32::from_be_bytes([
                record[12], record[13], record[14], record[15],
            ])),
        }
    }

    /// Whether this entry is live and may be read.
    pub fn exists(&self) -> bool {
        self.flags.contains(BlockFlags::EXISTS)
    }
}

/// The archive's block table.
#[derive(Debug, Clone)]
pub struct BlockTable {
    entries: Vec<BlockEntry>,
}

impl BlockTable {
    /// Decrypt and parse the block table from `buf[base..base + entries * 16)`.
    pub fn read(buf: &Bytes, base: usize, entries: u32) -> Result<Self> {
        let len = entries as usize * 16;
        let end = base
            .checked_add(len)
            .ok_or_else(|| Error::InvalidFormat("block table offset overflow".into()))?;
        if end > buf.len() {
            return Err(Error::InvalidFormat(
                "block table extends past end of buffer".into(),
            ));
        }

        let key = hash_string("(block table)", hash_type::TABLE);
        let cleartext = decrypt(&buf[base..end], key);

        let parsed = cleartext
            .chunks_exact(16)
            .map(BlockEntry::from_be_bytes)
            .collect();

        Ok(BlockTable { entries: parsed })
    }

    /// Fetch the entry at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&BlockEntry> {
        self.entries.get(index)
    }

    /// All entries, in on-disk order.
    pub fn entries(&self) -> &[BlockEntry] {
        &self.entries
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
