//! The archive facade: composes header discovery, table reading, file
//! location, and file reading into a single read-only handle.

use std::fs;
use std::path::Path;

use bytes::Bytes;

use crate::error::{Error, Result};
use crate::file;
use crate::header::Header;
use crate::listfile;
use crate::tables::block_table::BlockTable;
use crate::tables::hash_table::HashTable;

/// A parsed, read-only handle onto an MPQ archive.
///
/// The backing buffer is held for the lifetime of the `Archive`; nothing is
/// mutated after construction, so a single `Archive` may be shared freely
/// across concurrent readers.
#[derive(Debug)]
pub struct Archive {
    buf: Bytes,
    header: Header,
    hash_table: HashTable,
    block_table: BlockTable,
    filenames: Option<Vec<String>>,
}

impl Archive {
    /// Open an archive from a file on disk, reading its `(listfile)` member
    /// if present.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_listfile(path, true)
    }

    /// Open an archive from a file on disk, with explicit control over
    /// whether the `(listfile)` member is read during construction.
    pub fn open_with_listfile<P: AsRef<Path>>(path: P, with_listfile: bool) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_bytes(Bytes::from(bytes), with_listfile)
    }

    /// Parse an archive already held in memory.
    ///
    /// `with_listfile` controls whether the `(listfile)` member is read and
    /// split during construction; callers that only need a handful of named
    /// files may skip it to avoid the extra read.
    pub fn from_bytes(buf: Bytes, with_listfile: bool) -> Result<Self> {
        let header = Header::read(&buf)?;

        let hash_table_base = header.offset as usize + header.hash_table_offset as usize;
        let hash_table = HashTable::read(&buf, hash_table_base, header.hash_table_entries)?;

        let block_table_base = header.offset as usize + header.block_table_offset as usize;
        let block_table = BlockTable::read(&buf, block_table_base, header.block_table_entries)?;

        let mut archive = Archive {
            buf,
            header,
            hash_table,
            block_table,
            filenames: None,
        };

        if with_listfile {
            match archive.read_file("(listfile)", false) {
                Ok(Some(contents)) => archive.filenames = Some(listfile::parse(&contents)),
                Ok(None) => {}
                Err(e) => return Err(e),
            }
        }

        Ok(archive)
    }

    /// The archive's parsed header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The archive's decrypted hash table entries, in on-disk order.
    pub fn hash_entries(&self) -> &[crate::tables::hash_table::HashEntry] {
        self.hash_table.entries()
    }

    /// The archive's decrypted block table entries, in on-disk order.
    pub fn block_entries(&self) -> &[crate::tables::block_table::BlockEntry] {
        self.block_table.entries()
    }

    /// Read and reconstruct a file's contents by name.
    ///
    /// Returns `Ok(None)` when the name is absent from the hash table, the
    /// resolved block entry is not live, or the entry has no archived bytes
    /// — all of which are treated as a successful "not found" rather than
    /// an error.
    pub fn read_file(&self, filename: &str, force_decompress: bool) -> Result<Option<Vec<u8>>> {
        let Some(hash_entry) = self.hash_table.find_file(filename) else {
            return Ok(None);
        };

        let block_entry = self
            .block_table
            .get(hash_entry.block_table_index as usize)
            .ok_or_else(|| {
                Error::InvalidFormat(format!(
                    "hash entry for {filename:?} references out-of-range block index {}",
                    hash_entry.block_table_index
                ))
            })?;

        file::read(&self.buf, &self.header, block_entry, force_decompress)
    }

    /// The archive's enumerated filenames, if a `(listfile)` member was
    /// present and successfully read during construction.
    pub fn files(&self) -> Option<&[String]> {
        self.filenames.as_deref()
    }

    /// Read every file named in [`Archive::files`], pairing each name with
    /// its decoded contents (or `None` if the file could not be read).
    ///
    /// Fails if no listfile was loaded.
    pub fn extract_all(&self) -> Result<Vec<(String, Option<Vec<u8>>)>> {
        let names = self
            .filenames
            .as_ref()
            .ok_or_else(|| Error::UnsupportedFeature("archive has no listfile".into()))?;

        names
            .iter()
            .map(|name| Ok((name.clone(), self.read_file(name, false)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_magic_fails_to_open() {
        let buf = Bytes::from_static(b"not an mpq archive at all, just junk bytes.....");
        assert!(matches!(
            Archive::from_bytes(buf, false),
            Err(Error::InvalidFormat(_))
        ));
    }
}
