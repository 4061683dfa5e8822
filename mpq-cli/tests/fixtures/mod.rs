//! Builds a tiny, hand-assembled MPQ archive for the CLI integration tests.
//!
//! The crate ships no binary fixture, so tests construct one byte-for-byte:
//! a plain (non-user-data) v0 header, a two-entry hash table with no empty
//! slots (so the probe always finds its targets regardless of start index),
//! a matching two-entry block table, and two single-unit stored payloads:
//! `hello.txt` and the `(listfile)` that names it.

use std::path::Path;

use mopaq::crypto::{encrypt, hash_string, hash_type};

const HEADER_SIZE: u32 = 32;

fn hash_entry_bytes(name: &str, block_index: u32) -> [u8; 16] {
    let hash_a = hash_string(name, hash_type::HASH_A);
    let hash_b = hash_string(name, hash_type::HASH_B);
    let mut record = [0u8; 16];
    record[0..4].copy_from_slice(&hash_a.to_be_bytes());
    record[4..8].copy_from_slice(&hash_b.to_be_bytes());
    record[8..10].copy_from_slice(&0u16.to_be_bytes());
    record[10..12].copy_from_slice(&0u16.to_be_bytes());
    record[12..16].copy_from_slice(&block_index.to_be_bytes());
    record
}

fn block_entry_bytes(offset: u32, size: u32) -> [u8; 16] {
    const EXISTS: u32 = 0x8000_0000;
    const SINGLE_UNIT: u32 = 0x0100_0000;
    let mut record = [0u8; 16];
    record[0..4].copy_from_slice(&offset.to_be_bytes());
    record[4..8].copy_from_slice(&size.to_be_bytes());
    record[8..12].copy_from_slice(&size.to_be_bytes());
    record[12..16].copy_from_slice(&(EXISTS | SINGLE_UNIT).to_be_bytes());
    record
}

/// Write a minimal valid MPQ archive to `path` containing a single file,
/// `hello.txt` (contents `b"hello world"`), enumerated by a `(listfile)`.
pub fn write_minimal_archive(path: &Path) {
    let listfile_contents = b"hello.txt\r\n";

    let hash_table_offset = HEADER_SIZE;
    let hash_table_entries = 2u32;
    let block_table_offset = hash_table_offset + hash_table_entries * 16;
    let block_table_entries = 2u32;
    let payload_start = block_table_offset + block_table_entries * 16;

    let hello_offset = payload_start;
    let hello_size = 11u32;
    let listfile_offset = hello_offset + hello_size;
    let listfile_size = listfile_contents.len() as u32;

    let archive_size = listfile_offset + listfile_size;

    let mut buf = Vec::new();
    buf.extend_from_slice(b"MPQ\x1a");
    buf.extend_from_slice(&HEADER_SIZE.to_le_bytes());
    buf.extend_from_slice(&archive_size.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes()); // format version 0
    buf.extend_from_slice(&0u16.to_le_bytes()); // sector size shift
    buf.extend_from_slice(&hash_table_offset.to_le_bytes());
    buf.extend_from_slice(&block_table_offset.to_le_bytes());
    buf.extend_from_slice(&hash_table_entries.to_le_bytes());
    buf.extend_from_slice(&block_table_entries.to_le_bytes());
    assert_eq!(buf.len() as u32, HEADER_SIZE);

    let mut hash_cleartext = Vec::new();
    hash_cleartext.extend_from_slice(&hash_entry_bytes("hello.txt", 0));
    hash_cleartext.extend_from_slice(&hash_entry_bytes("(listfile)", 1));
    let hash_key = hash_string("(hash table)", hash_type::TABLE);
    buf.extend_from_slice(&encrypt(&hash_cleartext, hash_key));

    let mut block_cleartext = Vec::new();
    block_cleartext.extend_from_slice(&block_entry_bytes(hello_offset, hello_size));
    block_cleartext.extend_from_slice(&block_entry_bytes(listfile_offset, listfile_size));
    let block_key = hash_string("(block table)", hash_type::TABLE);
    buf.extend_from_slice(&encrypt(&block_cleartext, block_key));

    buf.extend_from_slice(b"hello world");
    buf.extend_from_slice(listfile_contents);

    assert_eq!(buf.len() as u32, archive_size);
    std::fs::write(path, buf).expect("write fixture archive");
}
