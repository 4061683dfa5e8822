//! Error types for the MPQ library.

use thiserror::Error;

/// Primary error type for MPQ operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The archive header, or one of its dependent tables, failed a
    /// structural sanity check (bad magic, offset out of range, etc).
    #[error("invalid MPQ format: {0}")]
    InvalidFormat(String),

    /// The archive declares a format version this crate does not implement.
    #[error("unsupported MPQ format version: {0}")]
    UnsupportedVersion(u16),

    /// The archive or a requested file relies on a feature this crate
    /// deliberately does not implement (e.g. encrypted file contents).
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// A sector used a compression codec byte this crate does not decode.
    #[error("unsupported compression method: 0x{0:02x}")]
    UnsupportedCompression(u8),

    /// Decoded data failed a size or content invariant (short read, bad
    /// sector CRC, decompression producing the wrong length, etc).
    #[error("corrupt payload: {0}")]
    CorruptPayload(String),

    /// Underlying I/O failure while reading the archive file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for MPQ operations.
pub type Result<T> = std::result::Result<T, Error>;
