//! bzip2 sector decompression.

use std::io::Read;

use bzip2::read::BzDecoder;

use crate::error::{Error, Result};

/// Decompress a bzip2 stream.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = BzDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| Error::CorruptPayload(format!("bzip2 decompression failed: {e}")))?;
    Ok(out)
}
