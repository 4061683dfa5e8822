//! Sector decompression, dispatched on the leading codec byte of a
//! compressed sector or single-unit payload.

mod bzip2;
mod zlib;

use crate::error::{Error, Result};

/// Stored/no-op codec. Per reference behavior the marker byte is preserved
/// in the output rather than stripped.
const CODEC_STORED: u8 = 0x00;
/// zlib-compatible deflate stream.
const CODEC_ZLIB: u8 = 0x02;
/// bzip2 stream.
const CODEC_BZIP2: u8 = 0x10;

/// Decompress a sector (or single-unit payload) whose first byte names the
/// codec used for the remainder.
///
/// Codec `0x00` is bug-compatible with the reference implementation: the
/// whole input, marker byte included, is returned unchanged.
pub fn decompress_sector(sector: &[u8]) -> Result<Vec<u8>> {
    let (&codec, rest) = sector
        .split_first()
        .ok_or_else(|| Error::CorruptPayload("empty compressed sector".into()))?;

    log::trace!("decompressing sector with codec 0x{codec:02x}, {} bytes", rest.len());

    match codec {
        CODEC_STORED => Ok(sector.to_vec()),
        CODEC_ZLIB => zlib::decompress(rest),
        CODEC_BZIP2 => bzip2::decompress(rest),
        other => Err(Error::UnsupportedCompression(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_codec_keeps_marker_byte() {
        let sector = [0x00, 1, 2, 3, 4];
        let out = decompress_sector(&sector).unwrap();
        assert_eq!(out, sector);
    }

    #[test]
    fn test_unknown_codec_fails() {
        let sector = [0x7F, 1, 2, 3];
        assert!(matches!(
            decompress_sector(&sector),
            Err(Error::UnsupportedCompression(0x7F))
        ));
    }

    #[test]
    fn test_empty_sector_fails() {
        assert!(decompress_sector(&[]).is_err());
    }
}
