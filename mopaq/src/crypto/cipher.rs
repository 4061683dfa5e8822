//! The MPQ stream cipher, used to decrypt hash/block table records and
//! encrypted file sector data.

use super::table::ENCRYPTION_TABLE;

/// Decrypt `ciphertext` under `key`.
///
/// `ciphertext.len()` must be a multiple of 4. Each input word is read
/// little-endian and the cleartext word is written back big-endian; this
/// mixed endianness is an accidental byte-swap preserved from the reference
/// implementation and is load-bearing for table and file layout.
///
/// # Panics
///
/// Panics if `ciphertext.len()` is not a multiple of 4.
pub fn decrypt(ciphertext: &[u8], key: u32) -> Vec<u8> {
    assert_eq!(ciphertext.len() % 4, 0, "ciphertext must be word-aligned");

    let mut seed1 = key;
    let mut seed2: u32 = 0xEEEEEEEE;
    let mut out = Vec::with_capacity(ciphertext.len());

    for chunk in ciphertext.chunks_exact(4) {
        let w_in = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);

        seed2 = seed2.wrapping_add(ENCRYPTION_TABLE[0x400 + (seed1 & 0xFF) as usize]);
        let w_clear = w_in ^ seed1.wrapping_add(seed2);

        seed1 = (!seed1 << 0x15).wrapping_add(0x11111111) | (seed1 >> 0x0B);
        seed2 = w_clear
            .wrapping_add(seed2)
            .wrapping_add(seed2 << 5)
            .wrapping_add(3);

        out.extend_from_slice(&w_clear.to_be_bytes());
    }

    out
}

/// Encrypt `cleartext` under `key`, producing the ciphertext [`decrypt`]
/// would recover it from.
///
/// The spec this cipher implements only defines the decrypting direction;
/// this is the inverse used by test fixtures to build synthetic archives.
/// `cleartext` is read big-endian per word (matching `decrypt`'s output
/// convention) and the result is written little-endian (matching its input
/// convention).
///
/// # Panics
///
/// Panics if `cleartext.len()` is not a multiple of 4.
pub fn encrypt(cleartext: &[u8], key: u32) -> Vec<u8> {
    assert_eq!(cleartext.len() % 4, 0, "cleartext must be word-aligned");

    let mut seed1 = key;
    let mut seed2: u32 = 0xEEEEEEEE;
    let mut out = Vec::with_capacity(cleartext.len());

    for chunk in cleartext.chunks_exact(4) {
        let w_clear = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);

        seed2 = seed2.wrapping_add(ENCRYPTION_TABLE[0x400 + (seed1 & 0xFF) as usize]);
        let w_in = w_clear ^ seed1.wrapping_add(seed2);

        seed1 = (!seed1 << 0x15).wrapping_add(0x11111111) | (seed1 >> 0x0B);
        seed2 = w_clear
            .wrapping_add(seed2)
            .wrapping_add(seed2 << 5)
            .wrapping_add(3);

        out.extend_from_slice(&w_in.to_le_bytes());
    }

    out
}
