//! MPQ name-hashing: a keyed hash of an uppercased ASCII string under one of
//! four role tags, built from the encryption table.

use super::table::ENCRYPTION_TABLE;

/// Hash roles used to key [`hash_string`].
pub mod hash_type {
    /// Used to compute the open-addressing probe start in the hash table.
    pub const TABLE_OFFSET: u32 = 0;
    /// First verification hash stored in a `HashEntry`.
    pub const HASH_A: u32 = 1;
    /// Second verification hash stored in a `HashEntry`.
    pub const HASH_B: u32 = 2;
    /// Used to derive the decryption key for table and file contents.
    pub const TABLE: u32 = 3;
}

/// ASCII uppercase conversion table.
const ASCII_TO_UPPER: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = i as u8;
        i += 1;
    }
    let mut i = b'a';
    while i <= b'z' {
        table[i as usize] = i - 32;
        i += 1;
    }
    table
};

/// Hash a string under the given role, per the MPQ name-hash algorithm.
pub fn hash_string(s: &str, role: u32) -> u32 {
    let mut seed1: u32 = 0x7FED7FED;
    let mut seed2: u32 = 0xEEEEEEEE;

    for &byte in s.as_bytes() {
        let c = ASCII_TO_UPPER[byte as usize] as u32;

        let v = ENCRYPTION_TABLE[((role << 8) + c) as usize];
        seed1 = v ^ seed1.wrapping_add(seed2);
        seed2 = c
            .wrapping_add(seed1)
            .wrapping_add(seed2)
            .wrapping_add(seed2 << 5)
            .wrapping_add(3);
    }

    seed1
}
