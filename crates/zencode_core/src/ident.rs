//! Content-derived short identifiers (MurmurHash3 + base62).
//!
//! Identical text always yields the same id. Distinct texts may collide; the
//! share gateway treats a collision as "already exists" (first writer wins).

use serde::Serialize;
use std::fmt;

const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const MURMUR_SEED: u32 = 0;

/// Base62 identifier derived from code content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ShortId(String);

impl ShortId {
    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Accept an externally supplied id only if it could have been derived.
    pub fn parse(value: &str) -> Option<Self> {
        is_valid_short_id(value).then(|| Self(value.to_string()))
    }
}

impl fmt::Display for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derive the short id for `text` from its UTF-8 bytes.
pub fn derive_id(text: &str) -> ShortId {
    ShortId(to_base62(u64::from(murmur3_32(text.as_bytes(), MURMUR_SEED))))
}

/// Whether `value` is non-empty and drawn only from the base62 alphabet.
pub fn is_valid_short_id(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// MurmurHash3 x86 32-bit.
pub fn murmur3_32(data: &[u8], seed: u32) -> u32 {
    const C1: u32 = 0xcc9e_2d51;
    const C2: u32 = 0x1b87_3593;

    let mut hash = seed;
    let mut blocks = data.chunks_exact(4);
    for block in &mut blocks {
        let k = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
        hash ^= scramble(k, C1, C2);
        hash = hash.rotate_left(13).wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    let tail = blocks.remainder();
    if !tail.is_empty() {
        let mut k = 0u32;
        for (shift, byte) in tail.iter().enumerate() {
            k |= u32::from(*byte) << (8 * shift);
        }
        hash ^= scramble(k, C1, C2);
    }

    // Lengths beyond u32 wrap, matching the reference implementation.
    hash ^= data.len() as u32;
    fmix32(hash)
}

fn scramble(k: u32, c1: u32, c2: u32) -> u32 {
    k.wrapping_mul(c1).rotate_left(15).wrapping_mul(c2)
}

fn fmix32(mut hash: u32) -> u32 {
    hash ^= hash >> 16;
    hash = hash.wrapping_mul(0x85eb_ca6b);
    hash ^= hash >> 13;
    hash = hash.wrapping_mul(0xc2b2_ae35);
    hash ^= hash >> 16;
    hash
}

/// Encode `value` most-significant digit first, without padding.
pub fn to_base62(mut value: u64) -> String {
    let mut digits = Vec::with_capacity(11);
    loop {
        digits.push(BASE62_ALPHABET[(value % 62) as usize]);
        value /= 62;
        if value == 0 {
            break;
        }
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}
