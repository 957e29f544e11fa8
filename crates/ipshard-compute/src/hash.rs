//! # Shard Hasher
//!
//! Pure functions mapping an address (or string) plus a seed to a 31-bit
//! hash, and a hash to a shard index.
//!
//! Independently launched shard workers must agree on which shard owns a
//! given item without coordinating, so every function here is bit-exact and
//! platform independent. Do not change the constants or the byte order.

use sha2::{Digest, Sha256};

/// FNV-1a 32-bit offset basis.
pub const FNV_OFFSET_BASIS: u32 = 2_166_136_261;

/// FNV-1a 32-bit prime.
pub const FNV_PRIME: u32 = 16_777_619;

/// Clears the sign bit so hashes stay non-negative as signed 32-bit values.
pub const HASH_MASK: u32 = 0x7FFF_FFFF;

/// Hash an IPv4 address (as a host-order integer) with a seed.
///
/// FNV-1a over the four address bytes in little-endian order, followed by
/// one extra round mixing in the seed.
#[inline]
pub fn hash_ip(ip: u32, seed: u32) -> u32 {
    let mut h = FNV_OFFSET_BASIS;
    for byte in ip.to_le_bytes() {
        h ^= u32::from(byte);
        h = h.wrapping_mul(FNV_PRIME);
    }
    h ^= seed;
    h = h.wrapping_mul(FNV_PRIME);
    h & HASH_MASK
}

/// Hash an opaque string entry with a seed.
///
/// SHA-256 over the UTF-8 bytes of `"{text}:{seed}"`, first four digest
/// bytes read big-endian, sign bit cleared.
pub fn hash_string(text: &str, seed: u32) -> u32 {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update(b":");
    hasher.update(seed.to_string().as_bytes());
    let digest = hasher.finalize();
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]) & HASH_MASK
}

/// Zero-based shard that owns `hash` out of `total` shards.
///
/// Returns 0 when `total` is 0.
#[inline]
pub fn shard_of(hash: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    hash % total
}

/// Whether `hash` belongs to the 1-based shard `index` of `total`.
#[inline]
pub fn belongs_to_shard(hash: u32, index: u32, total: u32) -> bool {
    index >= 1 && index <= total && shard_of(hash, total) == index - 1
}
