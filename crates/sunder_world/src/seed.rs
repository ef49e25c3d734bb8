//! # Seed Derivation
//!
//! Turning player input and zone ids into stable 64-bit seeds.

use rand::Rng;

/// Stable 31-multiplier string hash.
///
/// Used to derive per-zone seeds from `world_seed + hash(zone_id)` and to
/// turn non-numeric seed text into a seed. Must never change between
/// releases or existing worlds regenerate differently.
#[must_use]
pub fn string_hash(text: &str) -> i64 {
    let mut hash: i32 = 0;
    for unit in text.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    i64::from(hash)
}

/// Parses user-entered seed text.
///
/// Empty text means "pick one for me" (`None`). Numeric text is used
/// as-is; anything else is hashed.
#[must_use]
pub fn seed_from_text(text: &str) -> Option<i64> {
    if text.is_empty() {
        return None;
    }
    match text.parse::<i64>() {
        Ok(seed) => Some(seed),
        Err(_) => Some(string_hash(text)),
    }
}

/// A fresh random world seed.
#[must_use]
pub fn random_seed() -> i64 {
    rand::thread_rng().gen()
}
