// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Integer reciprocal without a hardware divider.
//!
//! The divisor is normalized into `[2^31, 2^32)`, a 16-entry table gives a
//! first estimate of its reciprocal, Newton-Raphson refines it in Q62 and a
//! final correction step makes the quotient exact.

const SEED_INDEX_BITS: u32 = 4;
const NEWTON_STEPS: usize = 4;

/// Q30 reciprocal of the midpoint of each normalized divisor interval.
static RECIP_SEED: [u32; 1 << SEED_INDEX_BITS] = seed_table();

const fn seed_table() -> [u32; 1 << SEED_INDEX_BITS] {
    let mut table = [0u32; 1 << SEED_INDEX_BITS];
    let mut i = 0;
    while i < table.len() {
        // Interval i covers [(16 + i) / 32, (17 + i) / 32); midpoint (33 + 2i) / 64.
        table[i] = ((1u64 << 36) / (33 + 2 * i as u64)) as u32;
        i += 1;
    }
    table
}

/// `floor(2^scale / d)` for `0 < d <= 2^32` and `scale <= 62`.
pub fn recip_floor(d: u64, scale: u32) -> u64 {
    debug_assert!(d != 0 && d <= 1 << 32);
    debug_assert!(scale <= 62);
    if d == 1 << 32 {
        return (1u64 << scale) >> 32;
    }

    let norm = d.leading_zeros() - 32;
    let dn = (d << norm) as u128;

    // y approximates 2^32 / dn in Q62.
    let seed = RECIP_SEED[((dn >> (31 - SEED_INDEX_BITS)) & 0xF) as usize] as u128;
    let mut y = seed << 32;
    let two = 1u128 << 63;
    for _ in 0..NEWTON_STEPS {
        let xy = (dn * y) >> 32;
        y = (y * two.saturating_sub(xy)) >> 62;
    }

    // 2^scale / d = y * 2^(scale + norm - 94)
    let shr = 94 - scale - norm;
    let mut q = y >> shr;

    let num = 1u128 << scale;
    let d = d as u128;
    while q * d > num {
        q -= 1;
    }
    while (q + 1) * d <= num {
        q += 1;
    }
    q as u64
}

/// Signed `2^scale / b`, truncated toward zero like integer division.
/// A zero divisor yields `sat`, the caller's saturation value.
pub fn recip_signed(b: i64, scale: u32, sat: i64) -> i64 {
    if b == 0 {
        return sat;
    }
    let q = recip_floor(b.unsigned_abs(), scale) as i64;
    if b < 0 {
        -q
    } else {
        q
    }
}
