// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Digit-by-digit integer square root.

/// Square root of `x`, built one result bit at a time from bit `top_bit`
/// downward. Only the `depth` most significant bits are computed; the rest
/// stay zero.
///
/// The caller guarantees `sqrt(x) < 2^(top_bit + 1)` and `top_bit <= 30`.
pub fn sqrt_bits(x: u64, top_bit: u32, depth: u32) -> u64 {
    debug_assert!(top_bit <= 30);
    let lowest = (top_bit + 1).saturating_sub(depth);
    let mut root = 0u64;
    for bit in (lowest..=top_bit).rev() {
        let trial = root | (1 << bit);
        if trial * trial <= x {
            root = trial;
        }
    }
    root
}
