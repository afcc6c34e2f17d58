// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Inner products into the width's accumulator.

use crate::fxp::ops::{ashr, round_shr};
use crate::fxp::{Accumulator, Mantissa};
use crate::types::RightShift;

/// Sum of `(b >> b_shr) * (c >> c_shr)`.
///
/// Each product is shifted right by `T::DOT_TERM_SHR` with rounding, then
/// added to an accumulator `T::ACC_BITS` wide that saturates after every term.
pub fn dot<T: Mantissa>(b: &[T], c: &[T], b_shr: RightShift, c_shr: RightShift) -> T::Acc {
    debug_assert_eq!(b.len(), c.len());
    let mut acc = Accumulator::new(T::ACC_BITS);
    for (&x, &y) in b.iter().zip(c) {
        let p = ashr(x, b_shr).to_i64() * ashr(y, c_shr).to_i64();
        acc.add(round_shr(p, T::DOT_TERM_SHR));
    }
    T::acc_from_i64(acc.value())
}

/// Sum of squares of `b >> b_shr`.
pub fn energy<T: Mantissa>(b: &[T], b_shr: RightShift) -> T::Acc {
    let mut acc = Accumulator::new(T::ACC_BITS);
    for &x in b {
        let v = ashr(x, b_shr).to_i64();
        acc.add(round_shr(v * v, T::DOT_TERM_SHR));
    }
    T::acc_from_i64(acc.value())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_s16_exact() {
        let b = [1i16, -2, 3, 4];
        let c = [5i16, 6, -7, 8];
        assert_eq!(dot(&b, &c, 0, 0), 5 - 12 - 21 + 32);
    }

    #[test]
    fn test_dot_s32_term_shift() {
        // 2^30 * 2^30 >> 30 = 2^30 per term
        let b = [1i32 << 30; 3];
        assert_eq!(dot(&b, &b, 0, 0), 3i64 << 30);
    }

    #[test]
    fn test_dot_s16_saturates_at_accumulator() {
        let b = [i16::MAX; 4];
        let total = dot(&b, &b, 0, 0);
        assert_eq!(total, i32::MAX);
    }

    #[test]
    fn test_energy() {
        let b = [3i16, -4];
        assert_eq!(energy(&b, 0), 25);
        assert_eq!(energy(&b, 1), 1 + 4);
    }
}
