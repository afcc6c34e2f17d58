// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Reductions that do not multiply: sums and extrema.

use crate::fxp::ops::ashr;
use crate::fxp::{Accumulator, Mantissa};
use crate::types::RightShift;

/// Sum of `b >> b_shr` in a saturating accumulator.
pub fn sum<T: Mantissa>(b: &[T], b_shr: RightShift) -> T::Acc {
    let mut acc = Accumulator::new(T::ACC_BITS);
    for &x in b {
        acc.add(ashr(x, b_shr).to_i64());
    }
    T::acc_from_i64(acc.value())
}

/// Sum of `|b >> b_shr|`.
pub fn abs_sum<T: Mantissa>(b: &[T], b_shr: RightShift) -> T::Acc {
    let mut acc = Accumulator::new(T::ACC_BITS);
    for &x in b {
        acc.add(ashr(x, b_shr).to_i64().abs());
    }
    T::acc_from_i64(acc.value())
}

/// Largest element, or `None` when `b` is empty.
pub fn max<T: Mantissa>(b: &[T]) -> Option<T> {
    b.iter().copied().max()
}

pub fn min<T: Mantissa>(b: &[T]) -> Option<T> {
    b.iter().copied().min()
}

/// Index of the first occurrence of the largest element.
pub fn argmax<T: Mantissa>(b: &[T]) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (k, &x) in b.iter().enumerate() {
        match best {
            Some((_, cur)) if x <= cur => {}
            _ => best = Some((k, x)),
        }
    }
    best.map(|(k, _)| k)
}

/// Index of the first occurrence of the smallest element.
pub fn argmin<T: Mantissa>(b: &[T]) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (k, &x) in b.iter().enumerate() {
        match best {
            Some((_, cur)) if x >= cur => {}
            _ => best = Some((k, x)),
        }
    }
    best.map(|(k, _)| k)
}
