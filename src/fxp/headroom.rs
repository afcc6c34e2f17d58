// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Headroom: redundant leading sign bits.

use crate::fxp::Mantissa;
use crate::types::{Complex, Headroom};

/// Count of leading bits equal to the sign bit.
pub fn cls_i64(x: i64) -> u32 {
    if x < 0 {
        (!x).leading_zeros()
    } else {
        x.leading_zeros()
    }
}

/// Headroom of a 64-bit value. Zero and -1 have 63.
pub fn headroom_i64(x: i64) -> Headroom {
    cls_i64(x) - 1
}

/// Minimum headroom over `b`. Empty slices report the maximum, `BITS - 1`.
pub fn vect_headroom<T: Mantissa>(b: &[T]) -> Headroom {
    b.iter()
        .map(|x| x.headroom())
        .min()
        .unwrap_or(T::BITS - 1)
}

/// Minimum headroom over both channels of every element.
pub fn complex_headroom<T: Mantissa>(b: &[Complex<T>]) -> Headroom {
    b.iter()
        .map(|z| z.re.headroom().min(z.im.headroom()))
        .min()
        .unwrap_or(T::BITS - 1)
}
