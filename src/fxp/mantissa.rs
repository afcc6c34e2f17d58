// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Element widths supported by BFP vectors.

use core::fmt::Debug;
use core::hash::Hash;

use crate::fxp::headroom::headroom_i64;
use crate::math::rot_table::{ROT_TABLE_S16, ROT_TABLE_S32};
use crate::types::Headroom;

mod private {
    pub trait Sealed {}
    impl Sealed for i16 {}
    impl Sealed for i32 {}
}

/// A signed mantissa width with symmetric saturation.
///
/// Kernels are written once against this trait. All intermediate arithmetic
/// is carried out in `i64` (or `i128` for complex products), then saturated
/// back into `[MIN, MAX]` where `MIN == -MAX`.
pub trait Mantissa:
    Copy + Default + Ord + Hash + Debug + Send + Sync + 'static + private::Sealed
{
    /// Element width in bits.
    const BITS: u32;
    /// Largest value a saturating kernel produces.
    const MAX: Self;
    /// Smallest value a saturating kernel produces.
    const MIN: Self;
    const ZERO: Self;
    /// Width of the reduction accumulator.
    const ACC_BITS: u32;
    /// Right shift applied to each product term of a dot product or energy.
    const DOT_TERM_SHR: i32;
    /// Maximum number of result bits of a square root.
    const SQRT_MAX_DEPTH: u32;
    /// Fractional bits of the magnitude rotation table.
    const ROT_FRAC_BITS: u32;

    /// Result type of reductions, wide enough for `ACC_BITS`.
    type Acc: Copy + Default + Debug + PartialEq + Eq;

    fn to_i64(self) -> i64;

    /// Clamps `x` into `[MIN, MAX]`.
    fn saturate(x: i64) -> Self;

    /// Narrows a value known to fit the two's-complement range.
    fn wrap(x: i64) -> Self;

    fn acc_from_i64(x: i64) -> Self::Acc;

    fn acc_to_i64(x: Self::Acc) -> i64;

    /// Rotation rows `(cos, -sin)` used by the magnitude kernel.
    fn rot_table() -> &'static [(i32, i32)];

    fn headroom(self) -> Headroom {
        headroom_i64(self.to_i64()) - (64 - Self::BITS)
    }
}

impl Mantissa for i16 {
    const BITS: u32 = 16;
    const MAX: Self = i16::MAX;
    const MIN: Self = -i16::MAX;
    const ZERO: Self = 0;
    const ACC_BITS: u32 = 32;
    const DOT_TERM_SHR: i32 = 0;
    const SQRT_MAX_DEPTH: u32 = crate::config::S16_SQRT_MAX_DEPTH;
    const ROT_FRAC_BITS: u32 = 15;

    type Acc = i32;

    fn to_i64(self) -> i64 {
        self as i64
    }

    fn saturate(x: i64) -> Self {
        x.clamp(-(i16::MAX as i64), i16::MAX as i64) as i16
    }

    fn wrap(x: i64) -> Self {
        x as i16
    }

    fn acc_from_i64(x: i64) -> i32 {
        x.clamp(-(i32::MAX as i64), i32::MAX as i64) as i32
    }

    fn acc_to_i64(x: i32) -> i64 {
        x as i64
    }

    fn rot_table() -> &'static [(i32, i32)] {
        &ROT_TABLE_S16
    }
}

impl Mantissa for i32 {
    const BITS: u32 = 32;
    const MAX: Self = i32::MAX;
    const MIN: Self = -i32::MAX;
    const ZERO: Self = 0;
    const ACC_BITS: u32 = 40;
    const DOT_TERM_SHR: i32 = 30;
    const SQRT_MAX_DEPTH: u32 = crate::config::S32_SQRT_MAX_DEPTH;
    const ROT_FRAC_BITS: u32 = 30;

    type Acc = i64;

    fn to_i64(self) -> i64 {
        self as i64
    }

    fn saturate(x: i64) -> Self {
        x.clamp(-(i32::MAX as i64), i32::MAX as i64) as i32
    }

    fn wrap(x: i64) -> Self {
        x as i32
    }

    fn acc_from_i64(x: i64) -> i64 {
        x.clamp(-crate::config::S40_MAX, crate::config::S40_MAX)
    }

    fn acc_to_i64(x: i64) -> i64 {
        x
    }

    fn rot_table() -> &'static [(i32, i32)] {
        &ROT_TABLE_S32
    }
}
