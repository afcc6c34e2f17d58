// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Operations on single floating scalars.
//!
//! These run the same planners and kernels as the vector ops on a one-element
//! block, so a scalar result matches the corresponding vector element bit for
//! bit.

use super::{mul as kernels, Operand};
use crate::fxp::headroom::headroom_i64;
use crate::fxp::ops::shr_floor;
use crate::fxp::Mantissa;
use crate::plan::{real, Planner};
use crate::types::{Exponent, Float, FloatS16, FloatS32};

/// Product of two scalars through the width's multiply planner.
pub fn mul<T: Planner>(b: Float<T>, c: Float<T>) -> Float<T> {
    let plan = T::plan_mul(b.exp, c.exp, b.mant.headroom(), c.mant.headroom());
    let mut out = [T::ZERO];
    kernels::mul(
        &mut out,
        Operand::Slice(&[b.mant]),
        Operand::Slice(&[c.mant]),
        &plan,
    );
    Float::new(out[0], plan.a_exp)
}

/// `1 / b`. A zero mantissa gives `MAX`.
pub fn inverse<T: Planner>(b: Float<T>) -> Float<T> {
    let plan = real::inverse(&[b.mant], b.exp);
    let mut out = [T::ZERO];
    kernels::inverse(&mut out, Operand::Slice(&[b.mant]), &plan);
    Float::new(out[0], plan.a_exp)
}

/// Square root to `depth` result bits. Negative values give zero.
pub fn sqrt<T: Planner>(b: Float<T>, depth: u32) -> Float<T> {
    let plan = real::sqrt::<T>(b.exp, b.mant.headroom());
    let mut out = [T::ZERO];
    kernels::sqrt(&mut out, Operand::Slice(&[b.mant]), plan.b_shr, depth);
    Float::new(out[0], plan.a_exp)
}

pub fn s16_mul(b: FloatS16, c: FloatS16) -> FloatS16 {
    mul(b, c)
}

pub fn s32_mul(b: FloatS32, c: FloatS32) -> FloatS32 {
    mul(b, c)
}

/// `1 / b` for an integer `b`.
pub fn s16_inverse(b: i16) -> FloatS16 {
    inverse(Float::new(b, 0))
}

/// `1 / b` for an integer `b`.
pub fn s32_inverse(b: i32) -> FloatS32 {
    inverse(Float::new(b, 0))
}

pub fn s16_sqrt(b: FloatS16, depth: u32) -> FloatS16 {
    sqrt(b, depth)
}

pub fn s32_sqrt(b: FloatS32, depth: u32) -> FloatS32 {
    sqrt(b, depth)
}

/// Narrows a 64-bit value (typically a reduction result) to 32 bits,
/// shifting right only as far as needed.
pub fn s64_to_s32(b: i64, b_exp: Exponent) -> FloatS32 {
    let shr = (32 - headroom_i64(b) as i32).max(0);
    Float::new(i32::saturate(shr_floor(b, shr as u32)), b_exp + shr)
}

pub fn s32_to_s16(b: i32, b_exp: Exponent) -> FloatS16 {
    let shr = (16 - b.headroom() as i32).max(0);
    Float::new(
        i16::saturate(shr_floor(b as i64, shr as u32)),
        b_exp + shr,
    )
}

/// Widens to 32 bits. With `remove_hr` the result is also normalized.
pub fn s16_to_s32(b: i16, b_exp: Exponent, remove_hr: bool) -> FloatS32 {
    let shl = if remove_hr { 16 + b.headroom() } else { 0 };
    Float::new(i32::saturate((b as i64) << shl), b_exp - shl as i32)
}
