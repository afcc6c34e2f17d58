// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Saturating scalar operations shared by every kernel.

use crate::fxp::Mantissa;
use crate::types::RightShift;

/// Arithmetic right shift by a non-negative amount of any size.
pub fn shr_floor(x: i64, shr: u32) -> i64 {
    x >> shr.min(63)
}

/// Signed arithmetic shift of one element.
///
/// Right shifts floor and never saturate, so a shift of zero is the identity.
/// Left shifts saturate symmetrically; a nonzero value shifted left by the
/// full width or more becomes `MAX` or `MIN`.
pub fn ashr<T: Mantissa>(x: T, shr: RightShift) -> T {
    let v = x.to_i64();
    if shr >= 0 {
        T::wrap(shr_floor(v, shr as u32))
    } else if shr <= -(T::BITS as i32) {
        match v.signum() {
            1 => T::MAX,
            -1 => T::MIN,
            _ => T::ZERO,
        }
    } else {
        T::saturate(v << (-shr) as u32)
    }
}

/// Rounding shift: adds half a unit before the floor shift.
///
/// Non-positive `shr` shifts left without rounding, saturating at `i64` bounds.
pub fn round_shr(v: i64, shr: RightShift) -> i64 {
    if shr > 0 {
        let s = (shr as u32 - 1).min(63);
        ((v >> s) + 1) >> 1
    } else if shr == 0 || v == 0 {
        v
    } else {
        let shl = (-shr).min(62) as u32;
        v.saturating_mul(1i64 << shl)
    }
}

/// [`round_shr`] for the 128-bit intermediates of complex products.
pub fn round_shr_i128(v: i128, shr: RightShift) -> i128 {
    if shr > 0 {
        let s = (shr as u32 - 1).min(127);
        ((v >> s) + 1) >> 1
    } else if shr == 0 || v == 0 {
        v
    } else {
        let shl = (-shr).min(126) as u32;
        v.saturating_mul(1i128 << shl)
    }
}

pub fn sat_add<T: Mantissa>(x: T, y: T) -> T {
    T::saturate(x.to_i64() + y.to_i64())
}

pub fn sat_sub<T: Mantissa>(x: T, y: T) -> T {
    T::saturate(x.to_i64() - y.to_i64())
}

/// `|x|`, with `|-2^(W-1)|` saturating to `MAX`.
pub fn sat_abs<T: Mantissa>(x: T) -> T {
    T::saturate(x.to_i64().abs())
}

/// Saturates an `i128` into the element range.
pub fn saturate_i128<T: Mantissa>(x: i128) -> T {
    let max = T::MAX.to_i64() as i128;
    T::saturate(x.clamp(-max, max) as i64)
}
