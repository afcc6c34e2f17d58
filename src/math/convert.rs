// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Width conversion between 16-bit and 32-bit mantissas.

use crate::fxp::ops::ashr;
use crate::fxp::{complex_headroom, vect_headroom, Mantissa};
use crate::types::{Complex, Headroom, RightShift};

/// `a = b >> b_shr` widened to 32 bits. A negative `b_shr` fills the new low
/// bits and never saturates for shifts down to `-16`.
pub fn s16_to_s32(a: &mut [i32], b: &[i16], b_shr: RightShift) -> Headroom {
    debug_assert_eq!(a.len(), b.len());
    for (out, &x) in a.iter_mut().zip(b) {
        *out = ashr(x as i32, b_shr);
    }
    vect_headroom(a)
}

/// `a = b >> b_shr` narrowed to 16 bits, saturating.
pub fn s32_to_s16(a: &mut [i16], b: &[i32], b_shr: RightShift) -> Headroom {
    debug_assert_eq!(a.len(), b.len());
    for (out, &x) in a.iter_mut().zip(b) {
        *out = i16::saturate(ashr(x, b_shr).to_i64());
    }
    vect_headroom(a)
}

/// `acc += b >> b_shr` in 32 bits, saturating.
pub fn accumulate_s16(acc: &mut [i32], b: &[i16], b_shr: RightShift) -> Headroom {
    debug_assert_eq!(acc.len(), b.len());
    for (out, &x) in acc.iter_mut().zip(b) {
        let v = ashr(x as i32, b_shr).to_i64();
        *out = i32::saturate(*out as i64 + v);
    }
    vect_headroom(acc)
}

pub fn complex_s16_to_s32(
    a: &mut [Complex<i32>],
    b: &[Complex<i16>],
    b_shr: RightShift,
) -> Headroom {
    debug_assert_eq!(a.len(), b.len());
    for (out, z) in a.iter_mut().zip(b) {
        *out = Complex::new(ashr(z.re as i32, b_shr), ashr(z.im as i32, b_shr));
    }
    complex_headroom(a)
}

pub fn complex_s32_to_s16(
    a: &mut [Complex<i16>],
    b: &[Complex<i32>],
    b_shr: RightShift,
) -> Headroom {
    debug_assert_eq!(a.len(), b.len());
    for (out, z) in a.iter_mut().zip(b) {
        *out = Complex::new(
            i16::saturate(ashr(z.re, b_shr).to_i64()),
            i16::saturate(ashr(z.im, b_shr).to_i64()),
        );
    }
    complex_headroom(a)
}
