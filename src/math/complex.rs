// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Complex kernels.
//!
//! Both channels of an element share every shift. Products of two complex
//! values sum two partial products per channel in `i128` and round once.

use super::{Aliasing, Operand};
use crate::fxp::ops::{ashr, round_shr, round_shr_i128, saturate_i128};
use crate::fxp::{complex_headroom, vect_headroom, Accumulator, Mantissa};
use crate::plan::{MaccPlan, MulPlan};
use crate::types::{Complex, Headroom, LeftShift, RightShift};

pub const ALIASING: Aliasing = Aliasing::AnyOperand;

/// The accumulator of the multiply-accumulate kernels is updated in place;
/// `b` and `c` must be other buffers.
pub const MACC_ALIASING: Aliasing = Aliasing::Disjoint;

#[inline]
fn shifted<T: Mantissa>(z: Complex<T>, shr: RightShift) -> (i128, i128) {
    (
        ashr(z.re, shr).to_i64() as i128,
        ashr(z.im, shr).to_i64() as i128,
    )
}

#[inline]
fn finish<T: Mantissa>(re: i128, im: i128, p_shr: RightShift) -> Complex<T> {
    Complex::new(
        saturate_i128(round_shr_i128(re, p_shr)),
        saturate_i128(round_shr_i128(im, p_shr)),
    )
}

fn rounded_product<T: Mantissa>(
    b: Complex<T>,
    c: Complex<T>,
    plan: &MulPlan,
    conj: bool,
) -> (i128, i128) {
    let (br, bi) = shifted(b, plan.b_shr);
    let (cr, ci) = shifted(c, plan.c_shr);
    let (re, im) = if conj {
        (br * cr + bi * ci, bi * cr - br * ci)
    } else {
        (br * cr - bi * ci, br * ci + bi * cr)
    };
    (
        round_shr_i128(re, plan.p_shr),
        round_shr_i128(im, plan.p_shr),
    )
}

fn product<T: Mantissa>(b: Complex<T>, c: Complex<T>, plan: &MulPlan, conj: bool) -> Complex<T> {
    let (re, im) = rounded_product(b, c, plan, conj);
    Complex::new(saturate_i128(re), saturate_i128(im))
}

fn pair<T: Mantissa>(
    a: &mut [Complex<T>],
    b: Operand<'_, Complex<T>>,
    c: Operand<'_, Complex<T>>,
    b_shr: RightShift,
    c_shr: RightShift,
    negate: bool,
) -> Headroom {
    debug_assert!(ALIASING.permits(&[b.is_output(), c.is_output()]));
    for k in 0..a.len() {
        let (br, bi) = shifted(b.get(a, k), b_shr);
        let (cr, ci) = shifted(c.get(a, k), c_shr);
        let (re, im) = if negate {
            (br - cr, bi - ci)
        } else {
            (br + cr, bi + ci)
        };
        a[k] = Complex::new(saturate_i128(re), saturate_i128(im));
    }
    complex_headroom(a)
}

pub fn add<T: Mantissa>(
    a: &mut [Complex<T>],
    b: Operand<'_, Complex<T>>,
    c: Operand<'_, Complex<T>>,
    b_shr: RightShift,
    c_shr: RightShift,
) -> Headroom {
    pair(a, b, c, b_shr, c_shr, false)
}

pub fn sub<T: Mantissa>(
    a: &mut [Complex<T>],
    b: Operand<'_, Complex<T>>,
    c: Operand<'_, Complex<T>>,
    b_shr: RightShift,
    c_shr: RightShift,
) -> Headroom {
    pair(a, b, c, b_shr, c_shr, true)
}

pub fn shl<T: Mantissa>(
    a: &mut [Complex<T>],
    b: Operand<'_, Complex<T>>,
    b_shl: LeftShift,
) -> Headroom {
    debug_assert!(ALIASING.permits(&[b.is_output()]));
    for k in 0..a.len() {
        let z = b.get(a, k);
        a[k] = Complex::new(ashr(z.re, -b_shl), ashr(z.im, -b_shl));
    }
    complex_headroom(a)
}

/// `a = b * c`.
pub fn mul<T: Mantissa>(
    a: &mut [Complex<T>],
    b: Operand<'_, Complex<T>>,
    c: Operand<'_, Complex<T>>,
    plan: &MulPlan,
) -> Headroom {
    debug_assert!(ALIASING.permits(&[b.is_output(), c.is_output()]));
    for k in 0..a.len() {
        a[k] = product(b.get(a, k), c.get(a, k), plan, false);
    }
    complex_headroom(a)
}

/// `a = b * conj(c)`.
pub fn conj_mul<T: Mantissa>(
    a: &mut [Complex<T>],
    b: Operand<'_, Complex<T>>,
    c: Operand<'_, Complex<T>>,
    plan: &MulPlan,
) -> Headroom {
    debug_assert!(ALIASING.permits(&[b.is_output(), c.is_output()]));
    for k in 0..a.len() {
        a[k] = product(b.get(a, k), c.get(a, k), plan, true);
    }
    complex_headroom(a)
}

fn macc_impl<T: Mantissa>(
    acc: &mut [Complex<T>],
    b: Operand<'_, Complex<T>>,
    c: Operand<'_, Complex<T>>,
    plan: &MaccPlan,
    conj: bool,
    negate: bool,
) -> Headroom {
    debug_assert!(MACC_ALIASING.permits(&[b.is_output(), c.is_output()]));
    for k in 0..acc.len() {
        let (pr, pi) = rounded_product(b.get(acc, k), c.get(acc, k), &plan.bc, conj);
        let (ar, ai) = shifted(acc[k], plan.acc_shr);
        let (re, im) = if negate {
            (ar - pr, ai - pi)
        } else {
            (ar + pr, ai + pi)
        };
        acc[k] = Complex::new(saturate_i128(re), saturate_i128(im));
    }
    complex_headroom(acc)
}

/// `acc += b * c`.
pub fn macc<T: Mantissa>(
    acc: &mut [Complex<T>],
    b: Operand<'_, Complex<T>>,
    c: Operand<'_, Complex<T>>,
    plan: &MaccPlan,
) -> Headroom {
    macc_impl(acc, b, c, plan, false, false)
}

/// `acc -= b * c`.
pub fn nmacc<T: Mantissa>(
    acc: &mut [Complex<T>],
    b: Operand<'_, Complex<T>>,
    c: Operand<'_, Complex<T>>,
    plan: &MaccPlan,
) -> Headroom {
    macc_impl(acc, b, c, plan, false, true)
}

/// `acc += b * conj(c)`.
pub fn conj_macc<T: Mantissa>(
    acc: &mut [Complex<T>],
    b: Operand<'_, Complex<T>>,
    c: Operand<'_, Complex<T>>,
    plan: &MaccPlan,
) -> Headroom {
    macc_impl(acc, b, c, plan, true, false)
}

/// `acc -= b * conj(c)`.
pub fn conj_nmacc<T: Mantissa>(
    acc: &mut [Complex<T>],
    b: Operand<'_, Complex<T>>,
    c: Operand<'_, Complex<T>>,
    plan: &MaccPlan,
) -> Headroom {
    macc_impl(acc, b, c, plan, true, true)
}

/// `a = (b >> b_shr) + c` where `c` is already aligned to the output.
pub fn add_scalar<T: Mantissa>(
    a: &mut [Complex<T>],
    b: Operand<'_, Complex<T>>,
    c: Complex<T>,
    b_shr: RightShift,
) -> Headroom {
    debug_assert!(ALIASING.permits(&[b.is_output()]));
    let (cr, ci) = shifted(c, 0);
    for k in 0..a.len() {
        let (br, bi) = shifted(b.get(a, k), b_shr);
        a[k] = Complex::new(saturate_i128(br + cr), saturate_i128(bi + ci));
    }
    complex_headroom(a)
}

/// Negates the imaginary channel of every element.
pub fn conjugate<T: Mantissa>(a: &mut [Complex<T>], b: Operand<'_, Complex<T>>) -> Headroom {
    debug_assert!(ALIASING.permits(&[b.is_output()]));
    for k in 0..a.len() {
        let z = b.get(a, k);
        a[k] = Complex::new(z.re, T::saturate(-z.im.to_i64()));
    }
    complex_headroom(a)
}

/// Complex vector times real vector: both channels of `b[k]` scale by `c[k]`.
pub fn real_mul<T: Mantissa>(
    a: &mut [Complex<T>],
    b: Operand<'_, Complex<T>>,
    c: &[T],
    plan: &MulPlan,
) -> Headroom {
    debug_assert_eq!(a.len(), c.len());
    debug_assert!(ALIASING.permits(&[b.is_output()]));
    for k in 0..a.len() {
        let (br, bi) = shifted(b.get(a, k), plan.b_shr);
        let y = ashr(c[k], plan.c_shr).to_i64() as i128;
        a[k] = finish(br * y, bi * y, plan.p_shr);
    }
    complex_headroom(a)
}

/// Complex vector times real scalar.
pub fn real_scale<T: Mantissa>(
    a: &mut [Complex<T>],
    b: Operand<'_, Complex<T>>,
    alpha: T,
    plan: &MulPlan,
) -> Headroom {
    debug_assert!(ALIASING.permits(&[b.is_output()]));
    let y = ashr(alpha, plan.c_shr).to_i64() as i128;
    for k in 0..a.len() {
        let (br, bi) = shifted(b.get(a, k), plan.b_shr);
        a[k] = finish(br * y, bi * y, plan.p_shr);
    }
    complex_headroom(a)
}

/// Complex vector times complex scalar.
pub fn scale<T: Mantissa>(
    a: &mut [Complex<T>],
    b: Operand<'_, Complex<T>>,
    alpha: Complex<T>,
    plan: &MulPlan,
) -> Headroom {
    debug_assert!(ALIASING.permits(&[b.is_output()]));
    for k in 0..a.len() {
        a[k] = product(b.get(a, k), alpha, plan, false);
    }
    complex_headroom(a)
}

/// `re^2 + im^2` of each element.
pub fn squared_mag<T: Mantissa>(a: &mut [T], b: &[Complex<T>], plan: &MulPlan) -> Headroom {
    debug_assert_eq!(a.len(), b.len());
    for (out, &z) in a.iter_mut().zip(b) {
        let (re, im) = shifted(z, plan.b_shr);
        *out = saturate_i128(round_shr_i128(re * re + im * im, plan.p_shr));
    }
    vect_headroom(a)
}

/// Magnitude of each element by successive rotation onto the real axis.
///
/// The element is folded into the first quadrant, then rotated by each row of
/// the width's table, folding again after every row. The real part that
/// remains is the magnitude.
pub fn mag<T: Mantissa>(a: &mut [T], b: &[Complex<T>], b_shr: RightShift) -> Headroom {
    debug_assert_eq!(a.len(), b.len());
    let frac = T::ROT_FRAC_BITS as i32;
    for (out, &z) in a.iter_mut().zip(b) {
        let mut re = ashr(z.re, b_shr).to_i64().abs();
        let mut im = ashr(z.im, b_shr).to_i64().abs();
        for &(cos, sin) in T::rot_table() {
            let (cos, sin) = (cos as i64, sin as i64);
            let next_re = round_shr(re * cos - im * sin, frac);
            let next_im = round_shr(re * sin + im * cos, frac);
            re = T::saturate(next_re).to_i64().abs();
            im = T::saturate(next_im).to_i64().abs();
        }
        *out = T::saturate(re);
    }
    vect_headroom(a)
}

/// Per-channel sum of `b >> b_shr`.
pub fn sum<T: Mantissa>(b: &[Complex<T>], b_shr: RightShift) -> Complex<T::Acc> {
    let mut re = Accumulator::new(T::ACC_BITS);
    let mut im = Accumulator::new(T::ACC_BITS);
    for &z in b {
        re.add(ashr(z.re, b_shr).to_i64());
        im.add(ashr(z.im, b_shr).to_i64());
    }
    Complex::new(T::acc_from_i64(re.value()), T::acc_from_i64(im.value()))
}

/// Sum of `re^2 + im^2` of `b >> b_shr`, accumulated the way the real energy is.
pub fn energy<T: Mantissa>(b: &[Complex<T>], b_shr: RightShift) -> T::Acc {
    let mut acc = Accumulator::new(T::ACC_BITS);
    for &z in b {
        for v in [ashr(z.re, b_shr).to_i64(), ashr(z.im, b_shr).to_i64()] {
            acc.add(round_shr(v * v, T::DOT_TERM_SHR));
        }
    }
    T::acc_from_i64(acc.value())
}
