// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Multiplicative kernels: products, multiply-accumulate, square root and
//! reciprocal.

use super::{Aliasing, Operand};
use crate::fxp::isqrt::sqrt_bits;
use crate::fxp::ops::{ashr, round_shr};
use crate::fxp::recip::recip_signed;
use crate::fxp::{vect_headroom, Mantissa};
use crate::plan::{InversePlan, MaccPlan, MulPlan};
use crate::types::{Headroom, RightShift};

pub const ALIASING: Aliasing = Aliasing::AnyOperand;

/// The accumulator of `macc`/`nmacc` is updated in place; `b` and `c` must
/// be other buffers.
pub const MACC_ALIASING: Aliasing = Aliasing::Disjoint;

#[inline]
fn product<T: Mantissa>(b: T, c: T, plan: &MulPlan) -> i64 {
    let x = ashr(b, plan.b_shr).to_i64();
    let y = ashr(c, plan.c_shr).to_i64();
    round_shr(x * y, plan.p_shr)
}

/// `a = ((b >> b_shr) * (c >> c_shr)) >> p_shr`, rounded and saturated.
pub fn mul<T: Mantissa>(
    a: &mut [T],
    b: Operand<'_, T>,
    c: Operand<'_, T>,
    plan: &MulPlan,
) -> Headroom {
    debug_assert!(ALIASING.permits(&[b.is_output(), c.is_output()]));
    for k in 0..a.len() {
        a[k] = T::saturate(product(b.get(a, k), c.get(a, k), plan));
    }
    vect_headroom(a)
}

/// Multiplies every element by the scalar mantissa `alpha`.
pub fn scale<T: Mantissa>(a: &mut [T], b: Operand<'_, T>, alpha: T, plan: &MulPlan) -> Headroom {
    debug_assert!(ALIASING.permits(&[b.is_output()]));
    for k in 0..a.len() {
        a[k] = T::saturate(product(b.get(a, k), alpha, plan));
    }
    vect_headroom(a)
}

fn macc_impl<T: Mantissa>(
    acc: &mut [T],
    b: Operand<'_, T>,
    c: Operand<'_, T>,
    plan: &MaccPlan,
    negate: bool,
) -> Headroom {
    debug_assert!(MACC_ALIASING.permits(&[b.is_output(), c.is_output()]));
    for k in 0..acc.len() {
        let p = product(b.get(acc, k), c.get(acc, k), &plan.bc);
        let prev = ashr(acc[k], plan.acc_shr).to_i64();
        acc[k] = T::saturate(if negate { prev - p } else { prev + p });
    }
    vect_headroom(acc)
}

/// `acc += b * c`.
pub fn macc<T: Mantissa>(
    acc: &mut [T],
    b: Operand<'_, T>,
    c: Operand<'_, T>,
    plan: &MaccPlan,
) -> Headroom {
    macc_impl(acc, b, c, plan, false)
}

/// `acc -= b * c`.
pub fn nmacc<T: Mantissa>(
    acc: &mut [T],
    b: Operand<'_, T>,
    c: Operand<'_, T>,
    plan: &MaccPlan,
) -> Headroom {
    macc_impl(acc, b, c, plan, true)
}

/// Square root of `b >> b_shr`, producing `depth` result bits.
///
/// Each element is read as a fraction with `BITS - 2` fractional bits, which
/// makes the result another such fraction. Negative inputs produce zero.
pub fn sqrt<T: Mantissa>(a: &mut [T], b: Operand<'_, T>, b_shr: RightShift, depth: u32) -> Headroom {
    debug_assert!(ALIASING.permits(&[b.is_output()]));
    let frac = T::BITS - 2;
    for k in 0..a.len() {
        let x = ashr(b.get(a, k), b_shr).to_i64();
        a[k] = if x <= 0 {
            T::ZERO
        } else {
            T::saturate(sqrt_bits((x as u64) << frac, frac, depth) as i64)
        };
    }
    vect_headroom(a)
}

/// `a = 2^scale / b`, truncated. Zero divisors produce `MAX`.
pub fn inverse<T: Mantissa>(a: &mut [T], b: Operand<'_, T>, plan: &InversePlan) -> Headroom {
    debug_assert!(ALIASING.permits(&[b.is_output()]));
    let sat = T::MAX.to_i64();
    for k in 0..a.len() {
        let x = b.get(a, k).to_i64();
        a[k] = T::saturate(recip_signed(x, plan.scale, sat));
    }
    vect_headroom(a)
}
