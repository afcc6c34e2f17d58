// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Elementwise kernels over one or two real vectors.
//!
//! Every kernel here reads element `k` of each operand before writing element
//! `k` of the output, so any operand may be the output buffer.

use super::{Aliasing, Operand};
use crate::fxp::ops::{ashr, sat_abs};
use crate::fxp::{vect_headroom, Mantissa};
use crate::plan::ClipPlan;
use crate::types::{Headroom, LeftShift, RightShift};

pub const ALIASING: Aliasing = Aliasing::AnyOperand;

/// Elementwise max/min may only run in place on `b`.
pub const EXTREMUM_ALIASING: Aliasing = Aliasing::OnlyOperand(0);

fn debug_check<T: Copy>(policy: Aliasing, out_len: usize, operands: &[Operand<'_, T>]) {
    debug_assert!(operands.iter().all(|op| op.len_with(out_len) == out_len));
    debug_assert!({
        let mut outputs = [false; 4];
        for (slot, op) in outputs.iter_mut().zip(operands) {
            *slot = op.is_output();
        }
        policy.permits(&outputs[..operands.len()])
    });
}

/// Fills `a` with `value`.
pub fn set<T: Mantissa>(a: &mut [T], value: T) -> Headroom {
    a.fill(value);
    vect_headroom(a)
}

pub fn shr<T: Mantissa>(a: &mut [T], b: Operand<'_, T>, b_shr: RightShift) -> Headroom {
    debug_check(ALIASING, a.len(), &[b]);
    for k in 0..a.len() {
        a[k] = ashr(b.get(a, k), b_shr);
    }
    vect_headroom(a)
}

pub fn shl<T: Mantissa>(a: &mut [T], b: Operand<'_, T>, b_shl: LeftShift) -> Headroom {
    shr(a, b, -b_shl)
}

/// `a = (b >> b_shr) + (c >> c_shr)`, saturating.
pub fn add<T: Mantissa>(
    a: &mut [T],
    b: Operand<'_, T>,
    c: Operand<'_, T>,
    b_shr: RightShift,
    c_shr: RightShift,
) -> Headroom {
    debug_check(ALIASING, a.len(), &[b, c]);
    for k in 0..a.len() {
        let x = ashr(b.get(a, k), b_shr).to_i64();
        let y = ashr(c.get(a, k), c_shr).to_i64();
        a[k] = T::saturate(x + y);
    }
    vect_headroom(a)
}

/// `a = (b >> b_shr) - (c >> c_shr)`, saturating.
pub fn sub<T: Mantissa>(
    a: &mut [T],
    b: Operand<'_, T>,
    c: Operand<'_, T>,
    b_shr: RightShift,
    c_shr: RightShift,
) -> Headroom {
    debug_check(ALIASING, a.len(), &[b, c]);
    for k in 0..a.len() {
        let x = ashr(b.get(a, k), b_shr).to_i64();
        let y = ashr(c.get(a, k), c_shr).to_i64();
        a[k] = T::saturate(x - y);
    }
    vect_headroom(a)
}

/// `a = (b >> b_shr) + c`, where `c` is already at the output exponent.
pub fn add_scalar<T: Mantissa>(a: &mut [T], b: Operand<'_, T>, c: T, b_shr: RightShift) -> Headroom {
    debug_check(ALIASING, a.len(), &[b]);
    for k in 0..a.len() {
        let x = ashr(b.get(a, k), b_shr).to_i64();
        a[k] = T::saturate(x + c.to_i64());
    }
    vect_headroom(a)
}

pub fn abs<T: Mantissa>(a: &mut [T], b: Operand<'_, T>) -> Headroom {
    debug_check(ALIASING, a.len(), &[b]);
    for k in 0..a.len() {
        a[k] = sat_abs(b.get(a, k));
    }
    vect_headroom(a)
}

/// Negative elements become zero.
pub fn rect<T: Mantissa>(a: &mut [T], b: Operand<'_, T>) -> Headroom {
    debug_check(ALIASING, a.len(), &[b]);
    for k in 0..a.len() {
        a[k] = b.get(a, k).max(T::ZERO);
    }
    vect_headroom(a)
}

/// Clamps `b >> b_shr` to the aligned bounds of `plan`.
pub fn clip<T: Mantissa>(a: &mut [T], b: Operand<'_, T>, plan: &ClipPlan<T>) -> Headroom {
    debug_check(ALIASING, a.len(), &[b]);
    for k in 0..a.len() {
        let x = ashr(b.get(a, k), plan.b_shr);
        a[k] = if x < plan.lower {
            plan.lower
        } else if x > plan.upper {
            plan.upper
        } else {
            x
        };
    }
    vect_headroom(a)
}

/// Elementwise `max(b >> b_shr, c >> c_shr)`.
pub fn max<T: Mantissa>(
    a: &mut [T],
    b: Operand<'_, T>,
    c: Operand<'_, T>,
    b_shr: RightShift,
    c_shr: RightShift,
) -> Headroom {
    debug_check(EXTREMUM_ALIASING, a.len(), &[b, c]);
    for k in 0..a.len() {
        let x = ashr(b.get(a, k), b_shr);
        let y = ashr(c.get(a, k), c_shr);
        a[k] = x.max(y);
    }
    vect_headroom(a)
}

/// Elementwise `min(b >> b_shr, c >> c_shr)`.
pub fn min<T: Mantissa>(
    a: &mut [T],
    b: Operand<'_, T>,
    c: Operand<'_, T>,
    b_shr: RightShift,
    c_shr: RightShift,
) -> Headroom {
    debug_check(EXTREMUM_ALIASING, a.len(), &[b, c]);
    for k in 0..a.len() {
        let x = ashr(b.get(a, k), b_shr);
        let y = ashr(c.get(a, k), c_shr);
        a[k] = x.min(y);
    }
    vect_headroom(a)
}
