// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Exponent/shift planners.
//!
//! A planner takes operand exponents and headrooms (and sometimes the vector
//! length) and returns the output exponent together with the shifts the
//! kernel must apply. Planners are pure and never look at mantissa data,
//! with the single exception of [`real::inverse`], whose output range depends
//! on the smallest divisor.

pub mod complex;
pub mod real;

use crate::fxp::Mantissa;
use crate::types::{Exponent, Headroom, RightShift};

/// Plan for a two-operand elementwise op or a dot product.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairPlan {
    pub a_exp: Exponent,
    pub b_shr: RightShift,
    pub c_shr: RightShift,
}

/// Plan for a single-operand op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnaryPlan {
    pub a_exp: Exponent,
    pub b_shr: RightShift,
}

/// Plan for a multiply: operands are shifted by `b_shr`/`c_shr`, then the
/// product is shifted right by `p_shr` with rounding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MulPlan {
    pub a_exp: Exponent,
    pub b_shr: RightShift,
    pub c_shr: RightShift,
    pub p_shr: RightShift,
}

/// Plan for `acc ± b * c`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaccPlan {
    pub acc_exp: Exponent,
    pub acc_shr: RightShift,
    pub bc: MulPlan,
}

/// Plan for the elementwise reciprocal `2^scale / b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InversePlan {
    pub a_exp: Exponent,
    pub scale: u32,
}

/// Plan for clipping: bounds already aligned to the working exponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClipPlan<T> {
    pub a_exp: Exponent,
    pub b_shr: RightShift,
    pub lower: T,
    pub upper: T,
}

/// `ceil(log2(n))`, with 0 for `n <= 1`.
pub fn ceil_log2(n: usize) -> i32 {
    if n <= 1 {
        0
    } else {
        (usize::BITS - (n - 1).leading_zeros()) as i32
    }
}

/// Width-specific planning rules.
///
/// Rules shared by every width (add, sum, sqrt, clip, conversion, magnitude)
/// are free functions in [`real`] and [`complex`].
pub trait Planner: Mantissa {
    /// Numerator exponent of the elementwise reciprocal before headroom.
    const INVERSE_SCALE: u32;

    fn plan_mul(b_exp: Exponent, c_exp: Exponent, b_hr: Headroom, c_hr: Headroom) -> MulPlan;

    fn plan_scale(
        b_exp: Exponent,
        c_exp: Exponent,
        b_hr: Headroom,
        c_hr: Headroom,
        allow_saturation: bool,
    ) -> MulPlan;

    fn plan_dot(
        b_exp: Exponent,
        c_exp: Exponent,
        b_hr: Headroom,
        c_hr: Headroom,
        length: usize,
        allow_saturation: bool,
    ) -> PairPlan;

    fn plan_energy(b_exp: Exponent, b_hr: Headroom, length: usize, allow_saturation: bool)
        -> UnaryPlan;

    fn plan_macc(
        acc_exp: Exponent,
        b_exp: Exponent,
        c_exp: Exponent,
        acc_hr: Headroom,
        b_hr: Headroom,
        c_hr: Headroom,
    ) -> MaccPlan;

    fn plan_complex_mul(
        b_exp: Exponent,
        c_exp: Exponent,
        b_hr: Headroom,
        c_hr: Headroom,
        allow_saturation: bool,
    ) -> MulPlan;

    fn plan_complex_real_mul(
        b_exp: Exponent,
        c_exp: Exponent,
        b_hr: Headroom,
        c_hr: Headroom,
        allow_saturation: bool,
    ) -> MulPlan;

    fn plan_complex_scale(
        b_exp: Exponent,
        c_exp: Exponent,
        b_hr: Headroom,
        c_hr: Headroom,
        allow_saturation: bool,
    ) -> MulPlan;

    fn plan_squared_mag(b_exp: Exponent, b_hr: Headroom, allow_saturation: bool) -> MulPlan;

    fn plan_complex_macc(
        acc_exp: Exponent,
        b_exp: Exponent,
        c_exp: Exponent,
        acc_hr: Headroom,
        b_hr: Headroom,
        c_hr: Headroom,
    ) -> MaccPlan;
}

impl Planner for i16 {
    const INVERSE_SCALE: u32 = 28;

    fn plan_mul(b_exp: Exponent, c_exp: Exponent, b_hr: Headroom, c_hr: Headroom) -> MulPlan {
        real::mul_s16(b_exp, c_exp, b_hr, c_hr)
    }

    fn plan_scale(
        b_exp: Exponent,
        c_exp: Exponent,
        b_hr: Headroom,
        c_hr: Headroom,
        allow_saturation: bool,
    ) -> MulPlan {
        real::scale_s16(b_exp, c_exp, b_hr, c_hr, allow_saturation)
    }

    fn plan_dot(
        b_exp: Exponent,
        c_exp: Exponent,
        b_hr: Headroom,
        c_hr: Headroom,
        length: usize,
        allow_saturation: bool,
    ) -> PairPlan {
        real::dot_s16(b_exp, c_exp, b_hr, c_hr, length, allow_saturation)
    }

    fn plan_energy(
        b_exp: Exponent,
        b_hr: Headroom,
        length: usize,
        allow_saturation: bool,
    ) -> UnaryPlan {
        real::energy_s16(b_exp, b_hr, length, allow_saturation)
    }

    fn plan_macc(
        acc_exp: Exponent,
        b_exp: Exponent,
        c_exp: Exponent,
        acc_hr: Headroom,
        b_hr: Headroom,
        c_hr: Headroom,
    ) -> MaccPlan {
        real::macc_s16(acc_exp, b_exp, c_exp, acc_hr, b_hr, c_hr)
    }

    fn plan_complex_mul(
        b_exp: Exponent,
        c_exp: Exponent,
        b_hr: Headroom,
        c_hr: Headroom,
        allow_saturation: bool,
    ) -> MulPlan {
        complex::mul_s16(b_exp, c_exp, b_hr, c_hr, allow_saturation)
    }

    fn plan_complex_real_mul(
        b_exp: Exponent,
        c_exp: Exponent,
        b_hr: Headroom,
        c_hr: Headroom,
        allow_saturation: bool,
    ) -> MulPlan {
        complex::real_mul_s16(b_exp, c_exp, b_hr, c_hr, allow_saturation)
    }

    fn plan_complex_scale(
        b_exp: Exponent,
        c_exp: Exponent,
        b_hr: Headroom,
        c_hr: Headroom,
        allow_saturation: bool,
    ) -> MulPlan {
        complex::mul_s16(b_exp, c_exp, b_hr, c_hr, allow_saturation)
    }

    fn plan_squared_mag(b_exp: Exponent, b_hr: Headroom, allow_saturation: bool) -> MulPlan {
        complex::squared_mag_s16(b_exp, b_hr, allow_saturation)
    }

    fn plan_complex_macc(
        acc_exp: Exponent,
        b_exp: Exponent,
        c_exp: Exponent,
        acc_hr: Headroom,
        b_hr: Headroom,
        c_hr: Headroom,
    ) -> MaccPlan {
        complex::macc_s16(acc_exp, b_exp, c_exp, acc_hr, b_hr, c_hr)
    }
}

impl Planner for i32 {
    const INVERSE_SCALE: u32 = 60;

    fn plan_mul(b_exp: Exponent, c_exp: Exponent, b_hr: Headroom, c_hr: Headroom) -> MulPlan {
        real::mul_s32(b_exp, c_exp, b_hr, c_hr)
    }

    fn plan_scale(
        b_exp: Exponent,
        c_exp: Exponent,
        b_hr: Headroom,
        c_hr: Headroom,
        _allow_saturation: bool,
    ) -> MulPlan {
        real::mul_s32(b_exp, c_exp, b_hr, c_hr)
    }

    fn plan_dot(
        b_exp: Exponent,
        c_exp: Exponent,
        b_hr: Headroom,
        c_hr: Headroom,
        length: usize,
        allow_saturation: bool,
    ) -> PairPlan {
        real::dot_s32(b_exp, c_exp, b_hr, c_hr, length, allow_saturation)
    }

    fn plan_energy(
        b_exp: Exponent,
        b_hr: Headroom,
        length: usize,
        allow_saturation: bool,
    ) -> UnaryPlan {
        real::energy_s32(b_exp, b_hr, length, allow_saturation)
    }

    fn plan_macc(
        acc_exp: Exponent,
        b_exp: Exponent,
        c_exp: Exponent,
        acc_hr: Headroom,
        b_hr: Headroom,
        c_hr: Headroom,
    ) -> MaccPlan {
        real::macc_s32(acc_exp, b_exp, c_exp, acc_hr, b_hr, c_hr)
    }

    fn plan_complex_mul(
        b_exp: Exponent,
        c_exp: Exponent,
        b_hr: Headroom,
        c_hr: Headroom,
        allow_saturation: bool,
    ) -> MulPlan {
        complex::mul_s32(b_exp, c_exp, b_hr, c_hr, allow_saturation)
    }

    fn plan_complex_real_mul(
        b_exp: Exponent,
        c_exp: Exponent,
        b_hr: Headroom,
        c_hr: Headroom,
        allow_saturation: bool,
    ) -> MulPlan {
        complex::real_mul_s32(b_exp, c_exp, b_hr, c_hr, allow_saturation)
    }

    fn plan_complex_scale(
        b_exp: Exponent,
        c_exp: Exponent,
        b_hr: Headroom,
        c_hr: Headroom,
        allow_saturation: bool,
    ) -> MulPlan {
        complex::scale_s32(b_exp, c_exp, b_hr, c_hr, allow_saturation)
    }

    fn plan_squared_mag(b_exp: Exponent, b_hr: Headroom, allow_saturation: bool) -> MulPlan {
        complex::squared_mag_s32(b_exp, b_hr, allow_saturation)
    }

    fn plan_complex_macc(
        acc_exp: Exponent,
        b_exp: Exponent,
        c_exp: Exponent,
        acc_hr: Headroom,
        b_hr: Headroom,
        c_hr: Headroom,
    ) -> MaccPlan {
        complex::macc_s32(acc_exp, b_exp, c_exp, acc_hr, b_hr, c_hr)
    }
}
