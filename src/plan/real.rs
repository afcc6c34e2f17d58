// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Planners for real-valued operations.

use super::{ceil_log2, ClipPlan, InversePlan, MaccPlan, MulPlan, PairPlan, Planner, UnaryPlan};
use crate::fxp::ops::{ashr, sat_abs, shr_floor};
use crate::fxp::Mantissa;
use crate::types::{Exponent, Headroom};

/// Add/subtract, and add of a scalar (pass the scalar's headroom as `c_hr`).
///
/// The output exponent is one above the larger of the operands' minimum
/// exponents. When those minimums tie, two extreme negative operands could
/// still overflow by one unit, so one more bit is taken unless
/// `allow_saturation` is set.
pub fn add(
    b_exp: Exponent,
    c_exp: Exponent,
    b_hr: Headroom,
    c_hr: Headroom,
    allow_saturation: bool,
) -> PairPlan {
    let b_min = b_exp - b_hr as i32;
    let c_min = c_exp - c_hr as i32;

    let mut a_exp = b_min.max(c_min) + 1;
    if b_min == c_min && !allow_saturation {
        a_exp += 1;
    }

    PairPlan {
        a_exp,
        b_shr: a_exp - b_exp,
        c_shr: a_exp - c_exp,
    }
}

/// Elementwise 16-bit multiply. The product of two extreme operands with
/// combined headroom `H` fits 16 bits after a right shift of `16 - H`.
pub fn mul_s16(b_exp: Exponent, c_exp: Exponent, b_hr: Headroom, c_hr: Headroom) -> MulPlan {
    let a_shr = (16 - (b_hr + c_hr) as i32).max(0);
    MulPlan {
        a_exp: b_exp + c_exp + a_shr,
        b_shr: 0,
        c_shr: 0,
        p_shr: a_shr,
    }
}

/// Elementwise 32-bit multiply with an implicit 30-bit product shift.
///
/// Both operands are normalized to one bit of headroom. When an operand has
/// no headroom at all, the whole adjustment is made on the other one.
pub fn mul_s32(b_exp: Exponent, c_exp: Exponent, b_hr: Headroom, c_hr: Headroom) -> MulPlan {
    let (b_hr, c_hr) = (b_hr as i32, c_hr as i32);
    let total_hr = b_hr + c_hr;

    let (b_shr, c_shr) = if total_hr == 0 {
        (1, 1)
    } else if total_hr == 1 {
        if b_hr == 0 {
            (1, 0)
        } else {
            (0, 1)
        }
    } else if b_hr == 0 {
        (0, 2 - total_hr)
    } else if c_hr == 0 {
        (2 - total_hr, 0)
    } else {
        (1 - b_hr, 1 - c_hr)
    };

    MulPlan {
        a_exp: b_exp + c_exp + b_shr + c_shr + 30,
        b_shr,
        c_shr,
        p_shr: 30,
    }
}

/// 16-bit vector times scalar.
pub fn scale_s16(
    b_exp: Exponent,
    c_exp: Exponent,
    b_hr: Headroom,
    c_hr: Headroom,
    allow_saturation: bool,
) -> MulPlan {
    let base = if allow_saturation { 15 } else { 16 };
    let a_shr = (base - (b_hr + c_hr) as i32).max(0);
    MulPlan {
        a_exp: b_exp + c_exp + a_shr,
        b_shr: 0,
        c_shr: 0,
        p_shr: a_shr,
    }
}

/// Extra bit of growth to leave for a length that can saturate only at the
/// corner case (power-of-two lengths) when saturation avoidance is on.
fn corner_bit(length: usize, allow_saturation: bool) -> i32 {
    if allow_saturation || !length.is_power_of_two() {
        1
    } else {
        0
    }
}

/// 16-bit dot product into a 32-bit accumulator.
///
/// Data-independent: the shifts guarantee no overflow for any input of this
/// length and headroom. Operands are never shifted left.
pub fn dot_s16(
    b_exp: Exponent,
    c_exp: Exponent,
    b_hr: Headroom,
    c_hr: Headroom,
    length: usize,
    allow_saturation: bool,
) -> PairPlan {
    let total_shr =
        ceil_log2(length) - corner_bit(length, allow_saturation) - (b_hr + c_hr) as i32;

    let (b_shr, c_shr) = if total_shr <= 0 {
        (0, 0)
    } else {
        let b_shr = total_shr >> 1;
        (b_shr, total_shr - b_shr)
    };

    PairPlan {
        a_exp: b_exp + c_exp + b_shr + c_shr,
        b_shr,
        c_shr,
    }
}

/// 32-bit dot product into a 40-bit accumulator, each product shifted right
/// by 30 before accumulation.
///
/// Operand headroom is removed first; whatever growth the length still
/// requires is then taken back from the headroom, `b` first, and finally
/// split between the operands.
pub fn dot_s32(
    b_exp: Exponent,
    c_exp: Exponent,
    b_hr: Headroom,
    c_hr: Headroom,
    length: usize,
    allow_saturation: bool,
) -> PairPlan {
    let (b_hr, c_hr) = (b_hr as i32, c_hr as i32);
    let total_hr = b_hr + c_hr;
    let total_shr = ceil_log2(length) - corner_bit(length, allow_saturation) - 6;

    let (b_shr, c_shr) = if total_shr < 0 {
        (-b_hr, -c_hr)
    } else if total_shr >= total_hr {
        let rest = total_shr - total_hr;
        (rest >> 1, rest - (rest >> 1))
    } else {
        let from_b = b_hr.min(total_shr);
        (from_b - b_hr, total_shr - from_b - c_hr)
    };

    PairPlan {
        a_exp: b_exp + c_exp + b_shr + c_shr + 30,
        b_shr,
        c_shr,
    }
}

/// 16-bit sum of squares: the dot rule with both operands equal, using one
/// shared shift so each term is a true square.
pub fn energy_s16(
    b_exp: Exponent,
    b_hr: Headroom,
    length: usize,
    allow_saturation: bool,
) -> UnaryPlan {
    let total_shr =
        ceil_log2(length) - corner_bit(length, allow_saturation) - 2 * b_hr as i32;
    let b_shr = if total_shr <= 0 { 0 } else { (total_shr + 1) >> 1 };
    UnaryPlan {
        a_exp: 2 * (b_exp + b_shr),
        b_shr,
    }
}

/// 32-bit sum of squares into a 40-bit accumulator.
///
/// After normalization each square is at most `2^32`, so a length of
/// `2^7` (`2^6` when avoiding saturation) fits without further shifting.
pub fn energy_s32(b_exp: Exponent, b_hr: Headroom, length: usize, allow_saturation: bool) -> UnaryPlan {
    let spare = if allow_saturation { 7 } else { 6 };
    let growth = ceil_log2(length) - spare;
    let extra = if growth <= 0 { 0 } else { (growth + 1) >> 1 };
    let b_shr = extra - b_hr as i32;
    UnaryPlan {
        a_exp: 2 * (b_exp + b_shr) + 30,
        b_shr,
    }
}

/// Sum (or sum of absolute values) into the width's accumulator.
pub fn sum<T: Mantissa>(b_exp: Exponent, b_hr: Headroom, length: usize) -> UnaryPlan {
    let acc_growth = (T::ACC_BITS - T::BITS + b_hr) as i32;
    let b_shr = (ceil_log2(length) - acc_growth).max(0);
    UnaryPlan {
        a_exp: b_exp + b_shr,
        b_shr,
    }
}

/// Square root: normalize, then make the exponent even so it can be halved.
pub fn sqrt<T: Mantissa>(b_exp: Exponent, b_hr: Headroom) -> UnaryPlan {
    let mut b_shr = -(b_hr as i32);
    if (b_exp + b_shr) & 1 != 0 {
        b_shr += 1;
    }
    UnaryPlan {
        a_exp: (b_exp + b_shr - (T::BITS as i32 - 2)) >> 1,
        b_shr,
    }
}

/// Elementwise reciprocal. The numerator is chosen so the smallest-magnitude
/// divisor yields a quotient that still fits the element width.
pub fn inverse<T: Planner>(b: &[T], b_exp: Exponent) -> InversePlan {
    let min_abs = b.iter().map(|&x| sat_abs(x)).min().unwrap_or(T::MAX);
    let scale = T::INVERSE_SCALE - min_abs.headroom();
    InversePlan {
        a_exp: -b_exp - scale as i32,
        scale,
    }
}

/// Aligns clip bounds to the vector's exponent.
///
/// Left-shifted bounds saturate. Right-shifted bounds round inward: the upper
/// bound down, the lower bound up. When a bound saturates past the whole
/// representable range the output is a constant and `a_exp` is the bounds'
/// own exponent.
pub fn clip<T: Mantissa>(
    b_exp: Exponent,
    lower: T,
    upper: T,
    bound_exp: Exponent,
) -> ClipPlan<T> {
    let bound_shr = b_exp - bound_exp;

    let (lower_aligned, upper_aligned) = if bound_shr < 0 {
        (ashr(lower, bound_shr), ashr(upper, bound_shr))
    } else {
        let s = bound_shr as u32;
        let up = shr_floor(upper.to_i64(), s);
        let low = lower.to_i64();
        let low = if s >= 63 {
            (low > 0) as i64
        } else {
            (low + (1i64 << s) - 1) >> s
        };
        (T::saturate(low), T::saturate(up))
    };

    let a_exp = if upper_aligned <= T::MIN || lower_aligned >= T::MAX {
        bound_exp
    } else {
        b_exp
    };

    ClipPlan {
        a_exp,
        b_shr: 0,
        lower: lower_aligned,
        upper: upper_aligned,
    }
}

/// Elementwise max/min of two vectors: both operands are brought to the larger
/// of their minimum exponents plus `extra_hr`.
pub fn two_vec(
    b_exp: Exponent,
    c_exp: Exponent,
    b_hr: Headroom,
    c_hr: Headroom,
    extra_hr: Headroom,
) -> PairPlan {
    let b_min = b_exp - b_hr as i32 + extra_hr as i32;
    let c_min = c_exp - c_hr as i32 + extra_hr as i32;
    let a_exp = b_min.max(c_min);
    PairPlan {
        a_exp,
        b_shr: a_exp - b_exp,
        c_shr: a_exp - c_exp,
    }
}

/// 16-bit `acc ± b * c`: the product is shifted to one bit of headroom and
/// the accumulator is brought to the same exponent.
pub fn macc_s16(
    acc_exp: Exponent,
    b_exp: Exponent,
    c_exp: Exponent,
    acc_hr: Headroom,
    b_hr: Headroom,
    c_hr: Headroom,
) -> MaccPlan {
    let bc_hr = (b_hr + c_hr) as i32;
    let bc_exp = b_exp + c_exp - bc_hr + 16;
    let acc_min = acc_exp - acc_hr as i32 + 1;
    let new_exp = bc_exp.max(acc_min);

    MaccPlan {
        acc_exp: new_exp,
        acc_shr: new_exp - acc_exp,
        bc: MulPlan {
            a_exp: new_exp,
            b_shr: 0,
            c_shr: 0,
            p_shr: 16 - bc_hr + (new_exp - bc_exp),
        },
    }
}

/// 32-bit `acc ± b * c`.
pub fn macc_s32(
    acc_exp: Exponent,
    b_exp: Exponent,
    c_exp: Exponent,
    acc_hr: Headroom,
    b_hr: Headroom,
    c_hr: Headroom,
) -> MaccPlan {
    let (b_hr, c_hr) = (b_hr as i32, c_hr as i32);
    let p_exp = b_exp + c_exp - b_hr - c_hr + 32;
    let acc_min = acc_exp - acc_hr as i32 + 1;
    let new_exp = p_exp.max(acc_min);
    let p_shr = new_exp - p_exp;

    MaccPlan {
        acc_exp: new_exp,
        acc_shr: new_exp - acc_exp,
        bc: MulPlan {
            a_exp: new_exp,
            b_shr: 1 - b_hr + (p_shr >> 1),
            c_shr: 1 - c_hr + (p_shr - (p_shr >> 1)),
            p_shr: 30,
        },
    }
}

/// 32-bit to 16-bit narrowing, optionally keeping one guard bit.
pub fn narrow_s32_to_s16(b_exp: Exponent, b_hr: Headroom, keep_headroom: bool) -> UnaryPlan {
    let b_shr = 16 - b_hr as i32 + keep_headroom as i32;
    UnaryPlan {
        a_exp: b_exp + b_shr,
        b_shr,
    }
}

/// 16-bit to 32-bit widening: eight bits into the new low half.
pub fn widen_s16_to_s32(b_exp: Exponent) -> UnaryPlan {
    UnaryPlan {
        a_exp: b_exp - 8,
        b_shr: -8,
    }
}
