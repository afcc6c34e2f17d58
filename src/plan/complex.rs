// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Planners for complex-valued operations.
//!
//! The real and imaginary channels always share one shift, so a complex
//! vector keeps a single exponent. Add, subtract, sum and clip-free ops reuse
//! the real rules in [`super::real`].

use super::{MaccPlan, MulPlan, UnaryPlan};
use crate::types::{Exponent, Headroom};

/// 16-bit complex multiply, conjugate multiply and complex scale.
///
/// The worst case is `(-2^15 * -2^15) + (-2^15 * -2^15)` in one channel,
/// one bit more than a real product.
pub fn mul_s16(
    b_exp: Exponent,
    c_exp: Exponent,
    b_hr: Headroom,
    c_hr: Headroom,
    allow_saturation: bool,
) -> MulPlan {
    let base = if allow_saturation { 16 } else { 17 };
    let sat = (base - (b_hr + c_hr) as i32).max(0);
    MulPlan {
        a_exp: b_exp + c_exp + sat,
        b_shr: 0,
        c_shr: 0,
        p_shr: sat,
    }
}

/// 16-bit complex vector times real vector.
pub fn real_mul_s16(
    b_exp: Exponent,
    c_exp: Exponent,
    b_hr: Headroom,
    c_hr: Headroom,
    allow_saturation: bool,
) -> MulPlan {
    let mut sat = 15 - (b_hr + c_hr) as i32;
    if !allow_saturation {
        sat += 1;
    }
    let sat = sat.max(0);
    MulPlan {
        a_exp: b_exp + c_exp + sat,
        b_shr: 0,
        c_shr: 0,
        p_shr: sat,
    }
}

/// 32-bit complex vector times real vector.
///
/// Headroom is removed from both operands, then the remaining right shift is
/// taken first from operands that had headroom to spare, where it is lossless.
pub fn real_mul_s32(
    b_exp: Exponent,
    c_exp: Exponent,
    b_hr: Headroom,
    c_hr: Headroom,
    allow_saturation: bool,
) -> MulPlan {
    let (b_hr, c_hr) = (b_hr as i32, c_hr as i32);
    let mut rest = if allow_saturation { 1 } else { 2 };
    let mut b_shr = -b_hr;
    let mut c_shr = -c_hr;

    let from_b = b_hr.min(rest);
    b_shr += from_b;
    rest -= from_b;
    let from_c = c_hr.min(rest);
    c_shr += from_c;
    rest -= from_c;

    b_shr += rest >> 1;
    c_shr += rest - (rest >> 1);

    MulPlan {
        a_exp: b_exp + c_exp + b_shr + c_shr + 30,
        b_shr,
        c_shr,
        p_shr: 30,
    }
}

/// 32-bit complex multiply and conjugate multiply.
pub fn mul_s32(
    b_exp: Exponent,
    c_exp: Exponent,
    b_hr: Headroom,
    c_hr: Headroom,
    allow_saturation: bool,
) -> MulPlan {
    let (b_hr, c_hr) = (b_hr as i32, c_hr as i32);
    let base = if allow_saturation { 2 } else { 3 };
    let total_shr = base - (b_hr + c_hr);

    let b_shr = if total_shr < 0 {
        total_shr.max(-b_hr)
    } else if b_hr <= c_hr {
        total_shr - (total_shr >> 1)
    } else {
        total_shr >> 1
    };
    let c_shr = total_shr - b_shr;

    MulPlan {
        a_exp: b_exp + c_exp + b_shr + c_shr + 30,
        b_shr,
        c_shr,
        p_shr: 30,
    }
}

/// 32-bit complex vector times complex scalar. Any left shift the vector
/// cannot absorb is moved onto the scalar.
pub fn scale_s32(
    b_exp: Exponent,
    c_exp: Exponent,
    b_hr: Headroom,
    c_hr: Headroom,
    allow_saturation: bool,
) -> MulPlan {
    let base = if allow_saturation { 2 } else { 3 };
    let mut b_shr = base - (b_hr + c_hr) as i32;
    let mut c_shr = 0;
    if b_shr < -(b_hr as i32) {
        c_shr = b_shr + b_hr as i32;
        b_shr = -(b_hr as i32);
    }

    MulPlan {
        a_exp: b_exp + c_exp + b_shr + c_shr + 30,
        b_shr,
        c_shr,
        p_shr: 30,
    }
}

/// 16-bit `re^2 + im^2`.
pub fn squared_mag_s16(b_exp: Exponent, b_hr: Headroom, allow_saturation: bool) -> MulPlan {
    let base = if allow_saturation { 16 } else { 17 };
    let sat = (base - 2 * b_hr as i32).max(0);
    MulPlan {
        a_exp: 2 * b_exp + sat,
        b_shr: 0,
        c_shr: 0,
        p_shr: sat,
    }
}

/// 32-bit `re^2 + im^2`: the multiply rule with both operands equal.
pub fn squared_mag_s32(b_exp: Exponent, b_hr: Headroom, allow_saturation: bool) -> MulPlan {
    let base = if allow_saturation { 1 } else { 2 };
    let b_shr = base - b_hr as i32;
    MulPlan {
        a_exp: 2 * (b_exp + b_shr) + 30,
        b_shr,
        c_shr: b_shr,
        p_shr: 30,
    }
}

/// Magnitude by rotation: one bit of headroom keeps the rotated real part
/// (up to `sqrt(2)` times the larger channel) in range. This holds even when
/// saturation is allowed elsewhere, since near-diagonal inputs would otherwise
/// clip on the first row.
pub fn mag(b_exp: Exponent, b_hr: Headroom) -> UnaryPlan {
    let b_shr = 1 - b_hr as i32;
    UnaryPlan {
        a_exp: b_exp + b_shr,
        b_shr,
    }
}

/// 16-bit complex `acc ± b * c` (or `b * conj(c)`): the real rule with one
/// more bit of product shift for the two partial products in each channel.
pub fn macc_s16(
    acc_exp: Exponent,
    b_exp: Exponent,
    c_exp: Exponent,
    acc_hr: Headroom,
    b_hr: Headroom,
    c_hr: Headroom,
) -> MaccPlan {
    let bc_hr = (b_hr + c_hr) as i32;
    let bc_exp = b_exp + c_exp - bc_hr + 17;
    let acc_min = acc_exp - acc_hr as i32 + 1;
    let new_exp = bc_exp.max(acc_min);

    MaccPlan {
        acc_exp: new_exp,
        acc_shr: new_exp - acc_exp,
        bc: MulPlan {
            a_exp: new_exp,
            b_shr: 0,
            c_shr: 0,
            p_shr: 17 - bc_hr + (new_exp - bc_exp),
        },
    }
}

/// 32-bit complex `acc ± b * c`. Three bits of product shift leave the
/// product one bit of headroom; `c` takes two of them.
pub fn macc_s32(
    acc_exp: Exponent,
    b_exp: Exponent,
    c_exp: Exponent,
    acc_hr: Headroom,
    b_hr: Headroom,
    c_hr: Headroom,
) -> MaccPlan {
    let (b_hr, c_hr) = (b_hr as i32, c_hr as i32);
    let p_exp = b_exp + c_exp - b_hr - c_hr + 33;
    let acc_min = acc_exp - acc_hr as i32 + 1;
    let new_exp = p_exp.max(acc_min);
    let p_shr = new_exp - p_exp;

    MaccPlan {
        acc_exp: new_exp,
        acc_shr: new_exp - acc_exp,
        bc: MulPlan {
            a_exp: new_exp,
            b_shr: 1 - b_hr + (p_shr >> 1),
            c_shr: 2 - c_hr + (p_shr - (p_shr >> 1)),
            p_shr: 30,
        },
    }
}
