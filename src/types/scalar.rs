// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Floating scalars: a single mantissa with its own exponent.

use serde::{Deserialize, Serialize};

use super::Exponent;

/// A scalar `mant * 2^exp`.
///
/// Used for scalar operands (multipliers, clip bounds) and for the wide
/// results of reductions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Float<T> {
    pub mant: T,
    pub exp: Exponent,
}

pub type FloatS16 = Float<i16>;
pub type FloatS32 = Float<i32>;
pub type FloatS64 = Float<i64>;

impl<T> Float<T> {
    pub const fn new(mant: T, exp: Exponent) -> Self {
        Self { mant, exp }
    }
}

macro_rules! impl_float_f64 {
    ($($t:ty),*) => {$(
        impl Float<$t> {
            /// Nearest value to `x` whose mantissa has no headroom.
            ///
            /// NaN maps to zero and infinities clamp to the largest finite `f64`.
            pub fn from_f64(x: f64) -> Self {
                let (mant, exp) = to_mantissa(x, <$t>::BITS);
                Self { mant: mant as $t, exp }
            }

            pub fn to_f64(self) -> f64 {
                ldexp(self.mant as f64, self.exp)
            }
        }
    )*};
}

impl_float_f64!(i16, i32, i64);

/// Smallest `k` such that `|x| < 2^k`, for finite nonzero `x`.
pub(crate) fn magnitude_exponent(x: f64) -> Exponent {
    let bits = x.to_bits();
    let biased = ((bits >> 52) & 0x7FF) as i32;
    if biased != 0 {
        biased - 1022
    } else {
        // Subnormal: value is frac * 2^-1074.
        let frac = bits & ((1u64 << 52) - 1);
        (64 - frac.leading_zeros()) as i32 - 1074
    }
}

fn pow2(e: i32) -> f64 {
    f64::from_bits(((e + 1023) as u64) << 52)
}

/// `x * 2^e` using only bit manipulation.
pub(crate) fn ldexp(mut x: f64, mut e: i32) -> f64 {
    while e > 1023 {
        if x == 0.0 || x.is_infinite() {
            return x;
        }
        x *= pow2(1023);
        e -= 1023;
    }
    while e < -1022 {
        if x == 0.0 {
            return x;
        }
        x *= pow2(-1022);
        e += 1022;
    }
    x * pow2(e)
}

pub(crate) fn round_to_i128(y: f64) -> i128 {
    if y >= 0.0 {
        (y + 0.5) as i128
    } else {
        (y - 0.5) as i128
    }
}

pub(crate) fn sanitize(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(-f64::MAX, f64::MAX)
    }
}

pub(crate) fn abs_f64(x: f64) -> f64 {
    if x < 0.0 {
        -x
    } else {
        x
    }
}

/// Rounds `x * 2^-exp` to an integer within the symmetric `bits`-wide range.
pub(crate) fn mantissa_at(x: f64, exp: Exponent, bits: u32) -> i64 {
    let max = (1i128 << (bits - 1)) - 1;
    round_to_i128(ldexp(sanitize(x), -exp)).clamp(-max, max) as i64
}

/// Splits `x` into a `bits`-wide mantissa with zero headroom and its exponent.
pub(crate) fn to_mantissa(x: f64, bits: u32) -> (i64, Exponent) {
    let x = sanitize(x);
    if x == 0.0 {
        return (0, 0);
    }
    let max = (1i128 << (bits - 1)) - 1;
    let mut exp = magnitude_exponent(x) - (bits as i32 - 1);
    let mut mant = round_to_i128(ldexp(x, -exp));
    if mant.abs() > max {
        exp += 1;
        mant = round_to_i128(ldexp(x, -exp));
    }
    (mant as i64, exp)
}
