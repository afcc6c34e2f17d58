// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Complex mantissas and complex floating scalars.

use serde::{Deserialize, Serialize};

use super::scalar::{abs_f64, ldexp, mantissa_at, to_mantissa};
use super::Exponent;

/// A complex mantissa pair. Both channels always share one exponent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

pub type ComplexS16 = Complex<i16>;
pub type ComplexS32 = Complex<i32>;

impl<T> Complex<T> {
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

/// A complex scalar `(re + i*im) * 2^exp`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FloatComplex<T> {
    pub mant: Complex<T>,
    pub exp: Exponent,
}

pub type FloatComplexS16 = FloatComplex<i16>;
pub type FloatComplexS32 = FloatComplex<i32>;
pub type FloatComplexS64 = FloatComplex<i64>;

impl<T> FloatComplex<T> {
    pub const fn new(re: T, im: T, exp: Exponent) -> Self {
        Self {
            mant: Complex { re, im },
            exp,
        }
    }
}

macro_rules! impl_float_complex_f64 {
    ($($t:ty),*) => {$(
        impl FloatComplex<$t> {
            /// Nearest value to `re + i*im`. The larger channel gets zero headroom.
            pub fn from_f64(re: f64, im: f64) -> Self {
                let larger = if abs_f64(re) >= abs_f64(im) { re } else { im };
                let (_, exp) = to_mantissa(larger, <$t>::BITS);
                Self::new(
                    mantissa_at(re, exp, <$t>::BITS) as $t,
                    mantissa_at(im, exp, <$t>::BITS) as $t,
                    exp,
                )
            }

            pub fn to_f64(self) -> (f64, f64) {
                (
                    ldexp(self.mant.re as f64, self.exp),
                    ldexp(self.mant.im as f64, self.exp),
                )
            }
        }
    )*};
}

impl_float_complex_f64!(i16, i32, i64);
