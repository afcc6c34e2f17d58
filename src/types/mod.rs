// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Scalar value types and the integer aliases used for exponents and shifts.

pub mod complex;
pub mod scalar;

pub use complex::{
    Complex, ComplexS16, ComplexS32, FloatComplex, FloatComplexS16, FloatComplexS32,
    FloatComplexS64,
};
pub use scalar::{Float, FloatS16, FloatS32, FloatS64};

/// Power-of-two exponent shared by a block of mantissas.
pub type Exponent = i32;

/// Redundant leading sign bits of a mantissa, or the minimum over a vector.
pub type Headroom = u32;

/// Arithmetic shift amount. Positive values shift right, negative values
/// shift left with saturation.
pub type RightShift = i32;

/// Arithmetic shift amount. Positive values shift left with saturation.
pub type LeftShift = i32;
