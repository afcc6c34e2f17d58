// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Fixed-point primitives: element widths, headroom, symmetric saturation,
//! the wide accumulator and the scalar reciprocal/square-root cores.

pub mod acc;
pub mod headroom;
pub mod isqrt;
pub mod mantissa;
pub mod ops;
pub mod recip;

pub use acc::Accumulator;
pub use headroom::{complex_headroom, headroom_i64, vect_headroom};
pub use mantissa::Mantissa;
