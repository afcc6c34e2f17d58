// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
#![cfg_attr(not(feature = "std"), no_std)]

//! bfp-kernel: deterministic block floating-point vector arithmetic for targets
//! without a hardware float unit.
//!
//! A BFP vector is a slice of `i16` or `i32` mantissas sharing one exponent.
//! Every operation runs in three steps: read operand headroom, plan the output
//! exponent and operand shifts, then execute a saturating kernel that reports
//! the exact headroom of its output.

#[cfg(all(test, not(feature = "std")))]
#[macro_use]
extern crate std;

pub mod config;
pub mod error;
pub mod fxp;
pub mod types;
pub mod plan;
pub mod math;
pub mod bfp;

pub use bfp::{BfpComplexVector, BfpVector};
pub use config::{BfpConfig, ContractCheck};
pub use error::{BfpError, BfpResult};
pub use fxp::Mantissa;
pub use plan::Planner;
pub use types::{Complex, Exponent, Float, FloatComplex, Headroom, RightShift};

#[cfg(test)]
pub mod tests;
