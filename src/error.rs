// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use thiserror::Error;

/// Caller-side contract violations reported by the container layer.
///
/// Numeric corner cases (saturation, square root of a negative value,
/// reciprocal of zero) are defined results, never errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BfpError {
    #[error("Length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Operation requires a non-empty vector")]
    EmptyVector,

    #[error("Invalid sqrt depth {depth}: must be in 1..={max}")]
    InvalidSqrtDepth { depth: u32, max: u32 },

    #[error("Invalid clip bounds: lower bound exceeds upper bound")]
    InvalidClipBounds,
}

pub type BfpResult<T> = core::result::Result<T, BfpError>;
