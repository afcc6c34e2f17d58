// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants and the per-vector arithmetic policy.

use serde::{Deserialize, Serialize};

use crate::error::{BfpError, BfpResult};
use crate::fxp::Mantissa;

/// Maximum number of result bits a 16-bit square root can produce.
pub const S16_SQRT_MAX_DEPTH: u32 = 15;

/// Maximum number of result bits a 32-bit square root can produce.
pub const S32_SQRT_MAX_DEPTH: u32 = 31;

/// Saturation bound of the 40-bit accumulator used by 32-bit reductions.
pub const S40_MAX: i64 = (1 << 39) - 1;

/// How contract violations (length mismatches, empty reductions, bad bounds)
/// are handled by the container layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractCheck {
    /// Never checked.
    Off,
    /// Checked with `debug_assert!`; free in release builds.
    #[default]
    Debug,
    /// Always checked and reported as a [`BfpError`].
    Always,
}

/// Arithmetic policy carried by every BFP vector.
///
/// The output vector's config governs an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BfpConfig {
    /// When false, planners add one extra bit of exponent in the single case
    /// where two extreme operands could saturate by one unit.
    pub allow_saturation: bool,
    pub checks: ContractCheck,
    /// Result bits computed by 16-bit square roots (1..=15).
    pub sqrt_depth_s16: u32,
    /// Result bits computed by 32-bit square roots (1..=31).
    pub sqrt_depth_s32: u32,
    /// Keep one guard bit of headroom when narrowing 32-bit mantissas to 16 bits.
    pub keep_headroom_on_narrowing: bool,
}

impl Default for BfpConfig {
    fn default() -> Self {
        Self {
            allow_saturation: false,
            checks: ContractCheck::Debug,
            sqrt_depth_s16: S16_SQRT_MAX_DEPTH,
            sqrt_depth_s32: S32_SQRT_MAX_DEPTH,
            keep_headroom_on_narrowing: true,
        }
    }
}

impl BfpConfig {
    pub fn validate(&self) -> BfpResult<()> {
        if self.sqrt_depth_s16 == 0 || self.sqrt_depth_s16 > S16_SQRT_MAX_DEPTH {
            return Err(BfpError::InvalidSqrtDepth {
                depth: self.sqrt_depth_s16,
                max: S16_SQRT_MAX_DEPTH,
            });
        }
        if self.sqrt_depth_s32 == 0 || self.sqrt_depth_s32 > S32_SQRT_MAX_DEPTH {
            return Err(BfpError::InvalidSqrtDepth {
                depth: self.sqrt_depth_s32,
                max: S32_SQRT_MAX_DEPTH,
            });
        }
        Ok(())
    }

    /// Square-root depth for elements of type `T`.
    pub fn sqrt_depth<T: Mantissa>(&self) -> u32 {
        if T::BITS == 16 {
            self.sqrt_depth_s16
        } else {
            self.sqrt_depth_s32
        }
    }

    /// Checks a contract condition according to `self.checks`.
    pub(crate) fn check(&self, ok: bool, err: BfpError) -> BfpResult<()> {
        match self.checks {
            ContractCheck::Off => Ok(()),
            ContractCheck::Debug => {
                debug_assert!(ok, "{}", err);
                Ok(())
            }
            ContractCheck::Always if ok => Ok(()),
            ContractCheck::Always => Err(err),
        }
    }
}
