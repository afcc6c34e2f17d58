// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Block floating-point vectors.
//!
//! A [`BfpVector`] borrows caller-owned mantissas and carries the block's
//! exponent, a headroom bound and the [`BfpConfig`] its operations run under.
//! Operations write into `self` and read their operands from other vectors or,
//! in the `*_assign` / `*_in_place` forms, from `self`.

mod complex;
mod real;
mod stats;

pub use complex::BfpComplexVector;

use crate::config::BfpConfig;
use crate::error::{BfpError, BfpResult};
use crate::fxp::{vect_headroom, Mantissa};
use crate::math::Operand;
use crate::types::{Exponent, Float, Headroom};

/// A real BFP vector: `data[k] * 2^exp`.
#[derive(Debug)]
pub struct BfpVector<'a, T> {
    data: &'a mut [T],
    exp: Exponent,
    hr: Headroom,
    config: BfpConfig,
}

/// Read side of an operation: mantissas plus the block metadata.
#[derive(Clone, Copy)]
pub(crate) struct Src<'v, T> {
    op: Operand<'v, T>,
    exp: Exponent,
    hr: Headroom,
    len: usize,
}

impl<'a, T: Mantissa> BfpVector<'a, T> {
    /// Wraps `data` with exponent `exp`.
    ///
    /// Without `calc_hr` the headroom is recorded as zero, which is always a
    /// safe (if pessimistic) bound.
    pub fn new(data: &'a mut [T], exp: Exponent, calc_hr: bool) -> Self {
        let hr = if calc_hr { vect_headroom(&*data) } else { 0 };
        Self {
            data,
            exp,
            hr,
            config: BfpConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BfpConfig) -> BfpResult<Self> {
        if let Err(e) = config.validate() {
            tracing::debug!("rejected vector config: {}", e);
            return Err(e);
        }
        self.config = config;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn exp(&self) -> Exponent {
        self.exp
    }

    /// Recorded headroom. Never more than the true headroom of the data.
    pub fn hr(&self) -> Headroom {
        self.hr
    }

    pub fn config(&self) -> &BfpConfig {
        &self.config
    }

    pub fn data(&self) -> &[T] {
        &*self.data
    }

    /// Mutable access to the mantissas. The recorded headroom drops to zero
    /// until [`headroom`](Self::headroom) is called again.
    pub fn data_mut(&mut self) -> &mut [T] {
        self.hr = 0;
        &mut *self.data
    }

    /// Reinterprets the mantissas at a new exponent without touching them.
    pub fn set_exp(&mut self, exp: Exponent) {
        self.exp = exp;
    }

    /// Recomputes, stores and returns the exact headroom.
    pub fn headroom(&mut self) -> Headroom {
        self.hr = vect_headroom(&*self.data);
        self.hr
    }

    /// Element `k` as a floating scalar.
    pub fn get(&self, k: usize) -> Option<Float<T>> {
        self.data.get(k).map(|&m| Float::new(m, self.exp))
    }

    pub(crate) fn src(&self) -> Src<'_, T> {
        Src {
            op: Operand::Slice(&*self.data),
            exp: self.exp,
            hr: self.hr,
            len: self.data.len(),
        }
    }

    /// `self` as an operand of its own update.
    pub(crate) fn this(&self) -> Src<'static, T> {
        Src {
            op: Operand::Output,
            exp: self.exp,
            hr: self.hr,
            len: self.data.len(),
        }
    }

    pub(crate) fn check_len(&self, found: usize) -> BfpResult<()> {
        check_len(&self.config, self.data.len(), found)
    }

    pub(crate) fn check_non_empty(&self) -> BfpResult<()> {
        self.config.check(!self.data.is_empty(), BfpError::EmptyVector)
    }

    pub(crate) fn commit(&mut self, exp: Exponent, hr: Headroom) {
        self.exp = exp;
        self.hr = hr;
    }
}

pub(crate) fn check_len(config: &BfpConfig, expected: usize, found: usize) -> BfpResult<()> {
    config.check(
        expected == found,
        BfpError::LengthMismatch { expected, found },
    )
}
