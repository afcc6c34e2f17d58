// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Reductions over real BFP vectors.

use super::{check_len, BfpVector};
use crate::error::{BfpError, BfpResult};
use crate::math::{dot, scalar, stats};
use crate::plan::{real, Planner};
use crate::types::{Float, FloatS32};

impl<T: Planner> BfpVector<'_, T> {
    /// Sum of all elements, in the width's accumulator type.
    pub fn sum(&self) -> BfpResult<Float<T::Acc>> {
        let plan = real::sum::<T>(self.exp, self.hr, self.len());
        tracing::trace!("sum: a_exp={} b_shr={}", plan.a_exp, plan.b_shr);
        Ok(Float::new(stats::sum(self.data(), plan.b_shr), plan.a_exp))
    }

    /// Sum of absolute values.
    pub fn abs_sum(&self) -> BfpResult<Float<T::Acc>> {
        let plan = real::sum::<T>(self.exp, self.hr, self.len());
        tracing::trace!("abs_sum: a_exp={} b_shr={}", plan.a_exp, plan.b_shr);
        Ok(Float::new(stats::abs_sum(self.data(), plan.b_shr), plan.a_exp))
    }

    /// Inner product with `c`.
    pub fn dot(&self, c: &BfpVector<'_, T>) -> BfpResult<Float<T::Acc>> {
        check_len(&self.config, self.len(), c.len())?;
        let plan = T::plan_dot(
            self.exp,
            c.exp,
            self.hr,
            c.hr,
            self.len(),
            self.config.allow_saturation,
        );
        tracing::trace!(
            "dot: a_exp={} b_shr={} c_shr={}",
            plan.a_exp,
            plan.b_shr,
            plan.c_shr
        );
        let acc = dot::dot(self.data(), c.data(), plan.b_shr, plan.c_shr);
        Ok(Float::new(acc, plan.a_exp))
    }

    /// Sum of squares.
    pub fn energy(&self) -> BfpResult<Float<T::Acc>> {
        let plan = T::plan_energy(self.exp, self.hr, self.len(), self.config.allow_saturation);
        tracing::trace!("energy: a_exp={} b_shr={}", plan.a_exp, plan.b_shr);
        Ok(Float::new(dot::energy(self.data(), plan.b_shr), plan.a_exp))
    }

    /// Arithmetic mean, as a 32-bit scalar for either width.
    pub fn mean(&self) -> BfpResult<FloatS32> {
        self.check_non_empty()?;
        let sum = self.sum()?;
        let sum = scalar::s64_to_s32(T::acc_to_i64(sum.mant), sum.exp);
        Ok(scalar::s32_mul(sum, self.len_inverse()))
    }

    /// Root mean square, as a 32-bit scalar for either width.
    pub fn rms(&self) -> BfpResult<FloatS32> {
        self.check_non_empty()?;
        let energy = self.energy()?;
        let energy = scalar::s64_to_s32(T::acc_to_i64(energy.mant), energy.exp);
        let mean_energy = scalar::s32_mul(energy, self.len_inverse());
        Ok(scalar::s32_sqrt(mean_energy, self.config.sqrt_depth_s32))
    }

    fn len_inverse(&self) -> FloatS32 {
        let n = i32::try_from(self.len()).unwrap_or(i32::MAX);
        scalar::s32_inverse(n)
    }

    /// Largest element. Empty vectors have none.
    pub fn max(&self) -> BfpResult<Float<T>> {
        self.check_non_empty()?;
        stats::max(self.data())
            .map(|m| Float::new(m, self.exp))
            .ok_or(BfpError::EmptyVector)
    }

    pub fn min(&self) -> BfpResult<Float<T>> {
        self.check_non_empty()?;
        stats::min(self.data())
            .map(|m| Float::new(m, self.exp))
            .ok_or(BfpError::EmptyVector)
    }

    /// Index of the first largest element.
    pub fn argmax(&self) -> BfpResult<usize> {
        self.check_non_empty()?;
        stats::argmax(self.data()).ok_or(BfpError::EmptyVector)
    }

    /// Index of the first smallest element.
    pub fn argmin(&self) -> BfpResult<usize> {
        self.check_non_empty()?;
        stats::argmin(self.data()).ok_or(BfpError::EmptyVector)
    }
}
