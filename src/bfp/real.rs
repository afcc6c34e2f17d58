// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Elementwise operations on real BFP vectors.

use super::{BfpVector, Src};
use crate::error::{BfpError, BfpResult};
use crate::fxp::ops::ashr;
use crate::math::{convert, elementwise, mul, Operand};
use crate::plan::{real, Planner};
use crate::types::{Exponent, Float, Headroom, LeftShift};

impl<T: Planner> BfpVector<'_, T> {
    /// Sets every element to `value * 2^exp`.
    pub fn set(&mut self, value: T, exp: Exponent) {
        let hr = elementwise::set(self.data, value);
        self.commit(exp, hr);
    }

    /// Rescales the mantissas so the vector's exponent becomes `exp`.
    ///
    /// Raising the exponent loses low bits; lowering it past the headroom
    /// saturates.
    pub fn use_exponent(&mut self, exp: Exponent) {
        let shr = exp - self.exp;
        tracing::trace!("use_exponent: {} -> {} (shr {})", self.exp, exp, shr);
        let hr = elementwise::shr(self.data, Operand::Output, shr);
        self.commit(exp, hr);
    }

    /// `self = b * 2^shl`, done on the mantissas with saturation. The exponent
    /// stays `b`'s.
    pub fn shl(&mut self, b: &BfpVector<'_, T>, shl: LeftShift) -> BfpResult<()> {
        self.shl_from(b.src(), shl)
    }

    pub fn shl_in_place(&mut self, shl: LeftShift) -> BfpResult<()> {
        let me = self.this();
        self.shl_from(me, shl)
    }

    fn shl_from(&mut self, b: Src<'_, T>, shl: LeftShift) -> BfpResult<()> {
        self.check_len(b.len)?;
        let hr = elementwise::shl(self.data, b.op, shl);
        self.commit(b.exp, hr);
        Ok(())
    }

    pub fn add(&mut self, b: &BfpVector<'_, T>, c: &BfpVector<'_, T>) -> BfpResult<()> {
        self.add_from(b.src(), c.src(), false)
    }

    /// `self += c`.
    pub fn add_assign(&mut self, c: &BfpVector<'_, T>) -> BfpResult<()> {
        let me = self.this();
        self.add_from(me, c.src(), false)
    }

    pub fn sub(&mut self, b: &BfpVector<'_, T>, c: &BfpVector<'_, T>) -> BfpResult<()> {
        self.add_from(b.src(), c.src(), true)
    }

    /// `self -= c`.
    pub fn sub_assign(&mut self, c: &BfpVector<'_, T>) -> BfpResult<()> {
        let me = self.this();
        self.add_from(me, c.src(), true)
    }

    fn add_from(&mut self, b: Src<'_, T>, c: Src<'_, T>, negate: bool) -> BfpResult<()> {
        self.check_len(b.len)?;
        self.check_len(c.len)?;
        let plan = real::add(b.exp, c.exp, b.hr, c.hr, self.config.allow_saturation);
        tracing::trace!(
            "{}: a_exp={} b_shr={} c_shr={}",
            if negate { "sub" } else { "add" },
            plan.a_exp,
            plan.b_shr,
            plan.c_shr
        );
        let hr = if negate {
            elementwise::sub(self.data, b.op, c.op, plan.b_shr, plan.c_shr)
        } else {
            elementwise::add(self.data, b.op, c.op, plan.b_shr, plan.c_shr)
        };
        self.commit(plan.a_exp, hr);
        Ok(())
    }

    /// `self = b + c` for a scalar `c`.
    pub fn add_scalar(&mut self, b: &BfpVector<'_, T>, c: Float<T>) -> BfpResult<()> {
        self.add_scalar_from(b.src(), c)
    }

    pub fn add_scalar_in_place(&mut self, c: Float<T>) -> BfpResult<()> {
        let me = self.this();
        self.add_scalar_from(me, c)
    }

    fn add_scalar_from(&mut self, b: Src<'_, T>, c: Float<T>) -> BfpResult<()> {
        self.check_len(b.len)?;
        let plan = real::add(
            b.exp,
            c.exp,
            b.hr,
            c.mant.headroom(),
            self.config.allow_saturation,
        );
        tracing::trace!(
            "add_scalar: a_exp={} b_shr={} c_shr={}",
            plan.a_exp,
            plan.b_shr,
            plan.c_shr
        );
        let c = ashr(c.mant, plan.c_shr);
        let hr = elementwise::add_scalar(self.data, b.op, c, plan.b_shr);
        self.commit(plan.a_exp, hr);
        Ok(())
    }

    /// Elementwise product.
    pub fn mul(&mut self, b: &BfpVector<'_, T>, c: &BfpVector<'_, T>) -> BfpResult<()> {
        self.mul_from(b.src(), c.src())
    }

    /// `self *= c`, elementwise.
    pub fn mul_assign(&mut self, c: &BfpVector<'_, T>) -> BfpResult<()> {
        let me = self.this();
        self.mul_from(me, c.src())
    }

    fn mul_from(&mut self, b: Src<'_, T>, c: Src<'_, T>) -> BfpResult<()> {
        self.check_len(b.len)?;
        self.check_len(c.len)?;
        let plan = T::plan_mul(b.exp, c.exp, b.hr, c.hr);
        tracing::trace!(
            "mul: a_exp={} b_shr={} c_shr={} p_shr={}",
            plan.a_exp,
            plan.b_shr,
            plan.c_shr,
            plan.p_shr
        );
        let hr = mul::mul(self.data, b.op, c.op, &plan);
        self.commit(plan.a_exp, hr);
        Ok(())
    }

    /// `self = b * alpha`.
    pub fn scale(&mut self, b: &BfpVector<'_, T>, alpha: Float<T>) -> BfpResult<()> {
        self.scale_from(b.src(), alpha)
    }

    pub fn scale_in_place(&mut self, alpha: Float<T>) -> BfpResult<()> {
        let me = self.this();
        self.scale_from(me, alpha)
    }

    fn scale_from(&mut self, b: Src<'_, T>, alpha: Float<T>) -> BfpResult<()> {
        self.check_len(b.len)?;
        let plan = T::plan_scale(
            b.exp,
            alpha.exp,
            b.hr,
            alpha.mant.headroom(),
            self.config.allow_saturation,
        );
        tracing::trace!(
            "scale: a_exp={} b_shr={} c_shr={} p_shr={}",
            plan.a_exp,
            plan.b_shr,
            plan.c_shr,
            plan.p_shr
        );
        let hr = mul::scale(self.data, b.op, alpha.mant, &plan);
        self.commit(plan.a_exp, hr);
        Ok(())
    }

    /// `self += b * c`.
    pub fn macc(&mut self, b: &BfpVector<'_, T>, c: &BfpVector<'_, T>) -> BfpResult<()> {
        self.macc_from(b.src(), c.src(), false)
    }

    /// `self -= b * c`.
    pub fn nmacc(&mut self, b: &BfpVector<'_, T>, c: &BfpVector<'_, T>) -> BfpResult<()> {
        self.macc_from(b.src(), c.src(), true)
    }

    fn macc_from(&mut self, b: Src<'_, T>, c: Src<'_, T>, negate: bool) -> BfpResult<()> {
        self.check_len(b.len)?;
        self.check_len(c.len)?;
        let plan = T::plan_macc(self.exp, b.exp, c.exp, self.hr, b.hr, c.hr);
        tracing::trace!(
            "{}: acc_exp={} acc_shr={} b_shr={} c_shr={} p_shr={}",
            if negate { "nmacc" } else { "macc" },
            plan.acc_exp,
            plan.acc_shr,
            plan.bc.b_shr,
            plan.bc.c_shr,
            plan.bc.p_shr
        );
        let hr = if negate {
            mul::nmacc(self.data, b.op, c.op, &plan)
        } else {
            mul::macc(self.data, b.op, c.op, &plan)
        };
        self.commit(plan.acc_exp, hr);
        Ok(())
    }

    pub fn abs(&mut self, b: &BfpVector<'_, T>) -> BfpResult<()> {
        let b = b.src();
        self.check_len(b.len)?;
        let hr = elementwise::abs(self.data, b.op);
        self.commit(b.exp, hr);
        Ok(())
    }

    pub fn abs_in_place(&mut self) {
        let hr = elementwise::abs(self.data, Operand::Output);
        self.hr = hr;
    }

    /// Negative elements become zero.
    pub fn rect(&mut self, b: &BfpVector<'_, T>) -> BfpResult<()> {
        let b = b.src();
        self.check_len(b.len)?;
        let hr = elementwise::rect(self.data, b.op);
        self.commit(b.exp, hr);
        Ok(())
    }

    pub fn rect_in_place(&mut self) {
        let hr = elementwise::rect(self.data, Operand::Output);
        self.hr = hr;
    }

    /// Clamps `b` to `[lower, upper] * 2^bound_exp`.
    pub fn clip(
        &mut self,
        b: &BfpVector<'_, T>,
        lower: T,
        upper: T,
        bound_exp: Exponent,
    ) -> BfpResult<()> {
        self.clip_from(b.src(), lower, upper, bound_exp)
    }

    pub fn clip_in_place(&mut self, lower: T, upper: T, bound_exp: Exponent) -> BfpResult<()> {
        let me = self.this();
        self.clip_from(me, lower, upper, bound_exp)
    }

    fn clip_from(
        &mut self,
        b: Src<'_, T>,
        lower: T,
        upper: T,
        bound_exp: Exponent,
    ) -> BfpResult<()> {
        self.check_len(b.len)?;
        self.config.check(lower <= upper, BfpError::InvalidClipBounds)?;
        let plan = real::clip(b.exp, lower, upper, bound_exp);

        if plan.upper <= T::MIN {
            tracing::debug!("clip: upper bound below range, output is constant");
            let hr = elementwise::set(self.data, T::saturate(upper.to_i64()));
            self.commit(bound_exp, hr);
        } else if plan.lower >= T::MAX {
            tracing::debug!("clip: lower bound above range, output is constant");
            let hr = elementwise::set(self.data, T::saturate(lower.to_i64()));
            self.commit(bound_exp, hr);
        } else if plan.lower == plan.upper {
            tracing::debug!("clip: bounds coincide, output is constant");
            let hr = elementwise::set(self.data, plan.lower);
            self.commit(plan.a_exp, hr);
        } else {
            tracing::trace!(
                "clip: a_exp={} lower={:?} upper={:?}",
                plan.a_exp,
                plan.lower,
                plan.upper
            );
            let hr = elementwise::clip(self.data, b.op, &plan);
            self.commit(plan.a_exp, hr);
        }
        Ok(())
    }

    /// Elementwise square root. Negative elements give zero.
    pub fn sqrt(&mut self, b: &BfpVector<'_, T>) -> BfpResult<()> {
        self.sqrt_from(b.src())
    }

    pub fn sqrt_in_place(&mut self) -> BfpResult<()> {
        let me = self.this();
        self.sqrt_from(me)
    }

    fn sqrt_from(&mut self, b: Src<'_, T>) -> BfpResult<()> {
        self.check_len(b.len)?;
        let plan = real::sqrt::<T>(b.exp, b.hr);
        let depth = self.config.sqrt_depth::<T>();
        tracing::trace!("sqrt: a_exp={} b_shr={} depth={}", plan.a_exp, plan.b_shr, depth);
        let hr = mul::sqrt(self.data, b.op, plan.b_shr, depth);
        self.commit(plan.a_exp, hr);
        Ok(())
    }

    /// Elementwise reciprocal. Zero elements give `MAX`.
    pub fn inverse(&mut self, b: &BfpVector<'_, T>) -> BfpResult<()> {
        self.inverse_from(b.src())
    }

    pub fn inverse_in_place(&mut self) -> BfpResult<()> {
        let me = self.this();
        self.inverse_from(me)
    }

    fn inverse_from(&mut self, b: Src<'_, T>) -> BfpResult<()> {
        self.check_len(b.len)?;
        let plan = match b.op {
            Operand::Output => real::inverse(&*self.data, b.exp),
            Operand::Slice(s) => real::inverse(s, b.exp),
        };
        tracing::trace!("inverse: a_exp={} scale={}", plan.a_exp, plan.scale);
        let hr = mul::inverse(self.data, b.op, &plan);
        self.commit(plan.a_exp, hr);
        Ok(())
    }

    /// Elementwise maximum of two vectors.
    pub fn max_elementwise(
        &mut self,
        b: &BfpVector<'_, T>,
        c: &BfpVector<'_, T>,
    ) -> BfpResult<()> {
        self.extremum_from(b.src(), c.src(), true)
    }

    /// Elementwise minimum of two vectors.
    pub fn min_elementwise(
        &mut self,
        b: &BfpVector<'_, T>,
        c: &BfpVector<'_, T>,
    ) -> BfpResult<()> {
        self.extremum_from(b.src(), c.src(), false)
    }

    /// `self = max(self, c)`, elementwise. Only `self` may be the output side.
    pub fn max_elementwise_assign(&mut self, c: &BfpVector<'_, T>) -> BfpResult<()> {
        let me = self.this();
        self.extremum_from(me, c.src(), true)
    }

    /// `self = min(self, c)`, elementwise.
    pub fn min_elementwise_assign(&mut self, c: &BfpVector<'_, T>) -> BfpResult<()> {
        let me = self.this();
        self.extremum_from(me, c.src(), false)
    }

    fn extremum_from(&mut self, b: Src<'_, T>, c: Src<'_, T>, max: bool) -> BfpResult<()> {
        self.check_len(b.len)?;
        self.check_len(c.len)?;
        let plan = real::two_vec(b.exp, c.exp, b.hr, c.hr, 1);
        tracing::trace!(
            "{}_elementwise: a_exp={} b_shr={} c_shr={}",
            if max { "max" } else { "min" },
            plan.a_exp,
            plan.b_shr,
            plan.c_shr
        );
        let hr = if max {
            elementwise::max(self.data, b.op, c.op, plan.b_shr, plan.c_shr)
        } else {
            elementwise::min(self.data, b.op, c.op, plan.b_shr, plan.c_shr)
        };
        self.commit(plan.a_exp, hr);
        Ok(())
    }
}

impl BfpVector<'_, i32> {
    /// Widens a 16-bit vector into `self`.
    pub fn convert_from(&mut self, b: &BfpVector<'_, i16>) -> BfpResult<()> {
        self.check_len(b.len())?;
        let plan = real::widen_s16_to_s32(b.exp());
        let hr = convert::s16_to_s32(self.data, b.data(), plan.b_shr);
        self.commit(plan.a_exp, hr);
        Ok(())
    }
}

impl BfpVector<'_, i16> {
    /// Narrows a 32-bit vector into `self`, keeping one guard bit when
    /// `self`'s config asks for it.
    pub fn convert_from(&mut self, b: &BfpVector<'_, i32>) -> BfpResult<()> {
        self.check_len(b.len())?;
        let plan = real::narrow_s32_to_s16(
            b.exp(),
            b.hr(),
            self.config.keep_headroom_on_narrowing,
        );
        tracing::trace!("s32 -> s16: a_exp={} b_shr={}", plan.a_exp, plan.b_shr);
        let hr = convert::s32_to_s16(self.data, b.data(), plan.b_shr);
        self.commit(plan.a_exp, hr);
        Ok(())
    }

    /// Adds the vector into a 32-bit accumulator whose exponent is `acc_exp`,
    /// saturating, and returns the accumulator's headroom.
    ///
    /// The caller owns `acc_exp`: elements below its resolution are floored
    /// away and no rescaling of `acc` happens.
    pub fn accumulate(&self, acc: &mut [i32], acc_exp: Exponent) -> BfpResult<Headroom> {
        self.check_len(acc.len())?;
        let b_shr = acc_exp - self.exp;
        tracing::trace!("accumulate: acc_exp={} b_shr={}", acc_exp, b_shr);
        Ok(convert::accumulate_s16(acc, self.data(), b_shr))
    }
}
