// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Complex BFP vectors.

use super::{check_len, BfpVector};
use crate::config::BfpConfig;
use crate::error::BfpResult;
use crate::fxp::ops::ashr;
use crate::fxp::{complex_headroom, Mantissa};
use crate::math::{complex, convert, Operand};
use crate::plan::{self, real, Planner};
use crate::types::{Complex, Exponent, FloatComplex, Float, Headroom, LeftShift};

/// A complex BFP vector: `(re + i*im) * 2^exp` for every element, with one
/// exponent and one headroom shared by both channels.
#[derive(Debug)]
pub struct BfpComplexVector<'a, T> {
    data: &'a mut [Complex<T>],
    exp: Exponent,
    hr: Headroom,
    config: BfpConfig,
}

#[derive(Clone, Copy)]
struct CSrc<'v, T> {
    op: Operand<'v, Complex<T>>,
    exp: Exponent,
    hr: Headroom,
    len: usize,
}

impl<'a, T: Mantissa> BfpComplexVector<'a, T> {
    pub fn new(data: &'a mut [Complex<T>], exp: Exponent, calc_hr: bool) -> Self {
        let hr = if calc_hr { complex_headroom(&*data) } else { 0 };
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

    pub fn hr(&self) -> Headroom {
        self.hr
    }

    pub fn config(&self) -> &BfpConfig {
        &self.config
    }

    pub fn data(&self) -> &[Complex<T>] {
        &*self.data
    }

    /// Mutable access to the mantissas; resets the recorded headroom to zero.
    pub fn data_mut(&mut self) -> &mut [Complex<T>] {
        self.hr = 0;
        &mut *self.data
    }

    pub fn set_exp(&mut self, exp: Exponent) {
        self.exp = exp;
    }

    /// Recomputes, stores and returns the exact headroom over both channels.
    pub fn headroom(&mut self) -> Headroom {
        self.hr = complex_headroom(&*self.data);
        self.hr
    }

    pub fn get(&self, k: usize) -> Option<FloatComplex<T>> {
        self.data
            .get(k)
            .map(|z| FloatComplex::new(z.re, z.im, self.exp))
    }

    /// Fills every element with `value` and takes `exp` as the exponent.
    pub fn set(&mut self, value: Complex<T>, exp: Exponent) {
        self.data.fill(value);
        let hr = complex_headroom(&*self.data);
        self.commit(exp, hr);
    }

    fn src(&self) -> CSrc<'_, T> {
        CSrc {
            op: Operand::Slice(&*self.data),
            exp: self.exp,
            hr: self.hr,
            len: self.data.len(),
        }
    }

    fn this(&self) -> CSrc<'static, T> {
        CSrc {
            op: Operand::Output,
            exp: self.exp,
            hr: self.hr,
            len: self.data.len(),
        }
    }

    fn check_len(&self, found: usize) -> BfpResult<()> {
        check_len(&self.config, self.data.len(), found)
    }

    fn commit(&mut self, exp: Exponent, hr: Headroom) {
        self.exp = exp;
        self.hr = hr;
    }
}

impl<T: Planner> BfpComplexVector<'_, T> {
    pub fn use_exponent(&mut self, exp: Exponent) {
        let shr = exp - self.exp;
        tracing::trace!("complex use_exponent: {} -> {} (shr {})", self.exp, exp, shr);
        let hr = complex::shl(self.data, Operand::Output, -shr);
        self.commit(exp, hr);
    }

    /// `self = b * 2^shl` on the mantissas; the exponent stays `b`'s.
    pub fn shl(&mut self, b: &BfpComplexVector<'_, T>, shl: LeftShift) -> BfpResult<()> {
        let b = b.src();
        self.check_len(b.len)?;
        let hr = complex::shl(self.data, b.op, shl);
        self.commit(b.exp, hr);
        Ok(())
    }

    pub fn shl_in_place(&mut self, shl: LeftShift) {
        let hr = complex::shl(self.data, Operand::Output, shl);
        self.hr = hr;
    }

    pub fn add(
        &mut self,
        b: &BfpComplexVector<'_, T>,
        c: &BfpComplexVector<'_, T>,
    ) -> BfpResult<()> {
        self.add_from(b.src(), c.src(), false)
    }

    pub fn add_assign(&mut self, c: &BfpComplexVector<'_, T>) -> BfpResult<()> {
        let me = self.this();
        self.add_from(me, c.src(), false)
    }

    pub fn sub(
        &mut self,
        b: &BfpComplexVector<'_, T>,
        c: &BfpComplexVector<'_, T>,
    ) -> BfpResult<()> {
        self.add_from(b.src(), c.src(), true)
    }

    pub fn sub_assign(&mut self, c: &BfpComplexVector<'_, T>) -> BfpResult<()> {
        let me = self.this();
        self.add_from(me, c.src(), true)
    }

    fn add_from(&mut self, b: CSrc<'_, T>, c: CSrc<'_, T>, negate: bool) -> BfpResult<()> {
        self.check_len(b.len)?;
        self.check_len(c.len)?;
        let plan = real::add(b.exp, c.exp, b.hr, c.hr, self.config.allow_saturation);
        tracing::trace!(
            "complex {}: a_exp={} b_shr={} c_shr={}",
            if negate { "sub" } else { "add" },
            plan.a_exp,
            plan.b_shr,
            plan.c_shr
        );
        let hr = if negate {
            complex::sub(self.data, b.op, c.op, plan.b_shr, plan.c_shr)
        } else {
            complex::add(self.data, b.op, c.op, plan.b_shr, plan.c_shr)
        };
        self.commit(plan.a_exp, hr);
        Ok(())
    }

    /// Elementwise complex product.
    pub fn mul(
        &mut self,
        b: &BfpComplexVector<'_, T>,
        c: &BfpComplexVector<'_, T>,
    ) -> BfpResult<()> {
        self.mul_from(b.src(), c.src(), false)
    }

    pub fn mul_assign(&mut self, c: &BfpComplexVector<'_, T>) -> BfpResult<()> {
        let me = self.this();
        self.mul_from(me, c.src(), false)
    }

    /// Elementwise `b * conj(c)`.
    pub fn conj_mul(
        &mut self,
        b: &BfpComplexVector<'_, T>,
        c: &BfpComplexVector<'_, T>,
    ) -> BfpResult<()> {
        self.mul_from(b.src(), c.src(), true)
    }

    pub fn conj_mul_assign(&mut self, c: &BfpComplexVector<'_, T>) -> BfpResult<()> {
        let me = self.this();
        self.mul_from(me, c.src(), true)
    }

    fn mul_from(&mut self, b: CSrc<'_, T>, c: CSrc<'_, T>, conj: bool) -> BfpResult<()> {
        self.check_len(b.len)?;
        self.check_len(c.len)?;
        let plan = T::plan_complex_mul(b.exp, c.exp, b.hr, c.hr, self.config.allow_saturation);
        tracing::trace!(
            "complex {}: a_exp={} b_shr={} c_shr={} p_shr={}",
            if conj { "conj_mul" } else { "mul" },
            plan.a_exp,
            plan.b_shr,
            plan.c_shr,
            plan.p_shr
        );
        let hr = if conj {
            complex::conj_mul(self.data, b.op, c.op, &plan)
        } else {
            complex::mul(self.data, b.op, c.op, &plan)
        };
        self.commit(plan.a_exp, hr);
        Ok(())
    }

    /// Complex vector times real vector.
    pub fn real_mul(&mut self, b: &BfpComplexVector<'_, T>, c: &BfpVector<'_, T>) -> BfpResult<()> {
        self.real_mul_from(b.src(), c)
    }

    pub fn real_mul_in_place(&mut self, c: &BfpVector<'_, T>) -> BfpResult<()> {
        let me = self.this();
        self.real_mul_from(me, c)
    }

    fn real_mul_from(&mut self, b: CSrc<'_, T>, c: &BfpVector<'_, T>) -> BfpResult<()> {
        self.check_len(b.len)?;
        self.check_len(c.len())?;
        let plan = T::plan_complex_real_mul(
            b.exp,
            c.exp(),
            b.hr,
            c.hr(),
            self.config.allow_saturation,
        );
        tracing::trace!(
            "complex real_mul: a_exp={} b_shr={} c_shr={} p_shr={}",
            plan.a_exp,
            plan.b_shr,
            plan.c_shr,
            plan.p_shr
        );
        let hr = complex::real_mul(self.data, b.op, c.data(), &plan);
        self.commit(plan.a_exp, hr);
        Ok(())
    }

    /// Complex vector times real scalar.
    pub fn real_scale(&mut self, b: &BfpComplexVector<'_, T>, alpha: Float<T>) -> BfpResult<()> {
        self.real_scale_from(b.src(), alpha)
    }

    pub fn real_scale_in_place(&mut self, alpha: Float<T>) -> BfpResult<()> {
        let me = self.this();
        self.real_scale_from(me, alpha)
    }

    fn real_scale_from(&mut self, b: CSrc<'_, T>, alpha: Float<T>) -> BfpResult<()> {
        self.check_len(b.len)?;
        let plan = T::plan_scale(
            b.exp,
            alpha.exp,
            b.hr,
            alpha.mant.headroom(),
            self.config.allow_saturation,
        );
        tracing::trace!(
            "complex real_scale: a_exp={} b_shr={} c_shr={} p_shr={}",
            plan.a_exp,
            plan.b_shr,
            plan.c_shr,
            plan.p_shr
        );
        let hr = complex::real_scale(self.data, b.op, alpha.mant, &plan);
        self.commit(plan.a_exp, hr);
        Ok(())
    }

    /// Complex vector times complex scalar.
    pub fn scale(
        &mut self,
        b: &BfpComplexVector<'_, T>,
        alpha: FloatComplex<T>,
    ) -> BfpResult<()> {
        self.scale_from(b.src(), alpha)
    }

    pub fn scale_in_place(&mut self, alpha: FloatComplex<T>) -> BfpResult<()> {
        let me = self.this();
        self.scale_from(me, alpha)
    }

    fn scale_from(&mut self, b: CSrc<'_, T>, alpha: FloatComplex<T>) -> BfpResult<()> {
        self.check_len(b.len)?;
        let alpha_hr = alpha.mant.re.headroom().min(alpha.mant.im.headroom());
        let plan = T::plan_complex_scale(
            b.exp,
            alpha.exp,
            b.hr,
            alpha_hr,
            self.config.allow_saturation,
        );
        tracing::trace!(
            "complex scale: a_exp={} b_shr={} c_shr={} p_shr={}",
            plan.a_exp,
            plan.b_shr,
            plan.c_shr,
            plan.p_shr
        );
        let hr = complex::scale(self.data, b.op, alpha.mant, &plan);
        self.commit(plan.a_exp, hr);
        Ok(())
    }

    /// Per-channel sum.
    pub fn sum(&self) -> BfpResult<FloatComplex<T::Acc>> {
        let plan = real::sum::<T>(self.exp, self.hr, self.len());
        tracing::trace!("complex sum: a_exp={} b_shr={}", plan.a_exp, plan.b_shr);
        let acc = complex::sum(self.data(), plan.b_shr);
        Ok(FloatComplex::new(acc.re, acc.im, plan.a_exp))
    }

    /// Sum of `|b[k]|^2`: the real energy taken over both channels.
    pub fn energy(&self) -> BfpResult<Float<T::Acc>> {
        let plan = T::plan_energy(
            self.exp,
            self.hr,
            2 * self.len(),
            self.config.allow_saturation,
        );
        tracing::trace!("complex energy: a_exp={} b_shr={}", plan.a_exp, plan.b_shr);
        Ok(Float::new(complex::energy(self.data(), plan.b_shr), plan.a_exp))
    }

    /// `self = b + c` with a complex scalar `c`.
    pub fn add_scalar(
        &mut self,
        b: &BfpComplexVector<'_, T>,
        c: FloatComplex<T>,
    ) -> BfpResult<()> {
        self.add_scalar_from(b.src(), c)
    }

    pub fn add_scalar_in_place(&mut self, c: FloatComplex<T>) -> BfpResult<()> {
        let me = self.this();
        self.add_scalar_from(me, c)
    }

    fn add_scalar_from(&mut self, b: CSrc<'_, T>, c: FloatComplex<T>) -> BfpResult<()> {
        self.check_len(b.len)?;
        let c_hr = c.mant.re.headroom().min(c.mant.im.headroom());
        let plan = real::add(b.exp, c.exp, b.hr, c_hr, self.config.allow_saturation);
        tracing::trace!(
            "complex add_scalar: a_exp={} b_shr={} c_shr={}",
            plan.a_exp,
            plan.b_shr,
            plan.c_shr
        );
        let c = Complex::new(ashr(c.mant.re, plan.c_shr), ashr(c.mant.im, plan.c_shr));
        let hr = complex::add_scalar(self.data, b.op, c, plan.b_shr);
        self.commit(plan.a_exp, hr);
        Ok(())
    }

    /// `self = conj(b)`; the exponent stays `b`'s.
    pub fn conjugate(&mut self, b: &BfpComplexVector<'_, T>) -> BfpResult<()> {
        self.conjugate_from(b.src())
    }

    pub fn conjugate_in_place(&mut self) -> BfpResult<()> {
        let me = self.this();
        self.conjugate_from(me)
    }

    fn conjugate_from(&mut self, b: CSrc<'_, T>) -> BfpResult<()> {
        self.check_len(b.len)?;
        let hr = complex::conjugate(self.data, b.op);
        self.commit(b.exp, hr);
        Ok(())
    }

    /// `self += b * c`.
    pub fn macc(
        &mut self,
        b: &BfpComplexVector<'_, T>,
        c: &BfpComplexVector<'_, T>,
    ) -> BfpResult<()> {
        self.macc_from(b.src(), c.src(), false, false)
    }

    /// `self -= b * c`.
    pub fn nmacc(
        &mut self,
        b: &BfpComplexVector<'_, T>,
        c: &BfpComplexVector<'_, T>,
    ) -> BfpResult<()> {
        self.macc_from(b.src(), c.src(), false, true)
    }

    /// `self += b * conj(c)`.
    pub fn conj_macc(
        &mut self,
        b: &BfpComplexVector<'_, T>,
        c: &BfpComplexVector<'_, T>,
    ) -> BfpResult<()> {
        self.macc_from(b.src(), c.src(), true, false)
    }

    /// `self -= b * conj(c)`.
    pub fn conj_nmacc(
        &mut self,
        b: &BfpComplexVector<'_, T>,
        c: &BfpComplexVector<'_, T>,
    ) -> BfpResult<()> {
        self.macc_from(b.src(), c.src(), true, true)
    }

    fn macc_from(
        &mut self,
        b: CSrc<'_, T>,
        c: CSrc<'_, T>,
        conj: bool,
        negate: bool,
    ) -> BfpResult<()> {
        self.check_len(b.len)?;
        self.check_len(c.len)?;
        let plan = T::plan_complex_macc(self.exp, b.exp, c.exp, self.hr, b.hr, c.hr);
        tracing::trace!(
            "complex {}{}: acc_exp={} acc_shr={} b_shr={} c_shr={} p_shr={}",
            if conj { "conj_" } else { "" },
            if negate { "nmacc" } else { "macc" },
            plan.acc_exp,
            plan.acc_shr,
            plan.bc.b_shr,
            plan.bc.c_shr,
            plan.bc.p_shr
        );
        let hr = match (conj, negate) {
            (false, false) => complex::macc(self.data, b.op, c.op, &plan),
            (false, true) => complex::nmacc(self.data, b.op, c.op, &plan),
            (true, false) => complex::conj_macc(self.data, b.op, c.op, &plan),
            (true, true) => complex::conj_nmacc(self.data, b.op, c.op, &plan),
        };
        self.commit(plan.acc_exp, hr);
        Ok(())
    }
}

impl<T: Planner> BfpVector<'_, T> {
    /// `self = |b|^2`, elementwise.
    pub fn squared_mag(&mut self, b: &BfpComplexVector<'_, T>) -> BfpResult<()> {
        self.check_len(b.len())?;
        let plan = T::plan_squared_mag(b.exp(), b.hr(), self.config.allow_saturation);
        tracing::trace!(
            "squared_mag: a_exp={} b_shr={} p_shr={}",
            plan.a_exp,
            plan.b_shr,
            plan.p_shr
        );
        let hr = complex::squared_mag(self.data, b.data(), &plan);
        self.commit(plan.a_exp, hr);
        Ok(())
    }

    /// `self = |b|`, elementwise.
    pub fn mag(&mut self, b: &BfpComplexVector<'_, T>) -> BfpResult<()> {
        self.check_len(b.len())?;
        let plan = plan::complex::mag(b.exp(), b.hr());
        tracing::trace!("mag: a_exp={} b_shr={}", plan.a_exp, plan.b_shr);
        let hr = complex::mag(self.data, b.data(), plan.b_shr);
        self.commit(plan.a_exp, hr);
        Ok(())
    }
}

impl BfpComplexVector<'_, i32> {
    /// Widens a 16-bit complex vector into `self`.
    pub fn convert_from(&mut self, b: &BfpComplexVector<'_, i16>) -> BfpResult<()> {
        self.check_len(b.len())?;
        let plan = real::widen_s16_to_s32(b.exp());
        let hr = convert::complex_s16_to_s32(self.data, b.data(), plan.b_shr);
        self.commit(plan.a_exp, hr);
        Ok(())
    }
}

impl BfpComplexVector<'_, i16> {
    /// Narrows a 32-bit complex vector into `self`.
    pub fn convert_from(&mut self, b: &BfpComplexVector<'_, i32>) -> BfpResult<()> {
        self.check_len(b.len())?;
        let plan = real::narrow_s32_to_s16(
            b.exp(),
            b.hr(),
            self.config.keep_headroom_on_narrowing,
        );
        tracing::trace!("complex s32 -> s16: a_exp={} b_shr={}", plan.a_exp, plan.b_shr);
        let hr = convert::complex_s32_to_s16(self.data, b.data(), plan.b_shr);
        self.commit(plan.a_exp, hr);
        Ok(())
    }
}
