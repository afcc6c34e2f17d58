// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use super::{to_f64, Pcg32};
use crate::fxp::vect_headroom;
use crate::math::{elementwise, mul, scalar, stats, Operand};
use crate::plan::{real, Planner};
use crate::types::Float;
use std::vec::Vec;

fn random_s32(rng: &mut Pcg32, n: usize) -> Vec<i32> {
    (0..n).map(|_| rng.next_i32_scaled()).collect()
}

fn random_s16(rng: &mut Pcg32, n: usize) -> Vec<i16> {
    (0..n).map(|_| rng.next_i16_scaled()).collect()
}

#[test]
fn test_kernels_report_exact_headroom() {
    let mut rng = Pcg32::new(21);
    for _ in 0..50 {
        let b = random_s32(&mut rng, 33);
        let c = random_s32(&mut rng, 33);
        let mut a = std::vec![0i32; 33];

        let hr = elementwise::add(&mut a, Operand::Slice(&b), Operand::Slice(&c), 1, 1);
        assert_eq!(hr, vect_headroom(&a));

        let plan = i32::plan_mul(0, 0, vect_headroom(&b), vect_headroom(&c));
        let hr = mul::mul(&mut a, Operand::Slice(&b), Operand::Slice(&c), &plan);
        assert_eq!(hr, vect_headroom(&a));

        let hr = elementwise::abs(&mut a, Operand::Slice(&b));
        assert_eq!(hr, vect_headroom(&a));
    }
}

#[test]
fn test_kernels_never_produce_type_min() {
    let mut rng = Pcg32::new(5);
    for _ in 0..50 {
        let b: Vec<i16> = (0..64).map(|_| rng.next_i16()).collect();
        let c: Vec<i16> = (0..64).map(|_| rng.next_i16()).collect();
        let mut a = std::vec![0i16; 64];

        elementwise::add(&mut a, Operand::Slice(&b), Operand::Slice(&c), 0, 0);
        assert!(!a.contains(&i16::MIN));
        elementwise::sub(&mut a, Operand::Slice(&b), Operand::Slice(&c), 0, 0);
        assert!(!a.contains(&i16::MIN));
        elementwise::shl(&mut a, Operand::Slice(&b), 4);
        assert!(!a.contains(&i16::MIN));
        elementwise::abs(&mut a, Operand::Slice(&b));
        assert!(!a.contains(&i16::MIN));
        let plan = i16::plan_mul(0, 0, 0, 0);
        mul::mul(&mut a, Operand::Slice(&b), Operand::Slice(&c), &plan);
        assert!(!a.contains(&i16::MIN));
    }
}

#[test]
fn test_elementwise_inverse_matches_division() {
    let mut rng = Pcg32::new(1234);
    let b = random_s32(&mut rng, 200);
    let plan = real::inverse(&b, 0);
    let mut a = std::vec![0i32; b.len()];
    mul::inverse(&mut a, Operand::Slice(&b), &plan);
    for (k, &x) in b.iter().enumerate() {
        let want = if x == 0 {
            i32::MAX as i64
        } else {
            ((1i128 << plan.scale) / x as i128) as i64
        };
        assert_eq!(a[k] as i64, want, "divisor {}", x);
    }
}

#[test]
fn test_s16_inverse_matches_division() {
    let mut rng = Pcg32::new(8);
    let b = random_s16(&mut rng, 200);
    let plan = real::inverse(&b, 0);
    let mut a = std::vec![0i16; b.len()];
    mul::inverse(&mut a, Operand::Slice(&b), &plan);
    for (k, &x) in b.iter().enumerate() {
        if x != 0 {
            assert_eq!(a[k] as i64, (1i64 << plan.scale) / x as i64);
        }
    }
}

#[test]
fn test_sqrt_against_f64() {
    let mut rng = Pcg32::new(77);
    for _ in 0..500 {
        let mant = (rng.next_i32_scaled() & i32::MAX).max(1);
        let exp = (rng.next_u32() % 40) as i32 - 20;
        let r = scalar::s32_sqrt(Float::new(mant, exp), 31);
        let want = to_f64(mant, exp).sqrt();
        let got = to_f64(r.mant, r.exp);
        assert!((got - want).abs() <= want * 1e-8, "sqrt({}*2^{})", mant, exp);
    }
}

#[test]
fn test_sqrt_depth_limits_precision() {
    let x = Float::new(3i32, 0);
    let full = scalar::s32_sqrt(x, 31);
    let coarse = scalar::s32_sqrt(x, 8);
    assert_eq!(full.exp, coarse.exp);
    assert_eq!(coarse.mant & 0x7F_FFFF, 0);
    assert!(coarse.mant <= full.mant);
}

#[test]
fn test_scalar_mul_against_f64() {
    let mut rng = Pcg32::new(31);
    for _ in 0..500 {
        let b = Float::new(rng.next_i32_scaled(), (rng.next_u32() % 20) as i32 - 10);
        let c = Float::new(rng.next_i32_scaled(), (rng.next_u32() % 20) as i32 - 10);
        let p = scalar::s32_mul(b, c);
        let want = to_f64(b.mant, b.exp) * to_f64(c.mant, c.exp);
        let got = to_f64(p.mant, p.exp);
        // Two operand roundings of at most one unit each at the output exponent.
        assert!((got - want).abs() <= 2f64.powi(p.exp + 2), "{:?} * {:?}", b, c);
    }
}

#[test]
fn test_reductions_on_random_data() {
    let mut rng = Pcg32::new(2);
    let b = random_s16(&mut rng, 300);
    let exact: i64 = b.iter().map(|&x| x as i64).sum();
    assert_eq!(stats::sum(&b, 0) as i64, exact);
    let max = *b.iter().max().unwrap();
    assert_eq!(stats::max(&b), Some(max));
    assert_eq!(b[stats::argmax(&b).unwrap()], max);
}
