// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use super::{init_logging, to_f64, Pcg32};
use crate::config::{BfpConfig, ContractCheck};
use crate::error::BfpError;
use crate::fxp::Mantissa;
use crate::types::Float;
use crate::BfpVector;
use std::vec::Vec;

fn strict() -> BfpConfig {
    BfpConfig {
        checks: ContractCheck::Always,
        ..BfpConfig::default()
    }
}

fn random_q30(rng: &mut Pcg32, n: usize) -> Vec<i32> {
    (0..n)
        .map(|_| (rng.next_u32() as i32) >> 2)
        .collect()
}

fn values<T: Mantissa + Into<f64>>(v: &BfpVector<'_, T>) -> Vec<f64> {
    v.data().iter().map(|&m| to_f64(m, v.exp())).collect()
}

#[test]
fn test_add_is_exact_when_headroom_allows() {
    init_logging();
    let mut b_data = [100i16, -50];
    let mut c_data = [3i16, 5];
    let mut out = [0i16; 2];
    let b = BfpVector::new(&mut b_data, 0, true);
    let c = BfpVector::new(&mut c_data, 2, true);
    let mut a = BfpVector::new(&mut out, 0, false);
    a.add(&b, &c).unwrap();
    assert_eq!(values(&a), [112.0, -30.0]);
    a.sub(&b, &c).unwrap();
    assert_eq!(values(&a), [88.0, -70.0]);
}

#[test]
fn test_recorded_headroom_is_exact_after_ops() {
    let mut rng = Pcg32::new(1);
    let mut b_data = random_q30(&mut rng, 40);
    let mut c_data = random_q30(&mut rng, 40);
    let mut out = std::vec![0i32; 40];
    let b = BfpVector::new(&mut b_data, -30, true);
    let c = BfpVector::new(&mut c_data, -31, true);
    let mut a = BfpVector::new(&mut out, 0, false);

    a.add(&b, &c).unwrap();
    let hr = a.hr();
    assert_eq!(a.headroom(), hr);

    a.mul(&b, &c).unwrap();
    let hr = a.hr();
    assert_eq!(a.headroom(), hr);
}

#[test]
fn test_mul_and_scale_against_f64() {
    let mut rng = Pcg32::new(2);
    let mut b_data = random_q30(&mut rng, 64);
    let mut c_data = random_q30(&mut rng, 64);
    let mut out = std::vec![0i32; 64];
    let b = BfpVector::new(&mut b_data, -30, true);
    let c = BfpVector::new(&mut c_data, -30, true);
    let mut a = BfpVector::new(&mut out, 0, false);

    a.mul(&b, &c).unwrap();
    let (bv, cv) = (values(&b), values(&c));
    for (k, got) in values(&a).into_iter().enumerate() {
        assert!((got - bv[k] * cv[k]).abs() < 1e-8, "mul {}", k);
    }

    let alpha = Float::<i32>::from_f64(3.75);
    a.scale(&b, alpha).unwrap();
    for (k, got) in values(&a).into_iter().enumerate() {
        assert!((got - bv[k] * 3.75).abs() < 1e-8, "scale {}", k);
    }
}

#[test]
fn test_s16_mul_against_f64() {
    let mut rng = Pcg32::new(3);
    let mut b_data: Vec<i16> = (0..64).map(|_| rng.next_i16()).collect();
    let mut c_data: Vec<i16> = (0..64).map(|_| rng.next_i16()).collect();
    let mut out = std::vec![0i16; 64];
    let b = BfpVector::new(&mut b_data, -15, true);
    let c = BfpVector::new(&mut c_data, -15, true);
    let mut a = BfpVector::new(&mut out, 0, false);
    a.mul(&b, &c).unwrap();
    let (bv, cv) = (values(&b), values(&c));
    for (k, got) in values(&a).into_iter().enumerate() {
        assert!((got - bv[k] * cv[k]).abs() <= 2f64.powi(a.exp()), "mul {}", k);
    }
}

#[test]
fn test_macc_and_nmacc_against_f64() {
    let mut rng = Pcg32::new(4);
    let mut acc_data = random_q30(&mut rng, 32);
    let mut b_data = random_q30(&mut rng, 32);
    let mut c_data = random_q30(&mut rng, 32);
    let b = BfpVector::new(&mut b_data, -30, true);
    let c = BfpVector::new(&mut c_data, -29, true);
    let (bv, cv) = (values(&b), values(&c));

    let mut acc = BfpVector::new(&mut acc_data, -31, true);
    let start = values(&acc);
    acc.macc(&b, &c).unwrap();
    for (k, got) in values(&acc).into_iter().enumerate() {
        assert!((got - (start[k] + bv[k] * cv[k])).abs() < 1e-7, "macc {}", k);
    }

    let start = values(&acc);
    acc.nmacc(&b, &c).unwrap();
    for (k, got) in values(&acc).into_iter().enumerate() {
        assert!((got - (start[k] - bv[k] * cv[k])).abs() < 1e-7, "nmacc {}", k);
    }
}

#[test]
fn test_in_place_forms_match() {
    let mut rng = Pcg32::new(5);
    let orig = random_q30(&mut rng, 20);
    let mut c_data = random_q30(&mut rng, 20);
    let c = BfpVector::new(&mut c_data, -28, true);

    let mut b_data = orig.clone();
    let mut out = std::vec![0i32; 20];
    let b = BfpVector::new(&mut b_data, -30, true);
    let mut a = BfpVector::new(&mut out, 0, false);

    let mut x_data = orig.clone();
    let mut x = BfpVector::new(&mut x_data, -30, true);
    a.add(&b, &c).unwrap();
    x.add_assign(&c).unwrap();
    assert_eq!((x.exp(), x.data()), (a.exp(), a.data()));

    let mut x_data = orig.clone();
    let mut x = BfpVector::new(&mut x_data, -30, true);
    a.mul(&b, &c).unwrap();
    x.mul_assign(&c).unwrap();
    assert_eq!((x.exp(), x.data()), (a.exp(), a.data()));

    let alpha = Float::new(-3i32, 4);
    let mut x_data = orig;
    let mut x = BfpVector::new(&mut x_data, -30, true);
    a.scale(&b, alpha).unwrap();
    x.scale_in_place(alpha).unwrap();
    assert_eq!((x.exp(), x.data()), (a.exp(), a.data()));
}

#[test]
fn test_add_scalar() {
    let mut b_data = [10i32, -10, 0];
    let mut out = [0i32; 3];
    let b = BfpVector::new(&mut b_data, -1, true);
    let mut a = BfpVector::new(&mut out, 0, false);
    a.add_scalar(&b, Float::new(3, 1)).unwrap();
    assert_eq!(values(&a), [11.0, 1.0, 6.0]);
}

#[test]
fn test_set_and_use_exponent() {
    let mut data = [1i16, 2, 3];
    let mut v = BfpVector::new(&mut data, 0, true);
    v.use_exponent(-4);
    assert_eq!(v.data(), &[16, 32, 48]);
    assert_eq!(v.exp(), -4);
    v.use_exponent(1);
    assert_eq!(v.data(), &[0, 1, 1]);

    v.set(7, -2);
    assert_eq!(v.data(), &[7, 7, 7]);
    assert_eq!((v.exp(), v.hr()), (-2, 12));
}

#[test]
fn test_data_mut_drops_recorded_headroom() {
    let mut data = [1i32, 2, 3];
    let mut v = BfpVector::new(&mut data, 0, true);
    assert_eq!(v.hr(), 29);
    v.data_mut()[0] = 1 << 20;
    assert_eq!(v.hr(), 0);
    assert_eq!(v.headroom(), 10);
    let mut other = [5i32];
    let unmeasured = BfpVector::new(&mut other, 0, false);
    assert_eq!(unmeasured.hr(), 0);
}

#[test]
fn test_abs_and_rect() {
    let mut b_data = [-5i16, 3, -32767, 0];
    let mut out = [0i16; 4];
    let b = BfpVector::new(&mut b_data, 2, true);
    let mut a = BfpVector::new(&mut out, 0, false);
    a.abs(&b).unwrap();
    assert_eq!(a.data(), &[5, 3, 32767, 0]);
    assert_eq!(a.exp(), 2);
    a.rect(&b).unwrap();
    assert_eq!(a.data(), &[0, 3, 0, 0]);
}

#[test]
fn test_clip_general_case() {
    let mut b_data = [-100i16, -5, 0, 5, 100];
    let mut out = [0i16; 5];
    let b = BfpVector::new(&mut b_data, 0, true);
    let mut a = BfpVector::new(&mut out, 0, false);
    a.clip(&b, -10, 10, 0).unwrap();
    assert_eq!(a.data(), &[-10, -5, 0, 5, 10]);
    assert_eq!(a.exp(), 0);
}

#[test]
fn test_clip_constant_outputs() {
    let mut b_data = [-100i32, 5, 100];
    let mut out = [0i32; 3];
    let b = BfpVector::new(&mut b_data, -20, true);
    let mut a = BfpVector::new(&mut out, 0, false);

    // Upper bound far below anything representable at the vector's exponent.
    a.clip(&b, -200, -100, 40).unwrap();
    assert_eq!(a.data(), &[-100, -100, -100]);
    assert_eq!(a.exp(), 40);

    // Lower bound far above.
    a.clip(&b, 100, 200, 40).unwrap();
    assert_eq!(a.data(), &[100, 100, 100]);
    assert_eq!(a.exp(), 40);

    // Coinciding bounds.
    a.clip(&b, 3, 3, -20).unwrap();
    assert_eq!(a.data(), &[3, 3, 3]);
    assert_eq!(a.exp(), -20);
}

#[test]
fn test_clip_to_type_min_bounds_stays_symmetric() {
    let mut b_data = [100i16, -5, 7];
    let mut out = [0i16; 3];
    let b = BfpVector::new(&mut b_data, 0, true);
    let mut a = BfpVector::new(&mut out, 0, false);
    a.clip(&b, i16::MIN, i16::MIN, 0).unwrap();
    assert_eq!(a.data(), &[-i16::MAX; 3]);
    assert_eq!(a.exp(), 0);

    let mut b_data = [1i32, 2];
    let mut out = [0i32; 2];
    let b = BfpVector::new(&mut b_data, -4, true);
    let mut a = BfpVector::new(&mut out, 0, false);
    a.clip(&b, i32::MIN, i32::MIN, 3).unwrap();
    assert_eq!(a.data(), &[-i32::MAX; 2]);
    assert_eq!(a.exp(), 3);
}

#[test]
fn test_sqrt_and_inverse() {
    let mut b_data = [4i32, 9, 16, -1];
    let mut out = [0i32; 4];
    let b = BfpVector::new(&mut b_data, 0, true);
    let mut a = BfpVector::new(&mut out, 0, false);
    a.sqrt(&b).unwrap();
    assert_eq!(values(&a), [2.0, 3.0, 4.0, 0.0]);

    let mut d_data = [2i32, -4, 8];
    let mut inv = [0i32; 3];
    let d = BfpVector::new(&mut d_data, 0, true);
    let mut r = BfpVector::new(&mut inv, 0, false);
    r.inverse(&d).unwrap();
    assert_eq!(values(&r), [0.5, -0.25, 0.125]);

    let mut d_data = [2i32, -4, 8];
    let mut d = BfpVector::new(&mut d_data, 0, true);
    d.inverse_in_place().unwrap();
    assert_eq!(values(&d), [0.5, -0.25, 0.125]);
}

#[test]
fn test_elementwise_max_min() {
    let mut b_data = [1i16, -8, 30];
    let mut c_data = [2i16, -9, 7];
    let mut out = [0i16; 3];
    let b = BfpVector::new(&mut b_data, 0, true);
    let c = BfpVector::new(&mut c_data, 1, true);
    let mut a = BfpVector::new(&mut out, 0, false);
    a.max_elementwise(&b, &c).unwrap();
    assert_eq!(values(&a), [4.0, -8.0, 30.0]);
    a.min_elementwise(&b, &c).unwrap();
    assert_eq!(values(&a), [1.0, -18.0, 14.0]);
    a.max_elementwise_assign(&c).unwrap();
    assert_eq!(values(&a), [4.0, -18.0, 14.0]);
    a.min_elementwise_assign(&b).unwrap();
    assert_eq!(values(&a), [1.0, -18.0, 14.0]);
}

#[test]
fn test_reductions() {
    let mut data = [3i16, -7, 9, 9, -7];
    let v = BfpVector::new(&mut data, -1, true);
    let sum = v.sum().unwrap();
    assert_eq!(to_f64(sum.mant, sum.exp), 3.5);
    let abs_sum = v.abs_sum().unwrap();
    assert_eq!(to_f64(abs_sum.mant, abs_sum.exp), 17.5);
    assert_eq!(v.max().unwrap(), Float::new(9, -1));
    assert_eq!(v.min().unwrap(), Float::new(-7, -1));
    assert_eq!(v.argmax().unwrap(), 2);
    assert_eq!(v.argmin().unwrap(), 1);

    let mut c_data = [2i16, 1, 1, 1, 1];
    let c = BfpVector::new(&mut c_data, 0, true);
    let dot = v.dot(&c).unwrap();
    assert_eq!(to_f64(dot.mant, dot.exp), 0.5 * (6.0 - 7.0 + 9.0 + 9.0 - 7.0));
    let energy = v.energy().unwrap();
    assert_eq!(to_f64(energy.mant, energy.exp), 0.25 * (9.0 + 49.0 + 81.0 + 81.0 + 49.0));
}

#[test]
fn test_mean_and_rms() {
    let mut data = [1i16, 2, 3, 4];
    let v = BfpVector::new(&mut data, 0, true);
    let mean = v.mean().unwrap();
    assert!((mean.to_f64() - 2.5).abs() < 1e-8);

    let mut data = [3i32, 4, 3, 4];
    let v = BfpVector::new(&mut data, -2, true);
    let rms = v.rms().unwrap();
    let want = (12.5f64).sqrt() / 4.0;
    assert!((rms.to_f64() - want).abs() < want * 1e-6);
}

#[test]
fn test_mean_of_large_s32_vector() {
    let mut rng = Pcg32::new(6);
    let mut data = random_q30(&mut rng, 1000);
    let v = BfpVector::new(&mut data, -30, true);
    let want = values(&v).iter().sum::<f64>() / 1000.0;
    let got = v.mean().unwrap().to_f64();
    assert!((got - want).abs() < 1e-6);
}

#[test]
fn test_length_mismatch_reported() {
    let mut b_data = [1i32, 2, 3];
    let mut c_data = [1i32, 2, 3, 4];
    let mut out = [0i32; 3];
    let b = BfpVector::new(&mut b_data, 0, true);
    let c = BfpVector::new(&mut c_data, 0, true);
    let mut a = BfpVector::new(&mut out, 0, false).with_config(strict()).unwrap();
    let err = BfpError::LengthMismatch {
        expected: 3,
        found: 4,
    };
    assert_eq!(a.add(&b, &c), Err(err));
    assert_eq!(a.mul(&b, &c), Err(err));
    assert_eq!(a.macc(&b, &c), Err(err));
    assert_eq!(a.max_elementwise(&b, &c), Err(err));
}

#[test]
fn test_invalid_clip_bounds_reported() {
    let mut data = [1i16, 2];
    let mut v = BfpVector::new(&mut data, 0, true).with_config(strict()).unwrap();
    assert_eq!(v.clip_in_place(5, -5, 0), Err(BfpError::InvalidClipBounds));
    assert_eq!(v.data(), &[1, 2]);
}

#[test]
fn test_empty_vector_reported() {
    let mut data: [i32; 0] = [];
    let v = BfpVector::new(&mut data, 0, true).with_config(strict()).unwrap();
    assert_eq!(v.max(), Err(BfpError::EmptyVector));
    assert_eq!(v.argmin(), Err(BfpError::EmptyVector));
    assert_eq!(v.mean(), Err(BfpError::EmptyVector));
    assert_eq!(v.rms(), Err(BfpError::EmptyVector));
}

#[test]
fn test_empty_extremum_is_error_even_unchecked() {
    let config = BfpConfig {
        checks: ContractCheck::Off,
        ..BfpConfig::default()
    };
    let mut data: [i16; 0] = [];
    let v = BfpVector::new(&mut data, 0, true).with_config(config).unwrap();
    assert_eq!(v.min(), Err(BfpError::EmptyVector));
    assert_eq!(v.argmax(), Err(BfpError::EmptyVector));
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "non-empty")]
fn test_debug_checks_panic() {
    let mut data: [i16; 0] = [];
    let v = BfpVector::new(&mut data, 0, true);
    let _ = v.max();
}

#[test]
fn test_with_config_rejects_bad_depth() {
    let mut data = [1i32];
    let config = BfpConfig {
        sqrt_depth_s16: 0,
        ..BfpConfig::default()
    };
    let err = BfpVector::new(&mut data, 0, true).with_config(config).unwrap_err();
    assert_eq!(err, BfpError::InvalidSqrtDepth { depth: 0, max: 15 });
}

#[test]
fn test_sqrt_depth_from_config() {
    let config = BfpConfig {
        sqrt_depth_s32: 4,
        ..BfpConfig::default()
    };
    let mut b_data = [3i32];
    let mut out = [0i32];
    let b = BfpVector::new(&mut b_data, 0, true);
    let mut a = BfpVector::new(&mut out, 0, false).with_config(config).unwrap();
    a.sqrt(&b).unwrap();
    // sqrt(3) = 1.732..., truncated to four result bits.
    assert_eq!(values(&a), [1.5]);
}

#[test]
fn test_width_round_trip() {
    let mut rng = Pcg32::new(7);
    let mut narrow: Vec<i16> = (0..50).map(|_| rng.next_i16() >> 1).collect();
    let mut wide = std::vec![0i32; 50];
    let mut back = std::vec![0i16; 50];

    let src = BfpVector::new(&mut narrow, -9, true);
    let mut w = BfpVector::<i32>::new(&mut wide, 0, false);
    w.convert_from(&src).unwrap();
    assert_eq!(values(&w), values(&src));

    let mut n = BfpVector::<i16>::new(&mut back, 0, false);
    n.convert_from(&w).unwrap();
    assert_eq!(values(&n), values(&src));
}

#[test]
fn test_narrowing_without_guard_bit() {
    let mut narrow = [i16::MAX, -i16::MAX, 1];
    let mut wide = [0i32; 3];
    let mut back = [0i16; 3];
    let config = BfpConfig {
        keep_headroom_on_narrowing: false,
        ..BfpConfig::default()
    };

    let src = BfpVector::new(&mut narrow, 0, true);
    let mut w = BfpVector::<i32>::new(&mut wide, 0, false);
    w.convert_from(&src).unwrap();
    let mut n = BfpVector::<i16>::new(&mut back, 0, false)
        .with_config(config)
        .unwrap();
    n.convert_from(&w).unwrap();
    assert_eq!(n.data(), &[i16::MAX, -i16::MAX, 1]);
    assert_eq!(n.exp(), 0);
}

#[test]
fn test_accumulate_into_s32() {
    let mut data = [0x1234i16, -0x0100, 7];
    let v = BfpVector::new(&mut data, -8, true);
    let mut acc = [1i32 << 20, 0, -5];

    // Accumulator at exponent -12: the 16-bit values are shifted up by 4.
    let hr = v.accumulate(&mut acc, -12).unwrap();
    assert_eq!(acc, [(1 << 20) + 0x12340, -0x1000, 107]);
    assert_eq!(hr, crate::fxp::vect_headroom(&acc));

    // Coarser accumulator floors the low bits away.
    let mut acc = [0i32; 3];
    v.accumulate(&mut acc, -6).unwrap();
    assert_eq!(acc, [0x48d, -0x40, 1]);

    let mut acc = [i32::MAX - 1, 0, 0];
    v.accumulate(&mut acc, -12).unwrap();
    assert_eq!(acc[0], i32::MAX);
}

#[test]
fn test_accumulate_length_mismatch() {
    let mut data = [1i16, 2];
    let v = BfpVector::new(&mut data, 0, true).with_config(strict()).unwrap();
    let mut acc = [0i32; 3];
    assert_eq!(
        v.accumulate(&mut acc, 0),
        Err(BfpError::LengthMismatch {
            expected: 2,
            found: 3
        })
    );
}
