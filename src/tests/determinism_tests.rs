// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use super::Pcg32;
use crate::types::{Complex, Float, FloatComplex};
use crate::{BfpComplexVector, BfpVector};
use std::vec::Vec;

const LEN: usize = 64;

fn hash_vector(hasher: &mut blake3::Hasher, v: &BfpVector<'_, i32>) {
    hasher.update(&v.exp().to_le_bytes());
    hasher.update(&v.hr().to_le_bytes());
    for m in v.data() {
        hasher.update(&m.to_le_bytes());
    }
}

fn hash_scalar(hasher: &mut blake3::Hasher, mant: i64, exp: i32) {
    hasher.update(&mant.to_le_bytes());
    hasher.update(&exp.to_le_bytes());
}

/// Runs a fixed pipeline over seeded data and returns a digest of every
/// intermediate result.
fn run_pipeline(seed: u64, rounds: usize) -> [u8; 32] {
    let mut rng = Pcg32::new(seed);
    let mut hasher = blake3::Hasher::new();

    for _ in 0..rounds {
        let mut b_data: Vec<i32> = (0..LEN).map(|_| rng.next_i32_scaled()).collect();
        let mut c_data: Vec<i32> = (0..LEN).map(|_| rng.next_i32_scaled()).collect();
        let mut a_data = std::vec![0i32; LEN];
        let b_exp = (rng.next_u32() % 16) as i32 - 8;
        let c_exp = (rng.next_u32() % 16) as i32 - 8;

        let b = BfpVector::new(&mut b_data, b_exp, true);
        let c = BfpVector::new(&mut c_data, c_exp, true);
        let mut a = BfpVector::new(&mut a_data, 0, false);

        a.add(&b, &c).unwrap();
        hash_vector(&mut hasher, &a);
        a.mul_assign(&c).unwrap();
        hash_vector(&mut hasher, &a);
        a.macc(&b, &c).unwrap();
        hash_vector(&mut hasher, &a);
        a.scale_in_place(Float::new(rng.next_i32_scaled(), -3)).unwrap();
        hash_vector(&mut hasher, &a);
        a.abs_in_place();
        a.sqrt_in_place().unwrap();
        hash_vector(&mut hasher, &a);
        a.inverse(&b).unwrap();
        hash_vector(&mut hasher, &a);
        a.clip(&b, -1000, 1000, b_exp + 12).unwrap();
        hash_vector(&mut hasher, &a);

        let dot = b.dot(&c).unwrap();
        hash_scalar(&mut hasher, dot.mant, dot.exp);
        let energy = b.energy().unwrap();
        hash_scalar(&mut hasher, energy.mant, energy.exp);
        let mean = b.mean().unwrap();
        hash_scalar(&mut hasher, mean.mant as i64, mean.exp);

        let mut z_data: Vec<Complex<i32>> = b
            .data()
            .iter()
            .zip(c.data())
            .map(|(&re, &im)| Complex::new(re, im))
            .collect();
        let mut z = BfpComplexVector::new(&mut z_data, b_exp, true);
        z.scale_in_place(FloatComplex::new(rng.next_i32_scaled(), rng.next_i32_scaled(), 0))
            .unwrap();
        a.mag(&z).unwrap();
        hash_vector(&mut hasher, &a);
    }

    *hasher.finalize().as_bytes()
}

#[test]
fn test_determinism_harness() {
    let seed = 42;
    let rounds = 20;

    let hash1 = run_pipeline(seed, rounds);
    let hash2 = run_pipeline(seed, rounds);
    assert_eq!(hash1, hash2, "same seed must give identical results");

    let hash3 = run_pipeline(seed + 1, rounds);
    assert_ne!(hash1, hash3);
}
