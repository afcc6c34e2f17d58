// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod bfp_tests;
pub mod config_tests;
pub mod determinism_tests;
pub mod math_tests;

use crate::types::Exponent;

/// A simple deterministic RNG for tests.
pub(crate) struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed, inc: 1 }
    }

    pub(crate) fn next_u32(&mut self) -> u32 {
        let oldstate = self.state;
        self.state = oldstate
            .wrapping_mul(6364136223846793005)
            .wrapping_add(self.inc);
        let xorshifted = (((oldstate >> 18) ^ oldstate) >> 27) as u32;
        let rot = (oldstate >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    pub(crate) fn next_i16(&mut self) -> i16 {
        self.next_u32() as i16
    }

    pub(crate) fn next_i32(&mut self) -> i32 {
        self.next_u32() as i32
    }

    /// A value with a random number of significant bits, so headrooms vary.
    pub(crate) fn next_i32_scaled(&mut self) -> i32 {
        let shr = self.next_u32() % 31;
        self.next_i32() >> shr
    }

    pub(crate) fn next_i16_scaled(&mut self) -> i16 {
        let shr = self.next_u32() % 15;
        self.next_i16() >> shr
    }
}

pub(crate) fn to_f64<T: Into<f64>>(mant: T, exp: Exponent) -> f64 {
    mant.into() * 2f64.powi(exp)
}

/// Installs a test subscriber honoring `RUST_LOG`. Safe to call repeatedly.
pub(crate) fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
