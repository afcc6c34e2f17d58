// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Wide accumulator for reductions.

/// A running sum that saturates symmetrically at `±(2^(bits-1) - 1)` after
/// every term, the way a hardware accumulator register of that width would.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accumulator {
    value: i64,
    bound: i64,
}

impl Accumulator {
    /// An empty accumulator `bits` wide (at most 64).
    pub const fn new(bits: u32) -> Self {
        let bound = if bits >= 64 {
            i64::MAX
        } else {
            (1i64 << (bits - 1)) - 1
        };
        Self { value: 0, bound }
    }

    pub fn add(&mut self, term: i64) {
        self.value = self.value.saturating_add(term).clamp(-self.bound, self.bound);
    }

    pub fn sub(&mut self, term: i64) {
        self.value = self.value.saturating_sub(term).clamp(-self.bound, self.bound);
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn bound(&self) -> i64 {
        self.bound
    }
}
