// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Saturating vector kernels.
//!
//! Kernels take the shifts chosen by a planner, process the mantissas, and
//! return the exact headroom of what they wrote. They never choose exponents.

pub mod complex;
pub mod convert;
pub mod dot;
pub mod elementwise;
pub mod mul;
pub mod rot_table;
pub mod scalar;
pub mod stats;

/// An input of a kernel that may be computed in place.
#[derive(Debug)]
pub enum Operand<'a, T> {
    /// Read from the output buffer itself, before it is overwritten.
    Output,
    Slice(&'a [T]),
}

// Manual impls: `T` itself need not be `Copy`.
impl<T> Clone for Operand<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Operand<'_, T> {}

impl<T: Copy> Operand<'_, T> {
    /// Element `k`, read from `out` when the operand is the output.
    #[inline]
    pub fn get(&self, out: &[T], k: usize) -> T {
        match self {
            Operand::Output => out[k],
            Operand::Slice(s) => s[k],
        }
    }

    pub fn is_output(&self) -> bool {
        matches!(self, Operand::Output)
    }

    /// Length of the operand given the output length.
    pub fn len_with(&self, out_len: usize) -> usize {
        match self {
            Operand::Output => out_len,
            Operand::Slice(s) => s.len(),
        }
    }
}

/// Which operands of a kernel may be the output buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aliasing {
    /// No operand may alias the output.
    Disjoint,
    /// Any operand may alias the output.
    AnyOperand,
    /// Only the operand at this position may alias the output.
    OnlyOperand(usize),
}

impl Aliasing {
    /// Whether this policy allows the given operands, in kernel argument order.
    pub fn permits(self, outputs: &[bool]) -> bool {
        outputs.iter().enumerate().all(|(i, &is_output)| {
            !is_output
                || match self {
                    Aliasing::Disjoint => false,
                    Aliasing::AnyOperand => true,
                    Aliasing::OnlyOperand(k) => k == i,
                }
        })
    }
}
