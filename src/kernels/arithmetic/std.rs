// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Standard Arithmetic Kernels Module** - *Scalar Loop Bodies*
//!
//! Portable element-wise loops shared by every kernel strategy.
//!
//! Prefer `dispatch.rs` for the general case: it validates operand lengths, rejects unsupported
//! operations and folds validity. These inner bodies assume all of that has happened.
//!
//! ## Design Notes
//! - Intentionally avoids parallelisation to allow higher-level chunking strategies
//! - `lhs` is written in place, `rhs` is only read
//! - Division bodies interleave the divisor validity check into their own loop

use crate::kernels::arithmetic::PrimitiveKernels;
use crate::kernels::bitmap::{clear_bit, is_valid};
use crate::operators::{BinaryIntOperation, BinaryOperation};

/// `lhs[i] = lhs[i] op rhs[i]` for non-dividing operators.
#[inline(always)]
pub fn binary_body_std<T: Copy, K: PrimitiveKernels<T>>(
    kernels: &K,
    op: BinaryOperation,
    lhs: &mut [T],
    rhs: &[T],
) {
    for (l, &r) in lhs.iter_mut().zip(rhs) {
        *l = kernels.apply(op, *l, r);
    }
}

/// Column⊕column division or remainder.
///
/// A null divisor clears the result bit and leaves the stale value. So does a divisor the
/// strategy cannot divide by (integer zero).
#[inline(always)]
pub fn division_body_std<T: Copy, K: PrimitiveKernels<T>>(
    kernels: &K,
    op: BinaryOperation,
    lhs: &mut [T],
    lhs_validity: &mut [u8],
    rhs: &[T],
    rhs_validity: &[u8],
) {
    for i in 0..lhs.len() {
        if !is_valid(rhs_validity, i) {
            clear_bit(lhs_validity, i);
            continue;
        }
        match kernels.divide(op, lhs[i], rhs[i]) {
            Some(v) => lhs[i] = v,
            None => clear_bit(lhs_validity, i),
        }
    }
}

/// `lhs[i] = lhs[i] op scalar`.
///
/// The caller has already rejected a scalar divisor the strategy cannot divide by.
#[inline(always)]
pub fn scalar_body_std<T: Copy, K: PrimitiveKernels<T>>(
    kernels: &K,
    op: BinaryOperation,
    lhs: &mut [T],
    scalar: T,
) {
    if op.is_division() {
        for l in lhs.iter_mut() {
            if let Some(v) = kernels.divide(op, *l, scalar) {
                *l = v;
            }
        }
    } else {
        for l in lhs.iter_mut() {
            *l = kernels.apply(op, *l, scalar);
        }
    }
}

/// `rhs[i] = scalar op rhs[i]`, written into the column operand.
///
/// For division the column is the divisor: null slots are skipped and left stale,
/// slots the strategy cannot divide by become null.
#[inline(always)]
pub fn reverse_scalar_body_std<T: Copy, K: PrimitiveKernels<T>>(
    kernels: &K,
    op: BinaryOperation,
    scalar: T,
    rhs: &mut [T],
    rhs_validity: &mut [u8],
) {
    if op.is_division() {
        for i in 0..rhs.len() {
            if !is_valid(rhs_validity, i) {
                continue;
            }
            match kernels.divide(op, scalar, rhs[i]) {
                Some(v) => rhs[i] = v,
                None => clear_bit(rhs_validity, i),
            }
        }
    } else {
        for r in rhs.iter_mut() {
            *r = kernels.apply(op, scalar, *r);
        }
    }
}

/// `lhs[i] = lhs[i] << amount` or `>> amount`.
#[inline(always)]
pub fn shift_body_std<T: Copy, K: PrimitiveKernels<T>>(
    kernels: &K,
    op: BinaryIntOperation,
    lhs: &mut [T],
    amount: u32,
) {
    for l in lhs.iter_mut() {
        *l = kernels.shift(op, *l, amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::arithmetic::{FloatKernels, IntegerKernels};

    #[test]
    fn test_binary_body_std_add() {
        let k = IntegerKernels::<i64>::new();
        let mut lhs = [1i64, 2, 3];
        binary_body_std(&k, BinaryOperation::Add, &mut lhs, &[10, 20, 30]);
        assert_eq!(lhs, [11, 22, 33]);
    }

    #[test]
    fn test_division_body_std_null_and_zero_divisors() {
        let k = IntegerKernels::<i32>::new();
        let mut lhs = [10, 20, 30, 40];
        let mut lhs_valid = [0b1111u8];
        // slot 1 divisor null, slot 2 divisor zero
        division_body_std(
            &k,
            BinaryOperation::Divide,
            &mut lhs,
            &mut lhs_valid,
            &[2, 5, 0, 4],
            &[0b1101],
        );
        assert_eq!(lhs_valid, [0b1001]);
        assert_eq!(lhs[0], 5);
        assert_eq!(lhs[1], 20);
        assert_eq!(lhs[2], 30);
        assert_eq!(lhs[3], 10);
    }

    #[test]
    fn test_scalar_body_std_float_divide() {
        let k = FloatKernels::<f32>::new();
        let mut lhs = [1.0f32, 4.0];
        scalar_body_std(&k, BinaryOperation::Divide, &mut lhs, 2.0);
        assert_eq!(lhs, [0.5, 2.0]);
    }

    #[test]
    fn test_reverse_scalar_body_std_divisor_column() {
        let k = IntegerKernels::<u16>::new();
        let mut rhs = [2u16, 0, 7, 5];
        let mut valid = [0b0111u8];
        reverse_scalar_body_std(&k, BinaryOperation::Divide, 100, &mut rhs, &mut valid);
        assert_eq!(rhs[0], 50);
        assert_eq!(rhs[2], 14);
        // zero divisor nulled, null slot untouched
        assert_eq!(valid, [0b0101]);
        assert_eq!(rhs[3], 5);

        let mut rhs = [1u16, 2];
        let mut valid = [0b11u8];
        reverse_scalar_body_std(&k, BinaryOperation::Subtract, 10, &mut rhs, &mut valid);
        assert_eq!(rhs, [9, 8]);
    }

    #[test]
    fn test_shift_body_std() {
        let k = IntegerKernels::<u32>::new();
        let mut lhs = [1u32, 2, 4];
        shift_body_std(&k, BinaryIntOperation::LeftShift, &mut lhs, 2);
        assert_eq!(lhs, [4, 8, 16]);
        shift_body_std(&k, BinaryIntOperation::RightShift, &mut lhs, 1);
        assert_eq!(lhs, [2, 4, 8]);
    }
}
