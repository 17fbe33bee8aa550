// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Arithmetic Dispatch Module** - *Null-Aware Kernel Entry Points*
//!
//! The `handle_*` family every typed column calls into. Each entry point:
//! 1. validates operand lengths and validity-bitmap capacity,
//! 2. resolves the element's kernel strategy (compile time, via [`Element`]),
//! 3. rejects operations the element type does not define,
//! 4. runs the loop body and propagates nulls.
//!
//! ## Null propagation
//! - **column⊕column**: the left operand is overwritten in place, then the right validity is
//!   ANDed into the left validity. Divide and Modulo instead check the divisor's validity per
//!   element inside their own loop.
//! - **column⊕scalar**: a present scalar cannot introduce nulls. Integer division by a zero
//!   scalar is rejected with `KernelError::DivideByZero` before anything is written.
//! - **scalar⊕column**: the column is the divisor for Divide/Modulo, so null slots are skipped
//!   and integer zero slots become null.
//!
//! Every check happens before the first write, so a failed call leaves its operands untouched.

use tracing::warn;

use crate::errors::KernelError;
use crate::kernels::arithmetic::PrimitiveKernels;
use crate::kernels::arithmetic::std::{
    binary_body_std, division_body_std, reverse_scalar_body_std, scalar_body_std, shift_body_std,
};
use crate::kernels::bitmap::{bytes_for, elementwise_and_in_place};
use crate::operators::{BinaryIntOperation, BinaryOperation};
use crate::traits::element::Element;
use crate::utils::{confirm_bitmap_capacity, confirm_equal_len};

/// Column⊕column operation written into `left` in place.
///
/// Afterwards `left_validity` holds the union of both operands' null sets.
pub fn handle_operation<T: Element>(
    op: BinaryOperation,
    left: &mut [T],
    left_validity: &mut [u8],
    right: &[T],
    right_validity: &[u8],
) -> Result<(), KernelError> {
    let len = left.len();
    confirm_equal_len("handle_operation", len, right.len())?;
    confirm_bitmap_capacity("handle_operation: left validity", left_validity, len)?;
    confirm_bitmap_capacity("handle_operation: right validity", right_validity, len)?;
    let kernels = T::kernels();
    confirm_binary_supported::<T>(kernels, op)?;

    if op.is_division() {
        division_body_std(kernels, op, left, left_validity, right, right_validity);
    } else {
        binary_body_std(kernels, op, left, right);
        let n = bytes_for(len);
        elementwise_and_in_place(&mut left_validity[..n], &right_validity[..n]);
    }
    Ok(())
}

/// Column⊕scalar operation written into `left` in place.
pub fn handle_scalar_operation<T: Element>(
    op: BinaryOperation,
    left: &mut [T],
    scalar: T,
) -> Result<(), KernelError> {
    let kernels = T::kernels();
    confirm_binary_supported::<T>(kernels, op)?;
    if op.is_division() && kernels.is_zero_divisor(scalar) {
        return Err(KernelError::DivideByZero(format!(
            "{} {} by scalar zero",
            T::NAME,
            op
        )));
    }
    scalar_body_std(kernels, op, left, scalar);
    Ok(())
}

/// Scalar⊕column operation written into the column operand `right` in place.
pub fn handle_reverse_scalar_operation<T: Element>(
    op: BinaryOperation,
    scalar: T,
    right: &mut [T],
    right_validity: &mut [u8],
) -> Result<(), KernelError> {
    confirm_bitmap_capacity(
        "handle_reverse_scalar_operation: right validity",
        right_validity,
        right.len(),
    )?;
    let kernels = T::kernels();
    confirm_binary_supported::<T>(kernels, op)?;
    reverse_scalar_body_std(kernels, op, scalar, right, right_validity);
    Ok(())
}

/// Left or right bit-shift by a scalar amount. Validity is unaffected.
pub fn handle_shift_operation<T: Element>(
    op: BinaryIntOperation,
    left: &mut [T],
    amount: i32,
) -> Result<(), KernelError> {
    let kernels = T::kernels();
    if !kernels.supports_shift() {
        warn!(element = T::NAME, op = %op, "rejected unsupported shift");
        return Err(KernelError::UnsupportedOperation(format!(
            "{} is not supported for {}",
            op,
            T::NAME
        )));
    }
    if amount < 0 {
        return Err(KernelError::InvalidArguments(format!(
            "{}: negative shift amount {}",
            op, amount
        )));
    }
    shift_body_std(kernels, op, left, amount as u32);
    Ok(())
}

#[inline]
fn confirm_binary_supported<T: Element>(
    kernels: &T::Kernels,
    op: BinaryOperation,
) -> Result<(), KernelError> {
    if kernels.supports_binary(op) {
        return Ok(());
    }
    warn!(element = T::NAME, op = %op, "rejected unsupported binary operation");
    Err(KernelError::UnsupportedOperation(format!(
        "{} is not supported for {}",
        op,
        T::NAME
    )))
}
