// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Comparison Operations Kernels Module** - *Element-wise Comparison Operations*
//!
//! The six comparison kernels (equals, not-equals, >=, <=, >, <) in column⊕column and
//! column⊕scalar shapes. Each produces a freshly allocated boolean buffer of the operand
//! length.
//!
//! Result validity is not computed here: stale values under null slots are compared like
//! any other value and the caller combines the operands' validity bitmaps.
//!
//! `bool` and `Timestamp` only define `Equals` and `NotEquals`; other operators are rejected
//! with `KernelError::UnsupportedOperation`. Float comparisons follow IEEE 754, so `NaN`
//! compares unequal to everything including itself.

use minarrow::Vec64;
use tracing::warn;

use crate::errors::KernelError;
use crate::kernels::arithmetic::PrimitiveKernels;
use crate::operators::ComparisonOperation;
use crate::traits::element::Element;
use crate::utils::confirm_equal_len;

/// Column⊕column comparison.
pub fn compare<T: Element>(
    op: ComparisonOperation,
    left: &[T],
    right: &[T],
) -> Result<Vec64<bool>, KernelError> {
    confirm_equal_len("compare", left.len(), right.len())?;
    let kernels = confirm_comparison_supported::<T>(op)?;
    let mut out = Vec64::with_capacity(left.len());
    for (&l, &r) in left.iter().zip(right) {
        out.push(kernels.compare(op, l, r));
    }
    Ok(out)
}

/// Column⊕scalar comparison.
pub fn compare_scalar<T: Element>(
    op: ComparisonOperation,
    left: &[T],
    scalar: T,
) -> Result<Vec64<bool>, KernelError> {
    let kernels = confirm_comparison_supported::<T>(op)?;
    let mut out = Vec64::with_capacity(left.len());
    for &l in left {
        out.push(kernels.compare(op, l, scalar));
    }
    Ok(out)
}

#[inline]
fn confirm_comparison_supported<T: Element>(
    op: ComparisonOperation,
) -> Result<&'static T::Kernels, KernelError> {
    let kernels = T::kernels();
    if kernels.supports_comparison(op) {
        return Ok(kernels);
    }
    warn!(element = T::NAME, op = %op, "rejected unsupported comparison");
    Err(KernelError::UnsupportedOperation(format!(
        "{} is not supported for {}",
        op,
        T::NAME
    )))
}
