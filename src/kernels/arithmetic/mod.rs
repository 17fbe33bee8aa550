// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Arithmetic Kernels Module** - *Per-Type Kernel Strategies*
//!
//! Element-level arithmetic, shift and comparison strategies for every primitive a column
//! can hold, plus the null-aware slice kernels built on top of them.
//!
//! ## Modules
//! - **`dispatch`**: public entry points validating operands, rejecting unsupported
//!   operations and propagating validity
//! - **`std`**: scalar loop bodies shared by every strategy
//!
//! ## Strategies
//! | Strategy | Types | Binary ops | Shifts | Comparisons |
//! |---|---|---|---|---|
//! | `IntegerKernels<T>` | i8..i64, u8..u64 | all (wrapping) | yes | all |
//! | `FloatKernels<T>` | f32, f64 | Add..Modulo | no | all |
//! | `BooleanKernels` | bool | And, Or, Xor | no | Equals, NotEquals |
//! | `TimestampKernels` | `Timestamp` | none | no | Equals, NotEquals |
//!
//! Strategies are zero-sized; each [`Element`](crate::traits::element::Element) impl owns a
//! `'static` instance.

pub mod dispatch;
pub mod std;

use core::marker::PhantomData;

use num_traits::{CheckedRem, Float, PrimInt, WrappingAdd, WrappingMul, WrappingSub};

use crate::operators::{BinaryIntOperation, BinaryOperation, ComparisonOperation};
use crate::traits::element::Timestamp;

/// Element-level operations a primitive type provides to the slice kernels.
///
/// The slice kernels only call `apply`, `divide` and `shift` after the matching
/// `supports_*` check has passed.
pub trait PrimitiveKernels<T: Copy>: Send + Sync {
    fn supports_binary(&self, op: BinaryOperation) -> bool;

    fn supports_shift(&self) -> bool {
        false
    }

    fn supports_comparison(&self, op: ComparisonOperation) -> bool;

    /// Non-dividing binary operation.
    fn apply(&self, op: BinaryOperation, lhs: T, rhs: T) -> T;

    /// `Divide` / `Modulo`. `None` when the divisor cannot produce a value.
    fn divide(&self, op: BinaryOperation, _lhs: T, _rhs: T) -> Option<T> {
        unreachable!("{op} is not defined for {}", core::any::type_name::<T>())
    }

    /// True when dividing by `rhs` can never yield a value.
    fn is_zero_divisor(&self, _rhs: T) -> bool {
        false
    }

    fn shift(&self, op: BinaryIntOperation, _lhs: T, _amount: u32) -> T {
        unreachable!("{op} is not defined for {}", core::any::type_name::<T>())
    }

    fn compare(&self, op: ComparisonOperation, lhs: T, rhs: T) -> bool;
}

/// Wrapping integer kernels.
pub struct IntegerKernels<T>(PhantomData<T>);

impl<T> IntegerKernels<T> {
    pub const fn new() -> Self {
        IntegerKernels(PhantomData)
    }
}

impl<T> PrimitiveKernels<T> for IntegerKernels<T>
where
    T: PrimInt + WrappingAdd + WrappingSub + WrappingMul + CheckedRem + Send + Sync,
{
    #[inline(always)]
    fn supports_binary(&self, _op: BinaryOperation) -> bool {
        true
    }

    #[inline(always)]
    fn supports_shift(&self) -> bool {
        true
    }

    #[inline(always)]
    fn supports_comparison(&self, _op: ComparisonOperation) -> bool {
        true
    }

    #[inline(always)]
    fn apply(&self, op: BinaryOperation, lhs: T, rhs: T) -> T {
        match op {
            BinaryOperation::Add => lhs.wrapping_add(&rhs),
            BinaryOperation::Subtract => lhs.wrapping_sub(&rhs),
            BinaryOperation::Multiply => lhs.wrapping_mul(&rhs),
            BinaryOperation::And => lhs & rhs,
            BinaryOperation::Or => lhs | rhs,
            BinaryOperation::Xor => lhs ^ rhs,
            BinaryOperation::Divide | BinaryOperation::Modulo => {
                unreachable!("division routes through `divide`")
            }
        }
    }

    #[inline(always)]
    fn divide(&self, op: BinaryOperation, lhs: T, rhs: T) -> Option<T> {
        if rhs == T::zero() {
            return None;
        }
        // Only MIN / -1 overflows here; its wrapping quotient is MIN itself and the remainder 0.
        match op {
            BinaryOperation::Divide => Some(lhs.checked_div(&rhs).unwrap_or(lhs)),
            BinaryOperation::Modulo => Some(lhs.checked_rem(&rhs).unwrap_or_else(T::zero)),
            _ => unreachable!("{op} is not a division"),
        }
    }

    #[inline(always)]
    fn is_zero_divisor(&self, rhs: T) -> bool {
        rhs == T::zero()
    }

    /// Shift amounts are masked to the type width.
    #[inline(always)]
    fn shift(&self, op: BinaryIntOperation, lhs: T, amount: u32) -> T {
        let bits = (core::mem::size_of::<T>() * 8) as u32;
        let n = (amount % bits) as usize;
        match op {
            BinaryIntOperation::LeftShift => lhs << n,
            BinaryIntOperation::RightShift => lhs >> n,
        }
    }

    #[inline(always)]
    fn compare(&self, op: ComparisonOperation, lhs: T, rhs: T) -> bool {
        compare_partial(op, lhs, rhs)
    }
}

/// IEEE 754 floating-point kernels. Division by zero yields ±Inf or NaN.
pub struct FloatKernels<T>(PhantomData<T>);

impl<T> FloatKernels<T> {
    pub const fn new() -> Self {
        FloatKernels(PhantomData)
    }
}

impl<T> PrimitiveKernels<T> for FloatKernels<T>
where
    T: Float + Send + Sync,
{
    #[inline(always)]
    fn supports_binary(&self, op: BinaryOperation) -> bool {
        !op.is_bitwise()
    }

    #[inline(always)]
    fn supports_comparison(&self, _op: ComparisonOperation) -> bool {
        true
    }

    #[inline(always)]
    fn apply(&self, op: BinaryOperation, lhs: T, rhs: T) -> T {
        match op {
            BinaryOperation::Add => lhs + rhs,
            BinaryOperation::Subtract => lhs - rhs,
            BinaryOperation::Multiply => lhs * rhs,
            BinaryOperation::Divide => lhs / rhs,
            BinaryOperation::Modulo => lhs % rhs,
            _ => unreachable!("{op} is not defined for floats"),
        }
    }

    #[inline(always)]
    fn divide(&self, op: BinaryOperation, lhs: T, rhs: T) -> Option<T> {
        Some(self.apply(op, lhs, rhs))
    }

    #[inline(always)]
    fn compare(&self, op: ComparisonOperation, lhs: T, rhs: T) -> bool {
        compare_partial(op, lhs, rhs)
    }
}

/// Logical kernels for `bool`.
pub struct BooleanKernels;

impl PrimitiveKernels<bool> for BooleanKernels {
    #[inline(always)]
    fn supports_binary(&self, op: BinaryOperation) -> bool {
        op.is_bitwise()
    }

    #[inline(always)]
    fn supports_comparison(&self, op: ComparisonOperation) -> bool {
        op.is_equality()
    }

    #[inline(always)]
    fn apply(&self, op: BinaryOperation, lhs: bool, rhs: bool) -> bool {
        match op {
            BinaryOperation::And => lhs & rhs,
            BinaryOperation::Or => lhs | rhs,
            BinaryOperation::Xor => lhs ^ rhs,
            _ => unreachable!("{op} is not defined for bool"),
        }
    }

    #[inline(always)]
    fn compare(&self, op: ComparisonOperation, lhs: bool, rhs: bool) -> bool {
        compare_partial(op, lhs, rhs)
    }
}

/// Timestamps only support equality checks.
pub struct TimestampKernels;

impl PrimitiveKernels<Timestamp> for TimestampKernels {
    #[inline(always)]
    fn supports_binary(&self, _op: BinaryOperation) -> bool {
        false
    }

    #[inline(always)]
    fn supports_comparison(&self, op: ComparisonOperation) -> bool {
        op.is_equality()
    }

    fn apply(&self, op: BinaryOperation, _lhs: Timestamp, _rhs: Timestamp) -> Timestamp {
        unreachable!("{op} is not defined for timestamps")
    }

    #[inline(always)]
    fn compare(&self, op: ComparisonOperation, lhs: Timestamp, rhs: Timestamp) -> bool {
        compare_partial(op, lhs, rhs)
    }
}

#[inline(always)]
fn compare_partial<T: PartialOrd>(op: ComparisonOperation, lhs: T, rhs: T) -> bool {
    match op {
        ComparisonOperation::Equals => lhs == rhs,
        ComparisonOperation::NotEquals => lhs != rhs,
        ComparisonOperation::GreaterThanOrEqual => lhs >= rhs,
        ComparisonOperation::LessThanOrEqual => lhs <= rhs,
        ComparisonOperation::GreaterThan => lhs > rhs,
        ComparisonOperation::LessThan => lhs < rhs,
    }
}
