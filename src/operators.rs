// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! Contains the kernel operators used for matching and routing purposes

use core::fmt;

/// Element-wise binary operators for column⊕column, column⊕scalar and scalar⊕column kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperation {
    /// Addition (`lhs + rhs`), wrapping for integers
    Add,
    /// Subtraction (`lhs - rhs`), wrapping for integers
    Subtract,
    /// Multiplication (`lhs * rhs`), wrapping for integers
    Multiply,
    /// Division (`lhs / rhs`)
    ///
    /// Integer divisors are handled per shape:
    /// - column⊕column and scalar⊕column: a null or zero divisor element nullifies that
    ///   result slot.
    /// - column⊕scalar: a zero scalar divisor is rejected with `KernelError::DivideByZero`
    ///   before anything is written.
    ///
    /// `MIN / -1` wraps to `MIN`. For floating-point, follows IEEE 754 (yields ±Inf or NaN).
    Divide,
    /// Remainder (`lhs % rhs`), same divisor handling as `Divide`
    Modulo,
    /// Bitwise / logical AND
    And,
    /// Bitwise / logical OR
    Or,
    /// Bitwise / logical XOR
    Xor,
}

impl BinaryOperation {
    /// Whether the right operand acts as a divisor and needs a per-element guard.
    #[inline(always)]
    pub fn is_division(self) -> bool {
        matches!(self, BinaryOperation::Divide | BinaryOperation::Modulo)
    }

    /// Whether the operator is a bitwise/logical one.
    #[inline(always)]
    pub fn is_bitwise(self) -> bool {
        matches!(
            self,
            BinaryOperation::And | BinaryOperation::Or | BinaryOperation::Xor
        )
    }
}

/// Bit-shift operators taking a scalar shift amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryIntOperation {
    /// `lhs << amount`
    LeftShift,
    /// `lhs >> amount` (arithmetic for signed types)
    RightShift,
}

/// Comparison operators producing boolean buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperation {
    /// Equality comparison (`lhs == rhs`)
    Equals,
    /// Inequality comparison (`lhs != rhs`)
    NotEquals,
    /// Greater-than-or-equal comparison (`lhs >= rhs`)
    GreaterThanOrEqual,
    /// Less-than-or-equal comparison (`lhs <= rhs`)
    LessThanOrEqual,
    /// Greater-than comparison (`lhs > rhs`)
    GreaterThan,
    /// Less-than comparison (`lhs < rhs`)
    LessThan,
}

impl ComparisonOperation {
    /// Equality and inequality are defined for every element type; the rest need an ordering.
    #[inline(always)]
    pub fn is_equality(self) -> bool {
        matches!(
            self,
            ComparisonOperation::Equals | ComparisonOperation::NotEquals
        )
    }
}

impl fmt::Display for BinaryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for BinaryIntOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for ComparisonOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
