// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Error Types** - *Kernel Operation Error Handling*
//!
//! Error types for sort, merge and kernel operations with structured error reporting.
//!
//! ## Error Categories
//! - **Type Errors**: Operations a primitive type does not define (e.g. `bool + bool`)
//! - **Dimension Errors**: Column length and buffer capacity mismatches
//! - **Boundary Errors**: Out-of-bounds indices and integer divide-by-zero against a scalar
//! - **Comparer Errors**: A comparison function that is not a consistent total order
//!
//! Division by a *null* element is not an error: it yields a null result.

use core::fmt;
use std::error::Error;

/// Comprehensive error type for all kernel operations.
///
/// Each variant includes a contextual message string providing specific details
/// about the error condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Column or buffer length mismatch between operands.
    LengthMismatch(String),

    /// The element type does not define the requested operation.
    UnsupportedOperation(String),

    /// Invalid arguments provided to kernel function.
    InvalidArguments(String),

    /// Index or memory access out of bounds.
    OutOfBounds(String),

    /// Integer division or remainder by a zero scalar.
    DivideByZero(String),

    /// The supplied comparison function is not a consistent total order.
    BadComparer(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::LengthMismatch(msg) => write!(f, "Length mismatch: {}", msg),
            KernelError::UnsupportedOperation(msg) => write!(f, "Unsupported operation: {}", msg),
            KernelError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            KernelError::OutOfBounds(msg) => write!(f, "Out of bounds: {}", msg),
            KernelError::DivideByZero(msg) => write!(f, "Divide by Zero error: {}", msg),
            KernelError::BadComparer(msg) => write!(f, "Bad comparer: {}", msg),
        }
    }
}

impl Error for KernelError {}

/// Creates a formatted error message for length mismatches between left-hand side (LHS) and right-hand side (RHS) operands.
///
/// # Arguments
/// * `fname` - Function name where the mismatch occurred
/// * `lhs` - Length of the left-hand side operand
/// * `rhs` - Length of the right-hand side operand
pub fn log_length_mismatch(fname: String, lhs: usize, rhs: usize) -> String {
    format!("{} => Length mismatch: LHS {} RHS {}", fname, lhs, rhs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let e = KernelError::UnsupportedOperation("bool Add".into());
        assert_eq!(e.to_string(), "Unsupported operation: bool Add");
        let e = KernelError::BadComparer("left ran past hi".into());
        assert_eq!(e.to_string(), "Bad comparer: left ran past hi");
    }

    #[test]
    fn test_every_variant_displays_its_message() {
        let all = [
            KernelError::LengthMismatch("m".into()),
            KernelError::UnsupportedOperation("m".into()),
            KernelError::InvalidArguments("m".into()),
            KernelError::OutOfBounds("m".into()),
            KernelError::DivideByZero("m".into()),
            KernelError::BadComparer("m".into()),
        ];
        for e in all {
            let shown = e.to_string();
            assert!(shown.ends_with(": m"), "{shown}");
            assert!(!format!("{e:?}").is_empty());
        }
    }

    #[test]
    fn test_log_length_mismatch() {
        let msg = log_length_mismatch("apply".to_string(), 3, 4);
        assert_eq!(msg, "apply => Length mismatch: LHS 3 RHS 4");
    }
}
