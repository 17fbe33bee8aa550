// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Utility Functions** - *Operand Validation Helpers*
//!
//! Shared argument checks used by the kernel entry points before any buffer is written.

use crate::errors::{KernelError, log_length_mismatch};
use crate::kernels::bitmap::bytes_for;

/// Validates that two lengths are equal for binary kernel operations.
///
/// # Parameters
/// - `label`: Descriptive context label for error reporting (e.g., "handle_operation")
/// - `a`: Length of the first operand
/// - `b`: Length of the second operand
///
/// # Returns
/// `Ok(())` if lengths are equal, otherwise `KernelError::LengthMismatch` with diagnostic details.
#[inline(always)]
pub fn confirm_equal_len(label: &str, a: usize, b: usize) -> Result<(), KernelError> {
    if a != b {
        return Err(KernelError::LengthMismatch(log_length_mismatch(
            label.to_string(),
            a,
            b,
        )));
    }
    Ok(())
}

/// Validates that a validity bitmap holds at least `len` bits.
#[inline(always)]
pub fn confirm_bitmap_capacity(label: &str, bitmap: &[u8], len: usize) -> Result<(), KernelError> {
    if bitmap.len() < bytes_for(len) {
        return Err(KernelError::InvalidArguments(format!(
            "{}: bitmap of {} bytes cannot cover {} slots",
            label,
            bitmap.len(),
            len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_equal_len() {
        assert!(confirm_equal_len("x", 3, 3).is_ok());
        assert!(matches!(
            confirm_equal_len("x", 3, 4),
            Err(KernelError::LengthMismatch(_))
        ));
    }

    #[test]
    fn test_confirm_bitmap_capacity() {
        assert!(confirm_bitmap_capacity("x", &[0u8], 8).is_ok());
        assert!(confirm_bitmap_capacity("x", &[], 0).is_ok());
        assert!(confirm_bitmap_capacity("x", &[0u8], 9).is_err());
    }
}
