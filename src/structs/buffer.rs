// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Buffer** - *Fixed-capacity value chunk with a parallel validity bitmap*
//!
//! A column's data lives in a sequence of these chunks. Values sit in 64-byte aligned
//! `Vec64` storage; a `minarrow::Bitmask` carries one bit per slot (1 = valid, 0 = null). Null slots
//! keep a stale value that every kernel ignores.
//!
//! `capacity` is the logical chunk size. Storage grows on demand up to it, so a large
//! capacity does not allocate up front.

use core::fmt;

use minarrow::{Bitmask, Vec64};

use crate::errors::KernelError;
use crate::kernels::bitmap::null_count;
use crate::traits::dense_iter::valid_slots;
use crate::traits::element::Element;

pub struct Buffer<T: Element> {
    values: Vec64<T>,
    validity: Bitmask,
    capacity: usize,
}

impl<T: Element> Buffer<T> {
    /// Empty chunk holding at most `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec64::new(),
            validity: Bitmask::default(),
            capacity,
        }
    }

    /// Builds a chunk from existing values and validity.
    ///
    /// # Errors
    /// `InvalidArguments` if the bitmap covers fewer slots than `values`, or `values` exceeds
    /// `capacity`.
    pub fn from_parts(
        values: Vec64<T>,
        validity: Bitmask,
        capacity: usize,
    ) -> Result<Self, KernelError> {
        if validity.len() < values.len() {
            return Err(KernelError::InvalidArguments(format!(
                "Buffer::from_parts: bitmap of {} bits cannot cover {} values",
                validity.len(),
                values.len()
            )));
        }
        if values.len() > capacity {
            return Err(KernelError::InvalidArguments(format!(
                "Buffer::from_parts: {} values exceed capacity {}",
                values.len(),
                capacity
            )));
        }
        Ok(Self {
            values,
            validity,
            capacity,
        })
    }

    /// Appends a slot. `None` stores `T::default()` under a cleared bit.
    ///
    /// Panics if the chunk is full; the column rolls over to a new chunk before that.
    #[inline]
    pub fn push(&mut self, value: Option<T>) {
        assert!(!self.is_full(), "Buffer::push: chunk of {} is full", self.capacity);
        // setting the bit one past the end grows the mask by exactly one slot
        self.validity.set(self.values.len(), value.is_some());
        self.values.push(value.unwrap_or_default());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.len() == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Slot `i`, or `None` if it is null.
    #[inline]
    pub fn get(&self, i: usize) -> Option<T> {
        if self.validity.get(i) {
            Some(self.values[i])
        } else {
            None
        }
    }

    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        self.validity.get(i)
    }

    /// Raw values including stale slots under nulls.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    #[inline]
    pub fn validity(&self) -> &Bitmask {
        &self.validity
    }

    #[inline]
    pub fn validity_mut(&mut self) -> &mut Bitmask {
        &mut self.validity
    }

    /// Disjoint mutable borrows of values and validity bytes for in-place kernels.
    #[inline]
    pub fn split_mut(&mut self) -> (&mut [T], &mut [u8]) {
        let bits: &mut [u8] = &mut self.validity;
        (&mut self.values, bits)
    }

    /// Nulls among the live slots. A mask handed to `from_parts` may be longer than the
    /// values, so the count stops at `len`.
    pub fn null_count(&self) -> usize {
        null_count(&self.validity, self.len())
    }

    /// Local slot positions of the valid values, ascending.
    pub fn valid_indices(&self) -> Vec<usize> {
        valid_slots(&self.values, Some(&self.validity))
    }
}

impl<T: Element> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        Self {
            values: Vec64::from_slice(&self.values),
            validity: self.validity.clone(),
            capacity: self.capacity,
        }
    }
}

impl<T: Element> fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("values", &self.values())
            .field("validity", &self.validity)
            .field("capacity", &self.capacity)
            .finish()
    }
}
