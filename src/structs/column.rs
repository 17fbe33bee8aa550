// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Primitive Column** - *Named, chunked, nullable sequence of primitive values*
//!
//! A column spreads its slots over fixed-capacity [`Buffer`] chunks so it can grow past a
//! single allocation. Global slot `i` lives in chunk `i / buffer_capacity` at local position
//! `i % buffer_capacity`; every chunk but the last is full.
//!
//! ## Sorting
//! Each chunk's valid slots are index-sorted independently with `introspective_sort`, and the
//! per-chunk runs are interleaved by `merge_sorted_runs`. Nulls never reach the comparer: they
//! are collected separately and placed after the ascending run. Descending order reverses the
//! complete ascending permutation, so nulls come first. The permutation is applied with
//! [`PrimitiveColumn::clone_with_index_map`].
//!
//! ## Arithmetic and comparison
//! Chunks of two columns are walked pairwise and handed to the kernel dispatch layer, so both
//! columns must share length and chunk capacity. Comparison results carry the AND of both
//! operands' validity.

use minarrow::{Bitmask, Vec64};
use tracing::debug;

use crate::config::MAX_BUFFER_CAPACITY;
use crate::errors::{KernelError, log_length_mismatch};
use crate::kernels::arithmetic::dispatch::{
    handle_operation, handle_reverse_scalar_operation, handle_scalar_operation,
    handle_shift_operation,
};
use crate::kernels::bitmap::{bytes_for, elementwise_and};
use crate::kernels::comparison;
use crate::kernels::merge::{SortedRun, merge_sorted_runs};
use crate::kernels::sort::{SortOptions, introspective_sort};
use crate::operators::{BinaryIntOperation, BinaryOperation, ComparisonOperation};
use crate::structs::buffer::Buffer;
use crate::traits::dense_iter::collect_valid;
use crate::traits::element::Element;
use crate::utils::confirm_equal_len;

/// Ascending sort result split into the ordered valid slots and the null slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortIndices {
    /// Global indices of valid slots in ascending value order.
    pub sorted: Vec<usize>,
    /// Global indices of null slots in column order.
    pub nulls: Vec<usize>,
}

impl SortIndices {
    /// Full permutation: nulls last when ascending; descending reverses the whole sequence.
    pub fn into_permutation(self, options: SortOptions) -> Vec<usize> {
        let mut out = self.sorted;
        out.extend(self.nulls);
        if options.descending {
            out.reverse();
        }
        out
    }
}

#[derive(Debug, Clone)]
pub struct PrimitiveColumn<T: Element> {
    name: String,
    buffers: Vec<Buffer<T>>,
    buffer_capacity: usize,
    len: usize,
}

impl<T: Element> PrimitiveColumn<T> {
    /// Empty column with the default chunk capacity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buffers: Vec::new(),
            buffer_capacity: MAX_BUFFER_CAPACITY,
            len: 0,
        }
    }

    /// Empty column whose chunks hold `buffer_capacity` slots.
    ///
    /// # Errors
    /// `InvalidArguments` unless `buffer_capacity` is a power of two no larger than
    /// `MAX_BUFFER_CAPACITY`.
    pub fn with_buffer_capacity(
        name: impl Into<String>,
        buffer_capacity: usize,
    ) -> Result<Self, KernelError> {
        if !buffer_capacity.is_power_of_two() || buffer_capacity > MAX_BUFFER_CAPACITY {
            return Err(KernelError::InvalidArguments(format!(
                "buffer capacity {} must be a power of two no larger than {}",
                buffer_capacity, MAX_BUFFER_CAPACITY
            )));
        }
        let mut col = Self::new(name);
        col.buffer_capacity = buffer_capacity;
        Ok(col)
    }

    pub fn from_options<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<T>>,
    {
        let mut col = Self::new(name);
        col.extend(values);
        col
    }

    /// Column with no nulls.
    pub fn from_values(name: impl Into<String>, values: &[T]) -> Self {
        Self::from_options(name, values.iter().copied().map(Some))
    }

    /// Appends a slot, opening a new chunk when the last one is full.
    pub fn push(&mut self, value: Option<T>) {
        let needs_buffer = self.buffers.last().map_or(true, Buffer::is_full);
        if needs_buffer {
            self.buffers.push(Buffer::with_capacity(self.buffer_capacity));
        }
        if let Some(last) = self.buffers.last_mut() {
            last.push(value);
        }
        self.len += 1;
    }

    pub fn extend<I: IntoIterator<Item = Option<T>>>(&mut self, values: I) {
        for v in values {
            self.push(v);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[inline]
    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    /// Chunks in column order.
    #[inline]
    pub fn buffers(&self) -> &[Buffer<T>] {
        &self.buffers
    }

    /// Sum of cleared bits across every chunk's live range.
    pub fn null_count(&self) -> usize {
        self.buffers.iter().map(Buffer::null_count).sum()
    }

    /// Slot `i`, `None` when null. Panics if `i >= len`.
    #[inline]
    pub fn get(&self, i: usize) -> Option<T> {
        let (b, local) = self.locate(i);
        self.buffers[b].get(local)
    }

    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        let (b, local) = self.locate(i);
        self.buffers[b].is_valid(local)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<T>> + '_ {
        self.buffers
            .iter()
            .flat_map(|b| (0..b.len()).map(move |i| b.get(i)))
    }

    /// Non-null values in column order.
    pub fn valid_values(&self) -> Vec64<T> {
        let mut out = Vec64::with_capacity(self.len - self.null_count());
        for b in &self.buffers {
            for v in collect_valid(b.values(), Some(b.validity())).iter() {
                out.push(*v);
            }
        }
        out
    }

    #[inline]
    fn locate(&self, i: usize) -> (usize, usize) {
        assert!(i < self.len, "index {} out of range for column of length {}", i, self.len);
        (i / self.buffer_capacity, i % self.buffer_capacity)
    }

    /// Ascending permutation of the valid slots plus the null slots.
    pub fn ascending_sort_indices(&self) -> Result<SortIndices, KernelError> {
        debug!(column = %self.name, len = self.len, buffers = self.buffers.len(), "sorting column");
        let cap = self.buffer_capacity;
        let mut local_runs = Vec::with_capacity(self.buffers.len());
        let mut nulls = Vec::new();

        for (b, buffer) in self.buffers.iter().enumerate() {
            let mut indices = buffer.valid_indices();
            let n = indices.len();
            introspective_sort(buffer.values(), n, &mut indices, |a: &T, c: &T| a.total_cmp(c))?;
            if n < buffer.len() {
                nulls.extend(
                    (0..buffer.len())
                        .filter(|&i| !buffer.is_valid(i))
                        .map(|i| b * cap + i),
                );
            }
            local_runs.push(indices);
        }

        let sorted = match local_runs.len() {
            0 => Vec::new(),
            1 => local_runs.pop().unwrap_or_default(),
            _ => {
                let runs: Vec<SortedRun<'_, T>> = self
                    .buffers
                    .iter()
                    .zip(&local_runs)
                    .map(|(buffer, idx)| SortedRun::new(buffer.values(), idx))
                    .collect();
                merge_sorted_runs(&runs, |b, local| b * cap + local)
            }
        };
        Ok(SortIndices { sorted, nulls })
    }

    /// Full sort permutation under `options`.
    pub fn sort_indices(&self, options: SortOptions) -> Result<Vec<usize>, KernelError> {
        Ok(self.ascending_sort_indices()?.into_permutation(options))
    }

    /// Sorted copy of the column.
    pub fn sort(&self, options: SortOptions) -> Result<Self, KernelError> {
        let indices = self.sort_indices(options)?;
        self.clone_with_index_map(&indices)
    }

    /// New column whose slot `k` is this column's slot `indices[k]`, validity included.
    ///
    /// # Errors
    /// `OutOfBounds` if any index is `>= len`.
    pub fn clone_with_index_map(&self, indices: &[usize]) -> Result<Self, KernelError> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.len) {
            return Err(KernelError::OutOfBounds(format!(
                "clone_with_index_map: index {} out of range for column '{}' of length {}",
                bad, self.name, self.len
            )));
        }
        let mut out = Self {
            name: self.name.clone(),
            buffers: Vec::new(),
            buffer_capacity: self.buffer_capacity,
            len: 0,
        };
        out.extend(indices.iter().map(|&i| self.get(i)));
        Ok(out)
    }

    /// `self = self op other` in place; the result is null wherever either side was null.
    pub fn apply(&mut self, op: BinaryOperation, other: &Self) -> Result<(), KernelError> {
        self.confirm_compatible("apply", other)?;
        for (lb, rb) in self.buffers.iter_mut().zip(&other.buffers) {
            let (values, validity) = lb.split_mut();
            handle_operation(op, values, validity, rb.values(), rb.validity().as_bytes())?;
        }
        Ok(())
    }

    /// `self = self op scalar` in place.
    pub fn apply_scalar(&mut self, op: BinaryOperation, scalar: T) -> Result<(), KernelError> {
        for b in &mut self.buffers {
            handle_scalar_operation(op, b.values_mut(), scalar)?;
        }
        Ok(())
    }

    /// `self = scalar op self` in place.
    pub fn apply_reverse_scalar(
        &mut self,
        scalar: T,
        op: BinaryOperation,
    ) -> Result<(), KernelError> {
        for b in &mut self.buffers {
            let (values, validity) = b.split_mut();
            handle_reverse_scalar_operation(op, scalar, values, validity)?;
        }
        Ok(())
    }

    pub fn shift(&mut self, op: BinaryIntOperation, amount: i32) -> Result<(), KernelError> {
        for b in &mut self.buffers {
            handle_shift_operation(op, b.values_mut(), amount)?;
        }
        Ok(())
    }

    /// Element-wise comparison; the result is null wherever either side was null.
    pub fn compare(
        &self,
        op: ComparisonOperation,
        other: &Self,
    ) -> Result<PrimitiveColumn<bool>, KernelError> {
        self.confirm_compatible("compare", other)?;
        let mut buffers = Vec::with_capacity(self.buffers.len());
        for (lb, rb) in self.buffers.iter().zip(&other.buffers) {
            let values = comparison::compare(op, lb.values(), rb.values())?;
            let mut validity = Bitmask::new_set_all(lb.len(), false);
            let n = bytes_for(lb.len());
            elementwise_and(
                &lb.validity().as_bytes()[..n],
                &rb.validity().as_bytes()[..n],
                &mut validity,
            );
            // operand masks may run past `len`; keep the result's tail cleared
            validity.mask_trailing_bits();
            buffers.push(Buffer::from_parts(values, validity, self.buffer_capacity)?);
        }
        Ok(self.bool_result(buffers))
    }

    /// Element-wise comparison against a scalar; nulls stay null.
    pub fn compare_scalar(
        &self,
        op: ComparisonOperation,
        scalar: T,
    ) -> Result<PrimitiveColumn<bool>, KernelError> {
        let mut buffers = Vec::with_capacity(self.buffers.len());
        for b in &self.buffers {
            let values = comparison::compare_scalar(op, b.values(), scalar)?;
            buffers.push(Buffer::from_parts(
                values,
                b.validity().clone(),
                self.buffer_capacity,
            )?);
        }
        Ok(self.bool_result(buffers))
    }

    fn bool_result(&self, buffers: Vec<Buffer<bool>>) -> PrimitiveColumn<bool> {
        PrimitiveColumn {
            name: self.name.clone(),
            buffers,
            buffer_capacity: self.buffer_capacity,
            len: self.len,
        }
    }

    fn confirm_compatible(&self, label: &str, other: &Self) -> Result<(), KernelError> {
        confirm_equal_len(label, self.len, other.len)?;
        if self.buffer_capacity != other.buffer_capacity {
            return Err(KernelError::LengthMismatch(log_length_mismatch(
                format!("{}: buffer capacity", label),
                self.buffer_capacity,
                other.buffer_capacity,
            )));
        }
        Ok(())
    }
}
