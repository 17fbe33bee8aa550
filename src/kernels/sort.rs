// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Sorting Algorithms Kernels Module** - *Indirect Introspective Sort*
//!
//! Produces index permutations that order a read-only value buffer. The value buffer is never
//! mutated: every swap, shift and sift happens on the index array, and every comparison looks
//! the values up through it. Reordering a column afterwards is a separate take-by-index step.
//!
//! ## Algorithm
//! Introspective sort with a depth limit of `2 * (floor(log2(n)) + 1)`:
//! - partitions of at most `INTROSORT_SIZE_THRESHOLD` elements finish with a compare-and-swap
//!   network (2 and 3 elements) or a stable insertion sort (4 to 16 elements),
//! - an exhausted depth limit falls back to heapsort over the index range,
//! - everything else is partitioned around a median-of-three pivot, recursing into the right
//!   side and looping on the left so stack depth stays within the depth limit.
//!
//! Nulls are the caller's concern: hand the engine only the valid slots and place the null
//! slots before or after the resulting run.

use std::cmp::Ordering;

use tracing::warn;

use crate::config::INTROSORT_SIZE_THRESHOLD;
use crate::errors::KernelError;
use crate::traits::element::Element;

/// Configuration for argsort and column sorts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOptions {
    pub descending: bool,
}

impl SortOptions {
    /// Ascending order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set descending order
    pub fn descending(mut self, descending: bool) -> Self {
        self.descending = descending;
        self
    }
}

/// Sorts `sort_indices[..length]` so the values they point at are ascending under `compare`.
///
/// `sort_indices` is normally the identity permutation `[0, length)`. The engine only permutes
/// the indices it is handed, so any subset of positions (e.g. the valid slots of a buffer)
/// works too.
///
/// Upon return `compare(&values[sort_indices[k1]], &values[sort_indices[k2]]) != Greater` for
/// every `k1 < k2 < length`. Equal values inside partitions of at most 16 elements keep their
/// input order; larger inputs give no stability guarantee.
///
/// # Errors
/// - `InvalidArguments` if `length > sort_indices.len()`
/// - `OutOfBounds` if an index points outside `values`
/// - `BadComparer` if `compare` is not a consistent total order and partitioning runs past
///   its bounds
pub fn introspective_sort<T, C>(
    values: &[T],
    length: usize,
    sort_indices: &mut [usize],
    compare: C,
) -> Result<(), KernelError>
where
    C: FnMut(&T, &T) -> Ordering,
{
    if length > sort_indices.len() {
        return Err(KernelError::InvalidArguments(format!(
            "introspective_sort: length {} exceeds {} sort indices",
            length,
            sort_indices.len()
        )));
    }
    let indices = &mut sort_indices[..length];
    if let Some(&bad) = indices.iter().find(|&&i| i >= values.len()) {
        return Err(KernelError::OutOfBounds(format!(
            "introspective_sort: index {} outside {} values",
            bad,
            values.len()
        )));
    }
    if length < 2 {
        return Ok(());
    }

    let depth_limit = 2 * (floor_log2(length) + 1);
    let mut sorter = IntroSorter {
        values,
        indices,
        compare,
    };
    sorter.intro_sort(0, length - 1, depth_limit)
}

/// Ascending (or descending) index permutation over all of `values`.
///
/// Uses `Element::total_cmp`; descending inverts the comparer rather than the output, so
/// equal values keep the same relative treatment in both directions.
pub fn argsort<T: Element>(values: &[T], options: SortOptions) -> Result<Vec<usize>, KernelError> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    if options.descending {
        introspective_sort(values, values.len(), &mut indices, |a: &T, b: &T| b.total_cmp(a))?;
    } else {
        introspective_sort(values, values.len(), &mut indices, |a: &T, b: &T| a.total_cmp(b))?;
    }
    Ok(indices)
}

/// `floor(log2(n))` for `n >= 1`.
#[inline(always)]
fn floor_log2(n: usize) -> usize {
    (usize::BITS - 1 - n.leading_zeros()) as usize
}

struct IntroSorter<'a, T, C> {
    values: &'a [T],
    indices: &'a mut [usize],
    compare: C,
}

impl<'a, T, C> IntroSorter<'a, T, C>
where
    C: FnMut(&T, &T) -> Ordering,
{
    /// Compares the values behind index positions `i` and `j`.
    #[inline(always)]
    fn cmp_at(&mut self, i: usize, j: usize) -> Ordering {
        let values = self.values;
        (self.compare)(&values[self.indices[i]], &values[self.indices[j]])
    }

    #[inline(always)]
    fn swap_if_greater(&mut self, i: usize, j: usize) {
        if i != j && self.cmp_at(i, j) == Ordering::Greater {
            self.indices.swap(i, j);
        }
    }

    fn intro_sort(
        &mut self,
        lo: usize,
        mut hi: usize,
        mut depth_limit: usize,
    ) -> Result<(), KernelError> {
        while hi > lo {
            let partition_size = hi - lo + 1;
            if partition_size <= INTROSORT_SIZE_THRESHOLD {
                match partition_size {
                    2 => self.swap_if_greater(lo, hi),
                    3 => {
                        self.swap_if_greater(lo, hi - 1);
                        self.swap_if_greater(lo, hi);
                        self.swap_if_greater(hi - 1, hi);
                    }
                    _ => self.insertion_sort(lo, hi),
                }
                return Ok(());
            }

            if depth_limit == 0 {
                self.heap_sort(lo, hi);
                return Ok(());
            }
            depth_limit -= 1;

            let p = self.pick_pivot_and_partition(lo, hi)?;
            // p >= lo + 1: the left scan pre-increments from lo
            self.intro_sort(p + 1, hi, depth_limit)?;
            hi = p - 1;
        }
        Ok(())
    }

    fn pick_pivot_and_partition(&mut self, lo: usize, hi: usize) -> Result<usize, KernelError> {
        let middle = lo + ((hi - lo) >> 1);

        // lo <= middle <= hi afterwards, so lo and hi act as sentinels for the scans below.
        self.swap_if_greater(lo, middle);
        self.swap_if_greater(lo, hi);
        self.swap_if_greater(middle, hi);

        let values = self.values;
        let pivot = &values[self.indices[middle]];
        self.indices.swap(middle, hi - 1);

        let mut left = lo;
        let mut right = hi - 1;
        while left < right {
            loop {
                left += 1;
                if (self.compare)(&values[self.indices[left]], pivot) != Ordering::Less {
                    break;
                }
                if left >= hi - 1 {
                    return Err(bad_comparer("left scan ran past the pivot slot"));
                }
            }
            loop {
                right -= 1;
                if (self.compare)(pivot, &values[self.indices[right]]) != Ordering::Less {
                    break;
                }
                if right <= lo {
                    return Err(bad_comparer("right scan ran past the low sentinel"));
                }
            }
            if left >= right {
                break;
            }
            self.indices.swap(left, right);
        }

        if left != hi - 1 {
            self.indices.swap(left, hi - 1);
        }
        Ok(left)
    }

    /// Stable: an index only moves past strictly greater values.
    fn insertion_sort(&mut self, lo: usize, hi: usize) {
        let values = self.values;
        for i in lo..hi {
            let t = self.indices[i + 1];
            let mut j = i + 1;
            while j > lo
                && (self.compare)(&values[t], &values[self.indices[j - 1]]) == Ordering::Less
            {
                self.indices[j] = self.indices[j - 1];
                j -= 1;
            }
            self.indices[j] = t;
        }
    }

    fn heap_sort(&mut self, lo: usize, hi: usize) {
        let n = hi - lo + 1;
        for i in (1..=n / 2).rev() {
            self.down_heap(i, n, lo);
        }
        for i in (2..=n).rev() {
            self.indices.swap(lo, lo + i - 1);
            self.down_heap(1, i - 1, lo);
        }
    }

    /// Sifts the index at 1-based heap position `i` down a max-heap of `n` entries rooted at `lo`.
    fn down_heap(&mut self, mut i: usize, n: usize, lo: usize) {
        let values = self.values;
        let d = self.indices[lo + i - 1];
        while i <= n / 2 {
            let mut child = 2 * i;
            if child < n
                && (self.compare)(
                    &values[self.indices[lo + child - 1]],
                    &values[self.indices[lo + child]],
                ) == Ordering::Less
            {
                child += 1;
            }
            if (self.compare)(&values[d], &values[self.indices[lo + child - 1]]) != Ordering::Less {
                break;
            }
            self.indices[lo + i - 1] = self.indices[lo + child - 1];
            i = child;
        }
        self.indices[lo + i - 1] = d;
    }
}

#[cold]
fn bad_comparer(detail: &str) -> KernelError {
    warn!(detail, "comparer is not a consistent total order");
    KernelError::BadComparer(format!(
        "comparer is not a consistent total order ({})",
        detail
    ))
}
