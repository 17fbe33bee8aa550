// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Merge Kernels Module** - *K-way Merge of Sorted Index Runs*
//!
//! Combines per-buffer sort results into one global order. Each input run is a value buffer
//! together with the indices of that buffer in ascending value order (typically the output of
//! `introspective_sort` over the buffer's valid slots). A min-heap holds the current head of
//! every run; popping the smallest head emits its global row index and advances that run.
//!
//! Ties between runs are broken by run position and then by rank within the run, so a merge of
//! equal values emits them buffer by buffer in the order each buffer sorted them.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::traits::element::Element;

/// One buffer's values and its ascending permutation.
#[derive(Debug, Clone, Copy)]
pub struct SortedRun<'a, T> {
    pub values: &'a [T],
    pub sort_indices: &'a [usize],
}

impl<'a, T> SortedRun<'a, T> {
    pub fn new(values: &'a [T], sort_indices: &'a [usize]) -> Self {
        Self {
            values,
            sort_indices,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sort_indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sort_indices.is_empty()
    }
}

/// Current head of a run in the merge heap.
struct HeapEntry<T> {
    value: T,
    buffer: usize,
    rank: usize,
}

impl<T: Element> PartialEq for HeapEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Element> Eq for HeapEntry<T> {}

impl<T: Element> PartialOrd for HeapEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Element> Ord for HeapEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then(self.buffer.cmp(&other.buffer))
            .then(self.rank.cmp(&other.rank))
    }
}

/// Merges sorted runs into a single ascending sequence of global row indices.
///
/// `global_index(buffer, local)` maps a slot of run `buffer` to its row index in the combined
/// sequence, e.g. `buffer * buffer_capacity + local` for a chunked column.
///
/// The output has exactly `sum(run.len())` entries.
pub fn merge_sorted_runs<T, G>(runs: &[SortedRun<'_, T>], mut global_index: G) -> Vec<usize>
where
    T: Element,
    G: FnMut(usize, usize) -> usize,
{
    let total: usize = runs.iter().map(SortedRun::len).sum();
    debug!(runs = runs.len(), total, "merging sorted runs");

    let mut out = Vec::with_capacity(total);
    let mut heap = BinaryHeap::with_capacity(runs.len());
    for (buffer, run) in runs.iter().enumerate().filter(|(_, run)| !run.is_empty()) {
        heap.push(Reverse(HeapEntry {
            value: run.values[run.sort_indices[0]],
            buffer,
            rank: 0,
        }));
    }

    while let Some(Reverse(entry)) = heap.pop() {
        let run = &runs[entry.buffer];
        let local = run.sort_indices[entry.rank];
        let global = global_index(entry.buffer, local);
        trace!(buffer = entry.buffer, local, global, "emit");
        out.push(global);

        let next = entry.rank + 1;
        if let Some(&local) = run.sort_indices.get(next) {
            heap.push(Reverse(HeapEntry {
                value: run.values[local],
                buffer: entry.buffer,
                rank: next,
            }));
        }
    }
    out
}
