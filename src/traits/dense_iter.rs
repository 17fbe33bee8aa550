// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

use minarrow::{Bitmask, Vec64};

/// Iterator over the valid slots of a value slice, as `(slot, value)` pairs.
///
/// A `None` mask means every slot is valid.
pub struct DenseIter<'a, T> {
    slice: &'a [T],
    idx: usize,
    mask: Option<&'a Bitmask>,
}

impl<'a, T: Copy> DenseIter<'a, T> {
    #[inline(always)]
    pub fn new(slice: &'a [T], mask: Option<&'a Bitmask>) -> Self {
        Self {
            slice,
            idx: 0,
            mask,
        }
    }
}

impl<'a, T: Copy> Iterator for DenseIter<'a, T> {
    type Item = (usize, T);

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        match self.mask {
            None => {
                let i = self.idx;
                let v = *self.slice.get(i)?;
                self.idx += 1;
                Some((i, v))
            }
            Some(m) => {
                while self.idx < self.slice.len() {
                    let i = self.idx;
                    self.idx += 1;
                    if m.get(i) {
                        return Some((i, self.slice[i]));
                    }
                }
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.slice.len() - self.idx;
        match self.mask {
            None => (remaining, Some(remaining)),
            Some(_) => (0, Some(remaining)),
        }
    }
}

/// Collects valid (non-null) values from a slice into a Vec64.
#[inline(always)]
pub fn collect_valid<T: Copy>(d: &[T], m: Option<&Bitmask>) -> Vec64<T> {
    DenseIter::new(d, m).map(|(_, v)| v).collect()
}

/// Slot positions of the valid values, in ascending order.
#[inline(always)]
pub fn valid_slots<T: Copy>(d: &[T], m: Option<&Bitmask>) -> Vec<usize> {
    DenseIter::new(d, m).map(|(i, _)| i).collect()
}
