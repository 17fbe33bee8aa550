//! Test helpers shared by the integration suites
#![allow(dead_code)]

use std::cmp::Ordering;

use frame_kernels::{Element, PrimitiveColumn};
use rand::Rng;

/// Panics unless `idx` is a bijection on `[0, values.len())` ordering `values` ascending.
pub fn assert_sorted_permutation<T: Element>(values: &[T], idx: &[usize]) {
    assert_eq!(idx.len(), values.len(), "permutation length");
    let mut seen = vec![false; values.len()];
    for &i in idx {
        assert!(i < values.len(), "index {i} out of range");
        assert!(!seen[i], "index {i} appears twice");
        seen[i] = true;
    }
    for (k, w) in idx.windows(2).enumerate() {
        assert_ne!(
            values[w[0]].total_cmp(&values[w[1]]),
            Ordering::Greater,
            "out of order at sorted position {k}: {:?} > {:?}",
            values[w[0]],
            values[w[1]]
        );
    }
}

pub fn identity(n: usize) -> Vec<usize> {
    (0..n).collect()
}

pub fn random_i64(n: usize, range: std::ops::Range<i64>) -> Vec<i64> {
    let mut rng = rand::rng();
    (0..n).map(|_| rng.random_range(range.clone())).collect()
}

/// Column with roughly one slot in `null_every` null.
pub fn random_nullable_column(
    n: usize,
    buffer_capacity: usize,
    null_every: u32,
) -> PrimitiveColumn<i64> {
    let mut rng = rand::rng();
    let mut col = PrimitiveColumn::with_buffer_capacity("random", buffer_capacity)
        .expect("power-of-two capacity");
    for _ in 0..n {
        if rng.random_range(0..null_every) == 0 {
            col.push(None);
        } else {
            col.push(Some(rng.random_range(-50..50)));
        }
    }
    col
}
