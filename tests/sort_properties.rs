mod common;

use common::{assert_sorted_permutation, identity, random_i64};
use frame_kernels::{KernelError, SortOptions, argsort, introspective_sort};
use proptest::prelude::*;

#[test]
fn five_values_with_duplicate_keep_input_order() {
    let values = [5i32, 3, 3, 1, 4];
    let idx = argsort(&values, SortOptions::new()).unwrap();
    assert_eq!(idx, [3, 1, 2, 4, 0]);
}

#[test]
fn single_value_is_trivial() {
    assert_eq!(argsort(&[1u32], SortOptions::new()).unwrap(), [0]);
}

#[test]
fn random_twenty_against_reference() {
    for _ in 0..100 {
        let values = random_i64(20, -1000..1000);
        let idx = argsort(&values, SortOptions::new()).unwrap();
        assert_sorted_permutation(&values, &idx);

        let mut reference = values.clone();
        reference.sort_unstable();
        let got: Vec<i64> = idx.iter().map(|&i| values[i]).collect();
        assert_eq!(got, reference);
    }
}

#[test]
fn large_inputs_with_heavy_duplicates() {
    for n in [17, 100, 1_000, 10_000] {
        let values = random_i64(n, 0..4);
        let idx = argsort(&values, SortOptions::new()).unwrap();
        assert_sorted_permutation(&values, &idx);
    }
}

#[test]
fn adversarial_shapes() {
    let n = 4096i64;
    let shapes: Vec<Vec<i64>> = vec![
        (0..n).collect(),
        (0..n).rev().collect(),
        (0..n).map(|i| if i % 2 == 0 { i } else { n - i }).collect(),
        (0..n).map(|i| (i * 7919) % 31).collect(),
        vec![42; n as usize],
    ];
    for values in shapes {
        let idx = argsort(&values, SortOptions::new()).unwrap();
        assert_sorted_permutation(&values, &idx);
    }
}

#[test]
fn descending_orders_floats_by_total_order() {
    let values = [0.0f32, -0.0, f32::INFINITY, f32::NEG_INFINITY, 2.5];
    let idx = argsort(&values, SortOptions::new().descending(true)).unwrap();
    assert_eq!(idx, [2, 4, 0, 1, 3]);
}

#[test]
fn comparer_that_never_reports_greater_or_equal_fails() {
    let values = random_i64(256, 0..10);
    let mut idx = identity(values.len());
    let err = introspective_sort(&values, values.len(), &mut idx, |_: &i64, _: &i64| {
        std::cmp::Ordering::Less
    })
    .unwrap_err();
    assert!(matches!(err, KernelError::BadComparer(_)));
}

/// Steers the sorter into its worst case (McIlroy's adversary) and returns the input that
/// reproduces it: items stay unresolved until two of them meet, then the one that is not the
/// pivot candidate is fixed at the next lowest value.
fn quicksort_killer(n: usize) -> Vec<u64> {
    let unresolved = n as u64;
    let mut val = vec![unresolved; n];
    let mut next_solid = 0u64;
    let mut candidate = 0usize;
    let items: Vec<usize> = (0..n).collect();
    let mut idx = identity(n);
    introspective_sort(&items, n, &mut idx, |&x: &usize, &y: &usize| {
        if val[x] == unresolved && val[y] == unresolved {
            let frozen = if x == candidate { x } else { y };
            val[frozen] = next_solid;
            next_solid += 1;
        }
        if val[x] == unresolved {
            candidate = x;
        } else if val[y] == unresolved {
            candidate = y;
        }
        val[x].cmp(&val[y])
    })
    .unwrap();
    val
}

#[test]
fn median_of_three_killer_falls_back_to_heapsort() {
    let n = 1024;
    let values = quicksort_killer(n);
    let mut comparisons = 0usize;
    let mut idx = identity(n);
    introspective_sort(&values, n, &mut idx, |a: &u64, b: &u64| {
        comparisons += 1;
        a.cmp(b)
    })
    .unwrap();
    assert_sorted_permutation(&values, &idx);
    // plain quicksort needs about n^2 / 4 comparisons on this input
    assert!(comparisons < 64 * n, "{comparisons} comparisons");

    let idx = argsort(&values, SortOptions::new().descending(true)).unwrap();
    assert!(idx.windows(2).all(|w| values[w[0]] >= values[w[1]]));
}

proptest! {
    #[test]
    fn output_is_ordered_permutation(values in proptest::collection::vec(any::<i32>(), 0..300)) {
        let mut idx = identity(values.len());
        introspective_sort(&values, values.len(), &mut idx, |a: &i32, b: &i32| a.cmp(b)).unwrap();

        let mut seen = vec![false; values.len()];
        for &i in &idx {
            prop_assert!(!seen[i]);
            seen[i] = true;
        }
        for w in idx.windows(2) {
            prop_assert!(values[w[0]] <= values[w[1]]);
        }
    }

    #[test]
    fn equal_values_up_to_sixteen_keep_order(n in 1usize..=16, v in any::<i16>()) {
        let values = vec![v; n];
        let mut idx = identity(n);
        introspective_sort(&values, n, &mut idx, |a: &i16, b: &i16| a.cmp(b)).unwrap();
        prop_assert_eq!(idx, identity(n));
    }

    #[test]
    fn sorting_ascending_input_is_identity(mut values in proptest::collection::vec(any::<u16>(), 0..200)) {
        values.sort_unstable();
        values.dedup();
        let idx = argsort(&values, SortOptions::new()).unwrap();
        prop_assert_eq!(idx, identity(values.len()));
    }

    #[test]
    fn sorted_values_match_reference(values in proptest::collection::vec(any::<f64>(), 0..200)) {
        let idx = argsort(&values, SortOptions::new()).unwrap();
        let got: Vec<u64> = idx.iter().map(|&i| values[i].to_bits()).collect();
        let mut reference = values.clone();
        reference.sort_by(f64::total_cmp);
        let expected: Vec<u64> = reference.iter().map(|v| v.to_bits()).collect();
        prop_assert_eq!(got, expected);
    }
}
