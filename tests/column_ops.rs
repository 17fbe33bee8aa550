mod common;

use common::{assert_sorted_permutation, random_nullable_column};
use frame_kernels::kernels::merge::{SortedRun, merge_sorted_runs};
use frame_kernels::{
    BinaryOperation, ComparisonOperation, KernelError, PrimitiveColumn, SortOptions, Timestamp,
};

#[test]
fn merge_two_presorted_buffers_keeps_provenance() {
    let a = [1i32, 3, 5];
    let b = [2i32, 4, 6];
    let ia = [0usize, 1, 2];
    let ib = [0usize, 1, 2];
    let runs = [SortedRun::new(&a[..], &ia[..]), SortedRun::new(&b[..], &ib[..])];

    let merged = merge_sorted_runs(&runs, |buffer, local| (buffer << 8) | local);
    let provenance: Vec<(usize, usize)> = merged.iter().map(|&g| (g >> 8, g & 0xFF)).collect();
    assert_eq!(provenance, [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)]);

    let values: Vec<i32> = provenance
        .iter()
        .map(|&(buffer, local)| if buffer == 0 { a[local] } else { b[local] })
        .collect();
    assert_eq!(values, [1, 2, 3, 4, 5, 6]);
}

#[test]
fn multi_buffer_sort_matches_single_buffer_sort() {
    for _ in 0..20 {
        let chunked = random_nullable_column(1_000, 64, 7);
        let single = PrimitiveColumn::from_options("single", chunked.iter());
        assert_eq!(single.buffers().len(), 1);
        assert_eq!(chunked.buffers().len(), 16);

        let a = chunked.sort(SortOptions::new()).unwrap();
        let b = single.sort(SortOptions::new()).unwrap();
        assert_eq!(a.iter().collect::<Vec<_>>(), b.iter().collect::<Vec<_>>());

        let valid = a.valid_values();
        let idx: Vec<usize> = (0..valid.len()).collect();
        assert_sorted_permutation(&valid, &idx);
        // nulls trail the ascending run
        let nulls = a.null_count();
        assert!((a.len() - nulls..a.len()).all(|i| !a.is_valid(i)));
    }
}

#[test]
fn descending_sort_puts_nulls_first() {
    let col = random_nullable_column(300, 32, 5);
    let nulls = col.null_count();
    let sorted = col.sort(SortOptions::new().descending(true)).unwrap();
    assert_eq!(sorted.len(), col.len());
    assert_eq!(sorted.null_count(), nulls);
    assert!((0..nulls).all(|i| !sorted.is_valid(i)));
    let valid = sorted.valid_values();
    assert!(valid.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn ascending_sort_indices_separate_nulls() {
    let mut col = PrimitiveColumn::<f64>::with_buffer_capacity("f", 2).unwrap();
    col.extend([Some(2.0), None, Some(f64::NAN), Some(-1.0), None]);
    let idx = col.ascending_sort_indices().unwrap();
    assert_eq!(idx.sorted, [3, 0, 2]);
    assert_eq!(idx.nulls, [1, 4]);
}

#[test]
fn column_arithmetic_null_union() {
    let mut left = PrimitiveColumn::<i64>::with_buffer_capacity("l", 4).unwrap();
    left.extend([Some(1), Some(2), None, Some(4), Some(5), Some(6)]);
    let mut right = PrimitiveColumn::<i64>::with_buffer_capacity("r", 4).unwrap();
    right.extend([Some(10), None, Some(30), Some(40), Some(50), None]);

    left.apply(BinaryOperation::Add, &right).unwrap();
    assert_eq!(
        left.iter().collect::<Vec<_>>(),
        [Some(11), None, None, Some(44), Some(55), None]
    );
    assert_eq!(left.null_count(), 3);
}

#[test]
fn column_length_mismatch_rejected() {
    let mut a = PrimitiveColumn::from_values("a", &[1u8, 2, 3]);
    let b = PrimitiveColumn::from_values("b", &[1u8, 2]);
    let err = a.apply(BinaryOperation::Subtract, &b).unwrap_err();
    assert!(matches!(err, KernelError::LengthMismatch(_)));
    let err = a.compare(ComparisonOperation::Equals, &b).unwrap_err();
    assert!(matches!(err, KernelError::LengthMismatch(_)));
}

#[test]
fn timestamp_column_equality_only() {
    let mut a = PrimitiveColumn::from_values("ts", &[Timestamp(1_000), Timestamp(2_000)]);
    let b = PrimitiveColumn::from_values("ts2", &[Timestamp(1_000), Timestamp(3_000)]);
    let eq = a.compare(ComparisonOperation::Equals, &b).unwrap();
    assert_eq!(eq.iter().collect::<Vec<_>>(), [Some(true), Some(false)]);

    let err = a.compare(ComparisonOperation::LessThan, &b).unwrap_err();
    assert!(matches!(err, KernelError::UnsupportedOperation(_)));
    let err = a.apply(BinaryOperation::Add, &b).unwrap_err();
    assert!(matches!(err, KernelError::UnsupportedOperation(_)));

    // timestamps still sort by their millisecond value
    let sorted = b.sort(SortOptions::new().descending(true)).unwrap();
    assert_eq!(sorted.get(0), Some(Timestamp(3_000)));
    a.rename("renamed");
    assert_eq!(a.name(), "renamed");
}

#[test]
fn bool_column_logical_ops() {
    let mut a = PrimitiveColumn::from_options("a", [Some(true), Some(true), None]);
    let b = PrimitiveColumn::from_options("b", [Some(false), Some(true), Some(true)]);
    a.apply(BinaryOperation::And, &b).unwrap();
    assert_eq!(a.iter().collect::<Vec<_>>(), [Some(false), Some(true), None]);

    let err = a.apply(BinaryOperation::Add, &b).unwrap_err();
    assert!(matches!(err, KernelError::UnsupportedOperation(_)));
}
