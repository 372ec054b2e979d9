use proptest::prelude::*;
use std::collections::HashSet;

use super::*;
use crate::pos::proptest_lpos;

fn test_interval_iter_validity(interval: &Interval) {
    // Test that the iterator agrees with `count()`.
    let cells: Vec<LPos> = interval.iter().collect();
    assert_eq!(interval.count() as usize, cells.len());
    // Test that there are no duplicates.
    {
        let cell_set: HashSet<LPos> = interval.iter().collect();
        assert_eq!(interval.count() as usize, cell_set.len());
    }
    for pos in &cells {
        assert!(interval.contains(pos));
    }
    // Test raster order: dimension 0 varies fastest.
    for pair in cells.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let d = (0..a.ndim()).rev().find(|&d| a[d] != b[d]).unwrap();
        assert!(a[d] < b[d]);
    }
}

#[test]
fn test_interval_construction_errors() {
    assert_eq!(
        Err(ConstructionError::NoDimensions),
        Interval::from_dims(&[]),
    );
    assert_eq!(
        Err(ConstructionError::NonPositiveDimension { axis: 1, len: 0 }),
        Interval::from_dims(&[3, 0, 2]),
    );
    assert_eq!(
        Err(ConstructionError::NonPositiveDimension { axis: 0, len: -1 }),
        Interval::new(LPos::from([5, 0]), LPos::from([3, 0])),
    );
    assert_eq!(
        Err(ConstructionError::TooLarge),
        Interval::from_dims(&[i64::MAX, 2]),
    );
}

#[test]
fn test_interval_iter_order() {
    let interval = Interval::new(LPos::from([-1, 4]), LPos::from([0, 6])).unwrap();
    let mut iter = interval.iter();
    let expected = [[-1, 4], [0, 4], [-1, 5], [0, 5], [-1, 6], [0, 6]];
    for pos in expected {
        assert_eq!(Some(LPos::from(pos)), iter.next());
    }
    assert_eq!(None, iter.next());
    assert_eq!(None, iter.next());

    let single = Interval::new(LPos::from([7]), LPos::from([7])).unwrap();
    assert_eq!(vec![LPos::from([7])], single.iter().collect::<Vec<_>>());
}

#[test]
fn test_interval_from_dims() {
    let interval = Interval::from_dims(&[4, 5, 6]).unwrap();
    assert_eq!(&LPos::origin(3), interval.min());
    assert_eq!(&LPos::from([3, 4, 5]), interval.max());
    assert_eq!(LPos::from([4, 5, 6]), interval.dims());
    assert_eq!(120, interval.count());
    assert!(interval.contains(&[3, 4, 5]));
    assert!(!interval.contains(&[4, 0, 0]));
    assert!(!interval.contains(&[0, -1, 0]));
    assert_eq!("Interval([0, 0, 0]..=[3, 4, 5])", interval.to_string());
}

#[test]
fn test_interval_intersection() {
    let a = Interval::span(&LPos::from([0, 0]), &LPos::from([9, 9]));
    let b = Interval::span(&LPos::from([5, -3]), &LPos::from([12, 4]));
    let c = Interval::single_cell(LPos::from([20, 20]));
    assert_eq!(
        Some(Interval::span(&LPos::from([5, 0]), &LPos::from([9, 4]))),
        a.intersection(&b),
    );
    assert!(a.intersects(&b));
    assert!(!a.intersects(&c));
    assert_eq!(None, a.intersection(&c));
    assert!(a.contains_interval(&a.intersection(&b).unwrap()));
    assert!(!a.contains_interval(&b));
}

proptest! {
    /// Tests `Interval::single_cell()` and various methods.
    #[test]
    fn test_interval_single_cell(
        pos in proptest_lpos(3, -100..=100),
        offset in proptest_lpos(3, -4..=4),
    ) {
        let interval = Interval::single_cell(pos.clone());
        prop_assert!(interval.contains(&pos));
        prop_assert_eq!(offset.is_zero(), interval.contains(&(&pos + &offset)));
        prop_assert_eq!(&pos, interval.min());
        prop_assert_eq!(&pos, interval.max());
        prop_assert_eq!(LPos::repeat(3, 1), interval.dims());
        prop_assert_eq!(1, interval.count());
        test_interval_iter_validity(&interval);
    }

    /// Tests `Interval::span()` and iteration.
    #[test]
    fn test_interval_span(
        corner1 in proptest_lpos(3, -5..=5),
        corner2 in proptest_lpos(3, -5..=5),
    ) {
        let interval = Interval::span(&corner1, &corner2);
        prop_assert!(interval.contains(&corner1));
        prop_assert!(interval.contains(&corner2));
        test_interval_iter_validity(&interval);
    }

    /// Tests `Interval::translate()`.
    #[test]
    fn test_interval_translate(
        corner1 in proptest_lpos(2, -100..=100),
        corner2 in proptest_lpos(2, -100..=100),
        offset in proptest_lpos(2, -100..=100),
    ) {
        prop_assert_eq!(
            Interval::span(&corner1, &corner2).translate(&offset),
            Interval::span(&(&corner1 + &offset), &(&corner2 + &offset))
        );
    }
}
