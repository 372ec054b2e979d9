use proptest::prelude::*;

use super::*;

#[test]
fn test_ndpos_basics() {
    let p = LPos::from([2, 10, -3]);
    assert_eq!(3, p.ndim());
    assert_eq!(2, p[0]);
    assert_eq!(10, p[1]);
    assert_eq!(-3, p[2]);
    assert_eq!(-60, p.product());
    assert_eq!("[2, 10, -3]", p.to_string());

    let o = LPos::origin(4);
    assert!(o.is_zero());
    assert_eq!(LPos::repeat(4, 0), o);
    assert_eq!(LPos::from([0, 1, 2]), LPos::from_fn(3, |d| d as i64));
}

#[test]
fn test_ndpos_narrowing() {
    let small = LPos::from([1, -2, i32::MAX as i64]);
    assert_eq!(Some(IPos::from([1, -2, i32::MAX])), small.to_ipos());

    let big = LPos::from([(1_i64 << 32) + 5, -1]);
    assert_eq!(None, big.to_ipos());
    // Only the low 32 bits survive.
    assert_eq!(IPos::from([5, -1]), big.to_ipos_wrapping());
}

proptest! {
    /// Tests that widening and then narrowing a 32-bit position is lossless.
    #[test]
    fn test_ndpos_widen_narrow(coords in prop::collection::vec(any::<i32>(), 1..6)) {
        let ipos = IPos::from(coords);
        let lpos = ipos.to_lpos();
        prop_assert_eq!(Some(ipos.clone()), lpos.to_ipos());
        prop_assert_eq!(ipos, lpos.to_ipos_wrapping());
    }

    /// Tests various position operations.
    #[test]
    fn test_ndpos_ops(
        a in proptest_lpos(3, -100..=100),
        b in proptest_lpos(3, -100..=100),
        scalar in -100..=100_i64,
    ) {
        let sum = &a + &b;
        let diff = &a - &b;
        for d in 0..3 {
            prop_assert_eq!(a[d] + b[d], sum[d]);
            prop_assert_eq!(a[d] - b[d], diff[d]);
        }
        prop_assert_eq!(&(&sum - &b), &a);
        prop_assert_eq!(&(&a + scalar) - scalar, a.clone());
        prop_assert_eq!(-&(-&a), a.clone());
        let lo = NdPos::min(&a, &b);
        let hi = NdPos::max(&a, &b);
        for d in 0..3 {
            prop_assert!(lo[d] <= hi[d]);
            prop_assert_eq!(lo[d] + hi[d], a[d] + b[d]);
        }
    }
}
