//! Miscellaneous integer math functions.

use crate::num::PosNum;

/// Computes the base-2 logarithm of a number, rounded up.
///
/// Put another way: returns the smallest number `p` (minimum `0`) such that
/// `n <= 2 ** p`.
pub fn ceil_log_base_2(mut n: u64) -> u32 {
    if n <= 1 {
        return 0;
    }
    n -= 1;
    u64::BITS - n.leading_zeros()
}

/// Divides `n` by `d`, rounding up. Both must be positive.
#[inline]
pub fn div_ceil(n: i64, d: i64) -> i64 {
    debug_assert!(n >= 0 && d > 0);
    (n + d - 1) / d
}

/// Returns the product of all the numbers, or `None` if it overflows.
pub fn checked_product<N: PosNum>(numbers: &[N]) -> Option<N> {
    numbers
        .iter()
        .try_fold(N::one(), |acc, &n| PosNum::checked_mul(acc, n))
}
