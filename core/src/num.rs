//! Coordinate number types.
//!
//! Positions come in two resolutions: 32-bit (`i32`) for compact, bounded
//! addressing and 64-bit (`i64`) for the full range. Both implement
//! [`PosNum`], so the indexer and `NdPos` can be written once.
//!
//! This module also re-exports the `num` traits used throughout the crate.

pub use num::{FromPrimitive, Integer, NumCast, One, Signed, ToPrimitive, Zero};
use std::fmt;
use std::hash::Hash;
use std::ops::{AddAssign, MulAssign, SubAssign};

/// "Trait alias" for number types that can be used as coordinates.
pub trait PosNum:
    'static
    + fmt::Debug
    + fmt::Display
    + Default
    + Copy
    + Eq
    + Hash
    + Ord
    + Send
    + Sync
    + Integer
    + Signed
    + NumCast
    + ToPrimitive
    + AddAssign
    + SubAssign
    + MulAssign
{
    /// Number of bits in the coordinate type.
    const BITS: u32;

    /// Multiplies two numbers, returning `None` on overflow.
    fn checked_mul(self, other: Self) -> Option<Self>;

    /// Converts from an `i64`, keeping only the low bits if it does not fit.
    fn from_i64_wrapping(n: i64) -> Self;
}

impl PosNum for i32 {
    const BITS: u32 = 32;

    #[inline]
    fn checked_mul(self, other: Self) -> Option<Self> {
        i32::checked_mul(self, other)
    }
    #[inline]
    fn from_i64_wrapping(n: i64) -> Self {
        n as i32
    }
}

impl PosNum for i64 {
    const BITS: u32 = 64;

    #[inline]
    fn checked_mul(self, other: Self) -> Option<Self> {
        i64::checked_mul(self, other)
    }
    #[inline]
    fn from_i64_wrapping(n: i64) -> Self {
        n
    }
}
