//! N-dimensional integer positions.
//!
//! Unlike a fixed-size array, an `NdPos` carries its dimensionality at
//! runtime, so a single sampler type works for images of any number of
//! dimensions. Dimension 0 is the fastest-varying axis everywhere in this
//! crate.

use itertools::Itertools;
use std::fmt;
use std::ops::{Add, Deref, DerefMut, Index, IndexMut, Neg, Sub};

mod convert;

use crate::num::PosNum;

/// Position with `n` integer coordinates of type `N`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NdPos<N: PosNum>(Vec<N>);

/// 32-bit position (bounded addressable range).
pub type IPos = NdPos<i32>;
/// 64-bit position (full range).
pub type LPos = NdPos<i64>;

impl<N: PosNum> fmt::Display for NdPos<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

impl<N: PosNum> Deref for NdPos<N> {
    type Target = [N];

    #[inline]
    fn deref(&self) -> &[N] {
        &self.0
    }
}
impl<N: PosNum> DerefMut for NdPos<N> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [N] {
        &mut self.0
    }
}

// Index with `usize` directly instead of relying on `Deref`, so that
// `pos[d]` works in generic code without extra bounds.
impl<N: PosNum> Index<usize> for NdPos<N> {
    type Output = N;

    #[inline]
    fn index(&self, d: usize) -> &N {
        &self.0[d]
    }
}
impl<N: PosNum> IndexMut<usize> for NdPos<N> {
    #[inline]
    fn index_mut(&mut self, d: usize) -> &mut N {
        &mut self.0[d]
    }
}

impl<N: PosNum> From<Vec<N>> for NdPos<N> {
    fn from(coords: Vec<N>) -> Self {
        Self(coords)
    }
}
impl<N: PosNum> From<&[N]> for NdPos<N> {
    fn from(coords: &[N]) -> Self {
        Self(coords.to_vec())
    }
}
impl<N: PosNum, const D: usize> From<[N; D]> for NdPos<N> {
    fn from(coords: [N; D]) -> Self {
        Self(coords.to_vec())
    }
}

impl<N: PosNum> NdPos<N> {
    /// Creates a position at the origin with `ndim` dimensions.
    pub fn origin(ndim: usize) -> Self {
        Self(vec![N::zero(); ndim])
    }
    /// Creates a position using `value` for all coordinates.
    pub fn repeat(ndim: usize, value: N) -> Self {
        Self(vec![value; ndim])
    }
    /// Creates a position by evaluating `generator` for each dimension.
    pub fn from_fn(ndim: usize, generator: impl FnMut(usize) -> N) -> Self {
        Self((0..ndim).map(generator).collect())
    }

    /// Returns the number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.0.len()
    }
    /// Returns true if the position is all zeros.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|c| c.is_zero())
    }
    /// Returns the coordinates as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[N] {
        &self.0
    }
    /// Returns the coordinates as a vector.
    pub fn into_vec(self) -> Vec<N> {
        self.0
    }

    /// Overwrites every coordinate with the corresponding one from `other`.
    ///
    /// # Panics
    ///
    /// This method panics if the dimensionalities do not match.
    #[inline]
    pub fn set_from(&mut self, other: &[N]) {
        self.0.copy_from_slice(other);
    }

    /// Creates a position by applying `f` to each coordinate.
    #[must_use = "This method returns a new value instead of mutating its input"]
    pub fn map(&self, mut f: impl FnMut(usize, N) -> N) -> Self {
        Self(self.0.iter().enumerate().map(|(d, &c)| f(d, c)).collect())
    }

    /// Returns the product of the coordinates.
    pub fn product(&self) -> N {
        self.0.iter().fold(N::one(), |acc, &c| acc * c)
    }

    /// Creates a position by taking the minimum of the corresponding
    /// coordinates in `a` and `b`.
    pub fn min(a: &Self, b: &Self) -> Self {
        assert_eq!(a.ndim(), b.ndim(), "Dimensionality mismatch");
        a.map(|d, c| std::cmp::min(c, b[d]))
    }
    /// Creates a position by taking the maximum of the corresponding
    /// coordinates in `a` and `b`.
    pub fn max(a: &Self, b: &Self) -> Self {
        assert_eq!(a.ndim(), b.ndim(), "Dimensionality mismatch");
        a.map(|d, c| std::cmp::max(c, b[d]))
    }
}

impl<N: PosNum> Add<&NdPos<N>> for &NdPos<N> {
    type Output = NdPos<N>;

    fn add(self, other: &NdPos<N>) -> NdPos<N> {
        assert_eq!(self.ndim(), other.ndim(), "Dimensionality mismatch");
        self.map(|d, c| c + other[d])
    }
}
impl<N: PosNum> Sub<&NdPos<N>> for &NdPos<N> {
    type Output = NdPos<N>;

    fn sub(self, other: &NdPos<N>) -> NdPos<N> {
        assert_eq!(self.ndim(), other.ndim(), "Dimensionality mismatch");
        self.map(|d, c| c - other[d])
    }
}
impl<N: PosNum> Add<N> for &NdPos<N> {
    type Output = NdPos<N>;

    fn add(self, scalar: N) -> NdPos<N> {
        self.map(|_, c| c + scalar)
    }
}
impl<N: PosNum> Sub<N> for &NdPos<N> {
    type Output = NdPos<N>;

    fn sub(self, scalar: N) -> NdPos<N> {
        self.map(|_, c| c - scalar)
    }
}
impl<N: PosNum> Neg for &NdPos<N> {
    type Output = NdPos<N>;

    fn neg(self) -> NdPos<N> {
        self.map(|_, c| -c)
    }
}

/// Returns a `proptest` strategy for positions with `ndim` dimensions and
/// each coordinate in `range`.
#[cfg(test)]
pub(crate) fn proptest_lpos(
    ndim: usize,
    range: std::ops::RangeInclusive<i64>,
) -> impl proptest::strategy::Strategy<Value = LPos> {
    use proptest::prelude::*;
    prop::collection::vec(range, ndim).prop_map(NdPos)
}

#[cfg(test)]
mod tests;
