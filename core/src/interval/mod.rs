//! N-dimensional intervals.

use std::fmt;

pub mod iter;

use crate::error::{ConstructionError, ConstructionResult};
use crate::math::checked_product;
use crate::pos::LPos;
pub use iter::Iter;

/// Finite N-dimensional domain with an inclusive minimum and maximum along
/// each dimension.
///
/// An `Interval` always has at least one dimension and positive volume.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    /// Most negative corner.
    min: LPos,
    /// Most positive corner.
    max: LPos,
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interval({}..={})", self.min, self.max)
    }
}

impl Interval {
    /// Creates an interval starting at the origin with the given size along
    /// each dimension.
    pub fn from_dims(dims: &[i64]) -> ConstructionResult<Self> {
        validate_dims(dims)?;
        let min = LPos::origin(dims.len());
        let max = LPos::from_fn(dims.len(), |d| dims[d] - 1);
        Ok(Self { min, max })
    }

    /// Creates an interval spanning between the given corners (inclusive).
    pub fn new(min: LPos, max: LPos) -> ConstructionResult<Self> {
        if min.ndim() == 0 {
            return Err(ConstructionError::NoDimensions);
        }
        if min.ndim() != max.ndim() {
            return Err(ConstructionError::DimensionMismatch {
                expected: min.ndim(),
                got: max.ndim(),
            });
        }
        for d in 0..min.ndim() {
            if min[d] > max[d] {
                return Err(ConstructionError::NonPositiveDimension {
                    axis: d,
                    len: max[d] - min[d] + 1,
                });
            }
        }
        Ok(Self { min, max })
    }

    /// Creates an interval spanning between the given positions (inclusive),
    /// in any order.
    ///
    /// # Panics
    ///
    /// This function panics if the positions have different or zero
    /// dimensionality.
    pub fn span(a: &LPos, b: &LPos) -> Self {
        assert_eq!(a.ndim(), b.ndim(), "Dimensionality mismatch");
        assert!(a.ndim() > 0, "Interval must have at least one dimension");
        Self {
            min: LPos::min(a, b),
            max: LPos::max(a, b),
        }
    }

    /// Creates an interval containing a single position.
    pub fn single_cell(pos: LPos) -> Self {
        assert!(pos.ndim() > 0, "Interval must have at least one dimension");
        Self {
            min: pos.clone(),
            max: pos,
        }
    }

    /// Returns the number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.min.ndim()
    }

    /// Returns the minimum (most negative) corner of the interval.
    #[inline]
    pub fn min(&self) -> &LPos {
        &self.min
    }
    /// Returns the maximum (most positive) corner of the interval.
    #[inline]
    pub fn max(&self) -> &LPos {
        &self.max
    }
    /// Returns the minimum along one dimension.
    #[inline]
    pub fn min_at(&self, d: usize) -> i64 {
        self.min[d]
    }
    /// Returns the maximum along one dimension.
    #[inline]
    pub fn max_at(&self, d: usize) -> i64 {
        self.max[d]
    }

    /// Returns the size of the interval along one dimension.
    #[inline]
    pub fn dimension(&self, d: usize) -> i64 {
        self.max[d] - self.min[d] + 1
    }
    /// Returns the size of the interval along each dimension.
    pub fn dims(&self) -> LPos {
        LPos::from_fn(self.ndim(), |d| self.dimension(d))
    }

    /// Returns the number of integer positions in the interval.
    ///
    /// # Panics
    ///
    /// This method panics if the count does not fit in an `i64`.
    pub fn count(&self) -> i64 {
        checked_product(self.dims().as_slice()).expect("Interval too large to count")
    }

    /// Returns `true` if `pos` lies inside the interval.
    #[inline]
    pub fn contains(&self, pos: &[i64]) -> bool {
        debug_assert_eq!(pos.len(), self.ndim(), "Dimensionality mismatch");
        pos.iter()
            .zip(self.min.iter().zip(self.max.iter()))
            .all(|(&p, (&lo, &hi))| lo <= p && p <= hi)
    }

    /// Returns `true` if `inner` lies completely inside the interval.
    pub fn contains_interval(&self, inner: &Interval) -> bool {
        self.contains(&inner.min) && self.contains(&inner.max)
    }

    /// Returns `true` if the two intervals intersect.
    pub fn intersects(&self, other: &Interval) -> bool {
        // Iff `self` and `other` intersect along all dimensions, then they
        // truly intersect in N-dimensional space.
        (0..self.ndim()).all(|d| !(self.max[d] < other.min[d] || other.max[d] < self.min[d]))
    }

    /// Returns the intersection of two intervals, or `None` if they do not
    /// intersect.
    #[must_use = "This method returns a new value instead of mutating its input"]
    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        let min = LPos::max(&self.min, &other.min);
        let max = LPos::min(&self.max, &other.max);
        Interval::new(min, max).ok()
    }

    /// Returns the interval shifted by `offset`.
    #[must_use = "This method returns a new value instead of mutating its input"]
    pub fn translate(&self, offset: &LPos) -> Interval {
        Self {
            min: &self.min + offset,
            max: &self.max + offset,
        }
    }

    /// Returns an iterator over all the positions in the interval in raster
    /// order (dimension 0 fastest).
    #[inline]
    pub fn iter(&self) -> Iter {
        self.into()
    }
}

/// Checks that a list of dimension sizes describes a nonempty domain.
pub(crate) fn validate_dims(dims: &[i64]) -> ConstructionResult<()> {
    if dims.is_empty() {
        return Err(ConstructionError::NoDimensions);
    }
    if let Some((axis, &len)) = dims.iter().enumerate().find(|(_, &len)| len <= 0) {
        return Err(ConstructionError::NonPositiveDimension { axis, len });
    }
    checked_product(dims).ok_or(ConstructionError::TooLarge)?;
    Ok(())
}

#[cfg(test)]
mod tests;
