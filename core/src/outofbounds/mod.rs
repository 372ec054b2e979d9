//! Reading past the edge of a backend.
//!
//! An [`ExtendedImg`] wraps any random-accessible source together with a
//! [`Boundary`] policy. Its samplers may go anywhere; reads outside the
//! source domain follow the policy, while reads inside it go straight to the
//! source's own sampler.

use itertools::Either;

mod access;
mod boundary;

pub use access::ExtendedRandomAccess;
pub use boundary::Boundary;

use crate::img::{Bounded, RandomAccessible};
use crate::interval::Interval;
use crate::sampler::Positionable;
use crate::types::Sample;

/// Source extended past its domain by a boundary policy.
#[derive(Debug)]
pub struct ExtendedImg<'a, I: ?Sized, T> {
    source: &'a I,
    boundary: Boundary<T>,
}

// Manual impl so that `I` need not be `Clone`.
impl<'a, I: ?Sized, T: Clone> Clone for ExtendedImg<'a, I, T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source,
            boundary: self.boundary.clone(),
        }
    }
}

impl<'a, T: Sample, I: ?Sized + RandomAccessible<T> + Bounded> ExtendedImg<'a, I, T> {
    /// Extends `source` with `boundary`.
    pub fn new(source: &'a I, boundary: Boundary<T>) -> Self {
        Self { source, boundary }
    }
    /// Extends `source` with `T::default()` outside its domain.
    pub fn zero(source: &'a I) -> Self {
        Self::new(source, Boundary::Constant(T::default()))
    }

    /// Returns the source.
    pub fn source(&self) -> &'a I {
        self.source
    }
    /// Returns the boundary policy.
    pub fn boundary(&self) -> &Boundary<T> {
        &self.boundary
    }
    /// Returns the domain of the source. Samplers may go outside it.
    pub fn source_interval(&self) -> &Interval {
        self.source.interval()
    }

    /// Returns a sampler that always applies the boundary policy, positioned
    /// at the minimum of the source domain.
    pub fn extended_access(&self) -> ExtendedRandomAccess<I::Access<'a>, T> {
        ExtendedRandomAccess::new(
            self.source.random_access(),
            self.source.interval(),
            self.boundary,
        )
    }
}

impl<'a, T: Sample, I: ?Sized + RandomAccessible<T> + Bounded> RandomAccessible<T>
    for ExtendedImg<'a, I, T>
{
    type Access<'b> = Either<I::Access<'a>, ExtendedRandomAccess<I::Access<'a>, T>>
    where
        Self: 'b;

    fn random_access(&self) -> Self::Access<'_> {
        Either::Right(self.extended_access())
    }

    /// Returns the source's own sampler when `interval` lies inside the
    /// source domain, skipping all boundary bookkeeping.
    fn random_access_in(&self, interval: &Interval) -> Self::Access<'_> {
        if self.source.interval().contains_interval(interval) {
            Either::Left(self.source.random_access_in(interval))
        } else {
            let mut access = self.extended_access();
            access.set_position(interval.min());
            Either::Right(access)
        }
    }
}

/// Extends `source` with `boundary`.
pub fn extend<T: Sample, I: ?Sized + RandomAccessible<T> + Bounded>(
    source: &I,
    boundary: Boundary<T>,
) -> ExtendedImg<'_, I, T> {
    ExtendedImg::new(source, boundary)
}
