//! Storage backends and the traits that expose them.
//!
//! Every backend stores a finite interval of samples and hands out samplers
//! (see [`crate::sampler`]) to read and write them. Backends differ only in
//! layout:
//!
//! - [`ArrayImg`]: one contiguous raster-order array
//! - [`CellImg`]: a grid of independently allocated hyper-rectangular cells
//! - [`PlanarImg`]: one array per 2D plane, selected by the higher
//!   dimensions
//! - [`NtreeImg`]: a sparse 2^n-ary tree of uniform regions
//! - [`ConstantImg`]: no storage at all
//!
//! [`AnyImg`] chooses among the first four at runtime.

mod any;
mod array;
mod cell;
mod constant;
pub mod ntree;
mod planar;

pub use any::{AnyAccess, AnyImg, AnyReadAccess, AnyWriteAccess, ImgFactory, StorageKind};
pub use array::{ArrayAccess, ArrayCursor, ArrayImg};
pub use cell::{Cell, CellAccess, CellImg};
pub use constant::{ConstantAccess, ConstantImg};
pub use ntree::{NtreeAccess, NtreeImg};
pub use planar::{PlanarAccess, PlanarImg};

use crate::interval::Interval;
use crate::pos::LPos;
use crate::sampler::{
    Cursor, CursorMut, IntervalCursor, Positionable, RandomAccess, RandomAccessMut,
};
use crate::types::Sample;

/// Something with a finite domain.
pub trait Bounded {
    /// Returns the domain.
    fn interval(&self) -> &Interval;

    /// Returns the number of dimensions.
    #[inline]
    fn ndim(&self) -> usize {
        self.interval().ndim()
    }
    /// Returns the size along each dimension.
    fn dims(&self) -> LPos {
        self.interval().dims()
    }
    /// Returns the number of elements.
    fn size(&self) -> i64 {
        self.interval().count()
    }
}

/// Something that can hand out random-access read samplers.
pub trait RandomAccessible<T: Sample> {
    /// Read sampler type.
    type Access<'a>: RandomAccess<T> + Clone
    where
        Self: 'a;

    /// Returns a read sampler that may visit any position in the domain.
    fn random_access(&self) -> Self::Access<'_>;

    /// Returns a read sampler that will only visit positions in `interval`,
    /// positioned at its minimum. Implementations may use this hint to pick
    /// a cheaper sampler.
    fn random_access_in(&self, interval: &Interval) -> Self::Access<'_> {
        let mut access = self.random_access();
        access.set_position(interval.min());
        access
    }

    /// Returns a cursor over a sub-interval, built on
    /// [`random_access_in()`](Self::random_access_in).
    fn cursor_in(&self, interval: &Interval) -> IntervalCursor<Self::Access<'_>> {
        IntervalCursor::new(self.random_access_in(interval), interval.clone())
    }
}

/// Something that can hand out random-access write samplers.
pub trait RandomAccessibleMut<T: Sample>: RandomAccessible<T> {
    /// Write sampler type.
    type AccessMut<'a>: RandomAccessMut<T>
    where
        Self: 'a;

    /// Returns a write sampler that may visit any position in the domain.
    fn random_access_mut(&mut self) -> Self::AccessMut<'_>;
}

/// Something whose whole domain can be iterated in raster order.
pub trait IterableInterval<T: Sample>: Bounded {
    /// Read cursor type.
    type Cursor<'a>: Cursor<T> + Clone
    where
        Self: 'a;

    /// Returns an unbound cursor over the whole domain.
    fn cursor(&self) -> Self::Cursor<'_>;
}

/// Something whose whole domain can be iterated and written in raster
/// order.
pub trait IterableIntervalMut<T: Sample>: IterableInterval<T> {
    /// Write cursor type.
    type CursorMut<'a>: CursorMut<T>
    where
        Self: 'a;

    /// Returns an unbound write cursor over the whole domain.
    fn cursor_mut(&mut self) -> Self::CursorMut<'_>;
}

/// Full-featured storage backend.
pub trait Img<T: Sample>:
    Bounded + RandomAccessibleMut<T> + IterableIntervalMut<T> + Clone
{
}
impl<T: Sample, I> Img<T> for I where
    I: Bounded + RandomAccessibleMut<T> + IterableIntervalMut<T> + Clone
{
}
