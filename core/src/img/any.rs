//! Backend chosen at runtime.

use super::{
    ArrayAccess, ArrayImg, Bounded, CellAccess, CellImg, IterableInterval, IterableIntervalMut,
    NtreeAccess, NtreeImg, PlanarAccess, PlanarImg, RandomAccessible, RandomAccessibleMut,
};
use crate::config::StorageConfig;
use crate::error::ConstructionResult;
use crate::interval::Interval;
use crate::sampler::{IntervalCursor, Localizable, Positionable, RandomAccess, RandomAccessMut};
use crate::types::Sample;

/// Storage layout of a backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// [`ArrayImg`].
    Array,
    /// [`CellImg`].
    Cell,
    /// [`PlanarImg`].
    Planar,
    /// [`NtreeImg`].
    Ntree,
}
impl Default for StorageKind {
    fn default() -> Self {
        Self::Array
    }
}

/// Creates backends of one storage kind.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImgFactory {
    /// Layout of the created backends.
    pub kind: StorageKind,
    /// Layout settings.
    pub config: StorageConfig,
}

impl ImgFactory {
    /// Returns a factory with default settings for the given layout.
    pub fn new(kind: StorageKind) -> Self {
        Self {
            kind,
            config: StorageConfig::default(),
        }
    }

    /// Creates a backend with the given size, filled with `T::default()`.
    pub fn create<T: Sample>(&self, dims: &[i64]) -> ConstructionResult<AnyImg<T>> {
        self.create_filled(dims, T::default())
    }
    /// Creates a backend with the given size, filled with `value`.
    pub fn create_filled<T: Sample>(&self, dims: &[i64], value: T) -> ConstructionResult<AnyImg<T>> {
        Ok(match self.kind {
            StorageKind::Array => AnyImg::Array(ArrayImg::filled(dims, value)?),
            StorageKind::Cell => {
                AnyImg::Cell(CellImg::with_cell_size(dims, &self.config.cell_size, value)?)
            }
            StorageKind::Planar => AnyImg::Planar(PlanarImg::filled(dims, value)?),
            StorageKind::Ntree => AnyImg::Ntree(NtreeImg::with_granularity(
                dims,
                value,
                self.config.ntree_granularity,
            )?),
        })
    }
}

/// Backend of any storage kind.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub enum AnyImg<T: Sample> {
    Array(ArrayImg<T>),
    Cell(CellImg<T>),
    Planar(PlanarImg<T>),
    Ntree(NtreeImg<T>),
}

impl<T: Sample> From<ArrayImg<T>> for AnyImg<T> {
    fn from(img: ArrayImg<T>) -> Self {
        Self::Array(img)
    }
}
impl<T: Sample> From<CellImg<T>> for AnyImg<T> {
    fn from(img: CellImg<T>) -> Self {
        Self::Cell(img)
    }
}
impl<T: Sample> From<PlanarImg<T>> for AnyImg<T> {
    fn from(img: PlanarImg<T>) -> Self {
        Self::Planar(img)
    }
}
impl<T: Sample> From<NtreeImg<T>> for AnyImg<T> {
    fn from(img: NtreeImg<T>) -> Self {
        Self::Ntree(img)
    }
}

impl<T: Sample> AnyImg<T> {
    /// Returns the storage layout.
    pub fn kind(&self) -> StorageKind {
        match self {
            Self::Array(_) => StorageKind::Array,
            Self::Cell(_) => StorageKind::Cell,
            Self::Planar(_) => StorageKind::Planar,
            Self::Ntree(_) => StorageKind::Ntree,
        }
    }

    /// Returns the sample at `pos`.
    ///
    /// # Panics
    ///
    /// This method panics if `pos` lies outside the domain.
    pub fn get(&self, pos: &[i64]) -> T {
        match_storage!(AnyImg, self, img => img.get(pos))
    }
    /// Sets the sample at `pos`.
    ///
    /// # Panics
    ///
    /// This method panics if `pos` lies outside the domain, or if a sparse
    /// tree cannot split down to `pos`.
    pub fn set(&mut self, pos: &[i64], value: T) {
        match self {
            Self::Array(img) => img.set(pos, value),
            Self::Cell(img) => img.set(pos, value),
            Self::Planar(img) => img.set(pos, value),
            Self::Ntree(img) => {
                if let Err(e) = img.try_set(pos, value) {
                    panic!("Cannot write {:?} at {:?}: {}", value, pos, e);
                }
            }
        }
    }
}

impl<T: Sample> Bounded for AnyImg<T> {
    fn interval(&self) -> &Interval {
        match_storage!(AnyImg, self, img => img.interval())
    }
}

/// Read sampler over an [`AnyImg`].
pub type AnyReadAccess<'a, T> = AnyAccess<
    ArrayAccess<&'a ArrayImg<T>>,
    CellAccess<&'a CellImg<T>>,
    PlanarAccess<&'a PlanarImg<T>>,
    NtreeAccess<&'a NtreeImg<T>>,
>;
/// Write sampler over an [`AnyImg`].
pub type AnyWriteAccess<'a, T> = AnyAccess<
    ArrayAccess<&'a mut ArrayImg<T>>,
    CellAccess<&'a mut CellImg<T>>,
    PlanarAccess<&'a mut PlanarImg<T>>,
    NtreeAccess<&'a mut NtreeImg<T>>,
>;

impl<T: Sample> RandomAccessible<T> for AnyImg<T> {
    type Access<'a> = AnyReadAccess<'a, T>;

    fn random_access(&self) -> Self::Access<'_> {
        match self {
            Self::Array(img) => AnyAccess::Array(img.random_access()),
            Self::Cell(img) => AnyAccess::Cell(img.random_access()),
            Self::Planar(img) => AnyAccess::Planar(img.random_access()),
            Self::Ntree(img) => AnyAccess::Ntree(img.random_access()),
        }
    }
    fn random_access_in(&self, interval: &Interval) -> Self::Access<'_> {
        match self {
            Self::Array(img) => AnyAccess::Array(img.random_access_in(interval)),
            Self::Cell(img) => AnyAccess::Cell(img.random_access_in(interval)),
            Self::Planar(img) => AnyAccess::Planar(img.random_access_in(interval)),
            Self::Ntree(img) => AnyAccess::Ntree(img.random_access_in(interval)),
        }
    }
}
impl<T: Sample> RandomAccessibleMut<T> for AnyImg<T> {
    type AccessMut<'a> = AnyWriteAccess<'a, T>;

    fn random_access_mut(&mut self) -> Self::AccessMut<'_> {
        match self {
            Self::Array(img) => AnyAccess::Array(img.random_access_mut()),
            Self::Cell(img) => AnyAccess::Cell(img.random_access_mut()),
            Self::Planar(img) => AnyAccess::Planar(img.random_access_mut()),
            Self::Ntree(img) => AnyAccess::Ntree(img.random_access_mut()),
        }
    }
}
impl<T: Sample> IterableInterval<T> for AnyImg<T> {
    type Cursor<'a> = IntervalCursor<AnyReadAccess<'a, T>>;

    fn cursor(&self) -> Self::Cursor<'_> {
        IntervalCursor::new(self.random_access(), self.interval().clone())
    }
}
impl<T: Sample> IterableIntervalMut<T> for AnyImg<T> {
    type CursorMut<'a> = IntervalCursor<AnyWriteAccess<'a, T>>;

    fn cursor_mut(&mut self) -> Self::CursorMut<'_> {
        let interval = self.interval().clone();
        IntervalCursor::new(self.random_access_mut(), interval)
    }
}

/// Sampler over one of the storage kinds.
#[allow(missing_docs)]
#[derive(Debug, Clone)]
pub enum AnyAccess<A, C, P, N> {
    Array(A),
    Cell(C),
    Planar(P),
    Ntree(N),
}

impl<A, C, P, N> Localizable for AnyAccess<A, C, P, N>
where
    A: Localizable,
    C: Localizable,
    P: Localizable,
    N: Localizable,
{
    #[inline]
    fn position(&self) -> &[i64] {
        match_storage!(AnyAccess, self, access => access.position())
    }
}
impl<A, C, P, N> Positionable for AnyAccess<A, C, P, N>
where
    A: Positionable,
    C: Positionable,
    P: Positionable,
    N: Positionable,
{
    #[inline]
    fn move_axis(&mut self, distance: i64, d: usize) {
        match_storage!(AnyAccess, self, access => access.move_axis(distance, d))
    }
    #[inline]
    fn set_position(&mut self, pos: &[i64]) {
        match_storage!(AnyAccess, self, access => access.set_position(pos))
    }
}
impl<T: Sample, A, C, P, N> RandomAccess<T> for AnyAccess<A, C, P, N>
where
    A: RandomAccess<T>,
    C: RandomAccess<T>,
    P: RandomAccess<T>,
    N: RandomAccess<T>,
{
    #[inline]
    fn get(&self) -> T {
        match_storage!(AnyAccess, self, access => access.get())
    }
}
impl<T: Sample, A, C, P, N> RandomAccessMut<T> for AnyAccess<A, C, P, N>
where
    A: RandomAccessMut<T>,
    C: RandomAccessMut<T>,
    P: RandomAccessMut<T>,
    N: RandomAccessMut<T>,
{
    #[inline]
    fn set(&mut self, value: T) {
        match_storage!(AnyAccess, self, access => access.set(value))
    }
}
