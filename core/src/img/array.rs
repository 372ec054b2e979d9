//! Flat backend: one contiguous raster-order array.

use log::debug;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use super::{Bounded, IterableInterval, IterableIntervalMut, RandomAccessible, RandomAccessibleMut};
use crate::codec::{ValueView, WordArray};
use crate::error::ConstructionResult;
use crate::index::{create_steps, index_to_position, position_to_index};
use crate::interval::{validate_dims, Interval};
use crate::pos::LPos;
use crate::sampler::{
    Cursor, CursorMut, CursorState, Localizable, Positionable, RandomAccess, RandomAccessMut,
};
use crate::types::Sample;

/// Backend storing every sample in one contiguous bit-packed array, in
/// raster order starting at the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayImg<T: Sample> {
    interval: Interval,
    dims: Vec<i64>,
    steps: Vec<i64>,
    data: WordArray,
    _phantom: PhantomData<T>,
}

impl<T: Sample> ArrayImg<T> {
    /// Creates an image with the given size, filled with `T::default()`.
    pub fn new(dims: &[i64]) -> ConstructionResult<Self> {
        Self::filled(dims, T::default())
    }
    /// Creates an image with the given size, filled with `value`.
    pub fn filled(dims: &[i64], value: T) -> ConstructionResult<Self> {
        validate_dims(dims)?;
        let packing = T::CODEC.packing()?;
        let len = usize::try_from(dims.iter().product::<i64>())
            .map_err(|_| crate::error::ConstructionError::TooLarge)?;
        let data = WordArray::filled(packing, len, value.to_raw())?;
        debug!(
            "Created {:?} array image of {} elements ({} words)",
            dims,
            len,
            data.words().len(),
        );
        Ok(Self {
            interval: Interval::from_dims(dims)?,
            dims: dims.to_vec(),
            steps: create_steps(dims),
            data,
            _phantom: PhantomData,
        })
    }

    /// Returns the backing store.
    pub fn data(&self) -> &WordArray {
        &self.data
    }
    /// Returns the backing store mutably, for bulk raw I/O.
    pub fn data_mut(&mut self) -> &mut WordArray {
        &mut self.data
    }

    /// Returns the step along each dimension of the backing store.
    pub fn steps(&self) -> &[i64] {
        &self.steps
    }

    /// Returns the sample at `pos`.
    ///
    /// # Panics
    ///
    /// This method panics if `pos` lies outside the domain.
    pub fn get(&self, pos: &[i64]) -> T {
        T::from_raw(self.data.get(self.index_of(pos)))
    }
    /// Overwrites the sample at `pos`.
    ///
    /// # Panics
    ///
    /// This method panics if `pos` lies outside the domain.
    pub fn set(&mut self, pos: &[i64], value: T) {
        let index = self.index_of(pos);
        self.data.set(index, value.to_raw());
    }

    fn index_of(&self, pos: &[i64]) -> usize {
        assert!(
            self.interval.contains(pos),
            "Position {} outside {}",
            LPos::from(pos),
            self.interval,
        );
        position_to_index(pos, &self.dims) as usize
    }
}

impl<T: Sample> Bounded for ArrayImg<T> {
    #[inline]
    fn interval(&self) -> &Interval {
        &self.interval
    }
}

impl<T: Sample> RandomAccessible<T> for ArrayImg<T> {
    type Access<'a> = ArrayAccess<&'a ArrayImg<T>>;

    fn random_access(&self) -> Self::Access<'_> {
        ArrayAccess::new(self)
    }
}
impl<T: Sample> RandomAccessibleMut<T> for ArrayImg<T> {
    type AccessMut<'a> = ArrayAccess<&'a mut ArrayImg<T>>;

    fn random_access_mut(&mut self) -> Self::AccessMut<'_> {
        ArrayAccess::new(self)
    }
}
impl<T: Sample> IterableInterval<T> for ArrayImg<T> {
    type Cursor<'a> = ArrayCursor<&'a ArrayImg<T>>;

    fn cursor(&self) -> Self::Cursor<'_> {
        ArrayCursor::new(self)
    }
}
impl<T: Sample> IterableIntervalMut<T> for ArrayImg<T> {
    type CursorMut<'a> = ArrayCursor<&'a mut ArrayImg<T>>;

    fn cursor_mut(&mut self) -> Self::CursorMut<'_> {
        ArrayCursor::new(self)
    }
}

/// Random-access sampler over an [`ArrayImg`].
///
/// Moving along dimension `d` adds `steps[d]` to the linear index, so every
/// move is O(1).
#[derive(Debug, Clone)]
pub struct ArrayAccess<R> {
    img: R,
    position: LPos,
    view: ValueView,
}

impl<T: Sample, R: Deref<Target = ArrayImg<T>>> ArrayAccess<R> {
    fn new(img: R) -> Self {
        let position = LPos::origin(img.interval.ndim());
        let view = ValueView::new(img.data.packing(), 0);
        Self {
            img,
            position,
            view,
        }
    }
}

impl<R> Localizable for ArrayAccess<R> {
    #[inline]
    fn position(&self) -> &[i64] {
        &self.position
    }
}
impl<T: Sample, R: Deref<Target = ArrayImg<T>>> Positionable for ArrayAccess<R> {
    #[inline]
    fn move_axis(&mut self, distance: i64, d: usize) {
        self.position[d] += distance;
        self.view.inc_index(distance * self.img.steps[d]);
    }
    #[inline]
    fn set_position(&mut self, pos: &[i64]) {
        self.position.set_from(pos);
        // Out-of-domain positions are only caught on access.
        let index = pos
            .iter()
            .zip(&self.img.steps)
            .fold(0_i64, |acc, (p, step)| acc.wrapping_add(p.wrapping_mul(*step)));
        self.view.update_index(index as usize);
    }
}
impl<T: Sample, R: Deref<Target = ArrayImg<T>>> RandomAccess<T> for ArrayAccess<R> {
    #[inline]
    fn get(&self) -> T {
        debug_assert!(
            self.img.interval.contains(&self.position),
            "Position {} outside {}",
            self.position,
            self.img.interval,
        );
        T::from_raw(self.view.get(self.img.data.words()))
    }
}
impl<T: Sample, R: DerefMut<Target = ArrayImg<T>>> RandomAccessMut<T> for ArrayAccess<R> {
    #[inline]
    fn set(&mut self, value: T) {
        debug_assert!(
            self.img.interval.contains(&self.position),
            "Position {} outside {}",
            self.position,
            self.img.interval,
        );
        self.view.set(self.img.data.words_mut(), value.to_raw());
    }
}

/// Raster-order cursor over an [`ArrayImg`].
///
/// Advancing just increments the linear index; the position is tracked
/// alongside it for callers that need it.
#[derive(Debug, Clone)]
pub struct ArrayCursor<R> {
    img: R,
    position: LPos,
    view: ValueView,
    len: usize,
}

impl<T: Sample, R: Deref<Target = ArrayImg<T>>> ArrayCursor<R> {
    fn new(img: R) -> Self {
        let len = img.data.len();
        let mut ret = Self {
            position: LPos::origin(img.interval.ndim()),
            view: ValueView::new(img.data.packing(), 0),
            img,
            len,
        };
        Cursor::<T>::reset(&mut ret);
        ret
    }
}

impl<R> Localizable for ArrayCursor<R> {
    #[inline]
    fn position(&self) -> &[i64] {
        &self.position
    }
}
impl<T: Sample, R: Deref<Target = ArrayImg<T>>> Cursor<T> for ArrayCursor<R> {
    #[inline]
    fn has_next(&self) -> bool {
        self.view.index().wrapping_add(1) < self.len
    }

    #[inline]
    fn advance(&mut self) {
        if !Cursor::<T>::has_next(self) {
            self.view.update_index(self.len);
            return;
        }
        self.view.inc_index(1);
        // The unbound position is one step before the origin along
        // dimension 0, so this also handles the first advance.
        for d in 0..self.position.ndim() {
            if self.position[d] + 1 < self.img.dims[d] {
                self.position[d] += 1;
                return;
            }
            self.position[d] = 0;
        }
    }

    fn reset(&mut self) {
        self.position.fill(0);
        self.position[0] = -1;
        self.view.update_index(usize::MAX);
    }

    #[inline]
    fn get(&self) -> T {
        debug_assert_eq!(CursorState::Positioned, Cursor::<T>::state(self));
        T::from_raw(self.view.get(self.img.data.words()))
    }

    fn state(&self) -> CursorState {
        match self.view.index() {
            usize::MAX => CursorState::Unbound,
            i if i < self.len => CursorState::Positioned,
            _ => CursorState::Exhausted,
        }
    }

    fn jump_fwd(&mut self, steps: u64) {
        if steps == 0 {
            return;
        }
        // Number of elements visited so far; `0` when unbound.
        let visited = self.view.index().wrapping_add(1);
        let index = match visited.checked_add(steps as usize) {
            Some(v) if v <= self.len => v - 1,
            _ => {
                self.view.update_index(self.len);
                return;
            }
        };
        self.view.update_index(index);
        index_to_position(index as i64, &self.img.dims, &mut self.position);
    }
}
impl<T: Sample, R: DerefMut<Target = ArrayImg<T>>> CursorMut<T> for ArrayCursor<R> {
    #[inline]
    fn set(&mut self, value: T) {
        debug_assert_eq!(CursorState::Positioned, Cursor::<T>::state(self));
        self.view.set(self.img.data.words_mut(), value.to_raw());
    }
}
