//! Planar backend: one array per 2D plane.

use log::debug;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use super::{Bounded, IterableInterval, IterableIntervalMut, RandomAccessible, RandomAccessibleMut};
use crate::codec::{ValueView, WordArray};
use crate::error::{ConstructionError, ConstructionResult};
use crate::index::{create_steps, index_to_position, position_to_index};
use crate::interval::{validate_dims, Interval};
use crate::pos::LPos;
use crate::sampler::{IntervalCursor, Localizable, Positionable, RandomAccess, RandomAccessMut};
use crate::types::Sample;

/// Backend storing each plane spanned by dimensions 0 and 1 in its own
/// bit-packed array.
///
/// Planes are numbered in raster order over dimensions `2..n`. A 1D or 2D
/// image has a single plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanarImg<T: Sample> {
    interval: Interval,
    /// Steps within a plane along dimensions 0 and 1 (only the first is used
    /// for a 1D image).
    plane_steps: [i64; 2],
    /// Sizes of dimensions `2..n`.
    slice_dims: Vec<i64>,
    /// Steps between planes along dimensions `2..n`.
    slice_steps: Vec<i64>,
    planes: Vec<WordArray>,
    _phantom: PhantomData<T>,
}

impl<T: Sample> PlanarImg<T> {
    /// Creates an image with the given size, filled with `T::default()`.
    pub fn new(dims: &[i64]) -> ConstructionResult<Self> {
        Self::filled(dims, T::default())
    }
    /// Creates an image with the given size, filled with `value`.
    pub fn filled(dims: &[i64], value: T) -> ConstructionResult<Self> {
        validate_dims(dims)?;
        let packing = T::CODEC.packing()?;
        let plane_dims = &dims[..dims.len().min(2)];
        let slice_dims = dims.get(2..).unwrap_or_default().to_vec();
        let plane_len = usize::try_from(plane_dims.iter().product::<i64>())
            .map_err(|_| ConstructionError::TooLarge)?;
        let num_planes = slice_dims.iter().product::<i64>() as usize;

        let planes = (0..num_planes)
            .map(|_| WordArray::filled(packing, plane_len, value.to_raw()))
            .collect::<ConstructionResult<Vec<_>>>()?;
        debug!(
            "Created {:?} planar image with {} planes of {} elements",
            dims, num_planes, plane_len,
        );

        Ok(Self {
            interval: Interval::from_dims(dims)?,
            plane_steps: [1, dims[0]],
            slice_steps: create_steps(slice_dims.as_slice()),
            slice_dims,
            planes,
            _phantom: PhantomData,
        })
    }

    /// Returns the number of planes.
    pub fn num_planes(&self) -> usize {
        self.planes.len()
    }
    /// Returns the backing store of plane `index`.
    pub fn plane(&self, index: usize) -> &WordArray {
        &self.planes[index]
    }
    /// Returns the backing store of plane `index` mutably, for bulk raw I/O.
    pub fn plane_mut(&mut self, index: usize) -> &mut WordArray {
        &mut self.planes[index]
    }
    /// Returns the region covered by plane `index`.
    pub fn plane_interval(&self, index: usize) -> Interval {
        assert!(index < self.planes.len(), "Plane index out of range");
        let mut min = vec![0; self.interval.ndim()];
        let mut max = self.interval.max().to_vec();
        if min.len() > 2 {
            index_to_position(index as i64, &self.slice_dims, &mut min[2..]);
            max[2..].copy_from_slice(&min[2..]);
        }
        Interval::new(min.into(), max.into()).expect("Plane interval is always valid")
    }
    /// Returns the index of the plane containing `pos`.
    ///
    /// # Panics
    ///
    /// This method panics if `pos` lies outside the domain.
    pub fn plane_index_at(&self, pos: &[i64]) -> usize {
        assert!(
            self.interval.contains(pos),
            "Position {} outside {}",
            LPos::from(pos),
            self.interval,
        );
        self.slice_index(pos)
    }

    /// Returns the sample at `pos`.
    pub fn get(&self, pos: &[i64]) -> T {
        let plane = &self.planes[self.plane_index_at(pos)];
        T::from_raw(plane.get(self.in_plane_index(pos)))
    }
    /// Overwrites the sample at `pos`.
    pub fn set(&mut self, pos: &[i64], value: T) {
        let plane = self.plane_index_at(pos);
        let index = self.in_plane_index(pos);
        self.planes[plane].set(index, value.to_raw());
    }

    #[inline]
    fn slice_index(&self, pos: &[i64]) -> usize {
        match pos.get(2..) {
            Some(higher) if !higher.is_empty() => position_to_index(higher, &self.slice_dims) as usize,
            _ => 0,
        }
    }
    #[inline]
    fn in_plane_index(&self, pos: &[i64]) -> usize {
        let x = pos[0];
        let y = pos.get(1).copied().unwrap_or(0);
        (x + y * self.plane_steps[1]) as usize
    }
}

impl<T: Sample> Bounded for PlanarImg<T> {
    #[inline]
    fn interval(&self) -> &Interval {
        &self.interval
    }
}

impl<T: Sample> RandomAccessible<T> for PlanarImg<T> {
    type Access<'a> = PlanarAccess<&'a PlanarImg<T>>;

    fn random_access(&self) -> Self::Access<'_> {
        PlanarAccess::new(self)
    }
}
impl<T: Sample> RandomAccessibleMut<T> for PlanarImg<T> {
    type AccessMut<'a> = PlanarAccess<&'a mut PlanarImg<T>>;

    fn random_access_mut(&mut self) -> Self::AccessMut<'_> {
        PlanarAccess::new(self)
    }
}
impl<T: Sample> IterableInterval<T> for PlanarImg<T> {
    type Cursor<'a> = IntervalCursor<PlanarAccess<&'a PlanarImg<T>>>;

    fn cursor(&self) -> Self::Cursor<'_> {
        IntervalCursor::new(PlanarAccess::new(self), self.interval.clone())
    }
}
impl<T: Sample> IterableIntervalMut<T> for PlanarImg<T> {
    type CursorMut<'a> = IntervalCursor<PlanarAccess<&'a mut PlanarImg<T>>>;

    fn cursor_mut(&mut self) -> Self::CursorMut<'_> {
        let interval = self.interval.clone();
        IntervalCursor::new(PlanarAccess::new(self), interval)
    }
}

/// Random-access sampler over a [`PlanarImg`].
///
/// Moves along dimensions 0 and 1 adjust the index within the current
/// plane; moves along higher dimensions switch planes.
#[derive(Debug, Clone)]
pub struct PlanarAccess<R> {
    img: R,
    position: LPos,
    slice: usize,
    view: ValueView,
}

impl<T: Sample, R: Deref<Target = PlanarImg<T>>> PlanarAccess<R> {
    fn new(img: R) -> Self {
        let view = ValueView::new(img.planes[0].packing(), 0);
        Self {
            position: LPos::origin(img.interval.ndim()),
            slice: 0,
            view,
            img,
        }
    }

    /// Returns the index of the current plane.
    pub fn plane_index(&self) -> usize {
        self.slice
    }

    fn current_plane(&self) -> &WordArray {
        debug_assert!(
            self.img.interval.contains(&self.position),
            "Position {} outside {}",
            self.position,
            self.img.interval,
        );
        self.img.planes.get(self.slice).unwrap_or_else(|| {
            panic!("Position {} outside {}", self.position, self.img.interval)
        })
    }
}

impl<R> Localizable for PlanarAccess<R> {
    #[inline]
    fn position(&self) -> &[i64] {
        &self.position
    }
}
impl<T: Sample, R: Deref<Target = PlanarImg<T>>> Positionable for PlanarAccess<R> {
    #[inline]
    fn move_axis(&mut self, distance: i64, d: usize) {
        self.position[d] += distance;
        if d < 2 {
            self.view.inc_index(distance * self.img.plane_steps[d]);
        } else {
            let delta = distance * self.img.slice_steps[d - 2];
            self.slice = self.slice.wrapping_add(delta as usize);
        }
    }
    #[inline]
    fn set_position(&mut self, pos: &[i64]) {
        self.position.set_from(pos);
        let x = pos[0];
        let y = pos.get(1).copied().unwrap_or(0);
        self.view
            .update_index(x.wrapping_add(y.wrapping_mul(self.img.plane_steps[1])) as usize);
        self.slice = pos
            .iter()
            .skip(2)
            .zip(&self.img.slice_steps)
            .fold(0_i64, |acc, (p, step)| acc.wrapping_add(p.wrapping_mul(*step)))
            as usize;
    }
}
impl<T: Sample, R: Deref<Target = PlanarImg<T>>> RandomAccess<T> for PlanarAccess<R> {
    #[inline]
    fn get(&self) -> T {
        T::from_raw(self.view.get(self.current_plane().words()))
    }
}
impl<T: Sample, R: DerefMut<Target = PlanarImg<T>>> RandomAccessMut<T> for PlanarAccess<R> {
    #[inline]
    fn set(&mut self, value: T) {
        debug_assert!(
            self.img.interval.contains(&self.position),
            "Position {} outside {}",
            self.position,
            self.img.interval,
        );
        let slice = self.slice;
        let plane = self.img.planes.get_mut(slice).unwrap_or_else(|| {
            panic!("Plane {} out of range", slice)
        });
        self.view.set(plane.words_mut(), value.to_raw());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{Cursor, PlaneCursor};

    #[test]
    fn test_planar_layout() {
        let img = PlanarImg::<u8>::new(&[3, 4, 2, 5]).unwrap();
        assert_eq!(10, img.num_planes());
        assert_eq!(12, img.plane(0).len());
        assert_eq!(7, img.plane_index_at(&[2, 3, 1, 3]));
        assert_eq!(
            Interval::new(LPos::from([0, 0, 1, 3]), LPos::from([2, 3, 1, 3])).unwrap(),
            img.plane_interval(7),
        );

        let flat = PlanarImg::<u8>::new(&[6]).unwrap();
        assert_eq!(1, flat.num_planes());
        assert_eq!(Interval::from_dims(&[6]).unwrap(), flat.plane_interval(0));
    }

    #[test]
    fn test_planar_switches_planes() {
        let mut img = PlanarImg::<i16>::new(&[4, 3, 3]).unwrap();
        img.set(&[1, 2, 0], -1);
        img.set(&[1, 2, 2], 7);

        let mut access = img.random_access_mut();
        access.set_position(&[1, 2, 1]);
        assert_eq!(1, access.plane_index());
        access.set(5);
        access.fwd(2);
        assert_eq!(7, access.get());
        access.move_axis(-2, 2);
        assert_eq!(-1, access.get());
        access.bck(0);
        assert_eq!(0, access.get());

        assert_eq!(5, img.get(&[1, 2, 1]));
        assert!(img.planes.iter().all(|p| p.get(9) != 0));
    }

    #[test]
    fn test_planar_plane_cursor() {
        let mut img = PlanarImg::<u32>::new(&[3, 2, 4]).unwrap();
        for pos in img.interval().clone().iter() {
            img.set(&pos, (pos[0] + 10 * pos[1] + 100 * pos[2]) as u32);
        }
        // Plane spanned by dimensions 2 and 0, through y = 1.
        let mut cursor = PlaneCursor::new(img.random_access(), img.interval(), 2, 0, &[0, 1, 0]);
        let mut seen = vec![];
        while let Some(value) = cursor.next_sample() {
            seen.push(value);
        }
        assert_eq!(
            vec![10, 110, 210, 310, 11, 111, 211, 311, 12, 112, 212, 312],
            seen,
        );
        assert!(!Cursor::<u32>::has_next(&cursor));
        Cursor::<u32>::reset(&mut cursor);
        cursor.jump_fwd(6);
        assert_eq!(&[1, 1, 1], cursor.position());
        assert_eq!(111, Cursor::<u32>::get(&cursor));
    }
}
