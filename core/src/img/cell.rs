//! Chunked backend: a grid of hyper-rectangular cells.

use itertools::Itertools;
use log::debug;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use super::{Bounded, IterableInterval, IterableIntervalMut, RandomAccessible, RandomAccessibleMut};
use crate::codec::{ValueView, WordArray};
use crate::config::CellSize;
use crate::error::{ConstructionError, ConstructionResult};
use crate::index::{create_steps, position_with_offset_to_index};
use crate::interval::{validate_dims, Interval};
use crate::math::div_ceil;
use crate::pos::LPos;
use crate::sampler::{IntervalCursor, Localizable, Positionable, RandomAccess, RandomAccessMut};
use crate::types::Sample;

/// One independently allocated chunk of a [`CellImg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    interval: Interval,
    dims: Vec<i64>,
    steps: Vec<i64>,
    data: WordArray,
}
impl Cell {
    /// Returns the region of the parent image covered by this cell.
    pub fn interval(&self) -> &Interval {
        &self.interval
    }
    /// Returns the backing store of this cell, in raster order over
    /// [`interval()`](Self::interval).
    pub fn data(&self) -> &WordArray {
        &self.data
    }

    #[inline]
    fn local_index(&self, pos: &[i64]) -> usize {
        position_with_offset_to_index(pos, &self.dims, self.interval.min()) as usize
    }
    /// Returns `true` if `coord` along dimension `d` falls inside this cell.
    #[inline]
    fn contains_along(&self, coord: i64, d: usize) -> bool {
        self.interval.min_at(d) <= coord && coord <= self.interval.max_at(d)
    }
}

/// Backend that tiles its domain with cells of a fixed size, each stored in
/// its own bit-packed array.
///
/// Cells on the upper edge of the domain are truncated so that no cell
/// extends past it. Cells are numbered in raster order over the cell grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellImg<T: Sample> {
    interval: Interval,
    cell_dims: Vec<i64>,
    grid_dims: Vec<i64>,
    cells: Vec<Cell>,
    _phantom: PhantomData<T>,
}

impl<T: Sample> CellImg<T> {
    /// Creates an image with automatically sized cells, filled with
    /// `T::default()`.
    pub fn new(dims: &[i64]) -> ConstructionResult<Self> {
        Self::with_cell_size(dims, &CellSize::Auto, T::default())
    }
    /// Creates an image with the given cell size along each dimension,
    /// filled with `T::default()`.
    pub fn with_cell_dims(dims: &[i64], cell_dims: &[i64]) -> ConstructionResult<Self> {
        Self::with_cell_size(dims, &CellSize::PerAxis(cell_dims.to_vec()), T::default())
    }
    /// Creates an image with the given cell layout, filled with `value`.
    pub fn with_cell_size(dims: &[i64], cell_size: &CellSize, value: T) -> ConstructionResult<Self> {
        validate_dims(dims)?;
        let packing = T::CODEC.packing()?;
        let cell_dims = cell_size.resolve(dims.len())?;
        let interval = Interval::from_dims(dims)?;

        let grid_dims = dims
            .iter()
            .zip(&cell_dims)
            .map(|(&len, &side)| div_ceil(len, side))
            .collect_vec();
        let grid = Interval::from_dims(&grid_dims)?;
        let mut cells = Vec::with_capacity(grid.count() as usize);
        for grid_pos in grid.iter() {
            let min = grid_pos.map(|d, g| g * cell_dims[d]);
            let max = min.map(|d, lo| std::cmp::min(lo + cell_dims[d], dims[d]) - 1);
            let cell_interval = Interval::new(min, max)?;
            let cell_size = cell_interval.dims().into_vec();
            let len = usize::try_from(cell_interval.count()).map_err(|_| ConstructionError::TooLarge)?;
            cells.push(Cell {
                steps: create_steps(cell_size.as_slice()),
                dims: cell_size,
                data: WordArray::filled(packing, len, value.to_raw())?,
                interval: cell_interval,
            });
        }
        debug!(
            "Created {:?} cell image with {} cells of {:?}",
            dims,
            cells.len(),
            cell_dims,
        );

        Ok(Self {
            interval,
            cell_dims,
            grid_dims,
            cells,
            _phantom: PhantomData,
        })
    }

    /// Returns the number of cells.
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }
    /// Returns the nominal (untruncated) cell size along each dimension.
    pub fn cell_dims(&self) -> &[i64] {
        &self.cell_dims
    }
    /// Returns the number of cells along each dimension.
    pub fn grid_dims(&self) -> &[i64] {
        &self.grid_dims
    }
    /// Returns the region covered by cell `index`.
    pub fn cell_interval(&self, index: usize) -> &Interval {
        &self.cells[index].interval
    }
    /// Returns all the cells, in raster order over the cell grid.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
    /// Returns the index of the cell containing `pos`.
    ///
    /// # Panics
    ///
    /// This method panics if `pos` lies outside the domain.
    pub fn cell_index_at(&self, pos: &[i64]) -> usize {
        assert!(
            self.interval.contains(pos),
            "Position {} outside {}",
            LPos::from(pos),
            self.interval,
        );
        self.grid_index(pos)
    }

    /// Returns the sample at `pos`.
    pub fn get(&self, pos: &[i64]) -> T {
        let cell = &self.cells[self.cell_index_at(pos)];
        T::from_raw(cell.data.get(cell.local_index(pos)))
    }
    /// Overwrites the sample at `pos`.
    pub fn set(&mut self, pos: &[i64], value: T) {
        let i = self.cell_index_at(pos);
        let cell = &mut self.cells[i];
        let index = cell.local_index(pos);
        cell.data.set(index, value.to_raw());
    }

    #[inline]
    fn grid_index(&self, pos: &[i64]) -> usize {
        let mut index = 0;
        for d in (0..pos.len()).rev() {
            index = index * self.grid_dims[d] + pos[d] / self.cell_dims[d];
        }
        index as usize
    }
}

impl<T: Sample> Bounded for CellImg<T> {
    #[inline]
    fn interval(&self) -> &Interval {
        &self.interval
    }
}

impl<T: Sample> RandomAccessible<T> for CellImg<T> {
    type Access<'a> = CellAccess<&'a CellImg<T>>;

    fn random_access(&self) -> Self::Access<'_> {
        CellAccess::new(self)
    }
}
impl<T: Sample> RandomAccessibleMut<T> for CellImg<T> {
    type AccessMut<'a> = CellAccess<&'a mut CellImg<T>>;

    fn random_access_mut(&mut self) -> Self::AccessMut<'_> {
        CellAccess::new(self)
    }
}
impl<T: Sample> IterableInterval<T> for CellImg<T> {
    type Cursor<'a> = IntervalCursor<CellAccess<&'a CellImg<T>>>;

    fn cursor(&self) -> Self::Cursor<'_> {
        IntervalCursor::new(CellAccess::new(self), self.interval.clone())
    }
}
impl<T: Sample> IterableIntervalMut<T> for CellImg<T> {
    type CursorMut<'a> = IntervalCursor<CellAccess<&'a mut CellImg<T>>>;

    fn cursor_mut(&mut self) -> Self::CursorMut<'_> {
        let interval = self.interval.clone();
        IntervalCursor::new(CellAccess::new(self), interval)
    }
}

/// Sentinel cell index for a sampler outside the domain.
const NO_CELL: usize = usize::MAX;

/// Random-access sampler over a [`CellImg`].
///
/// The sampler caches the current cell. Moves that stay inside it only
/// adjust the local index; moves that leave it look up the new cell from
/// the full position, once per move.
#[derive(Debug, Clone)]
pub struct CellAccess<R> {
    img: R,
    position: LPos,
    cell: usize,
    view: ValueView,
}

impl<T: Sample, R: Deref<Target = CellImg<T>>> CellAccess<R> {
    fn new(img: R) -> Self {
        let packing = img.cells[0].data.packing();
        let mut ret = Self {
            position: LPos::origin(img.interval.ndim()),
            cell: 0,
            view: ValueView::new(packing, 0),
            img,
        };
        ret.update_cell();
        ret
    }

    /// Returns the index of the cell the sampler is in, or `None` if it is
    /// outside the domain.
    pub fn cell_index(&self) -> Option<usize> {
        (self.cell != NO_CELL).then(|| self.cell)
    }

    /// Looks up the cell containing the current position and recomputes the
    /// local index.
    fn update_cell(&mut self) {
        if !self.img.interval.contains(&self.position) {
            self.cell = NO_CELL;
            return;
        }
        self.cell = self.img.grid_index(&self.position);
        let index = self.img.cells[self.cell].local_index(&self.position);
        self.view.update_index(index);
    }

    fn current_cell(&self) -> &Cell {
        self.img.cells.get(self.cell).unwrap_or_else(|| {
            panic!("Position {} outside {}", self.position, self.img.interval)
        })
    }
}

impl<R> Localizable for CellAccess<R> {
    #[inline]
    fn position(&self) -> &[i64] {
        &self.position
    }
}
impl<T: Sample, R: Deref<Target = CellImg<T>>> Positionable for CellAccess<R> {
    #[inline]
    fn move_axis(&mut self, distance: i64, d: usize) {
        self.position[d] += distance;
        let step = match self.img.cells.get(self.cell) {
            Some(cell) if cell.contains_along(self.position[d], d) => cell.steps[d],
            _ => return self.update_cell(),
        };
        self.view.inc_index(distance * step);
    }

    fn set_position(&mut self, pos: &[i64]) {
        self.position.set_from(pos);
        // Every axis is updated before the one containment check, so a jump
        // along several dimensions costs at most one lookup.
        let index = match self.img.cells.get(self.cell) {
            Some(cell) if cell.interval.contains(pos) => cell.local_index(pos),
            _ => return self.update_cell(),
        };
        self.view.update_index(index);
    }
}
impl<T: Sample, R: Deref<Target = CellImg<T>>> RandomAccess<T> for CellAccess<R> {
    #[inline]
    fn get(&self) -> T {
        T::from_raw(self.view.get(self.current_cell().data.words()))
    }
}
impl<T: Sample, R: DerefMut<Target = CellImg<T>>> RandomAccessMut<T> for CellAccess<R> {
    #[inline]
    fn set(&mut self, value: T) {
        if self.cell == NO_CELL {
            panic!("Position {} outside {}", self.position, self.img.interval);
        }
        let words = self.img.cells[self.cell].data.words_mut();
        self.view.set(words, value.to_raw());
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::index::position_to_index;
    use crate::sampler::Cursor;

    #[test]
    fn test_cell_layout() {
        let img = CellImg::<u8>::with_cell_dims(&[5, 3], &[2, 2]).unwrap();
        assert_eq!(6, img.num_cells());
        assert_eq!(&[3, 2], img.grid_dims());
        // Edge cells are truncated.
        assert_eq!(
            &Interval::new(LPos::from([4, 2]), LPos::from([4, 2])).unwrap(),
            img.cell_interval(5),
        );
        assert_eq!(1, img.cells()[5].data().len());
        assert_eq!(4, img.cell_index_at(&[3, 2]));

        let auto = CellImg::<u8>::new(&[1000, 10]).unwrap();
        assert_eq!(&[256, 256], auto.cell_dims());
        assert_eq!(4, auto.num_cells());
    }

    #[test]
    fn test_cell_bad_construction() {
        assert_eq!(
            Err(ConstructionError::InvalidCellSize { axis: 1, len: 0 }),
            CellImg::<u8>::with_cell_dims(&[4, 4], &[2, 0]),
        );
        assert_eq!(
            Err(ConstructionError::NonPositiveDimension { axis: 0, len: 0 }),
            CellImg::<u8>::new(&[0, 4]),
        );
    }

    #[test]
    fn test_cell_write_then_fresh_read() {
        let mut img = CellImg::<u8>::with_cell_dims(&[4, 4], &[2, 2]).unwrap();
        {
            let mut access = img.random_access_mut();
            access.set_position(&[3, 3]);
            access.set(99);
        }
        assert_eq!(4, img.num_cells());
        assert_eq!(3, img.cell_index_at(&[3, 3]));

        let mut access = img.random_access();
        access.set_position(&[3, 3]);
        assert_eq!(99, access.get());
        access.bck(0);
        assert_eq!(0, access.get());
        assert_eq!(Some(3), access.cell_index());
        access.bck(0);
        assert_eq!(Some(2), access.cell_index());
        assert_eq!(0, access.get());
    }

    /// Jumps that change several dimensions at once must land in the right
    /// cell, whichever axis leaves the cached cell.
    #[test]
    fn test_cell_multi_axis_jump() {
        let mut img = CellImg::<u16>::with_cell_dims(&[6, 6, 6], &[2, 3, 4]).unwrap();
        for pos in Interval::from_dims(&[6, 6, 6]).unwrap().iter() {
            let value = position_to_index(&pos, &[6, 6, 6]) as u16;
            img.set(&pos, value);
        }

        let mut access = img.random_access();
        access.set_position(&[1, 2, 3]);
        // Only dimension 2 leaves the cell.
        access.set_position(&[1, 2, 4]);
        assert_eq!(1 + 2 * 6 + 4 * 36, access.get());
        // Dimension 0 stays, dimensions 1 and 2 leave.
        access.set_position(&[1, 4, 0]);
        assert_eq!(1 + 4 * 6, access.get());
        access.move_by(&[4, -3, 5]);
        assert_eq!(&[5, 1, 5], access.position());
        assert_eq!(5 + 6 + 5 * 36, access.get());
        // Wander outside and back in.
        access.move_axis(-10, 0);
        assert_eq!(None, access.cell_index());
        access.move_axis(10, 0);
        assert_eq!(5 + 6 + 5 * 36, access.get());
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_cell_read_outside_panics() {
        let img = CellImg::<u8>::with_cell_dims(&[4, 4], &[2, 2]).unwrap();
        let mut access = img.random_access();
        access.set_position(&[4, 0]);
        access.get();
    }

    proptest! {
        /// Tests that every position lies in exactly one cell and that the
        /// cells tile the domain.
        #[test]
        fn test_cell_tiling(
            dims in prop::collection::vec(1..8_i64, 1..=3),
            side in 1..5_i64,
        ) {
            let img = CellImg::<bool>::with_cell_size(&dims, &CellSize::Uniform(side), false).unwrap();
            let total: i64 = img.cells().iter().map(|c| c.interval().count()).sum();
            prop_assert_eq!(img.size(), total);
            for pos in img.interval().iter() {
                let containing = img.cells().iter().positions(|c| c.interval().contains(&pos)).collect_vec();
                prop_assert_eq!(vec![img.cell_index_at(&pos)], containing);
            }
        }

        /// Tests that a cursor over a cell image visits the same positions
        /// as a plain raster iteration.
        #[test]
        fn test_cell_cursor_order(
            dims in prop::collection::vec(1..8_i64, 1..=3),
            side in 1..4_i64,
        ) {
            let img = CellImg::<u8>::with_cell_size(&dims, &CellSize::Uniform(side), 0).unwrap();
            let mut cursor = img.cursor();
            for pos in img.interval().iter() {
                prop_assert!(Cursor::<u8>::has_next(&cursor));
                Cursor::<u8>::advance(&mut cursor);
                prop_assert_eq!(pos.as_slice(), cursor.position());
            }
            prop_assert!(!Cursor::<u8>::has_next(&cursor));
        }
    }
}
