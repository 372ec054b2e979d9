//! Cursor over a 2D plane of an N-dimensional backend.

use super::{
    Cursor, CursorMut, CursorState, Localizable, Positionable, RandomAccess, RandomAccessMut,
};
use crate::interval::Interval;
use crate::types::Sample;

/// Cursor over the plane spanned by two dimensions of an interval, with all
/// other coordinates held fixed. `dim_a` varies fastest.
#[derive(Debug, Clone)]
pub struct PlaneCursor<A> {
    access: A,
    dim_a: usize,
    dim_b: usize,
    min: [i64; 2],
    max: [i64; 2],
    /// Fixed position, with the plane dimensions at their minimum.
    origin: Vec<i64>,
    visited: u64,
    size: u64,
}

impl<A: Positionable> PlaneCursor<A> {
    /// Creates an unbound cursor over the plane of `interval` spanned by
    /// `dim_a` and `dim_b` that passes through `fixed`.
    ///
    /// # Panics
    ///
    /// This method panics if the two dimensions are equal or out of range,
    /// or if `fixed` does not have the same dimensionality as `interval`.
    pub fn new(mut access: A, interval: &Interval, dim_a: usize, dim_b: usize, fixed: &[i64]) -> Self {
        let ndim = interval.ndim();
        assert!(dim_a < ndim && dim_b < ndim, "Plane dimension out of range");
        assert_ne!(dim_a, dim_b, "Plane dimensions must differ");
        assert_eq!(ndim, fixed.len(), "Dimensionality mismatch");

        let min = [interval.min_at(dim_a), interval.min_at(dim_b)];
        let max = [interval.max_at(dim_a), interval.max_at(dim_b)];
        let mut origin = fixed.to_vec();
        origin[dim_a] = min[0];
        origin[dim_b] = min[1];
        access.set_position(&origin);
        let size = (interval.dimension(dim_a) * interval.dimension(dim_b)) as u64;
        Self {
            access,
            dim_a,
            dim_b,
            min,
            max,
            origin,
            visited: 0,
            size,
        }
    }

    /// Returns the two dimensions spanning the plane.
    pub fn plane_dims(&self) -> (usize, usize) {
        (self.dim_a, self.dim_b)
    }
}

impl<A: Positionable> Localizable for PlaneCursor<A> {
    #[inline]
    fn position(&self) -> &[i64] {
        self.access.position()
    }
}

impl<T: Sample, A: RandomAccess<T>> Cursor<T> for PlaneCursor<A> {
    #[inline]
    fn has_next(&self) -> bool {
        self.visited < self.size
    }

    fn advance(&mut self) {
        match self.visited {
            0 => (),
            v if v < self.size => {
                if self.access.position()[self.dim_a] < self.max[0] {
                    self.access.fwd(self.dim_a);
                } else {
                    self.access.set_axis(self.min[0], self.dim_a);
                    self.access.fwd(self.dim_b);
                }
            }
            _ => {
                self.visited = self.size + 1;
                return;
            }
        }
        self.visited += 1;
    }

    fn reset(&mut self) {
        self.access.set_position(&self.origin);
        self.visited = 0;
    }

    #[inline]
    fn get(&self) -> T {
        debug_assert_eq!(CursorState::Positioned, Cursor::<T>::state(self));
        self.access.get()
    }

    fn state(&self) -> CursorState {
        match self.visited {
            0 => CursorState::Unbound,
            v if v <= self.size => CursorState::Positioned,
            _ => CursorState::Exhausted,
        }
    }

    fn jump_fwd(&mut self, steps: u64) {
        if steps == 0 {
            return;
        }
        let new_visited = self.visited.saturating_add(steps);
        if new_visited > self.size {
            self.visited = self.size + 1;
            return;
        }
        let width = (self.max[0] - self.min[0] + 1) as u64;
        let i = new_visited - 1;
        self.access.set_axis(self.min[0] + (i % width) as i64, self.dim_a);
        self.access.set_axis(self.min[1] + (i / width) as i64, self.dim_b);
        self.visited = new_visited;
    }
}

impl<T: Sample, A: RandomAccessMut<T>> CursorMut<T> for PlaneCursor<A> {
    #[inline]
    fn set(&mut self, value: T) {
        debug_assert_eq!(CursorState::Positioned, Cursor::<T>::state(self));
        self.access.set(value);
    }
}
