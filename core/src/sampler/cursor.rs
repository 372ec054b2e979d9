//! Raster-order cursor over any random-access sampler.

use super::{Cursor, CursorMut, Localizable, Positionable, RandomAccess, RandomAccessMut};
use crate::index::index_to_position_with_offset;
use crate::interval::Interval;
use crate::types::Sample;

/// Lifecycle of a cursor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CursorState {
    /// Before the first element. The position is meaningless.
    Unbound,
    /// On an element of the interval.
    Positioned,
    /// Past the last element. The position is meaningless.
    Exhausted,
}

/// Cursor that walks an interval in raster order by moving a random-access
/// sampler along one axis at a time.
///
/// Any backend gets a correct cursor this way. Backends with a contiguous
/// layout provide faster specialized cursors.
#[derive(Debug, Clone)]
pub struct IntervalCursor<A> {
    access: A,
    interval: Interval,
    /// Number of elements visited so far; `0` when unbound.
    visited: u64,
    size: u64,
    /// Scratch space for positions computed on carry.
    target: Vec<i64>,
}

impl<A: Positionable> IntervalCursor<A> {
    /// Creates an unbound cursor over `interval`.
    ///
    /// `access` must be able to reach every position in `interval`.
    pub fn new(mut access: A, interval: Interval) -> Self {
        debug_assert_eq!(access.ndim(), interval.ndim(), "Dimensionality mismatch");
        access.set_position(interval.min());
        let size = interval.count() as u64;
        let target = interval.min().to_vec();
        Self {
            access,
            interval,
            visited: 0,
            size,
            target,
        }
    }

    /// Returns the interval being iterated.
    pub fn interval(&self) -> &Interval {
        &self.interval
    }
    /// Returns the underlying sampler.
    pub fn access(&self) -> &A {
        &self.access
    }
    /// Consumes the cursor, returning the underlying sampler.
    pub fn into_access(self) -> A {
        self.access
    }

    fn raster_step(&mut self) {
        let pos = self.access.position();
        if pos[0] < self.interval.max_at(0) {
            self.access.fwd(0);
            return;
        }
        // Carry into higher dimensions with a single repositioning, so that
        // chunked backends look up the new chunk only once.
        self.target.copy_from_slice(pos);
        for d in 0..self.target.len() {
            if self.target[d] < self.interval.max_at(d) {
                self.target[d] += 1;
                break;
            }
            self.target[d] = self.interval.min_at(d);
        }
        self.access.set_position(&self.target);
    }
}

impl<A: Positionable> Localizable for IntervalCursor<A> {
    #[inline]
    fn position(&self) -> &[i64] {
        self.access.position()
    }
}

impl<T: Sample, A: RandomAccess<T>> Cursor<T> for IntervalCursor<A> {
    #[inline]
    fn has_next(&self) -> bool {
        self.visited < self.size
    }

    fn advance(&mut self) {
        match self.visited {
            // The sampler already sits on the first element.
            0 => (),
            v if v < self.size => self.raster_step(),
            _ => {
                // Stay put; the position is meaningless once exhausted.
                self.visited = self.size + 1;
                return;
            }
        }
        self.visited += 1;
    }

    fn reset(&mut self) {
        self.access.set_position(self.interval.min());
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
        let dims = self.interval.dims();
        index_to_position_with_offset(
            (new_visited - 1) as i64,
            dims.as_slice(),
            self.interval.min().as_slice(),
            &mut self.target,
        );
        self.access.set_position(&self.target);
        self.visited = new_visited;
    }
}

impl<T: Sample, A: RandomAccessMut<T>> CursorMut<T> for IntervalCursor<A> {
    #[inline]
    fn set(&mut self, value: T) {
        debug_assert_eq!(CursorState::Positioned, Cursor::<T>::state(self));
        self.access.set(value);
    }
}
