//! Positioned access and iteration.
//!
//! A sampler is a stateful handle bound to one backend. Random-access
//! samplers ([`RandomAccess`]) can be moved anywhere; cursors ([`Cursor`])
//! walk an interval in raster order (dimension 0 fastest).
//!
//! Read samplers borrow their backend immutably and are `Clone`, so a copy
//! can be handed to another thread or moved independently. Write samplers
//! borrow their backend exclusively. Samplers never synchronize with each
//! other; a single sampler must be used by one thread at a time.

use itertools::Either;

mod cursor;
mod plane;

pub use cursor::{CursorState, IntervalCursor};
pub use plane::PlaneCursor;

use crate::pos::{IPos, LPos};
use crate::types::Sample;

/// Something with a position.
pub trait Localizable {
    /// Returns the current position.
    fn position(&self) -> &[i64];

    /// Returns the number of dimensions.
    #[inline]
    fn ndim(&self) -> usize {
        self.position().len()
    }
    /// Returns the current coordinate along dimension `d`.
    #[inline]
    fn position_at(&self, d: usize) -> i64 {
        self.position()[d]
    }
    /// Returns a copy of the current position.
    fn localize(&self) -> LPos {
        LPos::from(self.position())
    }
    /// Returns a copy of the current position at 32-bit resolution, or
    /// `None` if it does not fit.
    fn localize_ipos(&self) -> Option<IPos> {
        self.localize().to_ipos()
    }
}

/// Something that can be moved around.
pub trait Positionable: Localizable {
    /// Moves by `distance` along dimension `d`.
    fn move_axis(&mut self, distance: i64, d: usize);
    /// Moves to `pos`.
    fn set_position(&mut self, pos: &[i64]);

    /// Moves one step forward along dimension `d`.
    #[inline]
    fn fwd(&mut self, d: usize) {
        self.move_axis(1, d);
    }
    /// Moves one step backward along dimension `d`.
    #[inline]
    fn bck(&mut self, d: usize) {
        self.move_axis(-1, d);
    }
    /// Moves to coordinate `pos` along dimension `d`, leaving the others
    /// alone.
    #[inline]
    fn set_axis(&mut self, pos: i64, d: usize) {
        let distance = pos - self.position()[d];
        if distance != 0 {
            self.move_axis(distance, d);
        }
    }
    /// Moves by `distance` along every dimension at once.
    fn move_by(&mut self, distance: &[i64]) {
        let target: Vec<i64> = self
            .position()
            .iter()
            .zip(distance)
            .map(|(p, dist)| p + dist)
            .collect();
        self.set_position(&target);
    }
    /// Moves to a 32-bit position.
    fn set_position_ipos(&mut self, pos: &IPos) {
        self.set_position(&pos.to_lpos());
    }
}

/// Sampler that reads the element at its position.
pub trait RandomAccess<T: Sample>: Positionable {
    /// Returns the element at the current position.
    ///
    /// # Panics
    ///
    /// This method may panic if the position lies outside the backend's
    /// domain. It never clamps.
    fn get(&self) -> T;
}

/// Sampler that can also write the element at its position.
pub trait RandomAccessMut<T: Sample>: RandomAccess<T> {
    /// Overwrites the element at the current position.
    fn set(&mut self, value: T);
}

/// Sampler that iterates over an interval in raster order.
pub trait Cursor<T: Sample>: Localizable {
    /// Returns `true` if another call to `advance()` would land on an
    /// element.
    fn has_next(&self) -> bool;
    /// Moves to the next element in raster order. An unbound cursor moves to
    /// the first element.
    fn advance(&mut self);
    /// Returns the cursor to the unbound state, before the first element.
    fn reset(&mut self);
    /// Returns the element at the current position.
    fn get(&self) -> T;
    /// Returns where the cursor is in its lifecycle.
    fn state(&self) -> CursorState;

    /// Advances `steps` times.
    fn jump_fwd(&mut self, steps: u64) {
        for _ in 0..steps {
            self.advance();
        }
    }
    /// Advances and returns the new element, or returns `None` if there are
    /// no more elements.
    #[inline]
    fn next_sample(&mut self) -> Option<T> {
        if self.has_next() {
            self.advance();
            Some(self.get())
        } else {
            None
        }
    }
}

/// Cursor that can also write the element at its position.
pub trait CursorMut<T: Sample>: Cursor<T> {
    /// Overwrites the element at the current position.
    fn set(&mut self, value: T);
}

// `Either` lets a single access type stand for "the backend's own sampler"
// or "a boundary-extended sampler", depending on the requested interval.
impl<A: Localizable, B: Localizable> Localizable for Either<A, B> {
    #[inline]
    fn position(&self) -> &[i64] {
        match self {
            Either::Left(a) => a.position(),
            Either::Right(b) => b.position(),
        }
    }
}
impl<A: Positionable, B: Positionable> Positionable for Either<A, B> {
    #[inline]
    fn move_axis(&mut self, distance: i64, d: usize) {
        match self {
            Either::Left(a) => a.move_axis(distance, d),
            Either::Right(b) => b.move_axis(distance, d),
        }
    }
    #[inline]
    fn set_position(&mut self, pos: &[i64]) {
        match self {
            Either::Left(a) => a.set_position(pos),
            Either::Right(b) => b.set_position(pos),
        }
    }
}
impl<T: Sample, A: RandomAccess<T>, B: RandomAccess<T>> RandomAccess<T> for Either<A, B> {
    #[inline]
    fn get(&self) -> T {
        match self {
            Either::Left(a) => a.get(),
            Either::Right(b) => b.get(),
        }
    }
}
