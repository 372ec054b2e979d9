//! Backend reporting one value everywhere.

use super::{Bounded, IterableInterval, RandomAccessible};
use crate::error::ConstructionResult;
use crate::interval::Interval;
use crate::pos::LPos;
use crate::sampler::{IntervalCursor, Localizable, Positionable, RandomAccess};
use crate::types::Sample;

/// Read-only interval where every sample has the same value.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantImg<T: Sample> {
    interval: Interval,
    value: T,
}

impl<T: Sample> ConstantImg<T> {
    /// Creates a constant image with the given size.
    pub fn new(dims: &[i64], value: T) -> ConstructionResult<Self> {
        Ok(Self::with_interval(Interval::from_dims(dims)?, value))
    }
    /// Creates a constant image over an arbitrary interval.
    pub fn with_interval(interval: Interval, value: T) -> Self {
        Self { interval, value }
    }

    /// Returns the value.
    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: Sample> Bounded for ConstantImg<T> {
    #[inline]
    fn interval(&self) -> &Interval {
        &self.interval
    }
}

impl<T: Sample> RandomAccessible<T> for ConstantImg<T> {
    type Access<'a> = ConstantAccess<T>;

    fn random_access(&self) -> Self::Access<'_> {
        ConstantAccess {
            position: self.interval.min().clone(),
            value: self.value,
        }
    }
}
impl<T: Sample> IterableInterval<T> for ConstantImg<T> {
    type Cursor<'a> = IntervalCursor<ConstantAccess<T>>;

    fn cursor(&self) -> Self::Cursor<'_> {
        IntervalCursor::new(self.random_access(), self.interval.clone())
    }
}

/// Sampler over a [`ConstantImg`]. It tracks its position but reads the same
/// value everywhere, even outside the domain.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantAccess<T> {
    position: LPos,
    value: T,
}

impl<T> Localizable for ConstantAccess<T> {
    #[inline]
    fn position(&self) -> &[i64] {
        &self.position
    }
}
impl<T> Positionable for ConstantAccess<T> {
    #[inline]
    fn move_axis(&mut self, distance: i64, d: usize) {
        self.position[d] += distance;
    }
    #[inline]
    fn set_position(&mut self, pos: &[i64]) {
        self.position.set_from(pos);
    }
}
impl<T: Sample> RandomAccess<T> for ConstantAccess<T> {
    #[inline]
    fn get(&self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{Cursor, CursorState};

    #[test]
    fn test_constant_img() {
        let img = ConstantImg::new(&[2, 3], 1.5_f32).unwrap();
        let mut access = img.random_access();
        access.move_by(&[1, 2]);
        assert_eq!(1.5, access.get());

        // Copies keep their position and move independently.
        let mut copy = access.clone();
        assert_eq!(access.position(), copy.position());
        copy.fwd(0);
        assert_eq!(&[1, 2], access.position());
        assert_eq!(&[2, 2], copy.position());

        let mut cursor = img.cursor();
        assert_eq!(CursorState::Unbound, cursor.state());
        let mut count = 0;
        while let Some(value) = cursor.next_sample() {
            assert_eq!(1.5, value);
            count += 1;
        }
        assert_eq!(6, count);
        assert_eq!(&[1, 2], cursor.position());
    }
}
