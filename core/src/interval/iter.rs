//! Iterator over positions in an `Interval`.

use super::*;

impl IntoIterator for &Interval {
    type Item = LPos;
    type IntoIter = Iter;

    /// Returns an iterator over all the positions in the interval.
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.into()
    }
}

/// Iterator over positions in an interval, in raster order.
#[derive(Debug, Clone)]
pub struct Iter {
    start: LPos,
    end: LPos,
    next: Option<LPos>,
}
impl From<&Interval> for Iter {
    #[inline]
    fn from(interval: &Interval) -> Self {
        let start = interval.min().clone();
        let end = interval.max().clone();
        let next = Some(start.clone());
        Self { start, end, next }
    }
}
impl Iterator for Iter {
    type Item = LPos;

    #[inline]
    fn next(&mut self) -> Option<LPos> {
        let current = self.next.take()?;
        let mut next = current.clone();
        // Odometer step with axis 0 fastest. Carrying out of the last axis
        // ends the iteration.
        let carried_out = (0..next.ndim()).all(|d| {
            if next[d] < self.end[d] {
                next[d] += 1;
                false
            } else {
                next[d] = self.start[d];
                true
            }
        });
        if !carried_out {
            self.next = Some(next);
        }
        Some(current)
    }
}
impl Iter {
    /// Returns the first position returned by the iterator.
    #[inline]
    pub fn start(&self) -> &LPos {
        &self.start
    }

    /// Returns the last position returned by the iterator.
    #[inline]
    pub fn end(&self) -> &LPos {
        &self.end
    }
}
