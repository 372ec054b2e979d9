use super::Boundary;
use crate::interval::Interval;
use crate::pos::LPos;
use crate::sampler::{Localizable, Positionable, RandomAccess};
use crate::types::Sample;

/// Sampler that can go anywhere, reading from an inner sampler inside the
/// source domain and following a [`Boundary`] policy outside it.
///
/// The inner sampler is always kept inside the source domain. For remapping
/// policies it sits at the remapped position; for a constant policy it is
/// left where it was last in bounds and resynchronized on re-entry.
#[derive(Debug, Clone)]
pub struct ExtendedRandomAccess<A, T> {
    inner: A,
    boundary: Boundary<T>,
    min: Vec<i64>,
    max: Vec<i64>,
    len: Vec<i64>,
    position: LPos,
    /// Whether each coordinate is outside the source domain.
    outside: Vec<bool>,
    num_outside: usize,
}

impl<T: Sample, A: RandomAccess<T>> ExtendedRandomAccess<A, T> {
    /// Wraps `inner`, a sampler over a source with domain `interval`. The new
    /// sampler starts at the minimum of `interval`.
    pub fn new(mut inner: A, interval: &Interval, boundary: Boundary<T>) -> Self {
        inner.set_position(interval.min());
        let ndim = interval.ndim();
        Self {
            inner,
            boundary,
            min: interval.min().to_vec(),
            max: interval.max().to_vec(),
            len: interval.dims().into_vec(),
            position: interval.min().clone(),
            outside: vec![false; ndim],
            num_outside: 0,
        }
    }

    /// Returns `true` if the sampler is outside the source domain.
    #[inline]
    pub fn is_out_of_bounds(&self) -> bool {
        self.num_outside > 0
    }
    /// Returns the inner sampler.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Reclassifies dimension `d` and returns whether the sampler was out of
    /// bounds before.
    #[inline]
    fn classify(&mut self, d: usize) -> bool {
        let was_out = self.is_out_of_bounds();
        let coord = self.position[d];
        let is_out = coord < self.min[d] || coord > self.max[d];
        if is_out != self.outside[d] {
            self.outside[d] = is_out;
            if is_out {
                self.num_outside += 1;
            } else {
                self.num_outside -= 1;
            }
        }
        was_out
    }

    #[inline]
    fn remap_axis(&self, d: usize) -> i64 {
        self.boundary.remap(self.position[d], self.min[d], self.len[d])
    }
}

impl<A, T> Localizable for ExtendedRandomAccess<A, T> {
    #[inline]
    fn position(&self) -> &[i64] {
        &self.position
    }
}
impl<T: Sample, A: RandomAccess<T>> Positionable for ExtendedRandomAccess<A, T> {
    fn move_axis(&mut self, distance: i64, d: usize) {
        self.position[d] += distance;
        let axis_was_out = self.outside[d];
        let was_out = self.classify(d);
        if self.boundary.is_constant() {
            if self.is_out_of_bounds() {
                // The inner sampler stays wherever it last was in bounds.
            } else if was_out {
                self.inner.set_position(&self.position);
            } else {
                self.inner.move_axis(distance, d);
            }
        } else if self.outside[d] || axis_was_out {
            let coord = self.remap_axis(d);
            self.inner.set_axis(coord, d);
        } else {
            self.inner.move_axis(distance, d);
        }
    }

    fn set_position(&mut self, pos: &[i64]) {
        self.position.set_from(pos);
        for d in 0..pos.len() {
            self.classify(d);
        }
        if !self.is_out_of_bounds() {
            self.inner.set_position(pos);
        } else if !self.boundary.is_constant() {
            let remapped: Vec<i64> = (0..pos.len()).map(|d| self.remap_axis(d)).collect();
            self.inner.set_position(&remapped);
        }
    }
}
impl<T: Sample, A: RandomAccess<T>> RandomAccess<T> for ExtendedRandomAccess<A, T> {
    #[inline]
    fn get(&self) -> T {
        match self.boundary {
            Boundary::Constant(value) if self.is_out_of_bounds() => value,
            _ => self.inner.get(),
        }
    }
}
