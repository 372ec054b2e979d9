//! Bulk transfers between element streams and backends.
//!
//! All of these walk their interval in raster order (dimension 0 fastest),
//! which is also the order of the raw element streams they produce and
//! consume.

use log::trace;

use crate::img::{IterableInterval, IterableIntervalMut, RandomAccessible, RandomAccessibleMut};
use crate::interval::Interval;
use crate::sampler::{Cursor, CursorMut, IntervalCursor};
use crate::types::Sample;

/// Writes elements from `values` into `img` in raster order and returns how
/// many were written.
///
/// Stops at whichever runs out first, the iterator or the domain.
pub fn fill_from<T: Sample, I: ?Sized + IterableIntervalMut<T>>(
    img: &mut I,
    values: impl IntoIterator<Item = T>,
) -> usize {
    let mut cursor = img.cursor_mut();
    let mut written = 0;
    for value in values {
        if !cursor.has_next() {
            break;
        }
        cursor.advance();
        cursor.set(value);
        written += 1;
    }
    trace!("Filled {} elements from stream", written);
    written
}

/// Returns every element of `img` in raster order.
pub fn to_vec<T: Sample, I: ?Sized + IterableInterval<T>>(img: &I) -> Vec<T> {
    let mut cursor = img.cursor();
    let mut ret = Vec::with_capacity(img.size() as usize);
    while let Some(value) = cursor.next_sample() {
        ret.push(value);
    }
    ret
}

/// Returns every element of `img` in `interval` in raster order.
///
/// `img` must be able to reach every position in `interval`.
pub fn to_vec_in<T: Sample, I: ?Sized + RandomAccessible<T>>(img: &I, interval: &Interval) -> Vec<T> {
    let mut cursor = img.cursor_in(interval);
    let mut ret = Vec::with_capacity(interval.count() as usize);
    while let Some(value) = Cursor::<T>::next_sample(&mut cursor) {
        ret.push(value);
    }
    ret
}

/// Copies every element in `interval` from `src` to the same position in
/// `dst`.
///
/// Both must be able to reach every position in `interval`.
pub fn copy_into<T, S, D>(src: &S, dst: &mut D, interval: &Interval)
where
    T: Sample,
    S: ?Sized + RandomAccessible<T>,
    D: ?Sized + RandomAccessibleMut<T>,
{
    let mut from = src.cursor_in(interval);
    let mut to = IntervalCursor::new(dst.random_access_mut(), interval.clone());
    while let Some(value) = Cursor::<T>::next_sample(&mut from) {
        Cursor::<T>::advance(&mut to);
        CursorMut::<T>::set(&mut to, value);
    }
}
