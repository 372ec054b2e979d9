//! Backend with a name and labelled, calibrated dimensions.

use crate::axis::{default_axes, AxisType, CalibratedAxis};
use crate::error::{ConstructionError, ConstructionResult};
use crate::img::{
    Bounded, IterableInterval, IterableIntervalMut, RandomAccessible, RandomAccessibleMut,
};
use crate::interval::Interval;
use crate::types::Sample;

/// Name used when none is given.
pub const DEFAULT_NAME: &str = "Untitled";

/// Wrapper adding metadata to a backend. All sample access goes straight to
/// the wrapped backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ImgPlus<I> {
    img: I,
    name: String,
    axes: Vec<CalibratedAxis>,
}

impl<I: Bounded> ImgPlus<I> {
    /// Wraps `img` with the default name and axes.
    pub fn new(img: I) -> Self {
        let axes = default_axes(img.ndim())
            .into_iter()
            .map(CalibratedAxis::from)
            .collect();
        Self {
            img,
            name: DEFAULT_NAME.to_owned(),
            axes,
        }
    }
    /// Wraps `img` with a name and one axis label per dimension.
    pub fn with_axes(img: I, name: impl Into<String>, axes: &[AxisType]) -> ConstructionResult<Self> {
        if axes.len() != img.ndim() {
            return Err(ConstructionError::DimensionMismatch {
                expected: img.ndim(),
                got: axes.len(),
            });
        }
        Ok(Self {
            img,
            name: name.into(),
            axes: axes.iter().map(|&ax| ax.into()).collect(),
        })
    }

    /// Returns the wrapped backend.
    pub fn img(&self) -> &I {
        &self.img
    }
    /// Returns the wrapped backend mutably.
    pub fn img_mut(&mut self) -> &mut I {
        &mut self.img
    }
    /// Unwraps the backend, discarding the metadata.
    pub fn into_inner(self) -> I {
        self.img
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Sets the name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the label and scale of dimension `d`.
    pub fn axis(&self, d: usize) -> &CalibratedAxis {
        &self.axes[d]
    }
    /// Returns the labels and scales of all dimensions.
    pub fn axes(&self) -> &[CalibratedAxis] {
        &self.axes
    }
    /// Returns the first dimension labelled `axis_type`, if any.
    pub fn axis_index(&self, axis_type: AxisType) -> Option<usize> {
        self.axes.iter().position(|ax| ax.axis_type == axis_type)
    }
    /// Relabels dimension `d`.
    pub fn set_axis(&mut self, axis_type: AxisType, d: usize) {
        self.axes[d].axis_type = axis_type;
    }

    /// Returns the physical size of one step along dimension `d`.
    pub fn calibration(&self, d: usize) -> f64 {
        self.axes[d].scale
    }
    /// Sets the physical size of one step along dimension `d`.
    pub fn set_calibration(&mut self, scale: f64, d: usize) {
        self.axes[d].scale = scale;
    }
}

impl<I: Bounded> Bounded for ImgPlus<I> {
    #[inline]
    fn interval(&self) -> &Interval {
        self.img.interval()
    }
}

impl<T: Sample, I: RandomAccessible<T>> RandomAccessible<T> for ImgPlus<I> {
    type Access<'a> = I::Access<'a>
    where
        Self: 'a;

    fn random_access(&self) -> Self::Access<'_> {
        self.img.random_access()
    }
    fn random_access_in(&self, interval: &Interval) -> Self::Access<'_> {
        self.img.random_access_in(interval)
    }
}
impl<T: Sample, I: RandomAccessibleMut<T>> RandomAccessibleMut<T> for ImgPlus<I> {
    type AccessMut<'a> = I::AccessMut<'a>
    where
        Self: 'a;

    fn random_access_mut(&mut self) -> Self::AccessMut<'_> {
        self.img.random_access_mut()
    }
}
impl<T: Sample, I: IterableInterval<T>> IterableInterval<T> for ImgPlus<I> {
    type Cursor<'a> = I::Cursor<'a>
    where
        Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        self.img.cursor()
    }
}
impl<T: Sample, I: IterableIntervalMut<T>> IterableIntervalMut<T> for ImgPlus<I> {
    type CursorMut<'a> = I::CursorMut<'a>
    where
        Self: 'a;

    fn cursor_mut(&mut self) -> Self::CursorMut<'_> {
        self.img.cursor_mut()
    }
}
