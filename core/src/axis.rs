//! Meaning of image dimensions.
//!
//! Backends only know dimensions by number; these types label them for
//! [`crate::imgplus::ImgPlus`].

use std::fmt;

/// What a dimension measures.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AxisType {
    /// X axis (generally horizontal/"width").
    X,
    /// Y axis (generally vertical/"height").
    Y,
    /// Z axis (generally normal/"depth").
    Z,
    /// Color or spectral channel.
    Channel,
    /// Time.
    Time,
    /// Anything else.
    Unknown,
}

impl Default for AxisType {
    fn default() -> Self {
        Self::Unknown
    }
}

impl fmt::Display for AxisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl AxisType {
    /// Returns the name of the axis.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            AxisType::X => "X",
            AxisType::Y => "Y",
            AxisType::Z => "Z",
            AxisType::Channel => "Channel",
            AxisType::Time => "Time",
            AxisType::Unknown => "Unknown",
        }
    }

    /// Returns `true` for X, Y and Z.
    #[inline]
    pub const fn is_spatial(self) -> bool {
        matches!(self, AxisType::X | AxisType::Y | AxisType::Z)
    }
}

/// Spatial axes in order.
pub const SPATIAL_AXES: &[AxisType] = &[AxisType::X, AxisType::Y, AxisType::Z];

/// Returns the default labels for `ndim` dimensions: X, Y and Z first, then
/// [`AxisType::Unknown`].
pub fn default_axes(ndim: usize) -> Vec<AxisType> {
    (0..ndim)
        .map(|d| SPATIAL_AXES.get(d).copied().unwrap_or_default())
        .collect()
}

/// Labels and scale of one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibratedAxis {
    /// What the dimension measures.
    pub axis_type: AxisType,
    /// Physical size of one sample step.
    pub scale: f64,
    /// Unit of `scale`, if any.
    pub unit: Option<String>,
}

impl From<AxisType> for CalibratedAxis {
    fn from(axis_type: AxisType) -> Self {
        Self {
            axis_type,
            scale: 1.0,
            unit: None,
        }
    }
}

impl CalibratedAxis {
    /// Returns the physical coordinate of sample coordinate `pos`.
    #[inline]
    pub fn calibrated(&self, pos: i64) -> f64 {
        pos as f64 * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_axes() {
        assert_eq!(vec![AxisType::X, AxisType::Y], default_axes(2));
        assert_eq!(
            vec![AxisType::X, AxisType::Y, AxisType::Z, AxisType::Unknown],
            default_axes(4)
        );
        assert!(AxisType::Z.is_spatial());
        assert!(!AxisType::Channel.is_spatial());
        assert_eq!("Time", AxisType::Time.to_string());
    }
}
