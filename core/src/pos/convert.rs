//! Conversions between 32-bit and 64-bit positions.
//!
//! Widening is always lossless. Narrowing is explicit: either checked
//! (`to_ipos()`) or wrapping (`to_ipos_wrapping()`), which keeps only the
//! low 32 bits of each coordinate.

use super::{IPos, LPos, NdPos};
use crate::num::{PosNum, ToPrimitive};

impl IPos {
    /// Converts the position to a 64-bit `LPos`.
    #[inline]
    pub fn to_lpos(&self) -> LPos {
        NdPos(self.iter().map(|&c| c as i64).collect())
    }
}

impl LPos {
    /// Converts the position to a 32-bit `IPos`, or returns `None` if any
    /// coordinate does not fit in an `i32`.
    #[inline]
    pub fn to_ipos(&self) -> Option<IPos> {
        self.iter()
            .map(|c| c.to_i32())
            .collect::<Option<Vec<_>>>()
            .map(NdPos)
    }

    /// Converts the position to a 32-bit `IPos`, truncating any coordinate
    /// whose magnitude exceeds 32 bits.
    #[inline]
    pub fn to_ipos_wrapping(&self) -> IPos {
        NdPos(self.iter().map(|&c| i32::from_i64_wrapping(c)).collect())
    }
}

impl From<&IPos> for LPos {
    fn from(pos: &IPos) -> Self {
        pos.to_lpos()
    }
}

impl<N: PosNum> NdPos<N> {
    /// Converts each coordinate to an `i64`.
    ///
    /// # Panics
    ///
    /// This method panics if a coordinate does not fit in an `i64`, which
    /// cannot happen for `i32` or `i64` coordinates.
    #[inline]
    pub fn to_i64_vec(&self) -> Vec<i64> {
        self.iter()
            .map(|c| c.to_i64().expect("Coordinate does not fit in i64"))
            .collect()
    }
}
