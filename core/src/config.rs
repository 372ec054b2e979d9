//! Backend construction settings.

use crate::error::{ConstructionError, ConstructionResult};

/// Base-2 logarithm of the maximum number of elements in an automatically
/// sized cell.
pub const AUTO_CELL_ELEMENTS_LOG2: u32 = 16;

/// How a chunked backend divides its domain into cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellSize {
    /// Power-of-two side `2^(16 / n)` along every dimension, so that a cell
    /// holds at most 65 536 elements. Past 16 dimensions, the first 16 get
    /// side 2 and the rest side 1.
    Auto,
    /// The same side along every dimension.
    Uniform(i64),
    /// An explicit side along each dimension.
    PerAxis(Vec<i64>),
}
impl Default for CellSize {
    fn default() -> Self {
        Self::Auto
    }
}
impl CellSize {
    /// Returns the cell side along each of `ndim` dimensions.
    pub fn resolve(&self, ndim: usize) -> ConstructionResult<Vec<i64>> {
        let sides = match self {
            Self::Auto => {
                let log2 = AUTO_CELL_ELEMENTS_LOG2 / ndim.max(1) as u32;
                if log2 == 0 {
                    let wide = AUTO_CELL_ELEMENTS_LOG2 as usize;
                    (0..ndim).map(|d| if d < wide { 2 } else { 1 }).collect()
                } else {
                    vec![1_i64 << log2; ndim]
                }
            }
            Self::Uniform(side) => vec![*side; ndim],
            Self::PerAxis(sides) => {
                if sides.len() != ndim {
                    return Err(ConstructionError::DimensionMismatch {
                        expected: ndim,
                        got: sides.len(),
                    });
                }
                sides.clone()
            }
        };
        if let Some((axis, &len)) = sides.iter().enumerate().find(|(_, &len)| len <= 0) {
            return Err(ConstructionError::InvalidCellSize { axis, len });
        }
        Ok(sides)
    }
}

/// Settings used when constructing backends at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Cell layout for chunked backends.
    pub cell_size: CellSize,
    /// Smallest node side a sparse tree may split down to. Must be a power
    /// of two; `1` allows writes to individual elements.
    pub ntree_granularity: i64,
}
impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cell_size: CellSize::Auto,
            ntree_granularity: 1,
        }
    }
}
