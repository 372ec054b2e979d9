//! Error types.
//!
//! Only recoverable conditions are reported through these types. Accessing
//! a position outside a backend's domain without an extension is a
//! programming error and panics instead.

use thiserror::Error;

/// Result type returned by fallible constructors.
pub type ConstructionResult<T> = Result<T, ConstructionError>;

/// Error encountered while constructing an interval, codec, or backend. No
/// partial object is ever returned alongside one of these.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ConstructionError {
    #[error("shape must have at least one dimension")]
    NoDimensions,
    #[error("dimension {axis} has non-positive size {len}")]
    NonPositiveDimension { axis: usize, len: i64 },
    #[error("expected {expected} dimensions but got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("element bit width {0} is outside 1..=64")]
    InvalidBitWidth(u32),
    #[error("codec cannot represent a {} {bits}-bit element", signedness(.signed))]
    IncompatibleCodec { bits: u32, signed: bool },
    #[error("cell size {len} along dimension {axis} is not positive")]
    InvalidCellSize { axis: usize, len: i64 },
    #[error("tree granularity {0} is not a positive power of two")]
    InvalidGranularity(i64),
    #[error("shape is too large to address")]
    TooLarge,
}

fn signedness(signed: &bool) -> &'static str {
    if *signed {
        "signed"
    } else {
        "unsigned"
    }
}

/// Result type returned by fallible sparse-tree writes.
pub type NtreeResult<T> = Result<T, NtreeError>;

/// Error encountered during a sparse-tree write. The tree is left unchanged
/// when one of these is returned.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum NtreeError {
    #[error("write would split a node of side {side} below the minimum granularity {granularity}")]
    GranularityExceeded { side: i64, granularity: i64 },
    #[error("region lies outside the tree domain")]
    OutsideDomain,
}
