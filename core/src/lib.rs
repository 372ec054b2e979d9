//! N-dimensional sampled-domain storage.
//!
//! Samples live in a backend ([`img`]) over a finite [`interval`] and are
//! read and written through samplers ([`sampler`]). Backends store samples
//! bit-packed ([`codec`]), so element types narrower than a byte take only
//! as many bits as they need. Reads past the edge of a backend go through
//! [`outofbounds`].

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(clippy::correctness)]

#[macro_use]
mod macros;
pub mod axis;
pub mod codec;
pub mod config;
pub mod error;
pub mod img;
pub mod imgplus;
pub mod index;
pub mod interval;
pub mod math;
pub mod num;
pub mod ops;
pub mod outofbounds;
pub mod pos;
pub mod sampler;
pub mod types;

pub mod traits {
    //! Traits needed to call methods on backends and samplers.

    pub use crate::img::{
        Bounded, Img, IterableInterval, IterableIntervalMut, RandomAccessible,
        RandomAccessibleMut,
    };
    pub use crate::num::PosNum;
    pub use crate::sampler::{
        Cursor, CursorMut, Localizable, Positionable, RandomAccess, RandomAccessMut,
    };
    pub use crate::types::Sample;
}

pub mod prelude {
    //! Commonly used types and traits.

    pub use crate::traits::*;

    pub use crate::axis::{AxisType, CalibratedAxis};
    pub use crate::config::{CellSize, StorageConfig};
    pub use crate::error::{ConstructionError, ConstructionResult, NtreeError, NtreeResult};
    pub use crate::img::{
        AnyImg, ArrayImg, CellImg, ConstantImg, ImgFactory, NtreeImg, PlanarImg, StorageKind,
    };
    pub use crate::imgplus::ImgPlus;
    pub use crate::interval::Interval;
    pub use crate::outofbounds::{extend, Boundary, ExtendedImg};
    pub use crate::pos::{IPos, LPos, NdPos};
    pub use crate::sampler::{CursorState, IntervalCursor, PlaneCursor};
    pub use crate::types::{Unsigned12Bit, Unsigned2Bit, Unsigned4Bit};
}
