//! Bit-packed element encoding over a store of 64-bit words.
//!
//! Every backend in this crate keeps its samples in [`WordArray`]s. A
//! [`BitPacking`] describes how many bits each element takes, and a
//! [`ValueView`] is a repositionable (packing, index) pair that reads and
//! writes one element of whichever word array a sampler hands it.
//!
//! The element at logical index `i` occupies bits `[i * b, i * b + b)` of
//! the word stream, least-significant bit first. When `64 % b != 0` an
//! element may straddle two words.
//!
//! Whether the bits are interpreted as signed or unsigned is up to the
//! [`Sample`](crate::types::Sample) type layered on top; the codec only
//! moves raw bits.

mod packing;
mod view;

pub use packing::{BitPacking, WordArray, WORD_BITS};
pub use view::ValueView;

use crate::error::{ConstructionError, ConstructionResult};

/// Descriptor of how a sample type is stored: its bit width and whether it
/// is interpreted as signed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ElementCodec {
    bits: u32,
    signed: bool,
}

impl ElementCodec {
    /// Creates a codec for unsigned elements with the given bit width.
    pub const fn unsigned(bits: u32) -> Self {
        Self {
            bits,
            signed: false,
        }
    }
    /// Creates a codec for signed (two's complement) elements with the given
    /// bit width.
    pub const fn signed(bits: u32) -> Self {
        Self { bits, signed: true }
    }

    /// Returns the number of bits per element.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.bits
    }
    /// Returns whether elements are interpreted as signed.
    #[inline]
    pub const fn is_signed(self) -> bool {
        self.signed
    }

    /// Checks that the codec can actually be represented.
    pub fn validate(self) -> ConstructionResult<Self> {
        if !(1..=64).contains(&self.bits) {
            return Err(ConstructionError::InvalidBitWidth(self.bits));
        }
        // A signed 1-bit value has no room for a magnitude.
        if self.signed && self.bits < 2 {
            return Err(ConstructionError::IncompatibleCodec {
                bits: self.bits,
                signed: self.signed,
            });
        }
        Ok(self)
    }

    /// Returns the bit packing for this codec.
    pub fn packing(self) -> ConstructionResult<BitPacking> {
        self.validate()?;
        Ok(BitPacking::new(self.bits))
    }
}
