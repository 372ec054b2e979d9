//! Integer samples of arbitrary bit width.

use std::fmt;

use super::Sample;
use crate::codec::ElementCodec;

/// Unsigned integer sample stored in exactly `B` bits.
///
/// Values are cropped to the low `B` bits when constructed.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnsignedBits<const B: u32>(u64);

/// 2-bit unsigned sample (`0..=3`).
pub type Unsigned2Bit = UnsignedBits<2>;
/// 4-bit unsigned sample (`0..=15`).
pub type Unsigned4Bit = UnsignedBits<4>;
/// 12-bit unsigned sample (`0..=4095`), common for camera data.
pub type Unsigned12Bit = UnsignedBits<12>;

impl<const B: u32> UnsignedBits<B> {
    /// Largest representable value.
    pub const MAX: u64 = if B >= 64 { u64::MAX } else { (1 << B) - 1 };

    /// Creates a sample, keeping only the low `B` bits of `value`.
    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value & Self::MAX)
    }
    /// Returns the value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl<const B: u32> fmt::Debug for UnsignedBits<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}({})", B, self.0)
    }
}

impl<const B: u32> Sample for UnsignedBits<B> {
    const CODEC: ElementCodec = ElementCodec::unsigned(B);

    #[inline]
    fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
    #[inline]
    fn to_raw(self) -> u64 {
        self.0
    }
}

/// Signed (two's complement) integer sample stored in exactly `B` bits.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignedBits<const B: u32>(i64);

impl<const B: u32> SignedBits<B> {
    /// Smallest representable value.
    pub const MIN: i64 = if B >= 64 || B == 0 { i64::MIN } else { -(1 << (B - 1)) };
    /// Largest representable value.
    pub const MAX: i64 = if B >= 64 || B == 0 { i64::MAX } else { (1 << (B - 1)) - 1 };

    /// Creates a sample, keeping only the low `B` bits of `value`
    /// (wrapping around like a primitive integer cast would).
    #[inline]
    pub fn new(value: i64) -> Self {
        Self::from_raw(value as u64 & mask(B))
    }
    /// Returns the value.
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl<const B: u32> fmt::Debug for SignedBits<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i{}({})", B, self.0)
    }
}

impl<const B: u32> Sample for SignedBits<B> {
    const CODEC: ElementCodec = ElementCodec::signed(B);

    #[inline]
    fn from_raw(raw: u64) -> Self {
        // Move the sign bit to the top, then shift back arithmetically.
        let unused = 64 - B.clamp(1, 64);
        Self(((raw << unused) as i64) >> unused)
    }
    #[inline]
    fn to_raw(self) -> u64 {
        self.0 as u64 & mask(B)
    }
}

fn mask(bits: u32) -> u64 {
    u64::MAX >> (64 - bits.clamp(1, 64))
}
