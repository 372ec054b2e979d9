//! Sample types.
//!
//! A [`Sample`] is a logical element type that knows how to turn itself into
//! raw bits for a [`BitPacking`](crate::codec::BitPacking) and back. Signed
//! interpretation lives here, not in the codec: signed types sign-extend the
//! raw bits when decoding.

use std::fmt;

mod bits;

pub use bits::{SignedBits, Unsigned12Bit, Unsigned2Bit, Unsigned4Bit, UnsignedBits};

use crate::codec::ElementCodec;

/// Element type that can be stored in a backend.
pub trait Sample: 'static + fmt::Debug + Default + Copy + PartialEq + Send + Sync {
    /// How the element is stored.
    const CODEC: ElementCodec;

    /// Decodes a value from its raw bits. Bits above `CODEC.bits()` are
    /// always zero.
    fn from_raw(raw: u64) -> Self;
    /// Encodes a value as raw bits. Bits above `CODEC.bits()` are ignored.
    fn to_raw(self) -> u64;
}

macro_rules! impl_sample_for_unsigned {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                const CODEC: ElementCodec = ElementCodec::unsigned(<$t>::BITS);

                #[inline]
                fn from_raw(raw: u64) -> Self {
                    raw as $t
                }
                #[inline]
                fn to_raw(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

macro_rules! impl_sample_for_signed {
    ($($t:ty => $unsigned:ty),*) => {
        $(
            impl Sample for $t {
                const CODEC: ElementCodec = ElementCodec::signed(<$t>::BITS);

                #[inline]
                fn from_raw(raw: u64) -> Self {
                    raw as $unsigned as $t
                }
                #[inline]
                fn to_raw(self) -> u64 {
                    self as $unsigned as u64
                }
            }
        )*
    };
}

impl_sample_for_unsigned!(u8, u16, u32, u64);
impl_sample_for_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64);

impl Sample for bool {
    const CODEC: ElementCodec = ElementCodec::unsigned(1);

    #[inline]
    fn from_raw(raw: u64) -> Self {
        raw != 0
    }
    #[inline]
    fn to_raw(self) -> u64 {
        self as u64
    }
}

impl Sample for f32 {
    const CODEC: ElementCodec = ElementCodec::signed(32);

    #[inline]
    fn from_raw(raw: u64) -> Self {
        f32::from_bits(raw as u32)
    }
    #[inline]
    fn to_raw(self) -> u64 {
        self.to_bits() as u64
    }
}

impl Sample for f64 {
    const CODEC: ElementCodec = ElementCodec::signed(64);

    #[inline]
    fn from_raw(raw: u64) -> Self {
        f64::from_bits(raw)
    }
    #[inline]
    fn to_raw(self) -> u64 {
        self.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip<T: Sample>(value: T) -> T {
        let mask = crate::codec::BitPacking::new(T::CODEC.bits()).mask();
        T::from_raw(value.to_raw() & mask)
    }

    #[test]
    fn test_primitive_samples() {
        assert_eq!(200_u8, round_trip(200_u8));
        assert_eq!(-5_i8, round_trip(-5_i8));
        assert_eq!(i16::MIN, round_trip(i16::MIN));
        assert_eq!(-1_i32, round_trip(-1_i32));
        assert_eq!(i64::MIN, round_trip(i64::MIN));
        assert_eq!(u64::MAX, round_trip(u64::MAX));
        assert!(round_trip(true));
        assert_eq!(-0.25_f32, round_trip(-0.25_f32));
        assert_eq!(1e300_f64, round_trip(1e300_f64));

        // Signed raw bits never spill past the element width.
        assert_eq!(0xFF, (-1_i8).to_raw());
        assert_eq!(8, <i8 as Sample>::CODEC.bits());
        assert!(<i8 as Sample>::CODEC.is_signed());
        assert!(!<u16 as Sample>::CODEC.is_signed());
    }
}
