//! Bit-level layout of elements within 64-bit words.

use crate::error::{ConstructionError, ConstructionResult};

/// Number of bits in one backing word.
pub const WORD_BITS: u32 = 64;

/// Precomputed layout for elements of a fixed bit width.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BitPacking {
    bits: u32,
    /// `bits` ones in the least-significant position.
    mask: u64,
}

impl BitPacking {
    /// Creates a packing for elements with `bits` bits each.
    ///
    /// # Panics
    ///
    /// This function panics if `bits` is outside `1..=64`. Use
    /// [`ElementCodec::packing()`](super::ElementCodec::packing) for a
    /// fallible version.
    pub fn new(bits: u32) -> Self {
        assert!(
            (1..=WORD_BITS).contains(&bits),
            "Bit width {} out of range",
            bits,
        );
        // `1 << 64` would overflow, so build the mask from the top instead.
        let mask = u64::MAX >> (WORD_BITS - bits);
        Self { bits, mask }
    }

    /// Returns the number of bits per element.
    #[inline]
    pub fn bits(self) -> u32 {
        self.bits
    }
    /// Returns a mask of `bits` ones.
    #[inline]
    pub fn mask(self) -> u64 {
        self.mask
    }
    /// Returns whether some element can straddle two words.
    #[inline]
    pub fn can_straddle(self) -> bool {
        WORD_BITS % self.bits != 0
    }

    /// Returns the number of words needed to store `len` elements, or `None`
    /// if that does not fit in memory.
    pub fn words_for(self, len: usize) -> Option<usize> {
        let total_bits = (len as u128) * (self.bits as u128);
        let words = (total_bits + WORD_BITS as u128 - 1) / WORD_BITS as u128;
        usize::try_from(words).ok()
    }

    /// Reads the raw bits of the element at `index`.
    #[inline]
    pub fn get(self, words: &[u64], index: usize) -> u64 {
        let bit = index as u64 * self.bits as u64;
        let w = (bit / WORD_BITS as u64) as usize;
        let shift = (bit % WORD_BITS as u64) as u32;
        let lo = words[w] >> shift;
        if shift + self.bits <= WORD_BITS {
            lo & self.mask
        } else {
            // The element straddles a word boundary; its high bits start at
            // bit 0 of the next word. `shift` is nonzero here, so the shift
            // amount below is in `1..64`.
            (lo | words[w + 1] << (WORD_BITS - shift)) & self.mask
        }
    }

    /// Overwrites the element at `index` with the low `bits` bits of `raw`.
    /// No other element is touched.
    #[inline]
    pub fn set(self, words: &mut [u64], index: usize, raw: u64) {
        let raw = raw & self.mask;
        let bit = index as u64 * self.bits as u64;
        let w = (bit / WORD_BITS as u64) as usize;
        let shift = (bit % WORD_BITS as u64) as u32;
        words[w] = (words[w] & !(self.mask << shift)) | (raw << shift);
        if shift + self.bits > WORD_BITS {
            let spill = WORD_BITS - shift;
            let hi_mask = self.mask >> spill;
            words[w + 1] = (words[w + 1] & !hi_mask) | (raw >> spill);
        }
    }
}

/// Primitive backing store: a fixed-length run of bit-packed elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordArray {
    words: Box<[u64]>,
    len: usize,
    packing: BitPacking,
}

impl WordArray {
    /// Allocates storage for `len` elements, all zero.
    pub fn new(packing: BitPacking, len: usize) -> ConstructionResult<Self> {
        let word_count = packing.words_for(len).ok_or(ConstructionError::TooLarge)?;
        Ok(Self {
            words: vec![0; word_count].into_boxed_slice(),
            len,
            packing,
        })
    }

    /// Allocates storage for `len` elements, all set to `raw`.
    pub fn filled(packing: BitPacking, len: usize, raw: u64) -> ConstructionResult<Self> {
        let mut ret = Self::new(packing, len)?;
        if raw & packing.mask() != 0 {
            for i in 0..len {
                packing.set(&mut ret.words, i, raw);
            }
        }
        Ok(ret)
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }
    /// Returns `true` if there are no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    /// Returns the element layout.
    #[inline]
    pub fn packing(&self) -> BitPacking {
        self.packing
    }

    /// Returns the backing words.
    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words
    }
    /// Returns the backing words mutably.
    #[inline]
    pub fn words_mut(&mut self) -> &mut [u64] {
        &mut self.words
    }

    /// Reads the raw bits of the element at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> u64 {
        debug_assert!(index < self.len, "Element index {} out of range", index);
        self.packing.get(&self.words, index)
    }
    /// Writes the raw bits of the element at `index`.
    #[inline]
    pub fn set(&mut self, index: usize, raw: u64) {
        debug_assert!(index < self.len, "Element index {} out of range", index);
        self.packing.set(&mut self.words, index, raw)
    }
}
