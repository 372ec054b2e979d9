//! Repositionable element handle.

use super::BitPacking;

/// Lightweight handle to one element of a bit-packed word store.
///
/// A `ValueView` does not own or borrow the words; it is just a packing plus
/// a logical element index, passed by value. The sampler that owns it is
/// responsible for handing it the word array the index refers to, so many
/// views may refer to the same store at once.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ValueView {
    packing: BitPacking,
    index: usize,
}

impl ValueView {
    /// Creates a view of element `index`.
    #[inline]
    pub fn new(packing: BitPacking, index: usize) -> Self {
        Self { packing, index }
    }

    /// Returns the element layout.
    #[inline]
    pub fn packing(&self) -> BitPacking {
        self.packing
    }
    /// Returns the logical element index.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves the view to element `index`.
    #[inline]
    pub fn update_index(&mut self, index: usize) {
        self.index = index;
    }
    /// Moves the view by `delta` elements.
    ///
    /// The index may temporarily wrap below zero (for example, one step
    /// before the first element of an unbound cursor) as long as it is
    /// brought back into range before the next read or write.
    #[inline]
    pub fn inc_index(&mut self, delta: i64) {
        self.index = self.index.wrapping_add(delta as usize);
    }

    /// Reads the raw bits of the viewed element from `words`.
    #[inline]
    pub fn get(&self, words: &[u64]) -> u64 {
        self.packing.get(words, self.index)
    }
    /// Writes the raw bits of the viewed element into `words`.
    #[inline]
    pub fn set(&self, words: &mut [u64], raw: u64) {
        self.packing.set(words, self.index, raw)
    }
}
