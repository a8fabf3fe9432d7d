//! Fixed-size bit vector backing the membership filter.
//!
//! Bits are packed into 64-bit words in little-endian bit order:
//!
//! ```text
//! Word 0: [bit 0][bit 1]...[bit 63]
//! Word 1: [bit 64][bit 65]...[bit 127]
//! ```
//!
//! Every bucket owns its own filter and is only touched under that bucket's
//! lock, so the words are plain `u64`s and mutation goes through `&mut self`.
//!
//! # Examples
//!
//! ```
//! use accesstrack::core::bitvec::BitVec;
//!
//! let mut bv = BitVec::new(100).unwrap();
//! bv.set(42);
//! assert!(bv.get(42));
//! assert!(!bv.get(43));
//! assert_eq!(bv.count_ones(), 1);
//!
//! bv.clear();
//! assert_eq!(bv.count_ones(), 0);
//! ```

use crate::error::{AccessTrackError, Result};

/// Fixed-size bit array.
#[derive(Debug)]
pub struct BitVec {
    blocks: Box<[u64]>,
    len: usize,
}

impl BitVec {
    /// Create a bit vector of `num_bits` zeroed bits.
    ///
    /// # Errors
    ///
    /// Returns [`AccessTrackError::InvalidFilterSize`] if `num_bits` is 0.
    pub fn new(num_bits: usize) -> Result<Self> {
        if num_bits == 0 {
            return Err(AccessTrackError::invalid_filter_size(num_bits));
        }

        let num_blocks = num_bits.div_ceil(64);
        Ok(Self {
            blocks: vec![0u64; num_blocks].into_boxed_slice(),
            len: num_bits,
        })
    }

    /// Number of bits in the vector.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always `false` for a successfully constructed vector.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set the bit at `index` to 1.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    pub fn set(&mut self, index: usize) {
        assert!(
            index < self.len,
            "BitVec index out of bounds: index={} len={}",
            index,
            self.len
        );
        self.blocks[index / 64] |= 1u64 << (index % 64);
    }

    /// Read the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[must_use]
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        assert!(
            index < self.len,
            "BitVec index out of bounds: index={} len={}",
            index,
            self.len
        );
        (self.blocks[index / 64] & (1u64 << (index % 64))) != 0
    }

    /// Reset every bit to 0. The allocation is kept.
    pub fn clear(&mut self) {
        self.blocks.fill(0);
    }

    /// Number of bits set to 1.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.blocks.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Bytes held by the word storage.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.blocks.len() * std::mem::size_of::<u64>()
    }

    /// Number of 64-bit words.
    #[must_use]
    #[inline]
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }
}
