//! Membership filter backend.
//!
//! A classic Bloom filter sized for one bucket's worth of operations. It
//! cannot count: an estimate is `1.0` when the key may have been recorded in
//! this bucket and `0.0` when it definitely was not. In exchange it needs
//! roughly `-ln(ε) / (ln 2)²` bits per expected key, far less than a sketch.
//!
//! # Examples
//!
//! ```
//! use accesstrack::core::AccessCounter;
//! use accesstrack::counters::BloomCounter;
//!
//! let mut filter = BloomCounter::new(1_000, 0.01).unwrap();
//! filter.increment(7);
//! filter.increment(7);
//! assert_eq!(filter.estimate(7), 1.0);
//!
//! filter.reset();
//! assert_eq!(filter.estimate(7), 0.0);
//! ```

use crate::core::bitvec::BitVec;
use crate::core::counter::AccessCounter;
use crate::core::params;
use crate::error::{AccessTrackError, Result};
use crate::hash::{mix64, EnhancedDoubleHashing};

/// Bloom filter over pre-hashed keys.
#[derive(Debug)]
pub struct BloomCounter {
    bits: BitVec,
    num_hashes: usize,
}

impl BloomCounter {
    /// Size a filter for `expected_items` insertions at `fp_rate`.
    ///
    /// # Errors
    ///
    /// - [`AccessTrackError::InvalidItemCount`] if `expected_items == 0`
    /// - [`AccessTrackError::FalsePositiveRateOutOfBounds`] if `fp_rate` not in (0, 1)
    pub fn new(expected_items: usize, fp_rate: f64) -> Result<Self> {
        let size = params::optimal_bit_count(expected_items, fp_rate)?;
        let num_hashes = params::optimal_hash_count(size, expected_items)?;
        Self::with_params(size, num_hashes)
    }

    /// Build a filter with an explicit bit count and hash count.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero or `num_hashes` is outside
    /// `[MIN_HASH_FUNCTIONS, MAX_HASH_FUNCTIONS]`.
    pub fn with_params(size: usize, num_hashes: usize) -> Result<Self> {
        if !(params::MIN_HASH_FUNCTIONS..=params::MAX_HASH_FUNCTIONS).contains(&num_hashes) {
            return Err(AccessTrackError::invalid_parameters(format!(
                "hash count {} must be in range [{}, {}]",
                num_hashes,
                params::MIN_HASH_FUNCTIONS,
                params::MAX_HASH_FUNCTIONS
            )));
        }

        Ok(Self {
            bits: BitVec::new(size)?,
            num_hashes,
        })
    }

    /// Filter size in bits.
    #[must_use]
    pub fn bit_count(&self) -> usize {
        self.bits.len()
    }

    /// Bits set per key.
    #[must_use]
    pub fn hash_count(&self) -> usize {
        self.num_hashes
    }

    /// Bits currently set.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Whether `hash` may have been recorded since the last reset.
    #[must_use]
    pub fn contains(&self, hash: u64) -> bool {
        EnhancedDoubleHashing::indices(hash, mix64(hash), self.num_hashes, self.bits.len())
            .all(|idx| self.bits.get(idx))
    }
}

impl AccessCounter for BloomCounter {
    fn increment(&mut self, hash: u64) {
        let m = self.bits.len();
        for idx in EnhancedDoubleHashing::indices(hash, mix64(hash), self.num_hashes, m) {
            self.bits.set(idx);
        }
    }

    fn estimate(&self, hash: u64) -> f64 {
        if self.contains(hash) {
            1.0
        } else {
            0.0
        }
    }

    fn reset(&mut self) {
        self.bits.clear();
    }

    fn byte_size(&self) -> usize {
        self.bits.byte_size()
    }
}
