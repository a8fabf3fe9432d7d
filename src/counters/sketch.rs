//! Count-min sketch backend.
//!
//! A `depth × width` table of saturating counters. Recording a key bumps one
//! counter per row; estimating takes the minimum over those counters. Hash
//! collisions can only add to a counter, so the estimate never falls below
//! the true count (until a counter saturates at `C::MAX`).
//!
//! With `width = ⌊2/e⌋` and `depth = ⌈|log₂(1-δ)|⌉`, an estimate exceeds the
//! true count by more than `e × N` (where `N` is the number of increments
//! since the last reset) with probability at most `1 - δ`.
//!
//! # Examples
//!
//! ```
//! use accesstrack::core::AccessCounter;
//! use accesstrack::counters::CountMinSketch;
//!
//! let mut sketch = CountMinSketch::<u16>::new(0.001, 0.99, 0, 0).unwrap();
//! assert_eq!((sketch.width(), sketch.depth()), (2000, 7));
//!
//! for _ in 0..5 {
//!     sketch.increment(0xfeed);
//! }
//! assert!(sketch.estimate(0xfeed) >= 5.0);
//! assert_eq!(sketch.byte_size(), 2000 * 7 * 2);
//! ```

#![allow(clippy::cast_possible_truncation)]

use crate::core::counter::{AccessCounter, SketchCounter};
use crate::core::params;
use crate::error::{AccessTrackError, Result};
use crate::hash::mix64;

/// Per-row offset (2⁶⁴ / φ) so neighbouring hashes don't share row columns.
const ROW_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Count-min sketch with `C`-wide saturating cells.
#[derive(Debug)]
pub struct CountMinSketch<C: SketchCounter = u32> {
    /// Row-major: row `r` occupies `table[r * width .. (r + 1) * width]`.
    table: Box<[C]>,
    width: usize,
    depth: usize,
}

impl<C: SketchCounter> CountMinSketch<C> {
    /// Build a sketch from an error margin and a certainty.
    ///
    /// `max_width` / `max_depth` cap the derived dimensions; `0` leaves a
    /// dimension uncapped.
    ///
    /// # Errors
    ///
    /// - [`AccessTrackError::InvalidErrorMargin`] if `error_margin` is not positive and finite
    /// - [`AccessTrackError::CertaintyOutOfBounds`] if `certainty` not in (0, 1)
    /// - [`AccessTrackError::InvalidSketchDimensions`] if a dimension resolves to zero
    pub fn new(error_margin: f64, certainty: f64, max_width: usize, max_depth: usize) -> Result<Self> {
        let width = params::sketch_width(error_margin, max_width)?;
        let depth = params::sketch_depth(certainty, max_depth)?;
        Self::with_dimensions(width, depth)
    }

    /// Build a sketch with explicit dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`AccessTrackError::InvalidSketchDimensions`] if either
    /// dimension is zero or the table size overflows.
    pub fn with_dimensions(width: usize, depth: usize) -> Result<Self> {
        let cells = width
            .checked_mul(depth)
            .filter(|&cells| cells > 0)
            .ok_or_else(|| AccessTrackError::invalid_sketch_dimensions(width, depth))?;

        Ok(Self {
            table: vec![C::ZERO; cells].into_boxed_slice(),
            width,
            depth,
        })
    }

    /// Counters per row.
    #[must_use]
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Raw minimum counter for `hash`.
    #[must_use]
    pub fn count(&self, hash: u64) -> C {
        (0..self.depth)
            .map(|row| self.table[self.cell(row, hash)])
            .min()
            .unwrap_or(C::ZERO)
    }

    #[inline]
    fn cell(&self, row: usize, hash: u64) -> usize {
        let salted = hash.wrapping_add((row as u64).wrapping_mul(ROW_SALT));
        let column = (mix64(salted) % self.width as u64) as usize;
        row * self.width + column
    }
}

impl<C: SketchCounter> AccessCounter for CountMinSketch<C> {
    fn increment(&mut self, hash: u64) {
        for row in 0..self.depth {
            let idx = self.cell(row, hash);
            self.table[idx] = self.table[idx].saturating_inc();
        }
    }

    fn estimate(&self, hash: u64) -> f64 {
        self.count(hash).to_f64()
    }

    fn reset(&mut self) {
        self.table.fill(C::ZERO);
    }

    fn byte_size(&self) -> usize {
        self.table.len() * std::mem::size_of::<C>()
    }
}
