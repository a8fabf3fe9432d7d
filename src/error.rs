//! Error types for access tracker construction.
//!
//! Every runtime operation on a tracker is infallible: probabilistic backends
//! always produce an estimate, possibly zero. Errors only arise while turning a
//! configuration into buckets and backends, so this module is mostly about
//! explaining *which* precondition a configuration broke.
//!
//! # Error Propagation
//!
//! ```
//! use accesstrack::{AccessTrackError, Result};
//! use accesstrack::core::params::{optimal_bit_count, optimal_hash_count};
//!
//! fn filter_shape(n: usize, fp: f64) -> Result<(usize, usize)> {
//!     let m = optimal_bit_count(n, fp)?;
//!     let k = optimal_hash_count(m, n)?;
//!     Ok((m, k))
//! }
//! # assert!(filter_shape(1000, 0.01).is_ok());
//! # assert!(filter_shape(0, 0.01).is_err());
//! ```

#![allow(clippy::module_name_repetitions)]

use std::fmt;

/// Result type alias for accesstrack operations.
///
/// # Examples
/// ```
/// use accesstrack::{AccessTrackError, Result};
///
/// fn check_buckets(n: usize) -> Result<()> {
///     if n == 0 {
///         return Err(AccessTrackError::invalid_bucket_count(n));
///     }
///     Ok(())
/// }
/// # assert!(check_buckets(4).is_ok());
/// ```
pub type Result<T> = std::result::Result<T, AccessTrackError>;

/// Errors that can occur while building an access tracker or its backends.
///
/// `Clone` + `PartialEq` keep errors comparable in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessTrackError {
    /// Parameters that do not fit any more specific variant.
    InvalidParameters {
        /// Human-readable description of what's invalid.
        message: String,
    },

    /// The ring must have at least one bucket.
    InvalidBucketCount {
        /// The bucket count that was provided.
        count: usize,
    },

    /// Each bucket must span at least one tick.
    InvalidTickSpan {
        /// The tick span that was provided.
        ticks: u64,
    },

    /// Expected operations per bucket must be positive.
    ///
    /// Both backends are sized from this value; zero would make the sketch
    /// error margin infinite and the filter zero bits wide.
    InvalidItemCount {
        /// The invalid count that was provided.
        count: usize,
    },

    /// Sketch error margin must be a finite value greater than zero.
    ///
    /// The margin is `cms_max_error_value / max_num_ops_per_bucket`.
    InvalidErrorMargin {
        /// The computed margin.
        margin: f64,
    },

    /// Sketch certainty must be in range (0, 1).
    CertaintyOutOfBounds {
        /// The invalid certainty.
        certainty: f64,
    },

    /// Filter false positive rate must be in range (0, 1).
    FalsePositiveRateOutOfBounds {
        /// The invalid false positive rate that was provided.
        fp_rate: f64,
    },

    /// Sketch would end up with a zero-sized dimension.
    InvalidSketchDimensions {
        /// Resolved number of counters per row.
        width: usize,
        /// Resolved number of rows.
        depth: usize,
    },

    /// Filter bit array size is invalid.
    InvalidFilterSize {
        /// The invalid size in bits.
        size: usize,
    },
}

impl fmt::Display for AccessTrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameters { message } => {
                write!(f, "Invalid access tracker parameters: {}.", message)
            }
            Self::InvalidBucketCount { count } => {
                write!(
                    f,
                    "Invalid bucket count: {}. The ring needs at least one bucket.",
                    count
                )
            }
            Self::InvalidTickSpan { ticks } => {
                write!(
                    f,
                    "Invalid tick span: {}. Each bucket must span at least one tick.",
                    ticks
                )
            }
            Self::InvalidItemCount { count } => {
                write!(
                    f,
                    "Invalid item count: {}. Expected operations per bucket must be greater than 0.",
                    count
                )
            }
            Self::InvalidErrorMargin { margin } => {
                write!(
                    f,
                    "Sketch error margin {} is invalid. Must be finite and greater than 0.",
                    margin
                )
            }
            Self::CertaintyOutOfBounds { certainty } => {
                write!(
                    f,
                    "Sketch certainty {} is out of bounds. Must be in range (0, 1).",
                    certainty
                )
            }
            Self::FalsePositiveRateOutOfBounds { fp_rate } => {
                write!(
                    f,
                    "False positive rate {} is out of bounds. Must be in range (0, 1).",
                    fp_rate
                )
            }
            Self::InvalidSketchDimensions { width, depth } => {
                write!(
                    f,
                    "Invalid sketch dimensions: width {} x depth {}. Both must be positive.",
                    width, depth
                )
            }
            Self::InvalidFilterSize { size } => {
                write!(
                    f,
                    "Invalid filter size: {} bits. Must be positive and within memory limits.",
                    size
                )
            }
        }
    }
}

impl std::error::Error for AccessTrackError {}

impl AccessTrackError {
    /// Create an `InvalidParameters` error with a formatted message.
    #[must_use]
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }

    /// Create an `InvalidBucketCount` error.
    #[must_use]
    pub fn invalid_bucket_count(count: usize) -> Self {
        Self::InvalidBucketCount { count }
    }

    /// Create an `InvalidTickSpan` error.
    #[must_use]
    pub fn invalid_tick_span(ticks: u64) -> Self {
        Self::InvalidTickSpan { ticks }
    }

    /// Create an `InvalidItemCount` error.
    #[must_use]
    pub fn invalid_item_count(count: usize) -> Self {
        Self::InvalidItemCount { count }
    }

    /// Create an `InvalidErrorMargin` error.
    #[must_use]
    pub fn invalid_error_margin(margin: f64) -> Self {
        Self::InvalidErrorMargin { margin }
    }

    /// Create a `CertaintyOutOfBounds` error.
    #[must_use]
    pub fn certainty_out_of_bounds(certainty: f64) -> Self {
        Self::CertaintyOutOfBounds { certainty }
    }

    /// Create a `FalsePositiveRateOutOfBounds` error.
    #[must_use]
    pub fn fp_rate_out_of_bounds(fp_rate: f64) -> Self {
        Self::FalsePositiveRateOutOfBounds { fp_rate }
    }

    /// Create an `InvalidSketchDimensions` error.
    #[must_use]
    pub fn invalid_sketch_dimensions(width: usize, depth: usize) -> Self {
        Self::InvalidSketchDimensions { width, depth }
    }

    /// Create an `InvalidFilterSize` error.
    #[must_use]
    pub fn invalid_filter_size(size: usize) -> Self {
        Self::InvalidFilterSize { size }
    }
}
