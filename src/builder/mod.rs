//! Configuration and builder for access trackers.
//!
//! # Design Philosophy
//!
//! ## Plain Config, Type-State Builder
//!
//! [`AccessTrackerConfig`] is a plain struct with public fields and sensible
//! defaults, for callers that assemble settings from elsewhere (including
//! deserialized ones with the `serde` feature). [`AccessTrackerBuilder`]
//! layers a type-state on top: the bucket count has no usable default, so
//! `build` only exists once it has been given.
//!
//! ## Error Handling
//!
//! - **Compile-time errors**: missing bucket count (builder only)
//! - **Runtime errors**: out-of-range values, reported by
//!   [`AccessTrackerConfig::validate`]
//!
//! # Examples
//!
//! ## Builder
//!
//! ```
//! use accesstrack::builder::AccessTrackerBuilder;
//! use accesstrack::AccessTracker;
//!
//! let tracker: AccessTracker = AccessTrackerBuilder::new()
//!     .num_buckets(6)
//!     .ticks_per_bucket(600)
//!     .max_ops_per_bucket(10_000)
//!     .build()
//!     .unwrap();
//! assert_eq!(tracker.get_num_buckets(), 6);
//! ```
//!
//! ## Plain Config
//!
//! ```
//! use accesstrack::{AccessTracker16, AccessTrackerConfig};
//!
//! let config = AccessTrackerConfig {
//!     num_buckets: 4,
//!     use_counts: false,
//!     max_num_ops_per_bucket: 10_000,
//!     ..AccessTrackerConfig::default()
//! };
//! let tracker = AccessTracker16::new(config).unwrap();
//! assert_eq!(tracker.get_accesses("never"), vec![0.0; 4]);
//! ```
//!
//! # Defaults
//!
//! | Field                    | Default      |
//! |--------------------------|--------------|
//! | `num_buckets`            | `0` (unset)  |
//! | `num_ticks_per_bucket`   | `3600`       |
//! | `use_counts`             | `true`       |
//! | `max_num_ops_per_bucket` | `1_000_000`  |
//! | `cms_max_error_value`    | `1`          |
//! | `cms_error_certainty`    | `0.99`       |
//! | `cms_max_width`          | `8_000_000`  |
//! | `cms_max_depth`          | `8`          |
//! | `bf_false_positive_rate` | `0.02`       |
//! | `ticker`                 | [`ClockTicker`](crate::ticker::ClockTicker) |

#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod tracker;

pub use config::AccessTrackerConfig;
pub use tracker::AccessTrackerBuilder;

use crate::error::{AccessTrackError, Result};

/// Common validation functions for tracker configuration.
mod validation {
    use super::*;

    /// Validate bucket count.
    ///
    /// # Errors
    ///
    /// Returns error if `count == 0`.
    #[inline]
    pub fn validate_bucket_count(count: usize) -> Result<()> {
        if count == 0 {
            return Err(AccessTrackError::invalid_bucket_count(count));
        }
        Ok(())
    }

    /// Validate ticks per bucket.
    ///
    /// # Errors
    ///
    /// Returns error if `ticks == 0`.
    #[inline]
    pub fn validate_tick_span(ticks: u64) -> Result<()> {
        if ticks == 0 {
            return Err(AccessTrackError::invalid_tick_span(ticks));
        }
        Ok(())
    }

    /// Validate expected operations per bucket.
    ///
    /// # Errors
    ///
    /// Returns error if `items == 0`.
    #[inline]
    pub fn validate_items(items: usize) -> Result<()> {
        if items == 0 {
            return Err(AccessTrackError::invalid_item_count(items));
        }
        Ok(())
    }

    /// Validate the sketch's tolerated over-count.
    ///
    /// # Errors
    ///
    /// Returns error if `max_error_value == 0`.
    #[inline]
    pub fn validate_max_error_value(max_error_value: u64) -> Result<()> {
        if max_error_value == 0 {
            return Err(AccessTrackError::invalid_error_margin(0.0));
        }
        Ok(())
    }

    /// Validate sketch certainty.
    ///
    /// # Errors
    ///
    /// Returns error if `certainty` is not in (0, 1).
    #[inline]
    pub fn validate_certainty(certainty: f64) -> Result<()> {
        if !(certainty > 0.0 && certainty < 1.0) {
            return Err(AccessTrackError::certainty_out_of_bounds(certainty));
        }
        Ok(())
    }

    /// Validate false positive rate.
    ///
    /// # Errors
    ///
    /// Returns error if `fp_rate` is not in (0, 1).
    #[inline]
    pub fn validate_fp_rate(fp_rate: f64) -> Result<()> {
        if !(fp_rate > 0.0 && fp_rate < 1.0) {
            return Err(AccessTrackError::fp_rate_out_of_bounds(fp_rate));
        }
        Ok(())
    }
}

/// Prelude for convenient builder imports.
pub mod prelude {
    pub use super::{AccessTrackerBuilder, AccessTrackerConfig};
}
