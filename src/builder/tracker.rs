//! Builder for access trackers.
//!
//! # Type-State Pattern
//!
//! The bucket count is the only setting without a usable default, so the
//! builder has two states:
//!
//! ```text
//! Initial ──.num_buckets()──▶ Complete ──.build()──▶ AccessTracker<C>
//! ```
//!
//! Optional settings can be given in either state.
//!
//! # Examples
//!
//! ```
//! use accesstrack::builder::AccessTrackerBuilder;
//! use accesstrack::ticker::ManualTicker;
//! use accesstrack::AccessTracker8;
//! use std::sync::Arc;
//!
//! let ticker = Arc::new(ManualTicker::new(0));
//! let tracker: AccessTracker8 = AccessTrackerBuilder::new()
//!     .ticker(ticker.clone())
//!     .ticks_per_bucket(1)
//!     .max_ops_per_bucket(1_000)
//!     .num_buckets(3)
//!     .build()
//!     .unwrap();
//!
//! tracker.record_access("k");
//! ticker.advance(1);
//! assert_eq!(tracker.get_accesses("k"), vec![0.0, 1.0, 0.0]);
//! ```
//!
//! ## Error Handling
//!
//! ```
//! use accesstrack::builder::AccessTrackerBuilder;
//! use accesstrack::AccessTracker;
//!
//! let result: accesstrack::Result<AccessTracker> = AccessTrackerBuilder::new()
//!     .num_buckets(4)
//!     .certainty(1.5) // Invalid!
//!     .build();
//!
//! assert!(result.is_err());
//! ```

use super::config::AccessTrackerConfig;
use crate::core::counter::SketchCounter;
use crate::error::Result;
use crate::ticker::Ticker;
use crate::tracker::AccessTracker;
use std::marker::PhantomData;
use std::sync::Arc;

/// Type-state marker: bucket count not yet set.
pub struct Initial;

/// Type-state marker: all required parameters set.
pub struct Complete;

/// Builder for [`AccessTracker`] with type-state guarantees.
pub struct AccessTrackerBuilder<State = Initial> {
    config: AccessTrackerConfig,
    _state: PhantomData<State>,
}

impl AccessTrackerBuilder<Initial> {
    /// Start from [`AccessTrackerConfig::default`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: AccessTrackerConfig::default(),
            _state: PhantomData,
        }
    }

    /// Set the number of buckets in the ring (must be > 0).
    ///
    /// Transitions the builder to `Complete`.
    #[must_use]
    pub fn num_buckets(self, num_buckets: usize) -> AccessTrackerBuilder<Complete> {
        AccessTrackerBuilder {
            config: AccessTrackerConfig {
                num_buckets,
                ..self.config
            },
            _state: PhantomData,
        }
    }
}

impl<State> AccessTrackerBuilder<State> {
    /// Ticks covered by each bucket.
    #[must_use]
    pub fn ticks_per_bucket(mut self, ticks: u64) -> Self {
        self.config.num_ticks_per_bucket = ticks;
        self
    }

    /// Tick source. Defaults to [`ClockTicker`](crate::ticker::ClockTicker).
    #[must_use]
    pub fn ticker(mut self, ticker: Arc<dyn Ticker>) -> Self {
        self.config.ticker = ticker;
        self
    }

    /// Count-min sketch (`true`) or Bloom filter (`false`).
    #[must_use]
    pub fn use_counts(mut self, use_counts: bool) -> Self {
        self.config.use_counts = use_counts;
        self
    }

    /// Operations one bucket is expected to absorb.
    #[must_use]
    pub fn max_ops_per_bucket(mut self, ops: usize) -> Self {
        self.config.max_num_ops_per_bucket = ops;
        self
    }

    /// Over-count the sketch may add per `max_ops_per_bucket` operations.
    #[must_use]
    pub fn max_error_value(mut self, value: u64) -> Self {
        self.config.cms_max_error_value = value;
        self
    }

    /// Probability the sketch stays within its error margin.
    #[must_use]
    pub fn certainty(mut self, certainty: f64) -> Self {
        self.config.cms_error_certainty = certainty;
        self
    }

    /// Caps on sketch width and depth; `0` leaves a dimension uncapped.
    #[must_use]
    pub fn max_sketch_dimensions(mut self, max_width: usize, max_depth: usize) -> Self {
        self.config.cms_max_width = max_width;
        self.config.cms_max_depth = max_depth;
        self
    }

    /// Target false positive rate for the filter backend.
    #[must_use]
    pub fn false_positive_rate(mut self, fp_rate: f64) -> Self {
        self.config.bf_false_positive_rate = fp_rate;
        self
    }
}

impl AccessTrackerBuilder<Complete> {
    /// Validate and return the assembled config.
    ///
    /// # Errors
    ///
    /// See [`AccessTrackerConfig::validate`].
    pub fn build_config(self) -> Result<AccessTrackerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Build the tracker.
    ///
    /// `C` picks the sketch cell width; it is unused by the filter backend.
    ///
    /// # Errors
    ///
    /// Returns error if the config is invalid or a backend cannot be sized.
    pub fn build<C: SketchCounter>(self) -> Result<AccessTracker<C>> {
        AccessTracker::new(self.config)
    }
}

impl Default for AccessTrackerBuilder<Initial> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::CounterKind;
    use crate::error::AccessTrackError;
    use crate::ticker::ManualTicker;

    #[test]
    fn test_optional_settings_carry_across_states() {
        let config = AccessTrackerBuilder::new()
            .ticks_per_bucket(60)
            .use_counts(false)
            .num_buckets(5)
            .max_ops_per_bucket(2_000)
            .false_positive_rate(0.05)
            .build_config()
            .unwrap();

        assert_eq!(config.num_buckets, 5);
        assert_eq!(config.num_ticks_per_bucket, 60);
        assert_eq!(config.max_num_ops_per_bucket, 2_000);
        assert_eq!(config.bf_false_positive_rate, 0.05);
        assert_eq!(config.counter_kind(), CounterKind::Filter);
    }

    #[test]
    fn test_sketch_settings() {
        let config = AccessTrackerBuilder::default()
            .num_buckets(2)
            .max_error_value(4)
            .certainty(0.9)
            .max_sketch_dimensions(100, 3)
            .build_config()
            .unwrap();

        assert_eq!(config.cms_max_error_value, 4);
        assert_eq!(config.cms_error_certainty, 0.9);
        assert_eq!((config.cms_max_width, config.cms_max_depth), (100, 3));
    }

    #[test]
    fn test_build_validates() {
        let result = AccessTrackerBuilder::new()
            .num_buckets(0)
            .build::<u32>();
        assert!(matches!(result, Err(AccessTrackError::InvalidBucketCount { count: 0 })));

        let result = AccessTrackerBuilder::new()
            .num_buckets(3)
            .ticks_per_bucket(0)
            .build::<u16>();
        assert!(matches!(result, Err(AccessTrackError::InvalidTickSpan { ticks: 0 })));
    }

    #[test]
    fn test_build_uses_ticker() {
        let ticker = Arc::new(ManualTicker::new(0));
        let tracker = AccessTrackerBuilder::new()
            .num_buckets(3)
            .ticks_per_bucket(1)
            .max_ops_per_bucket(1_000)
            .ticker(ticker.clone())
            .build::<u32>()
            .unwrap();

        tracker.record_access(b"a");
        ticker.set(1);
        tracker.record_access(b"b");
        assert_eq!(tracker.get_rotated_access_counts(), vec![1, 1, 0]);
    }
}
