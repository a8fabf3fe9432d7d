//! Tracker configuration.

use super::validation;
use crate::counters::CounterKind;
use crate::error::Result;
use crate::ticker::{ClockTicker, Ticker};
use std::sync::Arc;

/// Default ticks per bucket: one hour with [`ClockTicker`].
pub const DEFAULT_TICKS_PER_BUCKET: u64 = 3600;

/// Default expected operations per bucket.
pub const DEFAULT_MAX_OPS_PER_BUCKET: usize = 1_000_000;

fn default_ticker() -> Arc<dyn Ticker> {
    Arc::new(ClockTicker)
}

/// Everything needed to build an access tracker.
///
/// Immutable once handed to a tracker. See the [module docs](super) for the
/// defaults.
///
/// With the `serde` feature the config (de)serializes, minus the ticker,
/// which always comes back as a [`ClockTicker`]. Missing fields take their
/// defaults.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AccessTrackerConfig {
    /// Buckets in the ring. Must be at least 1; there is no usable default.
    pub num_buckets: usize,

    /// Ticks covered by each bucket.
    pub num_ticks_per_bucket: u64,

    /// Where ticks come from.
    #[cfg_attr(feature = "serde", serde(skip, default = "default_ticker"))]
    pub ticker: Arc<dyn Ticker>,

    /// Count-min sketch when `true`, Bloom filter when `false`.
    pub use_counts: bool,

    /// Operations one bucket is expected to absorb. Sizes both backends.
    pub max_num_ops_per_bucket: usize,

    /// Over-count the sketch may add per `max_num_ops_per_bucket` operations.
    pub cms_max_error_value: u64,

    /// Probability the sketch stays within its error margin.
    pub cms_error_certainty: f64,

    /// Cap on sketch width; `0` means uncapped.
    pub cms_max_width: usize,

    /// Cap on sketch depth; `0` means uncapped.
    pub cms_max_depth: usize,

    /// Target false positive rate for the filter backend.
    pub bf_false_positive_rate: f64,
}

impl AccessTrackerConfig {
    /// Check every precondition a tracker relies on.
    ///
    /// Only the settings of the selected backend are checked.
    ///
    /// # Errors
    ///
    /// Returns the first violated precondition.
    ///
    /// # Examples
    ///
    /// ```
    /// use accesstrack::AccessTrackerConfig;
    ///
    /// assert!(AccessTrackerConfig::default().validate().is_err());
    ///
    /// let config = AccessTrackerConfig { num_buckets: 12, ..Default::default() };
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        validation::validate_bucket_count(self.num_buckets)?;
        validation::validate_tick_span(self.num_ticks_per_bucket)?;
        validation::validate_items(self.max_num_ops_per_bucket)?;

        if self.use_counts {
            validation::validate_max_error_value(self.cms_max_error_value)?;
            validation::validate_certainty(self.cms_error_certainty)?;
        } else {
            validation::validate_fp_rate(self.bf_false_positive_rate)?;
        }
        Ok(())
    }

    /// Backend kind this config selects.
    #[must_use]
    pub fn counter_kind(&self) -> CounterKind {
        if self.use_counts {
            CounterKind::Sketch
        } else {
            CounterKind::Filter
        }
    }
}

impl Default for AccessTrackerConfig {
    fn default() -> Self {
        Self {
            num_buckets: 0,
            num_ticks_per_bucket: DEFAULT_TICKS_PER_BUCKET,
            ticker: default_ticker(),
            use_counts: true,
            max_num_ops_per_bucket: DEFAULT_MAX_OPS_PER_BUCKET,
            cms_max_error_value: 1,
            cms_error_certainty: 0.99,
            cms_max_width: 8_000_000,
            cms_max_depth: 8,
            bf_false_positive_rate: 0.02,
        }
    }
}
