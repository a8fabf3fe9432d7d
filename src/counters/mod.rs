//! Per-bucket counter backends.
//!
//! | Backend              | Estimate        | Error                         | Memory per bucket            |
//! |----------------------|-----------------|-------------------------------|------------------------------|
//! | [`CountMinSketch`]   | approx. count   | over-count only, additive     | `width × depth × size_of<C>` |
//! | [`BloomCounter`]     | `0.0` / `1.0`   | false positives only          | `≈ -n ln ε / (ln 2)²` bits    |
//!
//! A tracker picks one kind at construction and uses it for every bucket;
//! [`BucketCounter`] is that choice.

pub mod bloom;
pub mod sketch;

pub use bloom::BloomCounter;
pub use sketch::CountMinSketch;

use crate::builder::AccessTrackerConfig;
use crate::core::counter::{AccessCounter, SketchCounter};
use crate::core::params;
use crate::error::Result;

/// Which backend the tracker uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CounterKind {
    /// Frequency-estimating count-min sketch.
    Sketch,
    /// Set-membership Bloom filter.
    Filter,
}

impl CounterKind {
    /// Human-readable name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sketch => "count-min sketch",
            Self::Filter => "bloom filter",
        }
    }
}

/// One bucket's backend, either a sketch with `C`-wide cells or a filter.
#[derive(Debug)]
pub enum BucketCounter<C: SketchCounter = u32> {
    /// Count-min sketch.
    Sketch(CountMinSketch<C>),
    /// Bloom filter.
    Filter(BloomCounter),
}

impl<C: SketchCounter> BucketCounter<C> {
    /// Build the backend `config` asks for.
    ///
    /// # Errors
    ///
    /// Propagates sizing errors from the chosen backend.
    pub fn from_config(config: &AccessTrackerConfig) -> Result<Self> {
        if config.use_counts {
            let margin =
                params::sketch_error_margin(config.cms_max_error_value, config.max_num_ops_per_bucket)?;
            Ok(Self::Sketch(CountMinSketch::new(
                margin,
                config.cms_error_certainty,
                config.cms_max_width,
                config.cms_max_depth,
            )?))
        } else {
            Ok(Self::Filter(BloomCounter::new(
                config.max_num_ops_per_bucket,
                config.bf_false_positive_rate,
            )?))
        }
    }

    /// Which variant this is.
    #[must_use]
    pub fn kind(&self) -> CounterKind {
        match self {
            Self::Sketch(_) => CounterKind::Sketch,
            Self::Filter(_) => CounterKind::Filter,
        }
    }
}

impl<C: SketchCounter> AccessCounter for BucketCounter<C> {
    #[inline]
    fn increment(&mut self, hash: u64) {
        match self {
            Self::Sketch(sketch) => sketch.increment(hash),
            Self::Filter(filter) => filter.increment(hash),
        }
    }

    #[inline]
    fn estimate(&self, hash: u64) -> f64 {
        match self {
            Self::Sketch(sketch) => sketch.estimate(hash),
            Self::Filter(filter) => filter.estimate(hash),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Sketch(sketch) => sketch.reset(),
            Self::Filter(filter) => filter.reset(),
        }
    }

    fn byte_size(&self) -> usize {
        match self {
            Self::Sketch(sketch) => sketch.byte_size(),
            Self::Filter(filter) => filter.byte_size(),
        }
    }
}
