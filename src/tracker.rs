//! The access tracker facade.
//!
//! An [`AccessTracker`] answers "how often was this key touched in each of
//! the last `n` time slices?" in fixed memory. Keys are hashed once with
//! [`XxHasher`]; the hash is fed to a [`BucketRing`] whose buckets each hold
//! a [`BucketCounter`].
//!
//! # Feature Vectors
//!
//! [`AccessTracker::get_accesses`] returns one estimate per bucket, most
//! recent first:
//!
//! ```text
//! index:      0              1                    n-1
//!          current     one slice ago   ...   n-1 slices ago
//! ```
//!
//! Sketch backends give approximate counts that never undercount (until a
//! counter saturates); filter backends give `1.0` / `0.0` per bucket.
//!
//! # Examples
//!
//! ```
//! use accesstrack::ticker::ManualTicker;
//! use accesstrack::{AccessTracker, AccessTrackerConfig};
//! use std::sync::Arc;
//!
//! let ticker = Arc::new(ManualTicker::new(0));
//! let tracker = AccessTracker::<u32>::new(AccessTrackerConfig {
//!     num_buckets: 3,
//!     num_ticks_per_bucket: 1,
//!     max_num_ops_per_bucket: 1_000,
//!     ticker: ticker.clone(),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! tracker.record_access("a");
//! ticker.set(1);
//! tracker.record_access("b");
//!
//! assert_eq!(tracker.get_accesses("a"), vec![0.0, 1.0, 0.0]);
//! ```

#![allow(clippy::module_name_repetitions)]

use crate::builder::AccessTrackerConfig;
use crate::core::counter::SketchCounter;
use crate::counters::BucketCounter;
use crate::error::Result;
use crate::hash::XxHasher;
use crate::sync::BucketRing;
use std::sync::Arc;

/// Time-bucketed probabilistic access tracker.
///
/// `C` is the sketch cell width (`u32` by default); see [`AccessTracker16`]
/// and [`AccessTracker8`] for smaller footprints.
///
/// All operations take `&self` and are safe to call from many threads; wrap
/// the tracker in an `Arc` to share it. The tracker is move-only. Use
/// [`take`](Self::take) to move the contents out and leave an empty tracker
/// behind.
#[derive(Debug)]
pub struct AccessTracker<C: SketchCounter = u32> {
    config: AccessTrackerConfig,
    hasher: XxHasher,
    ring: BucketRing<BucketCounter<C>>,
}

/// Tracker with 16-bit sketch counters.
pub type AccessTracker16 = AccessTracker<u16>;

/// Tracker with 8-bit sketch counters.
pub type AccessTracker8 = AccessTracker<u8>;

impl<C: SketchCounter> AccessTracker<C> {
    /// Build a tracker, allocating every bucket up front.
    ///
    /// # Errors
    ///
    /// Returns error if `config` fails [`AccessTrackerConfig::validate`] or a
    /// backend cannot be sized from it.
    pub fn new(config: AccessTrackerConfig) -> Result<Self> {
        config.validate()?;

        let counters = (0..config.num_buckets)
            .map(|_| BucketCounter::from_config(&config))
            .collect::<Result<Vec<_>>>()?;
        let ring = BucketRing::new(counters, config.num_ticks_per_bucket, Arc::clone(&config.ticker))?;

        if config.num_buckets <= 2 {
            tracing::warn!(
                num_buckets = config.num_buckets,
                "access tracker with two or fewer buckets never rotates"
            );
        }
        tracing::debug!(
            num_buckets = config.num_buckets,
            ticks_per_bucket = config.num_ticks_per_bucket,
            backend = config.counter_kind().name(),
            cell_bytes = std::mem::size_of::<C>(),
            byte_size = ring.byte_size(),
            "built access tracker"
        );

        Ok(Self {
            config,
            hasher: XxHasher::new(),
            ring,
        })
    }

    /// Record one access to `key` in the current bucket.
    pub fn record_access(&self, key: impl AsRef<[u8]>) {
        let hash = self.hasher.hash_bytes(key.as_ref());
        self.ring.record(hash);
    }

    /// Per-bucket estimates for `key`, most recent first.
    ///
    /// Empty for a tracker with no buckets.
    #[must_use]
    pub fn get_accesses(&self, key: impl AsRef<[u8]>) -> Vec<f64> {
        let hash = self.hasher.hash_bytes(key.as_ref());
        self.ring.estimates(hash)
    }

    /// Return the feature vector for `key`, then record the access.
    ///
    /// The triggering access is not part of its own features.
    #[must_use]
    pub fn record_and_populate_access_features(&self, key: impl AsRef<[u8]>) -> Vec<f64> {
        let hash = self.hasher.hash_bytes(key.as_ref());
        let features = self.ring.estimates(hash);
        self.ring.record(hash);
        features
    }

    /// Raw operations recorded per bucket, most recent first.
    #[must_use]
    pub fn get_rotated_access_counts(&self) -> Vec<u64> {
        self.ring.item_counts()
    }

    /// Buckets in the ring.
    #[must_use]
    pub fn get_num_buckets(&self) -> usize {
        self.ring.len()
    }

    /// Backend storage in bytes across all buckets.
    ///
    /// Capacity, not occupancy: resets do not change it.
    #[must_use]
    pub fn get_byte_size(&self) -> usize {
        self.ring.byte_size()
    }

    /// The config this tracker was built from.
    #[must_use]
    pub fn config(&self) -> &AccessTrackerConfig {
        &self.config
    }

    /// Whether this tracker has no buckets (default-constructed or taken).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Move the tracker out, leaving an empty one in its place.
    #[must_use]
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl<C: SketchCounter> Default for AccessTracker<C> {
    /// An empty tracker: zero buckets, every operation a no-op.
    fn default() -> Self {
        Self {
            config: AccessTrackerConfig::default(),
            hasher: XxHasher::new(),
            ring: BucketRing::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticker::ManualTicker;
    use std::thread;

    fn manual_tracker<C: SketchCounter>(n: usize, use_counts: bool) -> (AccessTracker<C>, Arc<ManualTicker>) {
        let ticker = Arc::new(ManualTicker::new(0));
        let tracker = AccessTracker::new(AccessTrackerConfig {
            num_buckets: n,
            num_ticks_per_bucket: 1,
            use_counts,
            max_num_ops_per_bucket: 1_000,
            ticker: ticker.clone(),
            ..AccessTrackerConfig::default()
        })
        .unwrap();
        (tracker, ticker)
    }

    #[test]
    fn test_counts_within_one_bucket() {
        let (tracker, _) = manual_tracker::<u32>(4, true);
        for _ in 0..5 {
            tracker.record_access("hot");
        }
        tracker.record_access("cold");

        let hot = tracker.get_accesses("hot");
        assert_eq!(hot.len(), 4);
        assert!(hot[0] >= 5.0);
        assert_eq!(&hot[1..], &[0.0, 0.0, 0.0]);
        assert_eq!(tracker.get_rotated_access_counts(), vec![6, 0, 0, 0]);
    }

    #[test]
    fn test_populate_features_excludes_current_access() {
        let (tracker, _) = manual_tracker::<u32>(3, true);
        assert_eq!(tracker.record_and_populate_access_features("k"), vec![0.0; 3]);
        assert_eq!(tracker.record_and_populate_access_features("k"), vec![1.0, 0.0, 0.0]);
        assert_eq!(tracker.get_rotated_access_counts(), vec![2, 0, 0]);
    }

    #[test]
    fn test_filter_backend_reports_membership() {
        let (tracker, ticker) = manual_tracker::<u32>(3, false);
        tracker.record_access("a");
        tracker.record_access("a");
        ticker.set(1);
        assert_eq!(tracker.get_accesses("a"), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_key_types() {
        let (tracker, _) = manual_tracker::<u16>(3, true);
        tracker.record_access("k");
        tracker.record_access(String::from("k"));
        tracker.record_access(b"k");
        tracker.record_access(vec![b'k']);
        assert!(tracker.get_accesses("k")[0] >= 4.0);
    }

    #[test]
    fn test_byte_size_matches_backends() {
        let (tracker, _) = manual_tracker::<u8>(3, true);
        // 1 / 1000 margin -> 2000 wide, 0.99 certainty -> 7 deep, 1 byte cells
        assert_eq!(tracker.get_byte_size(), 3 * 2000 * 7);
        let (tracker, _) = manual_tracker::<u32>(3, true);
        assert_eq!(tracker.get_byte_size(), 3 * 2000 * 7 * 4);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(AccessTracker::<u32>::new(AccessTrackerConfig::default()).is_err());
    }

    #[test]
    fn test_default_and_take() {
        let empty = AccessTracker::<u32>::default();
        assert!(empty.is_empty());
        assert_eq!(empty.get_num_buckets(), 0);
        assert_eq!(empty.get_byte_size(), 0);
        empty.record_access("x");
        assert!(empty.get_accesses("x").is_empty());
        assert!(empty.get_rotated_access_counts().is_empty());

        let (mut source, _) = manual_tracker::<u32>(3, true);
        source.record_access("x");
        let moved = source.take();
        assert!(source.is_empty());
        assert_eq!(moved.get_num_buckets(), 3);
        assert_eq!(moved.get_rotated_access_counts(), vec![1, 0, 0]);
    }

    #[test]
    fn test_shared_across_threads() {
        let (tracker, _) = manual_tracker::<u32>(1, true);
        let tracker = Arc::new(tracker);
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let tracker = Arc::clone(&tracker);
                thread::spawn(move || {
                    for i in 0..250 {
                        tracker.record_access(format!("{t}-{i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(tracker.get_rotated_access_counts(), vec![1_000]);
    }
}
