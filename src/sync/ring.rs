//! Fixed ring of time-sliced buckets with lock-free rotation.
//!
//! # Rotation
//!
//! Before every operation the ring maps the current tick onto a bucket:
//!
//! ```text
//! target = (tick / ticks_per_bucket) mod n
//! ```
//!
//! and compares it with the shared `most_recent` index:
//!
//! - `target == most_recent`: still inside the current slice.
//! - `target + 1 == most_recent` (mod n): this thread's view of time is one
//!   slice behind another thread's. Treated as current; no rotation.
//! - otherwise: try to CAS `most_recent` to `target`. The single winner
//!   resets the entered bucket; losers reload and re-evaluate.
//!
//! No lock is held while deciding. Bucket locks are taken one at a time, so
//! readers never hold two and never block each other across buckets.
//!
//! A jump of several slices resets only the entered bucket; the slices in
//! between keep whatever they held. With `n <= 2` every target is either the
//! current bucket or its predecessor, so such a ring never rotates.

use super::bucket::Bucket;
use crate::core::counter::AccessCounter;
use crate::error::{AccessTrackError, Result};
use crate::ticker::{ClockTicker, Ticker};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Buckets plus the shared "most recent" index.
pub struct BucketRing<B> {
    buckets: Box<[Bucket<B>]>,
    most_recent: AtomicUsize,
    ticks_per_bucket: u64,
    ticker: Arc<dyn Ticker>,
}

impl<B> BucketRing<B> {
    /// A ring with no buckets. Every operation is a no-op.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            buckets: Box::new([]),
            most_recent: AtomicUsize::new(0),
            ticks_per_bucket: 1,
            ticker: Arc::new(ClockTicker),
        }
    }

    /// Number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether the ring has no buckets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Ticks covered by one bucket.
    #[must_use]
    pub fn ticks_per_bucket(&self) -> u64 {
        self.ticks_per_bucket
    }

    /// Last observed "most recent" index, without running a rotation check.
    #[must_use]
    pub fn most_recent(&self) -> usize {
        self.most_recent.load(Ordering::Acquire)
    }

    fn target_index(&self) -> (u64, usize) {
        let tick = self.ticker.current_tick();
        #[allow(clippy::cast_possible_truncation)]
        let target = ((tick / self.ticks_per_bucket) % self.buckets.len() as u64) as usize;
        (tick, target)
    }
}

impl<B: AccessCounter> BucketRing<B> {
    /// Build a ring over `counters`, one bucket each, starting at bucket 0.
    ///
    /// # Errors
    ///
    /// - [`AccessTrackError::InvalidBucketCount`] if `counters` is empty
    /// - [`AccessTrackError::InvalidTickSpan`] if `ticks_per_bucket == 0`
    pub fn new(counters: Vec<B>, ticks_per_bucket: u64, ticker: Arc<dyn Ticker>) -> Result<Self> {
        if counters.is_empty() {
            return Err(AccessTrackError::invalid_bucket_count(0));
        }
        if ticks_per_bucket == 0 {
            return Err(AccessTrackError::invalid_tick_span(ticks_per_bucket));
        }

        Ok(Self {
            buckets: counters.into_iter().map(Bucket::new).collect(),
            most_recent: AtomicUsize::new(0),
            ticks_per_bucket,
            ticker,
        })
    }

    /// Run the rotation check and return the bucket index to use.
    ///
    /// Returns `0` on an empty ring.
    pub fn update_most_recent(&self) -> usize {
        let n = self.buckets.len();
        if n == 0 {
            return 0;
        }
        let (tick, target) = self.target_index();

        loop {
            let current = self.most_recent.load(Ordering::Acquire);
            if target == current || (target + 1) % n == current {
                return current;
            }

            if self
                .most_recent
                .compare_exchange(current, target, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                self.buckets[target].reset();
                tracing::debug!(from = current, to = target, tick, "rotated access bucket");
                return target;
            }
        }
    }

    /// Record `hash` in the current bucket.
    pub fn record(&self, hash: u64) {
        if self.is_empty() {
            return;
        }
        let idx = self.update_most_recent();
        self.buckets[idx].record(hash);
    }

    /// Per-bucket estimates for `hash`, most recent first.
    #[must_use]
    pub fn estimates(&self, hash: u64) -> Vec<f64> {
        self.collect_rotated(|bucket| bucket.estimate(hash))
    }

    /// Per-bucket raw operation counts, most recent first.
    #[must_use]
    pub fn item_counts(&self) -> Vec<u64> {
        self.collect_rotated(Bucket::item_count)
    }

    /// Total backend storage in bytes.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.buckets.iter().map(Bucket::byte_size).sum()
    }

    fn collect_rotated<T>(&self, mut read: impl FnMut(&Bucket<B>) -> T) -> Vec<T> {
        let n = self.buckets.len();
        if n == 0 {
            return Vec::new();
        }
        let most_recent = self.update_most_recent();
        (0..n)
            .map(|i| read(&self.buckets[(most_recent + n - i) % n]))
            .collect()
    }
}

impl<B> Default for BucketRing<B> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<B> fmt::Debug for BucketRing<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketRing")
            .field("num_buckets", &self.buckets.len())
            .field("most_recent", &self.most_recent())
            .field("ticks_per_bucket", &self.ticks_per_bucket)
            .field("ticker", &self.ticker)
            .finish()
    }
}
