//! accesstrack: time-bucketed probabilistic access tracking.
//!
//! An [`AccessTracker`] keeps a fixed ring of time slices ("buckets"). Each
//! bucket holds a probabilistic counter over the keys accessed while it was
//! current. Asking about a key returns one estimate per bucket, most recent
//! first, a compact access-history feature vector suitable for cache
//! admission policies and other ML-driven decisions.
//!
//! Memory is fixed at construction. Raw keys are never stored.
//!
//! # Quick Start
//!
//! ```
//! use accesstrack::{AccessTracker, AccessTrackerConfig};
//!
//! let tracker: AccessTracker = AccessTracker::new(AccessTrackerConfig {
//!     num_buckets: 24,              // one day of history...
//!     num_ticks_per_bucket: 3600,   // ...in one-hour slices
//!     max_num_ops_per_bucket: 10_000,
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let features = tracker.record_and_populate_access_features("object:17");
//! assert_eq!(features.len(), 24);
//! assert_eq!(features[0], 0.0); // this access is not counted in its own features
//! assert!(tracker.get_accesses("object:17").iter().sum::<f64>() >= 1.0);
//! ```
//!
//! # Two Backends
//!
//! | `use_counts` | Backend              | Estimate per bucket       | Error                   |
//! |--------------|----------------------|---------------------------|-------------------------|
//! | `true`       | [`CountMinSketch`]   | approximate access count  | over-counts only        |
//! | `false`      | [`BloomCounter`]     | `1.0` seen / `0.0` unseen | false positives only    |
//!
//! Sketch cells are `u32` by default; [`AccessTracker16`] and
//! [`AccessTracker8`] trade saturation headroom for memory.
//!
//! # Time
//!
//! Ticks come from a [`Ticker`](ticker::Ticker): wall-clock seconds by
//! default, or a [`ManualTicker`](ticker::ManualTicker) for tests and
//! simulations. A bucket covers `num_ticks_per_bucket` ticks. When time moves
//! into a new bucket, the first operation to notice resets it.
//!
//! # Concurrency
//!
//! Every tracker operation takes `&self`. Share a tracker with `Arc`; no
//! external lock is needed:
//!
//! ```
//! use accesstrack::{AccessTracker, AccessTrackerConfig};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let tracker = Arc::new(AccessTracker::<u32>::new(AccessTrackerConfig {
//!     num_buckets: 4,
//!     max_num_ops_per_bucket: 10_000,
//!     ..Default::default()
//! }).unwrap());
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let tracker = Arc::clone(&tracker);
//!     thread::spawn(move || {
//!         for i in 0..100 {
//!             tracker.record_access(format!("key-{t}-{i}"));
//!         }
//!     })
//! }).collect();
//! for h in handles { h.join().unwrap(); }
//!
//! let total: u64 = tracker.get_rotated_access_counts().iter().sum();
//! assert!(total <= 400);
//! ```
//!
//! # Logging
//!
//! The crate emits [`tracing`] events: `debug` when a tracker is built and
//! on every rotation, `warn` for configurations that can never rotate. The
//! per-access path logs nothing. No subscriber is installed.
//!
//! # Optional Features
//!
//! - `serde` - (de)serialize [`AccessTrackerConfig`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::bool_assert_comparison)]
#![allow(clippy::float_cmp)]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Core traits and sizing utilities
pub mod core;

/// Error types and result aliases
pub mod error;

/// Key hashing
pub mod hash;

/// Per-bucket counter backends
pub mod counters;

/// Bucket ring and rotation
pub mod sync;

/// Tick sources
pub mod ticker;

/// Tracker configuration and builder
pub mod builder;

/// The access tracker facade
pub mod tracker;

// Re-export commonly used types at crate root
pub use error::{AccessTrackError, Result};

pub use builder::{AccessTrackerBuilder, AccessTrackerConfig};
pub use counters::{BloomCounter, BucketCounter, CounterKind, CountMinSketch};
pub use tracker::{AccessTracker, AccessTracker16, AccessTracker8};

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use accesstrack::prelude::*;
/// use std::sync::Arc;
///
/// let ticker = Arc::new(ManualTicker::new(0));
/// let tracker: AccessTracker = AccessTrackerBuilder::new()
///     .num_buckets(3)
///     .ticks_per_bucket(1)
///     .max_ops_per_bucket(100)
///     .ticker(ticker)
///     .build()
///     .unwrap();
/// tracker.record_access("hello");
/// assert_eq!(tracker.get_accesses("hello"), vec![1.0, 0.0, 0.0]);
/// ```
pub mod prelude {
    pub use crate::builder::{AccessTrackerBuilder, AccessTrackerConfig};
    pub use crate::core::{AccessCounter, SketchCounter};
    pub use crate::counters::{BloomCounter, BucketCounter, CounterKind, CountMinSketch};
    pub use crate::error::{AccessTrackError, Result};
    pub use crate::ticker::{ClockTicker, ManualTicker, Ticker};
    pub use crate::tracker::{AccessTracker, AccessTracker16, AccessTracker8};
}
