//! Concurrency primitives behind the tracker.
//!
//! # Module Organization
//!
//! - [`Bucket`] - cache-line padded, mutex-guarded backend plus raw op count
//! - [`BucketRing`] - fixed ring of buckets with CAS-driven rotation
//!
//! # Concurrency Model
//!
//! Two levels of synchronization:
//!
//! 1. One `AtomicUsize` naming the most recent bucket, only ever changed by
//!    compare-and-swap. The thread whose CAS succeeds resets the bucket it
//!    rotated into.
//! 2. One `parking_lot::Mutex` per bucket, held for a single backend call.
//!
//! Operations on different buckets never contend. Queries visit buckets one
//! at a time, so a reader holds at most one lock.
//!
//! # Examples
//!
//! ```
//! use accesstrack::counters::CountMinSketch;
//! use accesstrack::sync::BucketRing;
//! use accesstrack::ticker::ManualTicker;
//! use std::sync::Arc;
//!
//! let ticker = Arc::new(ManualTicker::new(0));
//! let counters = (0..3)
//!     .map(|_| CountMinSketch::<u32>::with_dimensions(1024, 4).unwrap())
//!     .collect();
//! let ring = BucketRing::new(counters, 1, ticker.clone()).unwrap();
//!
//! ring.record(42);
//! ticker.advance(1);
//! assert_eq!(ring.estimates(42), vec![0.0, 1.0, 0.0]);
//! ```

pub mod bucket;
pub mod ring;

pub use bucket::{Bucket, CACHE_LINE_SIZE};
pub use ring::BucketRing;
