//! One time slice of the ring.
//!
//! A bucket co-locates its backend, its raw operation counter and the lock
//! guarding both, padded to a cache line so neighbouring buckets never share
//! one:
//!
//! ```text
//! ┌──────────────── 64-byte aligned ────────────────┐
//! │ Mutex ─┬─ counter: B         (backend handle)   │
//! │        └─ item_count: u64    (raw op count)     │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Every method takes the lock for exactly one backend call.

use crate::core::counter::AccessCounter;
use parking_lot::Mutex;

/// Cache-line size assumed for padding.
pub const CACHE_LINE_SIZE: usize = 64;

#[derive(Debug)]
struct BucketState<B> {
    counter: B,
    item_count: u64,
}

/// A lock-guarded backend plus its raw operation count.
#[derive(Debug)]
#[repr(align(64))]
pub struct Bucket<B> {
    /// `parking_lot::Mutex` rather than `std::sync::Mutex`: no poisoning and
    /// a one-byte lock word, and critical sections here are a few hundred
    /// nanoseconds at most.
    state: Mutex<BucketState<B>>,
}

impl<B: AccessCounter> Bucket<B> {
    /// Wrap `counter` with a zero item count.
    pub fn new(counter: B) -> Self {
        Self {
            state: Mutex::new(BucketState {
                counter,
                item_count: 0,
            }),
        }
    }

    /// Record `hash` and bump the raw count.
    #[inline]
    pub fn record(&self, hash: u64) {
        let mut state = self.state.lock();
        state.counter.increment(hash);
        state.item_count += 1;
    }

    /// Backend estimate for `hash`.
    #[inline]
    pub fn estimate(&self, hash: u64) -> f64 {
        self.state.lock().counter.estimate(hash)
    }

    /// Operations recorded since the last reset.
    pub fn item_count(&self) -> u64 {
        self.state.lock().item_count
    }

    /// Wipe the backend and the raw count.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.counter.reset();
        state.item_count = 0;
    }

    /// Backend storage in bytes.
    pub fn byte_size(&self) -> usize {
        self.state.lock().counter.byte_size()
    }
}
