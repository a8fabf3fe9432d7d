//! XXH3 key hashing.
//!
//! Keys enter the tracker as byte strings and are reduced to a single 64-bit
//! value exactly once per operation; every bucket and backend works on that
//! value from then on. Raw keys are never stored.
//!
//! This module wraps the `xxhash-rust` crate's XXH3 implementation, which
//! passes SMHasher cleanly and picks SIMD paths at runtime.
//!
//! # Examples
//!
//! ```
//! use accesstrack::hash::XxHasher;
//!
//! let hasher = XxHasher::new();
//! assert_eq!(hasher.hash_bytes(b"user:42"), hasher.hash_bytes(b"user:42"));
//!
//! // Different seeds give independent hash functions.
//! let h1 = XxHasher::with_seed(1).hash_bytes(b"test");
//! let h2 = XxHasher::with_seed(2).hash_bytes(b"test");
//! assert_ne!(h1, h2);
//! ```

use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Seed used for tracker keys.
///
/// Fixed so that estimates for the same key are comparable across tracker
/// instances and process restarts.
pub const KEY_HASH_SEED: u64 = 314_159;

/// Seeded XXH3 hasher.
///
/// `Copy`, `Send + Sync`; share it freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XxHasher {
    seed: u64,
}

impl XxHasher {
    /// Hasher with the tracker key seed, [`KEY_HASH_SEED`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            seed: KEY_HASH_SEED,
        }
    }

    /// Hasher with an explicit seed.
    #[must_use]
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    /// The seed in use.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Hash `bytes` to 64 bits.
    #[inline]
    #[must_use]
    pub fn hash_bytes(&self, bytes: &[u8]) -> u64 {
        xxh3_64_with_seed(bytes, self.seed)
    }
}

impl Default for XxHasher {
    fn default() -> Self {
        Self::new()
    }
}
