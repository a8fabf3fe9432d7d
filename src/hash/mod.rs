//! Key hashing and hash derivation.
//!
//! # Module Structure
//!
//! ```text
//! hash/
//! ├── xxhash.rs      - Seeded XXH3 key hasher
//! ├── strategies.rs  - Enhanced double hashing for filter bit positions
//! └── mod.rs         - This file (mixing helpers)
//! ```
//!
//! A key is hashed once with [`XxHasher`]. Backends that need more than one
//! independent value per key derive it from that hash with [`mix64`] rather
//! than rehashing the key bytes.

pub mod strategies;
pub mod xxhash;

pub use strategies::EnhancedDoubleHashing;
pub use xxhash::{XxHasher, KEY_HASH_SEED};

/// 64-bit avalanche finalizer (SplitMix64 / MurmurHash3 `fmix64` constants).
///
/// A bijection on `u64`: distinct inputs stay distinct, and a one-bit change
/// flips about half the output bits.
///
/// # Examples
///
/// ```
/// use accesstrack::hash::mix64;
///
/// assert_ne!(mix64(1), mix64(2));
/// assert_eq!(mix64(7), mix64(7));
/// ```
#[inline]
#[must_use]
pub const fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}
