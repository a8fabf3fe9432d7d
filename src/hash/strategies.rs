//! Index derivation for the membership filter.
//!
//! The filter needs `k` bit positions per key but only has one 64-bit key
//! hash. Enhanced double hashing (Dillinger & Manolios 2004) stretches two
//! base hashes into `k` positions:
//!
//! ```text
//! gᵢ(x) = (h₁(x) + i·h₂(x) + (i² + i)/2) mod m
//! ```
//!
//! The quadratic term breaks up the arithmetic-progression clustering plain
//! double hashing shows for small `m` or large `k`.
//!
//! # References
//!
//! - Kirsch, A., & Mitzenmacher, M. (2006). "Less Hashing, Same Performance: Building a Better Bloom Filter"
//! - Dillinger, P. C., & Manolios, P. (2004). "Fast and Accurate Bitstate Verification for SPIN"

#![allow(clippy::cast_possible_truncation)]

/// Enhanced double hashing over a pair of base hashes.
///
/// # Examples
///
/// ```
/// use accesstrack::hash::strategies::EnhancedDoubleHashing;
///
/// let indices: Vec<usize> = EnhancedDoubleHashing::indices(12345, 67890, 7, 1000).collect();
/// assert_eq!(indices.len(), 7);
/// assert!(indices.iter().all(|&i| i < 1000));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EnhancedDoubleHashing;

impl EnhancedDoubleHashing {
    /// The `i`-th index in `[0, m)`.
    #[inline]
    #[must_use]
    pub fn index(h1: u64, h2: u64, i: u64, m: usize) -> usize {
        let quadratic_term = i.wrapping_mul(i.wrapping_add(1)) >> 1;
        let hash = h1
            .wrapping_add(i.wrapping_mul(h2))
            .wrapping_add(quadratic_term);
        (hash % m as u64) as usize
    }

    /// The first `k` indices in `[0, m)`, without allocating.
    #[inline]
    pub fn indices(h1: u64, h2: u64, k: usize, m: usize) -> impl Iterator<Item = usize> {
        (0..k as u64).map(move |i| Self::index(h1, h2, i, m))
    }
}
