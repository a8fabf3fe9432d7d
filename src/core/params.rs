//! Sizing formulas for the two counter backends.
//!
//! # Membership filter
//!
//! Given:
//! - `n`: expected insertions per bucket
//! - `ε`: target false positive rate
//!
//! Optimal parameters:
//! - `m = -n × ln(ε) / (ln 2)²` (bits in filter)
//! - `k = (m/n) × ln 2` (number of hash functions)
//!
//! # Count-min sketch
//!
//! Given:
//! - `e`: additive error margin as a fraction of the bucket's total operations
//! - `δ`: certainty that an estimate stays within that margin
//!
//! Dimensions:
//! - `width = ⌊2 / e⌋` counters per row
//! - `depth = ⌈|ln(1 - δ) / ln 2|⌉` rows
//!
//! Both dimensions can be capped to bound memory; a cap of `0` means uncapped.
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/Time Trade-offs in Hash Coding with Allowable Errors"
//! - Cormode & Muthukrishnan (2005). "An Improved Data Stream Summary: The Count-Min Sketch"

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use crate::error::{AccessTrackError, Result};
use std::f64::consts::LN_2;

/// (ln 2)² ≈ 0.4804530139182014
const LN2_SQUARED: f64 = LN_2 * LN_2;

/// Minimum practical filter size in bits.
pub const MIN_FILTER_SIZE: usize = 8;

/// Maximum number of hash functions a filter will use.
pub const MAX_HASH_FUNCTIONS: usize = 32;

/// Minimum number of hash functions.
pub const MIN_HASH_FUNCTIONS: usize = 1;

/// Calculate the optimal number of filter bits for `n` items at `fp_rate`.
///
/// # Errors
///
/// - [`AccessTrackError::InvalidItemCount`] if `n == 0`
/// - [`AccessTrackError::FalsePositiveRateOutOfBounds`] if `fp_rate` not in (0, 1)
/// - [`AccessTrackError::InvalidFilterSize`] if the result exceeds reasonable bounds
///
/// # Examples
///
/// ```
/// use accesstrack::core::params::optimal_bit_count;
///
/// let bits = optimal_bit_count(1000, 0.01).unwrap();
/// assert!(bits >= 9585 && bits <= 9586);
/// ```
pub fn optimal_bit_count(n: usize, fp_rate: f64) -> Result<usize> {
    if n == 0 {
        return Err(AccessTrackError::invalid_item_count(n));
    }

    if !(fp_rate > 0.0 && fp_rate < 1.0) {
        return Err(AccessTrackError::fp_rate_out_of_bounds(fp_rate));
    }

    let m = (-(n as f64) * fp_rate.ln() / LN2_SQUARED).ceil();

    if m > (usize::MAX / 2) as f64 {
        return Err(AccessTrackError::invalid_filter_size(usize::MAX));
    }

    Ok((m as usize).max(MIN_FILTER_SIZE))
}

/// Calculate the optimal number of hash functions for `m` bits and `n` items.
///
/// Clamped to [[`MIN_HASH_FUNCTIONS`], [`MAX_HASH_FUNCTIONS`]].
///
/// # Errors
///
/// - [`AccessTrackError::InvalidFilterSize`] if `m == 0`
/// - [`AccessTrackError::InvalidItemCount`] if `n == 0`
///
/// # Examples
///
/// ```
/// use accesstrack::core::params::optimal_hash_count;
///
/// assert_eq!(optimal_hash_count(9585, 1000).unwrap(), 7);
/// ```
pub fn optimal_hash_count(m: usize, n: usize) -> Result<usize> {
    if m == 0 {
        return Err(AccessTrackError::invalid_filter_size(m));
    }

    if n == 0 {
        return Err(AccessTrackError::invalid_item_count(n));
    }

    let k = ((m as f64 / n as f64) * LN_2).round() as usize;
    Ok(k.clamp(MIN_HASH_FUNCTIONS, MAX_HASH_FUNCTIONS))
}

/// Expected false positive rate after `n` insertions: `(1 - e^(-kn/m))^k`.
///
/// Returns `0.0` for an empty filter.
///
/// # Errors
///
/// - [`AccessTrackError::InvalidFilterSize`] if `m == 0`
/// - [`AccessTrackError::InvalidParameters`] if `k` is outside the supported range
pub fn expected_fp_rate(m: usize, n: usize, k: usize) -> Result<f64> {
    if m == 0 {
        return Err(AccessTrackError::invalid_filter_size(m));
    }

    if !(MIN_HASH_FUNCTIONS..=MAX_HASH_FUNCTIONS).contains(&k) {
        return Err(AccessTrackError::invalid_parameters(format!(
            "hash count {} must be in range [{}, {}]",
            k, MIN_HASH_FUNCTIONS, MAX_HASH_FUNCTIONS
        )));
    }

    if n == 0 {
        return Ok(0.0);
    }

    let prob_bit_one = 1.0 - (-(k as f64 * n as f64) / m as f64).exp();
    Ok(prob_bit_one.powf(k as f64).clamp(0.0, 1.0))
}

/// Additive sketch error margin: `max_error_value / max_ops`.
///
/// # Errors
///
/// - [`AccessTrackError::InvalidItemCount`] if `max_ops == 0`
/// - [`AccessTrackError::InvalidErrorMargin`] if the margin is zero or not finite
///
/// # Examples
///
/// ```
/// use accesstrack::core::params::sketch_error_margin;
///
/// let margin = sketch_error_margin(1, 1_000_000).unwrap();
/// assert!((margin - 1e-6).abs() < 1e-12);
/// ```
pub fn sketch_error_margin(max_error_value: u64, max_ops: usize) -> Result<f64> {
    if max_ops == 0 {
        return Err(AccessTrackError::invalid_item_count(max_ops));
    }

    let margin = max_error_value as f64 / max_ops as f64;
    if !(margin > 0.0 && margin.is_finite()) {
        return Err(AccessTrackError::invalid_error_margin(margin));
    }
    Ok(margin)
}

/// Counters per sketch row for an error margin: `⌊2 / margin⌋`, capped by
/// `max_width` unless it is `0`.
///
/// # Errors
///
/// - [`AccessTrackError::InvalidErrorMargin`] if `margin` is not positive and finite
/// - [`AccessTrackError::InvalidSketchDimensions`] if the width resolves to zero
///   or is uncapped and unreasonably large
///
/// # Examples
///
/// ```
/// use accesstrack::core::params::sketch_width;
///
/// assert_eq!(sketch_width(0.001, 0).unwrap(), 2000);
/// assert_eq!(sketch_width(0.001, 500).unwrap(), 500);
/// ```
pub fn sketch_width(margin: f64, max_width: usize) -> Result<usize> {
    if !(margin > 0.0 && margin.is_finite()) {
        return Err(AccessTrackError::invalid_error_margin(margin));
    }

    let raw = (2.0 / margin).floor();
    let width = if max_width > 0 {
        raw.min(max_width as f64) as usize
    } else if raw > (usize::MAX / 2) as f64 {
        return Err(AccessTrackError::invalid_sketch_dimensions(usize::MAX, 0));
    } else {
        raw as usize
    };

    if width == 0 {
        return Err(AccessTrackError::invalid_sketch_dimensions(width, 0));
    }
    Ok(width)
}

/// Sketch rows for a certainty: `⌈|ln(1 - certainty) / ln 2|⌉`, capped by
/// `max_depth` unless it is `0`.
///
/// # Errors
///
/// - [`AccessTrackError::CertaintyOutOfBounds`] if `certainty` not in (0, 1)
///
/// # Examples
///
/// ```
/// use accesstrack::core::params::sketch_depth;
///
/// assert_eq!(sketch_depth(0.99, 0).unwrap(), 7);
/// assert_eq!(sketch_depth(0.99, 4).unwrap(), 4);
/// ```
pub fn sketch_depth(certainty: f64, max_depth: usize) -> Result<usize> {
    if !(certainty > 0.0 && certainty < 1.0) {
        return Err(AccessTrackError::certainty_out_of_bounds(certainty));
    }

    let raw = ((1.0 - certainty).ln() / LN_2).abs().ceil().max(1.0) as usize;
    Ok(if max_depth > 0 { raw.min(max_depth) } else { raw })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED_BITS_1000_1PCT: usize = 9585;

    #[test]
    fn test_ln2_squared_constant() {
        assert!((LN2_SQUARED - 0.480_453_013_918_201_4).abs() < 1e-10);
    }

    #[test]
    fn test_optimal_bit_count_1_percent() {
        let m = optimal_bit_count(1000, 0.01).unwrap();
        assert!(m >= EXPECTED_BITS_1000_1PCT && m <= EXPECTED_BITS_1000_1PCT + 1);
    }

    #[test]
    fn test_optimal_bit_count_errors() {
        assert!(matches!(
            optimal_bit_count(0, 0.01),
            Err(AccessTrackError::InvalidItemCount { count: 0 })
        ));
        assert!(matches!(
            optimal_bit_count(1000, 0.0),
            Err(AccessTrackError::FalsePositiveRateOutOfBounds { .. })
        ));
        assert!(optimal_bit_count(1000, 1.0).is_err());
        assert!(optimal_bit_count(1000, -0.5).is_err());
        assert!(optimal_bit_count(1000, f64::NAN).is_err());
    }

    #[test]
    fn test_optimal_bit_count_minimum() {
        assert_eq!(optimal_bit_count(1, 0.9).unwrap(), MIN_FILTER_SIZE);
    }

    #[test]
    fn test_optimal_hash_count_standard_and_clamped() {
        assert_eq!(optimal_hash_count(9585, 1000).unwrap(), 7);
        assert_eq!(optimal_hash_count(1_000_000, 1).unwrap(), MAX_HASH_FUNCTIONS);
        assert_eq!(optimal_hash_count(10, 1000).unwrap(), MIN_HASH_FUNCTIONS);
        assert!(optimal_hash_count(0, 10).is_err());
        assert!(optimal_hash_count(10, 0).is_err());
    }

    #[test]
    fn test_expected_fp_rate_matches_target() {
        let m = optimal_bit_count(1000, 0.01).unwrap();
        let k = optimal_hash_count(m, 1000).unwrap();
        let fp = expected_fp_rate(m, 1000, k).unwrap();
        assert!((fp - 0.01).abs() < 0.002, "fp = {}", fp);
        assert_eq!(expected_fp_rate(m, 0, k).unwrap(), 0.0);
        assert!(expected_fp_rate(m, 10, 0).is_err());
    }

    #[test]
    fn test_sketch_error_margin() {
        assert!(matches!(
            sketch_error_margin(1, 0),
            Err(AccessTrackError::InvalidItemCount { count: 0 })
        ));
        assert!(matches!(
            sketch_error_margin(0, 100),
            Err(AccessTrackError::InvalidErrorMargin { .. })
        ));
        assert_eq!(sketch_error_margin(5, 100).unwrap(), 0.05);
    }

    #[test]
    fn test_sketch_width_caps() {
        assert_eq!(sketch_width(1e-6, 8_000_000).unwrap(), 2_000_000);
        assert_eq!(sketch_width(1e-7, 8_000_000).unwrap(), 8_000_000);
        assert_eq!(sketch_width(0.5, 0).unwrap(), 4);
        assert!(matches!(
            sketch_width(3.0, 0),
            Err(AccessTrackError::InvalidSketchDimensions { width: 0, .. })
        ));
        assert!(sketch_width(0.0, 10).is_err());
    }

    #[test]
    fn test_sketch_depth_caps() {
        assert_eq!(sketch_depth(0.5, 0).unwrap(), 1);
        assert_eq!(sketch_depth(0.99, 8).unwrap(), 7);
        assert_eq!(sketch_depth(0.999_999, 8).unwrap(), 8);
        assert_eq!(sketch_depth(0.1, 0).unwrap(), 1);
        assert!(sketch_depth(1.0, 8).is_err());
        assert!(sketch_depth(0.0, 8).is_err());
    }
}
