//! Property tests for the backends and the tracker.

use accesstrack::core::AccessCounter;
use accesstrack::counters::{BloomCounter, CountMinSketch};
use accesstrack::hash::XxHasher;
use accesstrack::ticker::ManualTicker;
use accesstrack::{AccessTracker, AccessTrackerConfig};
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sketch_never_underestimates(keys in prop::collection::vec(0u64..64, 0..500)) {
        let mut sketch = CountMinSketch::<u32>::with_dimensions(32, 3).unwrap();
        let mut truth: HashMap<u64, u32> = HashMap::new();
        for &key in &keys {
            sketch.increment(key);
            *truth.entry(key).or_default() += 1;
        }
        for (key, count) in truth {
            prop_assert!(sketch.estimate(key) >= f64::from(count));
        }
    }

    #[test]
    fn filter_has_no_false_negatives(keys in prop::collection::hash_set(any::<u64>(), 1..300)) {
        let mut filter = BloomCounter::new(300, 0.01).unwrap();
        for &key in &keys {
            filter.increment(key);
        }
        for &key in &keys {
            prop_assert_eq!(filter.estimate(key), 1.0);
        }
    }

    #[test]
    fn features_have_one_entry_per_bucket(
        num_buckets in 1usize..12,
        key in prop::collection::vec(any::<u8>(), 0..32),
        tick in 0u64..1_000,
    ) {
        let ticker = Arc::new(ManualTicker::new(tick));
        let tracker = AccessTracker::<u16>::new(AccessTrackerConfig {
            num_buckets,
            num_ticks_per_bucket: 1,
            max_num_ops_per_bucket: 100,
            ticker,
            ..AccessTrackerConfig::default()
        }).unwrap();

        let before = tracker.record_and_populate_access_features(&key);
        prop_assert_eq!(before, vec![0.0; num_buckets]);

        let after = tracker.get_accesses(&key);
        prop_assert_eq!(after.len(), num_buckets);
        prop_assert!(after[0] >= 1.0);
        prop_assert_eq!(tracker.get_rotated_access_counts().iter().sum::<u64>(), 1);
    }

    #[test]
    fn key_hash_is_deterministic(key in prop::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(XxHasher::new().hash_bytes(&key), XxHasher::default().hash_bytes(&key));
    }
}
