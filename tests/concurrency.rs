//! Multi-threaded use of a shared tracker.

use accesstrack::ticker::ManualTicker;
use accesstrack::{AccessTracker, AccessTracker16, AccessTrackerConfig};
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;
const OPS_PER_THREAD: usize = 2_000;

fn config(num_buckets: usize, use_counts: bool, ticker: &Arc<ManualTicker>) -> AccessTrackerConfig {
    AccessTrackerConfig {
        num_buckets,
        num_ticks_per_bucket: 1,
        use_counts,
        max_num_ops_per_bucket: THREADS * OPS_PER_THREAD,
        ticker: ticker.clone(),
        ..AccessTrackerConfig::default()
    }
}

#[test]
fn test_single_bucket_loses_no_records() {
    for use_counts in [true, false] {
        let ticker = Arc::new(ManualTicker::new(0));
        let tracker = Arc::new(AccessTracker::<u32>::new(config(1, use_counts, &ticker)).unwrap());
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let tracker = Arc::clone(&tracker);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..OPS_PER_THREAD {
                        tracker.record_access(format!("t{t}-k{i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(
            tracker.get_rotated_access_counts(),
            vec![(THREADS * OPS_PER_THREAD) as u64],
            "use_counts = {}",
            use_counts
        );
    }
}

#[test]
fn test_shared_hot_key_is_fully_counted() {
    let ticker = Arc::new(ManualTicker::new(0));
    let tracker = Arc::new(AccessTracker::<u32>::new(config(3, true, &ticker)).unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let tracker = Arc::clone(&tracker);
            thread::spawn(move || {
                for _ in 0..OPS_PER_THREAD {
                    tracker.record_access("hot");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(tracker.get_accesses("hot")[0] >= (THREADS * OPS_PER_THREAD) as f64);
}

#[test]
fn test_concurrent_readers_and_writers() {
    let ticker = Arc::new(ManualTicker::new(0));
    let tracker = Arc::new(AccessTracker16::new(config(4, true, &ticker)).unwrap());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let tracker = Arc::clone(&tracker);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..OPS_PER_THREAD {
                    if t % 2 == 0 {
                        tracker.record_access(format!("k{}", i % 64));
                    } else {
                        let features = tracker.record_and_populate_access_features(format!("k{}", i % 64));
                        assert_eq!(features.len(), 4);
                        assert!(features.iter().all(|&f| f >= 0.0));
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(
        tracker.get_rotated_access_counts().iter().sum::<u64>(),
        (THREADS * OPS_PER_THREAD) as u64
    );
}

#[test]
fn test_racing_rotation_keeps_history() {
    // Every thread sees the tick move and races to rotate into bucket 1.
    let ticker = Arc::new(ManualTicker::new(0));
    let tracker = Arc::new(AccessTracker::<u32>::new(config(4, true, &ticker)).unwrap());
    tracker.record_access("before");
    ticker.set(1);

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let tracker = Arc::clone(&tracker);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                tracker.get_accesses("before")
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), vec![0.0, 1.0, 0.0, 0.0]);
    }

    assert_eq!(tracker.get_rotated_access_counts(), vec![0, 1, 0, 0]);
}
