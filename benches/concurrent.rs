//! Concurrent operations benchmarks.
//!
//! Measures record and query throughput on one shared tracker across
//! thread counts, with and without rotation.

use accesstrack::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::thread;

const OPS_PER_THREAD: usize = 10_000;

fn shared_tracker(ticker: Arc<ManualTicker>) -> Arc<AccessTracker> {
    Arc::new(
        AccessTrackerBuilder::new()
            .num_buckets(6)
            .ticks_per_bucket(1)
            .max_ops_per_bucket(OPS_PER_THREAD * 8)
            .ticker(ticker)
            .build()
            .unwrap(),
    )
}

/// Benchmark concurrent records with different thread counts.
fn bench_concurrent_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_records");

    for &threads in &[1usize, 2, 4, 8] {
        group.throughput(Throughput::Elements((OPS_PER_THREAD * threads) as u64));

        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            b.iter_batched(
                || shared_tracker(Arc::new(ManualTicker::new(0))),
                |tracker| {
                    let handles: Vec<_> = (0..threads)
                        .map(|t| {
                            let tracker = Arc::clone(&tracker);
                            thread::spawn(move || {
                                let start = (t * OPS_PER_THREAD) as u64;
                                for i in start..start + OPS_PER_THREAD as u64 {
                                    tracker.record_access(black_box(i.to_le_bytes()));
                                }
                            })
                        })
                        .collect();
                    for handle in handles {
                        handle.join().unwrap();
                    }
                    black_box(tracker)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

/// Benchmark mixed query-then-record traffic while time advances.
fn bench_concurrent_populate_with_rotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_populate_rotating");

    for &threads in &[2usize, 4, 8] {
        group.throughput(Throughput::Elements((OPS_PER_THREAD * threads) as u64));

        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            b.iter_batched(
                || {
                    let ticker = Arc::new(ManualTicker::new(0));
                    (shared_tracker(Arc::clone(&ticker)), ticker)
                },
                |(tracker, ticker)| {
                    let handles: Vec<_> = (0..threads)
                        .map(|t| {
                            let tracker = Arc::clone(&tracker);
                            let ticker = Arc::clone(&ticker);
                            thread::spawn(move || {
                                for i in 0..OPS_PER_THREAD as u64 {
                                    if t == 0 && i % 1_000 == 0 {
                                        ticker.advance(1);
                                    }
                                    black_box(tracker.record_and_populate_access_features((i % 512).to_le_bytes()));
                                }
                            })
                        })
                        .collect();
                    for handle in handles {
                        handle.join().unwrap();
                    }
                    black_box(tracker)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_concurrent_records, bench_concurrent_populate_with_rotation);
criterion_main!(benches);
