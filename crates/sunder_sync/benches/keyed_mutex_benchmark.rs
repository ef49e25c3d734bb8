//! # Keyed Mutex Benchmark
//!
//! Measures the cost of the lock table step and an uncontended guarded run.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sunder_sync::KeyedMutex;

fn bench_uncontended_run(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let sync: KeyedMutex<&'static str> = KeyedMutex::new();

    c.bench_function("run_exclusive_uncontended", |b| {
        b.iter(|| {
            rt.block_on(async {
                let v = sync.run_exclusive("hot_key", || async { 1_u64 }).await;
                black_box(v);
            });
        });
    });
}

fn bench_fresh_keys(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");

    c.bench_function("run_exclusive_fresh_key", |b| {
        let mut i: u64 = 0;
        let sync: KeyedMutex<u64> = KeyedMutex::new();
        b.iter(|| {
            i += 1;
            rt.block_on(async {
                let v = sync.run_exclusive(i, || async { i }).await;
                black_box(v);
            });
        });
    });
}

criterion_group!(benches, bench_uncontended_run, bench_fresh_keys);
criterion_main!(benches);
