//! Pooled acquisition versus fresh allocation.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use scratch_pool::{BytePool, StringPool};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

const SCRATCH_SIZE: usize = 32 * 1024;

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");

    group.bench_function("vec_fresh", |b| {
        b.iter(|| {
            let buf = vec![0u8; SCRATCH_SIZE];
            black_box(buf);
        });
    });

    let bytes = BytePool::new();
    bytes.warm(4, SCRATCH_SIZE);
    group.bench_function("vec_pooled", |b| {
        b.iter(|| {
            let buf = bytes.get(SCRATCH_SIZE);
            bytes.put(black_box(buf));
        });
    });

    group.bench_function("vec_pooled_with", |b| {
        b.iter(|| black_box(bytes.with(64, |buf| buf.fill(7))));
    });

    let strings = StringPool::new();
    group.bench_function("string_pooled_with", |b| {
        b.iter(|| {
            black_box(strings.with_empty(64, |s| {
                s.push_str("key:");
                s.push_str("value");
            }))
        });
    });

    group.finish();
}
