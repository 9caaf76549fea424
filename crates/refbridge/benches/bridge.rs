//! Bridge overhead benchmarks
//!
//! Measures the cost the typed layer adds on top of raw foreign calls:
//! - Wrapping and releasing references
//! - Checked casts (hit and miss)
//! - Snapshot traversal of arrays
//! - Hashing wrappers into Rust collections

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use refbridge::settings::{self, BridgeSettings};
use refbridge::{Array, ForeignObject, ForeignString, ForeignType, MutableArray, Number};
use std::collections::HashSet;

fn quiet() {
    settings::apply(BridgeSettings {
        audit_ownership: false,
        trace_refcounts: false,
        cast_failure_level: None,
    });
}

fn numbers(count: i64) -> MutableArray {
    let mut array = MutableArray::with_capacity(count as usize).unwrap();
    for i in 0..count {
        array.push(&Number::from_i64(i).unwrap()).unwrap();
    }
    array
}

// ============================================================================
// Ownership
// ============================================================================

fn bench_clone_drop(c: &mut Criterion) {
    quiet();
    let number = Number::from_i64(1).unwrap();
    c.bench_function("clone_drop", |b| b.iter(|| black_box(number.clone())));
}

fn bench_retain_and_wrap(c: &mut Criterion) {
    quiet();
    let number = Number::from_i64(1).unwrap();
    let raw = number.as_raw();
    c.bench_function("retain_and_wrap_checked", |b| {
        b.iter(|| black_box(unsafe { Number::retain_and_wrap(black_box(raw)) }))
    });
}

// ============================================================================
// Casts
// ============================================================================

fn bench_cast(c: &mut Criterion) {
    quiet();
    let object = Number::from_i64(1).unwrap().into_object();
    let mut group = c.benchmark_group("cast");
    group.bench_function("hit", |b| b.iter(|| black_box(object.cast::<Number>())));
    group.bench_function("miss", |b| b.iter(|| black_box(object.cast::<ForeignString>())));
    group.bench_function("refined_miss", |b| {
        b.iter(|| black_box(object.cast::<MutableArray>()))
    });
    group.finish();
}

// ============================================================================
// Traversal
// ============================================================================

fn bench_traversal(c: &mut Criterion) {
    quiet();
    let mut group = c.benchmark_group("traversal");
    for size in [10i64, 100, 1000] {
        let array: Array = numbers(size).into();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("iter", size), &array, |b, array| {
            b.iter(|| array.iter().count())
        });
        group.bench_with_input(BenchmarkId::new("of_type", size), &array, |b, array| {
            b.iter(|| array.iter().of_type::<Number>().count())
        });
        group.bench_with_input(BenchmarkId::new("indexed", size), &array, |b, array| {
            b.iter(|| (0..array.len()).filter_map(|i| array.get(i)).count())
        });
    }
    group.finish();
}

fn bench_hash_set(c: &mut Criterion) {
    quiet();
    let array: Array = numbers(1000).into();
    c.bench_function("hash_set_insert_1k", |b| {
        b.iter(|| array.iter().collect::<HashSet<ForeignObject>>().len())
    });
}

criterion_group!(
    benches,
    bench_clone_drop,
    bench_retain_and_wrap,
    bench_cast,
    bench_traversal,
    bench_hash_set
);
criterion_main!(benches);
