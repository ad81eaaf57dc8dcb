//! Criterion micro-benchmarks for container push, access, insert, and drain
//! paths, with `Vec` and `SmallVec` as baselines.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use holdall::DynArray;
use holdall_bench::{access_pattern, seeded_array};
use holdall_test_utils::seed_values;
use smallvec::SmallVec;

const LEN: usize = 10_000;
const SEED: u64 = 42;

fn bench_push_growth(c: &mut Criterion) {
    let values = seed_values(SEED, LEN);
    let mut group = c.benchmark_group("push_growth");

    group.bench_function("dynarray", |b| {
        b.iter(|| {
            let mut arr = DynArray::new();
            for &v in &values {
                arr.push(v);
            }
            black_box(arr.len())
        })
    });
    group.bench_function("vec", |b| {
        b.iter(|| {
            let mut v = Vec::new();
            for &x in &values {
                v.push(x);
            }
            black_box(v.len())
        })
    });
    group.bench_function("smallvec", |b| {
        b.iter(|| {
            let mut v: SmallVec<[u64; 8]> = SmallVec::new();
            for &x in &values {
                v.push(x);
            }
            black_box(v.len())
        })
    });
    group.finish();
}

fn bench_push_reserved(c: &mut Criterion) {
    let values = seed_values(SEED, LEN);
    let mut group = c.benchmark_group("push_reserved");

    group.bench_function("dynarray", |b| {
        b.iter(|| {
            let mut arr = DynArray::with_capacity(LEN);
            for &v in &values {
                arr.push(v);
            }
            black_box(arr.len())
        })
    });
    group.bench_function("vec", |b| {
        b.iter(|| {
            let mut v = Vec::with_capacity(LEN);
            for &x in &values {
                v.push(x);
            }
            black_box(v.len())
        })
    });
    group.finish();
}

fn bench_random_access(c: &mut Criterion) {
    let arr = seeded_array(SEED, LEN);
    let vec: Vec<u64> = arr.iter().copied().collect();
    let pattern = access_pattern(SEED ^ 1, LEN, LEN);
    let mut group = c.benchmark_group("random_access");

    group.bench_function("dynarray_indexed", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for &i in &pattern {
                sum = sum.wrapping_add(arr[i]);
            }
            black_box(sum)
        })
    });
    group.bench_function("dynarray_checked", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for &i in &pattern {
                sum = sum.wrapping_add(*arr.get(i).unwrap());
            }
            black_box(sum)
        })
    });
    group.bench_function("vec_indexed", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for &i in &pattern {
                sum = sum.wrapping_add(vec[i]);
            }
            black_box(sum)
        })
    });
    group.finish();
}

fn bench_mid_insert_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("mid_insert_remove");

    group.bench_function("dynarray", |b| {
        b.iter(|| {
            let mut arr = seeded_array(SEED, 1024);
            for _ in 0..64 {
                arr.insert(arr.len() / 2, 0);
                arr.remove(arr.len() / 2);
            }
            black_box(arr.len())
        })
    });
    group.bench_function("vec", |b| {
        b.iter(|| {
            let mut v: Vec<u64> = seed_values(SEED, 1024);
            for _ in 0..64 {
                v.insert(v.len() / 2, 0);
                v.remove(v.len() / 2);
            }
            black_box(v.len())
        })
    });
    group.finish();
}

fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain");

    group.bench_function("dynarray_drain_middle", |b| {
        b.iter(|| {
            let mut arr = seeded_array(SEED, 4096);
            arr.drain(1024..3072);
            black_box(arr.len())
        })
    });
    group.bench_function("vec_drain_middle", |b| {
        b.iter(|| {
            let mut v: Vec<u64> = seed_values(SEED, 4096);
            v.drain(1024..3072);
            black_box(v.len())
        })
    });
    group.finish();
}

fn bench_iterate_sum(c: &mut Criterion) {
    let arr = seeded_array(SEED, LEN);
    let vec: Vec<u64> = arr.iter().copied().collect();
    let mut group = c.benchmark_group("iterate_sum");

    group.bench_function("dynarray", |b| {
        b.iter(|| black_box(arr.iter().fold(0u64, |a, &v| a.wrapping_add(v))))
    });
    group.bench_function("vec", |b| {
        b.iter(|| black_box(vec.iter().fold(0u64, |a, &v| a.wrapping_add(v))))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_push_growth,
    bench_push_reserved,
    bench_random_access,
    bench_mid_insert_remove,
    bench_drain,
    bench_iterate_sum
);
criterion_main!(benches);
