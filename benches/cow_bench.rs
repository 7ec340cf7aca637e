//! Copy-on-write cost profile: exclusive writes, shared writes, snapshot
//! acquisition, and the two scan paths.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snapvec::SnapVec;

fn bench_exclusive_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("exclusive_push_back");
    for size in [100u64, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let v = SnapVec::new();
                for n in 0..size {
                    v.push_back(black_box(n));
                }
                v
            });
        });
    }
    group.finish();
}

fn bench_shared_push(c: &mut Criterion) {
    // Worst case: a snapshot pins every buffer, so each push pays for a
    // full copy.
    let mut group = c.benchmark_group("shared_push_back");
    for size in [100u64, 1_000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let v = SnapVec::new();
                let mut pins = Vec::new();
                for n in 0..size {
                    pins.push(v.snapshot());
                    v.push_back(black_box(n));
                }
                pins
            });
        });
    }
    group.finish();
}

fn bench_snapshot_acquisition(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");
    for size in [0u64, 1_000, 100_000] {
        let v: SnapVec<u64> = (0..size).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &v, |b, v| {
            b.iter(|| v.snapshot());
        });
    }
    group.finish();
}

fn bench_scans(c: &mut Criterion) {
    let v: SnapVec<u64> = (0..10_000u64).collect();
    let mut group = c.benchmark_group("scan_10k");
    group.throughput(Throughput::Elements(10_000));
    group.bench_function("iter_cloning", |b| {
        b.iter(|| v.iter().sum::<u64>());
    });
    group.bench_function("snapshot_borrowing", |b| {
        b.iter(|| v.snapshot().iter().sum::<u64>());
    });
    group.finish();
}

fn bench_mixed_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_ops_1k");
    group.bench_function("push_remove_snapshot", |b| {
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        b.iter(|| {
            let v = SnapVec::new();
            let mut pin = None;
            for _ in 0..1_000 {
                match rng.gen_range(0..10) {
                    0 => v.push_front(rng.gen_range(0u8..8)),
                    1..=5 => v.push_back(rng.gen_range(0u8..8)),
                    6 => {
                        let needle = rng.gen_range(0u8..8);
                        v.remove_first(|&n| n == needle);
                    }
                    7 => {
                        let needle = rng.gen_range(0u8..8);
                        v.remove_all(|&n| n == needle);
                    }
                    8 => pin = Some(v.snapshot()),
                    _ => {
                        pin.take();
                    }
                }
            }
            v
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_exclusive_push,
    bench_shared_push,
    bench_snapshot_acquisition,
    bench_scans,
    bench_mixed_ops
);
criterion_main!(benches);
