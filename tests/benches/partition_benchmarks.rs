//! # ipshard Benchmarks
//!
//! | Stage | Expectation |
//! |-------|-------------|
//! | Address hashing | scalar and batch agree, batch scales with cores |
//! | Exclusion subtraction | logarithmic in exclusion count |
//! | Fully excluded chunks | constant time, no enumeration |
//! | End-to-end shard run | linear in non-excluded addresses |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ipshard_compute::{auto_detect, hash_ip, hash_string};
use ipshard_partition::{
    build_exclusions, exclusions_from_ranges, parse_entries, subtract, AddressRange,
    ExclusionSet, PartitionConfigBuilder, PartitionEngine, ShardSpec,
};
use rand::Rng;
use std::time::Duration;

// ============================================================================
// Hashing
// ============================================================================

fn bench_hashing(c: &mut Criterion) {
    let mut group = c.benchmark_group("hashing");

    group.bench_function("hash_ip_single", |b| {
        b.iter(|| black_box(hash_ip(black_box(0x0A00_0001), 1)))
    });
    group.bench_function("hash_string_single", |b| {
        b.iter(|| black_box(hash_string(black_box("example.com"), 1)))
    });

    let Ok(engine) = auto_detect() else {
        group.finish();
        return;
    };
    for size in [1_000u32, 100_000, 1_000_000] {
        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(BenchmarkId::new("scalar", size), &size, |b, &size| {
            b.iter(|| (0..size).map(|ip| hash_ip(ip, 1)).fold(0u32, u32::wrapping_add))
        });
        group.bench_with_input(BenchmarkId::new("batch", size), &size, |b, &size| {
            b.iter(|| black_box(engine.batch_hash_ip(0, size - 1, 1)))
        });
    }

    group.finish();
}

// ============================================================================
// Exclusion subtraction
// ============================================================================

fn bench_subtraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("subtraction");
    let mut rng = rand::thread_rng();

    for count in [10usize, 1_000, 100_000] {
        let ranges: Vec<AddressRange> = (0..count)
            .filter_map(|_| {
                let start: u32 = rng.gen_range(0..u32::MAX - 1_000);
                AddressRange::new(start, start + rng.gen_range(0..1_000))
            })
            .collect();
        let exclusions = exclusions_from_ranges(ranges);
        let chunk = AddressRange::new(0x0A00_0000, 0x0A00_0000 + 25_000_000)
            .unwrap_or_else(AddressRange::full);

        group.bench_with_input(BenchmarkId::new("chunk", count), &exclusions, |b, set| {
            b.iter(|| black_box(subtract(&chunk, set)))
        });
    }

    group.finish();
}

// ============================================================================
// End-to-end runs
// ============================================================================

fn engine() -> Option<PartitionEngine> {
    let config = PartitionConfigBuilder::new().build().ok()?;
    PartitionEngine::new(config).ok()
}

fn bench_shard_run(c: &mut Criterion) {
    let Some(engine) = engine() else {
        return;
    };
    let mut group = c.benchmark_group("shard_run");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);

    let Ok(shard) = ShardSpec::parse("1/4") else {
        return;
    };

    let slash16 = parse_entries(["10.0.0.0/16"]);
    let none = ExclusionSet::empty();
    group.throughput(Throughput::Elements(slash16.address_count()));
    group.bench_function("slash16_no_exclusions", |b| {
        b.iter(|| black_box(engine.run(&slash16, &none, shard, 1)))
    });

    let everything = parse_entries(["0.0.0.0/0"]);
    let all_excluded = build_exclusions(["0.0.0.0/1", "128.0.0.0/1"]);
    group.bench_function("full_space_fully_excluded", |b| {
        b.iter(|| black_box(engine.run(&everything, &all_excluded, shard, 1)))
    });

    group.finish();
}

criterion_group!(benches, bench_hashing, bench_subtraction, bench_shard_run);
criterion_main!(benches);
