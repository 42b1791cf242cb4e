//! Benchmarks for CIDR canonicalization and set versioning.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rangewarden::cidr::{canonicalize, MAX_CIDRS_PER_SET};
use rangewarden::version::version_for_set;
use std::hint::black_box;

/// Generate IPv4 CIDRs of varying sizes, reversed and with duplicates
fn generate_raw_cidrs(count: usize) -> Vec<String> {
    let mut raw: Vec<String> = (0..count)
        .map(|i| {
            let a = 1 + (i % 200) as u8;
            let b = ((i / 200) % 256) as u8;
            let prefix = 16 + (i % 17) as u8; // Prefix lengths 16-32
            format!("{}.{}.0.0/{}", a, b, prefix)
        })
        .collect();
    raw.reverse();
    raw.extend(raw.clone().into_iter().take(count / 10));
    raw
}

/// Mixed IPv4/IPv6 input shaped like a real provider feed
fn generate_mixed(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            if i % 3 == 0 {
                format!("2001:db8:{:x}::/48", i)
            } else {
                format!("20.{}.{}.0/28", (i / 256) % 256, i % 256 & 0xf0)
            }
        })
        .collect()
}

fn bench_canonicalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonicalize");

    for size in [10, 100, 1000, 3500] {
        let raw = generate_raw_cidrs(size);
        group.bench_with_input(BenchmarkId::new("ipv4", size), &raw, |b, raw| {
            b.iter(|| canonicalize(black_box(raw)))
        });

        let mixed = generate_mixed(size);
        group.bench_with_input(BenchmarkId::new("mixed", size), &mixed, |b, mixed| {
            b.iter(|| canonicalize(black_box(mixed)))
        });
    }

    group.finish();
}

fn bench_version(c: &mut Criterion) {
    let mut group = c.benchmark_group("version_for_set");

    for size in [10, 1000, MAX_CIDRS_PER_SET] {
        let cidrs: Vec<String> = (0..size)
            .map(|i| format!("10.{}.{}.0/24", i / 256, i % 256))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &cidrs, |b, cidrs| {
            b.iter(|| {
                version_for_set(
                    black_box("2025-06-01"),
                    black_box(cidrs),
                    Some("2025-05-30T12:00:00Z"),
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_canonicalize, bench_version);
criterion_main!(benches);
