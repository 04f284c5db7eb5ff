//! Benchmarks for the RMS balancer.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use howl_dsp::dsp::balance::Balancer;

use crate::BLOCK_SIZES;

pub fn bench_balance(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/balance");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.05).sin() * 0.1).collect();
        let comparator: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let mut out = vec![0.0; size];
        let mut balancer = Balancer::new(48_000.0, 10.0);

        group.bench_with_input(BenchmarkId::new("follow", size), &size, |b, _| {
            b.iter(|| balancer.process(black_box(&input), black_box(&comparator), &mut out))
        });
    }

    group.finish();
}
