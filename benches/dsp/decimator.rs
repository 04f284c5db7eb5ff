//! Benchmarks for the bit crusher.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use howl_dsp::dsp::decimator::Decimator;

use crate::BLOCK_SIZES;

pub fn bench_decimator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/decimator");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.02).sin()).collect();
        let mut out = vec![0.0; size];

        // The master chain setting
        let mut crusher = Decimator::new(48_000.0, 24, 4_000.0);
        group.bench_with_input(BenchmarkId::new("24bit_4khz", size), &size, |b, _| {
            b.iter(|| crusher.process_buffer(black_box(&input), &mut out))
        });

        let mut crusher = Decimator::new(48_000.0, 4, 8_000.0);
        group.bench_with_input(BenchmarkId::new("4bit_8khz", size), &size, |b, _| {
            b.iter(|| crusher.process_buffer(black_box(&input), &mut out))
        });
    }

    group.finish();
}
