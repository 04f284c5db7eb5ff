//! Benchmarks for the buffer mixing helpers.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use howl_dsp::dsp::mix::{mix, scale, sum_in_place};

use crate::BLOCK_SIZES;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &size in BLOCK_SIZES {
        let dry: Vec<f32> = (0..size).map(|i| (i as f32 * 0.01).sin()).collect();
        let wet: Vec<f32> = (0..size).map(|i| (i as f32 * 0.03).cos()).collect();
        let mut out = vec![0.0; size];

        group.bench_with_input(BenchmarkId::new("dry_wet", size), &size, |b, _| {
            b.iter(|| mix(black_box(&dry), black_box(&wet), black_box(0.35), &mut out))
        });

        // Four voices summed into one bus, as the master chain does
        let mut acc = vec![0.0; size];
        group.bench_with_input(BenchmarkId::new("sum_4_voices", size), &size, |b, _| {
            b.iter(|| {
                acc.fill(0.0);
                for _ in 0..4 {
                    sum_in_place(&mut acc, black_box(&dry));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("scale", size), &size, |b, _| {
            b.iter(|| scale(black_box(&dry), black_box(0.8), &mut out))
        });
    }

    group.finish();
}
