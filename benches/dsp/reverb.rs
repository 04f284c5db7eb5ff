//! Benchmarks for the stereo reverb.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use howl_dsp::dsp::reverb::StereoReverb;

use crate::BLOCK_SIZES;

pub fn bench_reverb(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/reverb");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.01).sin()).collect();
        let mut left = vec![0.0; size];
        let mut right = vec![0.0; size];

        let mut reverb = StereoReverb::new(48_000.0, 0.75, 16_000.0);
        group.bench_with_input(BenchmarkId::new("room", size), &size, |b, _| {
            b.iter(|| reverb.process_buffer(black_box(&input), &mut left, &mut right))
        });

        let mut reverb = StereoReverb::new(48_000.0, 0.95, 4_000.0);
        group.bench_with_input(BenchmarkId::new("long_dark", size), &size, |b, _| {
            b.iter(|| reverb.process_buffer(black_box(&input), &mut left, &mut right))
        });
    }

    group.finish();
}
