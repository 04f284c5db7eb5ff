//! Benchmarks for the formant band-pass filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use howl_dsp::dsp::filter::SVFilter;

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        // One formant band of an open /a/
        let mut filter = SVFilter::formant(800.0, 80.0, 48_000.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("formant", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer));
            })
        });

        // Three bands in parallel, as one voice runs them
        let mut bands = [
            SVFilter::formant(800.0, 80.0, 48_000.0),
            SVFilter::formant(1150.0, 90.0, 48_000.0),
            SVFilter::formant(2900.0, 120.0, 48_000.0),
        ];
        let mut out = vec![0.0; size];
        group.bench_with_input(BenchmarkId::new("voice_bank", size), &size, |b, _| {
            b.iter(|| {
                for (o, &x) in out.iter_mut().zip(black_box(&input).iter()) {
                    *o = bands.iter_mut().map(|band| band.process(x)).sum();
                }
            })
        });
    }

    group.finish();
}
