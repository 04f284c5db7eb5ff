//! The full master chain: driver, four formant voices, balance, crush,
//! reverb and the output gain.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use howl_dsp::graph::{FormantVoice, OscNode, Phoneme, SignalGraph};
use howl_dsp::MasterConfig;

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

fn choir() -> SignalGraph {
    let voices: Vec<FormantVoice> = [392.0, 329.63, 261.63, 130.81]
        .iter()
        .map(|&pitch| FormantVoice::new(pitch, Phoneme::neutral(), SAMPLE_RATE))
        .collect();

    SignalGraph::new(
        OscNode::sawtooth(110.0),
        voices,
        &MasterConfig::default(),
        SAMPLE_RATE,
    )
    .expect("four voices")
}

pub fn bench_master(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/master");

    for &size in BLOCK_SIZES {
        let mut left = vec![0.0; size];
        let mut right = vec![0.0; size];

        let mut graph = choir();
        graph.params().unmute();
        group.bench_with_input(BenchmarkId::new("dry", size), &size, |b, _| {
            b.iter(|| graph.render(black_box(&mut left), black_box(&mut right)))
        });

        let mut graph = choir();
        let params = graph.params();
        params.unmute();
        params.bitcrush_mix.set(0.5);
        params.reverb_mix.set(0.5);
        group.bench_with_input(BenchmarkId::new("crushed_reverb", size), &size, |b, _| {
            b.iter(|| graph.render(black_box(&mut left), black_box(&mut right)))
        });

        // Stereo device buffer
        let mut graph = choir();
        graph.params().unmute();
        let mut data = vec![0.0; size * 2];
        group.bench_with_input(BenchmarkId::new("interleaved", size), &size, |b, _| {
            b.iter(|| graph.render_interleaved(black_box(&mut data), 2))
        });
    }

    group.finish();
}
