//! One touch event through the control pipeline: centroid, polar mapping
//! and four phoneme lookups.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use howl_dsp::control::{
    Bounds, Dispatcher, Location, TouchEvent, TouchPhase, TouchPoint, VoiceSet,
};
use howl_dsp::graph::{Formant, Phoneme};

fn lookup(location: Location) -> Phoneme {
    let open = Phoneme::new([
        Formant::new(800.0, 80.0, 1.0),
        Formant::new(1150.0, 90.0, 0.5),
        Formant::new(2900.0, 120.0, 0.25),
    ]);
    Phoneme::neutral().lerp(&open, location.x)
}

pub fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/dispatch");

    for &fingers in &[1usize, 2, 5, 10] {
        let touches: Vec<TouchPoint> = (0..fingers)
            .map(|i| {
                let t = i as f32 / fingers as f32;
                let (x, y) = (100.0 + 600.0 * t, 50.0 + 400.0 * t);
                TouchPoint::new(i as u64, x, y, TouchPhase::Moved)
            })
            .collect();

        let mut dispatcher = Dispatcher::new(VoiceSet::splat(lookup))
            .with_bounds(Bounds::new(0.0, 0.0, 800.0, 600.0));

        group.bench_with_input(BenchmarkId::new("moved", fingers), &fingers, |b, _| {
            b.iter(|| dispatcher.handle(TouchEvent::Moved, black_box(touches.as_slice())))
        });
    }

    group.finish();
}
