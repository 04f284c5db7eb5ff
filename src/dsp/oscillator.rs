use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorWaveform {
    Sine,
    Saw,
}

/// Phase-accumulator oscillator. Phase lives in [0, 1).
pub struct OscillatorBlock {
    waveform: OscillatorWaveform,
    phase: f32,
}

impl OscillatorBlock {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorWaveform::Sine)
    }

    pub fn sawtooth() -> Self {
        Self::new(OscillatorWaveform::Saw)
    }

    #[inline]
    pub fn next_sample(&mut self, increment: f32) -> f32 {
        let t = self.phase;
        let sample = match self.waveform {
            OscillatorWaveform::Sine => (TAU * t).sin(),
            // Naive saw minus a polyBLEP residual at the wrap
            OscillatorWaveform::Saw => 2.0 * t - 1.0 - poly_blep(t, increment),
        };

        self.phase += increment;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        sample
    }

    /// Fill `out` at `frequency` Hz.
    pub fn render(&mut self, out: &mut [f32], frequency: f32, sample_rate: f32) {
        let increment = (frequency / sample_rate.max(1.0)).clamp(0.0, 0.5);
        for sample in out.iter_mut() {
            *sample = self.next_sample(increment);
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

#[inline]
fn poly_blep(t: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        0.0
    } else if t < dt {
        let t = t / dt;
        t + t - t * t - 1.0
    } else if t > 1.0 - dt {
        let t = (t - 1.0) / dt;
        t * t + t + t + 1.0
    } else {
        0.0
    }
}
