//! Balance - Sidechain Level Matching
//!
//! A balancer rescales one signal so its RMS level follows the RMS level of a
//! second, "comparator" signal. The comparator's loudness becomes the
//! envelope of the output, while the output's timbre stays that of the input.
//!
//! ```text
//!   input ──────────┬──────────────────────────►(×)──► output
//!                   │                             ▲
//!                   └─► [RMS follower] ── q       │ gain = √(r / q)
//!                                          ╲      │
//!                                           ►─────┘
//!                                          ╱
//!   comparator ─────► [RMS follower] ── r
//! ```
//!
//! # RMS Followers
//!
//! Each follower is a one-pole lowpass applied to the squared signal:
//!
//! ```text
//! b  = 2 - cos(2π · half_power_hz / sample_rate)
//! c2 = b - √(b² - 1)
//! c1 = 1 - c2
//!
//! q[n] = c1 · x[n]² + c2 · q[n-1]
//! ```
//!
//! With a 10 Hz half-power point the followers track syllable-rate loudness
//! changes but ignore individual waveform cycles.
//!
//! # Gain Update
//!
//! The gain is recomputed once per block and ramped linearly across the
//! block from the previous value, so a sudden change of the comparator level
//! (for example a mute) fades instead of clicking. When the input is silent
//! (`q == 0`) the gain falls back to `√r`.
//!
//! A follower that decays below `POWER_FLOOR` is flushed to exactly zero.
//! Without the flush a silent input leaves `q` stuck in the subnormal range,
//! `r / q` explodes and the next sound starts from an enormous gain. The
//! target gain is also capped at `MAX_GAIN`, which bounds the boost of a
//! fading input.

/// Follower power treated as silence
const POWER_FLOOR: f32 = 1e-12;
/// Largest gain the balancer will apply (+12 dB)
pub const MAX_GAIN: f32 = 4.0;

/// Two RMS followers and the block-rate gain derived from them.
pub struct Balancer {
    c1: f32,
    c2: f32,
    input_power: f32,
    comparator_power: f32,
    gain: f32,
}

impl Balancer {
    pub fn new(sample_rate: f32, half_power_hz: f32) -> Self {
        let (c1, c2) = coefficients(sample_rate, half_power_hz);
        Self {
            c1,
            c2,
            input_power: 0.0,
            comparator_power: 0.0,
            gain: 0.0,
        }
    }

    /// Rescale `input` to the level of `comparator`, writing into `out`.
    pub fn process(&mut self, input: &[f32], comparator: &[f32], out: &mut [f32]) {
        debug_assert_eq!(input.len(), comparator.len());
        debug_assert_eq!(input.len(), out.len());

        if input.is_empty() {
            return;
        }

        for (&x, &c) in input.iter().zip(comparator.iter()) {
            self.input_power = self.c1 * x * x + self.c2 * self.input_power;
            self.comparator_power = self.c1 * c * c + self.c2 * self.comparator_power;
        }

        flush(&mut self.input_power);
        flush(&mut self.comparator_power);

        let target = if self.input_power > 0.0 {
            (self.comparator_power / self.input_power).sqrt()
        } else {
            self.comparator_power.sqrt()
        };
        let target = if target.is_finite() {
            target.min(MAX_GAIN)
        } else {
            0.0
        };

        // Ramp from last block's gain so level changes don't click
        let step = (target - self.gain) / input.len() as f32;
        let mut gain = self.gain;
        for (o, &x) in out.iter_mut().zip(input.iter()) {
            gain += step;
            *o = x * gain;
        }

        self.gain = target;
    }

    /// The gain reached at the end of the last block.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn reset(&mut self) {
        self.input_power = 0.0;
        self.comparator_power = 0.0;
        self.gain = 0.0;
    }
}

#[inline]
fn flush(power: &mut f32) {
    if *power < POWER_FLOOR {
        *power = 0.0;
    }
}

fn coefficients(sample_rate: f32, half_power_hz: f32) -> (f32, f32) {
    let sample_rate = sample_rate.max(1.0);
    let half_power_hz = half_power_hz.clamp(0.01, sample_rate * 0.5);

    let b = 2.0 - (std::f32::consts::TAU * half_power_hz / sample_rate).cos();
    let c2 = b - (b * b - 1.0).max(0.0).sqrt();
    (1.0 - c2, c2)
}
