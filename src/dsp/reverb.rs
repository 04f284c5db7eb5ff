//! Stereo Reverb - Room Simulation via Delay Networks
//!
//! Reverb simulates the sound of a space by creating many delayed, filtered
//! reflections of the input signal. This implementation runs two classic
//! Schroeder networks side by side, one per output channel.
//!
//! # Schroeder Reverb Architecture (per channel)
//!
//! ```text
//! Input ──┬──→ [Comb 1] ──┐
//!         ├──→ [Comb 2] ──┤
//!         ├──→ [Comb 3] ──┼──→ (+) ──→ [Allpass 1] ──→ [Allpass 2] ──→ Output
//!         └──→ [Comb 4] ──┘
//! ```
//!
//! ## Comb Filters
//!
//! A comb filter creates a series of equally-spaced echoes that decay over time:
//!
//! ```text
//! y[n] = x[n] + feedback * lowpass(y[n - delay])
//! ```
//!
//! The lowpass inside the loop absorbs high frequencies a little more on each
//! pass, the way air and soft surfaces do. Its cutoff is the reverb's
//! `cutoff_hz`; its one-pole coefficient is `exp(-2π · cutoff / sample_rate)`.
//!
//! ## Allpass Filters
//!
//! Allpass filters pass all frequencies equally but shift their phase, adding
//! density and diffusion without colouring the sound.
//!
//! ```text
//! y[n] = -g * x[n] + x[n - delay] + g * y[n - delay]
//! ```
//!
//! ## Stereo Spread
//!
//! The right channel's delay lines are slightly longer than the left's. The
//! two tails decorrelate, which the ear hears as width:
//!
//! ```text
//!   left:   29.7 ms  37.1 ms  41.1 ms  43.7 ms
//!   right:  + 0.52 ms on every line
//! ```
//!
//! # Parameters
//!
//! - **Feedback**: comb feedback, sets the decay time (0.75 is a medium room)
//! - **Cutoff**: lowpass inside the feedback paths (16 kHz is bright)

use std::f32::consts::TAU;

/// Comb filter delay times in ms (mutually prime ratios)
const COMB_DELAYS_MS: [f32; 4] = [29.7, 37.1, 41.1, 43.7];
/// Allpass delay times in ms
const ALLPASS_DELAYS_MS: [f32; 2] = [5.0, 1.7];
/// Extra delay for the right channel (≈23 samples at 44.1 kHz)
const STEREO_SPREAD_MS: f32 = 0.52;
/// Allpass diffusion gain
const ALLPASS_FEEDBACK: f32 = 0.5;

/// A damped comb filter (buffer allocated once, RT-safe afterwards)
pub struct CombFilter {
    buffer: Vec<f32>,
    write_pos: usize,
    feedback: f32,
    damp: f32,
    filter_state: f32,
}

impl CombFilter {
    pub fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)],
            write_pos: 0,
            feedback: 0.5,
            damp: 0.0,
            filter_state: 0.0,
        }
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.99);
    }

    /// One-pole coefficient of the loop lowpass (0.0 = open, →1.0 = dark)
    pub fn set_damp(&mut self, damp: f32) {
        self.damp = damp.clamp(0.0, 1.0);
    }

    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.buffer[self.write_pos];

        // One-pole lowpass for damping (absorbs high frequencies)
        self.filter_state = output * (1.0 - self.damp) + self.filter_state * self.damp;

        self.buffer[self.write_pos] = input + self.filter_state * self.feedback;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();

        output
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.filter_state = 0.0;
        self.write_pos = 0;
    }
}

/// An allpass filter for reverb diffusion (buffer allocated once, RT-safe afterwards)
pub struct AllpassFilter {
    buffer: Vec<f32>,
    write_pos: usize,
    feedback: f32,
}

impl AllpassFilter {
    pub fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)],
            write_pos: 0,
            feedback: ALLPASS_FEEDBACK,
        }
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.9);
    }

    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.buffer[self.write_pos];

        // Allpass: output = -g*input + delayed + g*delayed_output
        let output = -self.feedback * input + delayed;

        self.buffer[self.write_pos] = input + self.feedback * output;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();

        output
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

/// One channel: 4 comb filters in parallel, 2 allpass filters in series
struct ReverbChannel {
    combs: [CombFilter; 4],
    allpasses: [AllpassFilter; 2],
}

impl ReverbChannel {
    fn new(sample_rate: f32, spread_ms: f32) -> Self {
        let samples = |ms: f32| ((ms + spread_ms) * sample_rate / 1000.0) as usize;

        Self {
            combs: COMB_DELAYS_MS.map(|ms| CombFilter::new(samples(ms))),
            allpasses: ALLPASS_DELAYS_MS.map(|ms| AllpassFilter::new(samples(ms))),
        }
    }

    fn process(&mut self, input: f32) -> f32 {
        let mut output = 0.0;
        for comb in &mut self.combs {
            output += comb.process(input);
        }
        output *= 0.25; // Normalize for 4 combs

        for allpass in &mut self.allpasses {
            output = allpass.process(output);
        }

        output
    }

    fn reset(&mut self) {
        self.combs.iter_mut().for_each(CombFilter::reset);
        self.allpasses.iter_mut().for_each(AllpassFilter::reset);
    }
}

/// Mono-in, stereo-out Schroeder reverb
pub struct StereoReverb {
    left: ReverbChannel,
    right: ReverbChannel,
    sample_rate: f32,
    feedback: f32,
    cutoff_hz: f32,
}

impl StereoReverb {
    /// Create a reverb at `sample_rate`. Delay lines are allocated here, once.
    pub fn new(sample_rate: f32, feedback: f32, cutoff_hz: f32) -> Self {
        let sample_rate = sample_rate.max(1.0);
        let mut reverb = Self {
            left: ReverbChannel::new(sample_rate, 0.0),
            right: ReverbChannel::new(sample_rate, STEREO_SPREAD_MS),
            sample_rate,
            feedback: 0.0,
            cutoff_hz: 0.0,
        };
        reverb.set_feedback(feedback);
        reverb.set_cutoff(cutoff_hz);
        reverb
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.99);
        let feedback = self.feedback;
        for comb in self.combs_mut() {
            comb.set_feedback(feedback);
        }
    }

    /// Set the loop lowpass cutoff, clamped to (0, nyquist].
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz.clamp(1.0, self.sample_rate * 0.5);
        let damp = (-TAU * self.cutoff_hz / self.sample_rate).exp();
        for comb in self.combs_mut() {
            comb.set_damp(damp);
        }
    }

    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    /// Process one input sample into a (left, right) pair
    #[inline]
    pub fn process(&mut self, input: f32) -> (f32, f32) {
        (self.left.process(input), self.right.process(input))
    }

    pub fn process_buffer(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(input.len(), left.len());
        debug_assert_eq!(input.len(), right.len());

        for ((&x, l), r) in input.iter().zip(left.iter_mut()).zip(right.iter_mut()) {
            (*l, *r) = self.process(x);
        }
    }

    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
    }

    fn combs_mut(&mut self) -> impl Iterator<Item = &mut CombFilter> {
        self.left.combs.iter_mut().chain(self.right.combs.iter_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comb_filter_creates_echo() {
        let mut comb = CombFilter::new(10);
        comb.set_feedback(0.5);
        comb.set_damp(0.0);

        // Feed an impulse
        let out1 = comb.process(1.0);
        assert!(out1.abs() < 0.01); // No output yet (delayed)

        for _ in 0..9 {
            comb.process(0.0);
        }

        // Now we should see the echo
        let echo = comb.process(0.0);
        assert!(echo.abs() > 0.4);
    }

    #[test]
    fn test_allpass_preserves_energy() {
        let mut allpass = AllpassFilter::new(5);
        allpass.set_feedback(0.5);

        let mut energy_in = 0.0;
        let mut energy_out = 0.0;

        for i in 0..100 {
            let input = if i < 10 { 1.0 } else { 0.0 };
            let output = allpass.process(input);
            energy_in += input * input;
            energy_out += output * output;
        }

        assert!(energy_out > energy_in * 0.8);
    }

    #[test]
    fn test_stereo_reverb_produces_tail_on_both_channels() {
        let mut reverb = StereoReverb::new(48_000.0, 0.75, 16_000.0);

        let _ = reverb.process(1.0);

        // Longest comb delay is ~44ms = ~2100 samples at 48kHz
        let mut left_tail = false;
        let mut right_tail = false;
        for _ in 0..5000 {
            let (l, r) = reverb.process(0.0);
            left_tail |= l.abs() > 0.001;
            right_tail |= r.abs() > 0.001;
        }

        assert!(left_tail, "left channel should produce a tail after impulse");
        assert!(right_tail, "right channel should produce a tail after impulse");
    }

    #[test]
    fn test_channels_decorrelate() {
        let mut reverb = StereoReverb::new(48_000.0, 0.75, 16_000.0);
        let _ = reverb.process(1.0);

        let mut differs = false;
        for _ in 0..5000 {
            let (l, r) = reverb.process(0.0);
            if (l - r).abs() > 1e-4 {
                differs = true;
                break;
            }
        }

        assert!(differs, "left and right tails should not be identical");
    }

    #[test]
    fn test_reverb_stability() {
        let mut reverb = StereoReverb::new(48_000.0, 0.99, 20_000.0);

        for _ in 0..10_000 {
            let (l, r) = reverb.process(0.1);
            assert!(l.is_finite() && r.is_finite(), "Reverb output should be finite");
            assert!(l.abs() < 10.0 && r.abs() < 10.0, "Reverb output unstable: {} {}", l, r);
        }
    }

    #[test]
    fn test_parameter_clamping() {
        let reverb = StereoReverb::new(48_000.0, 2.0, 96_000.0);
        assert_eq!(reverb.feedback(), 0.99);
        assert_eq!(reverb.cutoff(), 24_000.0);
    }

    #[test]
    fn test_set_feedback_reaches_every_comb() {
        let mut reverb = StereoReverb::new(48_000.0, 0.5, 16_000.0);
        reverb.set_feedback(0.8);

        assert_eq!(reverb.feedback(), 0.8);
        assert!(reverb.combs_mut().all(|comb| comb.feedback == 0.8));
    }

    #[test]
    fn test_reset_silences_tail() {
        let mut reverb = StereoReverb::new(48_000.0, 0.75, 16_000.0);
        for _ in 0..3000 {
            reverb.process(0.5);
        }

        reverb.reset();

        for _ in 0..3000 {
            let (l, r) = reverb.process(0.0);
            assert_eq!((l, r), (0.0, 0.0));
        }
    }
}
