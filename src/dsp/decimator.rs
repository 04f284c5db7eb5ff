//! Decimator / Bitcrusher
//!
//! Bitcrushing degrades a signal on purpose by lowering its resolution in
//! both dimensions of digital audio:
//!
//! ```text
//!   amplitude  ▲                              ▲
//!              │   ┌──┐                        │ ┌─────┐
//!              │ ┌─┘  └─┐       bit depth      │ │     │
//!              │─┘      └─┐     ─────────►     │─┘     └─────┐
//!              │          └─    sample rate    │             └─
//!              └──────────────►               └──────────────►
//!                    time                           time
//! ```
//!
//! # Bit Depth (vertical resolution)
//!
//! Each sample is snapped to one of `2^(bits-1)` steps per polarity:
//!
//! ```text
//! steps = 2^(bits - 1)
//! y     = round(x · steps) / steps
//! ```
//!
//!   24 bits = inaudible quantisation (the master chain's setting)
//!    8 bits = gritty, "old sampler"
//!    4 bits = heavy, buzzy noise floor
//!
//! # Sample Rate (horizontal resolution)
//!
//! A sample-and-hold only takes a new input value every
//! `sample_rate / target_rate` samples and repeats it in between. Content
//! above `target_rate / 2` folds back (aliases) into the audible range,
//! which is exactly the metallic, lo-fi colour a bitcrusher is used for.
//!
//! ```text
//! phase += target_rate / sample_rate
//! if phase >= 1:  phase -= 1;  held = quantize(x)
//! y = held
//! ```
//!
//! At 4000 Hz on a 48 kHz stream every value is held for about 12 samples.

/// Bit depth reduction plus sample-and-hold rate reduction.
pub struct Decimator {
    bit_depth: u32,
    steps: f32,
    target_rate: f32,
    increment: f32,
    phase: f32,
    held: f32,
}

impl Decimator {
    pub fn new(sample_rate: f32, bit_depth: u32, target_rate: f32) -> Self {
        let mut decimator = Self {
            bit_depth: 0,
            steps: 1.0,
            target_rate,
            increment: 1.0,
            // Start "due" so the very first sample is captured
            phase: 1.0,
            held: 0.0,
        };
        decimator.set_bit_depth(bit_depth);
        decimator.configure(sample_rate, target_rate);
        decimator
    }

    /// Bit depth, clamped to 1..=24.
    pub fn set_bit_depth(&mut self, bits: u32) {
        self.bit_depth = bits.clamp(1, 24);
        self.steps = (1u32 << (self.bit_depth - 1)) as f32;
    }

    /// Set the hold rate; `target_rate` is clamped to (0, sample_rate].
    pub fn configure(&mut self, sample_rate: f32, target_rate: f32) {
        let sample_rate = sample_rate.max(1.0);
        self.target_rate = target_rate.clamp(1.0, sample_rate);
        self.increment = self.target_rate / sample_rate;
    }

    pub fn bit_depth(&self) -> u32 {
        self.bit_depth
    }

    pub fn target_rate(&self) -> f32 {
        self.target_rate
    }

    #[inline]
    pub fn quantize(&self, sample: f32) -> f32 {
        (sample * self.steps).round() / self.steps
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        if self.phase >= 1.0 {
            self.phase -= 1.0;
            self.held = self.quantize(input);
        }
        self.phase += self.increment;
        self.held
    }

    pub fn process_buffer(&mut self, input: &[f32], out: &mut [f32]) {
        debug_assert_eq!(input.len(), out.len());

        for (o, &x) in out.iter_mut().zip(input.iter()) {
            *o = self.process(x);
        }
    }

    pub fn reset(&mut self) {
        self.phase = 1.0;
        self.held = 0.0;
    }
}
