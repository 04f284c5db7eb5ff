#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, PushError, RingBuffer};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::filter::SVFilter;
use crate::dsp::oscillator::OscillatorBlock;
use crate::graph::node::{GraphNode, RenderCtx};

/*
Formant Voice
=============

A voice is a sawtooth at a fixed pitch pushed through three band-pass
filters in parallel, one per formant. Which vowel you hear is decided
entirely by the formant frequencies; the pitch only decides which note
sings it.

    saw(pitch) ──┬──► [BP F1, B1] ──(× A1)──┐
                 ├──► [BP F2, B2] ──(× A2)──┼──► (+) ──► out
                 └──► [BP F3, B3] ──(× A3)──┘

Typical first/second formants (adult voice, Hz):

    vowel   F1    F2
    /a/     800   1200
    /e/     400   2000
    /i/     300   2300
    /o/     450    800
    /u/     325    700

Phoneme updates come from the interaction thread. They travel over an
`rtrb` ring and are applied at the start of the next block, so a voice
never sees a half-written phoneme.
*/

/// One resonance of the vocal tract.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Formant {
    /// Centre frequency in Hz
    pub frequency: f32,
    /// Bandwidth in Hz
    pub bandwidth: f32,
    /// Linear gain
    pub amplitude: f32,
}

impl Formant {
    pub const fn new(frequency: f32, bandwidth: f32, amplitude: f32) -> Self {
        Self {
            frequency,
            bandwidth,
            amplitude,
        }
    }

    pub fn lerp(&self, other: &Formant, t: f32) -> Formant {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Formant {
            frequency: mix(self.frequency, other.frequency),
            bandwidth: mix(self.bandwidth, other.bandwidth),
            amplitude: mix(self.amplitude, other.amplitude),
        }
    }
}

/// Three formants describing a vowel.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phoneme {
    pub formants: [Formant; 3],
}

impl Phoneme {
    pub const fn new(formants: [Formant; 3]) -> Self {
        Self { formants }
    }

    /// The schwa, a relaxed mid vowel.
    pub const fn neutral() -> Self {
        Self::new([
            Formant::new(500.0, 80.0, 1.0),
            Formant::new(1500.0, 90.0, 0.5),
            Formant::new(2500.0, 120.0, 0.25),
        ])
    }

    /// Blend formant by formant; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(&self, other: &Phoneme, t: f32) -> Phoneme {
        let [a0, a1, a2] = &self.formants;
        let [b0, b1, b2] = &other.formants;
        Phoneme::new([a0.lerp(b0, t), a1.lerp(b1, t), a2.lerp(b2, t)])
    }
}

impl Default for Phoneme {
    fn default() -> Self {
        Self::neutral()
    }
}

pub struct FormantVoice {
    source: OscillatorBlock,
    frequency: f32,
    filters: [SVFilter; 3],
    phoneme: Phoneme,
    sample_rate: f32,
    #[cfg(feature = "rtrb")]
    rx: Option<Consumer<Phoneme>>,
}

impl FormantVoice {
    pub fn new(frequency: f32, phoneme: Phoneme, sample_rate: f32) -> Self {
        let filters = phoneme
            .formants
            .map(|f| SVFilter::formant(f.frequency, f.bandwidth, sample_rate));

        Self {
            source: OscillatorBlock::sawtooth(),
            frequency,
            filters,
            phoneme,
            sample_rate,
            #[cfg(feature = "rtrb")]
            rx: None,
        }
    }

    /// Create a voice plus the control handle that feeds it phonemes.
    #[cfg(feature = "rtrb")]
    pub fn with_control(
        frequency: f32,
        phoneme: Phoneme,
        sample_rate: f32,
        capacity: usize,
    ) -> (Self, VoiceControl) {
        let (tx, rx) = RingBuffer::new(capacity.max(1));
        let mut voice = Self::new(frequency, phoneme, sample_rate);
        voice.rx = Some(rx);

        (
            voice,
            VoiceControl {
                tx,
                capacity: capacity.max(1),
                dropping: false,
            },
        )
    }

    pub fn phoneme(&self) -> &Phoneme {
        &self.phoneme
    }

    /// Retune the formant filters immediately (same-thread use).
    pub fn set_phoneme(&mut self, phoneme: Phoneme) {
        self.phoneme = phoneme;
        for (filter, formant) in self.filters.iter_mut().zip(phoneme.formants.iter()) {
            filter.set_cutoff(formant.frequency);
            filter.set_bandwidth(formant.bandwidth);
        }
    }

    /// Apply the newest queued phoneme, skipping any stale ones behind it.
    #[cfg(feature = "rtrb")]
    fn drain_updates(&mut self) {
        let Some(rx) = self.rx.as_mut() else {
            return;
        };

        let mut latest = None;
        while let Ok(phoneme) = rx.pop() {
            latest = Some(phoneme);
        }
        if let Some(phoneme) = latest {
            self.set_phoneme(phoneme);
        }
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        for filter in self.filters.iter_mut() {
            filter.set_sample_rate(sample_rate);
        }
        self.set_phoneme(self.phoneme);
    }
}

impl GraphNode for FormantVoice {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        #[cfg(feature = "rtrb")]
        self.drain_updates();

        if ctx.sample_rate != self.sample_rate {
            self.set_sample_rate(ctx.sample_rate);
        }

        let increment = (self.frequency / self.sample_rate.max(1.0)).clamp(0.0, 0.5);
        let gains = [
            self.phoneme.formants[0].amplitude * self.filters[0].damping(),
            self.phoneme.formants[1].amplitude * self.filters[1].damping(),
            self.phoneme.formants[2].amplitude * self.filters[2].damping(),
        ];

        for sample in out.iter_mut() {
            let excitation = self.source.next_sample(increment);

            let mut voiced = 0.0;
            for (filter, gain) in self.filters.iter_mut().zip(gains.iter()) {
                voiced += filter.process(excitation) * gain;
            }
            *sample = voiced;
        }
    }

    fn reset(&mut self) {
        self.source.reset();
        for filter in self.filters.iter_mut() {
            filter.reset();
        }

        // Discard anything queued before the voice was bound into a graph
        #[cfg(feature = "rtrb")]
        if let Some(rx) = self.rx.as_mut() {
            while rx.pop().is_ok() {}
        }
    }
}

/// Interaction-thread handle that retunes one [`FormantVoice`].
#[cfg(feature = "rtrb")]
pub struct VoiceControl {
    tx: Producer<Phoneme>,
    capacity: usize,
    dropping: bool,
}

#[cfg(feature = "rtrb")]
impl VoiceControl {
    /// Queue a phoneme for the voice. Returns false if the ring was full and
    /// the update was dropped.
    pub fn update_with_phoneme(&mut self, phoneme: Phoneme) -> bool {
        match self.tx.push(phoneme) {
            Ok(()) => {
                self.dropping = false;
                true
            }
            Err(PushError::Full(_)) => {
                // Warn once per run of drops
                if !self.dropping {
                    log::warn!(
                        "phoneme queue full ({} slots); dropping update",
                        self.capacity
                    );
                    self.dropping = true;
                }
                false
            }
        }
    }
}
