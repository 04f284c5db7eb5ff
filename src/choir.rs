//! The four-voice choir: driver, formant voices and the master chain.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::MasterConfig;
use crate::control::{AudioEngine, VoiceRole, VoiceSet};
use crate::error::GraphError;
use crate::graph::formant::{FormantVoice, Phoneme, VoiceControl};
use crate::graph::master::{MasterParams, SignalGraph};
use crate::graph::oscillator::OscNode;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct ChoirConfig {
    /// Pitch (Hz) of the sawtooth that sets the balance reference
    pub driver_frequency: f32,
    /// Voice pitches in Hz: soprano, alto, tenor, bass
    pub voice_frequencies: [f32; 4],
    /// Phoneme updates each voice can hold before the next block drains them
    pub phoneme_queue: usize,
    pub master: MasterConfig,
}

impl Default for ChoirConfig {
    fn default() -> Self {
        Self {
            driver_frequency: 110.0,
            // C major triad spread over four voices: G4, E4, C4, C3
            voice_frequencies: [392.0, 329.63, 261.63, 130.81],
            phoneme_queue: 32,
            master: MasterConfig::default(),
        }
    }
}

/// Build the choir's signal graph and the control handle that drives it.
///
/// The graph goes to the audio thread, the control stays with the
/// interaction thread.
pub fn build(
    config: &ChoirConfig,
    sample_rate: f32,
) -> Result<(SignalGraph, ChoirControl), GraphError> {
    let mut voices = Vec::with_capacity(VoiceRole::ALL.len());
    let controls = VoiceSet::from_fn(|role| {
        let (voice, control) = FormantVoice::with_control(
            config.voice_frequencies[role.index()],
            Phoneme::neutral(),
            sample_rate,
            config.phoneme_queue,
        );
        voices.push(voice);
        control
    });

    let driver = OscNode::sawtooth(config.driver_frequency);
    let driver_frequency = driver.frequency();
    let graph = SignalGraph::new(driver, voices, &config.master, sample_rate)?;

    log::debug!(
        "choir at {} Hz: driver {} Hz, voices {:?} Hz",
        graph.sample_rate(),
        driver_frequency,
        config.voice_frequencies
    );

    let control = ChoirControl {
        params: graph.params(),
        voices: controls,
    };
    Ok((graph, control))
}

/// Interaction-thread side of the choir.
pub struct ChoirControl {
    params: MasterParams,
    voices: VoiceSet<VoiceControl>,
}

impl ChoirControl {
    pub fn params(&self) -> &MasterParams {
        &self.params
    }
}

impl AudioEngine<Phoneme> for ChoirControl {
    fn mute(&mut self) {
        self.params.mute();
    }

    fn unmute(&mut self) {
        self.params.unmute();
    }

    fn update_phoneme(&mut self, role: VoiceRole, phoneme: Phoneme) {
        if !self.voices.get_mut(role).update_with_phoneme(phoneme) {
            log::trace!("{} phoneme update dropped", role);
        }
    }
}
