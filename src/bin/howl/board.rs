//! Demo phoneme tables for the phonemeboard.
//!
//! Five vowels sit around the board's hue wheel. Between two vowels the
//! formants blend; towards the centre everything relaxes into a schwa.
//! Each voice role scales the formant frequencies to its own vocal tract.

use howl_dsp::control::{ControlPair, Location, PhonemeTable, VoiceRole, VoiceSet};
use howl_dsp::graph::{Formant, Phoneme};

const VOWELS: [(&str, Phoneme); 5] = [
    (
        "a",
        Phoneme::new([
            Formant::new(800.0, 80.0, 1.0),
            Formant::new(1150.0, 90.0, 0.5),
            Formant::new(2900.0, 120.0, 0.25),
        ]),
    ),
    (
        "e",
        Phoneme::new([
            Formant::new(400.0, 60.0, 1.0),
            Formant::new(2000.0, 100.0, 0.4),
            Formant::new(2600.0, 120.0, 0.25),
        ]),
    ),
    (
        "i",
        Phoneme::new([
            Formant::new(300.0, 50.0, 1.0),
            Formant::new(2300.0, 100.0, 0.3),
            Formant::new(3000.0, 120.0, 0.2),
        ]),
    ),
    (
        "o",
        Phoneme::new([
            Formant::new(450.0, 70.0, 1.0),
            Formant::new(800.0, 80.0, 0.5),
            Formant::new(2830.0, 100.0, 0.15),
        ]),
    ),
    (
        "u",
        Phoneme::new([
            Formant::new(325.0, 50.0, 1.0),
            Formant::new(700.0, 60.0, 0.3),
            Formant::new(2530.0, 170.0, 0.1),
        ]),
    ),
];

fn tract_scale(role: VoiceRole) -> f32 {
    match role {
        VoiceRole::Soprano => 1.2,
        VoiceRole::Alto => 1.1,
        VoiceRole::Tenor => 1.0,
        VoiceRole::Bass => 0.9,
    }
}

/// Vowel under the given control pair, before any per-voice scaling.
pub fn vowel_at(control: ControlPair) -> Phoneme {
    let position = control.hue * VOWELS.len() as f32;
    let index = (position.floor() as usize).min(VOWELS.len() - 1);
    let next = (index + 1) % VOWELS.len();
    let blended = VOWELS[index].1.lerp(&VOWELS[next].1, position - index as f32);

    Phoneme::neutral().lerp(&blended, control.display_saturation())
}

/// Name of the nearest vowel, for the board labels.
pub fn vowel_name(hue: f32) -> &'static str {
    let index = (hue * VOWELS.len() as f32).round() as usize % VOWELS.len();
    VOWELS[index].0
}

pub fn tables() -> VoiceSet<impl PhonemeTable<Phoneme = Phoneme>> {
    VoiceSet::from_fn(|role| {
        let scale = tract_scale(role);
        move |location: Location| {
            let mut phoneme = vowel_at(ControlPair::from_location(location));
            for formant in phoneme.formants.iter_mut() {
                formant.frequency *= scale;
            }
            phoneme
        }
    })
}
