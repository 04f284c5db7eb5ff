//! Fixed settings for the master signal chain.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Constants of the master topology.
///
/// These are wired once at construction; only the three live parameters
/// (amplitude, bitcrush mix, reverb mix) change while the graph runs.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct MasterConfig {
    /// Scale applied to `driver * amplitude` to form the balance reference
    pub comparator_scale: f32,
    /// Half-power point (Hz) of the balance stage's RMS followers
    pub balance_half_power_hz: f32,
    /// Bit depth of the bitcrush stage
    pub bit_depth: u32,
    /// Sample-and-hold rate (Hz) of the bitcrush stage
    pub crush_sample_rate: f32,
    /// Comb feedback of the reverb stage
    pub reverb_feedback: f32,
    /// Lowpass cutoff (Hz) inside the reverb feedback paths
    pub reverb_cutoff_hz: f32,
}

impl Default for MasterConfig {
    fn default() -> Self {
        Self {
            comparator_scale: 0.125,
            balance_half_power_hz: 10.0,
            bit_depth: 24,
            crush_sample_rate: 4000.0,
            reverb_feedback: 0.75,
            reverb_cutoff_hz: 16_000.0,
        }
    }
}
