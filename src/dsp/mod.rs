//! Low-level DSP primitives used by the graph stages and voices.
//!
//! These components are realtime-safe once constructed: delay lines are
//! allocated up front and nothing allocates per sample. They stay focused on
//! the signal-processing math so the graph layer can own routing and
//! parameter reads.

/// RMS-follower level matching against a comparator signal.
pub mod balance;
/// Bit depth and sample-and-hold rate reduction.
pub mod decimator;
/// State-variable band-pass filter tuned by formant bandwidth.
pub mod filter;
/// Summing, scaling and linear dry/wet crossfades.
pub mod mix;
/// Sine and sawtooth oscillators.
pub mod oscillator;
/// Mono-in, stereo-out Schroeder reverb.
pub mod reverb;
