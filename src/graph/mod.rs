//! Building blocks for the instrument's audio graph.
//!
//! Graph nodes (`node`, `oscillator`, `formant`) are the signal sources.
//! The stage arena (`stage`, `builder`) wires sources and DSP primitives into
//! a fixed topology that is rendered block by block, and `master` builds the
//! one topology this instrument uses.

/// Stage graph construction and rendering.
pub mod builder;
/// Formant-filtered voices and the phonemes that tune them.
pub mod formant;
/// The fixed master chain: sum, balance, bitcrush and reverb.
pub mod master;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band oscillators.
pub mod oscillator;
/// Stage storage and per-block processing.
pub mod stage;

pub use builder::{Graph, GraphBuilder};
pub use formant::{Formant, FormantVoice, Phoneme};
#[cfg(feature = "rtrb")]
pub use formant::VoiceControl;
pub use master::{MasterParams, SignalGraph};
pub use node::{GraphNode, RenderCtx};
pub use oscillator::OscNode;
pub use stage::Port;
