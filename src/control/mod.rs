//! The touch-to-voice control pipeline.
//!
//! Runs synchronously on the interaction thread, once per touch event:
//!
//! ```text
//! touches ─► aggregate ─► polar ─► dispatch ─► presenter
//!                                     │
//!                                     └──────► audio engine (mute, 4 × phoneme)
//! ```
//!
//! Nothing in here allocates on the audio thread or blocks on it; the
//! engine side only ever sees parameter writes and queued phonemes.

/// Touch Aggregator: centroid and interaction state.
pub mod aggregate;
/// Voice Control Dispatcher and its collaborator traits.
pub mod dispatch;
/// Voice roles and the phoneme-table seam.
pub mod phoneme;
/// Polar Control Mapper.
pub mod polar;
/// Touch snapshot types and surface bounds.
pub mod touch;

pub use aggregate::{centroid, InteractionState, Location};
pub use dispatch::{AudioEngine, Dispatcher, Frame, Presenter, SustainFlag, TouchEvent};
pub use phoneme::{PhonemeTable, VoiceRole, VoiceSet};
pub use polar::ControlPair;
pub use touch::{Bounds, Point, TouchId, TouchPhase, TouchPoint};
