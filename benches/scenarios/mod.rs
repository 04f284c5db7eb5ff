//! Real-world scenario benchmarks.
//!
//! The master chain as the audio callback runs it, and the per-event
//! control path as the interaction thread runs it.

mod dispatch;
mod master;

pub use dispatch::bench_dispatch;
pub use master::bench_master;
