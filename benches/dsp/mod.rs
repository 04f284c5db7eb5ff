//! Benchmarks for low-level DSP primitives.

mod balance;
mod decimator;
mod filter;
mod mix;
mod reverb;

pub use balance::bench_balance;
pub use decimator::bench_decimator;
pub use filter::bench_filter;
pub use mix::bench_mix;
pub use reverb::bench_reverb;
