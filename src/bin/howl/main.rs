//! howl - Terminal phonemeboard
//!
//! Run with: cargo run
//!
//! Click and drag on the pad to sing. Logging goes to stderr and is off
//! unless RUST_LOG is set, e.g. `RUST_LOG=debug cargo run 2> howl.log`.

mod app;
mod board;
mod ui;

use app::Howl;
use howl_dsp::choir::ChoirConfig;
use simple_logger::SimpleLogger;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    SimpleLogger::new()
        .with_level(log::LevelFilter::Off)
        .env()
        .init()?;

    Howl::new(ChoirConfig::default()).run()
}
