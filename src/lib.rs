pub mod config;
pub mod control; // Touch aggregation, polar mapping and voice dispatch
pub mod dsp;
pub mod error;
pub mod graph; // Graph nodes, stage arena and the master topology
pub mod param;

#[cfg(feature = "rtrb")]
pub mod choir;

pub use config::MasterConfig;
pub use error::GraphError;
pub use param::Param;

pub const MAX_BLOCK_SIZE: usize = 2048;
