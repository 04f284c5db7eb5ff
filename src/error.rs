use std::{error, fmt};

/// Errors reported while wiring a signal graph.
///
/// Rendering and control never fail; everything that can go wrong is caught
/// once, when the graph is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The master graph needs at least one voice to sum
    NoVoices,
    /// A port created by a different builder was passed in
    ForeignPort { expected: u64, found: u64 },
    /// A port names a stage or channel that does not exist
    UnknownPort { stage: usize, channel: usize },
}

impl error::Error for GraphError {}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoVoices => write!(f, "Signal graph needs at least one voice"),
            Self::ForeignPort { expected, found } => write!(
                f,
                "Port belongs to graph {found}, cannot be used in graph {expected}"
            ),
            Self::UnknownPort { stage, channel } => {
                write!(f, "Port {stage}:{channel} does not exist")
            }
        }
    }
}
