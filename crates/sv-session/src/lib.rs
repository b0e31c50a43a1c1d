//! Headless session controllers for sonaviz.
//!
//! Provides a unified API for configuring and running instrumented
//! algorithm sessions — a single sort, a side-by-side comparison, or a
//! graph search — that both the CLI and any richer front end share.
//! Each run executes on its own thread with its own cancellation
//! token; checkpoints stream to the caller's sink, tones to the
//! caller's tone sink.

mod comparison;
mod driver;
mod pacing;
mod search;
mod sort;

pub use comparison::{ComparisonSession, Side};
pub use driver::run_to_completion;
pub use pacing::Pacing;
pub use search::{SearchReport, SearchSession};
pub use sort::{SortConfig, SortSession};

// Re-export common types so callers don't need sv-ir/sv-engine directly.
pub use sv_engine::{
    ArraySearch, ArraySearchAlgorithm, AudioEmitter, EmitterControls, GraphSearch, NullToneSink,
    SearchAlgorithm, SortAlgorithm, SortRunner, Step, Stepper, ToneCommand, ToneSink,
};
pub use sv_ir::{
    CancellationToken, Checkpoint, CheckpointKind, CheckpointSink, CollectSink, Dataset,
    DatasetGenerator, Graph, NodeId, NullSink, Outcome,
};

/// Smallest accepted dataset size.
pub const MIN_DATASET_SIZE: usize = 10;

/// Largest accepted dataset size.
pub const MAX_DATASET_SIZE: usize = 150;

/// Input rejected before a run starts.
///
/// Everything here is caught at session construction or start; once a
/// run is going, the only terminal states are the run outcomes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// Comparison mode needs two different algorithms
    IdenticalAlgorithms,
    /// Dataset size outside the accepted bounds
    SizeOutOfRange(usize),
    /// Search started without a target
    MissingTarget,
    /// Search target is not a node of the graph
    UnknownNode(String),
    /// Algorithm selector did not match anything
    UnknownAlgorithm(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::IdenticalAlgorithms => {
                write!(f, "Please select different algorithms to compare")
            }
            SessionError::SizeOutOfRange(size) => write!(
                f,
                "Dataset size {} outside {}..={}",
                size, MIN_DATASET_SIZE, MAX_DATASET_SIZE
            ),
            SessionError::MissingTarget => write!(f, "Please enter a target node"),
            SessionError::UnknownNode(label) => write!(f, "Unknown node: {}", label),
            SessionError::UnknownAlgorithm(name) => write!(f, "Unknown algorithm: {}", name),
        }
    }
}

impl std::error::Error for SessionError {}
