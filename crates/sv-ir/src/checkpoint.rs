//! Checkpoints: the observable unit of algorithm progress.

use alloc::vec::Vec;

use crate::dataset::Dataset;
use crate::graph::NodeId;

/// An immutable snapshot emitted after one primitive operation.
///
/// For array algorithms `values` holds the dataset at that instant;
/// for graph traversals it is empty and the kind carries node/edge ids.
/// Consumed by the renderer and the audio emitter; never mutated after
/// emission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    /// What the step did.
    pub kind: CheckpointKind,
    /// Dataset values at the instant of emission (empty for traversals).
    pub values: Vec<u32>,
}

impl Checkpoint {
    /// Checkpoint for an array operation, snapshotting the dataset.
    pub fn array(kind: CheckpointKind, data: &Dataset) -> Self {
        Self {
            kind,
            values: data.snapshot(),
        }
    }

    /// Checkpoint for a graph operation (no dataset snapshot).
    pub fn graph(kind: CheckpointKind) -> Self {
        Self {
            kind,
            values: Vec::new(),
        }
    }
}

/// The primitive operation a checkpoint describes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckpointKind {
    // === Array operations ===
    /// Two values were compared. `a`/`b` are the highlighted indices;
    /// `values` holds the actual operands (for merge steps the operands
    /// live in temporary halves, so the indices alone are not enough).
    Compare { a: usize, b: usize, values: (u32, u32) },
    /// The values at `a` and `b` were exchanged.
    Swap { a: usize, b: usize },
    /// `value` was written into slot `index` (merge write-back).
    Assign { index: usize, value: u32 },
    /// The element at `index` reached its final position.
    MarkSorted { index: usize },
    /// The element at `index` was chosen as partition pivot.
    PivotSelect { index: usize },
    /// Linear search probed `index`.
    Probe { index: usize },
    /// Binary search probed `mid` within the half-open range `low..high`.
    Bisect { low: usize, high: usize, mid: usize },
    /// Musical finale is highlighting `index`.
    Highlight { index: usize },

    // === Graph operations ===
    /// A node was taken off the frontier, reached via `from`.
    Visit { node: NodeId, from: Option<NodeId> },
    /// The edge `from -> to` improved `to`'s tentative distance.
    EdgeRelax { from: NodeId, to: NodeId, distance: u32 },
    /// Final highlight pass walking the reconstructed shortest path.
    PathTrace { from: NodeId, to: NodeId },
}
