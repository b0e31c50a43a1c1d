//! One-way checkpoint consumers.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::checkpoint::Checkpoint;

/// Receives every checkpoint a run emits, in emission order.
///
/// The renderer implements this at the system boundary; the core never
/// owns rendering resources.
pub trait CheckpointSink {
    fn on_checkpoint(&mut self, checkpoint: &Checkpoint);
}

/// Discards all checkpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl CheckpointSink for NullSink {
    fn on_checkpoint(&mut self, _checkpoint: &Checkpoint) {}
}

/// Records every checkpoint, for offline capture and tests.
#[derive(Clone, Debug, Default)]
pub struct CollectSink {
    pub checkpoints: Vec<Checkpoint>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CheckpointSink for CollectSink {
    fn on_checkpoint(&mut self, checkpoint: &Checkpoint) {
        self.checkpoints.push(checkpoint.clone());
    }
}

impl<T: CheckpointSink + ?Sized> CheckpointSink for Box<T> {
    fn on_checkpoint(&mut self, checkpoint: &Checkpoint) {
        (**self).on_checkpoint(checkpoint);
    }
}

impl<T: CheckpointSink + ?Sized> CheckpointSink for &mut T {
    fn on_checkpoint(&mut self, checkpoint: &Checkpoint) {
        (**self).on_checkpoint(checkpoint);
    }
}
