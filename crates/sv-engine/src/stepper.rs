//! The pull-based execution shape shared by all runners.

use sv_ir::{Checkpoint, Outcome};

/// Result of advancing a runner by one primitive operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// One primitive operation ran; here is its checkpoint.
    Emit(Checkpoint),
    /// No more work. Repeated calls keep returning the same outcome.
    Done(Outcome),
}

/// A sorting or searching algorithm decomposed into discrete steps.
///
/// Each `step()` performs exactly one primitive operation against the
/// runner's state and reports it as a checkpoint. Instrumentation is a
/// pure side channel: the operation order and final result are those of
/// the plain algorithm. Pacing and cancellation live in the driver, not
/// here, so the same stepper serves both the menu-driven pull mode and
/// the self-driving push mode.
pub trait Stepper {
    /// Advance by one primitive operation.
    fn step(&mut self) -> Step;

    /// Has the run reached a terminal state?
    fn is_complete(&self) -> bool;

    /// Rewind the bookkeeping to the starting state, keeping the data
    /// as it currently is (a finished sort restarts over sorted
    /// values, like the menu-driven front end's restart button).
    fn reset(&mut self);
}
