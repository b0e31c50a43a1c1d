//! Binary search stepper.

use sv_ir::{Checkpoint, CheckpointKind, Dataset, Outcome};

use crate::stepper::{Step, Stepper};

/// Midpoint bisection over sorted input.
///
/// Bounds are half-open (`low..high`), which keeps the empty-range
/// check a plain `low >= high`. One bisect checkpoint per iteration.
pub struct BinarySearch {
    data: Dataset,
    target: u32,
    low: usize,
    high: usize,
    found: Option<usize>,
    outcome: Option<Outcome>,
}

impl BinarySearch {
    pub fn new(data: Dataset, target: u32) -> Self {
        let high = data.len();
        Self {
            data,
            target,
            low: 0,
            high,
            found: None,
            outcome: None,
        }
    }

    pub fn found_index(&self) -> Option<usize> {
        self.found
    }

    pub fn dataset(&self) -> &Dataset {
        &self.data
    }
}

impl Stepper for BinarySearch {
    fn step(&mut self) -> Step {
        if let Some(outcome) = self.outcome {
            return Step::Done(outcome);
        }
        if self.low >= self.high {
            self.outcome = Some(Outcome::NotFound);
            return Step::Done(Outcome::NotFound);
        }

        let (low, high) = (self.low, self.high);
        let mid = low + (high - low) / 2;
        let probed = self.data.get(mid);
        if probed == self.target {
            self.found = Some(mid);
            self.outcome = Some(Outcome::Found);
        } else if probed < self.target {
            self.low = mid + 1;
        } else {
            self.high = mid;
        }
        Step::Emit(Checkpoint::array(
            CheckpointKind::Bisect { low, high, mid },
            &self.data,
        ))
    }

    fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }

    fn reset(&mut self) {
        self.low = 0;
        self.high = self.data.len();
        self.found = None;
        self.outcome = None;
    }
}
