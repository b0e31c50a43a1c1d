//! Linear search stepper.

use sv_ir::{Checkpoint, CheckpointKind, Dataset, Outcome};

use crate::stepper::{Step, Stepper};

/// Sequential scan with one probe checkpoint per index.
pub struct LinearSearch {
    data: Dataset,
    target: u32,
    index: usize,
    found: Option<usize>,
    outcome: Option<Outcome>,
}

impl LinearSearch {
    pub fn new(data: Dataset, target: u32) -> Self {
        Self {
            data,
            target,
            index: 0,
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

impl Stepper for LinearSearch {
    fn step(&mut self) -> Step {
        if let Some(outcome) = self.outcome {
            return Step::Done(outcome);
        }
        if self.index >= self.data.len() {
            self.outcome = Some(Outcome::NotFound);
            return Step::Done(Outcome::NotFound);
        }

        let index = self.index;
        if self.data.get(index) == self.target {
            self.found = Some(index);
            self.outcome = Some(Outcome::Found);
        } else {
            self.index += 1;
        }
        Step::Emit(Checkpoint::array(
            CheckpointKind::Probe { index },
            &self.data,
        ))
    }

    fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }

    fn reset(&mut self) {
        self.index = 0;
        self.found = None;
        self.outcome = None;
    }
}
