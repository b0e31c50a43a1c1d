//! Bubble sort stepper.

use sv_ir::{Checkpoint, CheckpointKind, Dataset, Outcome};

use crate::stepper::{Step, Stepper};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Compare the adjacent pair at the cursor.
    Compare,
    /// The pair was out of order; exchange it.
    Swap,
    /// End of a pass: the last unsorted slot is now in place.
    MarkPassEnd,
    /// Mark remaining indices sorted, walking down to zero.
    Drain { next: usize },
    Finished,
}

/// Pairwise adjacent compare-and-swap.
///
/// After each pass the largest remaining element has bubbled into
/// place and is marked sorted. A pass with no swaps terminates the run
/// early; the untouched prefix is then marked sorted index by index.
pub struct BubbleSort {
    data: Dataset,
    /// Completed passes; the last `pass` elements are sorted.
    pass: usize,
    /// Left index of the pair under consideration.
    cursor: usize,
    /// Did the current pass perform any swap?
    swapped: bool,
    phase: Phase,
}

impl BubbleSort {
    pub fn new(data: Dataset) -> Self {
        let mut sort = Self {
            data,
            pass: 0,
            cursor: 0,
            swapped: false,
            phase: Phase::Finished,
        };
        Stepper::reset(&mut sort);
        sort
    }

    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    pub fn into_dataset(self) -> Dataset {
        self.data
    }

    /// Move to the next pair, or to pass end when the pass is over.
    fn advance_cursor(&mut self) {
        self.cursor += 1;
        if self.cursor >= self.data.len() - 1 - self.pass {
            self.phase = Phase::MarkPassEnd;
        } else {
            self.phase = Phase::Compare;
        }
    }
}

impl Stepper for BubbleSort {
    fn step(&mut self) -> Step {
        match self.phase {
            Phase::Finished => Step::Done(Outcome::Completed),
            Phase::Compare => {
                let (a, b) = (self.cursor, self.cursor + 1);
                let pair = (self.data.get(a), self.data.get(b));
                if pair.0 > pair.1 {
                    self.phase = Phase::Swap;
                } else {
                    self.advance_cursor();
                }
                Step::Emit(Checkpoint::array(
                    CheckpointKind::Compare { a, b, values: pair },
                    &self.data,
                ))
            }
            Phase::Swap => {
                let (a, b) = (self.cursor, self.cursor + 1);
                self.data.swap(a, b);
                self.swapped = true;
                self.advance_cursor();
                Step::Emit(Checkpoint::array(CheckpointKind::Swap { a, b }, &self.data))
            }
            Phase::MarkPassEnd => {
                let index = self.data.len() - 1 - self.pass;
                if !self.swapped {
                    // Pass with no swaps: everything below is in order.
                    self.phase = match index {
                        0 => Phase::Finished,
                        _ => Phase::Drain { next: index - 1 },
                    };
                } else {
                    self.pass += 1;
                    if self.pass >= self.data.len() - 1 {
                        self.phase = Phase::Drain { next: 0 };
                    } else {
                        self.cursor = 0;
                        self.swapped = false;
                        self.phase = Phase::Compare;
                    }
                }
                Step::Emit(Checkpoint::array(
                    CheckpointKind::MarkSorted { index },
                    &self.data,
                ))
            }
            Phase::Drain { next } => {
                self.phase = match next {
                    0 => Phase::Finished,
                    _ => Phase::Drain { next: next - 1 },
                };
                Step::Emit(Checkpoint::array(
                    CheckpointKind::MarkSorted { index: next },
                    &self.data,
                ))
            }
        }
    }

    fn is_complete(&self) -> bool {
        self.phase == Phase::Finished
    }

    fn reset(&mut self) {
        self.pass = 0;
        self.cursor = 0;
        self.swapped = false;
        self.phase = match self.data.len() {
            0 => Phase::Finished,
            1 => Phase::Drain { next: 0 },
            _ => Phase::Compare,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn drive(mut sort: BubbleSort) -> (Vec<Checkpoint>, Outcome, Dataset) {
        let mut checkpoints = Vec::new();
        loop {
            match sort.step() {
                Step::Emit(cp) => checkpoints.push(cp),
                Step::Done(outcome) => return (checkpoints, outcome, sort.into_dataset()),
            }
        }
    }

    fn mark_count(checkpoints: &[Checkpoint]) -> usize {
        checkpoints
            .iter()
            .filter(|cp| matches!(cp.kind, CheckpointKind::MarkSorted { .. }))
            .count()
    }

    #[test]
    fn sorts_reversed_input() {
        let (_, outcome, data) = drive(BubbleSort::new(Dataset::from_values(vec![5, 4, 3, 2, 1])));
        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(data.values(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn every_index_is_marked_sorted_once() {
        let (checkpoints, _, _) =
            drive(BubbleSort::new(Dataset::from_values(vec![3, 1, 4, 1, 5, 9, 2, 6])));
        assert_eq!(mark_count(&checkpoints), 8);
    }

    #[test]
    fn sorted_input_terminates_after_one_pass() {
        let (checkpoints, outcome, _) =
            drive(BubbleSort::new(Dataset::from_values(vec![1, 2, 3, 4])));
        assert_eq!(outcome, Outcome::Completed);
        // One pass of n-1 compares, no swaps, then n sorted marks.
        let compares = checkpoints
            .iter()
            .filter(|cp| matches!(cp.kind, CheckpointKind::Compare { .. }))
            .count();
        assert_eq!(compares, 3);
        assert_eq!(mark_count(&checkpoints), 4);
        assert!(!checkpoints
            .iter()
            .any(|cp| matches!(cp.kind, CheckpointKind::Swap { .. })));
    }

    #[test]
    fn swap_follows_out_of_order_compare() {
        let mut sort = BubbleSort::new(Dataset::from_values(vec![2, 1]));
        let first = sort.step();
        assert!(matches!(
            first,
            Step::Emit(Checkpoint {
                kind: CheckpointKind::Compare { a: 0, b: 1, values: (2, 1) },
                ..
            })
        ));
        let second = sort.step();
        assert!(matches!(
            second,
            Step::Emit(Checkpoint {
                kind: CheckpointKind::Swap { a: 0, b: 1 },
                ..
            })
        ));
    }

    #[test]
    fn empty_dataset_completes_immediately() {
        let (checkpoints, outcome, _) = drive(BubbleSort::new(Dataset::from_values(vec![])));
        assert!(checkpoints.is_empty());
        assert_eq!(outcome, Outcome::Completed);
    }

    #[test]
    fn single_element_is_marked_sorted() {
        let (checkpoints, _, _) = drive(BubbleSort::new(Dataset::from_values(vec![7])));
        assert_eq!(checkpoints.len(), 1);
        assert!(matches!(
            checkpoints[0].kind,
            CheckpointKind::MarkSorted { index: 0 }
        ));
    }

    #[test]
    fn reset_restarts_over_current_values() {
        let mut sort = BubbleSort::new(Dataset::from_values(vec![3, 1, 2]));
        loop {
            if let Step::Done(_) = sort.step() {
                break;
            }
        }
        sort.reset();
        assert!(!sort.is_complete());
        let (checkpoints, outcome, data) = drive(sort);
        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(data.values(), &[1, 2, 3]);
        // The data is already sorted now, so one clean pass suffices.
        let compares = checkpoints
            .iter()
            .filter(|cp| matches!(cp.kind, CheckpointKind::Compare { .. }))
            .count();
        assert_eq!(compares, 2);
    }

    #[test]
    fn preserves_multiset() {
        let input = vec![4, 4, 1, 3, 1];
        let (_, _, data) = drive(BubbleSort::new(Dataset::from_values(input.clone())));
        let mut expected = input;
        expected.sort_unstable();
        assert_eq!(data.values(), &expected[..]);
    }
}
