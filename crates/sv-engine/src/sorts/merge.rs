//! Merge sort stepper.

use alloc::vec::Vec;

use sv_ir::{Checkpoint, CheckpointKind, Dataset, Outcome};

use crate::stepper::{Step, Stepper};

/// Pending work: split a range, or merge two already-sorted halves.
#[derive(Clone, Copy, Debug)]
enum Task {
    Split { low: usize, high: usize },
    Merge { low: usize, mid: usize, high: usize },
}

/// An in-progress merge of `data[low..=mid]` and `data[mid+1..=high]`.
///
/// The halves are copied out up front (the classic temp-array merge),
/// then written back one element per step.
struct MergeState {
    low: usize,
    mid: usize,
    high: usize,
    left: Vec<u32>,
    right: Vec<u32>,
    /// Consumed counts from each half.
    i: usize,
    j: usize,
    /// Next write-back slot.
    k: usize,
    /// A compare step decided this value; the next step writes it.
    pending: Option<(u32, bool)>,
}

impl MergeState {
    fn new(data: &Dataset, low: usize, mid: usize, high: usize) -> Self {
        Self {
            low,
            mid,
            high,
            left: data.values()[low..=mid].to_vec(),
            right: data.values()[mid + 1..=high].to_vec(),
            i: 0,
            j: 0,
            k: low,
            pending: None,
        }
    }

    fn exhausted(&self) -> bool {
        self.i >= self.left.len() && self.j >= self.right.len()
    }
}

/// Top-down merge sort with an explicit work stack.
///
/// Children of a split complete before the parent's merge starts, so a
/// merge always sees two sorted halves. The final whole-array merge is
/// followed by a sorted-mark sweep over every index.
pub struct MergeSort {
    data: Dataset,
    stack: Vec<Task>,
    active: Option<MergeState>,
    /// Sweep cursor for the completion marking pass.
    marking: Option<usize>,
    finished: bool,
}

impl MergeSort {
    pub fn new(data: Dataset) -> Self {
        let mut sort = Self {
            data,
            stack: Vec::new(),
            active: None,
            marking: None,
            finished: true,
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

    /// Pop tasks until a merge becomes active. Splits are bookkeeping,
    /// not primitives, so they consume no step.
    fn activate_next_merge(&mut self) {
        while let Some(task) = self.stack.pop() {
            match task {
                Task::Split { low, high } => {
                    if low >= high {
                        continue;
                    }
                    let mid = low + (high - low) / 2;
                    self.stack.push(Task::Merge { low, mid, high });
                    self.stack.push(Task::Split { low: mid + 1, high });
                    self.stack.push(Task::Split { low, high: mid });
                }
                Task::Merge { low, mid, high } => {
                    self.active = Some(MergeState::new(&self.data, low, mid, high));
                    return;
                }
            }
        }
    }

    /// Write one element back into the range; retire the merge when
    /// both halves are consumed.
    fn write_back(&mut self, value: u32, from_left: bool) -> Checkpoint {
        let state = self.active.as_mut().unwrap();
        let index = state.k;
        self.data.assign(index, value);
        if from_left {
            state.i += 1;
        } else {
            state.j += 1;
        }
        state.k += 1;
        if state.exhausted() {
            let whole_array = state.low == 0 && state.high == self.data.len() - 1;
            self.active = None;
            if whole_array {
                self.marking = Some(0);
            }
        }
        Checkpoint::array(CheckpointKind::Assign { index, value }, &self.data)
    }
}

impl Stepper for MergeSort {
    fn step(&mut self) -> Step {
        if self.finished {
            return Step::Done(Outcome::Completed);
        }

        // Completion sweep after the whole-array merge.
        if let Some(index) = self.marking {
            self.marking = if index + 1 < self.data.len() {
                Some(index + 1)
            } else {
                self.finished = true;
                None
            };
            return Step::Emit(Checkpoint::array(
                CheckpointKind::MarkSorted { index },
                &self.data,
            ));
        }

        if self.active.is_none() {
            self.activate_next_merge();
            if self.active.is_none() {
                self.finished = true;
                return Step::Done(Outcome::Completed);
            }
        }

        if let Some((value, from_left)) = self.active.as_mut().unwrap().pending.take() {
            return Step::Emit(self.write_back(value, from_left));
        }

        let state = self.active.as_mut().unwrap();
        if state.i < state.left.len() && state.j < state.right.len() {
            // Stable: ties take from the left half.
            let (lv, rv) = (state.left[state.i], state.right[state.j]);
            state.pending = Some(if lv <= rv { (lv, true) } else { (rv, false) });
            let (a, b) = (state.low + state.i, state.mid + 1 + state.j);
            return Step::Emit(Checkpoint::array(
                CheckpointKind::Compare { a, b, values: (lv, rv) },
                &self.data,
            ));
        }

        // One half exhausted: the tail copies need no compare.
        let (value, from_left) = if state.i < state.left.len() {
            (state.left[state.i], true)
        } else {
            (state.right[state.j], false)
        };
        Step::Emit(self.write_back(value, from_left))
    }

    fn is_complete(&self) -> bool {
        self.finished
    }

    fn reset(&mut self) {
        self.active = None;
        self.stack.clear();
        self.marking = None;
        self.finished = false;
        match self.data.len() {
            0 => self.finished = true,
            1 => self.marking = Some(0),
            n => self.stack.push(Task::Split { low: 0, high: n - 1 }),
        }
    }
}
