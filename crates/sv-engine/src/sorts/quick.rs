//! Quick sort stepper (Lomuto partition).

use alloc::collections::VecDeque;

use sv_ir::{Checkpoint, CheckpointKind, Dataset, Outcome};

use crate::stepper::{Step, Stepper};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum JobPhase {
    /// One-element range: mark it sorted.
    Single,
    /// Announce the pivot (last element of the range).
    PivotSelect,
    /// Compare the scan cursor against the pivot.
    Compare,
    /// The scanned element belongs on the low side; swap it in.
    SwapLess,
    /// Scan done; move the pivot into its final slot.
    SwapPivot,
    /// The pivot is in place; mark it and spawn the sub-ranges.
    MarkPivot,
}

/// One partition of the array, advanced one primitive at a time.
#[derive(Clone, Copy, Debug)]
struct PartitionJob {
    low: usize,
    high: usize,
    /// Next slot for an element smaller than the pivot.
    store: usize,
    /// Forward scan position.
    cursor: usize,
    phase: JobPhase,
}

impl PartitionJob {
    fn range(low: usize, high: usize) -> Self {
        Self {
            low,
            high,
            store: low,
            cursor: low,
            phase: if low == high {
                JobPhase::Single
            } else {
                JobPhase::PivotSelect
            },
        }
    }
}

/// Lomuto-partition quick sort.
///
/// Partition jobs live in a deque and are advanced round-robin, one
/// primitive per step, so the two sub-ranges spawned by a finished
/// partition interleave their checkpoints the way concurrently
/// scheduled tasks would. The ranges are disjoint by construction, so
/// the interleaving cannot race on an index.
pub struct QuickSort {
    data: Dataset,
    jobs: VecDeque<PartitionJob>,
}

impl QuickSort {
    pub fn new(data: Dataset) -> Self {
        let mut sort = Self {
            data,
            jobs: VecDeque::new(),
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

    /// Queue the sub-ranges left and right of a placed pivot.
    fn spawn_children(&mut self, job: &PartitionJob, pivot: usize) {
        if pivot > job.low {
            self.jobs
                .push_back(PartitionJob::range(job.low, pivot - 1));
        }
        if pivot < job.high {
            self.jobs
                .push_back(PartitionJob::range(pivot + 1, job.high));
        }
    }
}

impl Stepper for QuickSort {
    fn step(&mut self) -> Step {
        let Some(mut job) = self.jobs.pop_front() else {
            return Step::Done(Outcome::Completed);
        };

        match job.phase {
            JobPhase::Single => Step::Emit(Checkpoint::array(
                CheckpointKind::MarkSorted { index: job.low },
                &self.data,
            )),
            JobPhase::PivotSelect => {
                let index = job.high;
                job.phase = JobPhase::Compare;
                self.jobs.push_back(job);
                Step::Emit(Checkpoint::array(
                    CheckpointKind::PivotSelect { index },
                    &self.data,
                ))
            }
            JobPhase::Compare => {
                let pivot = self.data.get(job.high);
                let scanned = self.data.get(job.cursor);
                let checkpoint = Checkpoint::array(
                    CheckpointKind::Compare {
                        a: job.cursor,
                        b: job.high,
                        values: (scanned, pivot),
                    },
                    &self.data,
                );
                if scanned < pivot {
                    job.phase = JobPhase::SwapLess;
                } else {
                    job.cursor += 1;
                    if job.cursor >= job.high {
                        job.phase = JobPhase::SwapPivot;
                    }
                }
                self.jobs.push_back(job);
                Step::Emit(checkpoint)
            }
            JobPhase::SwapLess => {
                let (a, b) = (job.store, job.cursor);
                self.data.swap(a, b);
                job.store += 1;
                job.cursor += 1;
                job.phase = if job.cursor >= job.high {
                    JobPhase::SwapPivot
                } else {
                    JobPhase::Compare
                };
                self.jobs.push_back(job);
                Step::Emit(Checkpoint::array(CheckpointKind::Swap { a, b }, &self.data))
            }
            JobPhase::SwapPivot => {
                let (a, b) = (job.store, job.high);
                self.data.swap(a, b);
                job.phase = JobPhase::MarkPivot;
                self.jobs.push_back(job);
                Step::Emit(Checkpoint::array(CheckpointKind::Swap { a, b }, &self.data))
            }
            JobPhase::MarkPivot => {
                let pivot = job.store;
                self.spawn_children(&job, pivot);
                Step::Emit(Checkpoint::array(
                    CheckpointKind::MarkSorted { index: pivot },
                    &self.data,
                ))
            }
        }
    }

    fn is_complete(&self) -> bool {
        self.jobs.is_empty()
    }

    fn reset(&mut self) {
        self.jobs.clear();
        if !self.data.is_empty() {
            self.jobs
                .push_back(PartitionJob::range(0, self.data.len() - 1));
        }
    }
}
