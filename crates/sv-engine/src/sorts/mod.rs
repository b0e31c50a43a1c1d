//! Sorting runners.
//!
//! Each runner owns its dataset for the duration of the run and hands
//! it back when the run ends. One checkpoint per primitive operation;
//! see the individual modules for the per-algorithm step shapes.

mod bubble;
mod merge;
mod quick;

pub use bubble::BubbleSort;
pub use merge::MergeSort;
pub use quick::QuickSort;

use sv_ir::Dataset;

use crate::stepper::{Step, Stepper};

/// Which sorting algorithm to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortAlgorithm {
    Bubble,
    Quick,
    Merge,
}

impl SortAlgorithm {
    /// Parse a selector string ("bubble" or "bubble-sort" etc).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "bubble" | "bubble-sort" => Some(Self::Bubble),
            "quick" | "quick-sort" => Some(Self::Quick),
            "merge" | "merge-sort" => Some(Self::Merge),
            _ => None,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Quick => "Quick Sort",
            Self::Merge => "Merge Sort",
        }
    }
}

/// A sorting run: one algorithm bound to one dataset.
pub enum SortRunner {
    Bubble(BubbleSort),
    Quick(QuickSort),
    Merge(MergeSort),
}

impl SortRunner {
    /// Start a run of `algorithm` over `data`.
    pub fn new(algorithm: SortAlgorithm, data: Dataset) -> Self {
        match algorithm {
            SortAlgorithm::Bubble => Self::Bubble(BubbleSort::new(data)),
            SortAlgorithm::Quick => Self::Quick(QuickSort::new(data)),
            SortAlgorithm::Merge => Self::Merge(MergeSort::new(data)),
        }
    }

    /// The dataset in its current state.
    pub fn dataset(&self) -> &Dataset {
        match self {
            Self::Bubble(s) => s.dataset(),
            Self::Quick(s) => s.dataset(),
            Self::Merge(s) => s.dataset(),
        }
    }

    /// Give the dataset back (typically after the run terminates).
    pub fn into_dataset(self) -> Dataset {
        match self {
            Self::Bubble(s) => s.into_dataset(),
            Self::Quick(s) => s.into_dataset(),
            Self::Merge(s) => s.into_dataset(),
        }
    }
}

impl Stepper for SortRunner {
    fn step(&mut self) -> Step {
        match self {
            Self::Bubble(s) => s.step(),
            Self::Quick(s) => s.step(),
            Self::Merge(s) => s.step(),
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            Self::Bubble(s) => s.is_complete(),
            Self::Quick(s) => s.is_complete(),
            Self::Merge(s) => s.is_complete(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Bubble(s) => s.reset(),
            Self::Quick(s) => s.reset(),
            Self::Merge(s) => s.reset(),
        }
    }
}
