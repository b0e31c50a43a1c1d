//! Side-by-side comparison session.

use sv_engine::{AudioEmitter, EmitterControls, SortAlgorithm, SortRunner, ToneSink};
use sv_ir::{CheckpointSink, Dataset, DatasetGenerator, Outcome};

use crate::driver::{spawn_sort_run, RunHandle};
use crate::pacing::Pacing;
use crate::{SessionError, MAX_DATASET_SIZE, MIN_DATASET_SIZE};

/// Which half of a comparison session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

/// Runs two different sorts concurrently over value-identical,
/// storage-independent datasets.
///
/// Each side has its own dataset, run state, and cancellation token;
/// the only shared state is the emitter controls, whose comparison
/// flag suppresses audio for the duration of the session. Joint
/// completion means both sides have terminated, in either order.
pub struct ComparisonSession {
    algorithms: (SortAlgorithm, SortAlgorithm),
    size: usize,
    seed: u64,
    pacing: (Pacing, Pacing),
    controls: EmitterControls,
    datasets: Option<(Dataset, Dataset)>,
    runs: Option<(RunHandle, RunHandle)>,
    outcomes: Option<(Outcome, Outcome)>,
}

impl ComparisonSession {
    pub fn new(
        first: SortAlgorithm,
        second: SortAlgorithm,
        size: usize,
    ) -> Result<Self, SessionError> {
        Self::with_controls(first, second, size, EmitterControls::new())
    }

    /// Build a session sharing the caller's emitter controls (so the
    /// comparison suppression is visible to the rest of the app).
    pub fn with_controls(
        first: SortAlgorithm,
        second: SortAlgorithm,
        size: usize,
        controls: EmitterControls,
    ) -> Result<Self, SessionError> {
        if first == second {
            return Err(SessionError::IdenticalAlgorithms);
        }
        if !(MIN_DATASET_SIZE..=MAX_DATASET_SIZE).contains(&size) {
            return Err(SessionError::SizeOutOfRange(size));
        }
        Ok(Self {
            algorithms: (first, second),
            size,
            seed: 1,
            pacing: (Pacing::sort_default(first), Pacing::sort_default(second)),
            controls,
            datasets: None,
            runs: None,
            outcomes: None,
        })
    }

    /// Override the per-side pacing.
    pub fn set_pacing(&mut self, first: Pacing, second: Pacing) {
        self.pacing = (first, second);
    }

    pub fn controls(&self) -> &EmitterControls {
        &self.controls
    }

    /// Generate the identical dataset pair.
    pub fn generate(&mut self, seed: u64) {
        self.seed = seed;
        let first = DatasetGenerator::new(seed).generate(self.size);
        let second = first.clone();
        self.datasets = Some((first, second));
        self.outcomes = None;
    }

    pub fn datasets(&self) -> Option<(&Dataset, &Dataset)> {
        self.datasets.as_ref().map(|(a, b)| (a, b))
    }

    pub fn outcomes(&self) -> Option<(Outcome, Outcome)> {
        self.outcomes
    }

    pub fn is_running(&self) -> bool {
        self.runs
            .as_ref()
            .is_some_and(|(a, b)| !a.is_finished() || !b.is_finished())
    }

    /// Start both sides. Datasets are generated on demand; audio is
    /// suppressed for the whole session; the musical finale never
    /// plays in comparison mode.
    pub fn start<C1, C2, T1, T2>(
        &mut self,
        first_sink: C1,
        second_sink: C2,
        first_tones: T1,
        second_tones: T2,
    ) where
        C1: CheckpointSink + Send + 'static,
        C2: CheckpointSink + Send + 'static,
        T1: ToneSink + Send + 'static,
        T2: ToneSink + Send + 'static,
    {
        self.stop();
        if self.datasets.is_none() {
            self.generate(self.seed);
        }
        let (first_data, second_data) = self.datasets.take().unwrap();
        self.controls.set_comparison_mode(true);

        let first = spawn_sort_run(
            SortRunner::new(self.algorithms.0, first_data),
            first_sink,
            AudioEmitter::with_controls(first_tones, self.controls.clone()),
            self.pacing.0,
            false,
        );
        let second = spawn_sort_run(
            SortRunner::new(self.algorithms.1, second_data),
            second_sink,
            AudioEmitter::with_controls(second_tones, self.controls.clone()),
            self.pacing.1,
            false,
        );
        self.runs = Some((first, second));
    }

    /// Cancel one side only; the other keeps running.
    pub fn cancel_side(&self, side: Side) {
        if let Some((first, second)) = &self.runs {
            match side {
                Side::First => first.cancel(),
                Side::Second => second.cancel(),
            }
        }
    }

    /// Block until both sides terminate, in either order.
    pub fn wait(&mut self) -> Option<(Outcome, Outcome)> {
        if let Some((first, second)) = self.runs.take() {
            let (first_outcome, first_data) = first.join();
            let (second_outcome, second_data) = second.join();
            self.datasets = Some((first_data, second_data));
            self.outcomes = Some((first_outcome, second_outcome));
            self.controls.set_comparison_mode(false);
        }
        self.outcomes
    }

    /// Cancel both sides and await them.
    pub fn stop(&mut self) {
        if let Some((first, second)) = &self.runs {
            first.cancel();
            second.cancel();
        }
        self.wait();
    }

    /// Stop everything and drop the datasets. Idempotent.
    pub fn reset(&mut self) {
        self.stop();
        self.datasets = None;
        self.outcomes = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_engine::NullToneSink;
    use sv_ir::NullSink;

    fn session() -> ComparisonSession {
        let mut s =
            ComparisonSession::new(SortAlgorithm::Quick, SortAlgorithm::Merge, 50).unwrap();
        s.set_pacing(Pacing::zero(), Pacing::zero());
        s
    }

    #[test]
    fn rejects_identical_algorithms() {
        assert_eq!(
            ComparisonSession::new(SortAlgorithm::Quick, SortAlgorithm::Quick, 50).err(),
            Some(SessionError::IdenticalAlgorithms)
        );
    }

    #[test]
    fn datasets_start_identical_but_independent() {
        let mut s = session();
        s.generate(42);
        let (a, b) = s.datasets().unwrap();
        assert_eq!(a.values(), b.values());
        // Independent storage: sorting one must not touch the other.
        s.start(NullSink, NullSink, NullToneSink, NullToneSink);
        let (first, second) = s.wait().unwrap();
        assert_eq!(first, Outcome::Completed);
        assert_eq!(second, Outcome::Completed);
        let (a, b) = s.datasets().unwrap();
        assert!(a.is_sorted());
        assert!(b.is_sorted());
    }

    #[test]
    fn comparison_mode_is_suppressed_while_running_and_restored_after() {
        let mut s = session();
        assert!(!s.controls().is_comparison_mode());
        s.start(NullSink, NullSink, NullToneSink, NullToneSink);
        s.wait();
        assert!(!s.controls().is_comparison_mode());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut s = session();
        s.start(NullSink, NullSink, NullToneSink, NullToneSink);
        s.reset();
        assert!(s.datasets().is_none());
        s.reset();
        assert!(s.datasets().is_none());
        assert!(!s.is_running());
    }
}
