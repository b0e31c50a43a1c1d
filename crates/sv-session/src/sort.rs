//! Single-run sort session.

use sv_engine::{AudioEmitter, SortAlgorithm, SortRunner, ToneSink};
use sv_ir::{CheckpointSink, Dataset, DatasetGenerator, Outcome};

use crate::driver::{spawn_sort_run, RunHandle};
use crate::pacing::Pacing;
use crate::{SessionError, MAX_DATASET_SIZE, MIN_DATASET_SIZE};

/// Configuration for a single sorting run.
#[derive(Clone, Copy, Debug)]
pub struct SortConfig {
    pub algorithm: SortAlgorithm,
    pub size: usize,
    pub seed: u64,
    /// Play the sorted-sequence finale after completion.
    pub musical_finale: bool,
    pub pacing: Pacing,
}

impl SortConfig {
    pub fn new(algorithm: SortAlgorithm, size: usize) -> Self {
        Self {
            algorithm,
            size,
            seed: 1,
            musical_finale: true,
            pacing: Pacing::sort_default(algorithm),
        }
    }
}

/// Owns one dataset and at most one running sort over it.
///
/// The session generates the dataset, lends it to a run thread, and
/// takes the (possibly partially sorted) values back when the run
/// ends or is stopped.
pub struct SortSession {
    config: SortConfig,
    dataset: Dataset,
    outcome: Option<Outcome>,
    run: Option<RunHandle>,
}

impl SortSession {
    pub fn new(config: SortConfig) -> Result<Self, SessionError> {
        if !(MIN_DATASET_SIZE..=MAX_DATASET_SIZE).contains(&config.size) {
            return Err(SessionError::SizeOutOfRange(config.size));
        }
        let dataset = DatasetGenerator::new(config.seed).generate(config.size);
        Ok(Self {
            config,
            dataset,
            outcome: None,
            run: None,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_running(&self) -> bool {
        self.run.as_ref().is_some_and(|r| !r.is_finished())
    }

    /// Replace the dataset with a fresh one. Stops any running sort.
    pub fn regenerate(&mut self, seed: u64) {
        self.stop();
        self.config.seed = seed;
        self.dataset = DatasetGenerator::new(seed).generate(self.config.size);
        self.outcome = None;
    }

    /// Start the run on its own thread. An already-running sort is
    /// stopped first.
    ///
    /// Checkpoints go to `sink`, tones to `emitter`; the musical
    /// finale plays on the run thread after completion when the config
    /// asks for it (and the emitter is not muted or suppressed).
    pub fn start<CS, TS>(&mut self, sink: CS, emitter: AudioEmitter<TS>)
    where
        CS: CheckpointSink + Send + 'static,
        TS: ToneSink + Send + 'static,
    {
        self.stop();
        let runner = SortRunner::new(self.config.algorithm, self.dataset.clone());
        self.run = Some(spawn_sort_run(
            runner,
            sink,
            emitter,
            self.config.pacing,
            self.config.musical_finale,
        ));
    }

    /// Request cancellation and reclaim the dataset.
    pub fn stop(&mut self) {
        if let Some(run) = self.run.take() {
            run.cancel();
            let (outcome, dataset) = run.join();
            self.outcome = Some(outcome);
            self.dataset = dataset;
        }
    }

    /// Block until the run ends, returning its outcome.
    pub fn wait(&mut self) -> Option<Outcome> {
        if let Some(run) = self.run.take() {
            let (outcome, dataset) = run.join();
            self.outcome = Some(outcome);
            self.dataset = dataset;
        }
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_engine::NullToneSink;
    use sv_ir::NullSink;

    fn quick_config() -> SortConfig {
        let mut config = SortConfig::new(SortAlgorithm::Quick, 30);
        config.pacing = Pacing::zero();
        config.musical_finale = false;
        config
    }

    #[test]
    fn rejects_out_of_range_sizes() {
        assert_eq!(
            SortSession::new(SortConfig::new(SortAlgorithm::Bubble, 5)).err(),
            Some(SessionError::SizeOutOfRange(5))
        );
        assert_eq!(
            SortSession::new(SortConfig::new(SortAlgorithm::Bubble, 200)).err(),
            Some(SessionError::SizeOutOfRange(200))
        );
    }

    #[test]
    fn run_sorts_the_dataset() {
        let mut session = SortSession::new(quick_config()).unwrap();
        assert!(!session.dataset().is_sorted());
        session.start(NullSink, AudioEmitter::new(NullToneSink));
        assert_eq!(session.wait(), Some(Outcome::Completed));
        assert!(session.dataset().is_sorted());
        assert!(!session.is_running());
    }

    #[test]
    fn regenerate_resets_outcome() {
        let mut session = SortSession::new(quick_config()).unwrap();
        session.start(NullSink, AudioEmitter::new(NullToneSink));
        session.wait();
        session.regenerate(7);
        assert_eq!(session.outcome(), None);
        assert!(!session.dataset().is_sorted());
    }

    #[test]
    fn stop_without_start_is_a_no_op() {
        let mut session = SortSession::new(quick_config()).unwrap();
        session.stop();
        assert_eq!(session.outcome(), None);
    }
}
