//! The push-mode run loop.
//!
//! The steppers are pull-based; this driver turns one into a
//! self-driving run: poll the cancellation token, take one step, feed
//! the checkpoint to the sink and the emitter, then suspend for the
//! configured delay. The pull shape stays available by calling
//! [`sv_engine::Stepper::step`] directly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use sv_engine::{value_to_frequency, AudioEmitter, Step, Stepper, ToneSink};
use sv_ir::{CancellationToken, Checkpoint, CheckpointKind, CheckpointSink, Dataset, Outcome};

use crate::pacing::Pacing;

/// Drive a stepper to its terminal state.
///
/// Cancellation is observed before every step, so once the token is
/// set no primitive operation after the one in flight executes.
pub fn run_to_completion<A, S>(
    stepper: &mut A,
    sink: &mut dyn CheckpointSink,
    emitter: &mut AudioEmitter<S>,
    token: &CancellationToken,
    pacing: &Pacing,
    dataset_max: u32,
) -> Outcome
where
    A: Stepper,
    S: ToneSink,
{
    loop {
        if token.is_cancelled() {
            return Outcome::Cancelled;
        }
        match stepper.step() {
            Step::Emit(checkpoint) => {
                sink.on_checkpoint(&checkpoint);
                sonify(emitter, &checkpoint, dataset_max);
                let delay = pacing.delay_for(&checkpoint.kind);
                if delay > 0 {
                    std::thread::sleep(Duration::from_millis(delay as u64));
                }
            }
            Step::Done(outcome) => return outcome,
        }
    }
}

/// Map a checkpoint to its sound.
fn sonify<S: ToneSink>(emitter: &mut AudioEmitter<S>, checkpoint: &Checkpoint, dataset_max: u32) {
    match checkpoint.kind {
        CheckpointKind::Compare { values: (a, b), .. } => {
            emitter.comparison_tone(
                value_to_frequency(a, dataset_max),
                value_to_frequency(b, dataset_max),
            );
        }
        CheckpointKind::Swap { a, .. } => {
            emitter.swap_tone(value_to_frequency(checkpoint.values[a], dataset_max));
        }
        CheckpointKind::Assign { value, .. } => {
            emitter.swap_tone(value_to_frequency(value, dataset_max));
        }
        _ => {}
    }
}

/// A sort run executing on its own thread.
pub(crate) struct RunHandle {
    pub(crate) token: CancellationToken,
    finished: Arc<AtomicBool>,
    thread: Option<JoinHandle<(Outcome, Dataset)>>,
}

impl RunHandle {
    pub(crate) fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Relaxed)
    }

    pub(crate) fn cancel(&self) {
        self.token.cancel();
    }

    /// Block until the run thread ends, yielding its outcome and the
    /// final dataset.
    pub(crate) fn join(mut self) -> (Outcome, Dataset) {
        let thread = self.thread.take().expect("run already joined");
        thread.join().expect("run thread panicked")
    }
}

/// Spawn a sorting run; the session layer builds the pieces.
pub(crate) fn spawn_sort_run<CS, TS>(
    mut runner: sv_engine::SortRunner,
    mut sink: CS,
    mut emitter: AudioEmitter<TS>,
    pacing: Pacing,
    musical_finale: bool,
) -> RunHandle
where
    CS: CheckpointSink + Send + 'static,
    TS: ToneSink + Send + 'static,
{
    let token = CancellationToken::new();
    let finished = Arc::new(AtomicBool::new(false));

    let run_token = token.clone();
    let run_finished = finished.clone();
    let thread = std::thread::spawn(move || {
        let dataset_max = runner.dataset().max();
        let outcome = run_to_completion(
            &mut runner,
            &mut sink,
            &mut emitter,
            &run_token,
            &pacing,
            dataset_max,
        );

        if outcome == Outcome::Completed && musical_finale {
            if pacing.finale_lead_ms > 0 {
                std::thread::sleep(Duration::from_millis(pacing.finale_lead_ms as u64));
            }
            if pacing.is_zero() {
                emitter.play_sorted_sequence(runner.dataset(), &mut sink, |_| {});
            } else {
                emitter.play_sorted_sequence(runner.dataset(), &mut sink, |ms| {
                    std::thread::sleep(Duration::from_millis(ms as u64))
                });
            }
        }

        run_finished.store(true, Ordering::Relaxed);
        (outcome, runner.into_dataset())
    });

    RunHandle {
        token,
        finished,
        thread: Some(thread),
    }
}
