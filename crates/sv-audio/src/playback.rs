//! The audio playback thread.
//!
//! Sessions emit tone commands from their run threads; this module
//! carries them over a channel to a dedicated thread that owns the
//! synth and the cpal output, rendering frame by frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

use sv_engine::{Synth, ToneCommand, ToneSink};

use crate::cpal_backend::CpalOutput;
use crate::traits::{AudioError, AudioOutput};

/// Sends tone commands to the playback thread.
///
/// Cheap to clone; every session side can hold one.
#[derive(Clone)]
pub struct ChannelSink {
    tx: Sender<ToneCommand>,
}

impl ToneSink for ChannelSink {
    fn schedule(&mut self, tone: ToneCommand) {
        // The playback thread may already be gone during shutdown.
        let _ = self.tx.send(tone);
    }
}

/// Handle to the running playback thread.
///
/// Dropping the handle stops the thread after in-flight tones finish.
pub struct AudioHandle {
    tx: Sender<ToneCommand>,
    stop_signal: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl AudioHandle {
    /// Spawn the playback thread and wait for the device to come up.
    ///
    /// The cpal stream must be created on the thread that owns it, so
    /// initialization errors are reported back over a channel.
    pub fn start() -> Result<Self, AudioError> {
        let (tx, rx) = mpsc::channel();
        let stop_signal = Arc::new(AtomicBool::new(false));
        let (init_tx, init_rx) = mpsc::channel();

        let stop = stop_signal.clone();
        let thread = std::thread::spawn(move || {
            audio_thread(rx, stop, init_tx);
        });

        match init_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                tx,
                stop_signal,
                thread: Some(thread),
            }),
            Ok(Err(err)) => {
                let _ = thread.join();
                Err(err)
            }
            Err(_) => {
                let _ = thread.join();
                Err(AudioError::Playback(String::from(
                    "audio thread exited during init",
                )))
            }
        }
    }

    /// A tone sink feeding this playback thread.
    pub fn sink(&self) -> ChannelSink {
        ChannelSink {
            tx: self.tx.clone(),
        }
    }
}

impl Drop for AudioHandle {
    fn drop(&mut self) {
        self.stop_signal.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn audio_thread(
    rx: Receiver<ToneCommand>,
    stop_signal: Arc<AtomicBool>,
    init_tx: Sender<Result<(), AudioError>>,
) {
    let (mut output, consumer) = match CpalOutput::new() {
        Ok(pair) => pair,
        Err(err) => {
            let _ = init_tx.send(Err(err));
            return;
        }
    };
    if let Err(err) = output.build_stream(consumer) {
        let _ = init_tx.send(Err(err));
        return;
    }
    if let Err(err) = output.start() {
        let _ = init_tx.send(Err(err));
        return;
    }
    let _ = init_tx.send(Ok(()));

    let sample_rate = output.sample_rate();
    let mut synth = Synth::new(sample_rate);
    // After a stop request, drain for at most two seconds.
    let drain_limit = sample_rate as u64 * 2;
    let mut stopped_at: Option<u64> = None;

    loop {
        while let Ok(command) = rx.try_recv() {
            synth.schedule(command);
        }

        if stop_signal.load(Ordering::Relaxed) {
            let since = *stopped_at.get_or_insert(synth.clock());
            if synth.is_idle() || synth.clock() - since > drain_limit {
                break;
            }
        }

        output.write_spin(synth.render_frame());
    }

    let _ = output.stop();
}
