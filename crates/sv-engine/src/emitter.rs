//! The audio emitter: turns algorithm events into scheduled tones.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use sv_ir::{Checkpoint, CheckpointKind, CheckpointSink, Dataset};

use crate::tone::value_to_frequency;

/// Default tone length.
pub const DEFAULT_TONE_MS: u32 = 100;

/// Length of each half of a comparison tone pair.
pub const COMPARE_TONE_MS: u32 = 50;

/// Offset of the second comparison tone.
pub const COMPARE_TONE_OFFSET_MS: u32 = 25;

/// Length of a swap/assign tone.
pub const SWAP_TONE_MS: u32 = 80;

/// Per-voice volume scale inside a chord.
pub const CHORD_VOICE_SCALE: f32 = 0.3;

const SEQUENCE_TONE_MS: u32 = 200;
const SEQUENCE_STEP_MS: u32 = 150;
const SEQUENCE_PAUSE_MS: u32 = 200;
const SEQUENCE_CHORD_MS: u32 = 1000;

/// Volume granularity: stored in 0..=64 units.
const VOLUME_UNITS: f32 = 64.0;

const DEFAULT_VOLUME: f32 = 0.1;

/// A tone to be scheduled against the synth clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneCommand {
    /// Delay from "now" to tone onset.
    pub offset_ms: u32,
    pub frequency: f32,
    pub duration_ms: u32,
    /// Peak envelope gain.
    pub amplitude: f32,
}

/// Receives scheduled tones; the synth implements this directly, the
/// audio backend implements it as a channel to the realtime thread.
pub trait ToneSink {
    fn schedule(&mut self, tone: ToneCommand);
}

impl<T: ToneSink + ?Sized> ToneSink for Box<T> {
    fn schedule(&mut self, tone: ToneCommand) {
        (**self).schedule(tone);
    }
}

/// Discards all tones (audio-less runs).
#[derive(Clone, Copy, Debug, Default)]
pub struct NullToneSink;

impl ToneSink for NullToneSink {
    fn schedule(&mut self, _tone: ToneCommand) {}
}

/// The emitter's shared state: mute flag, volume, and the
/// comparison-mode suppression flag.
///
/// Cloned handles observe the same state, which is how the two sides
/// of a comparison session share one suppression flag. Every field is
/// read at tone-emission time, never cached.
#[derive(Clone, Debug)]
pub struct EmitterControls {
    enabled: Arc<AtomicBool>,
    /// Volume in 0..=64 units.
    volume: Arc<AtomicU8>,
    comparison_mode: Arc<AtomicBool>,
}

impl Default for EmitterControls {
    fn default() -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(true)),
            volume: Arc::new(AtomicU8::new((DEFAULT_VOLUME * VOLUME_UNITS) as u8)),
            comparison_mode: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl EmitterControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Flip the mute state, returning the new enabled value.
    pub fn toggle_sound(&self) -> bool {
        let enabled = !self.is_enabled();
        self.set_enabled(enabled);
        enabled
    }

    /// Volume as a scalar in [0, 1].
    pub fn volume(&self) -> f32 {
        self.volume.load(Ordering::Relaxed) as f32 / VOLUME_UNITS
    }

    pub fn set_volume(&self, volume: f32) {
        let units = (volume.clamp(0.0, 1.0) * VOLUME_UNITS) as u8;
        self.volume.store(units, Ordering::Relaxed);
    }

    pub fn is_comparison_mode(&self) -> bool {
        self.comparison_mode.load(Ordering::Relaxed)
    }

    pub fn set_comparison_mode(&self, suppressed: bool) {
        self.comparison_mode.store(suppressed, Ordering::Relaxed);
    }
}

/// Schedules tones for algorithm events, gated by the shared controls.
///
/// Every emission checks the controls at call time; disabling sound or
/// entering comparison mode makes all of these no-ops immediately.
pub struct AudioEmitter<S: ToneSink> {
    sink: S,
    controls: EmitterControls,
}

impl<S: ToneSink> AudioEmitter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            controls: EmitterControls::new(),
        }
    }

    pub fn with_controls(sink: S, controls: EmitterControls) -> Self {
        Self { sink, controls }
    }

    pub fn controls(&self) -> &EmitterControls {
        &self.controls
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn muted(&self) -> bool {
        !self.controls.is_enabled() || self.controls.is_comparison_mode()
    }

    fn schedule(&mut self, offset_ms: u32, frequency: f32, duration_ms: u32, amplitude: f32) {
        self.sink.schedule(ToneCommand {
            offset_ms,
            frequency,
            duration_ms,
            amplitude,
        });
    }

    /// One enveloped tone.
    pub fn tone(&mut self, frequency: f32, duration_ms: u32) {
        if self.muted() {
            return;
        }
        let amplitude = self.controls.volume();
        self.schedule(0, frequency, duration_ms, amplitude);
    }

    /// Two short tones for a comparison, the second slightly offset.
    pub fn comparison_tone(&mut self, freq_a: f32, freq_b: f32) {
        if self.muted() {
            return;
        }
        let amplitude = self.controls.volume();
        self.schedule(0, freq_a, COMPARE_TONE_MS, amplitude);
        self.schedule(COMPARE_TONE_OFFSET_MS, freq_b, COMPARE_TONE_MS, amplitude);
    }

    /// One short tone for a swap or assignment.
    pub fn swap_tone(&mut self, frequency: f32) {
        if self.muted() {
            return;
        }
        let amplitude = self.controls.volume();
        self.schedule(0, frequency, SWAP_TONE_MS, amplitude);
    }

    /// All frequencies at once, each at reduced volume.
    pub fn chord(&mut self, frequencies: &[f32], duration_ms: u32) {
        if self.muted() {
            return;
        }
        let amplitude = self.controls.volume() * CHORD_VOICE_SCALE;
        for &frequency in frequencies {
            self.schedule(0, frequency, duration_ms, amplitude);
        }
    }

    /// Play the finished dataset as an ascending-by-position melody,
    /// highlighting each bar, then close with a chord of every note.
    ///
    /// `delay` is the caller's pacing suspension (real time on a run
    /// thread, a no-op in tests). The caller must await this whole
    /// sequence before reporting completion.
    pub fn play_sorted_sequence(
        &mut self,
        data: &Dataset,
        sink: &mut dyn CheckpointSink,
        mut delay: impl FnMut(u32),
    ) {
        if self.muted() || data.is_empty() {
            return;
        }
        let max = data.max();
        for index in 0..data.len() {
            sink.on_checkpoint(&Checkpoint::array(
                CheckpointKind::Highlight { index },
                data,
            ));
            self.tone(value_to_frequency(data.get(index), max), SEQUENCE_TONE_MS);
            delay(SEQUENCE_STEP_MS);
        }
        delay(SEQUENCE_PAUSE_MS);
        let frequencies: Vec<f32> = data
            .values()
            .iter()
            .map(|&v| value_to_frequency(v, max))
            .collect();
        self.chord(&frequencies, SEQUENCE_CHORD_MS);
    }
}
