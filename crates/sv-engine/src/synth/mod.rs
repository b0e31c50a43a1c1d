//! Software tone synth.
//!
//! Consumes the emitter's scheduled tone commands and renders them as
//! enveloped sine voices, one frame at a time. Deterministic and
//! hardware-free; the audio backend pulls frames from it on the
//! realtime thread, and tests can render offline.

mod envelope;
mod queue;
mod voice;

pub use envelope::ToneEnvelope;
pub use queue::{ScheduledTone, ToneEventQueue};
pub use voice::{ToneVoice, ATTACK_MS};

use alloc::vec::Vec;

use crate::emitter::{ToneCommand, ToneSink};
use crate::frame::Frame;

/// Upper bound on simultaneous voices; a full-size chord fits with
/// headroom.
pub const MAX_VOICES: usize = 256;

/// Renders scheduled tones against a sample clock.
pub struct Synth {
    sample_rate: u32,
    /// Samples rendered since creation.
    clock: u64,
    queue: ToneEventQueue,
    voices: Vec<ToneVoice>,
}

impl Synth {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            clock: 0,
            queue: ToneEventQueue::new(),
            voices: Vec::new(),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    fn ms_to_samples(&self, ms: u32) -> u64 {
        ms as u64 * self.sample_rate as u64 / 1000
    }

    /// Place a tone on the timeline relative to the current clock.
    pub fn schedule(&mut self, command: ToneCommand) {
        self.queue.push(ScheduledTone {
            start: self.clock + self.ms_to_samples(command.offset_ms),
            frequency: command.frequency,
            duration: (self.ms_to_samples(command.duration_ms) as u32).max(1),
            amplitude: command.amplitude,
        });
    }

    /// Nothing playing and nothing scheduled.
    pub fn is_idle(&self) -> bool {
        self.voices.is_empty() && self.queue.pending() == 0
    }

    fn activate(&mut self, tone: ScheduledTone) {
        let voice = ToneVoice::new(
            tone.frequency,
            tone.amplitude,
            tone.duration,
            self.sample_rate,
        );
        if self.voices.len() >= MAX_VOICES {
            // Steal the slot closest to retiring.
            if let Some(victim) = self
                .voices
                .iter()
                .enumerate()
                .min_by_key(|(_, v)| v.remaining())
                .map(|(i, _)| i)
            {
                self.voices[victim] = voice;
            }
        } else {
            self.voices.push(voice);
        }
    }

    /// Render one frame and advance the clock.
    pub fn render_frame(&mut self) -> Frame {
        let due = self.queue.drain_until(self.clock);
        for index in due {
            if let Some(tone) = self.queue.get(index).copied() {
                self.activate(tone);
            }
        }
        self.queue.compact();

        let mut mix = 0.0f32;
        for voice in &mut self.voices {
            mix += voice.render();
        }
        self.voices.retain(|v| !v.finished());

        self.clock += 1;
        Frame::mono(mix).clamped()
    }
}

impl ToneSink for Synth {
    fn schedule(&mut self, tone: ToneCommand) {
        Synth::schedule(self, tone);
    }
}
