//! A single sine voice with an amplitude envelope.

use core::f32::consts::TAU;

use libm::sinf;

use crate::synth::envelope::ToneEnvelope;

/// Samples of linear attack at 44.1 kHz equivalent: 10 ms.
pub const ATTACK_MS: u32 = 10;

/// One playing tone: sine oscillator plus envelope.
#[derive(Clone, Debug)]
pub struct ToneVoice {
    phase: f32,
    phase_inc: f32,
    /// Samples rendered so far.
    age: u32,
    envelope: ToneEnvelope,
}

impl ToneVoice {
    pub fn new(frequency: f32, amplitude: f32, duration: u32, sample_rate: u32) -> Self {
        let attack = sample_rate / 1000 * ATTACK_MS;
        Self {
            phase: 0.0,
            phase_inc: TAU * frequency / sample_rate as f32,
            age: 0,
            envelope: ToneEnvelope::new(attack, duration, amplitude),
        }
    }

    /// Render one mono sample and advance.
    pub fn render(&mut self) -> f32 {
        if self.finished() {
            return 0.0;
        }
        let sample = sinf(self.phase) * self.envelope.gain(self.age);
        self.phase += self.phase_inc;
        if self.phase > TAU {
            self.phase -= TAU;
        }
        self.age += 1;
        sample
    }

    /// Has the envelope run out?
    pub fn finished(&self) -> bool {
        self.age >= self.envelope.total()
    }

    /// Samples left before the voice retires.
    pub fn remaining(&self) -> u32 {
        self.envelope.total().saturating_sub(self.age)
    }
}
