//! Instrumented algorithm engine for sonaviz.
//!
//! Wraps the sorting and searching algorithms as pull-based steppers
//! that emit one checkpoint per primitive operation, and provides the
//! tone mapper, audio emitter, and software synth that turn those
//! checkpoints into sound.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod emitter;
mod frame;
pub mod search;
pub mod sorts;
mod stepper;
pub mod synth;
mod tone;

pub use emitter::{
    AudioEmitter, EmitterControls, NullToneSink, ToneCommand, ToneSink, CHORD_VOICE_SCALE,
    COMPARE_TONE_MS, COMPARE_TONE_OFFSET_MS, DEFAULT_TONE_MS, SWAP_TONE_MS,
};
pub use frame::Frame;
pub use search::{ArraySearch, ArraySearchAlgorithm, GraphSearch, SearchAlgorithm};
pub use sorts::{SortAlgorithm, SortRunner};
pub use stepper::{Step, Stepper};
pub use synth::Synth;
pub use tone::{value_to_frequency, FREQ_CEIL, FREQ_FLOOR};
