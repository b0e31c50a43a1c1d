//! Audio output backend for sonaviz.
//!
//! Owns the realtime side: a cpal stream fed through a ring buffer,
//! and the playback thread that renders the synth and drains tone
//! commands sent by the sessions.

mod cpal_backend;
mod playback;
mod traits;

pub use cpal_backend::CpalOutput;
pub use playback::{AudioHandle, ChannelSink};
pub use traits::{AudioError, AudioOutput};
