//! # audio-io
//!
//! WAV file I/O for the batch TTS toolkit: 16-bit mono PCM encoding with
//! clamping and post-write verification, plus reading reference audio back
//! into normalized f32 samples.

pub mod wav;

pub use wav::{read_wav, write_wav};
