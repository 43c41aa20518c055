//! # runtime
//!
//! Batch synthesis orchestration for the TTS toolkit: engine backend
//! resolution, the once-per-run reference-context cache, batched dispatch
//! with count verification, and logging setup.

pub mod engine;
pub mod logging;
pub mod pipeline;

pub use engine::{from_model_ref, MockEngine};
pub use pipeline::SynthesisPipeline;
