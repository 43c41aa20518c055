//! # tts-core
//!
//! Core types, traits, and error definitions for the batch TTS toolkit.
//!
//! This crate provides the foundational abstractions used across all other
//! crates in the workspace, including:
//!
//! - Common data types (`SpeakableText`, `AudioBuffer`, `ReferenceContext`, etc.)
//! - Capability traits for the text cleaner and the speech engine
//! - Unified error handling via `TtsError`
//! - Configuration resolution (CLI overrides, process env, allow-listed env file)

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::{EffectiveConfig, Overrides, DEFAULT_SAMPLE_RATE, ENV_KEYS};
pub use error::{ConfigError, TtsError, TtsResult};
pub use traits::{SpeechEngine, TextCleaner};
pub use types::{AudioBuffer, EngineResponse, ReferenceContext, SpeakableText, SynthesisItem};
