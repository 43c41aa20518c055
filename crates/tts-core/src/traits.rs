//! Capability traits for pipeline components.

use std::path::Path;

use crate::error::TtsResult;
use crate::types::{AudioBuffer, EngineResponse, ReferenceContext, SpeakableText};

/// "Clean text for speech" capability.
///
/// Implementations turn untrusted markdown-ish input into speakable prose.
/// The built-in sanitizer is total and never fails; external cleaners may
/// fail, in which case the caller falls back to the built-in one.
pub trait TextCleaner: Send + Sync {
    /// Clean raw input into speakable text.
    fn clean(&self, raw: &str) -> TtsResult<SpeakableText>;
}

/// Voice-cloning speech synthesis capability.
///
/// The underlying model is treated as opaque: the context produced by
/// [`encode_reference`](SpeechEngine::encode_reference) and the per-item
/// responses of a batched call carry engine-private payloads, and only the
/// engine that produced them can decode them.
pub trait SpeechEngine: Send + Sync {
    /// Encode a reference voice sample into a reusable context.
    ///
    /// Called exactly once per process run, regardless of batch size.
    fn encode_reference(&self, path: &Path) -> TtsResult<ReferenceContext>;

    /// Synthesize a single text into an audio buffer.
    fn synthesize(&self, text: &SpeakableText, ctx: &ReferenceContext) -> TtsResult<AudioBuffer>;

    /// Dispatch one batched generation call for the whole list of texts.
    ///
    /// The engine's internal pipeline is more stable under batched dispatch
    /// than under repeated single calls; the returned collection is expected
    /// to match the input length (the orchestrator verifies this).
    fn synthesize_batch(
        &self,
        texts: &[SpeakableText],
        ctx: &ReferenceContext,
    ) -> TtsResult<Vec<EngineResponse>>;

    /// Decode one item of a batched response into an audio buffer.
    fn decode(&self, response: &EngineResponse, ctx: &ReferenceContext) -> TtsResult<AudioBuffer>;
}
