//! Speech engine backends.
//!
//! The real voice-cloning model is an external capability; this module
//! resolves a model reference to a [`SpeechEngine`] implementation. The
//! built-in deterministic mock backend serves tests and development runs
//! without model weights; unknown references are a dependency error.

use std::path::Path;

use tracing::{debug, info};
use tts_core::{
    AudioBuffer, EngineResponse, ReferenceContext, SpeakableText, SpeechEngine, TtsError,
    TtsResult,
};

/// Tokenizer libraries used by real backends spawn worker threads; that has
/// caused rare, hard-to-debug interactions with host runtimes, so internal
/// parallelism is disabled unless the caller explicitly set the variable.
const TOKENIZERS_PARALLELISM: &str = "TOKENIZERS_PARALLELISM";

/// Resolve a model reference to an engine backend.
///
/// Currently the only built-in backend is the deterministic mock engine,
/// selected by a `mock` model ref (with an optional suffix, e.g.
/// `mock-small`). Anything else reports the backend as unavailable.
pub fn from_model_ref(model_ref: &str) -> TtsResult<Box<dyn SpeechEngine>> {
    suppress_tokenizer_parallelism();

    if model_ref == "mock" || model_ref.starts_with("mock-") {
        info!(model_ref, "using mock speech engine");
        return Ok(Box::new(MockEngine::new()));
    }

    Err(TtsError::dependency(format!(
        "no engine backend for model ref {model_ref:?} (available: mock)"
    )))
}

/// Disable tokenizer-internal parallelism unless the caller already chose.
fn suppress_tokenizer_parallelism() {
    if std::env::var_os(TOKENIZERS_PARALLELISM).is_none() {
        std::env::set_var(TOKENIZERS_PARALLELISM, "false");
    }
}

/// Samples generated per input word by the mock engine.
const SAMPLES_PER_WORD: usize = 1600;

/// Internal generation rate of the mock engine in Hz.
const MOCK_RATE: f32 = 48000.0;

/// Context payload of the mock engine: a fingerprint of the reference
/// frames, used to vary the generated tone per voice.
struct MockContext {
    fingerprint: u64,
    num_frames: usize,
}

/// Per-item response payload of the mock engine's batched call.
struct MockResponse {
    samples: Vec<f32>,
}

/// Deterministic stand-in engine.
///
/// Generates a sine tone whose pitch is derived from the text and the
/// reference fingerprint, and whose duration scales with the word count.
/// The same text with the same reference always yields identical samples.
#[derive(Debug, Default)]
pub struct MockEngine;

impl MockEngine {
    /// Create a mock engine.
    pub fn new() -> Self {
        Self
    }

    fn render(&self, text: &SpeakableText, ctx: &MockContext) -> Vec<f32> {
        let mut seed = ctx.fingerprint.wrapping_add(ctx.num_frames as u64);
        for byte in text.as_str().bytes() {
            seed = seed.wrapping_mul(31).wrapping_add(u64::from(byte));
        }
        let words = text.as_str().split_whitespace().count().max(1);
        let len = words * SAMPLES_PER_WORD;
        let freq = 120.0 + (seed % 240) as f32;
        (0..len)
            .map(|i| {
                let t = i as f32 / MOCK_RATE;
                (std::f32::consts::TAU * freq * t).sin() * 0.3
            })
            .collect()
    }

    fn context<'a>(&self, ctx: &'a ReferenceContext) -> TtsResult<&'a MockContext> {
        ctx.downcast_ref::<MockContext>()
            .ok_or_else(|| TtsError::synthesis("reference context from a different engine"))
    }
}

impl SpeechEngine for MockEngine {
    fn encode_reference(&self, path: &Path) -> TtsResult<ReferenceContext> {
        let (frames, rate) = audio_io::read_wav(path)?;
        if frames.is_empty() {
            return Err(TtsError::synthesis("reference audio holds no samples"));
        }
        let mut fingerprint = u64::from(rate);
        for frame in &frames {
            fingerprint = fingerprint
                .wrapping_mul(1099511628211)
                .wrapping_add(frame.to_bits() as u64);
        }
        debug!(frames = frames.len(), rate, "encoded reference audio");
        Ok(ReferenceContext::new(MockContext {
            fingerprint,
            num_frames: frames.len(),
        }))
    }

    fn synthesize(&self, text: &SpeakableText, ctx: &ReferenceContext) -> TtsResult<AudioBuffer> {
        let ctx = self.context(ctx)?;
        Ok(AudioBuffer::new(self.render(text, ctx)))
    }

    fn synthesize_batch(
        &self,
        texts: &[SpeakableText],
        ctx: &ReferenceContext,
    ) -> TtsResult<Vec<EngineResponse>> {
        let ctx = self.context(ctx)?;
        debug!(items = texts.len(), "mock batched generation");
        Ok(texts
            .iter()
            .map(|text| {
                EngineResponse::new(MockResponse {
                    samples: self.render(text, ctx),
                })
            })
            .collect())
    }

    fn decode(&self, response: &EngineResponse, ctx: &ReferenceContext) -> TtsResult<AudioBuffer> {
        self.context(ctx)?;
        let response = response
            .downcast_ref::<MockResponse>()
            .ok_or_else(|| TtsError::synthesis("response from a different engine"))?;
        Ok(AudioBuffer::new(response.samples.clone()))
    }
}
