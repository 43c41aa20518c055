//! Batch synthesis orchestration.
//!
//! A [`SynthesisPipeline`] owns one engine backend and one per-run
//! reference context. Batch mode issues exactly one engine call for the
//! whole list of texts rather than looping per item: fewer engine
//! invocations, less per-call overhead, and the underlying generation
//! pipelines are more stable under batched dispatch. The response
//! collection is verified against the input length before any per-item
//! decoding happens.

use std::path::Path;

use once_cell::sync::OnceCell;
use tracing::{debug, info, instrument};
use tts_core::{
    AudioBuffer, EngineResponse, ReferenceContext, SpeakableText, SpeechEngine, TtsError,
    TtsResult,
};

/// The synthesis pipeline for one process run.
///
/// Stateless across runs: the reference context lives only as long as this
/// value and is never persisted.
pub struct SynthesisPipeline {
    engine: Box<dyn SpeechEngine>,
    reference: OnceCell<ReferenceContext>,
}

impl std::fmt::Debug for SynthesisPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisPipeline")
            .field("reference_encoded", &self.reference.get().is_some())
            .finish()
    }
}

impl SynthesisPipeline {
    /// Create a pipeline over an engine backend.
    pub fn new(engine: Box<dyn SpeechEngine>) -> Self {
        Self {
            engine,
            reference: OnceCell::new(),
        }
    }

    /// Create a pipeline by resolving a model reference to a backend.
    pub fn from_model_ref(model_ref: &str) -> TtsResult<Self> {
        Ok(Self::new(crate::engine::from_model_ref(model_ref)?))
    }

    /// Encode the reference audio, at most once per run.
    ///
    /// Subsequent calls return the cached context; every item of a batch
    /// shares it read-only. Failure here is fatal to the whole run.
    pub fn reference_context(&self, path: &Path) -> TtsResult<&ReferenceContext> {
        self.reference.get_or_try_init(|| {
            info!(path = %path.display(), "encoding reference audio");
            self.engine
                .encode_reference(path)
                .map_err(|e| TtsError::ReferenceEncode {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
        })
    }

    /// Synthesize a single text into an audio buffer.
    #[instrument(skip_all, fields(text_len = text.as_str().len()))]
    pub fn synthesize_one(
        &self,
        text: &SpeakableText,
        ctx: &ReferenceContext,
    ) -> TtsResult<AudioBuffer> {
        if text.is_empty() {
            return Err(TtsError::unusable_input("empty text"));
        }
        self.engine.synthesize(text, ctx)
    }

    /// Issue the single batched engine call for `texts`.
    ///
    /// An empty batch is a caller error and is rejected before the engine
    /// is invoked. A response collection whose length differs from the
    /// input is a fatal whole-batch error, not a partial result.
    #[instrument(skip_all, fields(items = texts.len()))]
    pub fn dispatch_batch(
        &self,
        texts: &[SpeakableText],
        ctx: &ReferenceContext,
    ) -> TtsResult<Vec<EngineResponse>> {
        if texts.is_empty() {
            return Err(TtsError::unusable_input("empty batch"));
        }

        let responses = self.engine.synthesize_batch(texts, ctx)?;
        if responses.len() != texts.len() {
            return Err(TtsError::BatchCountMismatch {
                got: responses.len(),
                expected: texts.len(),
            });
        }
        debug!(responses = responses.len(), "batched dispatch complete");
        Ok(responses)
    }

    /// Decode one item of a batched response.
    ///
    /// A failure names the failing index; the caller's output loop stops
    /// there, keeping WAVs already written for earlier indices.
    pub fn decode_item(
        &self,
        response: &EngineResponse,
        ctx: &ReferenceContext,
        index: usize,
    ) -> TtsResult<AudioBuffer> {
        self.engine
            .decode(response, ctx)
            .map_err(|e| TtsError::ItemDecode {
                index,
                reason: e.to_string(),
            })
    }

    /// Batched dispatch plus decode of every item, order preserved.
    pub fn synthesize_batch(
        &self,
        texts: &[SpeakableText],
        ctx: &ReferenceContext,
    ) -> TtsResult<Vec<AudioBuffer>> {
        let responses = self.dispatch_batch(texts, ctx)?;
        responses
            .iter()
            .enumerate()
            .map(|(index, response)| self.decode_item(response, ctx, index))
            .collect()
    }
}
