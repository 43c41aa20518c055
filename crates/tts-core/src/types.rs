//! Core data types for the synthesis pipeline.

use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;

/// Text with all markdown control syntax removed and whitespace normalized,
/// suitable as direct TTS input.
///
/// Produced by a [`crate::traits::TextCleaner`]; the built-in sanitizer
/// guarantees no whitespace run longer than one space and trimmed ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakableText(String);

impl SpeakableText {
    /// Wrap already-cleaned text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The cleaned text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no speakable content remains.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for SpeakableText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<SpeakableText> for String {
    fn from(text: SpeakableText) -> Self {
        text.0
    }
}

/// A buffer of synthesized audio samples (f32, mono).
///
/// Sample values are conceptually unbounded; the WAV encoder clamps them to
/// [-1.0, 1.0] before quantization.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    /// Raw samples.
    pub samples: Arc<[f32]>,
}

impl AudioBuffer {
    /// Create a new buffer from a sample vector.
    pub fn new(samples: Vec<f32>) -> Self {
        Self {
            samples: samples.into(),
        }
    }

    /// Number of samples in this buffer.
    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// True when the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Opaque encoded representation of a reference voice sample.
///
/// Produced once per run by [`crate::traits::SpeechEngine::encode_reference`]
/// and shared read-only by every item in a batch. Only the engine that
/// produced a context can interpret its payload; it is never persisted.
#[derive(Clone)]
pub struct ReferenceContext {
    payload: Arc<dyn Any + Send + Sync>,
}

impl ReferenceContext {
    /// Wrap an engine-specific payload.
    pub fn new<T: Any + Send + Sync>(payload: T) -> Self {
        Self {
            payload: Arc::new(payload),
        }
    }

    /// Recover the engine-specific payload.
    ///
    /// Returns `None` when the context was produced by a different engine.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref()
    }
}

impl std::fmt::Debug for ReferenceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ReferenceContext(..)")
    }
}

/// Opaque per-item payload returned by a batched engine call, decoded into
/// an [`AudioBuffer`] by the same engine.
#[derive(Clone)]
pub struct EngineResponse {
    payload: Arc<dyn Any + Send + Sync>,
}

impl EngineResponse {
    /// Wrap an engine-specific payload.
    pub fn new<T: Any + Send + Sync>(payload: T) -> Self {
        Self {
            payload: Arc::new(payload),
        }
    }

    /// Recover the engine-specific payload.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref()
    }
}

impl std::fmt::Debug for EngineResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EngineResponse(..)")
    }
}

/// One unit of batch work: ordinal index, cleaned text, and the WAV path the
/// result is written to. The index is preserved end-to-end and drives both
/// output naming and stdout ordering.
#[derive(Debug, Clone)]
pub struct SynthesisItem {
    /// Zero-based position in the input batch.
    pub index: usize,
    /// Cleaned text to synthesize.
    pub text: SpeakableText,
    /// Target WAV path.
    pub output_path: PathBuf,
}

impl SynthesisItem {
    /// Create an item with an explicit output path (single mode).
    pub fn new(index: usize, text: SpeakableText, output_path: impl Into<PathBuf>) -> Self {
        Self {
            index,
            text,
            output_path: output_path.into(),
        }
    }

    /// Create an item numbered under a batch base path:
    /// `<base>-000.wav`, `<base>-001.wav`, ...
    pub fn numbered(base: &str, index: usize, text: SpeakableText) -> Self {
        Self {
            index,
            text,
            output_path: PathBuf::from(format!("{base}-{index:03}.wav")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speakable_text_accessors() {
        let text = SpeakableText::new("hello world");
        assert_eq!(text.as_str(), "hello world");
        assert!(!text.is_empty());
        assert!(SpeakableText::new("").is_empty());
    }

    #[test]
    fn test_audio_buffer() {
        let buffer = AudioBuffer::new(vec![0.0; 480]);
        assert_eq!(buffer.num_samples(), 480);
        assert!(!buffer.is_empty());
        assert!(AudioBuffer::new(Vec::new()).is_empty());
    }

    #[test]
    fn test_reference_context_downcast() {
        let ctx = ReferenceContext::new(vec![1.0f32, 2.0]);
        assert_eq!(ctx.downcast_ref::<Vec<f32>>().unwrap().len(), 2);
        assert!(ctx.downcast_ref::<String>().is_none());
    }

    #[test]
    fn test_numbered_item_paths() {
        let item = SynthesisItem::numbered("/tmp/out", 0, SpeakableText::new("a"));
        assert_eq!(item.output_path, PathBuf::from("/tmp/out-000.wav"));
        let item = SynthesisItem::numbered("/tmp/out", 12, SpeakableText::new("b"));
        assert_eq!(item.output_path, PathBuf::from("/tmp/out-012.wav"));
    }
}
