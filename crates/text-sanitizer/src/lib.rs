//! # text-sanitizer
//!
//! Deterministic markdown-to-speakable-text sanitizer for the batch TTS
//! toolkit.
//!
//! The sanitizer is a pure, total function: any input yields plain prose
//! with no markdown control syntax, collapsed whitespace, and trimmed ends.
//! Garbage in, best-effort plain text out; it never fails.
//!
//! # Example
//!
//! ```
//! use text_sanitizer::Sanitizer;
//!
//! let speakable = Sanitizer.sanitize("# Title\n**bold** text");
//! assert_eq!(speakable.as_str(), "Title bold text");
//! ```

mod passes;

use tracing::debug;
use tts_core::{SpeakableText, TextCleaner, TtsResult};

/// The built-in markdown sanitizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sanitizer;

impl Sanitizer {
    /// Convert raw markdown-ish input into speakable text.
    ///
    /// Idempotent: `sanitize(sanitize(x)) == sanitize(x)`, and
    /// `sanitize("") == ""`.
    pub fn sanitize(&self, raw: &str) -> SpeakableText {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return SpeakableText::new("");
        }
        let text = passes::strip_code(trimmed);
        let text = passes::unwrap_links(&text);
        let text = passes::strip_line_markers(&text);
        let text = passes::unwrap_emphasis(&text);
        SpeakableText::new(passes::collapse_whitespace(&text))
    }
}

impl TextCleaner for Sanitizer {
    fn clean(&self, raw: &str) -> TtsResult<SpeakableText> {
        Ok(self.sanitize(raw))
    }
}

/// Fallback chain over the "clean text for speech" capability.
///
/// A caller may supply its own cleaner strategy; when none is supplied, or
/// the supplied one fails on a given input, the chain degrades to the
/// built-in [`Sanitizer`]. The chain as a whole is therefore total.
pub struct CleanerChain {
    primary: Option<Box<dyn TextCleaner>>,
    builtin: Sanitizer,
}

impl Default for CleanerChain {
    fn default() -> Self {
        Self::new()
    }
}

impl CleanerChain {
    /// Chain with only the built-in sanitizer.
    pub fn new() -> Self {
        Self {
            primary: None,
            builtin: Sanitizer,
        }
    }

    /// Chain that tries `primary` first.
    pub fn with_primary(primary: Box<dyn TextCleaner>) -> Self {
        Self {
            primary: Some(primary),
            builtin: Sanitizer,
        }
    }

    /// Clean `raw`, falling back to the built-in sanitizer on any failure
    /// of the supplied cleaner.
    pub fn clean(&self, raw: &str) -> SpeakableText {
        if let Some(primary) = &self.primary {
            match primary.clean(raw) {
                Ok(text) => return text,
                Err(err) => {
                    debug!(error = %err, "supplied cleaner failed, using built-in sanitizer");
                }
            }
        }
        self.builtin.sanitize(raw)
    }
}

impl TextCleaner for CleanerChain {
    fn clean(&self, raw: &str) -> TtsResult<SpeakableText> {
        Ok(CleanerChain::clean(self, raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tts_core::TtsError;

    #[test]
    fn test_markdown_removal() {
        let out = Sanitizer.sanitize("# Title\n**bold** and `code` and [label](http://x)");
        assert_eq!(out.as_str(), "Title bold and code and label");
    }

    #[test]
    fn test_whitespace_collapse() {
        assert_eq!(Sanitizer.sanitize("a\n\n  b\t c").as_str(), "a b c");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Sanitizer.sanitize("").as_str(), "");
        assert_eq!(Sanitizer.sanitize("   ").as_str(), "");
    }

    #[test]
    fn test_idempotence() {
        let inputs = [
            "# Title\n**bold** and `code` and [label](http://x)",
            "- one\n- two\n- three",
            "```rust\nfn main() {}\n```\nafter",
            "plain text already",
            "*a* _b_ ~~c~~ **d** __e__",
            "broken **emphasis and `span",
        ];
        for input in inputs {
            let once = Sanitizer.sanitize(input);
            let twice = Sanitizer.sanitize(once.as_str());
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    struct FailingCleaner;

    impl TextCleaner for FailingCleaner {
        fn clean(&self, _raw: &str) -> TtsResult<SpeakableText> {
            Err(TtsError::synthesis("external cleaner broke"))
        }
    }

    struct ShoutingCleaner;

    impl TextCleaner for ShoutingCleaner {
        fn clean(&self, raw: &str) -> TtsResult<SpeakableText> {
            Ok(SpeakableText::new(raw.trim().to_uppercase()))
        }
    }

    #[test]
    fn test_chain_uses_supplied_cleaner() {
        let chain = CleanerChain::with_primary(Box::new(ShoutingCleaner));
        assert_eq!(chain.clean("hello").as_str(), "HELLO");
    }

    #[test]
    fn test_chain_falls_back_on_failure() {
        let chain = CleanerChain::with_primary(Box::new(FailingCleaner));
        assert_eq!(chain.clean("**bold**").as_str(), "bold");
    }

    #[test]
    fn test_chain_defaults_to_builtin() {
        let chain = CleanerChain::new();
        assert_eq!(chain.clean("# Head").as_str(), "Head");
    }
}
