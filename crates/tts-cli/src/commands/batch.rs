//! Batch synthesis command.
//!
//! Reads a JSONL stream from stdin, sanitizes every line, issues one
//! batched engine call, then decodes and writes the items in input order.
//! Each successfully written path is printed to stdout immediately, so a
//! failure partway through the output loop leaves the earlier WAVs on disk
//! and already announced.

use std::io::BufRead;
use std::path::Path;

use text_sanitizer::CleanerChain;
use tracing::{info, warn};
use tts_core::{config, Overrides, SpeakableText, SynthesisItem, TtsError, TtsResult};

use runtime::SynthesisPipeline;

/// Run the batch command over stdin.
pub fn run(output_base: &str, overrides: Overrides, env_file: Option<&Path>) -> TtsResult<()> {
    let config = config::resolve(&overrides, env_file)?;
    let base = resolve_output_base(output_base)?;

    let stdin = std::io::stdin();
    let texts = collect_texts(stdin.lock())?;
    if texts.is_empty() {
        return Err(TtsError::unusable_input("no speakable items in batch input"));
    }

    let items: Vec<SynthesisItem> = texts
        .into_iter()
        .enumerate()
        .map(|(index, text)| SynthesisItem::numbered(&base, index, text))
        .collect();

    let pipeline = SynthesisPipeline::from_model_ref(&config.model_ref)?;
    let ctx = pipeline.reference_context(&config.reference_audio)?;

    info!(items = items.len(), base = %base, "dispatching batch");
    let batch_texts: Vec<SpeakableText> = items.iter().map(|item| item.text.clone()).collect();
    let responses = pipeline.dispatch_batch(&batch_texts, ctx)?;

    for (item, response) in items.iter().zip(&responses) {
        let buffer = pipeline.decode_item(response, ctx, item.index)?;
        audio_io::write_wav(&item.output_path, &buffer.samples, config.sample_rate)?;
        println!("{}", item.output_path.display());
    }

    info!(items = items.len(), "batch complete");
    Ok(())
}

/// Normalize the output base path: trimmed, non-empty, and with trailing
/// audio extensions removed so `out.wav` and `out` name the same series.
/// Extensions are stripped in sequence, so `x.ogg.wav` collapses to `x`.
fn resolve_output_base(raw: &str) -> TtsResult<String> {
    let mut base = raw.trim();
    if base.is_empty() {
        return Err(TtsError::unusable_input("empty output base path"));
    }
    for ext in [".wav", ".ogg"] {
        if let Some(stripped) = strip_suffix_ignore_case(base, ext) {
            if !stripped.is_empty() {
                base = stripped;
            }
        }
    }
    Ok(base.to_string())
}

/// ASCII-case-insensitive `strip_suffix` that never slices mid-character,
/// so a multibyte base cannot panic the cut.
fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let cut = value.len().checked_sub(suffix.len())?;
    if value.is_char_boundary(cut) && value[cut..].eq_ignore_ascii_case(suffix) {
        Some(&value[..cut])
    } else {
        None
    }
}

/// Parse the JSONL batch input into sanitized texts.
///
/// Each non-blank line is parsed as JSON: a bare string is the text, an
/// object contributes its string `text` field. An object without one, or
/// any other JSON value, counts as empty text. A line that does not parse
/// as JSON at all is a hard error naming its line number. Lines whose text
/// sanitizes to nothing are skipped with a warning, preserving the
/// numbering of the items that remain.
pub(crate) fn collect_texts(input: impl BufRead) -> TtsResult<Vec<SpeakableText>> {
    let cleaner = CleanerChain::new();
    let mut texts = Vec::new();

    for (line_no, line) in input.lines().enumerate() {
        let line = line.map_err(|e| TtsError::io("<stdin>", e))?;
        let line_no = line_no + 1;
        if line.trim().is_empty() {
            continue;
        }

        let value: serde_json::Value = serde_json::from_str(&line).map_err(|e| {
            TtsError::unusable_input(format!("line {line_no}: invalid JSON: {e}"))
        })?;
        let raw = match &value {
            serde_json::Value::String(text) => text.as_str(),
            serde_json::Value::Object(obj) => {
                obj.get("text").and_then(|v| v.as_str()).unwrap_or("")
            }
            _ => "",
        };

        let text = cleaner.clean(raw);
        if text.is_empty() {
            warn!(line = line_no, "skipping line with no speakable text");
            continue;
        }
        texts.push(text);
    }

    Ok(texts)
}
