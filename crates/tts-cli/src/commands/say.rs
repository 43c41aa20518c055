//! Single-text synthesis command.

use std::path::{Path, PathBuf};

use text_sanitizer::CleanerChain;
use tracing::{debug, info};
use tts_core::{config, Overrides, TtsError, TtsResult};

use runtime::SynthesisPipeline;

/// Run the say command: one text in, one WAV out.
pub fn run(
    text: Option<String>,
    output: PathBuf,
    overrides: Overrides,
    env_file: Option<&Path>,
) -> TtsResult<()> {
    // Configuration problems are user-correctable; report them before any
    // engine is constructed.
    let config = config::resolve(&overrides, env_file)?;

    let raw = match text {
        Some(text) => text,
        None => super::read_stdin()?,
    };

    let speakable = CleanerChain::new().clean(&raw);
    if speakable.is_empty() {
        return Err(TtsError::unusable_input("no speakable text after sanitization"));
    }
    debug!(chars = speakable.as_str().len(), "sanitized input");

    let pipeline = SynthesisPipeline::from_model_ref(&config.model_ref)?;
    let ctx = pipeline.reference_context(&config.reference_audio)?;

    info!(output = %output.display(), "synthesizing");
    let buffer = pipeline.synthesize_one(&speakable, ctx)?;
    audio_io::write_wav(&output, &buffer.samples, config.sample_rate)?;

    info!(
        samples = buffer.num_samples(),
        sample_rate = config.sample_rate,
        "wrote output"
    );
    Ok(())
}
