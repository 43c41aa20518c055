//! Sanitize-only command: run the text cleaner and print the result.

use text_sanitizer::CleanerChain;
use tts_core::TtsResult;

/// Run the clean command: sanitize `text` (or stdin) and print the result.
pub fn run(text: Option<String>) -> TtsResult<()> {
    let raw = match text {
        Some(text) => text,
        None => super::read_stdin()?,
    };
    println!("{}", CleanerChain::new().clean(&raw));
    Ok(())
}
