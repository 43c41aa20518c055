//! CLI command implementations.

pub mod batch;
pub mod clean;
pub mod say;

use std::io::Read;

use tts_core::{TtsError, TtsResult};

/// Read all of stdin as UTF-8 text.
pub(crate) fn read_stdin() -> TtsResult<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| TtsError::io("<stdin>", e))?;
    Ok(input)
}
