//! Configuration resolution for the synthesis pipeline.
//!
//! Each field of [`EffectiveConfig`] is resolved from exactly one of three
//! sources, highest precedence first:
//!
//! 1. explicit CLI override,
//! 2. process environment variable,
//! 3. an optional `.env`-style file restricted to an allow-list of keys.
//!
//! Empty or whitespace-only values count as absent at every level.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable naming convention, also the env-file allow-list.
pub const ENV_KEYS: [&str; 3] = ["TTS_MODEL", "TTS_REFERENCE_AUDIO", "TTS_SAMPLE_RATE"];

const KEY_MODEL: &str = "TTS_MODEL";
const KEY_REFERENCE: &str = "TTS_REFERENCE_AUDIO";
const KEY_SAMPLE_RATE: &str = "TTS_SAMPLE_RATE";

/// Sample rate used when no source supplies one.
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;

/// Explicit CLI overrides, each optional. The sample rate stays a string
/// here so a malformed value is reported as a validation error rather than
/// rejected by the argument parser.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Model id or path.
    pub model: Option<String>,
    /// Reference audio path.
    pub reference_audio: Option<String>,
    /// Sample rate, unparsed.
    pub sample_rate: Option<String>,
}

/// Fully-resolved, validated synthesis parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    /// Model id or path handed to the engine backend.
    pub model_ref: String,
    /// Path to an existing reference audio file.
    pub reference_audio: PathBuf,
    /// Output sample rate in Hz, positive.
    pub sample_rate: u32,
}

/// Parse an `.env`-style file, honoring only the [`ENV_KEYS`] allow-list.
///
/// Comments (`#`), blank lines, lines without `=`, and keys outside the
/// allow-list are ignored. One matching pair of surrounding quotes (single
/// or double) is stripped from values. An unreadable file yields an empty
/// map; this parser is total.
pub fn parse_env_file(path: &Path) -> HashMap<String, String> {
    let mut out = HashMap::new();
    let Ok(contents) = fs::read_to_string(path) else {
        return out;
    };
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if !ENV_KEYS.contains(&key) {
            continue;
        }
        out.insert(key.to_string(), strip_quotes(value.trim()).to_string());
    }
    out
}

/// Strip one matching pair of surrounding quotes.
fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Resolve the effective configuration from CLI overrides, the process
/// environment, and an optional env file.
pub fn resolve(
    overrides: &Overrides,
    env_file: Option<&Path>,
) -> Result<EffectiveConfig, ConfigError> {
    let file_vars = match env_file {
        Some(path) if path.is_file() => parse_env_file(path),
        _ => HashMap::new(),
    };
    let mut env = HashMap::new();
    for key in ENV_KEYS {
        if let Ok(value) = std::env::var(key) {
            env.insert(key.to_string(), value);
        }
    }
    resolve_from(overrides, &env, &file_vars)
}

/// Resolve from explicit source maps. Split out from [`resolve`] so the
/// precedence rules are testable without touching the process environment.
pub fn resolve_from(
    overrides: &Overrides,
    env: &HashMap<String, String>,
    file_vars: &HashMap<String, String>,
) -> Result<EffectiveConfig, ConfigError> {
    let model = pick(overrides.model.as_deref(), env, file_vars, KEY_MODEL);
    let reference = pick(
        overrides.reference_audio.as_deref(),
        env,
        file_vars,
        KEY_REFERENCE,
    );
    let sample_rate_raw = pick(
        overrides.sample_rate.as_deref(),
        env,
        file_vars,
        KEY_SAMPLE_RATE,
    );

    let Some(model) = model else {
        return Err(ConfigError::MissingModel);
    };
    let Some(reference) = reference else {
        return Err(ConfigError::MissingReference);
    };

    let sample_rate = match sample_rate_raw {
        None => DEFAULT_SAMPLE_RATE,
        Some(raw) => match raw.parse::<u32>() {
            Ok(rate) if rate > 0 => rate,
            _ => return Err(ConfigError::BadSampleRate(raw)),
        },
    };

    let reference_audio = PathBuf::from(reference);
    if !reference_audio.is_file() {
        return Err(ConfigError::ReferenceNotFound(reference_audio));
    }

    Ok(EffectiveConfig {
        model_ref: model,
        reference_audio,
        sample_rate,
    })
}

/// First non-empty value for `key`, in precedence order.
fn pick(
    cli: Option<&str>,
    env: &HashMap<String, String>,
    file_vars: &HashMap<String, String>,
    key: &str,
) -> Option<String> {
    [cli, env.get(key).map(String::as_str), file_vars.get(key).map(String::as_str)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn existing_reference() -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ref.wav");
        fs::write(&path, b"riff").unwrap();
        let path = path.to_string_lossy().into_owned();
        (dir, path)
    }

    #[test]
    fn test_cli_wins_over_env_and_file() {
        let (_dir, reference) = existing_reference();
        let overrides = Overrides {
            model: Some("cli-model".into()),
            reference_audio: Some(reference),
            sample_rate: Some("22050".into()),
        };
        let mut env = HashMap::new();
        env.insert(KEY_MODEL.to_string(), "env-model".to_string());
        env.insert(KEY_SAMPLE_RATE.to_string(), "16000".to_string());
        let mut file_vars = HashMap::new();
        file_vars.insert(KEY_MODEL.to_string(), "file-model".to_string());

        let config = resolve_from(&overrides, &env, &file_vars).unwrap();
        assert_eq!(config.model_ref, "cli-model");
        assert_eq!(config.sample_rate, 22050);
    }

    #[test]
    fn test_env_wins_over_file() {
        let (_dir, reference) = existing_reference();
        let overrides = Overrides {
            reference_audio: Some(reference),
            ..Default::default()
        };
        let mut env = HashMap::new();
        env.insert(KEY_MODEL.to_string(), "env-model".to_string());
        let mut file_vars = HashMap::new();
        file_vars.insert(KEY_MODEL.to_string(), "file-model".to_string());

        let config = resolve_from(&overrides, &env, &file_vars).unwrap();
        assert_eq!(config.model_ref, "env-model");
    }

    #[test]
    fn test_empty_values_fall_through() {
        let (_dir, reference) = existing_reference();
        let overrides = Overrides {
            model: Some("   ".into()),
            reference_audio: Some(reference),
            ..Default::default()
        };
        let mut file_vars = HashMap::new();
        file_vars.insert(KEY_MODEL.to_string(), "file-model".to_string());

        let config = resolve_from(&overrides, &HashMap::new(), &file_vars).unwrap();
        assert_eq!(config.model_ref, "file-model");
    }

    #[test]
    fn test_default_sample_rate() {
        let (_dir, reference) = existing_reference();
        let overrides = Overrides {
            model: Some("m".into()),
            reference_audio: Some(reference),
            ..Default::default()
        };
        let config = resolve_from(&overrides, &HashMap::new(), &HashMap::new()).unwrap();
        assert_eq!(config.sample_rate, DEFAULT_SAMPLE_RATE);
    }

    #[test]
    fn test_bad_sample_rate_is_an_error_not_a_crash() {
        let (_dir, reference) = existing_reference();
        let overrides = Overrides {
            model: Some("m".into()),
            reference_audio: Some(reference),
            sample_rate: Some("forty-eight-k".into()),
        };
        let err = resolve_from(&overrides, &HashMap::new(), &HashMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::BadSampleRate(_)));
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        let (_dir, reference) = existing_reference();
        let overrides = Overrides {
            model: Some("m".into()),
            reference_audio: Some(reference),
            sample_rate: Some("0".into()),
        };
        let err = resolve_from(&overrides, &HashMap::new(), &HashMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::BadSampleRate(_)));
    }

    #[test]
    fn test_missing_model_and_reference() {
        let err = resolve_from(&Overrides::default(), &HashMap::new(), &HashMap::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingModel));

        let overrides = Overrides {
            model: Some("m".into()),
            ..Default::default()
        };
        let err = resolve_from(&overrides, &HashMap::new(), &HashMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingReference));
    }

    #[test]
    fn test_reference_must_exist() {
        let overrides = Overrides {
            model: Some("m".into()),
            reference_audio: Some("/nonexistent/ref.wav".into()),
            ..Default::default()
        };
        let err = resolve_from(&overrides, &HashMap::new(), &HashMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::ReferenceNotFound(_)));
    }

    #[test]
    fn test_env_file_allow_list_comments_and_quotes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# comment").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "TTS_MODEL=\"quoted model\"").unwrap();
        writeln!(file, "TTS_SAMPLE_RATE='24000'").unwrap();
        writeln!(file, "OTHER_KEY=ignored").unwrap();
        writeln!(file, "malformed line without equals").unwrap();
        writeln!(file, "TTS_REFERENCE_AUDIO= /audio/ref.wav ").unwrap();

        let vars = parse_env_file(file.path());
        assert_eq!(vars.len(), 3);
        assert_eq!(vars[KEY_MODEL], "quoted model");
        assert_eq!(vars[KEY_SAMPLE_RATE], "24000");
        assert_eq!(vars[KEY_REFERENCE], "/audio/ref.wav");
        assert!(!vars.contains_key("OTHER_KEY"));
    }

    #[test]
    fn test_env_file_unreadable_yields_empty() {
        let vars = parse_env_file(Path::new("/nonexistent/.env"));
        assert!(vars.is_empty());
    }

    #[test]
    fn test_unmatched_quotes_kept() {
        assert_eq!(strip_quotes("\"half"), "\"half");
        assert_eq!(strip_quotes("'a\""), "'a\"");
        assert_eq!(strip_quotes("\"full\""), "full");
    }
}
