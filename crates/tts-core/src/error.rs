//! Unified error types for the batch TTS toolkit.

use std::path::PathBuf;

/// Main error type for TTS operations.
///
/// Each variant belongs to exactly one exit-status category so the CLI can
/// map every failure to a distinct process exit code (see [`TtsError::exit_code`]).
#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    /// Configuration resolution or validation failed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input text is empty or unusable (empty after sanitization, empty
    /// batch, malformed JSONL line).
    #[error("unusable input: {0}")]
    UnusableInput(String),

    /// Required engine backend is unavailable.
    #[error("backend unavailable: {0}")]
    Dependency(String),

    /// Engine initialization failed.
    #[error("engine init failed: {0}")]
    Init(String),

    /// Encoding the reference audio failed. Fatal to the whole run.
    #[error("reference encode failed for {path}: {reason}")]
    ReferenceEncode { path: PathBuf, reason: String },

    /// Synthesis failed.
    #[error("synthesis failed: {0}")]
    Synthesis(String),

    /// The engine returned a batch response collection of the wrong length.
    #[error("batch response count mismatch: got {got}, expected {expected}")]
    BatchCountMismatch { got: usize, expected: usize },

    /// Decoding one item of a batched response failed. The index identifies
    /// the failing item; earlier items may already have been written out.
    #[error("decode failed for item {index}: {reason}")]
    ItemDecode { index: usize, reason: String },

    /// I/O error, surfaced with the failing path.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The write call reported success but the target file is absent.
    #[error("output missing after write: {path}")]
    OutputMissing { path: PathBuf },
}

/// Convenience type alias for Results with TtsError.
pub type TtsResult<T> = Result<T, TtsError>;

impl TtsError {
    /// Create an unusable-input error with message.
    pub fn unusable_input(msg: impl Into<String>) -> Self {
        Self::UnusableInput(msg.into())
    }

    /// Create a dependency error with message.
    pub fn dependency(msg: impl Into<String>) -> Self {
        Self::Dependency(msg.into())
    }

    /// Create an init error with message.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }

    /// Create a synthesis error with message.
    pub fn synthesis(msg: impl Into<String>) -> Self {
        Self::Synthesis(msg.into())
    }

    /// Wrap an I/O error with its failing path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this error category.
    ///
    /// Every category maps to a distinct integer; 2 is reserved for
    /// command-line usage errors (clap's convention) and 0 for success.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 3,
            Self::UnusableInput(_) => 4,
            Self::Dependency(_) => 5,
            Self::Init(_) => 6,
            Self::ReferenceEncode { .. } => 7,
            Self::Synthesis(_) | Self::BatchCountMismatch { .. } | Self::ItemDecode { .. } => 8,
            Self::Io { .. } => 8,
            Self::OutputMissing { .. } => 9,
        }
    }
}

/// Configuration validation failure, one variant per enumerable reason.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No model reference resolved from any source.
    #[error("missing model; pass --model or set TTS_MODEL")]
    MissingModel,

    /// No reference audio path resolved from any source.
    #[error("missing reference audio; pass --reference-audio or set TTS_REFERENCE_AUDIO")]
    MissingReference,

    /// The resolved reference audio path does not point at an existing file.
    #[error("reference audio not found: {0}")]
    ReferenceNotFound(PathBuf),

    /// The supplied sample-rate string is not a positive integer.
    #[error("invalid sample rate: {0:?}")]
    BadSampleRate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TtsError::unusable_input("empty text");
        assert_eq!(err.to_string(), "unusable input: empty text");

        let err = TtsError::BatchCountMismatch {
            got: 2,
            expected: 3,
        };
        assert_eq!(
            err.to_string(),
            "batch response count mismatch: got 2, expected 3"
        );
    }

    #[test]
    fn test_exit_codes_are_distinct_per_category() {
        let errors = [
            TtsError::Config(ConfigError::MissingModel),
            TtsError::unusable_input("x"),
            TtsError::dependency("x"),
            TtsError::init("x"),
            TtsError::ReferenceEncode {
                path: PathBuf::from("ref.wav"),
                reason: "x".into(),
            },
            TtsError::synthesis("x"),
            TtsError::OutputMissing {
                path: PathBuf::from("out.wav"),
            },
        ];
        let codes: Vec<u8> = errors.iter().map(TtsError::exit_code).collect();
        assert_eq!(codes, vec![3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_synthesis_category_shares_one_code() {
        let synth = TtsError::synthesis("x").exit_code();
        let mismatch = TtsError::BatchCountMismatch {
            got: 0,
            expected: 1,
        }
        .exit_code();
        let decode = TtsError::ItemDecode {
            index: 1,
            reason: "x".into(),
        }
        .exit_code();
        assert_eq!(synth, mismatch);
        assert_eq!(synth, decode);
    }

    #[test]
    fn test_config_error_converts() {
        let err: TtsError = ConfigError::BadSampleRate("abc".into()).into();
        assert!(matches!(err, TtsError::Config(_)));
        assert_eq!(err.exit_code(), 3);
    }
}
