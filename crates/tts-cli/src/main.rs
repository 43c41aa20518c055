//! Batch TTS command-line interface.
//!
//! Turns markdown-ish text into speakable prose and synthesizes it to WAV
//! files through a voice-cloning engine backend, either one text at a time
//! or as a JSONL batch sharing one reference-audio encoding.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tts_core::Overrides;

mod commands;

/// Batch TTS toolkit CLI
#[derive(Debug, Parser)]
#[command(name = "tts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Log format (json or text)
    #[arg(long, default_value = "text", global = true)]
    log_format: LogFormatArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Json,
    Text,
}

/// Synthesis parameter flags shared by `say` and `batch`.
///
/// Each flag overrides the corresponding `TTS_*` environment variable and
/// env-file key. The sample rate stays a string so a malformed value is
/// reported through the configuration error path, not as a usage error.
#[derive(Debug, Args)]
struct ConfigArgs {
    /// Model id or path (overrides TTS_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Reference audio path (overrides TTS_REFERENCE_AUDIO)
    #[arg(long)]
    reference_audio: Option<String>,

    /// Output sample rate in Hz (overrides TTS_SAMPLE_RATE)
    #[arg(long)]
    sample_rate: Option<String>,

    /// Optional .env file to read TTS_* settings from
    #[arg(long)]
    env_file: Option<PathBuf>,
}

impl ConfigArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            model: self.model.clone(),
            reference_audio: self.reference_audio.clone(),
            sample_rate: self.sample_rate.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Synthesize one text to one WAV file
    Say {
        /// Text to synthesize (read from stdin when omitted)
        text: Option<String>,

        /// Output WAV file path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Synthesize a JSONL stream from stdin to numbered WAV files
    ///
    /// Each input line is a JSON object with a `text` field or a bare JSON
    /// string. Outputs are written as `<base>-000.wav`, `<base>-001.wav`,
    /// ... in input order, and the produced paths are printed to stdout.
    Batch {
        /// Output base path, without extension
        #[arg(long)]
        output_base: String,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Sanitize text without synthesis (dry run)
    Clean {
        /// Text to sanitize (read from stdin when omitted)
        text: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let format = match cli.log_format {
        LogFormatArg::Json => runtime::logging::LogFormat::Json,
        LogFormatArg::Text => runtime::logging::LogFormat::Text,
    };
    runtime::logging::init_logging(&cli.log_level, format);

    info!(version = env!("CARGO_PKG_VERSION"), "starting tts cli");

    let result = match cli.command {
        Commands::Say {
            text,
            output,
            config,
        } => commands::say::run(text, output, config.overrides(), config.env_file.as_deref()),
        Commands::Batch {
            output_base,
            config,
        } => commands::batch::run(&output_base, config.overrides(), config.env_file.as_deref()),
        Commands::Clean { text } => commands::clean::run(text),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tts: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
