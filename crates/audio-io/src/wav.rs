//! WAV file I/O utilities.

use hound::{SampleFormat, WavSpec, WavWriter};
use std::io;
use std::path::Path;
use tts_core::{TtsError, TtsResult};

/// Write f32 samples to a mono, 16-bit little-endian PCM WAV file.
///
/// Parent directories are created as needed. Every sample is clamped to
/// [-1.0, 1.0] and scaled to i16 before writing. After the writer is
/// finalized, the target path is re-checked on disk: a missing file at that
/// point is reported as [`TtsError::OutputMissing`], distinct from a raised
/// I/O error.
pub fn write_wav(path: impl AsRef<Path>, samples: &[f32], sample_rate: u32) -> TtsResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| TtsError::io(path, e))?;
        }
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer =
        WavWriter::create(path, spec).map_err(|e| TtsError::io(path, io::Error::other(e)))?;

    for &sample in samples {
        let sample_i16 = (sample.clamp(-1.0, 1.0) * 32767.0) as i16;
        writer
            .write_sample(sample_i16)
            .map_err(|e| TtsError::io(path, io::Error::other(e)))?;
    }

    writer
        .finalize()
        .map_err(|e| TtsError::io(path, io::Error::other(e)))?;

    verify_written(path)
}

/// Post-write verification: the file must exist on disk after a successful
/// write call.
pub fn verify_written(path: impl AsRef<Path>) -> TtsResult<()> {
    let path = path.as_ref();
    if path.is_file() {
        Ok(())
    } else {
        Err(TtsError::OutputMissing {
            path: path.to_path_buf(),
        })
    }
}

/// Read audio samples from a WAV file, normalized to f32 in [-1.0, 1.0].
pub fn read_wav(path: impl AsRef<Path>) -> TtsResult<(Vec<f32>, u32)> {
    let path = path.as_ref();
    let mut reader =
        hound::WavReader::open(path).map_err(|e| TtsError::io(path, io::Error::other(e)))?;

    let spec = reader.spec();
    let sample_rate = spec.sample_rate;

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| TtsError::io(path, io::Error::other(e)))?
        }
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| TtsError::io(path, io::Error::other(e)))?,
    };

    Ok((samples, sample_rate))
}
