//! Trace I/O for pleth respiration analysis.
//!
//! This crate provides:
//!
//! - **EMKA exports**: [`decode_emka`] for pasted ASCII plethysmograph exports
//! - **Text/CSV**: [`parse_text`] for one value per line or a chosen column
//! - **WAV**: [`read_wav`] for traces stored as audio files
//! - **Result export**: [`write_score_csv`] for per-sample score overlays
//!
//! [`read_trace`] picks the reader from [`TraceFormat`], detecting it from
//! the file when asked to.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pleth_io::{read_trace, ReadOptions};
//!
//! let trace = read_trace("recording.txt", &ReadOptions::default())?;
//! println!("{} samples at {} Hz", trace.len(), trace.sample_rate);
//! # Ok::<(), pleth_io::Error>(())
//! ```

mod emka;
mod export;
mod text;
mod wav;

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

pub use emka::{EMKA_SAMPLE_RATE, EmkaDecoder, decode_emka, is_emka_header, parse_emka_timestamp};
pub use export::{write_score_csv, write_score_csv_file};
pub use text::parse_text;
pub use wav::read_wav;

/// Error types for trace I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// A data line could not be parsed.
    #[error("line {line}: {reason}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// The file held no samples.
    #[error("no samples found in '{0}'")]
    Empty(PathBuf),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for trace I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A loaded respiration trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// Samples in recording order.
    pub samples: Vec<f32>,
    /// Sampling rate in Hz.
    pub sample_rate: f64,
    /// Wall-clock time of the first sample, if the source records one.
    pub start: Option<NaiveDateTime>,
}

impl Trace {
    /// Create a trace without a start time.
    pub fn new(samples: Vec<f32>, sample_rate: f64) -> Self {
        Self {
            samples,
            sample_rate,
            start: None,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the trace holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Samples widened to `f64` for analysis.
    pub fn samples_f64(&self) -> Vec<f64> {
        self.samples.iter().map(|&s| f64::from(s)).collect()
    }
}

/// Source file layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceFormat {
    /// Decide from the extension and contents.
    #[default]
    Auto,
    /// Pasted EMKA ASCII export.
    Emka,
    /// One value per line, or delimited columns.
    Text,
    /// WAV audio file.
    Wav,
}

impl TraceFormat {
    /// Detects the format of `path`.
    ///
    /// `.wav` files are WAV and `.raw` files are EMKA exports. Anything else is
    /// EMKA when one of its lines is an EMKA block header, and text otherwise.
    pub fn detect(path: &Path) -> Result<TraceFormat> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("wav") => Ok(TraceFormat::Wav),
            Some("raw") => Ok(TraceFormat::Emka),
            _ => {
                let content = std::fs::read_to_string(path)?;
                if content.lines().any(is_emka_header) {
                    Ok(TraceFormat::Emka)
                } else {
                    Ok(TraceFormat::Text)
                }
            }
        }
    }
}

/// How to read a trace file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadOptions {
    /// File layout.
    pub format: TraceFormat,
    /// Zero-based column for delimited text.
    pub column: Option<usize>,
    /// Sampling rate of text traces, which do not record one.
    pub sample_rate: f64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            format: TraceFormat::Auto,
            column: None,
            sample_rate: EMKA_SAMPLE_RATE,
        }
    }
}

/// Reads a trace from `path`.
///
/// Fails with [`Error::Empty`] when the file yields no samples.
pub fn read_trace(path: impl AsRef<Path>, options: &ReadOptions) -> Result<Trace> {
    let path = path.as_ref();
    let format = match options.format {
        TraceFormat::Auto => TraceFormat::detect(path)?,
        other => other,
    };
    tracing::debug!(path = %path.display(), ?format, "reading trace");

    let trace = match format {
        TraceFormat::Wav => read_wav(path)?,
        TraceFormat::Emka => decode_emka(&std::fs::read_to_string(path)?),
        TraceFormat::Text | TraceFormat::Auto => {
            parse_text(&std::fs::read_to_string(path)?, options.column, options.sample_rate)?
        }
    };

    if trace.is_empty() {
        return Err(Error::Empty(path.to_path_buf()));
    }
    tracing::debug!(samples = trace.len(), sample_rate = trace.sample_rate, "trace loaded");
    Ok(trace)
}
