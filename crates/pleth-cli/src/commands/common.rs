//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use clap::{Args, ValueEnum};
use pleth_config::AnalysisConfig;
use pleth_io::{ReadOptions, Trace, TraceFormat, read_trace};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Options accepted by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Configuration file (defaults to the user configuration)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Input file format
    #[arg(long, global = true, value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,

    /// Zero-based value column of text inputs
    #[arg(long, global = true)]
    pub column: Option<usize>,

    /// Sampling rate in Hz, overriding the file and the configuration
    #[arg(long, global = true)]
    pub sample_rate: Option<f64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Input format names on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    /// Detect from the extension and contents
    Auto,
    /// Pasted EMKA ASCII export
    Emka,
    /// One value per line or a delimited column
    Text,
    /// WAV audio file
    Wav,
}

impl From<FormatArg> for TraceFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Auto => TraceFormat::Auto,
            FormatArg::Emka => TraceFormat::Emka,
            FormatArg::Text => TraceFormat::Text,
            FormatArg::Wav => TraceFormat::Wav,
        }
    }
}

/// Load the configuration named by `--config`, or the user one.
pub fn load_config(global: &GlobalArgs) -> anyhow::Result<AnalysisConfig> {
    let (config, path) = AnalysisConfig::discover(global.config.as_deref())
        .context("failed to load configuration")?;
    match path {
        Some(path) => tracing::debug!(path = %path.display(), "loaded configuration"),
        None => tracing::debug!("using default configuration"),
    }
    Ok(config)
}

/// Read a trace with the global format options.
///
/// Text traces use `--sample-rate` or the configured rate. EMKA and WAV
/// traces keep their own rate unless `--sample-rate` is given.
pub fn load_trace(path: &Path, global: &GlobalArgs, config: &AnalysisConfig) -> anyhow::Result<Trace> {
    let options = ReadOptions {
        format: global.format.into(),
        column: global.column,
        sample_rate: global.sample_rate.unwrap_or(config.sample_rate),
    };
    let mut trace = read_trace(path, &options)
        .with_context(|| format!("failed to read trace '{}'", path.display()))?;
    if let Some(sample_rate) = global.sample_rate {
        trace.sample_rate = sample_rate;
    }
    tracing::info!(
        path = %path.display(),
        samples = trace.len(),
        sample_rate = trace.sample_rate,
        "loaded trace"
    );
    Ok(trace)
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format an optional duration in seconds for tables.
pub fn format_secs(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}
