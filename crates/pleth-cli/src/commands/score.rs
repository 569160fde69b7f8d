//! Per-sample score export.

use anyhow::Context;
use clap::Args;
use pleth_analysis::{clipped_score, detect_pauses, eami};
use pleth_io::{write_score_csv, write_score_csv_file};
use std::path::PathBuf;

use super::common::{GlobalArgs, load_config, load_trace};

#[derive(Args)]
pub struct ScoreArgs {
    /// Input trace file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output CSV file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Ceiling applied to the written score
    #[arg(long, default_value = "2.0")]
    clip: f64,
}

pub fn run(args: ScoreArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let config = load_config(global)?;
    let params = config.params();
    let trace = load_trace(&args.input, global, &config)?;

    let score = eami(&trace.samples_f64(), trace.sample_rate, &params.eami)
        .context("failed to compute eAMI score")?;
    let pauses = detect_pauses(&score, &params.pause);
    let mask = pauses.to_mask(score.len());
    let clipped = clipped_score(&score, args.clip);

    match args.output {
        Some(path) => {
            write_score_csv_file(&path, &clipped, &mask, trace.sample_rate)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            println!(
                "Wrote {} samples ({} pauses) to {}",
                clipped.len(),
                pauses.len(),
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            write_score_csv(stdout.lock(), &clipped, &mask, trace.sample_rate)?;
        }
    }
    Ok(())
}
