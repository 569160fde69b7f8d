//! Pause listing.

use anyhow::Context;
use clap::Args;
use pleth_analysis::{PauseParams, detect_pauses, eami};
use serde::Serialize;
use std::path::PathBuf;

use super::common::{GlobalArgs, load_config, load_trace, print_json};

#[derive(Args)]
pub struct PausesArgs {
    /// Input trace file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Score threshold (overrides the configuration)
    #[arg(long)]
    threshold: Option<f64>,

    /// Minimum pause duration in seconds (overrides the configuration)
    #[arg(long)]
    min_duration: Option<f64>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Pause {
    start: usize,
    duration: usize,
    start_secs: f64,
    duration_secs: f64,
}

#[derive(Serialize)]
struct PauseReport {
    sample_rate: f64,
    score_threshold: f64,
    min_duration_samples: usize,
    count: usize,
    pauses: Vec<Pause>,
}

pub fn run(args: PausesArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let config = load_config(global)?;
    let params = config.params();
    let trace = load_trace(&args.input, global, &config)?;
    let sample_rate = trace.sample_rate;

    let threshold = args.threshold.unwrap_or(params.pause.score_threshold);
    if !threshold.is_finite() {
        anyhow::bail!("Invalid threshold: {threshold}");
    }
    let pause_params = match args.min_duration {
        Some(secs) => PauseParams::with_min_duration_secs(threshold, secs, sample_rate),
        None => PauseParams {
            score_threshold: threshold,
            ..params.pause
        },
    };

    let score = eami(&trace.samples_f64(), sample_rate, &params.eami)
        .context("failed to compute eAMI score")?;
    let intervals = detect_pauses(&score, &pause_params);

    let report = PauseReport {
        sample_rate,
        score_threshold: pause_params.score_threshold,
        min_duration_samples: pause_params.min_duration_samples,
        count: intervals.len(),
        pauses: intervals
            .iter()
            .map(|(start, duration)| Pause {
                start,
                duration,
                start_secs: start as f64 / sample_rate,
                duration_secs: duration as f64 / sample_rate,
            })
            .collect(),
    };

    if args.json {
        return print_json(&report);
    }

    println!(
        "{} pause(s) longer than {:.3}s (threshold {})",
        report.count,
        pause_params.min_duration_secs(sample_rate),
        report.score_threshold
    );
    if !report.pauses.is_empty() {
        println!("  {:>10}  {:>10}", "Start (s)", "Length (s)");
        println!("  {:>10}  {:>10}", "---------", "----------");
        for pause in &report.pauses {
            println!("  {:>10.3}  {:>10.3}", pause.start_secs, pause.duration_secs);
        }
    }
    Ok(())
}
