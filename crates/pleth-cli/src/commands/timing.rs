//! Inspiration and expiration durations.

use anyhow::Context;
use clap::Args;
use pleth_analysis::phase_durations;
use serde::Serialize;
use std::path::PathBuf;

use super::common::{GlobalArgs, format_secs, load_config, load_trace, print_json};

#[derive(Args)]
pub struct TimingArgs {
    /// Input trace file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct TimingReport {
    median_t_in: Option<f64>,
    median_t_out: Option<f64>,
    mean_t_in: Option<f64>,
    mean_t_out: Option<f64>,
    t_in: Vec<f64>,
    t_out: Vec<f64>,
}

pub fn run(args: TimingArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let config = load_config(global)?;
    let trace = load_trace(&args.input, global, &config)?;

    let durations = phase_durations(&trace.samples_f64(), trace.sample_rate, &config.timing)
        .context("failed to estimate phase durations")?;
    let report = TimingReport {
        median_t_in: durations.median_t_in(),
        median_t_out: durations.median_t_out(),
        mean_t_in: durations.mean_t_in(),
        mean_t_out: durations.mean_t_out(),
        t_in: durations.t_in,
        t_out: durations.t_out,
    };

    if args.json {
        return print_json(&report);
    }

    println!(
        "Phase durations (s), {} inspirations, {} expirations",
        report.t_in.len(),
        report.t_out.len()
    );
    println!("  {:>8}  {:>8}  {:>8}", "", "median", "mean");
    println!(
        "  {:>8}  {:>8}  {:>8}",
        "t_in",
        format_secs(report.median_t_in),
        format_secs(report.mean_t_in)
    );
    println!(
        "  {:>8}  {:>8}  {:>8}",
        "t_out",
        format_secs(report.median_t_out),
        format_secs(report.mean_t_out)
    );
    Ok(())
}
