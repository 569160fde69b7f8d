//! Batch summaries over many traces.

use anyhow::Context;
use chrono::NaiveDateTime;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use pleth_analysis::{TraceSummary, summarize};
use serde::Serialize;
use std::path::PathBuf;

use super::common::{GlobalArgs, format_secs, load_config, load_trace, print_json};

#[derive(Args)]
pub struct SummaryArgs {
    /// Input trace files
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Row {
    file: String,
    start: Option<NaiveDateTime>,
    #[serde(flatten)]
    summary: TraceSummary,
}

pub fn run(args: SummaryArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let config = load_config(global)?;
    let params = config.params();

    let pb = ProgressBar::new(args.inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );

    let mut rows = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        pb.set_message(input.display().to_string());
        let trace = load_trace(input, global, &config)?;
        let summary = summarize(&trace.samples_f64(), trace.sample_rate, &params)
            .with_context(|| format!("failed to analyze '{}'", input.display()))?;
        rows.push(Row {
            file: input.display().to_string(),
            start: trace.start,
            summary,
        });
        pb.inc(1);
    }
    pb.finish_and_clear();

    if args.json {
        return print_json(&rows);
    }

    println!(
        "{:<24}  {:>8}  {:>6}  {:>8}  {:>6}  {:>8}  {:>6}  {:>6}",
        "File", "Secs", "Pauses", "Pause s", "Cycles", "Rate/min", "T_in", "T_out"
    );
    for row in &rows {
        let s = &row.summary;
        println!(
            "{:<24}  {:>8.1}  {:>6}  {:>8.2}  {:>6}  {:>8.1}  {:>6}  {:>6}",
            row.file,
            s.duration_secs,
            s.pause_count,
            s.pause_secs,
            s.cycle_count,
            s.breath_rate,
            format_secs(s.median_t_in),
            format_secs(s.median_t_out)
        );
    }
    Ok(())
}
