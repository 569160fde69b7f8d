//! Breath cycle segmentation.

use anyhow::Context;
use clap::Args;
use pleth_analysis::segment_cycles;
use serde::Serialize;
use std::path::PathBuf;

use super::common::{GlobalArgs, load_config, load_trace, print_json};

#[derive(Args)]
pub struct CyclesArgs {
    /// Input trace file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct CycleReport {
    cycle_count: usize,
    breath_rate: f64,
    peaks: Vec<usize>,
    valleys: Vec<usize>,
}

pub fn run(args: CyclesArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let config = load_config(global)?;
    let trace = load_trace(&args.input, global, &config)?;

    let cycles = segment_cycles(&trace.samples_f64(), &config.cycles)
        .context("failed to segment breath cycles")?;
    let report = CycleReport {
        cycle_count: cycles.cycle_count(),
        breath_rate: cycles.breath_rate(trace.len(), trace.sample_rate),
        peaks: cycles.peaks,
        valleys: cycles.valleys,
    };

    if args.json {
        return print_json(&report);
    }

    println!("Breath cycles: {}", report.cycle_count);
    println!("Valleys:       {}", report.valleys.len());
    println!("Breath rate:   {:.1} /min", report.breath_rate);
    Ok(())
}
