//! Pleth CLI - breathing analysis for whole-body plethysmograph traces.

mod commands;

use clap::{Parser, Subcommand};
use commands::common::GlobalArgs;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pleth")]
#[command(author, version, about = "Plethysmograph breathing analysis", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the per-sample eAMI score and pause mask as CSV
    Score(commands::score::ScoreArgs),

    /// List detected breathing pauses
    Pauses(commands::pauses::PausesArgs),

    /// Segment breath cycles and report the breath rate
    Cycles(commands::cycles::CyclesArgs),

    /// Estimate inspiration and expiration durations
    Timing(commands::timing::TimingArgs),

    /// Summarize every analysis for one or more traces
    Summary(commands::summary::SummaryArgs),

    /// Show or create the configuration file
    Config(commands::config::ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    match cli.command {
        Commands::Score(args) => commands::score::run(args, &cli.global),
        Commands::Pauses(args) => commands::pauses::run(args, &cli.global),
        Commands::Cycles(args) => commands::cycles::run(args, &cli.global),
        Commands::Timing(args) => commands::timing::run(args, &cli.global),
        Commands::Summary(args) => commands::summary::run(args, &cli.global),
        Commands::Config(args) => commands::config::run(args, &cli.global),
    }
}
