//! Configuration file management.

use anyhow::Context;
use clap::{Args, Subcommand};
use pleth_config::{AnalysisConfig, user_config_path};
use std::path::PathBuf;

use super::common::{GlobalArgs, load_config};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the configuration in effect as TOML
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the user configuration path
    Path,
}

pub fn run(args: ConfigArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = load_config(global)?;
            print!("{}", config.to_toml()?);
        }
        ConfigCommand::Init { force } => {
            let path: PathBuf = global.config.clone().unwrap_or_else(user_config_path);
            if path.exists() && !force {
                anyhow::bail!(
                    "Configuration '{}' already exists. Use --force to overwrite.",
                    path.display()
                );
            }
            AnalysisConfig::default()
                .save(&path)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            println!("Wrote default configuration to {}", path.display());
        }
        ConfigCommand::Path => {
            println!("{}", user_config_path().display());
        }
    }
    Ok(())
}
