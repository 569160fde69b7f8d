//! Configuration files for pleth respiration analysis.
//!
//! This crate stores the parameters of every analysis in one TOML document.
//!
//! # Features
//!
//! - **Config file**: Load and save [`AnalysisConfig`] as TOML, with defaults
//!   for every missing field
//! - **Validation**: Range checks that report every violation at once
//! - **Paths**: Platform-specific user configuration location
//!
//! # Example
//!
//! ```rust,no_run
//! use pleth_config::{AnalysisConfig, user_config_path};
//!
//! let config = AnalysisConfig::default().with_sample_rate(1000.0);
//! config.save(user_config_path()).unwrap();
//!
//! let loaded = AnalysisConfig::load(user_config_path()).unwrap();
//! let params = loaded.params();
//! ```

mod config;
mod error;

/// Platform-specific configuration paths.
pub mod paths;

/// Configuration validation.
pub mod validation;

pub use config::AnalysisConfig;
pub use error::{ConfigError, FileOp};
pub use paths::{CONFIG_FILE_NAME, ensure_user_config_dir, user_config_dir, user_config_path};
pub use validation::{ValidationError, ValidationResult, validate_config};
