//! Analysis configuration file format and operations.

use pleth_analysis::{
    AnalysisParams, CycleParams, DEFAULT_SAMPLE_RATE, EamiParams, PauseParams, TimingParams,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, FileOp};
use crate::paths::user_config_path;
use crate::validation::validate_config;

/// Parameters for every analysis, stored as TOML.
///
/// Missing fields and tables take their default values, so an empty file is a
/// valid configuration.
///
/// # TOML Format
///
/// ```toml
/// sample_rate = 2000.0
///
/// [eami]
/// low_hz = 2.0
/// high_hz = 20.0
/// envelope_level = 0.90309
/// band_levels = [2.30103, 0.75]
/// filter_order = 1
///
/// [pause]
/// score_threshold = 0.5
/// min_duration_samples = 600
///
/// [cycles]
/// extrema_radius = 100
/// min_height = 0.2
///
/// [timing]
/// slow_window_secs = 1.0
/// fast_window_secs = 0.025
/// padding_secs = 5.0
/// tails = 0.05
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Sampling rate of traces that carry none of their own, in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,

    /// eAMI score parameters.
    #[serde(default)]
    pub eami: EamiParams,

    /// Pause detection thresholds.
    #[serde(default)]
    pub pause: PauseParams,

    /// Cycle segmentation parameters.
    #[serde(default)]
    pub cycles: CycleParams,

    /// Phase duration parameters.
    #[serde(default)]
    pub timing: TimingParams,
}

fn default_sample_rate() -> f64 {
    DEFAULT_SAMPLE_RATE
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            eami: EamiParams::default(),
            pause: PauseParams::default(),
            cycles: CycleParams::default(),
            timing: TimingParams::default(),
        }
    }
}

impl AnalysisConfig {
    /// Set the default sample rate.
    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Load and validate a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::io(FileOp::Read, path, e))?;
        Self::from_toml(&content).map_err(|e| e.in_file(path))
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = toml::from_str(toml_str)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Resolve the configuration to use.
    ///
    /// An explicit path must exist. Without one, the user config file is used
    /// when present, and the defaults otherwise. Returns the path that was
    /// loaded, if any.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }
        let user = user_config_path();
        if user.is_file() {
            let config = Self::load(&user)?;
            return Ok((config, Some(user)));
        }
        Ok((Self::default(), None))
    }

    /// Save the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::io(FileOp::CreateDir, parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::io(FileOp::Write, path, e))?;
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The analysis parameter blocks.
    pub fn params(&self) -> AnalysisParams {
        AnalysisParams {
            eami: self.eami,
            pause: self.pause,
            cycles: self.cycles,
            timing: self.timing,
        }
    }
}
