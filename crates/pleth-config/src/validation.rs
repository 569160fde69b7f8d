//! Range checks for analysis configuration.
//!
//! [`validate_config`] checks every field and the cutoffs derived from the
//! eAMI levels, collecting all violations instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use pleth_config::{AnalysisConfig, validate_config};
//!
//! let mut config = AnalysisConfig::default();
//! assert!(validate_config(&config).is_ok());
//!
//! config.timing.tails = 0.7;
//! assert!(validate_config(&config).is_err());
//! ```

use pleth_core::MAX_ORDER;
use thiserror::Error;

use crate::config::AnalysisConfig;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f64,
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
    },

    /// Parameter violates a constraint that is not a simple range.
    #[error("parameter '{param}': {reason}")]
    Constraint {
        /// Name of the parameter.
        param: String,
        /// Description of the violated constraint.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Create a constraint error.
    pub fn constraint(param: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::Constraint {
            param: param.into(),
            reason: reason.into(),
        }
    }

    fn out_of_range(param: &str, value: f64, min: f64, max: f64) -> Self {
        ValidationError::OutOfRange {
            param: param.to_string(),
            value,
            min,
            max,
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Checks every parameter of `config`.
///
/// Returns the single violation, or [`ValidationError::Multiple`] when there
/// is more than one.
pub fn validate_config(config: &AnalysisConfig) -> ValidationResult<()> {
    let mut errors = Vec::new();
    let nyquist = config.sample_rate / 2.0;

    if !(config.sample_rate.is_finite() && config.sample_rate > 0.0) {
        errors.push(ValidationError::constraint(
            "sample_rate",
            format!("must be a positive number of Hz, got {}", config.sample_rate),
        ));
    }

    let eami = &config.eami;
    if !(eami.low_hz.is_finite() && eami.low_hz > 0.0) {
        errors.push(ValidationError::constraint(
            "eami.low_hz",
            format!("must be positive, got {}", eami.low_hz),
        ));
    }
    if !(eami.high_hz.is_finite() && eami.high_hz > eami.low_hz) {
        errors.push(ValidationError::constraint(
            "eami.high_hz",
            format!("must be above low_hz ({}), got {}", eami.low_hz, eami.high_hz),
        ));
    } else if eami.high_hz >= nyquist {
        errors.push(ValidationError::constraint(
            "eami.high_hz",
            format!("must be below the Nyquist frequency {nyquist} Hz, got {}", eami.high_hz),
        ));
    }
    if !(1..=MAX_ORDER).contains(&eami.filter_order) {
        errors.push(ValidationError::out_of_range(
            "eami.filter_order",
            eami.filter_order as f64,
            1.0,
            MAX_ORDER as f64,
        ));
    }
    if let Ok((envelope_hz, band)) = eami.cutoffs() {
        for (param, hz) in [
            ("eami.envelope_level", envelope_hz),
            ("eami.band_levels[0]", band.low_hz),
            ("eami.band_levels[1]", band.high_hz),
        ] {
            if !(hz.is_finite() && hz > 0.0 && hz < nyquist) {
                errors.push(ValidationError::constraint(
                    param,
                    format!("resolves to {hz} Hz, outside (0, {nyquist}) Hz"),
                ));
            }
        }
    }

    if !config.pause.score_threshold.is_finite() {
        errors.push(ValidationError::constraint(
            "pause.score_threshold",
            "must be finite",
        ));
    }

    if config.cycles.extrema_radius == 0 {
        errors.push(ValidationError::constraint(
            "cycles.extrema_radius",
            "must be at least 1 sample",
        ));
    }
    if !config.cycles.min_height.is_finite() {
        errors.push(ValidationError::constraint("cycles.min_height", "must be finite"));
    }

    let timing = &config.timing;
    for (param, value) in [
        ("timing.slow_window_secs", timing.slow_window_secs),
        ("timing.fast_window_secs", timing.fast_window_secs),
        ("timing.padding_secs", timing.padding_secs),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            errors.push(ValidationError::constraint(
                param,
                format!("must be a non-negative number of seconds, got {value}"),
            ));
        }
    }
    if !(0.0..0.5).contains(&timing.tails) {
        errors.push(ValidationError::out_of_range("timing.tails", timing.tails, 0.0, 0.5));
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
