//! Error types for trace analysis.

use pleth_core::FilterError;
use thiserror::Error;

/// Errors reported by the analysis routines.
///
/// Every failure is returned to the caller; nothing is retried or replaced by
/// a fallback value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// A parameter is outside its valid range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Description of why the value is rejected.
        reason: String,
    },

    /// The trace is too short for the requested filtering, smoothing or padding.
    #[error("insufficient data: need more than {needed} samples, got {got}")]
    InsufficientData {
        /// Length the trace must exceed.
        needed: usize,
        /// Length actually supplied.
        got: usize,
    },

    /// The trace carries no usable variation, e.g. all samples are equal.
    #[error("degenerate signal: {0}")]
    DegenerateSignal(String),
}

impl AnalysisError {
    /// Create an invalid parameter error.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl From<FilterError> for AnalysisError {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::SignalTooShort { len, padlen } => AnalysisError::InsufficientData {
                needed: padlen,
                got: len,
            },
            FilterError::InvalidOrder { .. } => AnalysisError::invalid("filter_order", err.to_string()),
            FilterError::CutoffOutOfRange { .. }
            | FilterError::InvalidBand { .. }
            | FilterError::CutoffMismatch { .. } => AnalysisError::invalid("cutoff", err.to_string()),
        }
    }
}

/// Convenience result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
