//! Whole-trace summary combining every analysis.

use serde::{Deserialize, Serialize};

use crate::cycles::{CycleParams, segment_cycles};
use crate::eami::{EamiParams, eami};
use crate::error::{AnalysisError, Result};
use crate::pause::{PauseParams, detect_pauses};
use crate::timing::{TimingParams, phase_durations};

/// Parameter blocks of all analyses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    /// eAMI score.
    pub eami: EamiParams,
    /// Pause detection.
    pub pause: PauseParams,
    /// Cycle segmentation.
    pub cycles: CycleParams,
    /// Phase durations.
    pub timing: TimingParams,
}

/// Scalar results for one trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    /// Number of samples.
    pub samples: usize,
    /// Trace length in seconds.
    pub duration_secs: f64,
    /// Pauses longer than the minimum duration.
    pub pause_count: usize,
    /// Total time spent in pauses, in seconds.
    pub pause_secs: f64,
    /// Validated breath cycles.
    pub cycle_count: usize,
    /// Breaths per minute.
    pub breath_rate: f64,
    /// Median inspiration time, if the trace is long enough.
    pub median_t_in: Option<f64>,
    /// Median expiration time, if the trace is long enough.
    pub median_t_out: Option<f64>,
    /// Mean inspiration time.
    pub mean_t_in: Option<f64>,
    /// Mean expiration time.
    pub mean_t_out: Option<f64>,
}

/// Runs every analysis on `trace`.
///
/// A trace too short for the duration estimator's padding still gets the
/// other metrics; its timing fields are `None`.
pub fn summarize(trace: &[f64], sample_rate: f64, params: &AnalysisParams) -> Result<TraceSummary> {
    let score = eami(trace, sample_rate, &params.eami)?;
    let pauses = detect_pauses(&score, &params.pause);
    let cycles = segment_cycles(trace, &params.cycles)?;

    let durations = match phase_durations(trace, sample_rate, &params.timing) {
        Ok(d) => Some(d),
        Err(AnalysisError::InsufficientData { .. }) => None,
        Err(e) => return Err(e),
    };

    Ok(TraceSummary {
        samples: trace.len(),
        duration_secs: trace.len() as f64 / sample_rate,
        pause_count: pauses.len(),
        pause_secs: pauses.total_duration() as f64 / sample_rate,
        cycle_count: cycles.cycle_count(),
        breath_rate: cycles.breath_rate(trace.len(), sample_rate),
        median_t_in: durations.as_ref().and_then(|d| d.median_t_in()),
        median_t_out: durations.as_ref().and_then(|d| d.median_t_out()),
        mean_t_in: durations.as_ref().and_then(|d| d.mean_t_in()),
        mean_t_out: durations.as_ref().and_then(|d| d.mean_t_out()),
    })
}
