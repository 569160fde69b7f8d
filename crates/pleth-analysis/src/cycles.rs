//! Peak/valley breath-cycle segmentation.
//!
//! Peaks and valleys are windowed local extrema of the raw trace. When more
//! than one peak falls between two consecutive valleys, the pair right after
//! the first valley is collapsed to its higher member. Peaks outside the first
//! and last valley are dropped, as are peaks that do not rise more than
//! `min_height` above the mean of their bounding valleys.

use pleth_core::{Extremum, local_extrema};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnalysisError, Result};

/// Extrema window and height threshold.
///
/// The defaults are tuned to the signal units of the recording setup and are
/// not derived from the trace amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleParams {
    /// An extremum dominates every sample within this many samples.
    pub extrema_radius: usize,
    /// Minimum rise of a peak above its bounding valleys, in trace units.
    pub min_height: f64,
}

impl Default for CycleParams {
    fn default() -> Self {
        Self {
            extrema_radius: 100,
            min_height: 0.2,
        }
    }
}

/// Validated peaks and the valleys that delimit them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathCycles {
    /// One index per breath cycle, ascending.
    pub peaks: Vec<usize>,
    /// Every valley found in the trace, ascending.
    pub valleys: Vec<usize>,
}

impl BreathCycles {
    /// Number of breath cycles.
    pub fn cycle_count(&self) -> usize {
        self.peaks.len()
    }

    /// Breaths per minute over a trace of `len` samples.
    pub fn breath_rate(&self, len: usize, sample_rate: f64) -> f64 {
        if len == 0 {
            return 0.0;
        }
        self.peaks.len() as f64 * 60.0 * sample_rate / len as f64
    }
}

/// Finds one peak per breath cycle in `trace`.
pub fn segment_cycles(trace: &[f64], params: &CycleParams) -> Result<BreathCycles> {
    if trace.is_empty() {
        return Err(AnalysisError::invalid("trace", "must not be empty"));
    }
    if trace.iter().any(|x| !x.is_finite()) {
        return Err(AnalysisError::invalid("trace", "contains non-finite samples"));
    }
    if params.extrema_radius == 0 {
        return Err(AnalysisError::invalid("extrema_radius", "must be at least 1"));
    }
    if !params.min_height.is_finite() {
        return Err(AnalysisError::invalid("min_height", "must be finite"));
    }

    let peaks = local_extrema(trace, params.extrema_radius, Extremum::Maximum);
    let valleys = local_extrema(trace, params.extrema_radius, Extremum::Minimum);
    let raw_peaks = peaks.len();
    let peaks = refine_peaks(trace, &peaks, &valleys, params.min_height);

    debug!(raw_peaks, peaks = peaks.len(), valleys = valleys.len(), "cycle segmentation");
    Ok(BreathCycles { peaks, valleys })
}

/// Deduplicates, trims and height-filters `peaks` against `valleys`.
///
/// Both index lists must be ascending and in range for `trace`. Collisions are
/// resolved against the original peak list in one pass, then applied together:
/// of the first two peaks after a valley, the lower is removed, and the
/// earlier one on a tie.
pub fn refine_peaks(trace: &[f64], peaks: &[usize], valleys: &[usize], min_height: f64) -> Vec<usize> {
    let (Some(&first_valley), Some(&last_valley)) = (valleys.first(), valleys.last()) else {
        return Vec::new();
    };

    // Number of peaks before each valley
    let correspondence: Vec<usize> = valleys
        .iter()
        .map(|&v| peaks.partition_point(|&p| p < v))
        .collect();

    let mut remove = vec![false; peaks.len()];
    for pair in correspondence.windows(2) {
        if pair[1] - pair[0] > 1 {
            let e = pair[0];
            if trace[peaks[e]] > trace[peaks[e + 1]] {
                remove[e + 1] = true;
            } else {
                remove[e] = true;
            }
        }
    }

    peaks
        .iter()
        .zip(&remove)
        .filter(|&(_, &removed)| !removed)
        .map(|(&p, _)| p)
        .filter(|&p| p >= first_valley && p < last_valley)
        .filter(|&p| {
            let onset = valleys.partition_point(|&v| v < p);
            if onset == 0 {
                return false;
            }
            let baseline = (trace[valleys[onset - 1]] + trace[valleys[onset]]) / 2.0;
            trace[p] - baseline > min_height
        })
        .collect()
}
