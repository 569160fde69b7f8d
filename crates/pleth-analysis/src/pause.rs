//! Pause detection on the eAMI score.

use pleth_core::Intervals;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::eami::{EamiParams, eami};
use crate::error::{AnalysisError, Result};

/// Thresholds that turn a score into pause events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PauseParams {
    /// A sample belongs to a pause candidate when its score is above this.
    pub score_threshold: f64,
    /// Candidates must last strictly longer than this many samples.
    pub min_duration_samples: usize,
}

impl Default for PauseParams {
    fn default() -> Self {
        Self {
            score_threshold: 0.5,
            min_duration_samples: 600,
        }
    }
}

impl PauseParams {
    /// Parameters with the minimum duration given in seconds.
    pub fn with_min_duration_secs(score_threshold: f64, secs: f64, sample_rate: f64) -> Self {
        Self {
            score_threshold,
            min_duration_samples: samples_from_secs(secs, sample_rate),
        }
    }

    /// Minimum duration in seconds at `sample_rate`.
    pub fn min_duration_secs(&self, sample_rate: f64) -> f64 {
        self.min_duration_samples as f64 / sample_rate
    }
}

/// Converts a duration in seconds to whole samples, truncating.
///
/// Negative and NaN durations give zero.
pub fn samples_from_secs(secs: f64, sample_rate: f64) -> usize {
    (secs * sample_rate) as usize
}

/// Intervals where `score` stays above the threshold for longer than the
/// minimum duration.
pub fn detect_pauses(score: &[f64], params: &PauseParams) -> Intervals {
    let threshold = params.score_threshold;
    Intervals::from_predicate(score, |&s| s > threshold).longer_than(params.min_duration_samples)
}

/// Number of pauses in `trace`.
///
/// # Example
///
/// ```rust
/// use pleth_analysis::{pause_count, EamiParams, PauseParams};
///
/// let trace: Vec<f64> = (0..8000)
///     .map(|i| (2.0 * std::f64::consts::PI * 5.0 * i as f64 / 2000.0).sin())
///     .collect();
/// let n = pause_count(&trace, 2000.0, &EamiParams::default(), &PauseParams::default()).unwrap();
/// assert_eq!(n, 0);
/// ```
pub fn pause_count(
    trace: &[f64],
    sample_rate: f64,
    eami_params: &EamiParams,
    pause_params: &PauseParams,
) -> Result<usize> {
    if !pause_params.score_threshold.is_finite() {
        return Err(AnalysisError::invalid(
            "score_threshold",
            format!("must be finite, got {}", pause_params.score_threshold),
        ));
    }
    let score = eami(trace, sample_rate, eami_params)?;
    let pauses = detect_pauses(&score, pause_params);
    debug!(
        pauses = pauses.len(),
        total_samples = pauses.total_duration(),
        "pause detection"
    );
    Ok(pauses.len())
}

/// Score limited to `ceiling` for display.
///
/// Infinite values clip to the ceiling; NaN passes through.
pub fn clipped_score(score: &[f64], ceiling: f64) -> Vec<f64> {
    score
        .iter()
        .map(|&s| if s > ceiling { ceiling } else { s })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_pauses_filters_by_length() {
        let mut score = vec![0.0; 100];
        score[10..15].iter_mut().for_each(|s| *s = 1.0);
        score[40..80].iter_mut().for_each(|s| *s = 0.9);
        let params = PauseParams {
            score_threshold: 0.5,
            min_duration_samples: 5,
        };
        let pauses = detect_pauses(&score, &params);
        assert_eq!(pauses.starts(), &[40]);
        assert_eq!(pauses.durations(), &[40]);
    }

    #[test]
    fn threshold_is_strict() {
        let score = [0.5; 20];
        let params = PauseParams {
            score_threshold: 0.5,
            min_duration_samples: 0,
        };
        assert!(detect_pauses(&score, &params).is_empty());
    }

    #[test]
    fn infinite_score_counts_as_above_threshold() {
        let score = [0.0, f64::INFINITY, f64::INFINITY, f64::NAN, 0.0];
        let params = PauseParams {
            score_threshold: 0.5,
            min_duration_samples: 1,
        };
        let pauses = detect_pauses(&score, &params);
        assert_eq!(pauses.iter().collect::<Vec<_>>(), vec![(1, 2)]);
    }

    #[test]
    fn seconds_conversion() {
        assert_eq!(samples_from_secs(0.3, 2000.0), 600);
        assert_eq!(samples_from_secs(0.0004, 2000.0), 0);
        assert_eq!(samples_from_secs(-1.0, 2000.0), 0);
        let params = PauseParams::with_min_duration_secs(0.5, 0.3, 2000.0);
        assert_eq!(params, PauseParams::default());
        assert!((params.min_duration_secs(2000.0) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn clipping_keeps_nan() {
        let clipped = clipped_score(&[0.1, 3.0, f64::INFINITY, f64::NAN], 2.0);
        assert_eq!(&clipped[..3], &[0.1, 2.0, 2.0]);
        assert!(clipped[3].is_nan());
    }

    #[test]
    fn non_finite_threshold_is_invalid() {
        let params = PauseParams {
            score_threshold: f64::NAN,
            ..PauseParams::default()
        };
        let err = pause_count(&[0.0; 100], 2000.0, &EamiParams::default(), &params).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter { name: "score_threshold", .. }));
    }
}
