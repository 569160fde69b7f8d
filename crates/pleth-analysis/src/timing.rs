//! Inspiration and expiration durations from zero crossings.
//!
//! The trace is smoothed twice, with a slow window that follows the baseline
//! and a fast window that follows individual breaths. Their difference crosses
//! zero upward at the start of each expiration-to-inspiration transition and
//! downward at the reverse. Durations between crossings are collected, sorted
//! and trimmed at both tails.
//!
//! Sorting happens before trimming, so the returned `t_in` and `t_out` are
//! trimmed marginal distributions. Index `k` of one does not correspond to
//! index `k` of the other, nor to the `k`-th breath.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::pause::samples_from_secs;
use crate::smoothing::gaussian_smooth;

/// Smoothing windows, edge padding and tail trimming.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingParams {
    /// Baseline smoothing window in seconds.
    pub slow_window_secs: f64,
    /// Breath smoothing window in seconds.
    pub fast_window_secs: f64,
    /// Seconds cropped from each end after smoothing.
    pub padding_secs: f64,
    /// Fraction discarded at each end of the sorted durations.
    pub tails: f64,
}

impl Default for TimingParams {
    fn default() -> Self {
        Self {
            slow_window_secs: 1.0,
            fast_window_secs: 0.025,
            padding_secs: 5.0,
            tails: 0.05,
        }
    }
}

impl TimingParams {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("slow_window_secs", self.slow_window_secs),
            ("fast_window_secs", self.fast_window_secs),
            ("padding_secs", self.padding_secs),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(AnalysisError::invalid(
                    name,
                    format!("must be a non-negative number of seconds, got {value}"),
                ));
            }
        }
        if !(0.0..0.5).contains(&self.tails) {
            return Err(AnalysisError::invalid(
                "tails",
                format!("must be in [0, 0.5), got {}", self.tails),
            ));
        }
        Ok(())
    }
}

/// Trimmed, ascending phase durations in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseDurations {
    /// Falling-to-next-rising gaps.
    pub t_in: Vec<f64>,
    /// Rising-to-falling gaps.
    pub t_out: Vec<f64>,
}

impl PhaseDurations {
    /// Median of `t_in`.
    pub fn median_t_in(&self) -> Option<f64> {
        median(&self.t_in)
    }

    /// Median of `t_out`.
    pub fn median_t_out(&self) -> Option<f64> {
        median(&self.t_out)
    }

    /// Mean of `t_in`.
    pub fn mean_t_in(&self) -> Option<f64> {
        mean(&self.t_in)
    }

    /// Mean of `t_out`.
    pub fn mean_t_out(&self) -> Option<f64> {
        mean(&self.t_out)
    }

    /// Returns true if no complete cycle was found.
    pub fn is_empty(&self) -> bool {
        self.t_in.is_empty() && self.t_out.is_empty()
    }
}

/// Median of an ascending slice.
fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0),
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Upward and downward zero crossings of `signal`.
///
/// Each index is the last sample before the crossing: rising where
/// `signal[k] <= 0 < signal[k + 1]`, falling where `signal[k] > 0 >= signal[k + 1]`.
///
/// ```rust
/// use pleth_analysis::timing::zero_crossings;
///
/// let (rising, falling) = zero_crossings(&[-1.0, 0.0, 2.0, 1.0, -1.0, 3.0]);
/// assert_eq!(rising, vec![1, 4]);
/// assert_eq!(falling, vec![3]);
/// ```
pub fn zero_crossings(signal: &[f64]) -> (Vec<usize>, Vec<usize>) {
    let mut rising = Vec::new();
    let mut falling = Vec::new();
    for (k, pair) in signal.windows(2).enumerate() {
        if pair[0] <= 0.0 && pair[1] > 0.0 {
            rising.push(k);
        } else if pair[0] > 0.0 && pair[1] <= 0.0 {
            falling.push(k);
        }
    }
    (rising, falling)
}

fn trim_tails(mut samples: Vec<usize>, tails: f64, sample_rate: f64) -> Vec<f64> {
    samples.sort_unstable();
    let n = samples.len() as f64;
    let lo = (n * tails) as usize;
    let hi = (n * (1.0 - tails)) as usize;
    samples
        .get(lo..hi)
        .unwrap_or_default()
        .iter()
        .map(|&d| d as f64 / sample_rate)
        .collect()
}

/// Estimates inspiration and expiration durations of `trace`.
///
/// # Errors
///
/// - `InvalidParameter` for an empty trace, a non-positive sample rate or
///   out-of-range parameters.
/// - `InsufficientData` when the trace is not longer than twice the padding,
///   or not longer than either smoothing window.
pub fn phase_durations(trace: &[f64], sample_rate: f64, params: &TimingParams) -> Result<PhaseDurations> {
    if trace.is_empty() {
        return Err(AnalysisError::invalid("trace", "must not be empty"));
    }
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(AnalysisError::invalid(
            "sample_rate",
            format!("must be positive, got {sample_rate}"),
        ));
    }
    params.validate()?;

    let padding = samples_from_secs(params.padding_secs, sample_rate);
    let Some(needed) = padding.checked_mul(2) else {
        return Err(AnalysisError::invalid(
            "padding_secs",
            format!("{} s is too long at {sample_rate} Hz", params.padding_secs),
        ));
    };
    if trace.len() <= needed {
        return Err(AnalysisError::InsufficientData {
            needed,
            got: trace.len(),
        });
    }

    let slow_window = samples_from_secs(params.slow_window_secs, sample_rate);
    let fast_window = samples_from_secs(params.fast_window_secs, sample_rate);
    let longest = slow_window.max(fast_window);
    if longest >= trace.len() {
        return Err(AnalysisError::InsufficientData {
            needed: longest.saturating_add(1),
            got: trace.len(),
        });
    }

    let slow = gaussian_smooth(trace, slow_window);
    let fast = gaussian_smooth(trace, fast_window);
    let normalized: Vec<f64> = fast[padding..trace.len() - padding]
        .iter()
        .zip(&slow[padding..trace.len() - padding])
        .map(|(f, s)| f - s)
        .collect();

    let (mut rising, mut falling) = zero_crossings(&normalized);
    let Some(&last_falling) = falling.last() else {
        return Ok(PhaseDurations::default());
    };
    rising.truncate(rising.partition_point(|&r| r < last_falling));
    let Some(&first_rising) = rising.first() else {
        return Ok(PhaseDurations::default());
    };
    falling.drain(..falling.partition_point(|&f| f < first_rising));

    // Crossings alternate, so after alignment r[k] < f[k] < r[k + 1]
    let t_in: Vec<usize> = rising.iter().skip(1).zip(&falling).map(|(r, f)| r - f).collect();
    let t_out: Vec<usize> = falling.iter().zip(&rising).map(|(f, r)| f - r).collect();

    debug!(
        rising = rising.len(),
        falling = falling.len(),
        cropped = normalized.len(),
        "phase crossings"
    );

    Ok(PhaseDurations {
        t_in: trim_tails(t_in, params.tails, sample_rate),
        t_out: trim_tails(t_out, params.tails, sample_rate),
    })
}
