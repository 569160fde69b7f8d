//! eAMI abnormal-breathing score.
//!
//! The score is the ratio between the smoothed power of the respiration
//! envelope and the smoothed power of the band-passed trace. Regular breathing
//! has a nearly constant envelope and scores close to zero; a pause collapses
//! the signal power while the envelope is still decaying, which drives the
//! ratio up.
//!
//! Where the signal energy approaches zero the ratio grows without bound and
//! may reach infinity. The score is not clamped; threshold it, or use
//! [`clipped_score`](crate::pause::clipped_score) for display.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::pipeline::{FilterPipeline, FrequencyBand, filter_cutoff};

/// Parameters of the eAMI score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EamiParams {
    /// Lower edge of the respiration band in Hz.
    pub low_hz: f64,
    /// Upper edge of the respiration band in Hz.
    pub high_hz: f64,
    /// Level of the envelope low-pass cutoff within the band.
    pub envelope_level: f64,
    /// Levels of the energy band edges within the band: `[low, high]`.
    pub band_levels: [f64; 2],
    /// Butterworth order of every filter stage.
    pub filter_order: usize,
}

impl Default for EamiParams {
    fn default() -> Self {
        Self {
            low_hz: 2.0,
            high_hz: 20.0,
            envelope_level: 0.90309,
            band_levels: [2.30103, 0.75],
            filter_order: 1,
        }
    }
}

impl EamiParams {
    /// Respiration band as a [`FrequencyBand`].
    pub fn freq_range(&self) -> FrequencyBand {
        FrequencyBand::new(self.low_hz, self.high_hz)
    }

    /// Envelope cutoff in Hz and the energy band, resolved against the range.
    pub fn cutoffs(&self) -> Result<(f64, FrequencyBand)> {
        let levels = [self.envelope_level, self.band_levels[0], self.band_levels[1]];
        let hz = filter_cutoff(&levels, self.freq_range())?;
        Ok((hz[0], FrequencyBand::new(hz[1], hz[2])))
    }
}

/// Computes the per-sample eAMI score of `trace`.
///
/// The output has the same length as `trace`.
///
/// # Errors
///
/// - `InvalidParameter` for an empty trace, non-finite samples, a bad sample
///   rate or filter order, or cutoffs outside (0, Nyquist).
/// - `InsufficientData` when the trace is shorter than the filter padding.
/// - `DegenerateSignal` when the trace is constant or no score sample is finite.
pub fn eami(trace: &[f64], sample_rate: f64, params: &EamiParams) -> Result<Vec<f64>> {
    if trace.is_empty() {
        return Err(AnalysisError::invalid("trace", "must not be empty"));
    }
    let (min, max) = trace
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    let range = max - min;
    if !range.is_finite() || trace.iter().any(|x| x.is_nan()) {
        return Err(AnalysisError::invalid("trace", "contains non-finite samples"));
    }
    if range == 0.0 {
        return Err(AnalysisError::DegenerateSignal("trace is constant".to_string()));
    }

    let pipeline = FilterPipeline::new(sample_rate, params.filter_order)?;
    let (envelope_hz, band) = params.cutoffs()?;
    debug!(
        len = trace.len(),
        envelope_hz,
        band_low = band.low_hz,
        band_high = band.high_hz,
        "computing eAMI"
    );

    let signal = pipeline.bandpass(trace, params.freq_range())?;
    let rectified: Vec<f64> = signal.iter().map(|x| x.abs()).collect();
    let envelope = pipeline.lowpass(&rectified, envelope_hz)?;

    let numerator = pipeline.energy(&envelope, band)?;
    let denominator = pipeline.energy(&signal, band)?;
    let score: Vec<f64> = numerator
        .iter()
        .zip(&denominator)
        .map(|(n, d)| n / d)
        .collect();

    if !score.iter().any(|s| s.is_finite()) {
        return Err(AnalysisError::DegenerateSignal(
            "no finite score values".to_string(),
        ));
    }
    Ok(score)
}
