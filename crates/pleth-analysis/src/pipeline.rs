//! Zero-phase filter pipeline in physical units.
//!
//! [`FilterPipeline`] wraps the Butterworth design and forward-backward
//! filtering from `pleth-core` behind cutoffs expressed in Hz. A cutoff is
//! converted to the designer's normalized unit by dividing by the sample rate,
//! so the -3 dB corner of each filter sits at half its nominal frequency. The
//! eAMI level constants are tuned for this convention.
//!
//! # Example
//!
//! ```rust
//! use pleth_analysis::pipeline::{FilterPipeline, FrequencyBand};
//!
//! let pipeline = FilterPipeline::new(2000.0, 1).unwrap();
//! let trace: Vec<f64> = (0..4000).map(|i| (i as f64 * 0.02).sin()).collect();
//!
//! let band = pipeline.bandpass(&trace, FrequencyBand::new(2.0, 20.0)).unwrap();
//! assert_eq!(band.len(), trace.len());
//! ```

use pleth_core::{Cutoff, FilterKind, MAX_ORDER, butterworth, filtfilt};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Sampling rate of the plethysmograph recordings, in Hz.
pub const DEFAULT_SAMPLE_RATE: f64 = 2000.0;

/// A passband in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyBand {
    /// Lower edge in Hz
    pub low_hz: f64,
    /// Upper edge in Hz
    pub high_hz: f64,
}

impl FrequencyBand {
    /// Create a new frequency band.
    pub const fn new(low_hz: f64, high_hz: f64) -> Self {
        Self { low_hz, high_hz }
    }

    /// Geometric center of the band.
    pub fn center_hz(&self) -> f64 {
        (self.low_hz * self.high_hz).sqrt()
    }

    /// Width of the band in Hz.
    pub fn bandwidth(&self) -> f64 {
        self.high_hz - self.low_hz
    }
}

fn check_range(range: FrequencyBand) -> Result<()> {
    let ok = range.low_hz.is_finite()
        && range.high_hz.is_finite()
        && range.low_hz > 0.0
        && range.high_hz > range.low_hz;
    if ok {
        Ok(())
    } else {
        Err(AnalysisError::invalid(
            "freq_range",
            format!(
                "need 0 < low < high, got ({}, {})",
                range.low_hz, range.high_hz
            ),
        ))
    }
}

/// Maps dimensionless levels onto cutoffs inside `range` on a log scale.
///
/// Each cutoff is `exp(level * ln(low) + (1 - level) * ln(high))`: level 0 is
/// `range.high_hz`, level 1 is `range.low_hz`. Levels outside [0, 1]
/// extrapolate beyond the range.
///
/// ```rust
/// use pleth_analysis::pipeline::{filter_cutoff, FrequencyBand};
///
/// let cutoffs = filter_cutoff(&[0.0, 1.0], FrequencyBand::new(2.0, 20.0)).unwrap();
/// assert!((cutoffs[0] - 20.0).abs() < 1e-9);
/// assert!((cutoffs[1] - 2.0).abs() < 1e-9);
/// ```
pub fn filter_cutoff(levels: &[f64], range: FrequencyBand) -> Result<Vec<f64>> {
    check_range(range)?;
    let ln_low = range.low_hz.ln();
    let ln_high = range.high_hz.ln();
    Ok(levels
        .iter()
        .map(|&level| (level * ln_low + (1.0 - level) * ln_high).exp())
        .collect())
}

/// Inverse of [`filter_cutoff`]: the level that maps to `cutoff_hz`.
pub fn cutoff_level(range: FrequencyBand, cutoff_hz: f64) -> Result<f64> {
    check_range(range)?;
    if !(cutoff_hz.is_finite() && cutoff_hz > 0.0) {
        return Err(AnalysisError::invalid(
            "cutoff",
            format!("must be positive, got {cutoff_hz}"),
        ));
    }
    let ln_high = range.high_hz.ln();
    Ok((ln_high - cutoff_hz.ln()) / (ln_high - range.low_hz.ln()))
}

/// Zero-phase Butterworth filtering at a fixed sample rate and order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterPipeline {
    sample_rate: f64,
    order: usize,
}

impl FilterPipeline {
    /// Create a pipeline, validating the sample rate and filter order.
    pub fn new(sample_rate: f64, order: usize) -> Result<Self> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(AnalysisError::invalid(
                "sample_rate",
                format!("must be positive, got {sample_rate}"),
            ));
        }
        if !(1..=MAX_ORDER).contains(&order) {
            return Err(AnalysisError::invalid(
                "filter_order",
                format!("must be in 1..={MAX_ORDER}, got {order}"),
            ));
        }
        Ok(Self { sample_rate, order })
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Butterworth order of every stage.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Half the sample rate.
    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }

    fn normalize(&self, hz: f64) -> Result<f64> {
        if !hz.is_finite() || hz <= 0.0 || hz >= self.nyquist() {
            return Err(AnalysisError::invalid(
                "cutoff",
                format!(
                    "{hz} Hz outside (0, {}) Hz for sample rate {}",
                    self.nyquist(),
                    self.sample_rate
                ),
            ));
        }
        Ok(hz / self.sample_rate)
    }

    /// Filters `signal` with cutoff(s) in Hz.
    ///
    /// Returns a signal of the same length. Fails with `InvalidParameter` for
    /// a cutoff that is not in (0, Nyquist), and with `InsufficientData` when
    /// the signal is not longer than the filter's edge padding.
    pub fn apply(&self, signal: &[f64], cutoff: Cutoff, kind: FilterKind) -> Result<Vec<f64>> {
        let normalized = match cutoff {
            Cutoff::Single(hz) => Cutoff::Single(self.normalize(hz)?),
            Cutoff::Band(low, high) => Cutoff::Band(self.normalize(low)?, self.normalize(high)?),
        };
        let coefficients = butterworth(self.order, normalized, kind)?;
        Ok(filtfilt(&coefficients, signal)?)
    }

    /// Low-pass at `cutoff_hz`.
    pub fn lowpass(&self, signal: &[f64], cutoff_hz: f64) -> Result<Vec<f64>> {
        self.apply(signal, Cutoff::Single(cutoff_hz), FilterKind::Lowpass)
    }

    /// High-pass at `cutoff_hz`.
    pub fn highpass(&self, signal: &[f64], cutoff_hz: f64) -> Result<Vec<f64>> {
        self.apply(signal, Cutoff::Single(cutoff_hz), FilterKind::Highpass)
    }

    /// Band-pass between the band edges.
    pub fn bandpass(&self, signal: &[f64], band: FrequencyBand) -> Result<Vec<f64>> {
        self.apply(
            signal,
            Cutoff::Band(band.low_hz, band.high_hz),
            FilterKind::Bandpass,
        )
    }

    /// Smoothed power above `band.low_hz`.
    ///
    /// High-passes at `band.low_hz`, squares, low-passes the square at
    /// `band.high_hz` and takes the absolute value.
    pub fn energy(&self, signal: &[f64], band: FrequencyBand) -> Result<Vec<f64>> {
        let mut power = self.highpass(signal, band.low_hz)?;
        power.iter_mut().for_each(|x| *x *= *x);
        let mut smoothed = self.lowpass(&power, band.high_hz)?;
        smoothed.iter_mut().for_each(|x| *x = x.abs());
        Ok(smoothed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(freq: f64, sample_rate: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| (2.0 * PI * freq * i as f64 / sample_rate).sin())
            .collect()
    }

    fn rms(x: &[f64]) -> f64 {
        (x.iter().map(|v| v * v).sum::<f64>() / x.len() as f64).sqrt()
    }

    #[test]
    fn default_levels_map_to_tuned_cutoffs() {
        let range = FrequencyBand::new(2.0, 20.0);
        let c = filter_cutoff(&[0.90309, 2.30103, 0.75], range).unwrap();
        assert!((c[0] - 2.5).abs() < 1e-4, "envelope {}", c[0]);
        assert!((c[1] - 0.1).abs() < 1e-5, "band low {}", c[1]);
        assert!((c[2] - 3.5566).abs() < 1e-3, "band high {}", c[2]);
    }

    #[test]
    fn cutoff_level_inverts_filter_cutoff() {
        let range = FrequencyBand::new(2.0, 20.0);
        for level in [-0.5, 0.0, 0.25, 0.90309, 1.0, 2.30103] {
            let hz = filter_cutoff(&[level], range).unwrap()[0];
            assert!((cutoff_level(range, hz).unwrap() - level).abs() < 1e-12);
        }
    }

    #[test]
    fn filter_cutoff_rejects_bad_range() {
        assert!(filter_cutoff(&[0.5], FrequencyBand::new(0.0, 20.0)).is_err());
        assert!(filter_cutoff(&[0.5], FrequencyBand::new(20.0, 2.0)).is_err());
        assert!(filter_cutoff(&[0.5], FrequencyBand::new(2.0, f64::NAN)).is_err());
    }

    #[test]
    fn band_helpers() {
        let band = FrequencyBand::new(2.0, 8.0);
        assert!((band.center_hz() - 4.0).abs() < 1e-12);
        assert_eq!(band.bandwidth(), 6.0);
    }

    #[test]
    fn pipeline_validation() {
        assert!(FilterPipeline::new(0.0, 1).is_err());
        assert!(FilterPipeline::new(-2000.0, 1).is_err());
        assert!(FilterPipeline::new(2000.0, 0).is_err());
        assert!(FilterPipeline::new(2000.0, MAX_ORDER + 1).is_err());
        assert!(FilterPipeline::new(2000.0, MAX_ORDER).is_ok());
    }

    #[test]
    fn cutoff_at_or_above_nyquist_is_invalid() {
        let pipeline = FilterPipeline::new(2000.0, 1).unwrap();
        let x = sine(5.0, 2000.0, 200);
        for hz in [1000.0, 1500.0, 0.0, -1.0, f64::INFINITY] {
            let err = pipeline.lowpass(&x, hz).unwrap_err();
            assert!(matches!(err, AnalysisError::InvalidParameter { name: "cutoff", .. }));
        }
        assert!(pipeline.lowpass(&x, 999.0).is_ok());
    }

    #[test]
    fn short_signal_is_insufficient_data() {
        let pipeline = FilterPipeline::new(2000.0, 1).unwrap();
        let err = pipeline.lowpass(&[0.0; 6], 10.0).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientData { needed: 6, got: 6 });
    }

    #[test]
    fn output_length_matches_input() {
        let pipeline = FilterPipeline::new(2000.0, 2).unwrap();
        let x = sine(5.0, 2000.0, 3001);
        assert_eq!(pipeline.bandpass(&x, FrequencyBand::new(2.0, 20.0)).unwrap().len(), 3001);
        assert_eq!(pipeline.energy(&x, FrequencyBand::new(0.1, 3.5)).unwrap().len(), 3001);
    }

    #[test]
    fn corner_sits_at_half_nominal_cutoff() {
        // Nominal 200 Hz low-pass at 2000 Hz has its -3 dB point near 100 Hz;
        // the forward-backward pass makes that -6 dB.
        let pipeline = FilterPipeline::new(2000.0, 1).unwrap();
        let x = sine(100.0, 2000.0, 8000);
        let y = pipeline.lowpass(&x, 200.0).unwrap();
        let gain = rms(&y[2000..6000]) / rms(&x[2000..6000]);
        assert!((gain - 0.5).abs() < 0.02, "gain {gain}");
    }

    #[test]
    fn energy_is_nonnegative_and_tracks_amplitude() {
        let pipeline = FilterPipeline::new(2000.0, 1).unwrap();
        let quiet: Vec<f64> = sine(8.0, 2000.0, 8000).iter().map(|v| 0.1 * v).collect();
        let loud = sine(8.0, 2000.0, 8000);
        let band = FrequencyBand::new(0.1, 3.5566);
        let eq = pipeline.energy(&quiet, band).unwrap();
        let el = pipeline.energy(&loud, band).unwrap();
        assert!(eq.iter().chain(el.iter()).all(|&e| e >= 0.0));
        let ratio = el[4000] / eq[4000];
        assert!((ratio - 100.0).abs() < 1.0, "ratio {ratio}");
    }
}
