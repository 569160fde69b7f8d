//! Digital Butterworth filter design.
//!
//! Filters are designed the classic way:
//!
//! 1. Analog low-pass prototype with `order` poles evenly spaced on the left
//!    half of the unit circle
//! 2. Frequency transform to the requested kind (low-pass, high-pass, band-pass)
//!    at pre-warped corner frequencies
//! 3. Bilinear transform back to the z-plane
//! 4. Expansion of zeros and poles into transfer-function form `(b, a)`
//!
//! Cutoffs are normalized to the Nyquist frequency, so `0 < wn < 1`. A
//! band-pass filter of order `n` has `2n` poles.
//!
//! # Example
//!
//! ```rust
//! use pleth_core::{butterworth, Cutoff, FilterKind};
//!
//! let lp = butterworth(1, Cutoff::Single(0.5), FilterKind::Lowpass).unwrap();
//! assert_eq!(lp.b.len(), 2);
//! assert!((lp.a[0] - 1.0).abs() < 1e-12);
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::f64::consts::PI;
use libm::{cos, sin, tan};
use num_complex::Complex;

use crate::error::FilterError;

/// Largest order [`butterworth`] will design.
///
/// Transfer-function form loses precision quickly above this for the very low
/// normalized cutoffs respiration traces need.
pub const MAX_ORDER: usize = 8;

/// Bilinear transform constant `2 * fs` for a Nyquist-normalized design (fs = 2).
const BILINEAR_K: f64 = 4.0;

/// Band shape of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Passes frequencies below the cutoff.
    Lowpass,
    /// Passes frequencies above the cutoff.
    Highpass,
    /// Passes frequencies between two cutoffs.
    Bandpass,
}

/// Normalized cutoff frequencies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cutoff {
    /// A single corner, for low-pass and high-pass filters.
    Single(f64),
    /// Lower and upper band edges, for band-pass filters.
    Band(f64, f64),
}

/// Transfer-function coefficients, normalized so that `a[0] == 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficients {
    /// Numerator (feedforward) coefficients.
    pub b: Vec<f64>,
    /// Denominator (feedback) coefficients.
    pub a: Vec<f64>,
}

impl Coefficients {
    /// Number of taps in the longer of the two polynomials.
    pub fn len(&self) -> usize {
        self.a.len().max(self.b.len())
    }

    /// Returns true if both polynomials are empty.
    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.b.is_empty()
    }

    /// Filter order (number of state variables).
    pub fn order(&self) -> usize {
        self.len().saturating_sub(1)
    }

    /// Gain of the filter at DC, `sum(b) / sum(a)`.
    pub fn dc_gain(&self) -> f64 {
        self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>()
    }
}

/// Zeros, poles and gain of a filter.
struct Zpk {
    zeros: Vec<Complex<f64>>,
    poles: Vec<Complex<f64>>,
    gain: f64,
}

/// Designs a digital Butterworth filter.
///
/// # Arguments
///
/// * `order` - Prototype order, `1..=MAX_ORDER`
/// * `cutoff` - Corner(s) as a fraction of the Nyquist frequency
/// * `kind` - Band shape; band-pass needs [`Cutoff::Band`], the others [`Cutoff::Single`]
pub fn butterworth(order: usize, cutoff: Cutoff, kind: FilterKind) -> Result<Coefficients, FilterError> {
    if order == 0 || order > MAX_ORDER {
        return Err(FilterError::InvalidOrder {
            order,
            max: MAX_ORDER,
        });
    }

    let prototype = prototype_poles(order);
    let analog = match (kind, cutoff) {
        (FilterKind::Lowpass, Cutoff::Single(wn)) => lp_to_lp(prototype, warp(checked(wn)?)),
        (FilterKind::Highpass, Cutoff::Single(wn)) => lp_to_hp(prototype, warp(checked(wn)?)),
        (FilterKind::Bandpass, Cutoff::Band(low, high)) => {
            let (low, high) = (checked(low)?, checked(high)?);
            if low >= high {
                return Err(FilterError::InvalidBand { low, high });
            }
            lp_to_bp(prototype, warp(low), warp(high))
        }
        (FilterKind::Bandpass, Cutoff::Single(_)) => {
            return Err(FilterError::CutoffMismatch {
                kind,
                expected: "band",
            });
        }
        (_, Cutoff::Band(..)) => {
            return Err(FilterError::CutoffMismatch {
                kind,
                expected: "single",
            });
        }
    };

    let digital = bilinear(analog);
    let b = poly(&digital.zeros)
        .into_iter()
        .map(|c| c * digital.gain)
        .collect();
    let a = poly(&digital.poles);

    Ok(Coefficients { b, a })
}

fn checked(wn: f64) -> Result<f64, FilterError> {
    if wn.is_finite() && wn > 0.0 && wn < 1.0 {
        Ok(wn)
    } else {
        Err(FilterError::CutoffOutOfRange { wn })
    }
}

/// Pre-warps a normalized corner so the bilinear transform maps it exactly.
fn warp(wn: f64) -> f64 {
    BILINEAR_K * tan(PI * wn / 2.0)
}

/// Analog Butterworth prototype poles, `-exp(i*pi*m / 2n)` for `m = -n+1, -n+3, .., n-1`.
fn prototype_poles(order: usize) -> Vec<Complex<f64>> {
    let n = order as f64;
    (0..order)
        .map(|k| {
            let m = 2.0 * k as f64 - (n - 1.0);
            let theta = PI * m / (2.0 * n);
            Complex::new(-cos(theta), -sin(theta))
        })
        .collect()
}

fn lp_to_lp(poles: Vec<Complex<f64>>, wo: f64) -> Zpk {
    let gain = libm::pow(wo, poles.len() as f64);
    Zpk {
        zeros: Vec::new(),
        poles: poles.into_iter().map(|p| p * wo).collect(),
        gain,
    }
}

fn lp_to_hp(poles: Vec<Complex<f64>>, wo: f64) -> Zpk {
    let denom = poles
        .iter()
        .fold(Complex::new(1.0, 0.0), |acc, &p| acc * -p);
    Zpk {
        zeros: vec_of(Complex::new(0.0, 0.0), poles.len()),
        gain: (Complex::new(1.0, 0.0) / denom).re,
        poles: poles.into_iter().map(|p| Complex::new(wo, 0.0) / p).collect(),
    }
}

fn lp_to_bp(poles: Vec<Complex<f64>>, w_low: f64, w_high: f64) -> Zpk {
    let bw = w_high - w_low;
    let wo_sq = Complex::new(w_low * w_high, 0.0);
    let scaled: Vec<Complex<f64>> = poles.iter().map(|&p| p * (bw / 2.0)).collect();

    let mut bp_poles = Vec::with_capacity(2 * scaled.len());
    for &p in &scaled {
        bp_poles.push(p + (p * p - wo_sq).sqrt());
    }
    for &p in &scaled {
        bp_poles.push(p - (p * p - wo_sq).sqrt());
    }

    Zpk {
        zeros: vec_of(Complex::new(0.0, 0.0), poles.len()),
        poles: bp_poles,
        gain: libm::pow(bw, poles.len() as f64),
    }
}

/// Bilinear transform `s = 2 fs (z - 1) / (z + 1)`; spare poles get zeros at Nyquist.
fn bilinear(analog: Zpk) -> Zpk {
    let k = Complex::new(BILINEAR_K, 0.0);
    let degree = analog.poles.len() - analog.zeros.len();

    let num = analog
        .zeros
        .iter()
        .fold(Complex::new(1.0, 0.0), |acc, &z| acc * (k - z));
    let den = analog
        .poles
        .iter()
        .fold(Complex::new(1.0, 0.0), |acc, &p| acc * (k - p));

    let mut zeros: Vec<Complex<f64>> = analog.zeros.iter().map(|&z| (k + z) / (k - z)).collect();
    zeros.extend(vec_of(Complex::new(-1.0, 0.0), degree));

    Zpk {
        zeros,
        poles: analog.poles.iter().map(|&p| (k + p) / (k - p)).collect(),
        gain: analog.gain * (num / den).re,
    }
}

/// Expands roots into monic polynomial coefficients, highest power first.
fn poly(roots: &[Complex<f64>]) -> Vec<f64> {
    let mut coeffs = Vec::with_capacity(roots.len() + 1);
    coeffs.push(Complex::new(1.0, 0.0));
    for &root in roots {
        coeffs.push(Complex::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            let prev = coeffs[i - 1];
            coeffs[i] -= root * prev;
        }
    }
    coeffs.into_iter().map(|c| c.re).collect()
}

fn vec_of(value: Complex<f64>, len: usize) -> Vec<Complex<f64>> {
    (0..len).map(|_| value).collect()
}

/// Magnitude response of `coefficients` at normalized frequency `wn` (1 = Nyquist).
#[cfg(test)]
pub(crate) fn magnitude_response(coefficients: &Coefficients, wn: f64) -> f64 {
    let omega = PI * wn;
    let eval = |taps: &[f64]| {
        let (mut re, mut im) = (0.0, 0.0);
        for (k, &c) in taps.iter().enumerate() {
            re += c * cos(omega * k as f64);
            im -= c * sin(omega * k as f64);
        }
        libm::sqrt(re * re + im * im)
    };
    eval(&coefficients.b) / eval(&coefficients.a)
}
