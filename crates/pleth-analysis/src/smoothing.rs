//! Gaussian smoothing.
//!
//! A window of `w` samples is the full support of the kernel: `2 * (w / 2) + 1`
//! taps with `sigma = w / 6`, so the window spans ±3 sigma. The kernel sums to
//! one. Edges are handled by half-sample symmetric reflection
//! (`d c b a | a b c d | d c b a`), which keeps the output length equal to the
//! input length.
//!
//! Short kernels are applied directly. Kernels longer than
//! [`DIRECT_MAX_TAPS`] go through FFT overlap-add convolution.

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Longest kernel applied by direct convolution.
pub const DIRECT_MAX_TAPS: usize = 129;

/// Unit-sum Gaussian kernel for a window of `window` samples.
///
/// Windows of 0 or 1 sample yield the identity kernel `[1.0]`.
pub fn gaussian_kernel(window: usize) -> Vec<f64> {
    if window <= 1 {
        return vec![1.0];
    }
    let radius = window / 2;
    let sigma = window as f64 / 6.0;
    let denom = 2.0 * sigma * sigma;

    let mut kernel: Vec<f64> = (0..=2 * radius)
        .map(|i| {
            let d = i as f64 - radius as f64;
            (-d * d / denom).exp()
        })
        .collect();
    let sum: f64 = kernel.iter().sum();
    kernel.iter_mut().for_each(|k| *k /= sum);
    kernel
}

/// Smooths `signal` with a Gaussian of `window` samples.
///
/// ```rust
/// use pleth_analysis::smoothing::gaussian_smooth;
///
/// let flat = gaussian_smooth(&[2.0; 50], 20);
/// assert!(flat.iter().all(|&y| (y - 2.0).abs() < 1e-12));
/// ```
pub fn gaussian_smooth(signal: &[f64], window: usize) -> Vec<f64> {
    if signal.is_empty() || window <= 1 {
        return signal.to_vec();
    }
    let kernel = gaussian_kernel(window);
    let radius = kernel.len() / 2;
    let extended = reflect_extend(signal, radius);

    if kernel.len() <= DIRECT_MAX_TAPS {
        (0..signal.len())
            .map(|i| {
                kernel
                    .iter()
                    .zip(&extended[i..i + kernel.len()])
                    .map(|(k, x)| k * x)
                    .sum()
            })
            .collect()
    } else {
        // Symmetric kernel: the full linear convolution lines up with the
        // input after skipping 2 * radius leading samples.
        let full = Convolver::new(&kernel).convolve(&extended);
        full[2 * radius..2 * radius + signal.len()].to_vec()
    }
}

/// Index into a signal of `len` samples under half-sample symmetric reflection.
fn reflect_index(i: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let m = i.rem_euclid(period) as usize;
    if m < len { m } else { 2 * len - 1 - m }
}

fn reflect_extend(signal: &[f64], radius: usize) -> Vec<f64> {
    let len = signal.len();
    let r = radius as isize;
    (-r..len as isize + r)
        .map(|i| signal[reflect_index(i, len)])
        .collect()
}

/// Overlap-add FFT convolution against a fixed kernel.
struct Convolver {
    fft_size: usize,
    block: usize,
    taps: usize,
    spectrum: Vec<Complex<f64>>,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl Convolver {
    fn new(kernel: &[f64]) -> Self {
        let taps = kernel.len();
        let fft_size = (2 * taps).next_power_of_two();
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(fft_size);
        let inverse = planner.plan_fft_inverse(fft_size);

        let mut spectrum: Vec<Complex<f64>> = kernel
            .iter()
            .map(|&k| Complex::new(k, 0.0))
            .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
            .take(fft_size)
            .collect();
        forward.process(&mut spectrum);

        Self {
            fft_size,
            block: fft_size - taps + 1,
            taps,
            spectrum,
            forward,
            inverse,
        }
    }

    /// Full linear convolution, `signal.len() + taps - 1` samples.
    fn convolve(&self, signal: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; signal.len() + self.taps - 1];
        let scale = 1.0 / self.fft_size as f64;
        let mut buffer = vec![Complex::new(0.0, 0.0); self.fft_size];

        for (n, chunk) in signal.chunks(self.block).enumerate() {
            let offset = n * self.block;
            buffer.iter_mut().for_each(|c| *c = Complex::new(0.0, 0.0));
            for (c, &x) in buffer.iter_mut().zip(chunk) {
                c.re = x;
            }

            self.forward.process(&mut buffer);
            for (c, k) in buffer.iter_mut().zip(&self.spectrum) {
                *c *= *k;
            }
            self.inverse.process(&mut buffer);

            let valid = (chunk.len() + self.taps - 1).min(out.len() - offset);
            for (o, c) in out[offset..offset + valid].iter_mut().zip(&buffer) {
                *o += c.re * scale;
            }
        }
        out
    }
}
