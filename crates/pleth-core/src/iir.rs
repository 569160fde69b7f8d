//! Direct Form II transposed IIR filter.
//!
//! Runs a transfer function of arbitrary order over a sample stream:
//!
//! ```text
//! y[n] = b0*x[n] + s0
//! s_i  = b_{i+1}*x[n] - a_{i+1}*y[n] + s_{i+1}
//! ```
//!
//! The transposed form keeps one state variable per order and is the layout
//! [`filtfilt`](crate::filtfilt) expects for its steady-state initialization.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::butterworth::Coefficients;

/// IIR filter coefficients and state.
#[derive(Debug, Clone)]
pub struct IirFilter {
    /// Feedforward coefficients, normalized by a0
    b: Vec<f64>,
    /// Feedback coefficients, normalized by a0
    a: Vec<f64>,
    /// Transposed delay line, one slot per order
    state: Vec<f64>,
}

impl IirFilter {
    /// Creates a filter from transfer-function coefficients.
    ///
    /// Both polynomials are zero-padded to a common length and normalized by `a[0]`.
    pub fn new(coefficients: &Coefficients) -> Self {
        let len = coefficients.len().max(1);
        let mut b = coefficients.b.clone();
        let mut a = coefficients.a.clone();
        b.resize(len, 0.0);
        a.resize(len, 0.0);

        let a0 = if a[0] == 0.0 { 1.0 } else { a[0] };
        for c in b.iter_mut().chain(a.iter_mut()) {
            *c /= a0;
        }

        Self {
            b,
            a,
            state: vec![0.0; len - 1],
        }
    }

    /// Filter order (length of the delay line).
    pub fn order(&self) -> usize {
        self.state.len()
    }

    /// Current delay line contents.
    pub fn state(&self) -> &[f64] {
        &self.state
    }

    /// State the filter settles to after a unit step, so that a constant input
    /// passes without a start-up transient.
    ///
    /// With DC gain `g = sum(b) / sum(a)`, slot `i` holds
    /// `sum_{j > i} (b_j - a_j * g)`.
    pub fn step_state(&self) -> Vec<f64> {
        let sum_a: f64 = self.a.iter().sum();
        let gain = if sum_a == 0.0 {
            0.0
        } else {
            self.b.iter().sum::<f64>() / sum_a
        };

        let n = self.order();
        let mut zi = vec![0.0; n];
        let mut acc = 0.0;
        for i in (0..n).rev() {
            acc += self.b[i + 1] - self.a[i + 1] * gain;
            zi[i] = acc;
        }
        zi
    }

    /// Loads `zi * scale` into the delay line.
    pub fn set_state_scaled(&mut self, zi: &[f64], scale: f64) {
        for (slot, &z) in self.state.iter_mut().zip(zi) {
            *slot = z * scale;
        }
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let n = self.state.len();
        if n == 0 {
            return self.b[0] * input;
        }

        let output = self.b[0] * input + self.state[0];
        for i in 0..n - 1 {
            self.state[i] = self.b[i + 1] * input - self.a[i + 1] * output + self.state[i + 1];
        }
        self.state[n - 1] = self.b[n] * input - self.a[n] * output;

        output
    }

    /// Filters a whole slice from the current state.
    pub fn process_slice(&mut self, signal: &[f64]) -> Vec<f64> {
        signal.iter().map(|&x| self.process(x)).collect()
    }

    /// Clears the delay line without touching coefficients.
    pub fn clear(&mut self) {
        self.state.iter_mut().for_each(|s| *s = 0.0);
    }
}
