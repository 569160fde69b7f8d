//! Zero-phase forward-backward filtering.
//!
//! The signal is extended at both ends by an odd (point-symmetric) reflection
//! of `padlen` samples, filtered forward, then filtered again in reverse. Each
//! pass starts from the filter's step state scaled by the first sample it sees,
//! which suppresses the start-up transient. The result has zero phase shift and
//! the squared magnitude response of the underlying filter.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::butterworth::Coefficients;
use crate::error::FilterError;
use crate::iir::IirFilter;

/// Edge extension length used by [`filtfilt`]: three times the tap count.
pub fn padlen(coefficients: &Coefficients) -> usize {
    3 * coefficients.len()
}

/// Applies `coefficients` forward and backward over `signal`.
///
/// Returns a signal of the same length. Fails with
/// [`FilterError::SignalTooShort`] unless `signal.len() > padlen(coefficients)`.
pub fn filtfilt(coefficients: &Coefficients, signal: &[f64]) -> Result<Vec<f64>, FilterError> {
    let pad = padlen(coefficients);
    if signal.len() <= pad {
        return Err(FilterError::SignalTooShort {
            len: signal.len(),
            padlen: pad,
        });
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(len = signal.len(), padlen = pad, order = coefficients.order(), "filtfilt");

    let mut filter = IirFilter::new(coefficients);
    let zi = filter.step_state();

    let mut buffer = odd_extend(signal, pad);

    filter.set_state_scaled(&zi, buffer[0]);
    for y in &mut buffer {
        *y = filter.process(*y);
    }

    filter.set_state_scaled(&zi, buffer[buffer.len() - 1]);
    for y in buffer.iter_mut().rev() {
        *y = filter.process(*y);
    }

    buffer.truncate(pad + signal.len());
    buffer.drain(..pad);
    Ok(buffer)
}

/// Point-symmetric extension: `2*x[0] - x[n..=1]` before, `2*x[last] - x[last-1..]` after.
fn odd_extend(signal: &[f64], n: usize) -> Vec<f64> {
    let len = signal.len();
    let first = signal[0];
    let last = signal[len - 1];

    let mut ext = Vec::with_capacity(len + 2 * n);
    ext.extend((1..=n).rev().map(|i| 2.0 * first - signal[i]));
    ext.extend_from_slice(signal);
    ext.extend((1..=n).map(|i| 2.0 * last - signal[len - 1 - i]));
    ext
}
