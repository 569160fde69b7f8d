//! Error types for filter design and application.

use crate::butterworth::FilterKind;
use thiserror::Error;

/// Errors raised while designing or applying a digital filter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// Requested order is outside the supported range.
    #[error("filter order {order} outside supported range 1..={max}")]
    InvalidOrder {
        /// The order that was requested.
        order: usize,
        /// Largest supported order.
        max: usize,
    },

    /// Normalized cutoff is not strictly inside (0, 1).
    #[error("normalized cutoff {wn} must lie strictly between 0 and 1")]
    CutoffOutOfRange {
        /// Cutoff as a fraction of the Nyquist frequency.
        wn: f64,
    },

    /// Band edges are not ordered.
    #[error("band edges must satisfy low < high, got ({low}, {high})")]
    InvalidBand {
        /// Lower band edge (normalized).
        low: f64,
        /// Upper band edge (normalized).
        high: f64,
    },

    /// A single cutoff was given for a band filter, or vice versa.
    #[error("{kind:?} filter needs a {expected} cutoff")]
    CutoffMismatch {
        /// Filter kind being designed.
        kind: FilterKind,
        /// Description of the cutoff shape the kind expects.
        expected: &'static str,
    },

    /// Signal is not longer than the edge extension of a zero-phase pass.
    #[error("signal of {len} samples is too short for zero-phase filtering (needs more than {padlen})")]
    SignalTooShort {
        /// Length of the offending signal.
        len: usize,
        /// Edge extension length on each side.
        padlen: usize,
    },
}
