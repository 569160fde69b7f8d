//! Pleth Core - numeric primitives for respiration trace analysis
//!
//! This crate provides the building blocks the detection engine in
//! `pleth-analysis` is assembled from. Everything here is a pure function of
//! its inputs: no shared state, no I/O.
//!
//! # Filters
//!
//! - [`butterworth`] - Digital Butterworth design (low-pass, high-pass, band-pass)
//! - [`IirFilter`] - Direct Form II transposed IIR section with steady-state init
//! - [`filtfilt`] - Zero-phase forward-backward filtering with odd extension
//!
//! # Segmentation
//!
//! - [`local_extrema`] - Windowed local maxima/minima in O(N)
//! - [`Intervals`] - Boolean-run to (start, duration) interval extraction
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build without the standard library.
//! An allocator is still required:
//!
//! ```toml
//! [dependencies]
//! pleth-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use pleth_core::{butterworth, filtfilt, Cutoff, FilterKind};
//!
//! let coefficients = butterworth(1, Cutoff::Single(0.1), FilterKind::Lowpass).unwrap();
//! let signal: Vec<f64> = (0..64).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
//! let smoothed = filtfilt(&coefficients, &signal).unwrap();
//! assert_eq!(smoothed.len(), signal.len());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod butterworth;
pub mod error;
pub mod extrema;
pub mod filtfilt;
pub mod iir;
pub mod runs;

pub use butterworth::{Coefficients, Cutoff, FilterKind, MAX_ORDER, butterworth};
pub use error::FilterError;
pub use extrema::{Extremum, local_extrema};
pub use filtfilt::{filtfilt, padlen};
pub use iir::IirFilter;
pub use runs::{Intervals, boolean_runs};
