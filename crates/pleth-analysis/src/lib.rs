//! Pleth Analysis - respiratory event detection for plethysmograph traces
//!
//! This crate turns a raw respiration trace into structured results:
//!
//! - [`pipeline`] - Zero-phase Butterworth filters in Hz and the energy transform
//! - [`eami`] - Per-sample abnormal-breathing score
//! - [`pause`] - Pause intervals and counts from the thresholded score
//! - [`cycles`] - Peak/valley breath-cycle segmentation
//! - [`timing`] - Inspiration/expiration durations from zero crossings
//! - [`smoothing`] - Gaussian smoothing primitive
//! - [`report`] - Combined per-trace summary
//!
//! Every analysis is a pure function of the trace, the sample rate and an
//! explicit parameter struct whose `Default` carries the tuned constants.
//!
//! ## Example
//!
//! ```rust
//! use pleth_analysis::{eami, detect_pauses, EamiParams, PauseParams};
//!
//! let sample_rate = 2000.0;
//! let mut trace: Vec<f64> = (0..10000)
//!     .map(|i| (2.0 * std::f64::consts::PI * 5.0 * i as f64 / sample_rate).sin())
//!     .collect();
//! trace[4000..5000].iter_mut().for_each(|x| *x = 0.0);
//!
//! let score = eami(&trace, sample_rate, &EamiParams::default()).unwrap();
//! let pauses = detect_pauses(&score, &PauseParams::default());
//! assert_eq!(pauses.len(), 1);
//! ```

pub mod cycles;
pub mod eami;
pub mod error;
pub mod pause;
pub mod pipeline;
pub mod report;
pub mod smoothing;
pub mod timing;

pub use cycles::{BreathCycles, CycleParams, refine_peaks, segment_cycles};
pub use eami::{EamiParams, eami};
pub use error::{AnalysisError, Result};
pub use pause::{PauseParams, clipped_score, detect_pauses, pause_count, samples_from_secs};
pub use pipeline::{
    DEFAULT_SAMPLE_RATE, FilterPipeline, FrequencyBand, cutoff_level, filter_cutoff,
};
pub use pleth_core::{Intervals, boolean_runs};
pub use report::{AnalysisParams, TraceSummary, summarize};
pub use smoothing::{gaussian_kernel, gaussian_smooth};
pub use timing::{PhaseDurations, TimingParams, phase_durations, zero_crossings};
