//! Integration tests for pleth-analysis.
//!
//! Tests drive the public API with synthetic respiration traces whose pauses,
//! cycles and phase durations are known in advance.

use std::f64::consts::PI;

use pleth_analysis::{
    AnalysisError, AnalysisParams, CycleParams, EamiParams, PauseParams, TimingParams,
    boolean_runs, detect_pauses, eami, pause_count, phase_durations, refine_peaks,
    segment_cycles, summarize,
};

const SAMPLE_RATE: f64 = 2000.0;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sine at `freq_hz` sampled at [`SAMPLE_RATE`].
fn sine(freq_hz: f64, num_samples: usize) -> Vec<f64> {
    (0..num_samples)
        .map(|i| (2.0 * PI * freq_hz * i as f64 / SAMPLE_RATE).sin())
        .collect()
}

/// Breathing at 5 Hz with the samples in `pause` held at zero.
fn breathing_with_pause(num_samples: usize, pause: std::ops::Range<usize>) -> Vec<f64> {
    let mut trace = sine(5.0, num_samples);
    trace[pause].iter_mut().for_each(|x| *x = 0.0);
    trace
}

/// Square wave alternating every `half_period` samples.
fn square(half_period: usize, num_samples: usize) -> Vec<f64> {
    (0..num_samples)
        .map(|i| if (i / half_period) % 2 == 0 { 1.0 } else { -1.0 })
        .collect()
}

// ===========================================================================
// 1. eAMI and pauses
// ===========================================================================

#[test]
fn injected_pause_raises_score() {
    let trace = breathing_with_pause(10000, 4000..5000);
    let score = eami(&trace, SAMPLE_RATE, &EamiParams::default()).unwrap();

    assert_eq!(score.len(), trace.len());
    assert!(
        score[4200..4800].iter().all(|&s| s > 0.5),
        "score inside pause should exceed the threshold"
    );
    assert!(score[..3500].iter().all(|&s| s < 0.5));
    assert!(score[5500..].iter().all(|&s| s < 0.5));
}

#[test]
fn injected_pause_is_counted_once() {
    let trace = breathing_with_pause(10000, 4000..5000);
    let n = pause_count(&trace, SAMPLE_RATE, &EamiParams::default(), &PauseParams::default()).unwrap();
    assert_eq!(n, 1);
}

#[test]
fn pause_interval_lies_inside_the_gap() {
    let trace = breathing_with_pause(10000, 4000..5000);
    let score = eami(&trace, SAMPLE_RATE, &EamiParams::default()).unwrap();
    let pauses = detect_pauses(&score, &PauseParams::default());

    assert_eq!(pauses.len(), 1);
    let (start, duration) = pauses.iter().next().unwrap();
    assert!((4000..4300).contains(&start), "start {start}");
    assert!(start + duration <= 5000, "end {}", start + duration);
    assert!(duration > 600);
}

#[test]
fn longer_minimum_duration_drops_the_pause() {
    let trace = breathing_with_pause(10000, 4000..5000);
    let strict = PauseParams {
        min_duration_samples: 1000,
        ..PauseParams::default()
    };
    let n = pause_count(&trace, SAMPLE_RATE, &EamiParams::default(), &strict).unwrap();
    assert_eq!(n, 0);
}

#[test]
fn regular_breathing_has_no_pause() {
    let trace = sine(5.0, 10000);
    let n = pause_count(&trace, SAMPLE_RATE, &EamiParams::default(), &PauseParams::default()).unwrap();
    assert_eq!(n, 0);
}

#[test]
fn run_extraction_reference_case() {
    let (starts, durations) = boolean_runs(&[true, true, false, true, true, true, false]);
    assert_eq!(starts, vec![0, 3]);
    assert_eq!(durations, vec![2, 3]);
}

// ===========================================================================
// 2. Cycle segmentation
// ===========================================================================

#[test]
fn double_peak_collapses_to_highest() {
    let mut trace = vec![0.0; 400];
    trace[150] = 1.0;
    trace[200] = 0.5;
    let peaks = refine_peaks(&trace, &[150, 200], &[100, 300], 0.2);
    assert_eq!(peaks, vec![150]);
}

#[test]
fn sine_gives_one_peak_per_period() {
    let trace = sine(4.0, 2000);
    let cycles = segment_cycles(&trace, &CycleParams::default()).unwrap();

    assert_eq!(cycles.valleys, vec![0, 375, 875, 1375, 1875]);
    // The rising tail at 1999 is a windowed maximum but lies past the last valley
    assert_eq!(cycles.peaks, vec![125, 625, 1125, 1625]);
    assert_eq!(cycles.cycle_count(), 4);
}

#[test]
fn small_ripples_fail_the_height_test() {
    let trace: Vec<f64> = sine(4.0, 2000).iter().map(|x| 0.05 * x).collect();
    let cycles = segment_cycles(&trace, &CycleParams::default()).unwrap();
    assert!(cycles.peaks.is_empty());
    assert_eq!(cycles.valleys.len(), 5);
}

// ===========================================================================
// 3. Phase durations
// ===========================================================================

#[test]
fn square_wave_recovers_half_period() {
    let trace = square(200, 30000);
    let d = phase_durations(&trace, SAMPLE_RATE, &TimingParams::default()).unwrap();

    let half_period = 200.0 / SAMPLE_RATE;
    let tolerance = 1.0 / SAMPLE_RATE;
    assert!((d.median_t_in().unwrap() - half_period).abs() <= tolerance);
    assert!((d.median_t_out().unwrap() - half_period).abs() <= tolerance);
}

#[test]
fn durations_are_sorted_and_trimmed() {
    // Alternating half-periods of 150 and 250 samples in the high phase
    let mut trace = Vec::with_capacity(40000);
    let mut high = true;
    let mut cycle = 0;
    while trace.len() < 40000 {
        let len = if high {
            if cycle % 2 == 0 { 150 } else { 250 }
        } else {
            300
        };
        trace.extend(std::iter::repeat_n(if high { 1.0 } else { -1.0 }, len));
        if !high {
            cycle += 1;
        }
        high = !high;
    }
    trace.truncate(40000);

    let d = phase_durations(&trace, SAMPLE_RATE, &TimingParams::default()).unwrap();
    assert!(d.t_out.windows(2).all(|w| w[0] <= w[1]));
    assert!(d.t_in.windows(2).all(|w| w[0] <= w[1]));
    let first = d.t_out[0];
    let last = d.t_out[d.t_out.len() - 1];
    assert!((first - 0.075).abs() < 0.005, "shortest t_out {first}");
    assert!((last - 0.125).abs() < 0.005, "longest t_out {last}");
}

#[test]
fn padding_longer_than_trace_is_rejected() {
    let err = phase_durations(&sine(5.0, 15000), SAMPLE_RATE, &TimingParams::default()).unwrap_err();
    assert!(matches!(err, AnalysisError::InsufficientData { needed: 20000, got: 15000 }));
}

// ===========================================================================
// 4. Summary
// ===========================================================================

#[test]
fn summary_reports_every_metric() {
    let mut trace: Vec<f64> = sine(4.0, 60000);
    trace[30000..32000].iter_mut().for_each(|x| *x = 0.0);

    let summary = summarize(&trace, SAMPLE_RATE, &AnalysisParams::default()).unwrap();
    assert_eq!(summary.samples, 60000);
    assert_eq!(summary.pause_count, 1);
    assert!(summary.pause_secs > 0.3);
    assert!(summary.cycle_count > 100);
    let expected_rate = summary.cycle_count as f64 * 60.0 / summary.duration_secs;
    assert!((summary.breath_rate - expected_rate).abs() < 1e-9);
    assert!(summary.median_t_in.is_some());
    assert!(summary.median_t_out.is_some());
}
