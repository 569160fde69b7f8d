//! Property-based tests for pleth-core primitives.
//!
//! Tests run extraction invariants, extrema against a brute-force scan, and
//! filter stability using proptest for randomized input generation.

use proptest::prelude::*;
use pleth_core::{
    Cutoff, Extremum, FilterKind, Intervals, boolean_runs, butterworth, filtfilt, local_extrema,
};

fn brute_force_extrema(signal: &[f64], radius: usize, kind: Extremum) -> Vec<usize> {
    (0..signal.len())
        .filter(|&i| {
            let lo = i.saturating_sub(radius);
            let hi = (i + radius).min(signal.len() - 1);
            (lo..=hi).all(|j| match kind {
                Extremum::Maximum => signal[i] >= signal[j],
                Extremum::Minimum => signal[i] <= signal[j],
            })
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Runs are strictly ascending, separated by at least one false, and
    /// their durations add up to the number of true samples.
    #[test]
    fn runs_are_disjoint_and_cover_trues(mask in prop::collection::vec(any::<bool>(), 0..200)) {
        let (starts, durations) = boolean_runs(&mask);
        prop_assert_eq!(starts.len(), durations.len());

        for w in starts.windows(2).zip(durations.iter()) {
            let (pair, &duration) = w;
            prop_assert!(pair[0] + duration < pair[1], "runs overlap or touch: {:?}", pair);
        }

        let trues = mask.iter().filter(|&&b| b).count();
        prop_assert_eq!(durations.iter().sum::<usize>(), trues);
        prop_assert!(durations.iter().all(|&d| d > 0));
    }

    /// Rebuilding the mask from its runs is the identity.
    #[test]
    fn runs_round_trip(mask in prop::collection::vec(any::<bool>(), 0..200)) {
        let runs = Intervals::from_mask(&mask);
        prop_assert_eq!(runs.to_mask(mask.len()), mask);
    }

    /// Every interval start is a true sample preceded by false (or the start).
    #[test]
    fn run_starts_are_rising_edges(mask in prop::collection::vec(any::<bool>(), 1..200)) {
        let runs = Intervals::from_mask(&mask);
        for (start, duration) in runs.iter() {
            prop_assert!(mask[start]);
            prop_assert!(start == 0 || !mask[start - 1]);
            let end = start + duration;
            prop_assert!(end == mask.len() || !mask[end]);
        }
    }

    /// The deque scan agrees with a brute-force window comparison.
    #[test]
    fn extrema_match_brute_force(
        signal in prop::collection::vec(-10i32..10, 1..300),
        radius in 0usize..40,
        minimum in any::<bool>(),
    ) {
        // Small integer alphabet makes plateaus and ties common
        let signal: Vec<f64> = signal.into_iter().map(f64::from).collect();
        let kind = if minimum { Extremum::Minimum } else { Extremum::Maximum };
        prop_assert_eq!(
            local_extrema(&signal, radius, kind),
            brute_force_extrema(&signal, radius, kind)
        );
    }

    /// Zero-phase filtering keeps length and stays finite for any valid design.
    #[test]
    fn filtfilt_stability(
        wn in 0.01f64..0.9,
        order in 1usize..5,
        variant in 0usize..2,
        input in prop::collection::vec(-1.0f64..=1.0, 64..256),
    ) {
        let kind = if variant == 0 { FilterKind::Lowpass } else { FilterKind::Highpass };
        let c = butterworth(order, Cutoff::Single(wn), kind).unwrap();
        let out = filtfilt(&c, &input).unwrap();
        prop_assert_eq!(out.len(), input.len());
        prop_assert!(out.iter().all(|y| y.is_finite()));
    }
}
