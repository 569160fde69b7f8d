//! Windowed local extrema.
//!
//! Index `i` is a local maximum of radius `W` when `x[i] >= x[j]` for every
//! in-range `j` with `|i - j| <= W` (and a minimum with `<=`). Samples near the
//! ends are compared only against the neighbours that exist, so the first and
//! last samples can qualify. Plateaus report every index on the plateau.
//!
//! The scan keeps a monotonic deque of candidate indices over the sliding
//! window, giving O(N) time regardless of the radius.

#[cfg(not(feature = "std"))]
use alloc::{collections::VecDeque, vec::Vec};
#[cfg(feature = "std")]
use std::collections::VecDeque;

/// Which extremum to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    /// Greater than or equal to every neighbour in the window.
    Maximum,
    /// Less than or equal to every neighbour in the window.
    Minimum,
}

impl Extremum {
    #[inline]
    fn dominates(self, a: f64, b: f64) -> bool {
        match self {
            Extremum::Maximum => a >= b,
            Extremum::Minimum => a <= b,
        }
    }
}

/// Returns the ascending indices of local extrema of `signal`.
///
/// Non-finite samples are not supported; a NaN compares false against
/// everything and suppresses extrema in its neighbourhood.
///
/// # Example
///
/// ```rust
/// use pleth_core::{local_extrema, Extremum};
///
/// let x = [0.0, 2.0, 1.0, 3.0, 0.5, 0.4];
/// assert_eq!(local_extrema(&x, 1, Extremum::Maximum), vec![1, 3]);
/// assert_eq!(local_extrema(&x, 1, Extremum::Minimum), vec![0, 2, 5]);
/// ```
pub fn local_extrema(signal: &[f64], radius: usize, kind: Extremum) -> Vec<usize> {
    let n = signal.len();
    let mut found = Vec::new();
    if n == 0 {
        return found;
    }

    let mut window: VecDeque<usize> = VecDeque::with_capacity(2 * radius.min(n) + 1);
    let mut next = 0;

    for i in 0..n {
        let right = i.saturating_add(radius).min(n - 1);
        while next <= right {
            let v = signal[next];
            while let Some(&back) = window.back() {
                if kind.dominates(v, signal[back]) {
                    window.pop_back();
                } else {
                    break;
                }
            }
            window.push_back(next);
            next += 1;
        }

        let left = i.saturating_sub(radius);
        while let Some(&front) = window.front() {
            if front < left {
                window.pop_front();
            } else {
                break;
            }
        }

        if let Some(&best) = window.front()
            && kind.dominates(signal[i], signal[best])
        {
            found.push(i);
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(signal: &[f64], radius: usize, kind: Extremum) -> Vec<usize> {
        (0..signal.len())
            .filter(|&i| {
                let lo = i.saturating_sub(radius);
                let hi = (i + radius).min(signal.len() - 1);
                (lo..=hi).all(|j| kind.dominates(signal[i], signal[j]))
            })
            .collect()
    }

    #[test]
    fn empty_signal() {
        assert!(local_extrema(&[], 3, Extremum::Maximum).is_empty());
    }

    #[test]
    fn radius_zero_marks_everything() {
        let x = [3.0, 1.0, 2.0];
        assert_eq!(local_extrema(&x, 0, Extremum::Maximum), vec![0, 1, 2]);
        assert_eq!(local_extrema(&x, 0, Extremum::Minimum), vec![0, 1, 2]);
    }

    #[test]
    fn plateau_reports_every_index() {
        let x = [0.0, 1.0, 1.0, 1.0, 0.0];
        assert_eq!(local_extrema(&x, 1, Extremum::Maximum), vec![1, 2, 3]);
    }

    #[test]
    fn radius_suppresses_nearby_smaller_peak() {
        let x = [0.0, 5.0, 0.0, 4.0, 0.0, 0.0, 0.0, 3.0, 0.0];
        assert_eq!(local_extrema(&x, 2, Extremum::Maximum), vec![1, 7]);
    }

    #[test]
    fn matches_naive_scan_on_sine() {
        let x: Vec<f64> = (0..3000)
            .map(|i| libm::sin(i as f64 * 0.013) + 0.3 * libm::sin(i as f64 * 0.071))
            .collect();
        for radius in [1, 10, 100] {
            for kind in [Extremum::Maximum, Extremum::Minimum] {
                assert_eq!(local_extrema(&x, radius, kind), naive(&x, radius, kind));
            }
        }
    }

    #[test]
    fn radius_larger_than_signal() {
        let x = [1.0, 4.0, 2.0];
        assert_eq!(local_extrema(&x, 50, Extremum::Maximum), vec![1]);
        assert_eq!(local_extrema(&x, 50, Extremum::Minimum), vec![0]);
    }
}
