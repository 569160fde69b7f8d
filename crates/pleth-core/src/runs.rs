//! Boolean runs as intervals.
//!
//! A run is a maximal span of consecutive `true` values. Runs are stored as
//! two parallel sequences, start index and duration in samples, sorted by
//! start. Runs never overlap and never touch: two runs are always separated by
//! at least one `false`.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Non-overlapping `(start, duration)` intervals in ascending start order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Intervals {
    starts: Vec<usize>,
    durations: Vec<usize>,
}

impl Intervals {
    /// Creates an empty interval set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts the runs of `true` in `mask`.
    pub fn from_mask(mask: &[bool]) -> Self {
        Self::from_predicate(mask, |&x| x)
    }

    /// Extracts the runs where `predicate` holds over `values`.
    ///
    /// ```rust
    /// use pleth_core::Intervals;
    ///
    /// let score = [0.1, 0.9, 0.8, 0.2, 0.7];
    /// let runs = Intervals::from_predicate(&score, |&s| s > 0.5);
    /// assert_eq!(runs.starts(), &[1, 4]);
    /// assert_eq!(runs.durations(), &[2, 1]);
    /// ```
    pub fn from_predicate<T>(values: &[T], mut predicate: impl FnMut(&T) -> bool) -> Self {
        let mut runs = Self::new();
        let mut open: Option<usize> = None;

        for (i, value) in values.iter().enumerate() {
            match (predicate(value), open) {
                (true, None) => open = Some(i),
                (false, Some(start)) => {
                    runs.push(start, i - start);
                    open = None;
                }
                _ => {}
            }
        }
        if let Some(start) = open {
            runs.push(start, values.len() - start);
        }

        runs
    }

    fn push(&mut self, start: usize, duration: usize) {
        self.starts.push(start);
        self.durations.push(duration);
    }

    /// Start index of each run.
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// Length of each run in samples.
    pub fn durations(&self) -> &[usize] {
        &self.durations
    }

    /// Number of runs.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// Returns true if there are no runs.
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Iterates `(start, duration)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.starts.iter().copied().zip(self.durations.iter().copied())
    }

    /// Sum of all durations, i.e. the number of `true` samples.
    pub fn total_duration(&self) -> usize {
        self.durations.iter().sum()
    }

    /// Keeps only runs strictly longer than `min_duration` samples.
    pub fn longer_than(&self, min_duration: usize) -> Self {
        let mut kept = Self::new();
        for (start, duration) in self.iter() {
            if duration > min_duration {
                kept.push(start, duration);
            }
        }
        kept
    }

    /// Rebuilds a boolean mask of length `len` that is `true` inside the runs.
    ///
    /// Runs reaching past `len` are clipped.
    pub fn to_mask(&self, len: usize) -> Vec<bool> {
        let mut mask = vec![false; len];
        for (start, duration) in self.iter() {
            let end = (start + duration).min(len);
            if start < end {
                mask[start..end].iter_mut().for_each(|m| *m = true);
            }
        }
        mask
    }

    /// Splits into the `(starts, durations)` sequences.
    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>) {
        (self.starts, self.durations)
    }
}

/// Returns `(starts, durations)` of the runs of `true` in `mask`.
///
/// ```rust
/// use pleth_core::boolean_runs;
///
/// let (starts, durations) = boolean_runs(&[true, true, false, true, true, true, false]);
/// assert_eq!(starts, vec![0, 3]);
/// assert_eq!(durations, vec![2, 3]);
/// ```
pub fn boolean_runs(mask: &[bool]) -> (Vec<usize>, Vec<usize>) {
    Intervals::from_mask(mask).into_parts()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mask_gives_no_runs() {
        let (starts, durations) = boolean_runs(&[]);
        assert!(starts.is_empty());
        assert!(durations.is_empty());
    }

    #[test]
    fn all_true_is_one_run() {
        let runs = Intervals::from_mask(&[true; 5]);
        assert_eq!(runs.iter().collect::<Vec<_>>(), vec![(0, 5)]);
    }

    #[test]
    fn all_false_is_empty() {
        assert!(Intervals::from_mask(&[false; 5]).is_empty());
    }

    #[test]
    fn run_at_start_and_end() {
        let runs = Intervals::from_mask(&[true, false, false, true, true]);
        assert_eq!(runs.starts(), &[0, 3]);
        assert_eq!(runs.durations(), &[1, 2]);
    }

    #[test]
    fn longer_than_is_strict() {
        let runs = Intervals::from_mask(&[true, true, false, true, true, true, false]);
        assert_eq!(runs.longer_than(2).iter().collect::<Vec<_>>(), vec![(3, 3)]);
        assert_eq!(runs.longer_than(1).len(), 2);
        assert!(runs.longer_than(3).is_empty());
    }

    #[test]
    fn mask_round_trip() {
        let mask = [false, true, true, false, true, false, false, true];
        let runs = Intervals::from_mask(&mask);
        assert_eq!(runs.to_mask(mask.len()), mask.to_vec());
        assert_eq!(runs.total_duration(), 4);
    }

    #[test]
    fn to_mask_clips_to_length() {
        let runs = Intervals::from_mask(&[false, true, true, true]);
        assert_eq!(runs.to_mask(3), vec![false, true, true]);
    }
}
