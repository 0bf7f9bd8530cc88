//! Equal-width binning of terminal prices for frequency charts.

use crate::error::RiskError;

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 50;

/// Frequency distribution of a terminal price set.
///
/// Bins are equal-width over `[min, max]`; the last bin is closed on the
/// right so the maximum is counted. A set whose values are all equal is
/// placed in a single bin.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TerminalHistogram {
    lower: f64,
    upper: f64,
    counts: Vec<usize>,
}

impl TerminalHistogram {
    /// Bins `values` into `bins` equal-width buckets.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidInput`] if `values` is empty, contains a
    /// non-finite value, or `bins` is zero.
    pub fn new(values: &[f64], bins: usize) -> Result<Self, RiskError> {
        if bins == 0 {
            return Err(RiskError::invalid_input("histogram needs at least one bin"));
        }
        if values.is_empty() {
            return Err(RiskError::invalid_input("terminal price set is empty"));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(RiskError::invalid_input("terminal prices must be finite"));
        }

        let lower = values.iter().copied().fold(f64::INFINITY, f64::min);
        let upper = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let n_bins = if upper > lower { bins } else { 1 };
        let mut histogram = Self {
            lower,
            upper,
            counts: vec![0; n_bins],
        };
        for &value in values {
            let idx = histogram.index_unchecked(value);
            histogram.counts[idx] += 1;
        }
        Ok(histogram)
    }

    /// Number of bins.
    #[inline]
    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    /// Count per bin.
    #[inline]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Total number of binned values.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Width of each bin (zero for a degenerate set).
    #[inline]
    pub fn bin_width(&self) -> f64 {
        (self.upper - self.lower) / self.n_bins() as f64
    }

    /// Lower and upper edge of bin `idx`.
    pub fn bin_edges(&self, idx: usize) -> (f64, f64) {
        let width = self.bin_width();
        let start = self.lower + idx as f64 * width;
        let end = if idx + 1 == self.n_bins() {
            self.upper
        } else {
            start + width
        };
        (start, end)
    }

    /// Bin containing `value`, or `None` if it lies outside `[min, max]`.
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        if value < self.lower || value > self.upper || value.is_nan() {
            return None;
        }
        Some(self.index_unchecked(value))
    }

    fn index_unchecked(&self, value: f64) -> usize {
        let width = self.bin_width();
        if width <= 0.0 {
            return 0;
        }
        let idx = ((value - self.lower) / width).floor() as usize;
        idx.min(self.n_bins() - 1)
    }
}
