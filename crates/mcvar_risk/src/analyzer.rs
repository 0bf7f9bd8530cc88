//! Reduction of terminal prices into risk statistics.
//!
//! The percentile uses linear interpolation between order statistics:
//!
//! ```text
//! sorted = ascending(values)
//! r      = (c / 100) × (n - 1)
//! P(c)   = sorted[⌊r⌋] + (r - ⌊r⌋) × (sorted[⌈r⌉] - sorted[⌊r⌋])
//! ```
//!
//! Value-at-Risk is the loss amount `initial_price - P(c)`. It is negative
//! when even the pessimistic scenario ends above the initial price.

use mcvar_engine::mc::PriceMatrix;

use crate::error::RiskError;

/// Default percentile level (the 5th percentile, i.e. 95% confidence).
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 5.0;

/// Arithmetic mean of a non-empty set.
///
/// # Errors
///
/// Returns [`RiskError::InvalidInput`] if `values` is empty.
pub fn mean(values: &[f64]) -> Result<f64, RiskError> {
    ensure_non_empty(values)?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Smallest element of a non-empty set.
///
/// # Errors
///
/// Returns [`RiskError::InvalidInput`] if `values` is empty.
pub fn min(values: &[f64]) -> Result<f64, RiskError> {
    ensure_non_empty(values)?;
    Ok(values.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Largest element of a non-empty set.
///
/// # Errors
///
/// Returns [`RiskError::InvalidInput`] if `values` is empty.
pub fn max(values: &[f64]) -> Result<f64, RiskError> {
    ensure_non_empty(values)?;
    Ok(values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// Percentile `level` (in (0, 100)) with linear interpolation.
///
/// # Errors
///
/// Returns [`RiskError::InvalidInput`] if `values` is empty, contains a
/// non-finite value, or `level` lies outside (0, 100).
///
/// # Examples
///
/// ```
/// use mcvar_risk::percentile;
///
/// let values = [50.0, 10.0, 40.0, 20.0, 30.0];
/// assert_eq!(percentile(&values, 50.0).unwrap(), 30.0);
/// assert_eq!(percentile(&values, 25.0).unwrap(), 20.0);
/// ```
pub fn percentile(values: &[f64], level: f64) -> Result<f64, RiskError> {
    validate_level(level)?;
    let sorted = sorted_finite(values)?;
    Ok(percentile_of_sorted(&sorted, level))
}

/// Percentile of an already sorted, non-empty slice.
fn percentile_of_sorted(sorted: &[f64], level: f64) -> f64 {
    let rank = (level / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor();
    let frac = rank - lower;
    let lo = sorted[lower as usize];
    let hi = sorted[rank.ceil() as usize];
    lo + frac * (hi - lo)
}

fn ensure_non_empty(values: &[f64]) -> Result<(), RiskError> {
    if values.is_empty() {
        return Err(RiskError::invalid_input("terminal price set is empty"));
    }
    Ok(())
}

fn validate_level(level: f64) -> Result<(), RiskError> {
    if !(level > 0.0 && level < 100.0) {
        return Err(RiskError::invalid_input(format!(
            "confidence level must lie in (0, 100), got {}",
            level
        )));
    }
    Ok(())
}

fn sorted_finite(values: &[f64]) -> Result<Vec<f64>, RiskError> {
    ensure_non_empty(values)?;
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(RiskError::invalid_input(format!(
            "terminal prices must be finite, found {}",
            bad
        )));
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    Ok(sorted)
}

/// Summary risk statistics of a terminal price set.
///
/// Produced by [`RiskAnalyzer::analyze`]; all values are read-only.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RiskReport {
    initial_price: f64,
    path_count: usize,
    confidence_level: f64,
    mean_final_price: f64,
    min_final_price: f64,
    max_final_price: f64,
    percentile_floor: f64,
    value_at_risk: f64,
}

impl RiskReport {
    /// Initial price the VaR is measured against.
    #[inline]
    pub fn initial_price(&self) -> f64 {
        self.initial_price
    }

    /// Number of terminal prices analysed.
    #[inline]
    pub fn path_count(&self) -> usize {
        self.path_count
    }

    /// Percentile level `c` used for the floor, e.g. 5.
    #[inline]
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Confidence expressed as `100 - c`, e.g. 95.
    #[inline]
    pub fn confidence(&self) -> f64 {
        100.0 - self.confidence_level
    }

    /// Mean terminal price (expected future price).
    #[inline]
    pub fn mean_final_price(&self) -> f64 {
        self.mean_final_price
    }

    /// Lowest terminal price.
    #[inline]
    pub fn min_final_price(&self) -> f64 {
        self.min_final_price
    }

    /// Highest terminal price.
    #[inline]
    pub fn max_final_price(&self) -> f64 {
        self.max_final_price
    }

    /// Terminal price at the `c`-th percentile.
    #[inline]
    pub fn percentile_floor(&self) -> f64 {
        self.percentile_floor
    }

    /// Loss amount `initial_price - percentile_floor`; may be negative.
    #[inline]
    pub fn value_at_risk(&self) -> f64 {
        self.value_at_risk
    }
}

/// Reduces terminal prices into a [`RiskReport`].
///
/// # Examples
///
/// ```
/// use mcvar_risk::RiskAnalyzer;
///
/// let analyzer = RiskAnalyzer::default();
/// let terminal = [95.0, 102.0, 110.0, 120.0, 88.0];
/// let report = analyzer.analyze(100.0, &terminal).unwrap();
///
/// assert_eq!(report.min_final_price(), 88.0);
/// assert_eq!(report.value_at_risk(), 100.0 - report.percentile_floor());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiskAnalyzer {
    confidence_level: f64,
}

impl Default for RiskAnalyzer {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
        }
    }
}

impl RiskAnalyzer {
    /// Creates an analyzer for percentile level `confidence_level`.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidInput`] unless `0 < confidence_level < 100`.
    pub fn new(confidence_level: f64) -> Result<Self, RiskError> {
        validate_level(confidence_level)?;
        Ok(Self { confidence_level })
    }

    /// Returns the percentile level.
    #[inline]
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Analyses a terminal price set against `initial_price`.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidInput`] if the set is empty or contains a
    /// non-finite price.
    pub fn analyze(&self, initial_price: f64, terminal_prices: &[f64]) -> Result<RiskReport, RiskError> {
        validate_level(self.confidence_level)?;
        let sorted = sorted_finite(terminal_prices)?;

        let percentile_floor = percentile_of_sorted(&sorted, self.confidence_level);

        Ok(RiskReport {
            initial_price,
            path_count: sorted.len(),
            confidence_level: self.confidence_level,
            mean_final_price: mean(terminal_prices)?,
            min_final_price: sorted[0],
            max_final_price: sorted[sorted.len() - 1],
            percentile_floor,
            value_at_risk: initial_price - percentile_floor,
        })
    }

    /// Analyses the terminal row of a simulated [`PriceMatrix`].
    ///
    /// # Errors
    ///
    /// See [`analyze`](Self::analyze).
    pub fn analyze_matrix(&self, matrix: &PriceMatrix) -> Result<RiskReport, RiskError> {
        self.analyze(matrix.initial_price(), matrix.terminal_prices())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE: [f64; 5] = [10.0, 20.0, 30.0, 40.0, 50.0];

    #[test]
    fn test_percentile_reference_values() {
        assert_eq!(percentile(&SAMPLE, 50.0).unwrap(), 30.0);
        assert_eq!(percentile(&SAMPLE, 25.0).unwrap(), 20.0);
    }

    #[test]
    fn test_percentile_interpolates() {
        // r = 0.05 × 4 = 0.2 → 10 + 0.2 × 10
        assert_relative_eq!(percentile(&SAMPLE, 5.0).unwrap(), 12.0, epsilon = 1e-12);
        // r = 0.9 × 4 = 3.6 → 40 + 0.6 × 10
        assert_relative_eq!(percentile(&SAMPLE, 90.0).unwrap(), 46.0, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_ignores_input_order() {
        let shuffled = [40.0, 10.0, 50.0, 30.0, 20.0];
        assert_eq!(
            percentile(&shuffled, 25.0).unwrap(),
            percentile(&SAMPLE, 25.0).unwrap()
        );
    }

    #[test]
    fn test_percentile_with_ties() {
        let values = [5.0, 5.0, 5.0, 9.0];
        assert_eq!(percentile(&values, 50.0).unwrap(), 5.0);
    }

    #[test]
    fn test_percentile_rejects_bad_level() {
        for level in [0.0, 100.0, -1.0, 150.0, f64::NAN] {
            assert!(matches!(
                percentile(&SAMPLE, level),
                Err(RiskError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_empty_set_rejected() {
        assert!(mean(&[]).is_err());
        assert!(min(&[]).is_err());
        assert!(max(&[]).is_err());
        assert!(percentile(&[], 5.0).is_err());
        assert!(RiskAnalyzer::default().analyze(100.0, &[]).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let values = [10.0, f64::NAN, 30.0];
        assert!(percentile(&values, 5.0).is_err());
        assert!(RiskAnalyzer::default().analyze(100.0, &values).is_err());
    }

    #[test]
    fn test_reductions() {
        assert_eq!(mean(&SAMPLE).unwrap(), 30.0);
        assert_eq!(min(&SAMPLE).unwrap(), 10.0);
        assert_eq!(max(&SAMPLE).unwrap(), 50.0);
    }

    #[test]
    fn test_single_element_set() {
        let report = RiskAnalyzer::default().analyze(100.0, &[87.5]).unwrap();
        assert_eq!(report.mean_final_price(), 87.5);
        assert_eq!(report.min_final_price(), 87.5);
        assert_eq!(report.max_final_price(), 87.5);
        assert_eq!(report.percentile_floor(), 87.5);
        assert_eq!(report.value_at_risk(), 12.5);
        assert_eq!(report.path_count(), 1);
    }

    #[test]
    fn test_value_at_risk_sign() {
        let analyzer = RiskAnalyzer::new(50.0).unwrap();

        let loss = analyzer.analyze(100.0, &[80.0, 90.0, 100.0]).unwrap();
        assert_eq!(loss.percentile_floor(), 90.0);
        assert_eq!(loss.value_at_risk(), 10.0);

        let gain = analyzer.analyze(100.0, &[105.0, 110.0, 130.0]).unwrap();
        assert_eq!(gain.percentile_floor(), 110.0);
        assert_eq!(gain.value_at_risk(), -10.0);
    }

    #[test]
    fn test_analyzer_rejects_bad_level() {
        assert!(RiskAnalyzer::new(0.0).is_err());
        assert!(RiskAnalyzer::new(100.0).is_err());
        assert_eq!(RiskAnalyzer::new(1.0).unwrap().confidence_level(), 1.0);
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let values: Vec<f64> = (1..=997).map(|i| 50.0 + (i as f64 * 0.618).sin() * 20.0).collect();
        let analyzer = RiskAnalyzer::default();

        let first = analyzer.analyze(60.0, &values).unwrap();
        let second = analyzer.analyze(60.0, &values).unwrap();

        assert_eq!(first.mean_final_price().to_bits(), second.mean_final_price().to_bits());
        assert_eq!(first.percentile_floor().to_bits(), second.percentile_floor().to_bits());
        assert_eq!(first.value_at_risk().to_bits(), second.value_at_risk().to_bits());
        assert_eq!(first, second);
    }

    #[test]
    fn test_confidence_presentation() {
        let report = RiskAnalyzer::default().analyze(100.0, &SAMPLE).unwrap();
        assert_eq!(report.confidence_level(), 5.0);
        assert_eq!(report.confidence(), 95.0);
    }
}
