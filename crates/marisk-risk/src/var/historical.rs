//! Historical VaR calculation.

use super::{check_sample, RiskEstimate, VaRMethod};
use marisk_core::RiskResult;

// 1 - c is often represented just below its decimal value (1 - 0.8 =
// 0.19999999999999996), which would push the floor one slot down.
const INDEX_EPSILON: f64 = 1e-9;

/// Position of the VaR quantile in an ascending sample of length `n`.
///
/// `floor((1 - c) * n)`, clamped to `[0, n - 1]`.
#[must_use]
pub fn quantile_index(n: usize, confidence_level: f64) -> usize {
    let raw = ((1.0 - confidence_level) * n as f64 + INDEX_EPSILON).floor();
    (raw.max(0.0) as usize).min(n.saturating_sub(1))
}

/// Returns the VaR quantile of an unsorted, finite, non-empty sample.
pub(crate) fn empirical_quantile(returns: &[f64], confidence_level: f64) -> f64 {
    let mut sorted = returns.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted[quantile_index(sorted.len(), confidence_level)]
}

/// Calculate historical VaR from a series of returns.
///
/// Sorts the returns ascending and picks the element at
/// `floor((1 - confidence_level) * n)`.
///
/// # Arguments
///
/// * `returns` - Historical returns (as decimals, e.g., -0.01 for -1%)
/// * `confidence_level` - Confidence level in (0, 1), e.g. 0.95
///
/// # Errors
///
/// - `InsufficientData` if `returns` is empty
/// - `InvalidInput` for a confidence level outside (0, 1) or non-finite returns
pub fn historical_var(returns: &[f64], confidence_level: f64) -> RiskResult<RiskEstimate> {
    check_sample(returns, confidence_level, 1)?;

    Ok(RiskEstimate {
        method: VaRMethod::Historical,
        confidence_level,
        value: empirical_quantile(returns, confidence_level),
        observations: returns.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use marisk_core::RiskError;

    #[test]
    fn test_historical_var() {
        let returns = [0.01, -0.02, 0.03, -0.01, 0.02];
        let var = historical_var(&returns, 0.8).unwrap();

        assert_relative_eq!(var.value, -0.01);
        assert_eq!(var.method, VaRMethod::Historical);
        assert_eq!(var.observations, 5);
    }

    #[test]
    fn test_historical_var_ten_observations() {
        let returns = [
            -0.02, -0.015, -0.01, -0.005, 0.0, 0.005, 0.01, 0.015, 0.02, 0.025,
        ];
        // floor(0.05 * 10) = 0 -> worst return
        let var = historical_var(&returns, 0.95).unwrap();
        assert_relative_eq!(var.value, -0.02);

        // floor(0.1 * 10) = 1
        let var = historical_var(&returns, 0.90).unwrap();
        assert_relative_eq!(var.value, -0.015);
    }

    #[test]
    fn test_historical_var_constant() {
        let returns = [0.003; 40];
        let var = historical_var(&returns, 0.99).unwrap();
        assert_relative_eq!(var.value, 0.003);
    }

    #[test]
    fn test_historical_var_empty() {
        let result = historical_var(&[], 0.95);
        assert!(matches!(result, Err(RiskError::InsufficientData { .. })));
    }

    #[test]
    fn test_historical_var_bad_confidence() {
        assert!(matches!(
            historical_var(&[0.01], 1.0),
            Err(RiskError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_quantile_index_clamped() {
        assert_eq!(quantile_index(1, 0.01), 0);
        assert_eq!(quantile_index(3, 1e-12), 2);
        assert_eq!(quantile_index(100, 0.95), 5);
    }
}
