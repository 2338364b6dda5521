//! Parametric (normal) VaR calculation.

use super::{check_sample, RiskEstimate, VaRMethod};
use marisk_core::stats::{mean, sample_std};
use marisk_core::{RiskError, RiskResult};
use statrs::distribution::{ContinuousCDF, Normal};

/// Standard normal quantile for the lower tail at `confidence_level`.
///
/// Returns `Φ⁻¹(1 - c)`, which is negative for any `c > 0.5`
/// (about -1.645 at 95%).
pub fn z_score(confidence_level: f64) -> RiskResult<f64> {
    RiskError::check_confidence(confidence_level)?;
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| RiskError::invalid_input(format!("standard normal: {e}")))?;
    Ok(normal.inverse_cdf(1.0 - confidence_level))
}

/// Calculate parametric VaR assuming normally distributed returns.
///
/// ## Formula
///
/// ```text
/// VaR = μ + z·σ,   z = Φ⁻¹(1 - c)
/// ```
///
/// The sample mean is included, keeping the estimate on the same footing as
/// the historical and Monte Carlo quantiles.
///
/// # Errors
///
/// - `InsufficientData` for fewer than 2 returns
/// - `InvalidInput` for a confidence level outside (0, 1)
pub fn parametric_var(returns: &[f64], confidence_level: f64) -> RiskResult<RiskEstimate> {
    check_sample(returns, confidence_level, 2)?;

    let mu = mean(returns)?;
    let sigma = sample_std(returns)?;
    let z = z_score(confidence_level)?;

    Ok(RiskEstimate {
        method: VaRMethod::Parametric,
        confidence_level,
        value: mu + z * sigma,
        observations: returns.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_z_score() {
        assert_relative_eq!(z_score(0.95).unwrap(), -1.644_853_626_951, epsilon = 1e-6);
        assert_relative_eq!(z_score(0.99).unwrap(), -2.326_347_874_04, epsilon = 1e-6);
        assert_relative_eq!(z_score(0.5).unwrap(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_parametric_var() {
        let returns = [0.01, -0.02, 0.03, -0.01, 0.02];
        let var = parametric_var(&returns, 0.95).unwrap();

        let mu = 0.006;
        let sigma = sample_std(&returns).unwrap();
        assert_relative_eq!(var.value, mu - 1.644_853_626_951 * sigma, epsilon = 1e-6);
        assert!(var.value < 0.0);
        assert_eq!(var.method, VaRMethod::Parametric);
    }

    #[test]
    fn test_parametric_var_tighter_at_higher_confidence() {
        let returns = [0.01, -0.02, 0.03, -0.01, 0.02, 0.0, -0.005];
        let v95 = parametric_var(&returns, 0.95).unwrap();
        let v99 = parametric_var(&returns, 0.99).unwrap();
        assert!(v99.value < v95.value);
    }

    #[test]
    fn test_parametric_var_single_observation() {
        assert!(matches!(
            parametric_var(&[0.01], 0.95),
            Err(RiskError::InsufficientData { .. })
        ));
    }
}
