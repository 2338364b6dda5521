//! Conditional VaR (expected shortfall).

use super::historical::empirical_quantile;
use super::{check_sample, RiskEstimate, VaRMethod};
use marisk_core::{RiskError, RiskResult};

/// Calculate conditional VaR.
///
/// The historical VaR is used as threshold and CVaR is the mean of every
/// return at or below it.
///
/// # Errors
///
/// - `InsufficientData` if `returns` is empty or no return reaches the
///   threshold
/// - `InvalidInput` for a confidence level outside (0, 1)
pub fn conditional_var(returns: &[f64], confidence_level: f64) -> RiskResult<RiskEstimate> {
    check_sample(returns, confidence_level, 1)?;

    let threshold = empirical_quantile(returns, confidence_level);
    let tail: Vec<f64> = returns.iter().copied().filter(|r| *r <= threshold).collect();

    if tail.is_empty() {
        return Err(RiskError::insufficient_data(format!(
            "no returns at or below the VaR threshold {threshold}"
        )));
    }

    Ok(RiskEstimate {
        method: VaRMethod::Cvar,
        confidence_level,
        value: tail.iter().sum::<f64>() / tail.len() as f64,
        observations: returns.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::var::historical_var;
    use approx::assert_relative_eq;

    #[test]
    fn test_cvar_worked_example() {
        let returns = [0.01, -0.02, 0.03, -0.01, 0.02];
        let cvar = conditional_var(&returns, 0.8).unwrap();

        assert_relative_eq!(cvar.value, -0.015, epsilon = 1e-12);
        assert_eq!(cvar.method, VaRMethod::Cvar);
    }

    #[test]
    fn test_cvar_below_var() {
        let returns = [-0.05, -0.03, -0.02, -0.01, 0.0, 0.01, 0.02, 0.03, 0.04, 0.05];
        let var = historical_var(&returns, 0.7).unwrap();
        let cvar = conditional_var(&returns, 0.7).unwrap();
        assert!(cvar.value <= var.value);
        assert!(cvar.value < var.value);
    }

    #[test]
    fn test_cvar_constant_series() {
        let cvar = conditional_var(&[-0.01; 10], 0.95).unwrap();
        assert_relative_eq!(cvar.value, -0.01);
    }

    #[test]
    fn test_cvar_empty() {
        assert!(matches!(
            conditional_var(&[], 0.95),
            Err(RiskError::InsufficientData { .. })
        ));
    }
}
