//! Value at Risk (VaR) calculations.
//!
//! VaR is the loss quantile of a return distribution: returns fall below it
//! with probability `1 - confidence_level`. All estimators here report it as
//! a fractional return, negative for a loss, so historical, parametric and
//! Monte Carlo figures are directly comparable.

mod cvar;
mod historical;
mod monte_carlo;
mod parametric;

pub use cvar::*;
pub use historical::*;
pub use monte_carlo::*;
pub use parametric::*;

use marisk_core::{RiskError, RiskResult};
use serde::{Deserialize, Serialize};

/// A single risk estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskEstimate {
    /// Method used for the calculation
    pub method: VaRMethod,
    /// Confidence level (e.g., 0.95 for 95%)
    pub confidence_level: f64,
    /// Estimate as a fractional return (negative = loss)
    pub value: f64,
    /// Number of return observations the estimate was drawn from
    pub observations: usize,
}

/// Risk estimation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VaRMethod {
    /// Historical simulation
    Historical,
    /// Parametric (variance-covariance)
    Parametric,
    /// Monte Carlo simulation
    MonteCarlo,
    /// Conditional VaR / expected shortfall
    Cvar,
}

impl VaRMethod {
    /// Short label used in tables.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Historical => "Historical VaR",
            Self::Parametric => "Parametric VaR",
            Self::MonteCarlo => "Monte Carlo VaR",
            Self::Cvar => "Conditional VaR",
        }
    }
}

impl std::fmt::Display for VaRMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::fmt::Display for RiskEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({:.0}% confidence): {:.2}%",
            self.method,
            self.confidence_level * 100.0,
            self.value * 100.0
        )
    }
}

/// Rejects empty samples, non-finite values and out-of-range confidence.
fn check_sample(returns: &[f64], confidence_level: f64, min_len: usize) -> RiskResult<()> {
    RiskError::check_confidence(confidence_level)?;
    if returns.len() < min_len {
        return Err(RiskError::insufficient_data(format!(
            "need at least {} returns, got {}",
            min_len,
            returns.len()
        )));
    }
    if returns.iter().any(|r| !r.is_finite()) {
        return Err(RiskError::invalid_input("returns contain NaN or infinite values"));
    }
    Ok(())
}
