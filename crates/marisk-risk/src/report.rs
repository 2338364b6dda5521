//! Summary risk report for one return series.

use crate::var::{
    conditional_var, historical_var, monte_carlo_var, parametric_var, MonteCarloConfig,
    RiskEstimate,
};
use crate::volatility::{latest_volatility, VolatilityPoint, DEFAULT_WINDOW};
use marisk_core::stats::{annualize, mean, sample_std};
use marisk_core::{ReturnSeries, RiskError, RiskResult};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Settings for [`risk_report`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskReportConfig {
    /// Confidence level shared by all estimates.
    pub confidence_level: f64,
    /// Rolling volatility window, in periods.
    pub rolling_window: usize,
    /// Monte Carlo settings.
    pub monte_carlo: MonteCarloConfig,
    /// Periods per year used for annualization.
    pub periods_per_year: u32,
}

impl Default for RiskReportConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            rolling_window: DEFAULT_WINDOW,
            monte_carlo: MonteCarloConfig::default(),
            periods_per_year: 252,
        }
    }
}

/// All risk metrics of a return series at one confidence level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// Number of returns
    pub observations: usize,
    /// Mean periodic return
    pub mean: f64,
    /// Sample standard deviation of the periodic returns
    pub volatility: f64,
    /// Volatility scaled to a year
    pub annualized_volatility: f64,
    /// Historical VaR
    pub historical: RiskEstimate,
    /// Parametric VaR
    pub parametric: RiskEstimate,
    /// Monte Carlo VaR
    pub monte_carlo: RiskEstimate,
    /// Conditional VaR
    pub cvar: RiskEstimate,
    /// Latest full-window rolling volatility, if the series is long enough
    pub rolling_volatility: Option<VolatilityPoint>,
}

impl RiskReport {
    /// The four estimates in display order.
    #[must_use]
    pub fn estimates(&self) -> [&RiskEstimate; 4] {
        [&self.historical, &self.parametric, &self.monte_carlo, &self.cvar]
    }
}

/// Computes every estimate for `returns` in one pass.
///
/// # Errors
///
/// Fails on the first estimator that fails; fewer than 2 returns is
/// `InsufficientData`.
pub fn risk_report<R: Rng + ?Sized>(
    returns: &ReturnSeries,
    config: &RiskReportConfig,
    rng: &mut R,
) -> RiskResult<RiskReport> {
    RiskError::check_confidence(config.confidence_level)?;
    let values = returns.values();
    let c = config.confidence_level;

    let volatility = sample_std(&values)?;

    Ok(RiskReport {
        observations: values.len(),
        mean: mean(&values)?,
        volatility,
        annualized_volatility: annualize(volatility, config.periods_per_year),
        historical: historical_var(&values, c)?,
        parametric: parametric_var(&values, c)?,
        monte_carlo: monte_carlo_var(&values, c, &config.monte_carlo, rng)?,
        cvar: conditional_var(&values, c)?,
        rolling_volatility: latest_volatility(returns, config.rolling_window)?,
    })
}
