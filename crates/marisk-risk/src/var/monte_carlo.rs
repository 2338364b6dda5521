//! Monte Carlo VaR calculation.

use super::historical::empirical_quantile;
use super::{check_sample, RiskEstimate, VaRMethod};
use marisk_core::stats::{mean, sample_std};
use marisk_core::{RiskError, RiskResult};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Default number of simulated returns.
pub const DEFAULT_SIMULATIONS: usize = 10_000;

/// How simulated returns are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationModel {
    /// Normal distribution with the sample mean and standard deviation.
    #[default]
    Normal,
    /// Resampling with replacement from the observed returns.
    Bootstrap,
}

/// Monte Carlo VaR settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Number of simulated returns.
    pub num_simulations: usize,
    /// Sampling model.
    pub model: SimulationModel,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            num_simulations: DEFAULT_SIMULATIONS,
            model: SimulationModel::Normal,
        }
    }
}

impl MonteCarloConfig {
    /// Sets the number of simulations.
    #[must_use]
    pub fn with_simulations(mut self, num_simulations: usize) -> Self {
        self.num_simulations = num_simulations;
        self
    }

    /// Sets the sampling model.
    #[must_use]
    pub fn with_model(mut self, model: SimulationModel) -> Self {
        self.model = model;
        self
    }
}

/// Draws `config.num_simulations` returns according to `config.model`.
pub fn simulate_returns<R: Rng + ?Sized>(
    returns: &[f64],
    config: &MonteCarloConfig,
    rng: &mut R,
) -> RiskResult<Vec<f64>> {
    if config.num_simulations == 0 {
        return Err(RiskError::invalid_input("num_simulations must be positive"));
    }

    match config.model {
        SimulationModel::Normal => {
            let mu = mean(returns)?;
            let sigma = sample_std(returns)?;
            let normal = Normal::new(mu, sigma)
                .map_err(|e| RiskError::invalid_input(format!("normal({mu}, {sigma}): {e}")))?;
            Ok((0..config.num_simulations)
                .map(|_| normal.sample(rng))
                .collect())
        }
        SimulationModel::Bootstrap => {
            if returns.is_empty() {
                return Err(RiskError::insufficient_data("bootstrap needs at least 1 return"));
            }
            Ok((0..config.num_simulations)
                .map(|_| returns[rng.gen_range(0..returns.len())])
                .collect())
        }
    }
}

/// Calculate Monte Carlo VaR.
///
/// Simulates returns with the configured model, then takes the historical
/// VaR quantile of the simulated sample. The generator is supplied by the
/// caller; seed it for reproducible figures.
///
/// # Errors
///
/// - `InsufficientData` for fewer than 2 returns (the normal model needs a
///   standard deviation; the same floor applies to bootstrap for parity)
/// - `InvalidInput` for a bad confidence level or zero simulations
pub fn monte_carlo_var<R: Rng + ?Sized>(
    returns: &[f64],
    confidence_level: f64,
    config: &MonteCarloConfig,
    rng: &mut R,
) -> RiskResult<RiskEstimate> {
    check_sample(returns, confidence_level, 2)?;

    let simulated = simulate_returns(returns, config, rng)?;

    Ok(RiskEstimate {
        method: VaRMethod::MonteCarlo,
        confidence_level,
        value: empirical_quantile(&simulated, confidence_level),
        observations: returns.len(),
    })
}
