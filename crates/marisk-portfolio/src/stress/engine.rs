//! Scenario application.

use marisk_core::{growth_curve, ReturnPoint, ReturnSeries, RiskError, RiskResult};
use serde::{Deserialize, Serialize};

use super::scenarios::StressScenario;

/// Returns of a series under a stress scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Scenario name.
    pub scenario_name: String,

    /// Shock in percent.
    pub shock_pct: f64,

    /// Shocked returns.
    pub adjusted_returns: ReturnSeries,

    /// Growth of one unit under the shocked returns.
    pub growth: Vec<ReturnPoint>,
}

impl ScenarioResult {
    /// Final value of the growth curve; 1.0 for an empty series.
    #[must_use]
    pub fn final_value(&self) -> f64 {
        self.growth.last().map_or(1.0, |p| p.value)
    }

    /// Cumulative return over the whole series.
    #[must_use]
    pub fn cumulative_return(&self) -> f64 {
        self.final_value() - 1.0
    }

    /// Cumulative return path (growth minus the initial unit).
    #[must_use]
    pub fn cumulative_returns(&self) -> Vec<ReturnPoint> {
        self.growth
            .iter()
            .map(|p| ReturnPoint::new(p.date, p.value - 1.0))
            .collect()
    }
}

/// Scales every return by `1 + shock_pct / 100`.
///
/// A zero shock reproduces `returns` exactly.
///
/// # Errors
///
/// `InvalidInput` unless `shock_pct` lies in [-50, 50].
pub fn apply_scenario(returns: &ReturnSeries, shock_pct: f64) -> RiskResult<ScenarioResult> {
    run_scenario(returns, &StressScenario::custom(shock_pct)?)
}

/// Applies a named scenario to `returns`.
///
/// # Errors
///
/// `InvalidInput` if the scenario's shock is not finite.
pub fn run_scenario(returns: &ReturnSeries, scenario: &StressScenario) -> RiskResult<ScenarioResult> {
    if !scenario.shock_pct.is_finite() {
        return Err(RiskError::invalid_input(format!(
            "shock for {} must be finite, got {}",
            scenario.name, scenario.shock_pct
        )));
    }

    let factor = scenario.factor();
    let adjusted_returns = returns.map_values(|r| r * factor)?;
    let growth = growth_curve(&adjusted_returns);

    Ok(ScenarioResult {
        scenario_name: scenario.name.clone(),
        shock_pct: scenario.shock_pct,
        adjusted_returns,
        growth,
    })
}

/// Applies each scenario in turn.
///
/// # Errors
///
/// Fails on the first scenario that fails.
pub fn run_scenarios(
    returns: &ReturnSeries,
    scenarios: &[StressScenario],
) -> RiskResult<Vec<ScenarioResult>> {
    scenarios.iter().map(|s| run_scenario(returns, s)).collect()
}

/// Scenario with the lowest cumulative return.
#[must_use]
pub fn worst_case(results: &[ScenarioResult]) -> Option<&ScenarioResult> {
    results
        .iter()
        .min_by(|a, b| a.cumulative_return().total_cmp(&b.cumulative_return()))
}

/// Scenario with the highest cumulative return.
#[must_use]
pub fn best_case(results: &[ScenarioResult]) -> Option<&ScenarioResult> {
    results
        .iter()
        .max_by(|a, b| a.cumulative_return().total_cmp(&b.cumulative_return()))
}
