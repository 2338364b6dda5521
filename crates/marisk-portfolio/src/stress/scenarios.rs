//! Stress scenario definitions.

use marisk_core::{RiskError, RiskResult};
use serde::{Deserialize, Serialize};

/// Smallest custom shock, in percent.
pub const MIN_CUSTOM_SHOCK: f64 = -50.0;

/// Largest custom shock, in percent.
pub const MAX_CUSTOM_SHOCK: f64 = 50.0;

/// A named percentage shock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressScenario {
    /// Scenario name.
    pub name: String,

    /// Description.
    pub description: Option<String>,

    /// Shock in percent (e.g., -10 for a 10% drop).
    pub shock_pct: f64,
}

impl StressScenario {
    /// Creates a new stress scenario.
    #[must_use]
    pub fn new(name: impl Into<String>, shock_pct: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            shock_pct,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Creates a user-defined scenario.
    ///
    /// # Errors
    ///
    /// `InvalidInput` unless `shock_pct` lies in
    /// [`MIN_CUSTOM_SHOCK`, `MAX_CUSTOM_SHOCK`].
    pub fn custom(shock_pct: f64) -> RiskResult<Self> {
        if !(MIN_CUSTOM_SHOCK..=MAX_CUSTOM_SHOCK).contains(&shock_pct) {
            return Err(RiskError::invalid_input(format!(
                "custom shock must be within [{MIN_CUSTOM_SHOCK}, {MAX_CUSTOM_SHOCK}]%, got {shock_pct}"
            )));
        }
        Ok(Self::new("Custom", shock_pct).with_description(format!("User-defined {shock_pct:+}% shock")))
    }

    /// Multiplier applied to each return.
    #[must_use]
    pub fn factor(&self) -> f64 {
        1.0 + self.shock_pct / 100.0
    }
}

/// Predefined market scenarios.
pub mod standard {
    use super::StressScenario;

    /// -10% interest rate hike.
    #[must_use]
    pub fn interest_rate_hike() -> StressScenario {
        StressScenario::new("Interest Rate Hike", -10.0)
            .with_description("Central bank tightening: -10% portfolio impact")
    }

    /// -8% oil price shock.
    #[must_use]
    pub fn oil_price_shock() -> StressScenario {
        StressScenario::new("Oil Price Shock", -8.0)
            .with_description("Energy supply disruption: -8% portfolio impact")
    }

    /// -30% market crash.
    #[must_use]
    pub fn market_crash() -> StressScenario {
        StressScenario::new("Market Crash", -30.0)
            .with_description("Broad equity sell-off: -30% portfolio impact")
    }

    /// Returns all predefined scenarios.
    #[must_use]
    pub fn all() -> Vec<StressScenario> {
        vec![interest_rate_hike(), oil_price_shock(), market_crash()]
    }

    /// Looks up a predefined scenario by name, ignoring case, spaces, `-` and `_`.
    #[must_use]
    pub fn by_name(name: &str) -> Option<StressScenario> {
        let key = normalize(name);
        all().into_iter().find(|s| normalize(&s.name) == key)
    }

    fn normalize(name: &str) -> String {
        name.chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_shocks() {
        let all = standard::all();
        let shocks: Vec<f64> = all.iter().map(|s| s.shock_pct).collect();
        assert_eq!(shocks, vec![-10.0, -8.0, -30.0]);
        assert_eq!(all[2].name, "Market Crash");
        assert!((all[2].factor() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_by_name() {
        assert_eq!(
            standard::by_name("market-crash").map(|s| s.shock_pct),
            Some(-30.0)
        );
        assert_eq!(
            standard::by_name("OIL_PRICE_SHOCK").map(|s| s.shock_pct),
            Some(-8.0)
        );
        assert!(standard::by_name("alien invasion").is_none());
    }

    #[test]
    fn test_custom_bounds() {
        assert!(StressScenario::custom(-50.0).is_ok());
        assert!(StressScenario::custom(50.0).is_ok());
        assert!(matches!(
            StressScenario::custom(50.5),
            Err(RiskError::InvalidInput { .. })
        ));
        assert!(StressScenario::custom(f64::NAN).is_err());
    }
}
