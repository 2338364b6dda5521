//! # Marisk Portfolio
//!
//! Portfolio aggregation and stress testing over asset return series.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **Validate first**: Every portfolio entry point checks the
//!   [`PortfolioSpec`] before it touches any data
//! - **Caller-owned returns**: Asset returns come in as an [`AssetReturns`] map,
//!   fetched by whatever provider the caller uses
//!
//! ## Features
//!
//! - **Portfolio Spec**: Ordered (asset, weight) entries with editing and validation
//! - **Aggregation**: Date alignment and weighted portfolio returns
//! - **Risk Contribution**: Share of weighted annualized volatility per asset
//! - **Correlation**: Pairwise Pearson matrix over the aligned range
//! - **Stress Testing**: Predefined and custom percentage shocks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use marisk_portfolio::prelude::*;
//!
//! let spec = PortfolioSpec::from_pairs([("AAPL", 0.5), ("MSFT", 0.5)]);
//! let returns = portfolio_returns(&asset_returns, &spec)?;
//! let contrib = risk_contributions(&asset_returns, &spec, 252)?;
//! let crash = run_scenario(&returns, &stress_scenarios::market_crash())?;
//! ```
//!
//! ## Module Overview
//!
//! - [`spec`] - Portfolio specification and editing
//! - [`aggregate`] - Alignment and portfolio returns
//! - [`contribution`] - Risk contribution by asset
//! - [`correlation`] - Correlation matrix
//! - [`stress`] - Stress scenarios and their application

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod contribution;
pub mod correlation;
pub mod spec;
pub mod stress;

pub use marisk_core::{RiskError, RiskResult};

pub use spec::{PortfolioEntry, PortfolioSpec, WEIGHT_TOLERANCE};

pub use aggregate::{align, portfolio_returns, weighted_returns, AlignedReturns, AssetReturns};

pub use contribution::{
    contributions_from_aligned, risk_contributions, RiskContribution, RiskContributions,
};

pub use correlation::{correlation_matrix, CorrelationMatrix};

pub use stress::{
    apply_scenario, best_case, run_scenario, run_scenarios,
    // Standard scenarios
    standard as stress_scenarios,
    worst_case, ScenarioResult, StressScenario,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use marisk_portfolio::prelude::*;
/// ```
pub mod prelude {
    pub use crate::aggregate::{align, portfolio_returns, AlignedReturns, AssetReturns};
    pub use crate::contribution::{risk_contributions, RiskContribution, RiskContributions};
    pub use crate::correlation::{correlation_matrix, CorrelationMatrix};
    pub use crate::spec::{PortfolioEntry, PortfolioSpec};
    pub use crate::stress::{
        apply_scenario, run_scenario, run_scenarios, standard as stress_scenarios,
        ScenarioResult, StressScenario,
    };

    pub use marisk_core::{AssetId, ReturnSeries, RiskError, RiskResult};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbalanced_weights_are_invalid_portfolio() {
        let err = PortfolioSpec::from_pairs([("A", 0.6), ("B", 0.3)])
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("Invalid portfolio"));
    }
}
