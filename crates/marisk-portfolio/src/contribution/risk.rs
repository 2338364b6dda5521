//! Risk contribution analysis.
//!
//! Calculates how each asset contributes to portfolio volatility.

use marisk_core::stats::{annualize, sample_std};
use marisk_core::{AssetId, RiskError, RiskResult};
use serde::{Deserialize, Serialize};

use crate::aggregate::{align, AlignedReturns, AssetReturns};
use crate::spec::PortfolioSpec;

/// Contribution of a single asset to portfolio volatility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskContribution {
    /// Asset identifier.
    pub asset: AssetId,

    /// Portfolio weight (0-1).
    pub weight: f64,

    /// Annualized volatility of the asset's returns.
    pub annualized_volatility: f64,

    /// Weight times annualized volatility.
    pub contribution: f64,

    /// Contribution as percentage of total (0-100).
    pub contribution_pct: f64,
}

/// Risk contribution analysis.
///
/// The split is proportional to `weight × volatility`, which ignores
/// correlation. It is an additive proxy, not an Euler decomposition of
/// portfolio variance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskContributions {
    /// Contributions in portfolio order.
    pub by_asset: Vec<RiskContribution>,

    /// Sum of the raw contributions.
    pub total_contribution: f64,
}

impl RiskContributions {
    /// Returns the top N contributors by contribution.
    #[must_use]
    pub fn top_contributors(&self, n: usize) -> Vec<&RiskContribution> {
        let mut sorted: Vec<&RiskContribution> = self.by_asset.iter().collect();
        sorted.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
        sorted.truncate(n);
        sorted
    }

    /// Returns assets contributing more than the given percentage.
    #[must_use]
    pub fn large_contributors(&self, threshold_pct: f64) -> Vec<&RiskContribution> {
        self.by_asset
            .iter()
            .filter(|c| c.contribution_pct > threshold_pct)
            .collect()
    }
}

/// Calculates risk contributions for a portfolio.
///
/// ## Formula
///
/// ```text
/// vol_a          = stdev(r_a) × √periods_per_year
/// contribution_a = weight_a × vol_a
/// pct_a          = contribution_a / Σ contribution × 100
/// ```
///
/// Volatilities are measured over the dates shared by every asset.
///
/// # Errors
///
/// - `InvalidPortfolio` if the spec is invalid
/// - `DataUnavailable` / `DataAlignment` from [`align`]
/// - `InsufficientData` if fewer than 2 dates align or every contribution
///   is zero
pub fn risk_contributions(
    asset_returns: &AssetReturns,
    spec: &PortfolioSpec,
    periods_per_year: u32,
) -> RiskResult<RiskContributions> {
    spec.validate()?;
    let aligned = align(asset_returns, &spec.assets())?;
    contributions_from_aligned(&aligned, spec, periods_per_year)
}

/// Risk contributions over returns that are already aligned.
///
/// # Errors
///
/// - `DataUnavailable` if an asset of `spec` is not in `aligned`
/// - `InsufficientData` if fewer than 2 dates align or every contribution
///   is zero
pub fn contributions_from_aligned(
    aligned: &AlignedReturns,
    spec: &PortfolioSpec,
    periods_per_year: u32,
) -> RiskResult<RiskContributions> {
    let mut by_asset = spec
        .entries()
        .iter()
        .map(|entry| {
            let column = aligned.column(&entry.asset).ok_or_else(|| {
                RiskError::data_unavailable(entry.asset.as_str(), "asset missing from aligned returns")
            })?;
            let vol = annualize(sample_std(column)?, periods_per_year);
            Ok(RiskContribution {
                asset: entry.asset.clone(),
                weight: entry.weight,
                annualized_volatility: vol,
                contribution: vol * entry.weight,
                contribution_pct: 0.0,
            })
        })
        .collect::<RiskResult<Vec<_>>>()?;

    let total: f64 = by_asset.iter().map(|c| c.contribution).sum();
    if total == 0.0 {
        return Err(RiskError::insufficient_data(
            "total risk contribution is zero",
        ));
    }

    for c in &mut by_asset {
        c.contribution_pct = c.contribution / total * 100.0;
    }

    Ok(RiskContributions {
        by_asset,
        total_contribution: total,
    })
}
