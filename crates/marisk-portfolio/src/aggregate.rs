//! Date alignment and weighted portfolio returns.

use std::collections::HashMap;

use chrono::NaiveDate;
use marisk_core::{AssetId, ReturnSeries, RiskError, RiskResult};

use crate::spec::PortfolioSpec;

/// Return series keyed by asset.
pub type AssetReturns = HashMap<AssetId, ReturnSeries>;

/// Asset returns restricted to the dates every asset has.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedReturns {
    dates: Vec<NaiveDate>,
    assets: Vec<AssetId>,
    columns: Vec<Vec<f64>>,
}

impl AlignedReturns {
    /// Common dates, ascending.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Assets in column order.
    #[must_use]
    pub fn assets(&self) -> &[AssetId] {
        &self.assets
    }

    /// Number of aligned dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if no date is shared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Returns of one asset over the aligned dates.
    #[must_use]
    pub fn column(&self, asset: &AssetId) -> Option<&[f64]> {
        self.assets
            .iter()
            .position(|a| a == asset)
            .map(|i| self.columns[i].as_slice())
    }

    /// Iterates over (asset, returns) in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&AssetId, &[f64])> {
        self.assets
            .iter()
            .zip(self.columns.iter().map(Vec::as_slice))
    }
}

/// Inner-joins the return series of `assets` on date.
///
/// # Errors
///
/// - `InvalidInput` if `assets` is empty
/// - `DataUnavailable` if an asset has no series in `asset_returns`
/// - `DataAlignment` if the series share no date
pub fn align(asset_returns: &AssetReturns, assets: &[AssetId]) -> RiskResult<AlignedReturns> {
    if assets.is_empty() {
        return Err(RiskError::invalid_input("no assets to align"));
    }

    let series: Vec<&ReturnSeries> = assets
        .iter()
        .map(|asset| {
            asset_returns.get(asset).ok_or_else(|| {
                RiskError::data_unavailable(asset.as_str(), "no return series supplied")
            })
        })
        .collect::<RiskResult<_>>()?;

    // Shortest series bounds the intersection.
    let pivot = series
        .iter()
        .min_by_key(|s| s.len())
        .map_or(&[][..], |s| s.points());

    let dates: Vec<NaiveDate> = pivot
        .iter()
        .map(|p| p.date)
        .filter(|d| series.iter().all(|s| s.get(*d).is_some()))
        .collect();

    if dates.is_empty() {
        let names: Vec<&str> = assets.iter().map(AssetId::as_str).collect();
        return Err(RiskError::data_alignment(format!(
            "no common dates across {}",
            names.join(", ")
        )));
    }

    let columns = series
        .iter()
        .map(|s| dates.iter().filter_map(|d| s.get(*d)).collect())
        .collect();

    Ok(AlignedReturns {
        dates,
        assets: assets.to_vec(),
        columns,
    })
}

/// Weighted sum of the aligned asset returns at each common date.
///
/// The spec is validated before any data is touched.
///
/// # Errors
///
/// - `InvalidPortfolio` if the spec is invalid
/// - `DataUnavailable` if an asset has no series
/// - `DataAlignment` if the series share no date
pub fn portfolio_returns(
    asset_returns: &AssetReturns,
    spec: &PortfolioSpec,
) -> RiskResult<ReturnSeries> {
    spec.validate()?;
    let aligned = align(asset_returns, &spec.assets())?;
    weighted_returns(&aligned, spec)
}

/// Portfolio returns over an already aligned set.
///
/// # Errors
///
/// `DataUnavailable` if an asset of `spec` is not in `aligned`.
pub fn weighted_returns(aligned: &AlignedReturns, spec: &PortfolioSpec) -> RiskResult<ReturnSeries> {
    let mut totals = vec![0.0; aligned.len()];
    for entry in spec.entries() {
        let column = aligned.column(&entry.asset).ok_or_else(|| {
            RiskError::data_unavailable(entry.asset.as_str(), "asset missing from aligned returns")
        })?;
        for (total, r) in totals.iter_mut().zip(column) {
            *total += entry.weight * r;
        }
    }

    ReturnSeries::from_pairs(aligned.dates().iter().copied().zip(totals))
}
