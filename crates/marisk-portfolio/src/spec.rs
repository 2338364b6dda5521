//! Portfolio specification: an ordered list of (asset, weight) entries.

use std::collections::{BTreeMap, HashSet};

use marisk_core::{AssetId, RiskError, RiskResult};
use serde::{Deserialize, Serialize};

/// Tolerance on the sum of weights.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// One asset and its portfolio weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    /// Asset identifier.
    pub asset: AssetId,
    /// Weight as a fraction of the portfolio (0-1).
    pub weight: f64,
}

impl PortfolioEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(asset: impl Into<AssetId>, weight: f64) -> Self {
        Self {
            asset: asset.into(),
            weight,
        }
    }
}

/// An editable portfolio definition.
///
/// A spec may be invalid while it is being edited; analysis entry points call
/// [`PortfolioSpec::validate`] before using it.
///
/// # Example
///
/// ```rust
/// use marisk_portfolio::PortfolioSpec;
///
/// let mut spec = PortfolioSpec::from_pairs([("AAPL", 0.6), ("MSFT", 0.3)]);
/// assert!(!spec.is_valid());
///
/// spec.add_asset("GOOG");
/// spec.set_weight(2, 0.1).unwrap();
/// assert!(spec.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSpec {
    entries: Vec<PortfolioEntry>,
}

impl Default for PortfolioSpec {
    /// A single blank asset carrying the whole weight, ready to be edited.
    fn default() -> Self {
        Self {
            entries: vec![PortfolioEntry::new("", 1.0)],
        }
    }
}

impl PortfolioSpec {
    /// Creates a spec from entries. No validation is performed.
    #[must_use]
    pub fn new(entries: Vec<PortfolioEntry>) -> Self {
        Self { entries }
    }

    /// Creates a spec from (asset, weight) pairs.
    #[must_use]
    pub fn from_pairs<A: Into<AssetId>>(pairs: impl IntoIterator<Item = (A, f64)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(asset, weight)| PortfolioEntry::new(asset, weight))
                .collect(),
        )
    }

    /// Parses a spec from JSON.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the text is not a spec document. The result is not
    /// validated.
    pub fn from_json(json: &str) -> RiskResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| RiskError::invalid_input(format!("portfolio JSON: {e}")))
    }

    /// Serializes the spec to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if serialization fails.
    pub fn to_json(&self) -> RiskResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RiskError::invalid_input(format!("portfolio JSON: {e}")))
    }

    /// Returns the entries in order.
    #[must_use]
    pub fn entries(&self) -> &[PortfolioEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the spec has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Asset identifiers in order.
    #[must_use]
    pub fn assets(&self) -> Vec<AssetId> {
        self.entries.iter().map(|e| e.asset.clone()).collect()
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Weights keyed by asset.
    #[must_use]
    pub fn weights(&self) -> BTreeMap<AssetId, f64> {
        self.entries
            .iter()
            .map(|e| (e.asset.clone(), e.weight))
            .collect()
    }

    /// Appends an asset with weight 0.
    pub fn add_asset(&mut self, asset: impl Into<AssetId>) {
        self.entries.push(PortfolioEntry::new(asset, 0.0));
    }

    /// Removes the entry at `index` and returns it.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `index` is out of range or the spec would become
    /// empty.
    pub fn remove_asset(&mut self, index: usize) -> RiskResult<PortfolioEntry> {
        self.check_index(index)?;
        if self.entries.len() == 1 {
            return Err(RiskError::invalid_input(
                "a portfolio keeps at least one asset",
            ));
        }
        Ok(self.entries.remove(index))
    }

    /// Replaces the asset at `index`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `index` is out of range.
    pub fn set_asset(&mut self, index: usize, asset: impl Into<AssetId>) -> RiskResult<()> {
        self.check_index(index)?;
        self.entries[index].asset = asset.into();
        Ok(())
    }

    /// Sets the weight at `index`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `index` is out of range or `weight` is not in
    /// `[0, 1]`.
    pub fn set_weight(&mut self, index: usize, weight: f64) -> RiskResult<()> {
        self.check_index(index)?;
        if !(0.0..=1.0).contains(&weight) {
            return Err(RiskError::invalid_input(format!(
                "weight must be within [0, 1], got {weight}"
            )));
        }
        self.entries[index].weight = weight;
        Ok(())
    }

    /// Checks the spec is usable for analysis.
    ///
    /// # Errors
    ///
    /// `InvalidPortfolio` if the spec is empty, an asset id is blank or
    /// repeated, a weight is negative or non-finite, or the weights do not sum
    /// to 1 within [`WEIGHT_TOLERANCE`].
    pub fn validate(&self) -> RiskResult<()> {
        if self.entries.is_empty() {
            return Err(RiskError::invalid_portfolio("portfolio has no assets"));
        }

        let mut seen = HashSet::with_capacity(self.entries.len());
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.asset.is_blank() {
                return Err(RiskError::invalid_portfolio(format!(
                    "asset {} has no symbol",
                    i + 1
                )));
            }
            if !seen.insert(&entry.asset) {
                return Err(RiskError::invalid_portfolio(format!(
                    "{} appears more than once",
                    entry.asset
                )));
            }
            if !entry.weight.is_finite() || entry.weight < 0.0 {
                return Err(RiskError::invalid_portfolio(format!(
                    "weight of {} must be a non-negative number, got {}",
                    entry.asset, entry.weight
                )));
            }
        }

        let total = self.total_weight();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(RiskError::invalid_portfolio(format!(
                "weights must sum to 1.0, got {total:.6}"
            )));
        }

        Ok(())
    }

    /// Returns true if [`validate`](Self::validate) succeeds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn check_index(&self, index: usize) -> RiskResult<()> {
        if index >= self.entries.len() {
            return Err(RiskError::invalid_input(format!(
                "asset index {} out of range (portfolio has {})",
                index + 1,
                self.entries.len()
            )));
        }
        Ok(())
    }
}
