//! Pairwise correlation of asset returns.

use marisk_core::stats::pearson;
use marisk_core::{AssetId, RiskError, RiskResult};
use serde::{Deserialize, Serialize};

use crate::aggregate::{align, AlignedReturns, AssetReturns};

/// Symmetric Pearson correlation matrix over aligned returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Row and column labels.
    pub assets: Vec<AssetId>,
    /// Row-major coefficients, each in [-1, 1].
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Builds the matrix from aligned returns.
    ///
    /// # Errors
    ///
    /// `InsufficientData` if fewer than 2 dates align or an asset has zero
    /// variance.
    pub fn from_aligned(aligned: &AlignedReturns) -> RiskResult<Self> {
        let columns: Vec<(&AssetId, &[f64])> = aligned.iter().collect();
        let n = columns.len();
        let mut values = vec![vec![1.0; n]; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let rho = pearson(columns[i].1, columns[j].1).map_err(|e| match e {
                    RiskError::InsufficientData { reason } => RiskError::insufficient_data(format!(
                        "{} / {}: {reason}",
                        columns[i].0, columns[j].0
                    )),
                    other => other,
                })?;
                values[i][j] = rho;
                values[j][i] = rho;
            }
        }

        // Diagonal of a zero-variance asset is undefined too.
        if n == 1 {
            pearson(columns[0].1, columns[0].1)?;
        }

        Ok(Self {
            assets: columns.iter().map(|(a, _)| (*a).clone()).collect(),
            values,
        })
    }

    /// Coefficient between two assets.
    #[must_use]
    pub fn get(&self, a: &AssetId, b: &AssetId) -> Option<f64> {
        let i = self.assets.iter().position(|x| x == a)?;
        let j = self.assets.iter().position(|x| x == b)?;
        Some(self.values[i][j])
    }

    /// Number of assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Returns true if the matrix has no assets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Aligns `assets` and computes their correlation matrix.
///
/// # Errors
///
/// As [`align`] and [`CorrelationMatrix::from_aligned`].
pub fn correlation_matrix(
    asset_returns: &AssetReturns,
    assets: &[AssetId],
) -> RiskResult<CorrelationMatrix> {
    let aligned = align(asset_returns, assets)?;
    CorrelationMatrix::from_aligned(&aligned)
}
