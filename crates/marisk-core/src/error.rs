//! Error types for the Marisk workspace.
//!
//! Every error here is recoverable at the boundary of a single analysis
//! request. Callers render a warning in place of the affected table and carry
//! on with the rest of the report.

use thiserror::Error;

/// A specialized Result type for risk operations.
pub type RiskResult<T> = Result<T, RiskError>;

/// The main error type for risk analytics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    /// Too few data points for the requested statistic.
    #[error("Insufficient data: {reason}")]
    InsufficientData {
        /// Description of what was missing.
        reason: String,
    },

    /// No common dates across the portfolio's asset series.
    #[error("Data alignment failed: {reason}")]
    DataAlignment {
        /// Description of the alignment failure.
        reason: String,
    },

    /// The data provider returned nothing, failed, or timed out.
    #[error("Data unavailable for {symbol}: {reason}")]
    DataUnavailable {
        /// Symbol (or symbols) that were requested.
        symbol: String,
        /// Description of the failure.
        reason: String,
    },

    /// Weights do not sum to one, a weight is negative, or an asset id is blank.
    #[error("Invalid portfolio: {reason}")]
    InvalidPortfolio {
        /// The reason the portfolio is invalid.
        reason: String,
    },

    /// An argument lies outside its valid domain.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl RiskError {
    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(reason: impl Into<String>) -> Self {
        Self::InsufficientData {
            reason: reason.into(),
        }
    }

    /// Creates a data alignment error.
    #[must_use]
    pub fn data_alignment(reason: impl Into<String>) -> Self {
        Self::DataAlignment {
            reason: reason.into(),
        }
    }

    /// Creates a data unavailable error.
    #[must_use]
    pub fn data_unavailable(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid portfolio error.
    #[must_use]
    pub fn invalid_portfolio(reason: impl Into<String>) -> Self {
        Self::InvalidPortfolio {
            reason: reason.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Validates a confidence level in the open interval (0, 1).
    pub fn check_confidence(confidence_level: f64) -> RiskResult<()> {
        if confidence_level > 0.0 && confidence_level < 1.0 {
            Ok(())
        } else {
            Err(Self::invalid_input(format!(
                "confidence level must be strictly between 0 and 1, got {}",
                confidence_level
            )))
        }
    }
}
