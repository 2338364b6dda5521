//! Error types for data providers.

use marisk_core::RiskError;
use thiserror::Error;

/// Result type for data operations.
pub type DataResult<T> = Result<T, DataError>;

/// Errors raised while loading, caching or exporting market data.
#[derive(Debug, Error)]
pub enum DataError {
    /// No file or record exists for the symbol
    #[error("no data source for {symbol}")]
    NotFound {
        /// Requested symbol
        symbol: String,
    },

    /// The source exists but holds nothing in the requested range
    #[error("no data for {symbol} between {start} and {end}")]
    Empty {
        /// Requested symbol
        symbol: String,
        /// Range start
        start: String,
        /// Range end
        end: String,
    },

    /// The fetch did not complete in time
    #[error("fetch for {symbol} timed out after {seconds}s")]
    Timeout {
        /// Requested symbol
        symbol: String,
        /// Timeout that elapsed
        seconds: u64,
    },

    /// Reading a file failed
    #[error("IO error on {path}: {reason}")]
    Io {
        /// File path
        path: String,
        /// Underlying error
        reason: String,
    },

    /// A file could not be parsed
    #[error("parse error in {path}: {reason}")]
    Parse {
        /// File path
        path: String,
        /// Underlying error
        reason: String,
    },

    /// Writing CSV output failed
    #[error("export failed: {0}")]
    Export(String),

    /// The request itself is malformed
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Domain validation failed on loaded data
    #[error(transparent)]
    Risk(#[from] RiskError),
}

impl DataError {
    /// Creates an IO error for a path.
    pub fn io(path: impl std::fmt::Display, reason: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a parse error for a path.
    pub fn parse(path: impl std::fmt::Display, reason: impl std::fmt::Display) -> Self {
        Self::Parse {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<DataError> for RiskError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::NotFound { ref symbol }
            | DataError::Empty { ref symbol, .. }
            | DataError::Timeout { ref symbol, .. } => {
                RiskError::data_unavailable(symbol.clone(), err.to_string())
            }
            DataError::Io { ref path, .. } | DataError::Parse { ref path, .. } => {
                RiskError::data_unavailable(path.clone(), err.to_string())
            }
            DataError::Export(reason) => RiskError::invalid_input(reason),
            DataError::InvalidRequest(reason) => RiskError::invalid_input(reason),
            DataError::Risk(inner) => inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_risk_error() {
        let err: RiskError = DataError::Timeout {
            symbol: "AAPL".into(),
            seconds: 30,
        }
        .into();
        assert!(matches!(err, RiskError::DataUnavailable { ref symbol, .. } if symbol == "AAPL"));
        assert!(err.to_string().contains("timed out after 30s"));

        let err: RiskError = DataError::Risk(RiskError::insufficient_data("x")).into();
        assert!(matches!(err, RiskError::InsufficientData { .. }));
    }
}
