//! CLI command implementations.

pub mod config;
pub mod news;
pub mod portfolio;
pub mod prices;
pub mod returns;
pub mod risk;
pub mod stress;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use news::NewsArgs;
pub use portfolio::PortfolioArgs;
pub use prices::PricesArgs;
pub use returns::ReturnsArgs;
pub use risk::RiskArgs;
pub use stress::StressArgs;

use chrono::NaiveDate;
use marisk_core::{AssetId, Granularity, PriceColumn};
use marisk_data::PriceRequest;

use crate::cli::RangeArgs;
use crate::config::DashboardConfig;
use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// A [`RangeArgs`] with defaults filled in from the configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub granularity: Granularity,
    pub column: PriceColumn,
}

impl ResolvedRange {
    /// Price request for `symbol` over this range.
    pub fn request(&self, symbol: impl Into<AssetId>) -> PriceRequest {
        PriceRequest::new(symbol, self.start, self.end).with_granularity(self.granularity)
    }
}

impl RangeArgs {
    pub fn resolve(&self, config: &DashboardConfig) -> CliResult<ResolvedRange> {
        let start = self
            .start
            .as_deref()
            .map_or(Ok(config.default_start), parse_date)?;
        let end = self
            .end
            .as_deref()
            .map_or(Ok(config.default_end), parse_date)?;
        if start > end {
            return Err(CliError::InvalidArgument(format!(
                "start date {start} is after end date {end}"
            )));
        }

        Ok(ResolvedRange {
            start,
            end,
            granularity: self.granularity.parse().map_err(CliError::InvalidArgument)?,
            column: self.column.parse().map_err(CliError::InvalidArgument)?,
        })
    }
}

/// Parses a symbol argument, rejecting blanks.
pub fn parse_symbol(s: &str) -> CliResult<AssetId> {
    let symbol = AssetId::new(s);
    if symbol.is_blank() {
        return Err(CliError::MissingArgument("symbol".into()));
    }
    Ok(symbol)
}

/// Parses a confidence level given in percent (95) or as a fraction (0.95).
pub fn parse_confidence(value: f64) -> CliResult<f64> {
    let c = if value > 1.0 { value / 100.0 } else { value };
    marisk_core::RiskError::check_confidence(c)?;
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: Option<&str>, end: Option<&str>) -> RangeArgs {
        RangeArgs {
            start: start.map(String::from),
            end: end.map(String::from),
            granularity: "weekly".into(),
            column: "close".into(),
        }
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(matches!(parse_date("2023-02-29"), Err(CliError::InvalidDate(_))));
        assert!(parse_date("01/02/2024").is_err());
    }

    #[test]
    fn test_range_defaults_from_config() {
        let config = DashboardConfig::default();
        let resolved = range(None, Some("2020-06-30")).resolve(&config).unwrap();
        assert_eq!(resolved.start, config.default_start);
        assert_eq!(resolved.end, NaiveDate::from_ymd_opt(2020, 6, 30).unwrap());
        assert_eq!(resolved.granularity, Granularity::Weekly);
        assert_eq!(resolved.column, PriceColumn::Close);
    }

    #[test]
    fn test_range_rejects_reversed_dates() {
        let config = DashboardConfig::default();
        assert!(range(Some("2024-01-10"), Some("2024-01-01")).resolve(&config).is_err());
    }

    #[test]
    fn test_parse_confidence() {
        assert!((parse_confidence(95.0).unwrap() - 0.95).abs() < 1e-12);
        assert!((parse_confidence(0.99).unwrap() - 0.99).abs() < 1e-12);
        assert!(parse_confidence(100.0).is_err());
        assert!(parse_confidence(0.0).is_err());
    }

    #[test]
    fn test_parse_symbol() {
        assert_eq!(parse_symbol(" aapl ").unwrap().as_str(), "AAPL");
        assert!(parse_symbol("  ").is_err());
    }
}
