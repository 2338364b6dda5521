//! Sampling granularity and price column selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sampling interval of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bar per trading day.
    #[default]
    Daily,
    /// One bar per ISO week.
    Weekly,
    /// One bar per calendar month.
    Monthly,
}

impl Granularity {
    /// Returns the number of periods per year used for annualization.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Granularity::Daily => 252,
            Granularity::Weekly => 52,
            Granularity::Monthly => 12,
        }
    }

    /// Returns the provider interval code ("1d", "1wk", "1mo").
    #[must_use]
    pub fn interval(&self) -> &'static str {
        match self {
            Granularity::Daily => "1d",
            Granularity::Weekly => "1wk",
            Granularity::Monthly => "1mo",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::Daily => "Daily",
            Granularity::Weekly => "Weekly",
            Granularity::Monthly => "Monthly",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "1d" | "d" => Ok(Granularity::Daily),
            "weekly" | "1wk" | "w" => Ok(Granularity::Weekly),
            "monthly" | "1mo" | "m" => Ok(Granularity::Monthly),
            other => Err(format!(
                "unknown granularity '{other}' (expected daily, weekly or monthly)"
            )),
        }
    }
}

/// Which field of a price bar feeds a [`PriceSeries`](crate::PriceSeries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriceColumn {
    /// Opening price.
    Open,
    /// Session high.
    High,
    /// Session low.
    Low,
    /// Closing price.
    Close,
    /// Split and dividend adjusted close.
    #[default]
    AdjClose,
}

impl PriceColumn {
    /// Column header as it appears in provider CSV files and exports.
    #[must_use]
    pub fn header(&self) -> &'static str {
        match self {
            PriceColumn::Open => "Open",
            PriceColumn::High => "High",
            PriceColumn::Low => "Low",
            PriceColumn::Close => "Close",
            PriceColumn::AdjClose => "Adj Close",
        }
    }
}

impl fmt::Display for PriceColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl FromStr for PriceColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "open" => Ok(PriceColumn::Open),
            "high" => Ok(PriceColumn::High),
            "low" => Ok(PriceColumn::Low),
            "close" => Ok(PriceColumn::Close),
            "adjclose" | "adj" => Ok(PriceColumn::AdjClose),
            other => Err(format!("unknown price column '{other}'")),
        }
    }
}
