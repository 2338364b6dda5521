//! Provider traits and request types.

use async_trait::async_trait;
use chrono::NaiveDate;
use marisk_core::{AssetId, Granularity, PriceTable};
use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

/// A request for one symbol's price history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRequest {
    /// Symbol to fetch.
    pub symbol: AssetId,
    /// First date, inclusive.
    pub start: NaiveDate,
    /// Last date, inclusive.
    pub end: NaiveDate,
    /// Bar granularity.
    pub granularity: Granularity,
}

impl PriceRequest {
    /// Creates a daily request.
    #[must_use]
    pub fn new(symbol: impl Into<AssetId>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            end,
            granularity: Granularity::Daily,
        }
    }

    /// Sets the granularity.
    #[must_use]
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Checks the symbol is set and the range is ordered.
    pub fn validate(&self) -> DataResult<()> {
        if self.symbol.is_blank() {
            return Err(DataError::InvalidRequest("symbol is blank".into()));
        }
        if self.start > self.end {
            return Err(DataError::InvalidRequest(format!(
                "start {} is after end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

/// A news headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    /// Headline text.
    pub title: String,
    /// Article URL.
    pub link: String,
}

/// Source of historical OHLCV prices.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetches the bars covering `request`.
    ///
    /// Implementations return [`DataError::Empty`] rather than an empty table.
    async fn fetch_prices(&self, request: &PriceRequest) -> DataResult<PriceTable>;
}

/// Source of news headlines per symbol.
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    /// Fetches headlines for `symbol`, most relevant first.
    async fn fetch_headlines(&self, symbol: &AssetId) -> DataResult<Vec<Headline>>;
}
