//! Cached, time-bounded access to a price source.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use marisk_core::{to_returns, AssetId, PriceColumn, PriceTable, ReturnSeries};
use tracing::{debug, info, warn};

use crate::cache::PriceCache;
use crate::error::{DataError, DataResult};
use crate::news::headlines_or_empty;
use crate::source::{Headline, HeadlineSource, PriceRequest, PriceSource};

/// Default fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Front door for market data.
///
/// Wraps a [`PriceSource`] with a [`PriceCache`] and a per-fetch timeout, and
/// optionally a [`HeadlineSource`].
pub struct MarketDataProvider {
    prices: Arc<dyn PriceSource>,
    headlines: Option<Arc<dyn HeadlineSource>>,
    cache: PriceCache,
    timeout: Duration,
}

impl std::fmt::Debug for MarketDataProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketDataProvider")
            .field("source", &self.prices.name())
            .field("cached", &self.cache.len())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl MarketDataProvider {
    /// Creates a provider with the default cache TTL and timeout.
    pub fn new(prices: Arc<dyn PriceSource>) -> Self {
        Self {
            prices,
            headlines: None,
            cache: PriceCache::default(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Sets the cache TTL, dropping anything already cached.
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = PriceCache::new(ttl);
        self
    }

    /// Sets the fetch timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attaches a headline source.
    #[must_use]
    pub fn with_headlines(mut self, headlines: Arc<dyn HeadlineSource>) -> Self {
        self.headlines = Some(headlines);
        self
    }

    /// The underlying cache.
    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    /// Fetches a price table, serving it from cache while fresh.
    pub async fn fetch(&self, request: &PriceRequest) -> DataResult<Arc<PriceTable>> {
        request.validate()?;

        if let Some(table) = self.cache.get(request) {
            debug!(symbol = %request.symbol, granularity = %request.granularity, "price cache hit");
            return Ok(table);
        }
        debug!(symbol = %request.symbol, source = self.prices.name(), "price cache miss");

        let fetched = tokio::time::timeout(self.timeout, self.prices.fetch_prices(request)).await;
        let table = match fetched {
            Ok(Ok(table)) => Arc::new(table),
            Ok(Err(e)) => {
                warn!(symbol = %request.symbol, error = %e, "price fetch failed");
                return Err(e);
            }
            Err(_) => {
                warn!(symbol = %request.symbol, timeout_secs = self.timeout.as_secs(), "price fetch timed out");
                return Err(DataError::Timeout {
                    symbol: request.symbol.to_string(),
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        info!(
            symbol = %request.symbol,
            bars = table.len(),
            start = %request.start,
            end = %request.end,
            "fetched prices"
        );
        self.cache.insert(request.clone(), Arc::clone(&table));
        Ok(table)
    }

    /// Fetches each symbol over the same range and converts the selected
    /// column to returns.
    ///
    /// Stops at the first symbol that fails.
    pub async fn fetch_returns(
        &self,
        symbols: &[AssetId],
        template: &PriceRequest,
        column: PriceColumn,
    ) -> DataResult<HashMap<AssetId, ReturnSeries>> {
        let mut out = HashMap::with_capacity(symbols.len());
        for symbol in symbols {
            let request = PriceRequest {
                symbol: symbol.clone(),
                ..template.clone()
            };
            let table = self.fetch(&request).await?;
            let returns = to_returns(&table.series(column)?)?;
            out.insert(symbol.clone(), returns);
        }
        Ok(out)
    }

    /// Best-effort headlines; empty without a headline source or on failure.
    pub async fn headlines(&self, symbol: &AssetId, limit: usize) -> Vec<Headline> {
        match &self.headlines {
            Some(source) => headlines_or_empty(source.as_ref(), symbol, limit).await,
            None => Vec::new(),
        }
    }

    /// Drops cached tables for `symbol`.
    pub fn invalidate(&self, symbol: &AssetId) {
        let removed = self.cache.invalidate(symbol);
        debug!(symbol = %symbol, removed, "invalidated cached prices");
    }

    /// Drops every cached table.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
