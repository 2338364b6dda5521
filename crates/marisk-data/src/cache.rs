//! TTL cache for fetched price tables.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use marisk_core::{AssetId, PriceTable};

use crate::source::PriceRequest;

/// Default time-to-live for cached tables.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
struct CacheEntry {
    table: Arc<PriceTable>,
    inserted: Instant,
}

/// Price tables keyed by request, expiring after a fixed TTL.
///
/// Only successful fetches are stored. A zero TTL disables caching.
#[derive(Debug)]
pub struct PriceCache {
    entries: DashMap<PriceRequest, CacheEntry>,
    ttl: Duration,
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl PriceCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Time-to-live of an entry.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached table if present and not expired.
    ///
    /// Expired entries are evicted on access.
    #[must_use]
    pub fn get(&self, request: &PriceRequest) -> Option<Arc<PriceTable>> {
        let fresh = self
            .entries
            .get(request)
            .filter(|e| e.inserted.elapsed() < self.ttl)
            .map(|e| Arc::clone(&e.table));
        if fresh.is_none() {
            self.entries.remove(request);
        }
        fresh
    }

    /// Stores a table.
    pub fn insert(&self, request: PriceRequest, table: Arc<PriceTable>) {
        if self.ttl.is_zero() {
            return;
        }
        self.entries.insert(
            request,
            CacheEntry {
                table,
                inserted: Instant::now(),
            },
        );
    }

    /// Removes every entry for `symbol`. Returns the number removed.
    pub fn invalidate(&self, symbol: &AssetId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|k, _| &k.symbol != symbol);
        before - self.entries.len()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
