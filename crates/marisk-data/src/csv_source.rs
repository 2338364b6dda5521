//! CSV price files, one per symbol.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use marisk_core::{AssetId, Granularity, PriceBar, PriceTable};
use tracing::debug;

use crate::error::{DataError, DataResult};
use crate::source::{PriceRequest, PriceSource};

/// Reads `<SYMBOL>.csv` files from a directory.
///
/// Files carry daily bars with the header
/// `Date,Open,High,Low,Close,Adj Close,Volume`. Rows may be in any order; a
/// repeated date is a parse error. Parsed files are kept in memory until
/// [`reload`](Self::reload) or [`clear`](Self::clear).
pub struct CsvPriceSource {
    dir: PathBuf,
    bars: DashMap<AssetId, Arc<Vec<PriceBar>>>,
}

impl CsvPriceSource {
    /// Create a new CSV price source rooted at `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            bars: DashMap::new(),
        }
    }

    /// Directory the files are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `symbol`.
    pub fn path_for(&self, symbol: &AssetId) -> PathBuf {
        self.dir.join(format!("{}.csv", symbol.as_str()))
    }

    /// Re-reads the file for `symbol`.
    pub async fn reload(&self, symbol: &AssetId) -> DataResult<()> {
        let bars = self.read_file(symbol).await?;
        self.bars.insert(symbol.clone(), Arc::new(bars));
        Ok(())
    }

    /// Drops every parsed file.
    pub fn clear(&self) {
        self.bars.clear();
    }

    async fn load(&self, symbol: &AssetId) -> DataResult<Arc<Vec<PriceBar>>> {
        if let Some(bars) = self.bars.get(symbol) {
            return Ok(bars.value().clone());
        }
        let bars = Arc::new(self.read_file(symbol).await?);
        self.bars.insert(symbol.clone(), Arc::clone(&bars));
        Ok(bars)
    }

    async fn read_file(&self, symbol: &AssetId) -> DataResult<Vec<PriceBar>> {
        let path = self.path_for(symbol);
        let content = match tokio::fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DataError::NotFound {
                    symbol: symbol.to_string(),
                })
            }
            Err(e) => return Err(DataError::io(path.display(), e)),
        };

        let bars = parse_bars(&content).map_err(|e| DataError::parse(path.display(), e))?;
        debug!(symbol = %symbol, path = %path.display(), bars = bars.len(), "loaded price file");
        Ok(bars)
    }
}

/// Parses CSV bars and sorts them by date.
fn parse_bars(content: &[u8]) -> Result<Vec<PriceBar>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content);

    let mut bars = reader
        .deserialize::<PriceBar>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;

    bars.sort_by_key(|b| b.date);
    if let Some(w) = bars.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(format!("duplicate row for {}", w[0].date));
    }
    Ok(bars)
}

#[async_trait]
impl PriceSource for CsvPriceSource {
    fn name(&self) -> &str {
        "csv"
    }

    async fn fetch_prices(&self, request: &PriceRequest) -> DataResult<PriceTable> {
        request.validate()?;
        let bars = self.load(&request.symbol).await?;

        let table = PriceTable::new(request.symbol.clone(), Granularity::Daily, bars.to_vec())?
            .between(request.start, request.end)
            .resample(request.granularity);

        if table.is_empty() {
            return Err(DataError::Empty {
                symbol: request.symbol.to_string(),
                start: request.start.to_string(),
                end: request.end.to_string(),
            });
        }
        Ok(table)
    }
}
