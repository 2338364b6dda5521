//! Headline sources.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use marisk_core::AssetId;
use serde::Deserialize;
use tracing::warn;

use crate::error::{DataError, DataResult};
use crate::source::{Headline, HeadlineSource};

/// Default number of headlines shown per symbol.
pub const DEFAULT_HEADLINE_LIMIT: usize = 3;

#[derive(Debug, Deserialize)]
struct HeadlineRecord {
    symbol: AssetId,
    title: String,
    link: String,
}

/// Reads headlines from a JSON array of `{symbol, title, link}` objects.
///
/// The file is read on every call, so edits show up without a restart.
pub struct JsonHeadlineSource {
    file_path: PathBuf,
}

impl JsonHeadlineSource {
    /// Create a new JSON headline source.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl HeadlineSource for JsonHeadlineSource {
    async fn fetch_headlines(&self, symbol: &AssetId) -> DataResult<Vec<Headline>> {
        let content = tokio::fs::read_to_string(&self.file_path)
            .await
            .map_err(|e| DataError::io(self.file_path.display(), e))?;

        let records: Vec<HeadlineRecord> = serde_json::from_str(&content)
            .map_err(|e| DataError::parse(self.file_path.display(), e))?;

        Ok(records
            .into_iter()
            .filter(|r| &r.symbol == symbol)
            .map(|r| Headline {
                title: r.title,
                link: r.link,
            })
            .collect())
    }
}

/// Fetches up to `limit` headlines, logging and swallowing any failure.
pub async fn headlines_or_empty(
    source: &dyn HeadlineSource,
    symbol: &AssetId,
    limit: usize,
) -> Vec<Headline> {
    match source.fetch_headlines(symbol).await {
        Ok(mut headlines) => {
            headlines.truncate(limit);
            headlines
        }
        Err(e) => {
            warn!(symbol = %symbol, error = %e, "headline fetch failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEWS: &str = r#"[
        {"symbol": "FRPT", "title": "Freshpet beats estimates", "link": "https://example.com/1"},
        {"symbol": "aapl", "title": "Apple ships a thing", "link": "https://example.com/2"},
        {"symbol": "FRPT", "title": "Freshpet expands capacity", "link": "https://example.com/3"},
        {"symbol": "FRPT", "title": "Analysts upgrade Freshpet", "link": "https://example.com/4"},
        {"symbol": "FRPT", "title": "Freshpet CEO interview", "link": "https://example.com/5"}
    ]"#;

    #[tokio::test]
    async fn test_filters_by_symbol() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), NEWS).unwrap();
        let source = JsonHeadlineSource::new(file.path());

        let apple = source.fetch_headlines(&AssetId::new("AAPL")).await.unwrap();
        assert_eq!(apple.len(), 1);
        assert_eq!(apple[0].title, "Apple ships a thing");

        let frpt = headlines_or_empty(&source, &AssetId::new("frpt"), DEFAULT_HEADLINE_LIMIT).await;
        assert_eq!(frpt.len(), 3);
        assert_eq!(frpt[0].link, "https://example.com/1");
    }

    #[tokio::test]
    async fn test_failure_is_empty() {
        let source = JsonHeadlineSource::new("/nonexistent/news.json");
        assert!(source.fetch_headlines(&AssetId::new("X")).await.is_err());
        assert!(headlines_or_empty(&source, &AssetId::new("X"), 3).await.is_empty());
    }
}
