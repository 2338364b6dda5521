//! Settings resolved from flags, environment and the config file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use marisk_data::{CsvPriceSource, JsonHeadlineSource, MarketDataProvider};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::config::{default_config_path, DashboardConfig};
use crate::error::CliResult;

/// Everything a command needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: DashboardConfig,
    pub config_path: PathBuf,
    pub format: OutputFormat,
    pub data_dir: PathBuf,
    pub news_file: Option<PathBuf>,
    provider: Arc<MarketDataProvider>,
}

impl Context {
    /// Flags and their environment fallbacks override the config file.
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        let config_path = match &cli.config {
            Some(path) => path.clone(),
            None => default_config_path()?,
        };
        let config = DashboardConfig::load(&config_path)?;
        debug!(path = %config_path.display(), "loaded configuration");

        let data_dir = cli.data_dir.clone().unwrap_or_else(|| config.data_dir.clone());
        let news_file = cli.news_file.clone().or_else(|| config.news_file.clone());
        let provider = Arc::new(build_provider(&config, &data_dir, news_file.as_deref()));

        Ok(Self {
            format: cli.format.unwrap_or(config.format),
            data_dir,
            news_file,
            config_path,
            config,
            provider,
        })
    }

    /// File-backed provider shared by every fetch in this invocation.
    pub fn provider(&self) -> &MarketDataProvider {
        &self.provider
    }

    /// Seeded generator when a seed is given or configured, fresh entropy
    /// otherwise.
    pub fn rng(&self, seed: Option<u64>) -> StdRng {
        match seed.or(self.config.seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn build_provider(
    config: &DashboardConfig,
    data_dir: &Path,
    news_file: Option<&Path>,
) -> MarketDataProvider {
    let provider = MarketDataProvider::new(Arc::new(CsvPriceSource::new(data_dir)))
        .with_cache_ttl(config.cache_ttl())
        .with_timeout(config.fetch_timeout());
    match news_file {
        Some(path) => provider.with_headlines(Arc::new(JsonHeadlineSource::new(path))),
        None => provider,
    }
}
