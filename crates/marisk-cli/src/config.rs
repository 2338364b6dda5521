//! Dashboard configuration stored as JSON in the user config directory.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;
use marisk_core::RiskError;
use marisk_risk::var::{MonteCarloConfig, SimulationModel, DEFAULT_SIMULATIONS};
use marisk_risk::volatility::DEFAULT_WINDOW;
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;
use crate::commands::parse_date;
use crate::error::{CliError, CliResult};

/// Persistent dashboard settings.
///
/// Missing fields fall back to their defaults, so a partial file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub news_file: Option<PathBuf>,
    pub default_start: NaiveDate,
    pub default_end: NaiveDate,
    pub confidence_level: f64,
    pub rolling_window: usize,
    pub simulations: usize,
    pub simulation_model: SimulationModel,
    pub seed: Option<u64>,
    pub cache_ttl_secs: u64,
    pub fetch_timeout_secs: u64,
    pub format: OutputFormat,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            news_file: None,
            default_start: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or(NaiveDate::MIN),
            default_end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap_or(NaiveDate::MAX),
            confidence_level: 0.95,
            rolling_window: DEFAULT_WINDOW,
            simulations: DEFAULT_SIMULATIONS,
            simulation_model: SimulationModel::Normal,
            seed: None,
            cache_ttl_secs: 3600,
            fetch_timeout_secs: 30,
            format: OutputFormat::Table,
        }
    }
}

impl DashboardConfig {
    /// Loads the file at `path`, or defaults if it does not exist.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Writes the configuration, creating parent directories.
    pub fn save(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Monte Carlo settings derived from the configuration.
    pub fn monte_carlo(&self) -> MonteCarloConfig {
        MonteCarloConfig::default()
            .with_simulations(self.simulations)
            .with_model(self.simulation_model)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::DataDir => self.data_dir.display().to_string(),
            ConfigKey::NewsFile => self
                .news_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            ConfigKey::DefaultStart => self.default_start.to_string(),
            ConfigKey::DefaultEnd => self.default_end.to_string(),
            ConfigKey::ConfidenceLevel => self.confidence_level.to_string(),
            ConfigKey::RollingWindow => self.rolling_window.to_string(),
            ConfigKey::Simulations => self.simulations.to_string(),
            ConfigKey::SimulationModel => model_name(self.simulation_model).to_string(),
            ConfigKey::Seed => self.seed.map(|s| s.to_string()).unwrap_or_default(),
            ConfigKey::CacheTtl => self.cache_ttl_secs.to_string(),
            ConfigKey::FetchTimeout => self.fetch_timeout_secs.to_string(),
            ConfigKey::Format => self.format.as_str().to_string(),
        }
    }

    /// Parses and stores `value` under `key`.
    ///
    /// An empty value clears the optional keys.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> CliResult<()> {
        let value = value.trim();
        match key {
            ConfigKey::DataDir => {
                if value.is_empty() {
                    return Err(invalid(key, value, "path must not be empty"));
                }
                self.data_dir = PathBuf::from(value);
            }
            ConfigKey::NewsFile => {
                self.news_file = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            ConfigKey::DefaultStart => self.default_start = parse_date(value)?,
            ConfigKey::DefaultEnd => self.default_end = parse_date(value)?,
            ConfigKey::ConfidenceLevel => {
                let c = parse_number::<f64>(key, value)?;
                RiskError::check_confidence(c)?;
                self.confidence_level = c;
            }
            ConfigKey::RollingWindow => {
                let w = parse_number::<usize>(key, value)?;
                if w < 2 {
                    return Err(invalid(key, value, "window must be at least 2"));
                }
                self.rolling_window = w;
            }
            ConfigKey::Simulations => {
                let n = parse_number::<usize>(key, value)?;
                if n == 0 {
                    return Err(invalid(key, value, "must be positive"));
                }
                self.simulations = n;
            }
            ConfigKey::SimulationModel => self.simulation_model = parse_model(value)?,
            ConfigKey::Seed => {
                self.seed = if value.is_empty() {
                    None
                } else {
                    Some(parse_number::<u64>(key, value)?)
                };
            }
            ConfigKey::CacheTtl => self.cache_ttl_secs = parse_number(key, value)?,
            ConfigKey::FetchTimeout => {
                let secs = parse_number::<u64>(key, value)?;
                if secs == 0 {
                    return Err(invalid(key, value, "must be positive"));
                }
                self.fetch_timeout_secs = secs;
            }
            ConfigKey::Format => {
                self.format = match value.to_lowercase().as_str() {
                    "table" => OutputFormat::Table,
                    "json" => OutputFormat::Json,
                    "csv" => OutputFormat::Csv,
                    "minimal" => OutputFormat::Minimal,
                    _ => return Err(invalid(key, value, "use table, json, csv, or minimal")),
                };
            }
        }
        Ok(())
    }

    /// Restores the default value of `key`.
    pub fn reset(&mut self, key: ConfigKey) -> CliResult<()> {
        self.set(key, &Self::default().get(key))
    }
}

/// Keys accepted by `marisk config get|set|reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    DataDir,
    NewsFile,
    DefaultStart,
    DefaultEnd,
    ConfidenceLevel,
    RollingWindow,
    Simulations,
    SimulationModel,
    Seed,
    CacheTtl,
    FetchTimeout,
    Format,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataDir => "data_dir",
            Self::NewsFile => "news_file",
            Self::DefaultStart => "default_start",
            Self::DefaultEnd => "default_end",
            Self::ConfidenceLevel => "confidence_level",
            Self::RollingWindow => "rolling_window",
            Self::Simulations => "simulations",
            Self::SimulationModel => "simulation_model",
            Self::Seed => "seed",
            Self::CacheTtl => "cache_ttl_secs",
            Self::FetchTimeout => "fetch_timeout_secs",
            Self::Format => "format",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::DataDir => "Directory holding <SYMBOL>.csv price files",
            Self::NewsFile => "JSON file of {symbol, title, link} headlines (empty for none)",
            Self::DefaultStart => "Start date when --start is omitted (YYYY-MM-DD)",
            Self::DefaultEnd => "End date when --end is omitted (YYYY-MM-DD)",
            Self::ConfidenceLevel => "VaR confidence level, strictly between 0 and 1",
            Self::RollingWindow => "Rolling volatility window in periods (>= 2)",
            Self::Simulations => "Monte Carlo sample size",
            Self::SimulationModel => "Monte Carlo model (normal, bootstrap)",
            Self::Seed => "Monte Carlo seed (empty for a fresh seed each run)",
            Self::CacheTtl => "Price cache lifetime in seconds (0 disables caching)",
            Self::FetchTimeout => "Price fetch timeout in seconds",
            Self::Format => "Default output format (table, json, csv, minimal)",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::DataDir,
            Self::NewsFile,
            Self::DefaultStart,
            Self::DefaultEnd,
            Self::ConfidenceLevel,
            Self::RollingWindow,
            Self::Simulations,
            Self::SimulationModel,
            Self::Seed,
            Self::CacheTtl,
            Self::FetchTimeout,
            Self::Format,
        ]
    }
}

impl FromStr for ConfigKey {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.to_lowercase().replace('-', "_").as_str() {
            "data_dir" | "data" => Self::DataDir,
            "news_file" | "news" => Self::NewsFile,
            "default_start" | "start" => Self::DefaultStart,
            "default_end" | "end" => Self::DefaultEnd,
            "confidence_level" | "confidence" => Self::ConfidenceLevel,
            "rolling_window" | "window" => Self::RollingWindow,
            "simulations" | "num_simulations" => Self::Simulations,
            "simulation_model" | "model" => Self::SimulationModel,
            "seed" => Self::Seed,
            "cache_ttl_secs" | "cache_ttl" => Self::CacheTtl,
            "fetch_timeout_secs" | "fetch_timeout" | "timeout" => Self::FetchTimeout,
            "format" | "default_format" => Self::Format,
            _ => return Err(CliError::Config(format!("Unknown configuration key: {s}"))),
        };
        Ok(key)
    }
}

/// Default configuration file: `<config dir>/marisk/config.json`.
pub fn default_config_path() -> CliResult<PathBuf> {
    let base = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| CliError::Config("Could not determine config directory".into()))?;
    Ok(base.join("marisk").join("config.json"))
}

pub fn parse_model(value: &str) -> CliResult<SimulationModel> {
    match value.to_lowercase().as_str() {
        "normal" => Ok(SimulationModel::Normal),
        "bootstrap" => Ok(SimulationModel::Bootstrap),
        _ => Err(CliError::InvalidArgument(format!(
            "simulation model '{value}' (use normal or bootstrap)"
        ))),
    }
}

fn model_name(model: SimulationModel) -> &'static str {
    match model {
        SimulationModel::Normal => "normal",
        SimulationModel::Bootstrap => "bootstrap",
    }
}

fn parse_number<T: FromStr>(key: ConfigKey, value: &str) -> CliResult<T> {
    value
        .parse()
        .map_err(|_| invalid(key, value, "not a valid number"))
}

fn invalid(key: ConfigKey, value: &str, reason: &str) -> CliError {
    CliError::Config(format!("Invalid {} '{}': {}", key.as_str(), value, reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_every_default_round_trips_through_get_set() {
        let mut config = DashboardConfig::default();
        for key in ConfigKey::all() {
            let value = config.get(*key);
            config.set(*key, &value).unwrap();
        }
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_key_aliases() {
        assert_eq!("confidence".parse::<ConfigKey>().unwrap(), ConfigKey::ConfidenceLevel);
        assert_eq!("cache-ttl".parse::<ConfigKey>().unwrap(), ConfigKey::CacheTtl);
        assert!("currency".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn test_set_validates() {
        let mut config = DashboardConfig::default();
        assert!(config.set(ConfigKey::ConfidenceLevel, "1.5").is_err());
        assert!(config.set(ConfigKey::RollingWindow, "1").is_err());
        assert!(config.set(ConfigKey::Simulations, "0").is_err());
        assert!(config.set(ConfigKey::SimulationModel, "garch").is_err());
        assert!(config.set(ConfigKey::DefaultStart, "2024/01/01").is_err());
        assert_eq!(config, DashboardConfig::default());

        config.set(ConfigKey::Seed, "42").unwrap();
        assert_eq!(config.seed, Some(42));
        config.set(ConfigKey::Seed, "").unwrap();
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_reset_single_key() {
        let mut config = DashboardConfig::default();
        config.set(ConfigKey::NewsFile, "news.json").unwrap();
        config.set(ConfigKey::ConfidenceLevel, "0.99").unwrap();

        config.reset(ConfigKey::NewsFile).unwrap();
        config.reset(ConfigKey::ConfidenceLevel).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_save_and_load_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        assert_eq!(DashboardConfig::load(&path).unwrap(), DashboardConfig::default());

        let mut config = DashboardConfig::default();
        config.set(ConfigKey::Simulations, "500").unwrap();
        config.save(&path).unwrap();
        assert_eq!(DashboardConfig::load(&path).unwrap().simulations, 500);

        std::fs::write(&path, r#"{"rolling_window": 10}"#).unwrap();
        let loaded = DashboardConfig::load(&path).unwrap();
        assert_eq!(loaded.rolling_window, 10);
        assert_eq!(loaded.confidence_level, 0.95);
    }
}
