//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::commands::{
    ConfigArgs, NewsArgs, PortfolioArgs, PricesArgs, ReturnsArgs, RiskArgs, StressArgs,
};

/// Marisk - market risk dashboard for the command line
#[derive(Parser, Debug)]
#[command(name = "marisk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding <SYMBOL>.csv price files
    #[arg(long, global = true, env = "MARISK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// JSON file of news headlines
    #[arg(long, global = true, env = "MARISK_NEWS_FILE")]
    pub news_file: Option<PathBuf>,

    /// Configuration file to use instead of the default location
    #[arg(long, global = true, env = "MARISK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show price history, key metrics and cumulative returns for a symbol
    Prices(PricesArgs),

    /// Show or export the periodic returns of a symbol
    Returns(ReturnsArgs),

    /// Compute VaR, CVaR and volatility for a symbol
    Risk(RiskArgs),

    /// Analyze a weighted portfolio of symbols
    Portfolio(PortfolioArgs),

    /// Run stress scenarios against a symbol or portfolio
    Stress(StressArgs),

    /// Show the latest headlines for a symbol
    News(NewsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Date range and sampling shared by the data commands.
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// First date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub start: Option<String>,

    /// Last date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub end: Option<String>,

    /// Sampling interval: daily, weekly or monthly
    #[arg(short, long, default_value = "daily")]
    pub granularity: String,

    /// Price column used for returns: close, adj-close, open, high, low
    #[arg(long, default_value = "adj-close")]
    pub column: String,
}

/// Output format options
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}

impl OutputFormat {
    /// Lowercase name as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Minimal => "minimal",
        }
    }
}
