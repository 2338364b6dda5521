//! Portfolio command implementation.
//!
//! Edits portfolio files and analyzes a weighted set of symbols. Each
//! analysis section is computed on its own; a failing section is reported as
//! a warning and the others still print.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};
use marisk_core::{AssetId, ReturnSeries, RiskResult};
use marisk_portfolio::{
    correlation_matrix, portfolio_returns, risk_contributions, AssetReturns, CorrelationMatrix,
    PortfolioSpec, RiskContributions,
};
use marisk_risk::var::{historical_var, parametric_var, RiskEstimate};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style, Tabled};
use tracing::debug;

use crate::cli::{OutputFormat, RangeArgs};
use crate::commands::{parse_confidence, parse_symbol, ResolvedRange};
use crate::context::Context;
use crate::error::{CliError, CliResult};
use crate::output::{
    format_percent, print_header, print_info, print_json, print_output, print_success,
    print_warning, KeyValue,
};

/// Arguments for the portfolio command.
#[derive(Args, Debug)]
pub struct PortfolioArgs {
    #[command(subcommand)]
    pub command: PortfolioCommand,
}

/// Portfolio subcommands.
#[derive(Subcommand, Debug)]
pub enum PortfolioCommand {
    /// Returns, VaR, risk contributions and correlations of a portfolio
    Analyze(AnalyzeArgs),

    /// Create a portfolio file with one blank asset
    Init(FileArgs),

    /// Show the entries of a portfolio file and whether it is valid
    Show(FileArgs),

    /// Append an asset with weight 0
    Add(AddArgs),

    /// Remove the asset at a 1-based position
    Remove(RemoveArgs),

    /// Change the symbol and/or weight at a 1-based position
    Set(SetArgs),
}

/// Where a portfolio comes from: a file or inline flags.
#[derive(Args, Debug, Clone, Default)]
pub struct PortfolioInput {
    /// Portfolio file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(long, conflicts_with = "assets")]
    pub file: Option<PathBuf>,

    /// Asset symbol; repeat for each asset
    #[arg(short = 'a', long = "asset")]
    pub assets: Vec<String>,

    /// Weight of the asset at the same position; equal weights if omitted
    #[arg(short = 'w', long = "weight", requires = "assets")]
    pub weights: Vec<f64>,
}

impl PortfolioInput {
    /// Returns true if neither a file nor assets were given.
    pub fn is_empty(&self) -> bool {
        self.file.is_none() && self.assets.is_empty()
    }

    /// Builds the spec. The result is not validated.
    pub fn load(&self) -> CliResult<PortfolioSpec> {
        if let Some(path) = &self.file {
            return read_spec(path);
        }
        if self.assets.is_empty() {
            return Err(CliError::MissingArgument(
                "--file or at least one --asset".into(),
            ));
        }

        let weights = if self.weights.is_empty() {
            vec![1.0 / self.assets.len() as f64; self.assets.len()]
        } else if self.weights.len() == self.assets.len() {
            self.weights.clone()
        } else {
            return Err(CliError::InvalidArgument(format!(
                "{} assets but {} weights",
                self.assets.len(),
                self.weights.len()
            )));
        };

        Ok(PortfolioSpec::from_pairs(
            self.assets.iter().map(String::as_str).zip(weights),
        ))
    }
}

/// Arguments for `portfolio analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: PortfolioInput,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Confidence level, as a percentage (95) or fraction (0.95)
    #[arg(short, long)]
    pub confidence: Option<f64>,
}

/// A portfolio file argument.
#[derive(Args, Debug)]
pub struct FileArgs {
    /// Portfolio file (JSON, or YAML with a .yaml/.yml extension)
    pub file: PathBuf,
}

/// Arguments for `portfolio add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Portfolio file
    pub file: PathBuf,

    /// Symbol to append
    pub symbol: String,
}

/// Arguments for `portfolio remove`.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Portfolio file
    pub file: PathBuf,

    /// Position of the asset, starting at 1
    pub position: usize,
}

/// Arguments for `portfolio set`.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Portfolio file
    pub file: PathBuf,

    /// Position of the asset, starting at 1
    pub position: usize,

    /// New symbol
    #[arg(long)]
    pub symbol: Option<String>,

    /// New weight, between 0 and 1
    #[arg(long)]
    pub weight: Option<f64>,
}

#[derive(Debug, Serialize, Tabled)]
struct EntryRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Weight")]
    weight: String,
}

#[derive(Debug, Serialize, Tabled)]
struct ContributionRow {
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Ann. Volatility")]
    volatility: String,
    #[tabled(rename = "Contribution")]
    contribution: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Everything `portfolio analyze` computes. Failed sections are `None`.
#[derive(Debug, Serialize)]
struct PortfolioAnalysis {
    spec: PortfolioSpec,
    observations: Option<usize>,
    #[serde(skip)]
    returns: Option<ReturnSeries>,
    historical_var: Option<RiskEstimate>,
    parametric_var: Option<RiskEstimate>,
    contributions: Option<RiskContributions>,
    correlation: Option<CorrelationMatrix>,
    warnings: Vec<String>,
}

/// Execute the portfolio command.
pub async fn execute(args: PortfolioArgs, ctx: &Context) -> Result<()> {
    match args.command {
        PortfolioCommand::Analyze(analyze) => execute_analyze(analyze, ctx).await,
        PortfolioCommand::Init(file) => execute_init(&file.file),
        PortfolioCommand::Show(file) => execute_show(&file.file, ctx.format),
        PortfolioCommand::Add(add) => execute_add(add),
        PortfolioCommand::Remove(remove) => execute_remove(remove),
        PortfolioCommand::Set(set) => execute_set(set),
    }
}

/// Validates the spec, then fetches returns for every asset.
pub async fn load_asset_returns(
    spec: &PortfolioSpec,
    range: &ResolvedRange,
    ctx: &Context,
) -> Result<AssetReturns> {
    spec.validate()?;
    let assets = spec.assets();
    let returns = ctx
        .provider()
        .fetch_returns(&assets, &range.request(assets[0].clone()), range.column)
        .await?;
    debug!(assets = assets.len(), "fetched portfolio returns");
    Ok(returns)
}

async fn execute_analyze(args: AnalyzeArgs, ctx: &Context) -> Result<()> {
    let spec = args.input.load()?;
    let range = args.range.resolve(&ctx.config)?;
    let confidence =
        parse_confidence(args.confidence.unwrap_or(ctx.config.confidence_level))?;

    let asset_returns = load_asset_returns(&spec, &range, ctx).await?;
    let analysis = analyze(
        spec,
        &asset_returns,
        confidence,
        range.granularity.periods_per_year(),
    );

    for warning in &analysis.warnings {
        print_warning(warning);
    }

    match ctx.format {
        OutputFormat::Table => print_analysis_table(&analysis, confidence)?,
        OutputFormat::Json => print_json(&analysis)?,
        OutputFormat::Csv => {
            if let Some(returns) = &analysis.returns {
                marisk_data::write_returns_csv(std::io::stdout(), returns)?;
            }
        }
        OutputFormat::Minimal => {
            if let Some(var) = &analysis.historical_var {
                println!("{:.6}", var.value);
            }
        }
    }

    Ok(())
}

/// Runs every analysis section, collecting failures as warnings.
fn analyze(
    spec: PortfolioSpec,
    asset_returns: &AssetReturns,
    confidence: f64,
    periods_per_year: u32,
) -> PortfolioAnalysis {
    let mut warnings = Vec::new();

    let returns = section(
        &mut warnings,
        "Portfolio returns",
        portfolio_returns(asset_returns, &spec),
    );
    let values = returns.as_ref().map(ReturnSeries::values);

    let historical = values.as_ref().and_then(|v| {
        section(&mut warnings, "Historical VaR", historical_var(v, confidence))
    });
    let parametric = values.as_ref().and_then(|v| {
        section(&mut warnings, "Parametric VaR", parametric_var(v, confidence))
    });
    let contributions = section(
        &mut warnings,
        "Risk contributions",
        risk_contributions(asset_returns, &spec, periods_per_year),
    );
    let correlation = section(
        &mut warnings,
        "Correlation",
        correlation_matrix(asset_returns, &spec.assets()),
    );

    PortfolioAnalysis {
        observations: returns.as_ref().map(ReturnSeries::len),
        returns,
        historical_var: historical,
        parametric_var: parametric,
        contributions,
        correlation,
        spec,
        warnings,
    }
}

fn section<T>(warnings: &mut Vec<String>, name: &str, result: RiskResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warnings.push(format!("{name}: {e}"));
            None
        }
    }
}

fn print_analysis_table(analysis: &PortfolioAnalysis, confidence: f64) -> Result<()> {
    let pct = confidence * 100.0;

    print_header("Portfolio");
    print_output(&entry_rows(&analysis.spec), OutputFormat::Table)?;

    let mut metrics = Vec::new();
    if let Some(n) = analysis.observations {
        metrics.push(KeyValue::new("Aligned Returns", n.to_string()));
    }
    for estimate in [&analysis.historical_var, &analysis.parametric_var]
        .into_iter()
        .flatten()
    {
        metrics.push(KeyValue::from_percent(
            format!("{} ({:.0}%)", estimate.method, pct),
            estimate.value,
        ));
    }
    if !metrics.is_empty() {
        print_header("Portfolio Risk");
        print_output(&metrics, OutputFormat::Table)?;
    }

    if let Some(contributions) = &analysis.contributions {
        let rows: Vec<ContributionRow> = contributions
            .by_asset
            .iter()
            .map(|c| ContributionRow {
                asset: c.asset.to_string(),
                weight: format_percent(c.weight),
                volatility: format_percent(c.annualized_volatility),
                contribution: format!("{:.4}", c.contribution),
                share: format!("{:.1}%", c.contribution_pct),
            })
            .collect();
        print_header("Risk Contributions");
        print_output(&rows, OutputFormat::Table)?;
        if let Some(top) = contributions.top_contributors(1).first() {
            print_info(&format!(
                "{} contributes the most risk ({:.1}% of the total).",
                top.asset, top.contribution_pct
            ));
        }
    }

    if let Some(matrix) = &analysis.correlation {
        print_header("Correlation");
        println!("{}", correlation_table(matrix));
    }

    Ok(())
}

fn correlation_table(matrix: &CorrelationMatrix) -> String {
    let mut builder = Builder::default();
    let mut header = vec![String::new()];
    header.extend(matrix.assets.iter().map(AssetId::to_string));
    builder.push_record(header);

    for (asset, row) in matrix.assets.iter().zip(&matrix.values) {
        let mut record = vec![asset.to_string()];
        record.extend(row.iter().map(|v| format!("{v:.3}")));
        builder.push_record(record);
    }

    builder.build().with(Style::rounded()).to_string()
}

fn entry_rows(spec: &PortfolioSpec) -> Vec<EntryRow> {
    spec.entries()
        .iter()
        .enumerate()
        .map(|(i, e)| EntryRow {
            position: i + 1,
            asset: if e.asset.is_blank() {
                "(blank)".to_string()
            } else {
                e.asset.to_string()
            },
            weight: format!("{:.4}", e.weight),
        })
        .collect()
}

fn execute_init(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(CliError::InvalidArgument(format!("{} already exists", path.display())).into());
    }
    write_spec(path, &PortfolioSpec::default())?;
    print_success(&format!("Created {}", path.display()));
    Ok(())
}

fn execute_show(path: &Path, format: OutputFormat) -> Result<()> {
    let spec = read_spec(path)?;
    let status = spec.validate();

    match format {
        OutputFormat::Table => {
            print_header(&format!("Portfolio {}", path.display()));
            print_output(&entry_rows(&spec), format)?;
            println!("Total weight: {:.4}", spec.total_weight());
            match &status {
                Ok(()) => print_success("Portfolio is valid"),
                Err(e) => print_warning(&e.to_string()),
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "entries": spec.entries(),
                "total_weight": spec.total_weight(),
                "valid": status.is_ok(),
                "error": status.as_ref().err().map(ToString::to_string),
            });
            print_json(&output)?;
        }
        OutputFormat::Csv => print_output(&entry_rows(&spec), format)?,
        OutputFormat::Minimal => println!("{}", if status.is_ok() { "valid" } else { "invalid" }),
    }
    Ok(())
}

fn execute_add(args: AddArgs) -> Result<()> {
    let mut spec = read_spec(&args.file)?;
    let symbol = parse_symbol(&args.symbol)?;
    spec.add_asset(symbol.clone());
    write_spec(&args.file, &spec)?;
    print_success(&format!("Added {} at position {} with weight 0", symbol, spec.len()));
    report_validity(&spec);
    Ok(())
}

fn execute_remove(args: RemoveArgs) -> Result<()> {
    let mut spec = read_spec(&args.file)?;
    let removed = spec.remove_asset(position_to_index(args.position)?)?;
    write_spec(&args.file, &spec)?;
    print_success(&format!("Removed {}", removed.asset));
    report_validity(&spec);
    Ok(())
}

fn execute_set(args: SetArgs) -> Result<()> {
    if args.symbol.is_none() && args.weight.is_none() {
        return Err(CliError::MissingArgument("--symbol or --weight".into()).into());
    }

    let mut spec = read_spec(&args.file)?;
    let index = position_to_index(args.position)?;
    if let Some(symbol) = &args.symbol {
        spec.set_asset(index, parse_symbol(symbol)?)?;
    }
    if let Some(weight) = args.weight {
        spec.set_weight(index, weight)?;
    }
    write_spec(&args.file, &spec)?;

    let entry = &spec.entries()[index];
    print_success(&format!(
        "Position {}: {} with weight {:.4}",
        args.position, entry.asset, entry.weight
    ));
    report_validity(&spec);
    Ok(())
}

fn report_validity(spec: &PortfolioSpec) {
    if let Err(e) = spec.validate() {
        print_warning(&e.to_string());
    }
}

fn position_to_index(position: usize) -> CliResult<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| CliError::InvalidArgument("positions start at 1".into()))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

/// Reads a portfolio file. The result is not validated.
pub fn read_spec(path: &Path) -> CliResult<PortfolioSpec> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::InvalidArgument(format!("{}: {}", path.display(), e)))?;
    if is_yaml(path) {
        Ok(serde_yaml::from_str(&content)?)
    } else {
        Ok(PortfolioSpec::from_json(&content)?)
    }
}

/// Writes a portfolio file in the format its extension implies.
pub fn write_spec(path: &Path, spec: &PortfolioSpec) -> CliResult<()> {
    let content = if is_yaml(path) {
        serde_yaml::to_string(spec)?
    } else {
        spec.to_json()?
    };
    std::fs::write(path, content)?;
    Ok(())
}
