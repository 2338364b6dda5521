//! Risk command implementation.
//!
//! Computes historical, parametric and Monte Carlo VaR, CVaR and volatility
//! for one symbol.

use anyhow::Result;
use clap::Args;
use marisk_core::to_returns;
use marisk_risk::report::{risk_report, RiskReportConfig};
use marisk_risk::volatility::rolling_volatility;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{OutputFormat, RangeArgs};
use crate::commands::{parse_confidence, parse_symbol};
use crate::config::parse_model;
use crate::context::Context;
use crate::output::{
    format_percent, print_header, print_info, print_json, print_output, KeyValue,
};

/// Arguments for the risk command.
#[derive(Args, Debug)]
pub struct RiskArgs {
    /// Ticker symbol (e.g., AAPL)
    pub symbol: String,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Confidence level, as a percentage (95) or fraction (0.95)
    #[arg(short, long)]
    pub confidence: Option<f64>,

    /// Rolling volatility window in periods
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Monte Carlo sample size
    #[arg(long)]
    pub simulations: Option<usize>,

    /// Monte Carlo model: normal or bootstrap
    #[arg(long)]
    pub model: Option<String>,

    /// Monte Carlo seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also print the full rolling volatility series
    #[arg(long)]
    pub rolling: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct VolatilityRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Volatility")]
    value: String,
}

/// Execute the risk command.
pub async fn execute(args: RiskArgs, ctx: &Context) -> Result<()> {
    let symbol = parse_symbol(&args.symbol)?;
    let range = args.range.resolve(&ctx.config)?;
    let config = report_config(&args, ctx, range.granularity.periods_per_year())?;

    let table = ctx.provider().fetch(&range.request(symbol.clone())).await?;
    let returns = to_returns(&table.series(range.column)?)?;

    let mut rng = ctx.rng(args.seed);
    let report = risk_report(&returns, &config, &mut rng)?;

    let pct = config.confidence_level * 100.0;
    let mut results = vec![
        KeyValue::new("Symbol", symbol.as_str()),
        KeyValue::new("Observations", report.observations.to_string()),
        KeyValue::from_percent("Mean Return", report.mean),
        KeyValue::from_percent("Volatility", report.volatility),
        KeyValue::from_percent("Annualized Volatility", report.annualized_volatility),
        KeyValue::new("", ""),
    ];
    for estimate in report.estimates() {
        results.push(KeyValue::from_percent(
            format!("{} ({:.0}%)", estimate.method, pct),
            estimate.value,
        ));
    }
    results.push(KeyValue::new(
        format!("Rolling Volatility ({} periods)", config.rolling_window),
        match report.rolling_volatility.and_then(|p| p.value.map(|v| (p.date, v))) {
            Some((date, value)) => format!("{} on {}", format_percent(value), date),
            None => "n/a (series shorter than window)".to_string(),
        },
    ));

    match ctx.format {
        OutputFormat::Table => {
            print_header(&format!("{} Risk ({})", symbol, table.granularity));
            print_output(&results, ctx.format)?;
            print_info(&format!(
                "With {:.0}% confidence, the {} return should not fall below {}.",
                pct,
                table.granularity.to_string().to_lowercase(),
                format_percent(report.historical.value)
            ));

            if args.rolling {
                let rows: Vec<VolatilityRow> = rolling_volatility(&returns, config.rolling_window)?
                    .into_iter()
                    .filter_map(|p| {
                        p.value.map(|v| VolatilityRow {
                            date: p.date.to_string(),
                            value: format_percent(v),
                        })
                    })
                    .collect();
                print_header("Rolling Volatility");
                print_output(&rows, ctx.format)?;
            }
        }
        OutputFormat::Json => {
            let mut output = serde_json::json!({
                "symbol": symbol,
                "granularity": table.granularity,
                "report": report,
            });
            if args.rolling {
                output["rolling_volatility"] =
                    serde_json::to_value(rolling_volatility(&returns, config.rolling_window)?)?;
            }
            print_json(&output)?;
        }
        OutputFormat::Csv => {
            print_output(&results, ctx.format)?;
        }
        OutputFormat::Minimal => {
            println!("{:.6}", report.historical.value);
        }
    }

    Ok(())
}

/// Report settings from the configuration, overridden by flags.
fn report_config(args: &RiskArgs, ctx: &Context, periods_per_year: u32) -> Result<RiskReportConfig> {
    let mut monte_carlo = ctx.config.monte_carlo();
    if let Some(n) = args.simulations {
        monte_carlo = monte_carlo.with_simulations(n);
    }
    if let Some(model) = &args.model {
        monte_carlo = monte_carlo.with_model(parse_model(model)?);
    }

    Ok(RiskReportConfig {
        confidence_level: parse_confidence(args.confidence.unwrap_or(ctx.config.confidence_level))?,
        rolling_window: args.window.unwrap_or(ctx.config.rolling_window),
        monte_carlo,
        periods_per_year,
    })
}
