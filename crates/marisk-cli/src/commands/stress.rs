//! Stress command implementation.
//!
//! Applies predefined and custom shocks to the returns of a symbol or a
//! portfolio and compares the resulting growth of one unit.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use marisk_core::{to_returns, ReturnSeries};
use marisk_data::write_scenarios_csv;
use marisk_portfolio::{
    best_case, portfolio_returns, run_scenarios, stress_scenarios, worst_case, StressScenario,
};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{OutputFormat, RangeArgs};
use crate::commands::portfolio::{load_asset_returns, PortfolioInput};
use crate::commands::{parse_symbol, ResolvedRange};
use crate::context::Context;
use crate::error::{CliError, CliResult};
use crate::output::{
    format_percent, print_header, print_info, print_json, print_output, print_success,
};

/// Arguments for the stress command.
#[derive(Args, Debug)]
pub struct StressArgs {
    /// Single symbol to stress (instead of a portfolio)
    #[arg(short, long, conflicts_with_all = ["file", "assets"])]
    pub symbol: Option<String>,

    #[command(flatten)]
    pub portfolio: PortfolioInput,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Predefined scenario to run; repeat for several (default: all)
    #[arg(long = "scenario")]
    pub scenarios: Vec<String>,

    /// Custom shock in percent, between -50 and 50; repeatable
    #[arg(long = "custom", allow_hyphen_values = true)]
    pub custom: Vec<f64>,

    /// Skip the unshocked baseline
    #[arg(long)]
    pub no_baseline: bool,

    /// Write the growth curves of every scenario to this CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Serialize, Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Scenario")]
    scenario: String,
    #[tabled(rename = "Shock")]
    shock: String,
    #[tabled(rename = "Final Value")]
    final_value: String,
    #[tabled(rename = "Cumulative Return")]
    cumulative_return: String,
}

/// Execute the stress command.
pub async fn execute(args: StressArgs, ctx: &Context) -> Result<()> {
    let scenarios = build_scenarios(&args)?;
    let range = args.range.resolve(&ctx.config)?;
    let (label, returns) = stressed_returns(&args, &range, ctx).await?;

    let results = run_scenarios(&returns, &scenarios)?;

    if let Some(path) = &args.export {
        write_scenarios_csv(std::fs::File::create(path)?, &results)?;
        print_success(&format!(
            "Wrote {} scenarios to {}",
            results.len(),
            path.display()
        ));
    }

    let rows: Vec<ScenarioRow> = results
        .iter()
        .map(|r| ScenarioRow {
            scenario: r.scenario_name.clone(),
            shock: format!("{:+.1}%", r.shock_pct),
            final_value: format!("{:.4}", r.final_value()),
            cumulative_return: format_percent(r.cumulative_return()),
        })
        .collect();

    match ctx.format {
        OutputFormat::Table => {
            print_header(&format!("Stress Test: {label}"));
            print_output(&rows, ctx.format)?;
            if let (Some(worst), Some(best)) = (worst_case(&results), best_case(&results)) {
                print_info(&format!(
                    "Worst case: {} ({}); best case: {} ({})",
                    worst.scenario_name,
                    format_percent(worst.cumulative_return()),
                    best.scenario_name,
                    format_percent(best.cumulative_return())
                ));
            }
        }
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Csv => write_scenarios_csv(std::io::stdout(), &results)?,
        OutputFormat::Minimal => {
            if let Some(worst) = worst_case(&results) {
                println!("{:.6}", worst.cumulative_return());
            }
        }
    }

    Ok(())
}

/// Scenario list in display order: baseline, predefined, then custom.
fn build_scenarios(args: &StressArgs) -> CliResult<Vec<StressScenario>> {
    let mut scenarios = Vec::new();
    if !args.no_baseline {
        scenarios.push(StressScenario::new("Baseline", 0.0).with_description("No shock"));
    }

    if args.scenarios.is_empty() && args.custom.is_empty() {
        scenarios.extend(stress_scenarios::all());
    }
    for name in &args.scenarios {
        let scenario = stress_scenarios::by_name(name).ok_or_else(|| {
            let known: Vec<String> = stress_scenarios::all().into_iter().map(|s| s.name).collect();
            CliError::InvalidArgument(format!(
                "unknown scenario '{}' (known: {})",
                name,
                known.join(", ")
            ))
        })?;
        scenarios.push(scenario);
    }
    for shock in &args.custom {
        let mut scenario = StressScenario::custom(*shock)?;
        scenario.name = format!("Custom {shock:+}%");
        scenarios.push(scenario);
    }

    Ok(scenarios)
}

/// Returns of the symbol, or of the portfolio when no symbol is given.
async fn stressed_returns(
    args: &StressArgs,
    range: &ResolvedRange,
    ctx: &Context,
) -> Result<(String, ReturnSeries)> {
    if let Some(symbol) = &args.symbol {
        let symbol = parse_symbol(symbol)?;
        let table = ctx.provider().fetch(&range.request(symbol.clone())).await?;
        let returns = to_returns(&table.series(range.column)?)?;
        return Ok((symbol.to_string(), returns));
    }

    if args.portfolio.is_empty() {
        return Err(CliError::MissingArgument("--symbol, --file or --asset".into()).into());
    }
    let spec = args.portfolio.load()?;
    let asset_returns = load_asset_returns(&spec, range, ctx).await?;
    let returns = portfolio_returns(&asset_returns, &spec)?;
    let label = spec
        .entries()
        .iter()
        .map(|e| format!("{} {:.0}%", e.asset, e.weight * 100.0))
        .collect::<Vec<_>>()
        .join(", ");
    Ok((format!("Portfolio ({label})"), returns))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(scenarios: &[&str], custom: &[f64]) -> StressArgs {
        StressArgs {
            symbol: Some("SPY".into()),
            portfolio: PortfolioInput::default(),
            range: RangeArgs::default(),
            scenarios: scenarios.iter().map(|s| s.to_string()).collect(),
            custom: custom.to_vec(),
            no_baseline: false,
            export: None,
        }
    }

    #[test]
    fn test_default_scenarios() {
        let names: Vec<String> = build_scenarios(&args(&[], &[]))
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(
            names,
            vec!["Baseline", "Interest Rate Hike", "Oil Price Shock", "Market Crash"]
        );
    }

    #[test]
    fn test_named_and_custom_scenarios() {
        let scenarios = build_scenarios(&args(&["market-crash"], &[-20.0, 5.0])).unwrap();
        assert_eq!(scenarios.len(), 4);
        assert_eq!(scenarios[1].shock_pct, -30.0);
        assert_eq!(scenarios[2].name, "Custom -20%");
        assert_eq!(scenarios[3].name, "Custom +5%");
    }

    #[test]
    fn test_rejects_unknown_and_out_of_range() {
        assert!(build_scenarios(&args(&["alien invasion"], &[])).is_err());
        assert!(build_scenarios(&args(&[], &[-75.0])).is_err());
    }
}
