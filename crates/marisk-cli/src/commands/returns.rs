//! Returns command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use marisk_core::{cumulative_returns, to_returns};
use marisk_data::write_returns_csv;
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use crate::cli::{OutputFormat, RangeArgs};
use crate::commands::parse_symbol;
use crate::context::Context;
use crate::output::{format_percent, print_header, print_json, print_output, print_success};

/// Arguments for the returns command.
#[derive(Args, Debug)]
pub struct ReturnsArgs {
    /// Ticker symbol (e.g., AAPL)
    pub symbol: String,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Only show the last N returns
    #[arg(long)]
    pub tail: Option<usize>,

    /// Write the returns to this CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Serialize, Tabled)]
struct ReturnRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Return")]
    value: String,
    #[tabled(rename = "Cumulative")]
    cumulative: String,
}

/// Execute the returns command.
pub async fn execute(args: ReturnsArgs, ctx: &Context) -> Result<()> {
    let symbol = parse_symbol(&args.symbol)?;
    let range = args.range.resolve(&ctx.config)?;

    let table = ctx.provider().fetch(&range.request(symbol.clone())).await?;
    let returns = to_returns(&table.series(range.column)?)?;
    let cumulative = cumulative_returns(&returns);
    debug!(symbol = %symbol, returns = returns.len(), "computed returns");

    if let Some(path) = &args.export {
        write_returns_csv(std::fs::File::create(path)?, &returns)?;
        print_success(&format!("Wrote {} returns to {}", returns.len(), path.display()));
    }

    let skip = args
        .tail
        .map_or(0, |n| returns.len().saturating_sub(n));

    match ctx.format {
        OutputFormat::Table => {
            let rows: Vec<ReturnRow> = returns
                .points()
                .iter()
                .zip(&cumulative)
                .skip(skip)
                .map(|(p, c)| ReturnRow {
                    date: p.date.to_string(),
                    value: format_percent(p.value),
                    cumulative: format_percent(c.value),
                })
                .collect();
            print_header(&format!(
                "{} {} Returns ({})",
                symbol, table.granularity, range.column
            ));
            print_output(&rows, ctx.format)?;
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "symbol": symbol,
                "granularity": table.granularity,
                "column": range.column,
                "returns": &returns.points()[skip..],
                "cumulative": &cumulative[skip..],
            });
            print_json(&output)?;
        }
        OutputFormat::Csv => {
            write_returns_csv(std::io::stdout(), &returns)?;
        }
        OutputFormat::Minimal => {
            if let Some(last) = cumulative.last() {
                println!("{:.6}", last.value);
            }
        }
    }

    Ok(())
}
