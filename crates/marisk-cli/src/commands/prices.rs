//! Prices command implementation.
//!
//! Shows the price table of a symbol with its key metrics, cumulative return
//! and the latest headlines.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use marisk_core::{cumulative_returns, to_returns, PriceBar};
use marisk_data::{write_price_table_csv, DEFAULT_HEADLINE_LIMIT};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{OutputFormat, RangeArgs};
use crate::commands::parse_symbol;
use crate::context::Context;
use crate::output::{
    format_percent, format_price, key_values_to_json, print_header, print_json, print_output,
    print_success, print_warning, KeyValue,
};

/// Arguments for the prices command.
#[derive(Args, Debug)]
pub struct PricesArgs {
    /// Ticker symbol (e.g., AAPL)
    pub symbol: String,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Number of most recent bars to show in the table
    #[arg(short, long, default_value = "10")]
    pub rows: usize,

    /// Write the full price table to this CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// One row of the price table.
#[derive(Debug, Serialize, Tabled)]
struct BarRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Open")]
    open: String,
    #[tabled(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    low: String,
    #[tabled(rename = "Close")]
    close: String,
    #[tabled(rename = "Adj Close")]
    adj_close: String,
    #[tabled(rename = "Volume")]
    volume: String,
}

impl From<&PriceBar> for BarRow {
    fn from(bar: &PriceBar) -> Self {
        Self {
            date: bar.date.to_string(),
            open: format_price(bar.open),
            high: format_price(bar.high),
            low: format_price(bar.low),
            close: format_price(bar.close),
            adj_close: format_price(bar.adj_close),
            volume: format!("{:.0}", bar.volume),
        }
    }
}

/// Execute the prices command.
pub async fn execute(args: PricesArgs, ctx: &Context) -> Result<()> {
    let symbol = parse_symbol(&args.symbol)?;
    let range = args.range.resolve(&ctx.config)?;
    let provider = ctx.provider();

    let table = provider.fetch(&range.request(symbol.clone())).await?;
    let summary = table.summary()?;

    // A single bar has no returns; the metrics still apply.
    let cumulative = match to_returns(&table.series(range.column)?) {
        Ok(returns) => cumulative_returns(&returns).last().map(|p| p.value),
        Err(e) => {
            print_warning(&format!("Cumulative return unavailable: {e}"));
            None
        }
    };

    if let Some(path) = &args.export {
        let file = std::fs::File::create(path)?;
        write_price_table_csv(file, &table)?;
        print_success(&format!("Wrote {} bars to {}", table.len(), path.display()));
    }

    let mut metrics = vec![
        KeyValue::new("Symbol", symbol.as_str()),
        KeyValue::new("Granularity", table.granularity.to_string()),
        KeyValue::new("First Date", summary.first_date.to_string()),
        KeyValue::new("Last Date", summary.last_date.to_string()),
        KeyValue::new("Bars", summary.bars.to_string()),
        KeyValue::new("Last Close", format_price(summary.last_close)),
        KeyValue::new("Largest Price Change", format_price(summary.largest_price_change)),
        KeyValue::from_f64("Average Volume", summary.average_volume, 0),
    ];
    if let Some(value) = cumulative {
        metrics.push(KeyValue::new(
            format!("Cumulative Return ({})", range.column),
            format_percent(value),
        ));
    }

    match ctx.format {
        OutputFormat::Table => {
            let skip = table.len().saturating_sub(args.rows);
            let rows: Vec<BarRow> = table.bars()[skip..].iter().map(BarRow::from).collect();

            print_header(&format!("{} Prices ({})", symbol, table.granularity));
            print_output(&rows, ctx.format)?;

            print_header("Key Metrics");
            print_output(&metrics, ctx.format)?;

            let headlines = provider.headlines(&symbol, DEFAULT_HEADLINE_LIMIT).await;
            if !headlines.is_empty() {
                print_header("Latest News");
                for headline in &headlines {
                    println!("  • {}\n    {}", headline.title, headline.link);
                }
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "summary": summary,
                "cumulative_return": cumulative,
                "metrics": key_values_to_json(&metrics),
                "bars": table.bars(),
            });
            print_json(&output)?;
        }
        OutputFormat::Csv => {
            write_price_table_csv(std::io::stdout(), &table)?;
        }
        OutputFormat::Minimal => {
            println!("{}", format_price(summary.last_close));
        }
    }

    Ok(())
}
