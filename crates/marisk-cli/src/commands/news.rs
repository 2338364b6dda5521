//! News command implementation.

use anyhow::Result;
use clap::Args;
use marisk_data::{Headline, DEFAULT_HEADLINE_LIMIT};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::parse_symbol;
use crate::context::Context;
use crate::output::{print_header, print_json, print_output, print_warning};

/// Arguments for the news command.
#[derive(Args, Debug)]
pub struct NewsArgs {
    /// Ticker symbol (e.g., AAPL)
    pub symbol: String,

    /// Maximum number of headlines
    #[arg(short, long, default_value_t = DEFAULT_HEADLINE_LIMIT)]
    pub limit: usize,
}

#[derive(Debug, Serialize, Tabled)]
struct HeadlineRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Link")]
    link: String,
}

impl From<Headline> for HeadlineRow {
    fn from(h: Headline) -> Self {
        Self {
            title: h.title,
            link: h.link,
        }
    }
}

/// Execute the news command.
pub async fn execute(args: NewsArgs, ctx: &Context) -> Result<()> {
    let symbol = parse_symbol(&args.symbol)?;
    if ctx.news_file.is_none() {
        print_warning("No news file configured; set one with `marisk config set news_file <path>`");
    }

    let rows: Vec<HeadlineRow> = ctx
        .provider()
        .headlines(&symbol, args.limit)
        .await
        .into_iter()
        .map(HeadlineRow::from)
        .collect();

    match ctx.format {
        OutputFormat::Table => {
            print_header(&format!("{symbol} News"));
            print_output(&rows, ctx.format)?;
        }
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Csv => print_output(&rows, ctx.format)?,
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{}", row.title);
            }
        }
    }

    Ok(())
}
