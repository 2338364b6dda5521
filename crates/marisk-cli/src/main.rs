//! Marisk CLI - market risk dashboard for the command line.
//!
//! # Usage
//!
//! ```bash
//! # Price table, key metrics and headlines
//! marisk prices AAPL --start 2023-01-01 --end 2023-12-31
//!
//! # VaR, CVaR and volatility at 99%
//! marisk risk AAPL --confidence 99 --seed 7
//!
//! # Portfolio analysis
//! marisk portfolio analyze -a AAPL -w 0.6 -a MSFT -w 0.4
//!
//! # Stress scenarios with a custom shock, exported to CSV
//! marisk stress --symbol SPY --custom -15 --export stress.csv
//! ```
//!
//! Price files are read from `<data dir>/<SYMBOL>.csv`; the data directory
//! comes from `--data-dir`, `MARISK_DATA_DIR` or the configuration file.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod context;
mod error;
mod output;

use cli::{Cli, Commands};
use context::Context;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    output::set_quiet(cli.quiet);

    if let Err(e) = run(cli) {
        output::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,marisk=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,marisk=info"))
    };

    // Only log to stderr; stdout carries command output
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let ctx = Context::from_cli(&cli)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match cli.command {
        Commands::Prices(args) => runtime.block_on(commands::prices::execute(args, &ctx))?,
        Commands::Returns(args) => runtime.block_on(commands::returns::execute(args, &ctx))?,
        Commands::Risk(args) => runtime.block_on(commands::risk::execute(args, &ctx))?,
        Commands::Portfolio(args) => runtime.block_on(commands::portfolio::execute(args, &ctx))?,
        Commands::Stress(args) => runtime.block_on(commands::stress::execute(args, &ctx))?,
        Commands::News(args) => runtime.block_on(commands::news::execute(args, &ctx))?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}
