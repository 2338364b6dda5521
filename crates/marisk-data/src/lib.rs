//! # Marisk Data
//!
//! Market data plumbing for the Marisk workspace.
//!
//! This crate provides:
//! - [`PriceSource`] / [`HeadlineSource`] provider traits
//! - [`CsvPriceSource`]: one `<SYMBOL>.csv` per asset in a directory
//! - [`JsonHeadlineSource`]: headlines from a JSON file
//! - [`PriceCache`]: TTL cache keyed by request
//! - [`MarketDataProvider`]: cache + timeout in front of a price source
//! - CSV export of returns, price tables and scenario curves
//!
//! Errors are [`DataError`]; every variant converts into
//! [`marisk_core::RiskError`], provider failures landing on `DataUnavailable`.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod cache;
mod csv_source;
mod error;
pub mod export;
mod news;
mod provider;
mod source;

pub use cache::*;
pub use csv_source::*;
pub use error::*;
pub use news::*;
pub use provider::*;
pub use source::*;

pub use export::{to_csv_string, write_price_table_csv, write_returns_csv, write_scenarios_csv};
