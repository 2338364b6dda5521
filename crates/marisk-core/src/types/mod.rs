//! Domain types for market risk analytics.
//!
//! - [`AssetId`]: Normalized ticker symbol
//! - [`PriceSeries`] / [`PricePoint`]: Dated prices for one asset
//! - [`ReturnSeries`] / [`ReturnPoint`]: Dated fractional returns
//! - [`PriceBar`] / [`PriceTable`]: OHLCV bars as delivered by a data provider
//! - [`Granularity`]: Sampling interval of a series
//! - [`PriceColumn`]: Which bar field feeds a price series

mod asset;
mod bar;
mod granularity;
mod series;

pub use asset::AssetId;
pub use bar::{MarketSummary, PriceBar, PriceTable};
pub use granularity::{Granularity, PriceColumn};
pub use series::{PricePoint, PriceSeries, ReturnPoint, ReturnSeries};
