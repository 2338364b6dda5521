//! # Marisk Core
//!
//! Core types and building blocks for the Marisk market risk workspace.
//!
//! This crate provides:
//!
//! - **Types**: Dated price and return series, asset identifiers, sampling granularity
//! - **Returns**: Simple periodic returns from a price series, growth-of-$1 curves
//! - **Statistics**: Sample mean, sample standard deviation, Pearson correlation
//! - **Errors**: The [`RiskError`] taxonomy shared by every downstream crate
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: Every calculation takes explicit inputs and returns a new value
//! - **No silent NaN**: Undefined statistics surface as errors, never as NaN or Inf
//! - **Validated construction**: Series are ordered and free of duplicate dates
//!
//! ## Example
//!
//! ```rust
//! use marisk_core::prelude::*;
//! use chrono::NaiveDate;
//!
//! let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
//! let prices = PriceSeries::new(vec![
//!     PricePoint::new(d(2), 100.0),
//!     PricePoint::new(d(3), 101.0),
//!     PricePoint::new(d(4), 99.99),
//! ])
//! .unwrap();
//!
//! let returns = to_returns(&prices).unwrap();
//! assert_eq!(returns.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod returns;
pub mod stats;
pub mod types;

pub use error::{RiskError, RiskResult};
pub use returns::{cumulative_returns, growth_curve, to_returns};
pub use types::{
    AssetId, Granularity, MarketSummary, PriceBar, PriceColumn, PricePoint, PriceSeries,
    PriceTable, ReturnPoint, ReturnSeries,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{RiskError, RiskResult};
    pub use crate::returns::{cumulative_returns, growth_curve, to_returns};
    pub use crate::stats::{annualize, mean, pearson, sample_std};
    pub use crate::types::{
        AssetId, Granularity, MarketSummary, PriceBar, PriceColumn, PricePoint, PriceSeries,
        PriceTable, ReturnPoint, ReturnSeries,
    };
}
