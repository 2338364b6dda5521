//! # marisk-risk
//!
//! Risk metrics over return series.
//!
//! This crate provides:
//!
//! - **VaR**: Historical, Parametric (normal quantile) and Monte Carlo
//! - **CVaR**: Expected shortfall beyond the historical VaR threshold
//! - **Volatility**: Rolling sample standard deviation
//! - **Report**: All of the above for one series in a single call
//!
//! Every estimate is a fractional return in the same sign convention as the
//! input, so a VaR of `-0.023` reads "a 2.3% loss".
//!
//! ## Example
//!
//! ```rust
//! use marisk_risk::prelude::*;
//!
//! let returns = [0.01, -0.02, 0.03, -0.01, 0.02];
//! let var = historical_var(&returns, 0.8).unwrap();
//! assert!((var.value + 0.01).abs() < 1e-12);
//!
//! let es = conditional_var(&returns, 0.8).unwrap();
//! assert!((es.value + 0.015).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod report;
pub mod var;
pub mod volatility;

pub use marisk_core::{RiskError, RiskResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::report::{risk_report, RiskReport, RiskReportConfig};
    pub use crate::var::*;
    pub use crate::volatility::{latest_volatility, rolling_volatility, VolatilityPoint};
    pub use marisk_core::{RiskError, RiskResult};
}
