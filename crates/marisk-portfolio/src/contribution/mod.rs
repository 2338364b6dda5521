//! Contribution analysis for portfolios.
//!
//! Splits portfolio volatility across assets:
//! - Annualized volatility per asset over the aligned date range
//! - Weighted contribution and its share of the total
//!
//! # Example
//!
//! ```rust,ignore
//! use marisk_portfolio::contribution::risk_contributions;
//!
//! let contrib = risk_contributions(&asset_returns, &spec, 252)?;
//! for c in contrib.top_contributors(3) {
//!     println!("{}: {:.2}% of risk", c.asset, c.contribution_pct);
//! }
//! ```

mod risk;

pub use risk::*;
