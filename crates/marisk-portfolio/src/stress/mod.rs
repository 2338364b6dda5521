//! Stress testing for return series.
//!
//! This module provides:
//! - Scenario definitions (predefined market shocks and custom shocks)
//! - Scenario application and growth-of-$1 curves
//! - Multi-scenario comparison
//!
//! A scenario scales every period's return by `1 + shock_pct / 100`. It is a
//! uniform multiplicative shock, not a one-off drawdown.

mod engine;
mod scenarios;

pub use engine::*;
pub use scenarios::*;
