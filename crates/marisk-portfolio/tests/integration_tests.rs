//! Integration tests for marisk-portfolio.
//!
//! These tests run the portfolio workflow end to end on a small fixture:
//! validate, aggregate, decompose and stress.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use marisk_core::{to_returns, PriceSeries};
use marisk_portfolio::prelude::*;

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn prices(points: &[(u32, f64)]) -> PriceSeries {
    PriceSeries::from_pairs(points.iter().map(|(d, p)| (date(*d), *p))).unwrap()
}

/// Three assets; CCC misses the 4th, so alignment drops that date.
fn create_asset_returns() -> AssetReturns {
    let mut map = AssetReturns::new();
    map.insert(
        AssetId::new("AAA"),
        to_returns(&prices(&[(2, 100.0), (3, 101.0), (4, 99.0), (5, 102.0), (8, 103.0)])).unwrap(),
    );
    map.insert(
        AssetId::new("BBB"),
        to_returns(&prices(&[(2, 50.0), (3, 50.5), (4, 50.0), (5, 51.0), (8, 50.0)])).unwrap(),
    );
    map.insert(
        AssetId::new("CCC"),
        to_returns(&prices(&[(2, 20.0), (3, 21.0), (5, 20.0), (8, 22.0)])).unwrap(),
    );
    map
}

// =============================================================================
// WORKFLOW
// =============================================================================

#[test]
fn test_invalid_weights_stop_every_analysis() {
    let asset_returns = create_asset_returns();
    let spec = PortfolioSpec::from_pairs([("AAA", 0.6), ("BBB", 0.3)]);

    assert!(matches!(
        portfolio_returns(&asset_returns, &spec),
        Err(RiskError::InvalidPortfolio { .. })
    ));
    assert!(matches!(
        risk_contributions(&asset_returns, &spec, 252),
        Err(RiskError::InvalidPortfolio { .. })
    ));
}

#[test]
fn test_end_to_end() {
    let asset_returns = create_asset_returns();
    let spec = PortfolioSpec::from_pairs([("AAA", 0.5), ("BBB", 0.3), ("CCC", 0.2)]);

    let returns = portfolio_returns(&asset_returns, &spec).unwrap();
    // Common return dates: 3rd, 5th, 8th (CCC has no 4th).
    assert_eq!(returns.dates(), vec![date(3), date(5), date(8)]);

    let aaa = asset_returns[&AssetId::new("AAA")].get(date(3)).unwrap();
    let bbb = asset_returns[&AssetId::new("BBB")].get(date(3)).unwrap();
    let ccc = asset_returns[&AssetId::new("CCC")].get(date(3)).unwrap();
    assert_relative_eq!(
        returns.values()[0],
        0.5 * aaa + 0.3 * bbb + 0.2 * ccc,
        epsilon = 1e-15
    );

    let contrib = risk_contributions(&asset_returns, &spec, 252).unwrap();
    assert_eq!(contrib.by_asset.len(), 3);
    let total: f64 = contrib.by_asset.iter().map(|c| c.contribution_pct).sum();
    assert_relative_eq!(total, 100.0, epsilon = 1e-9);

    let results = run_scenarios(&returns, &stress_scenarios::all()).unwrap();
    assert_eq!(results.len(), 3);
    for r in &results {
        assert_eq!(r.growth.len(), returns.len());
    }
}

#[test]
fn test_editing_then_analysis() {
    let asset_returns = create_asset_returns();

    let mut spec = PortfolioSpec::default();
    assert!(!spec.is_valid());

    spec.set_asset(0, "aaa").unwrap();
    spec.add_asset("bbb");
    spec.set_weight(0, 0.4).unwrap();
    spec.set_weight(1, 0.6).unwrap();
    assert!(spec.is_valid());

    let returns = portfolio_returns(&asset_returns, &spec).unwrap();
    assert_eq!(returns.len(), 4);
}

#[test]
fn test_missing_asset_series() {
    let asset_returns = create_asset_returns();
    let spec = PortfolioSpec::from_pairs([("AAA", 0.5), ("QQQ", 0.5)]);
    assert!(matches!(
        portfolio_returns(&asset_returns, &spec),
        Err(RiskError::DataUnavailable { .. })
    ));
}
