//! Return series construction.

use crate::error::{RiskError, RiskResult};
use crate::types::{PriceSeries, ReturnPoint, ReturnSeries};

/// Converts a price series into simple periodic returns.
///
/// ```text
/// r[i] = (p[i] - p[i-1]) / p[i-1]
/// ```
///
/// The first price has no predecessor and is dropped, so the result has one
/// fewer point than the input. Each return carries the date of the later
/// price.
///
/// # Errors
///
/// - [`RiskError::InsufficientData`] if there are fewer than 2 prices, or a
///   previous price is zero (the return would be undefined).
pub fn to_returns(prices: &PriceSeries) -> RiskResult<ReturnSeries> {
    if prices.len() < 2 {
        return Err(RiskError::insufficient_data(format!(
            "need at least 2 prices to compute returns, got {}",
            prices.len()
        )));
    }

    let points = prices
        .points()
        .windows(2)
        .map(|w| {
            let (prev, curr) = (w[0], w[1]);
            if prev.price == 0.0 {
                return Err(RiskError::insufficient_data(format!(
                    "zero price on {} leaves the next return undefined",
                    prev.date
                )));
            }
            Ok(ReturnPoint::new(curr.date, (curr.price - prev.price) / prev.price))
        })
        .collect::<RiskResult<Vec<_>>>()?;

    ReturnSeries::new(points)
}

/// Growth of one unit invested: cumulative product of `(1 + r)`.
#[must_use]
pub fn growth_curve(returns: &ReturnSeries) -> Vec<ReturnPoint> {
    let mut wealth = 1.0;
    returns
        .points()
        .iter()
        .map(|p| {
            wealth *= 1.0 + p.value;
            ReturnPoint::new(p.date, wealth)
        })
        .collect()
}

/// Cumulative return path: the growth curve minus the initial unit.
#[must_use]
pub fn cumulative_returns(returns: &ReturnSeries) -> Vec<ReturnPoint> {
    growth_curve(returns)
        .into_iter()
        .map(|p| ReturnPoint::new(p.date, p.value - 1.0))
        .collect()
}
