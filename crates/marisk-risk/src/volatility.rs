//! Rolling volatility.

use chrono::NaiveDate;
use marisk_core::stats::sample_std;
use marisk_core::{ReturnSeries, RiskError, RiskResult};
use serde::{Deserialize, Serialize};

/// Default rolling window, in periods.
pub const DEFAULT_WINDOW: usize = 30;

/// Volatility at one date of a return series.
///
/// `value` is `None` until a full window of returns is available.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityPoint {
    /// Date of the last return in the window
    pub date: NaiveDate,
    /// Sample standard deviation over the window
    pub value: Option<f64>,
}

/// Rolling sample standard deviation over `window` periods.
///
/// The output has one point per return; the first `window - 1` are `None`.
/// A series shorter than the window yields only `None` points.
///
/// # Errors
///
/// `InvalidInput` if `window < 2`.
pub fn rolling_volatility(returns: &ReturnSeries, window: usize) -> RiskResult<Vec<VolatilityPoint>> {
    if window < 2 {
        return Err(RiskError::invalid_input(format!(
            "rolling window must be at least 2, got {window}"
        )));
    }

    let values = returns.values();
    returns
        .points()
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let value = if i + 1 < window {
                None
            } else {
                Some(sample_std(&values[i + 1 - window..=i])?)
            };
            Ok(VolatilityPoint {
                date: point.date,
                value,
            })
        })
        .collect()
}

/// Most recent defined rolling volatility, if any.
///
/// # Errors
///
/// `InvalidInput` if `window < 2`.
pub fn latest_volatility(returns: &ReturnSeries, window: usize) -> RiskResult<Option<VolatilityPoint>> {
    Ok(rolling_volatility(returns, window)?
        .into_iter()
        .rev()
        .find(|p| p.value.is_some()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series(values: &[f64]) -> ReturnSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ReturnSeries::from_pairs(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| (start + chrono::Days::new(i as u64), *v)),
        )
        .unwrap()
    }

    #[test]
    fn test_leading_points_undefined() {
        let returns = series(&[0.01, -0.01, 0.02, 0.0, -0.02]);
        let vol = rolling_volatility(&returns, 3).unwrap();

        assert_eq!(vol.len(), 5);
        assert!(vol[0].value.is_none());
        assert!(vol[1].value.is_none());
        assert!(vol[2].value.is_some());
        assert_eq!(vol[4].date, returns.points()[4].date);
    }

    #[test]
    fn test_window_values() {
        let returns = series(&[0.01, -0.01, 0.02, 0.0]);
        let vol = rolling_volatility(&returns, 2).unwrap();

        // std of {0.01, -0.01} with n-1 = 1
        assert_relative_eq!(vol[1].value.unwrap(), 0.0002_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(
            vol[3].value.unwrap(),
            sample_std(&[0.02, 0.0]).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_series_shorter_than_window() {
        let returns = series(&[0.01, 0.02]);
        let vol = rolling_volatility(&returns, 30).unwrap();
        assert!(vol.iter().all(|p| p.value.is_none()));
        assert!(latest_volatility(&returns, 30).unwrap().is_none());
    }

    #[test]
    fn test_latest_volatility() {
        let returns = series(&[0.01, -0.01, 0.03, 0.03]);
        let latest = latest_volatility(&returns, 2).unwrap().unwrap();
        assert_eq!(latest.date, returns.points()[3].date);
        assert_relative_eq!(latest.value.unwrap(), 0.0);
    }

    #[test]
    fn test_window_too_small() {
        let returns = series(&[0.01, 0.02]);
        assert!(matches!(
            rolling_volatility(&returns, 1),
            Err(RiskError::InvalidInput { .. })
        ));
    }
}
