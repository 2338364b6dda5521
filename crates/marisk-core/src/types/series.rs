//! Dated price and return series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};

/// A single dated price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date.
    pub date: NaiveDate,
    /// Observed price.
    pub price: f64,
}

impl PricePoint {
    /// Creates a new price point.
    #[must_use]
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// A single dated fractional return (0.01 = +1%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    /// Date at the end of the return period.
    pub date: NaiveDate,
    /// Fractional return over the period.
    pub value: f64,
}

impl ReturnPoint {
    /// Creates a new return point.
    #[must_use]
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Checks strict date ordering and finiteness shared by both series kinds.
fn validate<T>(
    points: &[T],
    date_of: impl Fn(&T) -> NaiveDate,
    value_of: impl Fn(&T) -> f64,
    what: &str,
) -> RiskResult<()> {
    for (i, p) in points.iter().enumerate() {
        let v = value_of(p);
        if !v.is_finite() {
            return Err(RiskError::invalid_input(format!(
                "{what} on {} is not finite",
                date_of(p)
            )));
        }
        if i > 0 && date_of(&points[i - 1]) >= date_of(p) {
            return Err(RiskError::invalid_input(format!(
                "{what} dates must be strictly ascending ({} follows {})",
                date_of(p),
                date_of(&points[i - 1])
            )));
        }
    }
    Ok(())
}

/// Ordered price observations for one asset.
///
/// Dates are strictly ascending and prices finite; both are checked on
/// construction (including deserialization).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Creates a price series, rejecting unordered or duplicate dates.
    pub fn new(points: Vec<PricePoint>) -> RiskResult<Self> {
        validate(&points, |p| p.date, |p| p.price, "price")?;
        Ok(Self { points })
    }

    /// Creates a price series from parallel date and price slices.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (NaiveDate, f64)>,
    ) -> RiskResult<Self> {
        Self::new(
            pairs
                .into_iter()
                .map(|(date, price)| PricePoint::new(date, price))
                .collect(),
        )
    }

    /// Returns the observations.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Observation dates in order.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Prices in order.
    #[must_use]
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// First observation, if any.
    #[must_use]
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Last observation, if any.
    #[must_use]
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = RiskError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}

/// Ordered fractional returns for one asset or portfolio.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<ReturnPoint>", into = "Vec<ReturnPoint>")]
pub struct ReturnSeries {
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    /// Creates a return series, rejecting unordered dates and non-finite values.
    pub fn new(points: Vec<ReturnPoint>) -> RiskResult<Self> {
        validate(&points, |p| p.date, |p| p.value, "return")?;
        Ok(Self { points })
    }

    /// Creates a return series from (date, return) pairs.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (NaiveDate, f64)>,
    ) -> RiskResult<Self> {
        Self::new(
            pairs
                .into_iter()
                .map(|(date, value)| ReturnPoint::new(date, value))
                .collect(),
        )
    }

    /// Returns the observations.
    #[must_use]
    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Observation dates in order.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Return values in order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Looks up the return on a given date.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by(|p| p.date.cmp(&date))
            .ok()
            .map(|i| self.points[i].value)
    }

    /// Applies `f` to every value, keeping dates.
    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> RiskResult<Self> {
        Self::new(
            self.points
                .iter()
                .map(|p| ReturnPoint::new(p.date, f(p.value)))
                .collect(),
        )
    }
}

impl TryFrom<Vec<ReturnPoint>> for ReturnSeries {
    type Error = RiskError;

    fn try_from(points: Vec<ReturnPoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<ReturnSeries> for Vec<ReturnPoint> {
    fn from(series: ReturnSeries) -> Self {
        series.points
    }
}
