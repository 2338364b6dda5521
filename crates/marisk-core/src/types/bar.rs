//! OHLCV price bars and tables.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{AssetId, Granularity, PriceColumn, PricePoint, PriceSeries};
use crate::error::{RiskError, RiskResult};

/// One OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Bar date (last trading day of the bar for resampled data).
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// Opening price.
    #[serde(rename = "Open")]
    pub open: f64,
    /// Session high.
    #[serde(rename = "High")]
    pub high: f64,
    /// Session low.
    #[serde(rename = "Low")]
    pub low: f64,
    /// Closing price.
    #[serde(rename = "Close")]
    pub close: f64,
    /// Adjusted closing price.
    #[serde(rename = "Adj Close")]
    pub adj_close: f64,
    /// Traded volume.
    #[serde(rename = "Volume")]
    pub volume: f64,
}

impl PriceBar {
    /// Returns the value of the selected column.
    #[must_use]
    pub fn value(&self, column: PriceColumn) -> f64 {
        match column {
            PriceColumn::Open => self.open,
            PriceColumn::High => self.high,
            PriceColumn::Low => self.low,
            PriceColumn::Close => self.close,
            PriceColumn::AdjClose => self.adj_close,
        }
    }
}

/// Summary figures shown next to a price table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    /// Number of bars.
    pub bars: usize,
    /// First bar date.
    pub first_date: NaiveDate,
    /// Last bar date.
    pub last_date: NaiveDate,
    /// Last closing price.
    pub last_close: f64,
    /// Highest close minus lowest close over the table.
    pub largest_price_change: f64,
    /// Mean traded volume per bar.
    pub average_volume: f64,
}

/// Bars for one symbol at one granularity, in ascending date order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    /// Symbol the bars belong to.
    pub symbol: AssetId,
    /// Sampling interval of the bars.
    pub granularity: Granularity,
    bars: Vec<PriceBar>,
}

impl PriceTable {
    /// Creates a table, rejecting unordered or duplicate dates.
    pub fn new(symbol: AssetId, granularity: Granularity, bars: Vec<PriceBar>) -> RiskResult<Self> {
        if let Some(w) = bars.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(RiskError::invalid_input(format!(
                "{symbol}: bar dates must be strictly ascending ({} follows {})",
                w[1].date, w[0].date
            )));
        }
        Ok(Self {
            symbol,
            granularity,
            bars,
        })
    }

    /// Returns the bars.
    #[must_use]
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true if the table has no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Keeps only bars within `[start, end]`, both inclusive.
    #[must_use]
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: self.symbol.clone(),
            granularity: self.granularity,
            bars: self
                .bars
                .iter()
                .filter(|b| b.date >= start && b.date <= end)
                .copied()
                .collect(),
        }
    }

    /// Extracts the selected column as a price series.
    pub fn series(&self, column: PriceColumn) -> RiskResult<PriceSeries> {
        PriceSeries::new(
            self.bars
                .iter()
                .map(|b| PricePoint::new(b.date, b.value(column)))
                .collect(),
        )
    }

    /// Computes the key market metrics for the table.
    pub fn summary(&self) -> RiskResult<MarketSummary> {
        let (first, last) = match (self.bars.first(), self.bars.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => {
                return Err(RiskError::insufficient_data(format!(
                    "{}: no bars to summarize",
                    self.symbol
                )))
            }
        };

        let max_close = self.bars.iter().map(|b| b.close).fold(f64::MIN, f64::max);
        let min_close = self.bars.iter().map(|b| b.close).fold(f64::MAX, f64::min);
        let total_volume: f64 = self.bars.iter().map(|b| b.volume).sum();

        Ok(MarketSummary {
            bars: self.bars.len(),
            first_date: first.date,
            last_date: last.date,
            last_close: last.close,
            largest_price_change: max_close - min_close,
            average_volume: total_volume / self.bars.len() as f64,
        })
    }

    /// Resamples bars to a coarser granularity.
    ///
    /// Each output bar takes the first open, the highest high, the lowest low,
    /// the last close and adjusted close, the summed volume, and the date of
    /// the last bar in its period. Resampling to the same or a finer
    /// granularity returns the table unchanged.
    #[must_use]
    pub fn resample(&self, target: Granularity) -> Self {
        if target == Granularity::Daily
            || target == self.granularity
            || self.granularity == Granularity::Monthly
        {
            return self.clone();
        }

        let key = |date: NaiveDate| -> (i32, u32) {
            match target {
                Granularity::Daily => (date.year(), date.ordinal()),
                Granularity::Weekly => {
                    let week = date.iso_week();
                    (week.year(), week.week())
                }
                Granularity::Monthly => (date.year(), date.month()),
            }
        };

        let mut out: Vec<PriceBar> = Vec::new();
        let mut current: Option<((i32, u32), PriceBar)> = None;

        for bar in &self.bars {
            let k = key(bar.date);
            current = match current {
                Some((ck, mut agg)) if ck == k => {
                    agg.date = bar.date;
                    agg.high = agg.high.max(bar.high);
                    agg.low = agg.low.min(bar.low);
                    agg.close = bar.close;
                    agg.adj_close = bar.adj_close;
                    agg.volume += bar.volume;
                    Some((ck, agg))
                }
                Some((_, agg)) => {
                    out.push(agg);
                    Some((k, *bar))
                }
                None => Some((k, *bar)),
            };
        }
        if let Some((_, agg)) = current {
            out.push(agg);
        }

        Self {
            symbol: self.symbol.clone(),
            granularity: target,
            bars: out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bar(y: i32, m: u32, d: u32, close: f64, volume: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            open: close - 1.0,
            high: close + 2.0,
            low: close - 2.0,
            close,
            adj_close: close * 0.9,
            volume,
        }
    }

    fn table() -> PriceTable {
        PriceTable::new(
            AssetId::new("FRPT"),
            Granularity::Daily,
            vec![
                bar(2024, 1, 29, 10.0, 100.0),
                bar(2024, 1, 30, 12.0, 200.0),
                bar(2024, 1, 31, 11.0, 300.0),
                bar(2024, 2, 1, 14.0, 400.0),
                bar(2024, 2, 2, 13.0, 500.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_series_column_selection() {
        let t = table();
        let close = t.series(PriceColumn::Close).unwrap();
        let adj = t.series(PriceColumn::AdjClose).unwrap();
        assert_eq!(close.prices(), vec![10.0, 12.0, 11.0, 14.0, 13.0]);
        assert_relative_eq!(adj.prices()[0], 9.0);
    }

    #[test]
    fn test_summary() {
        let s = table().summary().unwrap();
        assert_eq!(s.bars, 5);
        assert_relative_eq!(s.largest_price_change, 4.0);
        assert_relative_eq!(s.average_volume, 300.0);
        assert_relative_eq!(s.last_close, 13.0);
    }

    #[test]
    fn test_summary_empty() {
        let t = PriceTable::new(AssetId::new("X"), Granularity::Daily, vec![]).unwrap();
        assert!(matches!(t.summary(), Err(RiskError::InsufficientData { .. })));
    }

    #[test]
    fn test_resample_monthly() {
        let monthly = table().resample(Granularity::Monthly);
        assert_eq!(monthly.granularity, Granularity::Monthly);
        assert_eq!(monthly.len(), 2);

        let jan = monthly.bars()[0];
        assert_eq!(jan.date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_relative_eq!(jan.open, 9.0);
        assert_relative_eq!(jan.high, 14.0);
        assert_relative_eq!(jan.low, 8.0);
        assert_relative_eq!(jan.close, 11.0);
        assert_relative_eq!(jan.volume, 600.0);
    }

    #[test]
    fn test_resample_weekly_single_week() {
        // 2024-01-29 is a Monday, so all five bars share ISO week 5.
        let weekly = table().resample(Granularity::Weekly);
        assert_eq!(weekly.len(), 1);
        assert_relative_eq!(weekly.bars()[0].close, 13.0);
        assert_relative_eq!(weekly.bars()[0].volume, 1500.0);
    }

    #[test]
    fn test_between() {
        let t = table();
        let sub = t.between(
            NaiveDate::from_ymd_opt(2024, 1, 30).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        );
        assert_eq!(sub.len(), 3);
    }
}
