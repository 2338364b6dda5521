//! CSV export of series, tables and scenario curves.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::NaiveDate;
use marisk_core::{PriceTable, ReturnSeries};
use marisk_portfolio::ScenarioResult;
use serde::Serialize;

use crate::error::{DataError, DataResult};

#[derive(Serialize)]
struct ReturnRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Return")]
    value: f64,
}

fn export_err(e: impl std::fmt::Display) -> DataError {
    DataError::Export(e.to_string())
}

/// Writes `Date,Return` rows.
pub fn write_returns_csv<W: Write>(writer: W, returns: &ReturnSeries) -> DataResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for p in returns.points() {
        csv.serialize(ReturnRow {
            date: p.date,
            value: p.value,
        })
        .map_err(export_err)?;
    }
    csv.flush().map_err(export_err)
}

/// Writes `Date,Open,High,Low,Close,Adj Close,Volume` rows.
pub fn write_price_table_csv<W: Write>(writer: W, table: &PriceTable) -> DataResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for bar in table.bars() {
        csv.serialize(bar).map_err(export_err)?;
    }
    csv.flush().map_err(export_err)
}

/// Writes one growth curve column per scenario, joined on date.
///
/// The header is `Date` followed by the scenario names. A scenario without a
/// value on some date leaves that cell empty.
pub fn write_scenarios_csv<W: Write>(writer: W, results: &[ScenarioResult]) -> DataResult<()> {
    let mut rows: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();
    for (i, result) in results.iter().enumerate() {
        for p in &result.growth {
            rows.entry(p.date).or_insert_with(|| vec![None; results.len()])[i] = Some(p.value);
        }
    }

    let mut csv = csv::Writer::from_writer(writer);
    let mut header = vec!["Date".to_string()];
    header.extend(results.iter().map(|r| r.scenario_name.clone()));
    csv.write_record(&header).map_err(export_err)?;

    for (date, values) in rows {
        let mut record = vec![date.to_string()];
        record.extend(values.iter().map(|v| v.map(|x| x.to_string()).unwrap_or_default()));
        csv.write_record(&record).map_err(export_err)?;
    }
    csv.flush().map_err(export_err)
}

/// Renders CSV into a string using one of the writers above.
pub fn to_csv_string(
    write: impl FnOnce(&mut Vec<u8>) -> DataResult<()>,
) -> DataResult<String> {
    let mut buf = Vec::new();
    write(&mut buf)?;
    String::from_utf8(buf).map_err(export_err)
}
