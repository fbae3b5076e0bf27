//! Table and series builders for readable test fixtures.
//!
//! These panic on invalid input rather than returning `Result`.

use std::collections::HashMap;

use open_stats::domain::{Normalized, RawTable, SeriesPoint, SeriesResult, TableShape};

pub const ENTITY: &str = "geo\\time";

pub fn wide_table(columns: &[&str], rows: &[&[&str]]) -> RawTable {
    table(TableShape::Wide, columns, rows)
}

pub fn long_table(columns: &[&str], rows: &[&[&str]]) -> RawTable {
    table(TableShape::Long, columns, rows)
}

fn table(shape: TableShape, columns: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable::new(
        shape,
        columns.iter().map(|c| c.to_string()).collect(),
        rows.iter().map(|r| r.iter().map(|c| c.to_string()).collect()).collect(),
    )
}

/// A tiny Eurostat-like GDP table: Austria and Germany, 2018–2020.
pub fn gdp_table() -> RawTable {
    wide_table(
        &["unit", ENTITY, "2018", "2019", "2020"],
        &[
            &["CP_MEUR", "AT", "385274.1", "397519.1", "381042.8 p"],
            &["CP_MEUR", "DE", "3365450.0", "3473350.0", ":"],
        ],
    )
}

pub fn gdp_units() -> HashMap<String, String> {
    HashMap::from([("nama_10_gdp".to_string(), "Million EUR".to_string())])
}

/// Series of annual points with period labels equal to the year.
pub fn annual_series(values: &[(i32, Option<f64>)]) -> SeriesResult {
    let points = values.iter().map(|&(year, value)| SeriesPoint {
        year,
        period_label: year.to_string(),
        value,
        unit: String::new(),
    });
    SeriesResult::new("nama_10_gdp", "AT", "Million EUR", points)
}

pub fn expect_series(outcome: Normalized) -> SeriesResult {
    match outcome {
        Normalized::Series(series) => series,
        Normalized::Empty(empty) => panic!("expected a series, got {empty:?}"),
    }
}
