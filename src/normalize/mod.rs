//! Raw provider table → canonical series.
//!
//! This module is responsible for turning a heterogeneous provider table
//! (wide or long) into a clean, year-ordered `SeriesResult`.
//!
//! - **Strict schema** for the identifying columns (`SchemaError`, no partial result)
//! - **Lenient cells**: unparseable values become absent, unparseable periods are dropped
//! - **Typed emptiness**: a valid query with no data is an `EmptyResult`, not an error

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::{EmptyReason, Normalized, RawTable, SeriesPoint, SeriesQuery, SeriesResult, TableShape};
use crate::error::SchemaError;

/// Period column names accepted in long tables (case-insensitive).
const PERIOD_COLUMNS: [&str; 5] = ["period", "time_period", "time", "date", "year"];
/// Value column names accepted in long tables (case-insensitive).
const VALUE_COLUMNS: [&str; 2] = ["value", "obs_value"];

/// Tokens providers use for "no observation".
const MISSING_TOKENS: [&str; 5] = [":", ".", "nan", "null", "na"];

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{4}").expect("valid year regex"));

/// Maps a dataset id to its unit label. Best effort: `None` is not an error.
pub trait UnitResolver {
    fn unit_for(&self, dataset_id: &str) -> Option<String>;
}

impl UnitResolver for HashMap<String, String> {
    fn unit_for(&self, dataset_id: &str) -> Option<String> {
        self.get(dataset_id).cloned()
    }
}

/// Normalize a provider table for one query.
pub fn normalize(raw: &RawTable, query: &SeriesQuery, units: &dyn UnitResolver) -> Result<Normalized, SchemaError> {
    let entity_col = find_entity_column(raw.columns()).ok_or_else(|| {
        SchemaError::new(format!(
            "no entity/time identifier column (expected a name containing `geo` and `time`) among: {}",
            raw.columns().join(", ")
        ))
    })?;

    let long_cols = match raw.shape() {
        TableShape::Long => Some(find_long_columns(raw.columns(), entity_col)?),
        TableShape::Wide => None,
    };

    let rows: Vec<&Vec<String>> = raw
        .rows()
        .iter()
        .filter(|row| matches_entity(RawTable::cell(row, entity_col), &query.entity_id))
        .collect();

    if rows.is_empty() {
        debug!(entity = %query.entity_id, rows = raw.rows().len(), "no rows for entity");
        return Ok(Normalized::empty(EmptyReason::NoEntityMatch));
    }

    let cells: Vec<(&str, &str)> = match long_cols {
        Some((period_col, value_col)) => rows
            .iter()
            .map(|row| (RawTable::cell(row, period_col), RawTable::cell(row, value_col)))
            .collect(),
        None => melt(raw.columns(), &rows, entity_col),
    };

    let dated: Vec<SeriesPoint> = cells
        .into_iter()
        .filter_map(|(label, value)| {
            let year = extract_year(label)?;
            Some(SeriesPoint {
                year,
                period_label: label.trim().to_string(),
                value: parse_value(value),
                unit: String::new(),
            })
        })
        .collect();

    if dated.is_empty() {
        return Ok(Normalized::empty(EmptyReason::NoParseablePeriod));
    }

    let in_range: Vec<SeriesPoint> = dated.into_iter().filter(|p| query.contains_year(p.year)).collect();
    if in_range.is_empty() {
        debug!(
            entity = %query.entity_id,
            year_start = query.year_start,
            year_end = query.year_end,
            "no periods inside year range"
        );
        return Ok(Normalized::empty(EmptyReason::NoYearMatch));
    }

    let unit = units.unit_for(&query.dataset_id).unwrap_or_default();
    let series = SeriesResult::new(&query.dataset_id, &query.entity_id, unit, in_range);
    debug!(
        dataset = %query.dataset_id,
        entity = %query.entity_id,
        points = series.len(),
        "normalized series"
    );
    Ok(Normalized::Series(series))
}

/// Index of the combined entity/time identifier column.
///
/// Matching is case-insensitive and substring-based: the name must contain
/// both `geo` and `time`, whatever separates them (`geo\time`,
/// `geo\TIME_PERIOD`, `GEO/TIME`, `geo_time`).
pub fn find_entity_column<S: AsRef<str>>(columns: &[S]) -> Option<usize> {
    columns.iter().position(|name| {
        let lower = name.as_ref().to_lowercase();
        lower.contains("geo") && lower.contains("time")
    })
}

/// Year of a period label: its first run of four consecutive digits.
///
/// `2020`, `2020Q1`, `2020M01` and `2020-01` all yield 2020; `Q1` yields `None`.
pub fn extract_year(period_label: &str) -> Option<i32> {
    YEAR_RE.find(period_label)?.as_str().parse().ok()
}

/// Parse a value cell, ignoring trailing provider flags (`"12.3 p"`).
pub fn parse_value(cell: &str) -> Option<f64> {
    let token = cell.split_whitespace().next()?;
    if MISSING_TOKENS.iter().any(|m| token.eq_ignore_ascii_case(m)) {
        return None;
    }
    let v = token.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

fn find_long_columns(columns: &[String], entity_col: usize) -> Result<(usize, usize), SchemaError> {
    let find = |names: &[&str]| {
        columns
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != entity_col)
            .find(|(_, c)| names.iter().any(|n| c.trim().eq_ignore_ascii_case(n)))
            .map(|(idx, _)| idx)
    };

    let period = find(&PERIOD_COLUMNS[..])
        .ok_or_else(|| SchemaError::new(format!("long table has no period column (one of: {})", PERIOD_COLUMNS.join(", "))))?;
    let value = find(&VALUE_COLUMNS[..])
        .ok_or_else(|| SchemaError::new(format!("long table has no value column (one of: {})", VALUE_COLUMNS.join(", "))))?;
    Ok((period, value))
}

/// Unpivot: one `(period_label, value)` pair per (row, non-identifier column).
fn melt<'a>(columns: &'a [String], rows: &[&'a Vec<String>], entity_col: usize) -> Vec<(&'a str, &'a str)> {
    let mut out = Vec::with_capacity(rows.len() * columns.len().saturating_sub(1));
    for &row in rows {
        for (idx, label) in columns.iter().enumerate() {
            if idx == entity_col {
                continue;
            }
            out.push((label.as_str(), RawTable::cell(row, idx)));
        }
    }
    out
}

fn matches_entity(cell: &str, entity_id: &str) -> bool {
    cell.trim().eq_ignore_ascii_case(entity_id.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmptyResult;

    fn wide(columns: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            TableShape::Wide,
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter().map(|r| r.iter().map(|c| c.to_string()).collect()).collect(),
        )
    }

    fn units() -> HashMap<String, String> {
        HashMap::from([("nama_10_gdp".to_string(), "Million EUR".to_string())])
    }

    fn series(n: Normalized) -> SeriesResult {
        match n {
            Normalized::Series(s) => s,
            Normalized::Empty(e) => panic!("expected series, got {e:?}"),
        }
    }

    #[test]
    fn entity_column_matching_ignores_case_and_punctuation() {
        assert_eq!(find_entity_column(&["unit", "geo\\time", "2020"]), Some(1));
        assert_eq!(find_entity_column(&["freq", "GEO\\TIME_PERIOD"]), Some(1));
        assert_eq!(find_entity_column(&["Geo.Time"]), Some(0));
        assert_eq!(find_entity_column(&["geo_time", "geo\\time"]), Some(0));
        assert_eq!(find_entity_column(&["geo", "time"]), None);
        assert_eq!(find_entity_column::<&str>(&[]), None);
    }

    #[test]
    fn extract_year_takes_first_four_digit_run() {
        assert_eq!(extract_year("2020"), Some(2020));
        assert_eq!(extract_year("2020Q1"), Some(2020));
        assert_eq!(extract_year("2020M01"), Some(2020));
        assert_eq!(extract_year(" 2019-12 "), Some(2019));
        assert_eq!(extract_year("Q1"), None);
        assert_eq!(extract_year("M12"), None);
        assert_eq!(extract_year("12345"), Some(1234));
        // Only ASCII digits count towards the year.
        assert_eq!(extract_year("x\u{0661}2020"), Some(2020));
    }

    #[test]
    fn parse_value_strips_flags_and_missing_markers() {
        assert_eq!(parse_value("12.5"), Some(12.5));
        assert_eq!(parse_value(" 12.5 p"), Some(12.5));
        assert_eq!(parse_value(":"), None);
        assert_eq!(parse_value(": c"), None);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("NaN"), None);
        assert_eq!(parse_value("inf"), None);
        assert_eq!(parse_value("abc"), None);
    }

    #[test]
    fn wide_table_is_melted_filtered_and_sorted() {
        let raw = wide(
            &["unit", "geo\\time", "2021 ", "2019 ", "2020 "],
            &[&["CP_MEUR", "AT", "3.0", "1.0", ": "], &["CP_MEUR", "DE", "9", "9", "9"]],
        );
        let query = SeriesQuery::new("nama_10_gdp", "AT", 2000, 2030);
        let s = series(normalize(&raw, &query, &units()).unwrap());

        let got: Vec<(i32, Option<f64>)> = s.points().iter().map(|p| (p.year, p.value)).collect();
        assert_eq!(got, vec![(2019, Some(1.0)), (2020, None), (2021, Some(3.0))]);
        assert_eq!(s.unit(), "Million EUR");
        assert_eq!(s.entity_id(), "AT");
    }

    #[test]
    fn long_table_uses_period_and_value_columns() {
        let raw = RawTable::new(
            TableShape::Long,
            vec!["geo\\time".into(), "period".into(), "value".into()],
            vec![
                vec!["USA".into(), "2020".into(), "5".into()],
                vec!["USA".into(), "2018".into(), "".into()],
                vec!["CAN".into(), "2019".into(), "7".into()],
            ],
        );
        let query = SeriesQuery::new("SP.POP.TOTL", "usa", 2000, 2030);
        let s = series(normalize(&raw, &query, &HashMap::new()).unwrap());
        let years: Vec<i32> = s.points().iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2018, 2020]);
        assert_eq!(s.unit(), "");
    }

    #[test]
    fn long_table_without_value_column_is_schema_error() {
        let raw = RawTable::new(
            TableShape::Long,
            vec!["geo\\time".into(), "period".into(), "obs".into()],
            vec![],
        );
        let err = normalize(&raw, &SeriesQuery::new("x", "AT", 2000, 2001), &HashMap::new()).unwrap_err();
        assert!(err.message.contains("value column"));
    }

    #[test]
    fn missing_identifier_column_is_schema_error() {
        let raw = wide(&["country", "2020"], &[&["AT", "1"]]);
        let result = normalize(&raw, &SeriesQuery::new("x", "AT", 2000, 2030), &HashMap::new());
        assert!(result.is_err());
    }

    #[test]
    fn empty_reasons_are_distinguished() {
        let raw = wide(&["geo\\time", "Q1", "2015"], &[&["AT", "1", "2"], &["FR", "1", ""]]);
        let units = HashMap::new();

        let no_entity = normalize(&raw, &SeriesQuery::new("x", "XX", 2000, 2030), &units).unwrap();
        assert_eq!(no_entity, Normalized::Empty(EmptyResult { reason: EmptyReason::NoEntityMatch }));

        let no_year = normalize(&raw, &SeriesQuery::new("x", "AT", 2016, 2030), &units).unwrap();
        assert_eq!(no_year, Normalized::empty(EmptyReason::NoYearMatch));

        let only_quarters = wide(&["geo\\time", "Q1", "Q2"], &[&["AT", "1", "2"]]);
        let no_period = normalize(&only_quarters, &SeriesQuery::new("x", "AT", 2000, 2030), &units).unwrap();
        assert_eq!(no_period, Normalized::empty(EmptyReason::NoParseablePeriod));
    }

    #[test]
    fn unparseable_period_is_dropped_not_fatal() {
        let raw = wide(&["geo\\time", "Q1", "2020Q1"], &[&["AT", "1", "2"]]);
        let s = series(normalize(&raw, &SeriesQuery::new("x", "AT", 2000, 2030), &HashMap::new()).unwrap());
        assert_eq!(s.len(), 1);
        assert_eq!(s.points()[0].year, 2020);
        assert_eq!(s.points()[0].period_label, "2020Q1");
    }

    #[test]
    fn year_bounds_are_inclusive() {
        let raw = wide(&["geo\\time", "2009", "2010", "2011", "2012"], &[&["AT", "1", "2", "3", "4"]]);
        let s = series(normalize(&raw, &SeriesQuery::new("x", "AT", 2010, 2011), &HashMap::new()).unwrap());
        let years: Vec<i32> = s.points().iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2010, 2011]);
    }
}
