//! Formatted terminal output for a normalized series.
//!
//! We keep formatting code in one place so:
//! - the normalizer and stats code stay free of presentation concerns
//! - output changes are localized (important for snapshot tests)

use crate::domain::{EmptyReason, SeriesResult};
use crate::error::InsufficientDataError;
use crate::stats::{BoundaryChange, Describe, YearChange};

/// Column headers of the series table, shared with the CSV export.
pub const SERIES_COLUMNS: [&str; 6] = ["Year", "Period", "Country", "Dataset", "Value", "Unit"];

/// First value, last value and change over the period.
pub fn format_key_metrics(result: &SeriesResult, boundary: &Result<BoundaryChange, InsufficientDataError>) -> String {
    let mut out = String::new();
    out.push_str("Key metrics:\n");

    let unit = result.unit();
    let mut present = result.present();
    let first = present.next();
    let last = present.last().or(first);

    match (first, last) {
        (Some((first_point, first_value)), Some((last_point, last_value))) => {
            out.push_str(&format!(
                "- First year value: {} ({})\n",
                with_unit(&fmt_number(first_value, 2), unit),
                first_point.year
            ));
            out.push_str(&format!(
                "- Last year value : {} ({})\n",
                with_unit(&fmt_number(last_value, 2), unit),
                last_point.year
            ));
        }
        _ => out.push_str("- No valid data points available for metrics.\n"),
    }

    match boundary {
        Ok(change) => out.push_str(&format!(
            "- Change over period: {:.1}% ({} to {})\n",
            change.percent, change.first_year, change.last_year
        )),
        Err(err) => out.push_str(&format!("- Change over period: n/a ({})\n", err.reason)),
    }

    out
}

pub fn format_series_table(result: &SeriesResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} in {}\n", result.dataset_label(), result.entity_label()));

    let [year, period, country, dataset, value, unit] = SERIES_COLUMNS;
    out.push_str(
        format!("{year:<6} {period:<10} {country:<20} {dataset:<32} {value:>18} {unit:<16}\n").trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<6} {:-<10} {:-<20} {:-<32} {:-<18} {:-<16}\n", "", "", "", "", "", "").trim_end());
    out.push('\n');

    for p in result.points() {
        let value = p.value.map(|v| fmt_number(v, 2)).unwrap_or_else(|| "-".to_string());
        out.push_str(
            format!(
                "{:<6} {:<10} {:<20} {:<32} {:>18} {:<16}\n",
                p.year,
                truncate(&p.period_label, 10),
                truncate(result.entity_label(), 20),
                truncate(result.dataset_label(), 32),
                value,
                truncate(&p.unit, 16),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

pub fn format_describe(describe: &Result<Describe, InsufficientDataError>) -> String {
    let mut out = String::new();
    out.push_str("Descriptive statistics:\n");
    let d = match describe {
        Ok(d) => d,
        Err(err) => {
            out.push_str(&format!("  n/a ({})\n", err.reason));
            return out;
        }
    };

    let rows = [
        ("count", d.count.to_string()),
        ("mean", fmt_number(d.mean, 2)),
        ("std", fmt_number(d.std, 2)),
        ("min", fmt_number(d.min, 2)),
        ("25%", fmt_number(d.q1, 2)),
        ("50%", fmt_number(d.median, 2)),
        ("75%", fmt_number(d.q3, 2)),
        ("max", fmt_number(d.max, 2)),
    ];
    for (label, value) in rows {
        out.push_str(&format!("  {label:<6} {value:>20}\n"));
    }
    out
}

/// Annual changes as signed percentages (`+10.00%`).
pub fn format_year_over_year(changes: &[YearChange]) -> String {
    let mut out = String::new();
    out.push_str("Annual changes:\n");
    if changes.is_empty() {
        out.push_str("  n/a (fewer than 2 values)\n");
        return out;
    }
    for c in changes {
        let pct = match c.percent {
            Some(p) => format!("{p:+.2}%"),
            None => "n/a".to_string(),
        };
        out.push_str(&format!("  {:<6} {:>12}\n", c.year, pct));
    }
    out
}

/// User-facing message for an empty outcome.
pub fn empty_message(reason: EmptyReason, country: &str) -> String {
    match reason {
        EmptyReason::NoEntityMatch => format!("No data available for {country}."),
        EmptyReason::NoYearMatch => "No data available for the selected year range.".to_string(),
        EmptyReason::NoParseablePeriod => "No data available for the selected parameters.".to_string(),
    }
}

/// `1234567.891` -> `1,234,567.89` (with `decimals = 2`).
pub fn fmt_number(v: f64, decimals: usize) -> String {
    let raw = format!("{:.*}", decimals, v.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if v < 0.0 && raw.chars().any(|c| c.is_ascii_digit() && c != '0') { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

fn with_unit(value: &str, unit: &str) -> String {
    if unit.is_empty() {
        value.to_string()
    } else {
        format!("{value} {unit}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeriesPoint;
    use crate::stats::{boundary_change, describe, year_over_year};

    fn series(values: &[(i32, Option<f64>)]) -> SeriesResult {
        let points: Vec<_> = values
            .iter()
            .map(|&(year, value)| SeriesPoint {
                year,
                period_label: year.to_string(),
                value,
                unit: String::new(),
            })
            .collect();
        SeriesResult::new("nama_10_gdp", "AT", "Million EUR", points).with_labels("GDP at market prices", "Austria")
    }

    #[test]
    fn numbers_are_grouped() {
        assert_eq!(fmt_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(fmt_number(999.0, 2), "999.00");
        assert_eq!(fmt_number(-1000.0, 0), "-1,000");
        assert_eq!(fmt_number(-0.001, 2), "0.00");
    }

    #[test]
    fn key_metrics_show_first_last_and_change() {
        let s = series(&[(2010, Some(100.0)), (2015, None), (2020, Some(150.0))]);
        let text = format_key_metrics(&s, &boundary_change(&s));
        assert!(text.contains("First year value: 100.00 Million EUR (2010)"));
        assert!(text.contains("Last year value : 150.00 Million EUR (2020)"));
        assert!(text.contains("Change over period: 50.0% (2010 to 2020)"));
    }

    #[test]
    fn key_metrics_without_values() {
        let s = series(&[(2010, None)]);
        let text = format_key_metrics(&s, &boundary_change(&s));
        assert!(text.contains("No valid data points"));
        assert!(text.contains("Change over period: n/a"));
    }

    #[test]
    fn table_lists_every_point_with_dash_for_missing() {
        let s = series(&[(2019, Some(1.5)), (2020, None)]);
        let text = format_series_table(&s);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "GDP at market prices in Austria");
        assert!(lines[1].starts_with("Year   Period"));
        assert_eq!(lines.len(), 5);
        assert!(lines[4].contains(" - Million EUR"));
        assert!(lines[3].contains("1.50"));
    }

    #[test]
    fn yoy_is_signed() {
        let s = series(&[(2018, Some(100.0)), (2019, Some(110.0)), (2020, Some(99.0))]);
        let text = format_year_over_year(&year_over_year(&s));
        assert!(text.contains("+10.00%"));
        assert!(text.contains("-10.00%"));
    }

    #[test]
    fn describe_block() {
        let s = series(&[(2019, Some(1.0)), (2020, Some(3.0))]);
        let text = format_describe(&describe(&s));
        assert!(text.contains("count"));
        assert!(text.contains("2.00"));
        assert!(format_describe(&describe(&series(&[]))).contains("n/a"));
    }

    #[test]
    fn empty_messages_differ_per_reason() {
        let a = empty_message(EmptyReason::NoEntityMatch, "Austria");
        let b = empty_message(EmptyReason::NoYearMatch, "Austria");
        let c = empty_message(EmptyReason::NoParseablePeriod, "Austria");
        assert_eq!(a, "No data available for Austria.");
        assert_ne!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
