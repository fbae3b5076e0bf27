//! Export a normalized series to CSV.
//!
//! The columns mirror the terminal table so the file opens cleanly in a
//! spreadsheet. Absent values are written as empty cells.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::{Provider, SeriesResult};
use crate::error::AppError;
use crate::report::SERIES_COLUMNS;

/// Write `result` to `path`, creating or truncating the file.
pub fn write_series_csv(path: &Path, result: &SeriesResult) -> Result<(), AppError> {
    let writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_rows(writer, result)?;
    info!(path = %path.display(), rows = result.len(), "wrote CSV export");
    Ok(())
}

/// The CSV export as an in-memory string.
pub fn series_csv_string(result: &SeriesResult) -> Result<String, AppError> {
    let mut buf = Vec::new();
    write_rows(csv::Writer::from_writer(&mut buf), result)?;
    String::from_utf8(buf).map_err(|e| AppError::new(2, format!("Export CSV is not valid UTF-8: {e}")))
}

fn write_rows<W: Write>(mut writer: csv::Writer<W>, result: &SeriesResult) -> Result<(), AppError> {
    let row_err = |e: csv::Error| AppError::new(2, format!("Failed to write export CSV row: {e}"));

    writer
        .write_record(SERIES_COLUMNS)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;
    for p in result.points() {
        let year = p.year.to_string();
        let value = p.value.map(|v| v.to_string()).unwrap_or_default();
        writer
            .write_record([
                year.as_str(),
                p.period_label.as_str(),
                result.entity_label(),
                result.dataset_label(),
                value.as_str(),
                p.unit.as_str(),
            ])
            .map_err(row_err)?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))
}

/// `Eurostat_GDP_at_market_prices_Austria.csv`
pub fn default_export_name(provider: Provider, dataset_label: &str, country: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}_{}_{}.csv",
        provider.export_prefix(),
        file_token(dataset_label),
        file_token(country)
    ))
}

fn file_token(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace(['/', '\\'], "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeriesPoint;

    #[test]
    fn export_name_replaces_spaces() {
        assert_eq!(
            default_export_name(Provider::Eurostat, "GDP at market prices", "Austria"),
            PathBuf::from("Eurostat_GDP_at_market_prices_Austria.csv")
        );
        assert_eq!(
            default_export_name(Provider::WorldBank, "CO2 emissions (kt)", "United States"),
            PathBuf::from("WorldBank_CO2_emissions_(kt)_United_States.csv")
        );
        assert_eq!(
            default_export_name(Provider::Faostat, "Wheat Production", "USA"),
            PathBuf::from("FAOSTAT_Wheat_Production_USA.csv")
        );
    }

    #[test]
    fn csv_quotes_labels_and_blanks_missing_values() {
        let points = vec![
            SeriesPoint {
                year: 2019,
                period_label: "2019".to_string(),
                value: Some(1.5),
                unit: String::new(),
            },
            SeriesPoint {
                year: 2020,
                period_label: "2020".to_string(),
                value: None,
                unit: String::new(),
            },
        ];
        let result = SeriesResult::new("ds", "AT", "Million EUR", points).with_labels("GDP, current prices", "Austria");
        let text = series_csv_string(&result).unwrap();
        assert_eq!(
            text,
            "Year,Period,Country,Dataset,Value,Unit\n\
             2019,2019,Austria,\"GDP, current prices\",1.5,Million EUR\n\
             2020,2020,Austria,\"GDP, current prices\",,Million EUR\n"
        );
    }
}
