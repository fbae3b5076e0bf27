//! Eurostat SDMX dissemination API (TSV bulk format).
//!
//! The TSV layout is wide: the first header cell lists the dimension names
//! separated by commas and ends with the combined `geo\TIME_PERIOD` column,
//! the remaining header cells are periods. Every data row mirrors that.
//!
//! ```text
//! freq,unit,na_item,geo\TIME_PERIOD	2019 	2020
//! A,CP_MEUR,B1GQ,AT	397519.1 	381042.8 p
//! ```

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::config::Settings;
use crate::data::SeriesSource;
use crate::data::http::{HttpClient, RetryConfig};
use crate::domain::{Provider, RawTable, SeriesQuery, TableShape};
use crate::error::FetchError;

pub struct EurostatClient {
    http: HttpClient,
    base_url: String,
}

impl EurostatClient {
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        Ok(Self {
            http: HttpClient::new(Provider::Eurostat, settings.http_timeout, RetryConfig::default())?,
            base_url: settings.eurostat_url.clone(),
        })
    }
}

impl SeriesSource for EurostatClient {
    fn provider(&self) -> Provider {
        Provider::Eurostat
    }

    fn fetch(&self, query: &SeriesQuery) -> Result<RawTable, FetchError> {
        let url = format!("{}/{}", self.base_url, query.dataset_id);
        let body = self.http.get_text(
            &url,
            &[("format", "TSV".to_string()), ("compressed", "false".to_string())],
        )?;

        let mut table = parse_tsv(&body)?;
        let dimensions = Catalog::for_provider(Provider::Eurostat).dimensions(&query.dataset_id);
        apply_dimension_filters(&mut table, dimensions);
        info!(dataset = %query.dataset_id, rows = table.rows().len(), "fetched Eurostat table");
        Ok(table)
    }
}

/// Parse a Eurostat TSV payload into a wide table.
///
/// Rows whose dimension count does not match the header are skipped.
pub fn parse_tsv(body: &str) -> Result<RawTable, FetchError> {
    let mut lines = body.lines().filter(|l| !l.trim().is_empty());
    let header = lines.next().ok_or_else(|| FetchError::Malformed {
        provider: Provider::Eurostat,
        message: "empty TSV payload".to_string(),
    })?;

    let mut header_cells = header.split('\t');
    let dims: Vec<String> = header_cells
        .next()
        .unwrap_or_default()
        .split(',')
        .map(|d| d.trim().to_string())
        .collect();
    let periods: Vec<String> = header_cells.map(|p| p.trim().to_string()).collect();
    if periods.is_empty() {
        return Err(FetchError::Malformed {
            provider: Provider::Eurostat,
            message: "TSV header has no period columns".to_string(),
        });
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for line in lines {
        let mut cells = line.split('\t');
        let keys: Vec<String> = cells
            .next()
            .unwrap_or_default()
            .split(',')
            .map(|k| k.trim().to_string())
            .collect();
        if keys.len() != dims.len() {
            skipped += 1;
            continue;
        }
        let mut row = keys;
        row.extend(cells.map(|c| c.trim().to_string()));
        rows.push(row);
    }
    if skipped > 0 {
        warn!(skipped, "skipped Eurostat rows with mismatched dimensions");
    }

    let mut columns = dims;
    columns.extend(periods);
    Ok(RawTable::new(TableShape::Wide, columns, rows))
}

/// Narrow a multi-dimension table to one series per country.
///
/// Best effort: filters on absent columns are ignored, and a filter that
/// would drop every row is skipped.
pub fn apply_dimension_filters(table: &mut RawTable, filters: &[(&str, &str)]) {
    for &(dimension, wanted) in filters {
        let Some(col) = table.column_index(dimension) else {
            debug!(dimension, "dimension not present, filter ignored");
            continue;
        };
        let matching = table
            .rows()
            .iter()
            .filter(|row| RawTable::cell(row, col).eq_ignore_ascii_case(wanted))
            .count();
        if matching == 0 {
            warn!(dimension, wanted, "dimension filter matches no rows, skipped");
            continue;
        }
        table.retain_rows(|row| RawTable::cell(row, col).eq_ignore_ascii_case(wanted));
    }
}
