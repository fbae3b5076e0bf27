//! Deterministic FAOSTAT sample source.
//!
//! FAOSTAT has no stable keyless JSON endpoint, so observations are generated
//! from a per-metric base value with a 2% yearly trend and a per-item scale.
//! The same query always yields the same table.

use tracing::debug;

use crate::catalog::faostat::FaoDataset;
use crate::data::SeriesSource;
use crate::data::worldbank::long_table;
use crate::domain::{Provider, RawTable, SeriesQuery};
use crate::error::FetchError;

const TREND_PER_YEAR: f64 = 0.02;

const BASE_VALUES: &[(&str, f64)] = &[
    ("Production", 1_000_000.0),
    ("Yield", 30.0),
    ("Area Harvested", 50_000.0),
    ("Import Quantity", 500_000.0),
    ("Export Quantity", 300_000.0),
    ("Value", 250_000_000.0),
    ("Food Supply", 2500.0),
    ("Dietary Energy Supply", 3000.0),
    ("Producer Price", 150.0),
    ("Consumer Price", 200.0),
    ("Emissions", 50_000.0),
    ("Carbon Stock", 1_000_000.0),
];
const DEFAULT_BASE: f64 = 1000.0;

#[derive(Debug, Default, Clone, Copy)]
pub struct FaostatSample;

impl SeriesSource for FaostatSample {
    fn provider(&self) -> Provider {
        Provider::Faostat
    }

    fn fetch(&self, query: &SeriesQuery) -> Result<RawTable, FetchError> {
        let dataset = FaoDataset::parse(&query.dataset_id).ok_or_else(|| FetchError::Malformed {
            provider: Provider::Faostat,
            message: format!(
                "dataset id '{}' is not of the form DOMAIN:Metric:item",
                query.dataset_id
            ),
        })?;

        let rows: Vec<Vec<String>> = (query.year_start..=query.year_end)
            .map(|year| {
                let value = sample_value(&dataset, query.year_start, year);
                vec![query.entity_id.clone(), year.to_string(), value.to_string()]
            })
            .collect();
        debug!(dataset = %query.dataset_id, area = %query.entity_id, rows = rows.len(), "generated FAOSTAT sample");
        Ok(long_table(rows))
    }
}

pub fn base_value(metric: &str) -> f64 {
    BASE_VALUES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(metric))
        .map(|&(_, v)| v)
        .unwrap_or(DEFAULT_BASE)
}

/// `trunc(base * (1 + 0.02 * (year - start)) * (0.95 + 0.1 * (item % 10) / 10))`
pub fn sample_value(dataset: &FaoDataset<'_>, year_start: i32, year: i32) -> f64 {
    let item = dataset.item_code.parse::<u64>().unwrap_or(0);
    let trend = 1.0 + TREND_PER_YEAR * f64::from(year - year_start);
    let item_scale = 0.95 + 0.1 * (item % 10) as f64 / 10.0;
    (base_value(dataset.metric) * trend * item_scale).trunc()
}
