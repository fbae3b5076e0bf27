//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - produced by the normalizer and cached between queries
//! - rendered as terminal tables and exported to CSV
//! - cloned freely (a `SeriesResult` is never mutated after construction)

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::table::{RawTable, TableShape};

/// Statistics provider a series is fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    Eurostat,
    Faostat,
    WorldBank,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Eurostat, Provider::Faostat, Provider::WorldBank];

    pub fn display_name(self) -> &'static str {
        match self {
            Provider::Eurostat => "Eurostat",
            Provider::Faostat => "FAOSTAT",
            Provider::WorldBank => "World Bank",
        }
    }

    /// File-name friendly prefix used for CSV exports.
    pub fn export_prefix(self) -> &'static str {
        match self {
            Provider::Eurostat => "Eurostat",
            Provider::Faostat => "FAOSTAT",
            Provider::WorldBank => "WorldBank",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A single query against one provider.
///
/// `year_start <= year_end` is the caller's responsibility; the CLI validates it
/// before a query is ever built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesQuery {
    pub dataset_id: String,
    pub entity_id: String,
    pub year_start: i32,
    pub year_end: i32,
}

impl SeriesQuery {
    pub fn new(
        dataset_id: impl Into<String>,
        entity_id: impl Into<String>,
        year_start: i32,
        year_end: i32,
    ) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            entity_id: entity_id.into(),
            year_start,
            year_end,
        }
    }

    pub fn contains_year(&self, year: i32) -> bool {
        (self.year_start..=self.year_end).contains(&year)
    }
}

/// One observation of a normalized series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub year: i32,
    /// Raw provider period token (`2020`, `2020Q1`, `2020M01`, `2020-01`).
    pub period_label: String,
    /// `None` when the provider reported no usable number for this period.
    pub value: Option<f64>,
    pub unit: String,
}

/// A canonical time series for one `(dataset, entity)` pair.
///
/// Invariants, enforced by [`SeriesResult::new`]:
/// - points are strictly ascending by year (one point per year)
/// - every point carries the result's unit
/// - points with an absent value are kept
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesResult {
    dataset_id: String,
    entity_id: String,
    dataset_label: String,
    entity_label: String,
    unit: String,
    points: Vec<SeriesPoint>,
}

impl SeriesResult {
    /// Build a result from candidate points in table order.
    ///
    /// When several candidates share a year, a present value beats an absent
    /// one, then the greatest period label wins (`2020Q4` over `2020Q1`), then
    /// the earliest candidate.
    pub fn new(
        dataset_id: impl Into<String>,
        entity_id: impl Into<String>,
        unit: impl Into<String>,
        candidates: impl IntoIterator<Item = SeriesPoint>,
    ) -> Self {
        let dataset_id = dataset_id.into();
        let entity_id = entity_id.into();
        let unit = unit.into();

        let mut by_year: BTreeMap<i32, SeriesPoint> = BTreeMap::new();
        for candidate in candidates {
            match by_year.get(&candidate.year) {
                Some(current) if !supersedes(&candidate, current) => {}
                _ => {
                    by_year.insert(candidate.year, candidate);
                }
            }
        }

        let points = by_year
            .into_values()
            .map(|mut p| {
                p.unit.clone_from(&unit);
                p
            })
            .collect();

        Self {
            dataset_label: dataset_id.clone(),
            entity_label: entity_id.clone(),
            dataset_id,
            entity_id,
            unit,
            points,
        }
    }

    /// Replace the display labels (ids stay untouched).
    pub fn with_labels(mut self, dataset_label: impl Into<String>, entity_label: impl Into<String>) -> Self {
        self.dataset_label = dataset_label.into();
        self.entity_label = entity_label.into();
        self
    }

    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn dataset_label(&self) -> &str {
        &self.dataset_label
    }

    pub fn entity_label(&self) -> &str {
        &self.entity_label
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points that carry a value, in year order.
    pub fn present(&self) -> impl Iterator<Item = (&SeriesPoint, f64)> {
        self.points.iter().filter_map(|p| p.value.map(|v| (p, v)))
    }

    /// Copy of this result without the absent-value points.
    pub fn without_missing(&self) -> Self {
        Self {
            points: self.points.iter().filter(|p| p.value.is_some()).cloned().collect(),
            ..self.clone()
        }
    }

    /// Re-pivot to wide shape: one row for the entity, one column per period.
    ///
    /// Absent values become empty cells.
    pub fn to_wide(&self, id_column: &str) -> RawTable {
        let mut columns = Vec::with_capacity(self.points.len() + 1);
        columns.push(id_column.to_string());
        columns.extend(self.points.iter().map(|p| p.period_label.clone()));

        let mut row = Vec::with_capacity(columns.len());
        row.push(self.entity_id.clone());
        row.extend(
            self.points
                .iter()
                .map(|p| p.value.map(|v| v.to_string()).unwrap_or_default()),
        );

        RawTable::new(TableShape::Wide, columns, vec![row])
    }
}

fn supersedes(candidate: &SeriesPoint, current: &SeriesPoint) -> bool {
    match (candidate.value.is_some(), current.value.is_some()) {
        (true, false) => true,
        (false, true) => false,
        _ => candidate.period_label > current.period_label,
    }
}

/// Why a valid query produced no points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmptyReason {
    /// The table had no rows for the requested entity.
    NoEntityMatch,
    /// Rows existed, but none of their periods fell inside the year range.
    NoYearMatch,
    /// Rows existed, but no period label contained a four-digit year.
    NoParseablePeriod,
}

impl EmptyReason {
    pub fn code(self) -> &'static str {
        match self {
            EmptyReason::NoEntityMatch => "no-entity-match",
            EmptyReason::NoYearMatch => "no-year-match",
            EmptyReason::NoParseablePeriod => "no-parseable-period",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyResult {
    pub reason: EmptyReason,
}

/// Outcome of a successful `normalize` call.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Series(SeriesResult),
    Empty(EmptyResult),
}

impl Normalized {
    pub fn empty(reason: EmptyReason) -> Self {
        Normalized::Empty(EmptyResult { reason })
    }

    pub fn as_series(&self) -> Option<&SeriesResult> {
        match self {
            Normalized::Series(series) => Some(series),
            Normalized::Empty(_) => None,
        }
    }
}

/// Display labels for a query, resolved from the catalog by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryLabels {
    pub dataset: String,
    pub country: String,
}

/// A full `ostat fetch` run as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub provider: Provider,
    pub query: SeriesQuery,
    pub labels: QueryLabels,
    pub drop_missing: bool,
    pub export: Option<PathBuf>,
}
