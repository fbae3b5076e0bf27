//! Shared query pipeline used by both `ostat fetch` and the interactive picker.
//!
//! cache lookup -> fetch -> normalize -> label -> cache insert -> derived stats
//!
//! The front-ends only deal with presentation (printing, prompting, export).

use std::time::Instant;

use tracing::info;

use crate::cache::{CacheKey, SeriesCache};
use crate::data::SeriesSource;
use crate::domain::{Normalized, QueryLabels, SeriesQuery, SeriesResult};
use crate::error::{AppError, InsufficientDataError};
use crate::normalize::{UnitResolver, normalize};
use crate::stats::{BoundaryChange, Describe, YearChange, boundary_change, describe, year_over_year};

/// Derived statistics for a non-empty series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub boundary: Result<BoundaryChange, InsufficientDataError>,
    pub yoy: Vec<YearChange>,
    pub describe: Result<Describe, InsufficientDataError>,
}

impl SeriesSummary {
    pub fn of(result: &SeriesResult) -> Self {
        Self {
            boundary: boundary_change(result),
            yoy: year_over_year(result),
            describe: describe(result),
        }
    }
}

/// Outputs of one query.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub outcome: Normalized,
    /// `Some` exactly when `outcome` is a series.
    pub summary: Option<SeriesSummary>,
    /// The outcome came from the cache; no fetch happened.
    pub cached: bool,
}

impl RunOutput {
    pub fn series(&self) -> Option<&SeriesResult> {
        self.outcome.as_series()
    }

    /// The same output with absent-value points removed from the series.
    ///
    /// The summary is unchanged: statistics only ever use present values.
    pub fn without_missing(&self) -> RunOutput {
        let outcome = match &self.outcome {
            Normalized::Series(series) => Normalized::Series(series.without_missing()),
            empty => empty.clone(),
        };
        RunOutput {
            outcome,
            summary: self.summary.clone(),
            cached: self.cached,
        }
    }
}

/// Run `query` against `source`, going through `cache`.
///
/// Fetch and schema failures propagate and leave the cache untouched.
pub fn run_query(
    source: &dyn SeriesSource,
    units: &dyn UnitResolver,
    cache: &mut SeriesCache,
    query: &SeriesQuery,
    labels: &QueryLabels,
    now: Instant,
) -> Result<RunOutput, AppError> {
    let key = CacheKey::new(source.provider(), query);
    let mut fetched = false;

    let outcome = cache.get_or_try_insert_with(key, now, || -> Result<Normalized, AppError> {
        fetched = true;
        let raw = source.fetch(query)?;
        let normalized = normalize(&raw, query, units)?;
        Ok(apply_labels(normalized, labels))
    })?;

    match &outcome {
        Normalized::Series(series) => {
            info!(provider = %source.provider(), points = series.len(), cached = !fetched, "series ready")
        }
        Normalized::Empty(empty) => {
            info!(provider = %source.provider(), reason = empty.reason.code(), cached = !fetched, "empty result")
        }
    }

    let summary = outcome.as_series().map(SeriesSummary::of);
    Ok(RunOutput {
        outcome,
        summary,
        cached: !fetched,
    })
}

fn apply_labels(outcome: Normalized, labels: &QueryLabels) -> Normalized {
    match outcome {
        Normalized::Series(series) => {
            let dataset = non_empty_or(&labels.dataset, series.dataset_id());
            let country = non_empty_or(&labels.country, series.entity_id());
            Normalized::Series(series.with_labels(dataset, country))
        }
        empty => empty,
    }
}

fn non_empty_or(label: &str, fallback: &str) -> String {
    if label.trim().is_empty() {
        fallback.to_string()
    } else {
        label.to_string()
    }
}
