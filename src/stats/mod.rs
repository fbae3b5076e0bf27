//! Derived statistics over a normalized series.
//!
//! All functions work on present values only and never return NaN or
//! infinity: degenerate inputs surface as `InsufficientDataError` (or, for
//! year-over-year pairs, as `percent: None`).

use crate::domain::SeriesResult;
use crate::error::InsufficientDataError;

/// Percentage change between the first and last present values.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryChange {
    pub first_year: i32,
    pub first_value: f64,
    pub last_year: i32,
    pub last_value: f64,
    pub percent: f64,
}

/// Change between two consecutive present-value points.
#[derive(Debug, Clone, PartialEq)]
pub struct YearChange {
    pub from_year: i32,
    pub year: i32,
    /// `None` when the earlier value is zero or the change overflows.
    pub percent: Option<f64>,
}

/// Summary statistics over present values (pandas `describe` layout).
#[derive(Debug, Clone, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n − 1); zero for a single value.
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

pub fn boundary_change(result: &SeriesResult) -> Result<BoundaryChange, InsufficientDataError> {
    let mut present = result.present();
    let Some((first, first_value)) = present.next() else {
        return Err(InsufficientDataError::new("no values in the selected range"));
    };
    let Some((last, last_value)) = present.last() else {
        return Err(InsufficientDataError::new("need at least two values to compute a change"));
    };
    if first_value == 0.0 {
        return Err(InsufficientDataError::new(format!(
            "first value ({}) is zero, percentage change is undefined",
            first.year
        )));
    }
    let Some(percent) = pct_change(first_value, last_value) else {
        return Err(InsufficientDataError::new(format!(
            "change from {} to {} is out of range",
            first.year, last.year
        )));
    };

    Ok(BoundaryChange {
        first_year: first.year,
        first_value,
        last_year: last.year,
        last_value,
        percent,
    })
}

/// Consecutive-pair changes over present values (by position, not year gap).
pub fn year_over_year(result: &SeriesResult) -> Vec<YearChange> {
    let present: Vec<_> = result.present().collect();
    present
        .windows(2)
        .map(|pair| {
            let (prev, prev_value) = pair[0];
            let (curr, curr_value) = pair[1];
            YearChange {
                from_year: prev.year,
                year: curr.year,
                percent: if prev_value == 0.0 { None } else { pct_change(prev_value, curr_value) },
            }
        })
        .collect()
}

pub fn describe(result: &SeriesResult) -> Result<Describe, InsufficientDataError> {
    let mut values: Vec<f64> = result.present().map(|(_, v)| v).collect();
    if values.is_empty() {
        return Err(InsufficientDataError::new("no values to describe"));
    }
    values.sort_by(f64::total_cmp);

    // Running mean: a plain sum overflows for values near f64::MAX.
    let mean = values.iter().enumerate().fold(0.0, |m, (i, v)| {
        let k = (i + 1) as f64;
        m + (v / k - m / k)
    });
    let std = sample_std(&values, mean);

    let describe = Describe {
        count: values.len(),
        mean,
        std,
        min: values[0],
        q1: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q3: quantile(&values, 0.75),
        max: values[values.len() - 1],
    };
    let fields = [
        describe.mean,
        describe.std,
        describe.q1,
        describe.median,
        describe.q3,
    ];
    if fields.iter().all(|f| f.is_finite()) {
        Ok(describe)
    } else {
        Err(InsufficientDataError::new("values are too large to summarize"))
    }
}

/// Finite percentage change, or `None` when it overflows.
fn pct_change(from: f64, to: f64) -> Option<f64> {
    let percent = (to - from) / from * 100.0;
    percent.is_finite().then_some(percent)
}

/// Sample standard deviation, computed on values scaled by the largest
/// magnitude so the squared deviations stay in range.
fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let scale = values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 {
        return 0.0;
    }
    let sum_sq: f64 = values
        .iter()
        .map(|v| (v / scale - mean / scale).powi(2))
        .sum();
    scale * (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}
