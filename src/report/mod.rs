//! Reporting utilities: plain-text rendering of a series and its statistics.

mod format;

pub use format::*;

use crate::app::pipeline::RunOutput;
use crate::catalog::Catalog;
use crate::domain::{Normalized, Provider};

/// Menu listing for `ostat catalog`.
pub fn format_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== {} (years {}+, default start {}) ===\n",
        catalog.provider.display_name(),
        catalog.min_year,
        catalog.default_start_year
    ));

    out.push_str("\nDatasets:\n");
    for domain in catalog.domains {
        out.push_str(&format!("{}\n", domain.name));
        for indicator in domain.indicators {
            let id = match catalog.provider {
                Provider::Faostat => format!("{}:{}:<item>", domain.code, indicator.id),
                _ => indicator.id.to_string(),
            };
            let unit = indicator.unit.unwrap_or("");
            out.push_str(format!("  {:<28} {:<40} {unit}\n", id, indicator.label).trim_end());
            out.push('\n');
        }
    }

    if !catalog.item_groups.is_empty() {
        out.push_str("\nItems:\n");
        for group in catalog.item_groups {
            out.push_str(&format!("{}\n", group.name));
            for item in group.items {
                out.push_str(&format!("  {:<8} {}\n", item.code, item.name));
            }
        }
    }

    out.push_str("\nCountries:\n");
    for region in catalog.regions {
        out.push_str(&format!("{}\n", region.name));
        for country in region.countries {
            out.push_str(&format!("  {:<8} {}\n", country.code, country.name));
        }
    }
    out
}

/// Full terminal report for one query outcome.
pub fn format_run(run: &RunOutput, country_label: &str) -> String {
    match (&run.outcome, &run.summary) {
        (Normalized::Series(series), Some(summary)) => {
            let mut out = String::new();
            out.push_str(&format_key_metrics(series, &summary.boundary));
            out.push('\n');
            out.push_str(&format_series_table(series));
            out.push('\n');
            out.push_str(&format_describe(&summary.describe));
            out.push('\n');
            out.push_str(&format_year_over_year(&summary.yoy));
            out
        }
        (Normalized::Series(series), None) => format_series_table(series),
        (Normalized::Empty(empty), _) => empty_message(empty.reason, country_label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::SeriesSummary;
    use crate::domain::{EmptyReason, SeriesPoint, SeriesResult};

    #[test]
    fn catalog_lists_datasets_and_countries() {
        let text = format_catalog(Catalog::for_provider(Provider::Eurostat));
        assert!(text.starts_with("=== Eurostat"));
        assert!(text.contains("nama_10_gdp"));
        assert!(text.contains("  AT       Austria"));
        assert!(!text.contains("Items:"));

        let fao = format_catalog(Catalog::for_provider(Provider::Faostat));
        assert!(fao.contains("QCL:Production:<item>"));
        assert!(fao.contains("  15       Wheat"));
    }

    #[test]
    fn run_report_sections() {
        let series = SeriesResult::new(
            "nama_10_gdp",
            "AT",
            "Million EUR",
            vec![
                SeriesPoint {
                    year: 2019,
                    period_label: "2019".to_string(),
                    value: Some(100.0),
                    unit: String::new(),
                },
                SeriesPoint {
                    year: 2020,
                    period_label: "2020".to_string(),
                    value: Some(90.0),
                    unit: String::new(),
                },
            ],
        );
        let run = RunOutput {
            summary: Some(SeriesSummary::of(&series)),
            outcome: Normalized::Series(series),
            cached: false,
        };
        let text = format_run(&run, "Austria");
        assert!(text.contains("Key metrics:"));
        assert!(text.contains("Descriptive statistics:"));
        assert!(text.contains("-10.00%"));

        let empty = RunOutput {
            outcome: Normalized::empty(EmptyReason::NoYearMatch),
            summary: None,
            cached: true,
        };
        assert_eq!(format_run(&empty, "Austria"), "No data available for the selected year range.");
    }
}
