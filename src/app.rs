//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads settings and initialises logging
//! - parses CLI arguments
//! - runs queries through the shared pipeline
//! - prints reports and writes optional exports

use std::io;
use std::path::Path;
use std::time::Instant;

use chrono::Datelike;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cache::SeriesCache;
use crate::catalog::{Catalog, faostat};
use crate::cli::picker::Prompter;
use crate::cli::{CatalogArgs, Command, FetchArgs, PickArgs};
use crate::config::Settings;
use crate::domain::{FetchConfig, Normalized, Provider, QueryLabels, SeriesQuery};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `ostat` binary.
pub fn run() -> Result<(), AppError> {
    // `ostat` and `ostat -p eurostat` behave like `ostat pick ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let settings = Settings::from_env()?;
    init_tracing(&settings.log_filter);
    debug!(?settings, "settings loaded");

    match cli.command {
        Command::Fetch(args) => handle_fetch(args, &settings),
        Command::Catalog(args) => handle_catalog(args),
        Command::Pick(args) => handle_pick(args, &settings),
    }
}

fn init_tracing(filter: &str) {
    let env = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER));
    // A second initialisation (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_fetch(args: FetchArgs, settings: &Settings) -> Result<(), AppError> {
    let config = fetch_config_from_args(&args, current_year())?;
    let catalog = Catalog::for_provider(config.provider);
    let source = crate::data::source_for(config.provider, settings)?;
    let mut cache = SeriesCache::new(settings.cache_ttl);

    let run = pipeline::run_query(
        source.as_ref(),
        catalog,
        &mut cache,
        &config.query,
        &config.labels,
        Instant::now(),
    )?;
    let run = if config.drop_missing { run.without_missing() } else { run };

    match &run.outcome {
        Normalized::Empty(empty) => Err(AppError::new(
            3,
            crate::report::empty_message(empty.reason, &config.labels.country),
        )),
        Normalized::Series(series) => {
            println!("{}", crate::report::format_run(&run, &config.labels.country));
            if let Some(path) = &config.export {
                crate::io::export::write_series_csv(path, series)?;
                println!("Exported {} row(s) to {}", series.len(), path.display());
            }
            Ok(())
        }
    }
}

fn handle_catalog(args: CatalogArgs) -> Result<(), AppError> {
    print!("{}", crate::report::format_catalog(Catalog::for_provider(args.provider)));
    Ok(())
}

fn handle_pick(args: PickArgs, settings: &Settings) -> Result<(), AppError> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let mut cache = SeriesCache::new(settings.cache_ttl);
    let this_year = current_year();

    loop {
        let provider = match args.provider {
            Some(p) => p,
            None => {
                let names: Vec<String> = Provider::ALL.iter().map(|p| p.display_name().to_string()).collect();
                Provider::ALL[prompter.choose("Provider", &names)?]
            }
        };
        let catalog = Catalog::for_provider(provider);
        let (query, labels) = pick_query(&mut prompter, catalog, this_year)?;

        let source = crate::data::source_for(provider, settings)?;
        let now = Instant::now();
        cache.purge_expired(now);
        match pipeline::run_query(source.as_ref(), catalog, &mut cache, &query, &labels, now) {
            Ok(run) => {
                prompter.say("")?;
                prompter.say(&crate::report::format_run(&run, &labels.country))?;
                if let Some(series) = run.series() {
                    if prompter.confirm("Export to CSV?", false)? {
                        let default_name = crate::io::export::default_export_name(
                            provider,
                            series.dataset_label(),
                            series.entity_label(),
                        );
                        let path = prompter.text("File name", &default_name.display().to_string())?;
                        crate::io::export::write_series_csv(Path::new(&path), series)?;
                        prompter.say(&format!("Exported {} row(s) to {path}", series.len()))?;
                    }
                }
            }
            // Provider trouble is reported and the session continues.
            Err(err) => prompter.say(&format!("Error: {err}"))?,
        }

        if !prompter.confirm("Run another query?", true)? {
            return Ok(());
        }
    }
}

/// Walk the menus for one provider and build the query plus display labels.
fn pick_query<R: io::BufRead, W: io::Write>(
    prompter: &mut Prompter<R, W>,
    catalog: &'static Catalog,
    this_year: i32,
) -> Result<(SeriesQuery, QueryLabels), AppError> {
    let domain_names: Vec<String> = catalog.domains.iter().map(|d| d.name.to_string()).collect();
    let domain = &catalog.domains[prompter.choose("Domain", &domain_names)?];

    let indicator_names: Vec<String> = domain.indicators.iter().map(|i| i.label.to_string()).collect();
    let indicator = &domain.indicators[prompter.choose("Indicator", &indicator_names)?];

    let dataset_id = if catalog.provider == Provider::Faostat {
        let group_names: Vec<String> = catalog.item_groups.iter().map(|g| g.name.to_string()).collect();
        let group = &catalog.item_groups[prompter.choose("Commodity group", &group_names)?];
        let item_names: Vec<String> = group.items.iter().map(|i| i.name.to_string()).collect();
        let item = &group.items[prompter.choose("Commodity", &item_names)?];
        faostat::dataset_id(domain.code, indicator.id, item.code)
    } else {
        indicator.id.to_string()
    };

    let region_names: Vec<String> = catalog.regions.iter().map(|r| r.name.to_string()).collect();
    let region = &catalog.regions[prompter.choose("Region", &region_names)?];
    let country_names: Vec<String> = region.countries.iter().map(|c| c.name.to_string()).collect();
    let country = &region.countries[prompter.choose("Country", &country_names)?];

    let year_start = prompter.year("Start year", catalog.default_start_year, catalog.min_year, this_year)?;
    let default_end = (this_year - 1).max(year_start);
    let year_end = prompter.year("End year", default_end, year_start, this_year)?;

    let labels = QueryLabels {
        dataset: catalog.dataset_label(&dataset_id),
        country: country.name.to_string(),
    };
    Ok((SeriesQuery::new(dataset_id, country.code, year_start, year_end), labels))
}

/// Resolve defaults and validate a `fetch` invocation.
pub fn fetch_config_from_args(args: &FetchArgs, this_year: i32) -> Result<FetchConfig, AppError> {
    let catalog = Catalog::for_provider(args.provider);
    let dataset = args.dataset.trim();
    let country = args.country.trim();
    if dataset.is_empty() || country.is_empty() {
        return Err(AppError::new(2, "Dataset and country must not be empty."));
    }

    let year_start = args.year_start.unwrap_or(catalog.default_start_year);
    let year_end = args.year_end.unwrap_or_else(|| (this_year - 1).max(year_start));
    validate_years(catalog, year_start, year_end, this_year)?;

    Ok(FetchConfig {
        provider: args.provider,
        query: SeriesQuery::new(dataset, country, year_start, year_end),
        labels: QueryLabels {
            dataset: catalog.dataset_label(dataset),
            country: catalog.country_label(country),
        },
        drop_missing: args.drop_missing,
        export: args.export.clone(),
    })
}

pub fn validate_years(catalog: &Catalog, year_start: i32, year_end: i32, this_year: i32) -> Result<(), AppError> {
    if year_start > year_end {
        return Err(AppError::new(
            2,
            format!("Start year {year_start} is after end year {year_end}."),
        ));
    }
    if year_start < catalog.min_year {
        return Err(AppError::new(
            2,
            format!(
                "{} data starts in {}; got start year {year_start}.",
                catalog.provider, catalog.min_year
            ),
        ));
    }
    if year_end > this_year {
        return Err(AppError::new(
            2,
            format!("End year {year_end} is in the future."),
        ));
    }
    Ok(())
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Rewrite argv so `ostat` defaults to `ostat pick`.
///
/// Rules:
/// - `ostat`                       -> `ostat pick`
/// - `ostat -p eurostat ...`       -> `ostat pick -p eurostat ...`
/// - `ostat --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("pick".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fetch" | "catalog" | "pick");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "pick flags".
    if arg1.starts_with('-') {
        argv.insert(1, "pick".to_string());
        return argv;
    }

    argv
}
