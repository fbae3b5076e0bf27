//! Command-line parsing for the open statistics browser.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! fetch/normalize pipeline and from presentation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::Provider;

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "ostat",
    version,
    about = "Browse Eurostat, FAOSTAT and World Bank time series from the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch one series, print metrics/table/statistics, and optionally export CSV.
    Fetch(FetchArgs),
    /// List the datasets and countries known for a provider.
    Catalog(CatalogArgs),
    /// Interactive menus: pick provider, dataset, country and years.
    ///
    /// Repeated queries in one session reuse the in-process cache.
    Pick(PickArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct FetchArgs {
    #[arg(short = 'p', long, value_enum)]
    pub provider: Provider,

    /// Dataset id (`nama_10_gdp`, `NY.GDP.MKTP.CD`, `QCL:Production:15`).
    #[arg(short = 'd', long)]
    pub dataset: String,

    /// Country code as the provider spells it (`AT`, `USA`, `231`).
    #[arg(short = 'c', long)]
    pub country: String,

    /// First year (default: 2010 for Eurostat, 2000 otherwise).
    #[arg(long = "from")]
    pub year_start: Option<i32>,

    /// Last year (default: last year).
    #[arg(long = "to")]
    pub year_end: Option<i32>,

    /// Write the displayed rows to this CSV file.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Hide and skip exporting periods without a value.
    #[arg(long)]
    pub drop_missing: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct CatalogArgs {
    #[arg(short = 'p', long, value_enum)]
    pub provider: Provider,
}

#[derive(Debug, Parser, Clone, Default)]
pub struct PickArgs {
    /// Skip the provider menu.
    #[arg(short = 'p', long, value_enum)]
    pub provider: Option<Provider>,
}
