//! Provider fetchers.
//!
//! Each provider implements [`SeriesSource`]: given a [`SeriesQuery`] it
//! returns the provider's table as a [`RawTable`] without interpreting it.
//! Interpretation is the normalizer's job.

use crate::config::Settings;
use crate::domain::{Provider, RawTable, SeriesQuery};
use crate::error::FetchError;

pub mod eurostat;
pub mod faostat;
pub mod http;
pub mod worldbank;

pub trait SeriesSource {
    fn provider(&self) -> Provider;

    fn fetch(&self, query: &SeriesQuery) -> Result<RawTable, FetchError>;
}

/// Build the live source for `provider`.
pub fn source_for(provider: Provider, settings: &Settings) -> Result<Box<dyn SeriesSource>, FetchError> {
    Ok(match provider {
        Provider::Eurostat => Box::new(eurostat::EurostatClient::new(settings)?),
        Provider::Faostat => Box::new(faostat::FaostatSample),
        Provider::WorldBank => Box::new(worldbank::WorldBankClient::new(settings)?),
    })
}
