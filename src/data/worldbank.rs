//! World Bank Indicators API (v2, JSON).
//!
//! A page is a two-element array: paging metadata, then the observations (or
//! `null` when there are none). Errors come back as a one-element array with a
//! `message` list instead.

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::config::Settings;
use crate::data::SeriesSource;
use crate::data::http::{HttpClient, RetryConfig};
use crate::domain::{Provider, RawTable, SeriesQuery, TableShape};
use crate::error::FetchError;

const PER_PAGE: u32 = 1000;
/// Hard stop in case the paging metadata is inconsistent.
const MAX_PAGES: u32 = 50;

pub const ENTITY_COLUMN: &str = "geo\\time";

pub struct WorldBankClient {
    http: HttpClient,
    base_url: String,
}

impl WorldBankClient {
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        Ok(Self {
            http: HttpClient::new(Provider::WorldBank, settings.http_timeout, RetryConfig::default())?,
            base_url: settings.worldbank_url.clone(),
        })
    }
}

impl SeriesSource for WorldBankClient {
    fn provider(&self) -> Provider {
        Provider::WorldBank
    }

    fn fetch(&self, query: &SeriesQuery) -> Result<RawTable, FetchError> {
        let url = format!(
            "{}/country/{}/indicator/{}",
            self.base_url, query.entity_id, query.dataset_id
        );

        let mut rows = Vec::new();
        let mut page = 1u32;
        loop {
            let body = self.http.get_text(
                &url,
                &[
                    ("format", "json".to_string()),
                    ("date", format!("{}:{}", query.year_start, query.year_end)),
                    ("per_page", PER_PAGE.to_string()),
                    ("page", page.to_string()),
                ],
            )?;
            let parsed = parse_page(&body, &query.entity_id)?;
            rows.extend(parsed.rows);
            if page >= parsed.pages || page >= MAX_PAGES {
                break;
            }
            page += 1;
        }

        info!(indicator = %query.dataset_id, country = %query.entity_id, rows = rows.len(), "fetched World Bank series");
        Ok(long_table(rows))
    }
}

/// One decoded page of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub pages: u32,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct PageMeta {
    #[serde(default)]
    pages: u32,
}

#[derive(Debug, Deserialize)]
struct Observation {
    #[serde(default)]
    countryiso3code: String,
    country: Option<CodeLabel>,
    date: String,
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CodeLabel {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ProviderMessage {
    #[serde(default)]
    key: String,
    #[serde(default)]
    value: String,
}

pub fn long_table(rows: Vec<Vec<String>>) -> RawTable {
    RawTable::new(
        TableShape::Long,
        vec![ENTITY_COLUMN.to_string(), "period".to_string(), "value".to_string()],
        rows,
    )
}

/// Decode one JSON page into long-table rows `[entity, period, value]`.
///
/// The API accepts ISO2 and ISO3 codes but always answers with both, so a row
/// whose `country.id` or `countryiso3code` matches `requested` is tagged with
/// `requested` as spelled. Other rows keep the ISO3 code.
pub fn parse_page(body: &str, requested: &str) -> Result<Page, FetchError> {
    let malformed = |message: String| FetchError::Malformed {
        provider: Provider::WorldBank,
        message,
    };

    let root: Value = serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;
    let parts = root
        .as_array()
        .ok_or_else(|| malformed("expected a JSON array".to_string()))?;
    let head = parts
        .first()
        .ok_or_else(|| malformed("empty response array".to_string()))?;

    if let Some(messages) = head.get("message") {
        let messages: Vec<ProviderMessage> =
            serde_json::from_value(messages.clone()).map_err(|e| malformed(e.to_string()))?;
        let text = messages
            .iter()
            .map(|m| format!("{}: {}", m.key, m.value))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(FetchError::Provider {
            provider: Provider::WorldBank,
            message: text,
        });
    }

    let meta: PageMeta = serde_json::from_value(head.clone()).map_err(|e| malformed(e.to_string()))?;
    let observations: Vec<Observation> = match parts.get(1) {
        None | Some(Value::Null) => Vec::new(),
        Some(data) => serde_json::from_value(data.clone()).map_err(|e| malformed(e.to_string()))?,
    };

    let rows = observations
        .into_iter()
        .map(|obs| {
            let iso2 = obs.country.map(|c| c.id).unwrap_or_default();
            let entity = if requested.eq_ignore_ascii_case(&iso2)
                || requested.eq_ignore_ascii_case(&obs.countryiso3code)
            {
                requested.to_string()
            } else if obs.countryiso3code.is_empty() {
                iso2
            } else {
                obs.countryiso3code
            };
            let value = obs.value.map(|v| v.to_string()).unwrap_or_default();
            vec![entity, obs.date, value]
        })
        .collect();

    Ok(Page {
        pages: meta.pages.max(1),
        rows,
    })
}
