//! Runtime settings from the environment (and an optional `.env` file).
//!
//! | variable                  | default                                                      |
//! |---------------------------|--------------------------------------------------------------|
//! | `OSTAT_EUROSTAT_URL`      | `https://ec.europa.eu/eurostat/api/dissemination/sdmx/2.1/data` |
//! | `OSTAT_WORLDBANK_URL`     | `https://api.worldbank.org/v2`                               |
//! | `OSTAT_HTTP_TIMEOUT_SECS` | `30`                                                         |
//! | `OSTAT_CACHE_TTL_HOURS`   | `24`                                                         |
//! | `OSTAT_LOG`               | `warn`                                                       |

use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_EUROSTAT_URL: &str = "https://ec.europa.eu/eurostat/api/dissemination/sdmx/2.1/data";
pub const DEFAULT_WORLDBANK_URL: &str = "https://api.worldbank.org/v2";
pub const DEFAULT_LOG_FILTER: &str = "warn";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CACHE_TTL_HOURS: u64 = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub eurostat_url: String,
    pub worldbank_url: String,
    pub http_timeout: Duration,
    pub cache_ttl: Duration,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            eurostat_url: DEFAULT_EUROSTAT_URL.to_string(),
            worldbank_url: DEFAULT_WORLDBANK_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_HOURS * 3600),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let http_timeout = match get("OSTAT_HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_positive("OSTAT_HTTP_TIMEOUT_SECS", &raw)?),
            None => defaults.http_timeout,
        };
        let cache_ttl = match get("OSTAT_CACHE_TTL_HOURS") {
            Some(raw) => Duration::from_secs(parse_positive("OSTAT_CACHE_TTL_HOURS", &raw)? * 3600),
            None => defaults.cache_ttl,
        };

        Ok(Self {
            eurostat_url: get("OSTAT_EUROSTAT_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.eurostat_url),
            worldbank_url: get("OSTAT_WORLDBANK_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.worldbank_url),
            http_timeout,
            cache_ttl,
            log_filter: get("OSTAT_LOG").unwrap_or(defaults.log_filter),
        })
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<u64, AppError> {
    match raw.parse::<u64>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(AppError::new(2, format!("Invalid {key}='{raw}': expected a positive integer."))),
    }
}
