//! Blocking HTTP client with retry-with-backoff on server errors.

use std::thread;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use tracing::{debug, warn};

use crate::domain::Provider;
use crate::error::FetchError;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Retry behaviour for provider GET requests.
///
/// Only the listed status codes are retried; transport errors and other
/// statuses fail immediately.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first request.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_factor: 2.0,
            retryable_statuses: vec![500, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);
        Duration::from_millis(capped as u64)
    }

    pub fn is_retryable(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }
}

pub struct HttpClient {
    client: Client,
    retry: RetryConfig,
    provider: Provider,
}

impl HttpClient {
    pub fn new(provider: Provider, timeout: Duration, retry: RetryConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| FetchError::Transport { provider, source })?;
        Ok(Self::with_client(provider, client, retry))
    }

    /// Wrap an already configured `reqwest` client.
    pub fn with_client(provider: Provider, client: Client, retry: RetryConfig) -> Self {
        Self { client, retry, provider }
    }

    /// GET `url` with query parameters, retrying retryable statuses.
    ///
    /// Returns the first successful response; a non-success status is an error.
    pub fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Response, FetchError> {
        let provider = self.provider;
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            debug!(%provider, url, attempt, "GET");
            let resp = self
                .client
                .get(url)
                .query(query)
                .send()
                .map_err(|source| FetchError::Transport { provider, source })?;

            let status = resp.status();
            if status.is_success() {
                return Ok(resp);
            }

            let code = status.as_u16();
            if !self.retry.is_retryable(code) || attempt >= self.retry.max_attempts {
                return Err(FetchError::Status {
                    provider,
                    status: code,
                    attempts: attempt,
                });
            }

            let delay = self.retry.delay_for_attempt(attempt - 1);
            warn!(%provider, status = code, attempt, delay_ms = delay.as_millis() as u64, "retrying after server error");
            thread::sleep(delay);
        }
    }

    pub fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, FetchError> {
        let provider = self.provider;
        self.get(url, query)?
            .text()
            .map_err(|source| FetchError::Transport { provider, source })
    }
}
