//! Error types.
//!
//! Library code returns narrow, typed errors (`SchemaError`, `FetchError`,
//! `InsufficientDataError`). The binary folds everything into `AppError`, which
//! carries the process exit code:
//!
//! - `2`: usage, configuration or local IO problems
//! - `3`: the query produced no data
//! - `4`: provider or transport failure

use thiserror::Error;

use crate::domain::Provider;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// The raw table is missing a column the normalizer needs to interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema error: {message}")]
pub struct SchemaError {
    pub message: String,
}

impl SchemaError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A derived statistic was requested over too few present values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not enough data: {reason}")]
pub struct InsufficientDataError {
    pub reason: String,
}

impl InsufficientDataError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Failure while talking to a statistics provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },
    #[error("{provider} request failed with status {status} after {attempts} attempt(s)")]
    Status {
        provider: Provider,
        status: u16,
        attempts: u32,
    },
    #[error("{provider} returned an error: {message}")]
    Provider { provider: Provider, message: String },
    #[error("failed to parse {provider} response: {message}")]
    Malformed { provider: Provider, message: String },
}

impl From<SchemaError> for AppError {
    fn from(err: SchemaError) -> Self {
        AppError::new(4, err.to_string())
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::new(4, err.to_string())
    }
}

impl From<InsufficientDataError> for AppError {
    fn from(err: InsufficientDataError) -> Self {
        AppError::new(3, err.to_string())
    }
}
