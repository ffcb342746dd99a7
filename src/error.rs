//! Error handling for the lyricsd service
//!
//! The three outcomes a caller must be able to tell apart — no lyrics exist,
//! the remote provider failed, the local store failed — each map to their own
//! variant here and stay separate all the way to the HTTP boundary.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LyricsdError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("No lyrics found for track")]
    NotFound,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Failures of the persistence layer. All of them surface to callers as
/// "store unavailable"; the variants exist for logs and tests.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection failed after {attempts} attempts: {source}")]
    Connect {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    #[error("Connection pool exhausted: {0}")]
    PoolExhausted(#[source] sqlx::Error),

    #[error("Query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::PoolExhausted(err)
            }
            _ => StoreError::Query(err),
        }
    }
}

/// Failures reaching or understanding the remote lyrics service. A clean
/// "no data" response is not an error and never lands here.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request timed out")]
    Timeout,

    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(#[source] reqwest::Error),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_decode() {
            ProviderError::MalformedResponse(err)
        } else {
            ProviderError::Http(err)
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LyricsdError>;

impl From<std::io::Error> for LyricsdError {
    fn from(err: std::io::Error) -> Self {
        LyricsdError::Config(ConfigError::Io(err))
    }
}

impl From<toml::de::Error> for LyricsdError {
    fn from(err: toml::de::Error) -> Self {
        LyricsdError::Config(ConfigError::InvalidFormat(err))
    }
}

impl From<toml::ser::Error> for LyricsdError {
    fn from(err: toml::ser::Error) -> Self {
        LyricsdError::Config(ConfigError::Serialize(err))
    }
}

impl From<serde_json::Error> for LyricsdError {
    fn from(err: serde_json::Error) -> Self {
        LyricsdError::Internal(err.into())
    }
}
