//! Error types for source fetching and configuration loading.
//!
//! Per-source failures never abort a run: the fetcher folds them into
//! [`crate::scrapers::feed::FetchOutcome::Skipped`] so the orchestrator can log
//! the reason and move on. Only configuration and output errors reach `main`.

use thiserror::Error;

/// Why a source produced no items this run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("feed parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid source URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
