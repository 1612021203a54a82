//! Thread-Harvest: a users → posts → comments export pipeline
//!
//! This crate fetches a three-level dataset from a remote JSON API, validates
//! and normalizes the records, selects a bounded newest subset at each level,
//! and flattens the result into a CSV artifact plus a run summary.

pub mod client;
pub mod config;
pub mod output;
pub mod pipeline;
pub mod record;

use thiserror::Error;

/// Main error type for Thread-Harvest operations
///
/// Everything here is fatal to the run. Per-branch fetch failures and
/// per-record validation rejections are handled inside the pipeline and
/// surface only through counters and logs.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Users fetch failed: {0}")]
    UsersFetch(#[source] client::FetchError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Thread-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use client::{ApiClient, FetchError, RetryPolicy};
pub use config::Config;
pub use pipeline::{Coordinator, RunCounters};
pub use record::{Comment, Post, RawRecord, ResultRow, User};
