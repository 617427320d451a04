//! Recon-Fanout: a parallel reconnaissance fetch engine
//!
//! This crate fans many independent HTTP requests out across the tokio runtime,
//! gathers one outcome per request without letting a failure block the rest, and
//! runs light post-processing on the gathered results: username existence probes,
//! search-engine harvesting with email/subdomain extraction, and dork searches.

pub mod config;
pub mod engine;
pub mod fetch;
pub mod output;
pub mod recon;
pub mod url;

use thiserror::Error;

/// Main error type for Recon-Fanout operations
///
/// Per-job transport failures never surface here; they are folded into
/// [`fetch::FetchOutcome::Error`] at the worker boundary. Only batch-level
/// setup failures reach the caller.
#[derive(Debug, Error)]
pub enum ReconError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

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

    #[error("Failed to parse site list: {0}")]
    SiteList(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while turning a site template into a concrete URL
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Template for site '{site}' has no {{username}} placeholder: {template}")]
    MissingPlaceholder { site: String, template: String },

    #[error("Site '{site}' expands to an invalid URL '{url}': {reason}")]
    InvalidUrl {
        site: String,
        url: String,
        reason: String,
    },
}

/// Transport-level failure for a single request
///
/// The display form becomes the tail of a sentinel-prefixed error outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Timeout was reached: {0}")]
    Timeout(String),

    #[error("Couldn't connect to server: {0}")]
    Connect(String),

    #[error("Redirect error: {0}")]
    Redirect(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Recon-Fanout operations
pub type Result<T> = std::result::Result<T, ReconError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, SiteList};
pub use engine::{BlockingEngine, Engine};
pub use fetch::{Dispatcher, FetchJob, FetchMode, FetchOutcome, ScrapeResultSet, Transport};
pub use fetch::TRANSPORT_ERROR_SENTINEL;
pub use recon::HarvestResult;
