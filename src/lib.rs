//! Trawl: a single-site trap-aware crawler
//!
//! This crate drives a sequential crawl loop over a frontier of URLs, fetching
//! each page through a corpus, extracting and classifying outbound links, and
//! aggregating per-run analytics into a plain-text report.

pub mod analytics;
pub mod config;
pub mod corpus;
pub mod crawler;
pub mod frontier;
pub mod output;
pub mod state;
pub mod text;
pub mod url;

use thiserror::Error;

/// Main error type for Trawl operations
#[derive(Debug, Error)]
pub enum TrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Frontier error: {0}")]
    Frontier(#[from] frontier::FrontierError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corpus error: {0}")]
    Corpus(String),
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

    #[error("Invalid host suffix: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingDomain,
}

/// Result type alias for Trawl operations
pub type Result<T> = std::result::Result<T, TrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analytics::AnalyticsAggregator;
pub use config::Config;
pub use corpus::{Corpus, FetchResult};
pub use crawler::{CrawlLoop, LinkExtractor};
pub use frontier::Frontier;
pub use state::{LoopState, UrlState};
pub use text::tokenize;
pub use url::{TrapReason, UrlValidator, Verdict};
