//! SiteSage: on-page SEO auditing
//!
//! This crate fetches a single web page, extracts its structural SEO signals,
//! validates its outbound links, and scores the result on a 0-100 scale with
//! a letter grade and a list of concrete issues.

pub mod config;
pub mod crawler;
pub mod output;
pub mod report;
pub mod scoring;
pub mod url;

use thiserror::Error;

/// Main error type for SiteSage operations
#[derive(Debug, Error)]
pub enum SiteSageError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Crawl failed: {0}")]
    Crawl(#[from] CrawlError),

    #[error("Report store error: {0}")]
    Store(#[from] report::StoreError),

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
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL '{input}': {message}")]
    Parse { input: String, message: String },

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Errors raised while fetching the audited page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Could not connect to {url}: {message}")]
    Connect { url: String, message: String },

    #[error("Could not decode response body from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("HTTP error for {url}: {source}")]
    Request { url: String, source: reqwest::Error },
}

/// Errors raised while extracting signals from HTML
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// Stage of a crawl at which a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlStage {
    Target,
    Session,
    Fetch,
    Extract,
}

/// A crawl failure, wrapping the first error raised by any stage
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Invalid crawl target: {0}")]
    Target(#[source] UrlError),

    #[error("Failed to build HTTP session: {0}")]
    Session(#[source] reqwest::Error),

    #[error("Fetch failed: {0}")]
    Fetch(#[source] FetchError),

    #[error("HTML parse failed for {url}: {source}")]
    Extract {
        url: String,
        #[source]
        source: ExtractError,
    },
}

impl CrawlError {
    /// Returns the stage that produced this error
    pub fn stage(&self) -> CrawlStage {
        match self {
            Self::Target(_) => CrawlStage::Target,
            Self::Session(_) => CrawlStage::Session,
            Self::Fetch(_) => CrawlStage::Fetch,
            Self::Extract { .. } => CrawlStage::Extract,
        }
    }
}

/// Result type alias for SiteSage operations
pub type Result<T> = std::result::Result<T, SiteSageError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Coordinator, CrawlResult};
pub use scoring::{score, Grade, ScoreBreakdown};
pub use crate::url::{parse_target, CrawlTarget, LinkScope};
