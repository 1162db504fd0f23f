//! URL handling module for SiteSage
//!
//! This module provides crawl target validation, href resolution, domain
//! extraction, and internal/external link classification.

mod domain;
mod resolve;

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, same_domain};
pub use resolve::{is_ignored_href, resolve_href};

/// A validated absolute URL to audit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    url: Url,
    domain: String,
}

impl CrawlTarget {
    /// Returns the target URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the lowercase host of the target
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the target URL as a string slice
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for CrawlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Parses and validates a crawl target
///
/// Only absolute HTTP(S) URLs with a host are accepted. Relative paths and
/// fragment-only input fail to parse and are rejected before any fetch.
///
/// # Examples
///
/// ```
/// use sitesage::url::parse_target;
///
/// let target = parse_target("https://Example.com/page").unwrap();
/// assert_eq!(target.domain(), "example.com");
///
/// assert!(parse_target("/relative/path").is_err());
/// assert!(parse_target("#section").is_err());
/// ```
pub fn parse_target(input: &str) -> crate::UrlResult<CrawlTarget> {
    let trimmed = input.trim();
    let url = Url::parse(trimmed).map_err(|e| crate::UrlError::Parse {
        input: trimmed.to_string(),
        message: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(crate::UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    let domain =
        extract_domain(&url).ok_or_else(|| crate::UrlError::MissingHost(url.to_string()))?;

    Ok(CrawlTarget { url, domain })
}

/// Whether a link points at the audited site or elsewhere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkScope {
    /// Same host as the crawl target
    Internal,
    /// Any other host, or no host at all
    External,
}

impl LinkScope {
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Classifies a resolved link relative to the crawl target's domain
///
/// Hosts are compared exactly and case-insensitively; subdomains are
/// external.
pub fn classify_link(link: &Url, base_domain: &str) -> LinkScope {
    match extract_domain(link) {
        Some(domain) if same_domain(&domain, base_domain) => LinkScope::Internal,
        _ => LinkScope::External,
    }
}
