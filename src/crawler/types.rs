//! Data produced by a crawl
//!
//! A crawl yields one [`RawPage`], which the extractor turns into image and
//! link inventories, and which the coordinator assembles into a
//! [`CrawlResult`] together with the broken links found by the validator.

use crate::url::LinkScope;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fetched page, before extraction
#[derive(Debug, Clone)]
pub struct RawPage {
    /// The URL that was requested
    pub url: String,

    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code of the final response
    pub status_code: u16,

    /// Decoded page body
    pub html: String,

    /// Size of the decoded body in bytes
    pub byte_size: usize,

    /// Time from sending the request to reading the full body (seconds)
    pub elapsed_secs: f64,
}

/// An `<img>` element with a usable `src`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Absolute image URL
    pub src: String,

    /// Raw alt text, empty when the attribute is missing
    pub alt: String,

    /// True iff the trimmed alt text is non-empty
    pub has_alt: bool,
}

impl ImageRecord {
    pub fn new(src: String, alt: String) -> Self {
        let has_alt = !alt.trim().is_empty();
        Self { src, alt, has_alt }
    }
}

/// An `<a>` element that resolved to an absolute URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Absolute link target
    pub url: String,

    /// Trimmed anchor text, possibly empty
    pub text: String,

    /// Internal or external relative to the crawl target
    pub scope: LinkScope,
}

/// Why a link counts as broken
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkOutcome {
    /// The server answered with a status >= 400
    Status { code: u16 },

    /// No response: connection refused, DNS failure, timeout, ...
    ConnectionFailed { reason: String },
}

impl fmt::Display for LinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status { code } => write!(f, "HTTP {}", code),
            Self::ConnectionFailed { reason } => write!(f, "connection failed ({})", reason),
        }
    }
}

/// A link whose probe failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLinkRecord {
    pub link: LinkRecord,
    pub outcome: LinkOutcome,
}

impl BrokenLinkRecord {
    /// HTTP status returned by the server, if it answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self.outcome {
            LinkOutcome::Status { code } => Some(code),
            LinkOutcome::ConnectionFailed { .. } => None,
        }
    }

    /// True if the link could not be reached at all
    pub fn is_connection_failure(&self) -> bool {
        matches!(self.outcome, LinkOutcome::ConnectionFailed { .. })
    }
}

/// Every signal derived from one crawled page
///
/// This is the only artifact passed from crawling to scoring. Build it with
/// [`CrawlResult::from_parts`] so the cached counts stay consistent with the
/// inventories they summarize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlResult {
    pub url: String,
    pub final_url: String,
    pub status_code: u16,

    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1_tags: Vec<String>,
    pub h2_tags: Vec<String>,

    pub images: Vec<ImageRecord>,
    pub total_images: usize,
    pub images_without_alt: usize,

    pub internal_links: Vec<LinkRecord>,
    pub external_links: Vec<LinkRecord>,
    pub total_links: usize,
    pub broken_links: Vec<BrokenLinkRecord>,

    /// Page fetch time in seconds
    pub load_time: f64,

    /// Page size in bytes
    pub page_size: usize,
}

/// Page-level signals, as produced by the extractor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSignals {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1_tags: Vec<String>,
    pub h2_tags: Vec<String>,
    pub images: Vec<ImageRecord>,
    pub internal_links: Vec<LinkRecord>,
    pub external_links: Vec<LinkRecord>,
}

impl PageSignals {
    /// All links, internal first, each group in document order
    pub fn all_links(&self) -> impl Iterator<Item = &LinkRecord> {
        self.internal_links.iter().chain(self.external_links.iter())
    }
}

impl CrawlResult {
    /// Assembles a crawl result and derives its cached counts
    pub fn from_parts(
        page: &RawPage,
        signals: PageSignals,
        broken_links: Vec<BrokenLinkRecord>,
    ) -> Self {
        let total_images = signals.images.len();
        let images_without_alt = signals.images.iter().filter(|i| !i.has_alt).count();
        let total_links = signals.internal_links.len() + signals.external_links.len();

        Self {
            url: page.url.clone(),
            final_url: page.final_url.clone(),
            status_code: page.status_code,
            title: signals.title,
            meta_description: signals.meta_description,
            h1_tags: signals.h1_tags,
            h2_tags: signals.h2_tags,
            images: signals.images,
            total_images,
            images_without_alt,
            internal_links: signals.internal_links,
            external_links: signals.external_links,
            total_links,
            broken_links,
            load_time: page.elapsed_secs.max(0.0),
            page_size: page.byte_size,
        }
    }

    /// Number of links whose probe failed
    pub fn broken_links_count(&self) -> usize {
        self.broken_links.len()
    }

    /// All links, internal first
    pub fn all_links(&self) -> impl Iterator<Item = &LinkRecord> {
        self.internal_links.iter().chain(self.external_links.iter())
    }
}
