//! Crawler module for fetching and analyzing a single page
//!
//! This module contains the crawl pipeline, including:
//! - HTTP fetching under a timeout
//! - HTML parsing and signal extraction
//! - Concurrent link validation
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod types;
mod validator;

pub use coordinator::{crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_page};
pub use parser::parse_html;
pub use types::{
    BrokenLinkRecord, CrawlResult, ImageRecord, LinkOutcome, LinkRecord, PageSignals, RawPage,
};
pub use validator::validate_links;
